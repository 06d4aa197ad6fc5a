//! Requirement indexer run
//!
//! Load mapping → resolve documents → group by skill → write one index per
//! skill → make sure each SKILL.md header references its index.

use skillsync_skills::SkillPackage;
use skillsync_types::layout::REQUIREMENTS_INDEX_FILE;
use skillsync_types::{Markers, RequirementDocument};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::document::read_requirement;
use crate::error::{Result, SyncError};
use crate::header::{ensure_header_reference, header_reference_pending, IndexReference};
use crate::index::index_for_skill;
use crate::mapping::load_mapping;

/// Options for one indexer run
#[derive(Debug, Clone, Default)]
pub struct IndexOptions {
    /// Restrict the run to one skill
    pub skill: Option<String>,
    /// Report intended changes without writing anything
    pub dry_run: bool,
}

/// Outcome of an indexer run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexReport {
    /// Whether this was a dry run
    pub dry_run: bool,
    /// Index files written (or that would be written)
    pub indexes: Vec<PathBuf>,
    /// Skills whose SKILL.md header gained (or would gain) the index reference
    pub headers: Vec<String>,
    /// Mapped documents that do not exist, plus malformed mapping entries
    pub missing_docs: Vec<String>,
    /// Mapped skills without a directory under the skills root
    pub missing_skills: Vec<String>,
    /// Skills whose SKILL.md could not be read; their index is still written
    pub unreadable_headers: Vec<String>,
}

impl fmt::Display for IndexReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = if self.dry_run { "would update" } else { "updated" };
        writeln!(
            f,
            "{} {} requirement index files",
            verb,
            self.indexes.len()
        )?;
        if self.dry_run {
            for path in &self.indexes {
                writeln!(f, "- {}", path.display())?;
            }
        }
        writeln!(f, "{} {} skill headers", verb, self.headers.len())?;
        if !self.missing_docs.is_empty() {
            writeln!(f, "missing docs:")?;
            for doc in &self.missing_docs {
                writeln!(f, "- {doc}")?;
            }
        }
        if !self.missing_skills.is_empty() {
            writeln!(f, "missing skills:")?;
            for skill in &self.missing_skills {
                writeln!(f, "- {skill}")?;
            }
        }
        if !self.unreadable_headers.is_empty() {
            writeln!(f, "unreadable SKILL.md:")?;
            for skill in &self.unreadable_headers {
                writeln!(f, "- {skill}")?;
            }
        }
        Ok(())
    }
}

/// Requirement indexer over one project root
pub struct RequirementIndexer {
    /// Project root; mapped document paths resolve against it
    root: PathBuf,
    /// Directory holding skill folders
    skills_root: PathBuf,
    /// Requirement mapping file
    mapping_path: PathBuf,
    /// Description block markers
    markers: Markers,
}

impl RequirementIndexer {
    /// Create an indexer with default description markers
    pub fn new(
        root: impl Into<PathBuf>,
        skills_root: impl Into<PathBuf>,
        mapping_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            root: root.into(),
            skills_root: skills_root.into(),
            mapping_path: mapping_path.into(),
            markers: Markers::default(),
        }
    }

    /// Use custom description block markers
    #[must_use]
    pub fn with_markers(mut self, markers: Markers) -> Self {
        self.markers = markers;
        self
    }

    /// Directory of the mapping file relative to the root, `/`-separated
    pub fn source_dir(&self) -> String {
        let parent = self.mapping_path.parent().unwrap_or_else(|| Path::new(""));
        let relative = parent.strip_prefix(&self.root).unwrap_or(parent);
        let parts: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .filter(|part| part != ".")
            .collect();
        if parts.is_empty() {
            ".".to_string()
        } else {
            parts.join("/")
        }
    }

    /// Run the indexer
    ///
    /// Fails only when the mapping cannot be loaded or a write fails; missing
    /// documents and skills end up in the report.
    pub fn run(&self, options: &IndexOptions) -> Result<IndexReport> {
        let mapping = load_mapping(&self.mapping_path)?;
        info!(
            "Loaded {} requirement entries from {:?}",
            mapping.entries.len(),
            self.mapping_path
        );

        let mut report = IndexReport {
            dry_run: options.dry_run,
            ..IndexReport::default()
        };
        report.missing_docs.extend(
            mapping
                .malformed
                .iter()
                .map(|position| format!("entry {position}: missing file or skills")),
        );

        let mut by_skill: BTreeMap<String, Vec<RequirementDocument>> = BTreeMap::new();
        for entry in &mapping.entries {
            if let Some(only) = options.skill.as_deref() {
                if !entry.applies_to(only) {
                    continue;
                }
            }

            if !self.root.join(&entry.file).is_file() {
                debug!("Requirement document not found: {}", entry.file);
                report.missing_docs.push(entry.file.clone());
                continue;
            }

            let document = match read_requirement(&self.root, &entry.file) {
                Ok(document) => document,
                Err(e) => {
                    warn!("Skipping requirement document: {}", e);
                    report.missing_docs.push(entry.file.clone());
                    continue;
                }
            };

            for skill in &entry.skills {
                if options.skill.as_deref().is_some_and(|only| only != skill.as_str()) {
                    continue;
                }
                by_skill
                    .entry(skill.clone())
                    .or_default()
                    .push(document.clone());
            }
        }

        let source_dir = self.source_dir();
        let reference = IndexReference {
            source_dir: &source_dir,
            markers: &self.markers,
        };

        for (skill, documents) in &by_skill {
            let Some(package) = SkillPackage::locate(&self.skills_root, skill) else {
                warn!("Skill directory not found: {}", skill);
                report.missing_skills.push(skill.clone());
                continue;
            };

            let index_path = self.write_index(&package, &source_dir, documents, options.dry_run)?;
            report.indexes.push(index_path);

            if !package.has_description() {
                debug!("No SKILL.md in {:?}, header left alone", package.path);
                continue;
            }

            let changed = if options.dry_run {
                header_reference_pending(&package, &reference)
            } else {
                ensure_header_reference(&package, &reference)
            };
            match changed {
                Ok(true) => report.headers.push(skill.clone()),
                Ok(false) => {}
                Err(e @ SyncError::Read { .. }) => {
                    warn!("Leaving header of {} alone: {}", skill, e);
                    report.unreadable_headers.push(skill.clone());
                }
                Err(e) => return Err(e),
            }
        }

        info!(
            "Requirement sync finished: {} indexes, {} headers, {} missing docs, {} missing skills, {} unreadable headers",
            report.indexes.len(),
            report.headers.len(),
            report.missing_docs.len(),
            report.missing_skills.len(),
            report.unreadable_headers.len()
        );
        Ok(report)
    }

    fn write_index(
        &self,
        package: &SkillPackage,
        source_dir: &str,
        documents: &[RequirementDocument],
        dry_run: bool,
    ) -> Result<PathBuf> {
        let resources_dir = package.resources_dir();
        let index_path = resources_dir.join(REQUIREMENTS_INDEX_FILE);
        if dry_run {
            return Ok(index_path);
        }

        fs::create_dir_all(&resources_dir).map_err(|source| SyncError::Write {
            path: resources_dir.clone(),
            source,
        })?;
        let content = index_for_skill(&package.id, source_dir, documents);
        fs::write(&index_path, content).map_err(|source| SyncError::Write {
            path: index_path.clone(),
            source,
        })?;
        debug!("Wrote {:?} ({} documents)", index_path, documents.len());
        Ok(index_path)
    }
}
