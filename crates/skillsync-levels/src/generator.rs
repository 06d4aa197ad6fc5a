//! Level generator run over a skills root

use anyhow::{Context, Result};
use skillsync_skills::{Attachments, SkillPackage, SkillsRegistry};
use skillsync_types::{Level, Vocabulary};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::classify::try_extract_topics;
use crate::compose::{compose, LevelInputs};

/// What happened to one skill
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkillOutcome {
    /// All four level files were written
    Generated {
        /// Resources whose topics could not be read
        degraded: Vec<String>,
    },
    /// Nothing was written; the reason is for the report
    Skipped(String),
}

/// Outcome of a generator run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LevelReport {
    /// Skills that received level files, in identifier order
    pub generated: Vec<String>,
    /// Skipped skills with the reason
    pub skipped: Vec<(String, String)>,
    /// `skill/resource` pairs generated without topics because the resource was unreadable
    pub degraded: Vec<String>,
}

impl fmt::Display for LevelReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "generated level files for {} skills", self.generated.len())?;
        if !self.skipped.is_empty() {
            writeln!(f, "skipped:")?;
            for (skill, reason) in &self.skipped {
                writeln!(f, "- {skill}: {reason}")?;
            }
        }
        if !self.degraded.is_empty() {
            writeln!(f, "unreadable resources:")?;
            for resource in &self.degraded {
                writeln!(f, "- {resource}")?;
            }
        }
        Ok(())
    }
}

/// Rendered level documents of one skill, plus resources that failed to read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLevels {
    /// Level and full file content, in level order
    pub documents: Vec<(Level, String)>,
    /// Resources whose topics could not be read
    pub degraded: Vec<String>,
}

/// Level generator over one skills root
pub struct LevelGenerator {
    /// Directory holding skill folders
    skills_root: PathBuf,
    /// Classification and filtering tables
    vocabulary: Vocabulary,
}

impl LevelGenerator {
    /// Create a generator
    pub fn new(skills_root: impl Into<PathBuf>, vocabulary: Vocabulary) -> Self {
        Self {
            skills_root: skills_root.into(),
            vocabulary,
        }
    }

    /// Compose all four levels for a skill without writing anything
    pub fn render(&self, package: &SkillPackage) -> Result<RenderedLevels> {
        let skill = package.load(&self.vocabulary)?;
        let attachments = Attachments::collect(package, &self.vocabulary)
            .with_context(|| format!("Failed to list attachments of {}", package.id))?;

        let mut topics = BTreeMap::new();
        let mut degraded = Vec::new();
        let resources_dir = package.resources_dir();
        for resource in &attachments.resources {
            let found = match try_extract_topics(&resources_dir.join(resource), &self.vocabulary) {
                Ok(found) => found,
                Err(e) => {
                    warn!("Could not read resource {}/{}: {}", package.id, resource, e);
                    degraded.push(resource.clone());
                    Vec::new()
                }
            };
            topics.insert(resource.clone(), found);
        }

        let inputs = LevelInputs::new(&package.id, &skill, attachments, topics, &self.vocabulary);
        let documents = Level::ALL
            .iter()
            .map(|&level| (level, compose(level, &inputs)))
            .collect();

        Ok(RenderedLevels {
            documents,
            degraded,
        })
    }

    /// Regenerate the level files of one skill
    ///
    /// A skill without a readable SKILL.md, or whose attachments cannot be
    /// listed, is skipped. Write failures are errors.
    pub fn update_skill(&self, package: &SkillPackage) -> Result<SkillOutcome> {
        if !package.has_description() {
            return Ok(SkillOutcome::Skipped("missing SKILL.md".to_string()));
        }

        let rendered = match self.render(package) {
            Ok(rendered) => rendered,
            Err(e) => {
                warn!("Skipping skill {}: {:#}", package.id, e);
                return Ok(SkillOutcome::Skipped(format!("{e:#}")));
            }
        };

        let resources_dir = package.resources_dir();
        fs::create_dir_all(&resources_dir)
            .with_context(|| format!("Failed to create {:?}", resources_dir))?;
        for (level, content) in &rendered.documents {
            let path = resources_dir.join(level.file_name());
            fs::write(&path, content).with_context(|| format!("Failed to write {:?}", path))?;
            debug!("Wrote {:?}", path);
        }

        Ok(SkillOutcome::Generated {
            degraded: rendered.degraded,
        })
    }

    /// Regenerate level files for every skill, or only `only`
    ///
    /// A missing skills root is fatal; per-skill problems end up in the report.
    pub fn run(&self, only: Option<&str>) -> Result<LevelReport> {
        let mut registry = SkillsRegistry::new(self.skills_root.clone());
        registry.discover()?;

        let mut report = LevelReport::default();
        if let Some(id) = only {
            if registry.get(id).is_none() {
                report
                    .skipped
                    .push((id.to_string(), "skill directory not found".to_string()));
            }
        }

        for package in registry.select(only) {
            match self.update_skill(package)? {
                SkillOutcome::Generated { degraded } => {
                    report.generated.push(package.id.clone());
                    report
                        .degraded
                        .extend(degraded.into_iter().map(|r| format!("{}/{}", package.id, r)));
                }
                SkillOutcome::Skipped(reason) => {
                    debug!("Skipped {}: {}", package.id, reason);
                    report.skipped.push((package.id.clone(), reason));
                }
            }
        }

        info!(
            "Level generation finished: {} generated, {} skipped",
            report.generated.len(),
            report.skipped.len()
        );
        Ok(report)
    }
}
