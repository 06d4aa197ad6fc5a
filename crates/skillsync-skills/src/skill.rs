//! Skill package definition and parsing
//!
//! Each skill is a folder containing SKILL.md with a delimited header

use anyhow::{anyhow, Context, Result};
use regex::Regex;
use skillsync_types::layout::{RESOURCES_DIR, SCRIPTS_DIR, SKILL_FILE, TEMPLATES_DIR};
use skillsync_types::Vocabulary;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::warn;

use crate::description::DescriptionModel;
use crate::frontmatter::ParsedDocument;
use crate::sections::SectionModel;

/// Longest skill name the assistant runtime accepts
const MAX_NAME_LENGTH: usize = 64;

/// Header field holding the skill name
const NAME_FIELD: &str = "name";
/// Header block field holding the description
const DESCRIPTION_FIELD: &str = "description";

#[allow(clippy::expect_used)]
static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9-]+$").expect("name validation regex is valid"));

/// A skill directory on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillPackage {
    /// Skill identifier, the directory name
    pub id: String,
    /// Full path to the skill directory
    pub path: PathBuf,
}

impl SkillPackage {
    /// Wrap an existing skill directory
    pub fn from_dir(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(anyhow!("Skill directory not found: {:?}", dir));
        }

        let id = dir
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| anyhow!("Skill directory has no usable name: {:?}", dir))?
            .to_string();

        Ok(Self {
            id,
            path: dir.to_path_buf(),
        })
    }

    /// Look up `<skills_root>/<id>`, `None` when it does not exist
    ///
    /// Only a single plain directory name is accepted: empty ids, `.`, `..`
    /// and ids with path separators never resolve.
    pub fn locate(skills_root: &Path, id: &str) -> Option<Self> {
        if !is_plain_id(id) {
            return None;
        }
        Self::from_dir(&skills_root.join(id)).ok()
    }

    /// Path of the canonical description file
    pub fn description_file(&self) -> PathBuf {
        self.path.join(SKILL_FILE)
    }

    /// Whether SKILL.md exists
    pub fn has_description(&self) -> bool {
        self.description_file().is_file()
    }

    /// `resources/` directory (may not exist)
    pub fn resources_dir(&self) -> PathBuf {
        self.path.join(RESOURCES_DIR)
    }

    /// `scripts/` directory (may not exist)
    pub fn scripts_dir(&self) -> PathBuf {
        self.path.join(SCRIPTS_DIR)
    }

    /// `templates/` directory (may not exist)
    pub fn templates_dir(&self) -> PathBuf {
        self.path.join(TEMPLATES_DIR)
    }

    /// Read SKILL.md as text
    pub fn read_description(&self) -> Result<String> {
        let skill_file = self.description_file();
        fs::read_to_string(&skill_file).with_context(|| format!("Failed to read {:?}", skill_file))
    }

    /// Read and parse SKILL.md
    pub fn load(&self, vocabulary: &Vocabulary) -> Result<SkillDescription> {
        let content = self.read_description()?;
        Ok(SkillDescription::parse(&self.id, &content, vocabulary))
    }
}

/// Everything the generators need from SKILL.md
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillDescription {
    /// Header name, falling back to the directory name; names the skill in the overview fallback
    pub name: String,
    /// Parsed description block
    pub description: DescriptionModel,
    /// Parsed body sections, unfiltered
    pub sections: SectionModel,
}

impl SkillDescription {
    /// Parse SKILL.md text; absent parts default to empty
    pub fn parse(id: &str, content: &str, vocabulary: &Vocabulary) -> Self {
        let document = ParsedDocument::parse(content);

        let name = match document.field(NAME_FIELD).filter(|n| !n.is_empty()) {
            Some(name) => {
                check_name(id, name);
                name.to_string()
            }
            None => id.to_string(),
        };

        let description = DescriptionModel::parse(
            document.block_lines(DESCRIPTION_FIELD),
            &vocabulary.markers,
        );
        let sections = SectionModel::parse(&document.body(), &vocabulary.headings);

        Self {
            name,
            description,
            sections,
        }
    }
}

fn is_plain_id(id: &str) -> bool {
    !id.is_empty() && id != "." && id != ".." && !id.contains(['/', '\\'])
}

/// Warn about header names the assistant runtime may reject; never fatal here
fn check_name(id: &str, name: &str) {
    if name.len() > MAX_NAME_LENGTH {
        warn!(
            "Skill name '{}' exceeds {} characters (was {})",
            name,
            MAX_NAME_LENGTH,
            name.len()
        );
    }

    if !NAME_RE.is_match(name) {
        warn!(
            "Skill name '{}' should contain only lowercase letters, numbers, and hyphens",
            name
        );
    }

    if name != id {
        warn!("Skill name '{}' does not match its directory '{}'", name, id);
    }
}
