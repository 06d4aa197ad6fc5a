use serde::{Deserialize, Serialize};

/// One row of the requirement mapping: a document and the skills it applies to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementEntry {
    /// Document path, relative to the project root
    pub file: String,
    /// Skill identifiers in mapping order
    pub skills: Vec<String>,
}

impl RequirementEntry {
    /// Create an entry
    pub fn new(file: impl Into<String>, skills: Vec<String>) -> Self {
        Self {
            file: file.into(),
            skills,
        }
    }

    /// Whether this entry lists the given skill
    pub fn applies_to(&self, skill: &str) -> bool {
        self.skills.iter().any(|s| s == skill)
    }
}

/// A requirement document resolved for indexing
///
/// Recomputed on every run from the document text; never persisted on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementDocument {
    /// Path as written in the mapping
    pub path: String,
    /// First top-level heading, or the file name
    pub title: String,
    /// First body line, sanitized for a single table cell
    pub summary: String,
}
