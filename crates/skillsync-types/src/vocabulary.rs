//! Vocabulary tables for classification and filtering
//!
//! Every table is plain data so callers (and tests) can substitute their own.
//! The defaults match the layout of the skill packages the pipelines maintain.

use serde::Deserialize;

const DEFAULT_READ_VERBS: &[&str] = &[
    "check",
    "validate",
    "analyze",
    "scan",
    "audit",
    "review",
    "inspect",
    "list",
    "report",
    "summarize",
    "collect",
    "verify",
    "diagnose",
    "test",
];

const DEFAULT_WRITE_VERBS: &[&str] = &[
    "apply", "update", "fix", "sync", "generate", "build", "create", "write", "import", "export",
    "migrate", "rotate", "backup", "restore",
];

const DEFAULT_SELF_REFERENCES: &[&str] = &[
    "resources/Level1",
    "resources/Level2",
    "resources/Level3",
    "resources/Level4",
    "SKILL.md",
    "resources/requirements-index.md",
];

const DEFAULT_GENERIC_TOPICS: &[&str] = &[
    "Overview",
    "Prerequisites",
    "Detailed Guide",
    "Procedure",
    "Checklist",
    "Command Reference",
    "Directory",
    "Changelog",
    "Best Practices",
    "Workflow",
    "Phase",
    "Skill",
    "Resource References",
    "Template References",
    "Reference Books",
    "Requirements Index",
    "Documents",
    "Update Rules",
];

const DEFAULT_ADVANCED_PATTERNS: &[&str] = &["pattern", "reference", "troubleshooting"];

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

/// Lookup tables shared by both pipelines
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Vocabulary {
    /// Leading verbs of scripts that only inspect state
    pub read_verbs: Vec<String>,
    /// Leading verbs of scripts that modify state
    pub write_verbs: Vec<String>,
    /// Heading fragments that never become resource topics (case-insensitive)
    pub generic_topics: Vec<String>,
    /// Substrings marking text that points at generated artifacts (case-sensitive)
    pub self_references: Vec<String>,
    /// Resource name fragments surfaced by the advanced level
    pub advanced_patterns: Vec<String>,
    /// Name fragment that sorts an attachment after the others
    pub legacy_marker: String,
    /// Extension of files listed from `scripts/`, without the dot
    pub script_extension: String,
    /// Glyphs and prefixes inside the description block
    pub markers: Markers,
    /// Fixed body headings
    pub headings: Headings,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            read_verbs: owned(DEFAULT_READ_VERBS),
            write_verbs: owned(DEFAULT_WRITE_VERBS),
            generic_topics: owned(DEFAULT_GENERIC_TOPICS),
            self_references: owned(DEFAULT_SELF_REFERENCES),
            advanced_patterns: owned(DEFAULT_ADVANCED_PATTERNS),
            legacy_marker: "legacy".to_string(),
            script_extension: "mjs".to_string(),
            markers: Markers::default(),
            headings: Headings::default(),
        }
    }
}

impl Vocabulary {
    /// Whether a heading is scaffolding rather than a subject topic
    pub fn is_generic_topic(&self, topic: &str) -> bool {
        let topic = topic.to_lowercase();
        self.generic_topics
            .iter()
            .any(|keyword| topic.contains(&keyword.to_lowercase()))
    }

    /// Whether text quotes one of the generated artifacts or the description file
    pub fn is_self_reference(&self, text: &str) -> bool {
        self.self_references
            .iter()
            .any(|pattern| text.contains(pattern.as_str()))
    }

    pub fn is_legacy(&self, name: &str) -> bool {
        !self.legacy_marker.is_empty() && name.contains(self.legacy_marker.as_str())
    }

    pub fn is_advanced_resource(&self, name: &str) -> bool {
        self.advanced_patterns
            .iter()
            .any(|pattern| name.contains(pattern.as_str()))
    }

    /// Sort key for attachment listings: non-legacy first, then by name
    pub fn listing_key<'a>(&self, name: &'a str) -> (bool, &'a str) {
        (self.is_legacy(name), name)
    }
}

/// Markers recognised inside the header's description block
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Markers {
    /// Prefix of the one-line usage statement
    pub usage_prefix: String,
    /// Glyphs opening the reference-names region
    pub reference_name_glyphs: Vec<String>,
    /// Glyphs opening the resource-map region
    pub resource_map_glyphs: Vec<String>,
    /// Marker line written when a resource-map region has to be created
    pub resource_map_heading: String,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            usage_prefix: "Use proactively".to_string(),
            reference_name_glyphs: owned(&["📖"]),
            resource_map_glyphs: owned(&["📚", "🧰", "🗂"]),
            resource_map_heading: "📚 Resource references:".to_string(),
        }
    }
}

impl Markers {
    pub fn is_usage_line(&self, trimmed: &str) -> bool {
        !self.usage_prefix.is_empty() && trimmed.starts_with(self.usage_prefix.as_str())
    }

    pub fn opens_reference_names(&self, trimmed: &str) -> bool {
        self.reference_name_glyphs
            .iter()
            .any(|glyph| trimmed.starts_with(glyph.as_str()))
    }

    pub fn opens_resource_map(&self, trimmed: &str) -> bool {
        self.resource_map_glyphs
            .iter()
            .any(|glyph| trimmed.starts_with(glyph.as_str()))
    }
}

/// Fixed headings looked up in the description body
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Headings {
    pub overview: String,
    pub best_practices: String,
    pub should_do: String,
    pub should_avoid: String,
}

impl Default for Headings {
    fn default() -> Self {
        Self {
            overview: "Overview".to_string(),
            best_practices: "Best Practices".to_string(),
            should_do: "Should Do".to_string(),
            should_avoid: "Should Avoid".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generic_topic_is_case_insensitive() {
        let vocabulary = Vocabulary::default();
        assert!(vocabulary.is_generic_topic("overview"));
        assert!(vocabulary.is_generic_topic("Release Checklist"));
        assert!(!vocabulary.is_generic_topic("Token Refresh"));
    }

    #[test]
    fn test_self_reference() {
        let vocabulary = Vocabulary::default();
        assert!(vocabulary.is_self_reference("See `resources/Level2_intermediate.md`"));
        assert!(vocabulary.is_self_reference("Keep SKILL.md short"));
        assert!(!vocabulary.is_self_reference("Validate inputs early"));
    }

    #[test]
    fn test_listing_key_puts_legacy_last() {
        let vocabulary = Vocabulary::default();
        let mut names = vec!["b.md", "a-legacy.md", "c.md", "a.md"];
        names.sort_by_key(|n| vocabulary.listing_key(n));
        assert_eq!(names, vec!["a.md", "b.md", "c.md", "a-legacy.md"]);
    }

    #[test]
    fn test_toml_partial_override() {
        let toml_str = r#"
            read_verbs = ["peek"]
            script_extension = "sh"

            [headings]
            overview = "Summary"
        "#;

        let vocabulary: Vocabulary = toml::from_str(toml_str).expect("Failed to parse TOML");
        assert_eq!(vocabulary.read_verbs, vec!["peek"]);
        assert_eq!(vocabulary.script_extension, "sh");
        assert_eq!(vocabulary.headings.overview, "Summary");
        assert_eq!(vocabulary.headings.should_do, "Should Do");
        assert!(vocabulary.write_verbs.contains(&"sync".to_string()));
    }
}
