//! File layout of a skill package

/// Canonical description file inside every skill directory
pub const SKILL_FILE: &str = "SKILL.md";

/// Directory holding reference documents and generated artifacts
pub const RESOURCES_DIR: &str = "resources";

/// Directory holding helper scripts
pub const SCRIPTS_DIR: &str = "scripts";

/// Directory holding output templates
pub const TEMPLATES_DIR: &str = "templates";

/// Per-skill requirements index, written into `resources/`
pub const REQUIREMENTS_INDEX_FILE: &str = "requirements-index.md";

/// Feedback artifacts surfaced by the expert level
pub const EVALS_FILE: &str = "EVALS.json";
pub const CHANGELOG_FILE: &str = "CHANGELOG.md";
pub const LOGS_FILE: &str = "LOGS.md";

/// Path of the requirements index relative to the skill directory
pub fn requirements_index_path() -> String {
    format!("{RESOURCES_DIR}/{REQUIREMENTS_INDEX_FILE}")
}
