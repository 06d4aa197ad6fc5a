//! Attachment listings
//!
//! Every listing is sorted by name with legacy items last, independent of the
//! order the filesystem returns entries in.

use anyhow::{Context, Result};
use skillsync_types::{Level, Vocabulary};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::skill::SkillPackage;

/// Resource documents carry this extension
const RESOURCE_EXTENSION: &str = "md";

/// Names of the regular files in `dir`, optionally restricted to one extension
///
/// A missing directory yields an empty listing.
pub fn list_files(dir: &Path, extension: Option<&str>) -> Result<Vec<String>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e).with_context(|| format!("Failed to read directory {:?}", dir)),
    };

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to read entry in {:?}", dir))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if let Some(ext) = extension {
            if path.extension().and_then(|e| e.to_str()) != Some(ext) {
                continue;
            }
        }
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            names.push(name.to_string());
        }
    }

    Ok(names)
}

/// Sort names lexicographically with legacy items last
pub fn prioritize(mut names: Vec<String>, vocabulary: &Vocabulary) -> Vec<String> {
    names.sort_by(|a, b| vocabulary.listing_key(a).cmp(&vocabulary.listing_key(b)));
    names
}

/// The attachment files of a skill, each listing in deterministic order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attachments {
    /// `resources/*.md`, excluding the generated level files
    pub resources: Vec<String>,
    /// `scripts/*.<script extension>`
    pub scripts: Vec<String>,
    /// Every file in `templates/`
    pub templates: Vec<String>,
}

impl Attachments {
    /// Enumerate the attachments of a skill package
    pub fn collect(package: &SkillPackage, vocabulary: &Vocabulary) -> Result<Self> {
        let resources = list_files(&package.resources_dir(), Some(RESOURCE_EXTENSION))?
            .into_iter()
            .filter(|name| !Level::is_generated_file(name))
            .collect();
        let scripts = list_files(
            &package.scripts_dir(),
            Some(vocabulary.script_extension.as_str()),
        )?;
        let templates = list_files(&package.templates_dir(), None)?;

        Ok(Self {
            resources: prioritize(resources, vocabulary),
            scripts: prioritize(scripts, vocabulary),
            templates: prioritize(templates, vocabulary),
        })
    }

    /// Whether the skill has no attachments at all
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty() && self.scripts.is_empty() && self.templates.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "x").unwrap();
    }

    #[test]
    fn test_collect_filters_and_orders() {
        let dir = tempfile::tempdir().unwrap();
        let skill = dir.path().join("alpha");
        for file in [
            "resources/zeta.md",
            "resources/alpha-legacy.md",
            "resources/beta.md",
            "resources/Level1_basics.md",
            "resources/notes.txt",
            "scripts/validate-x.mjs",
            "scripts/README.md",
            "templates/report.md",
            "templates/form.json",
        ] {
            touch(&skill.join(file));
        }
        fs::create_dir_all(skill.join("resources/nested")).unwrap();

        let package = SkillPackage::from_dir(&skill).unwrap();
        let attachments = Attachments::collect(&package, &Vocabulary::default()).unwrap();

        assert_eq!(
            attachments.resources,
            vec!["beta.md", "zeta.md", "alpha-legacy.md"]
        );
        assert_eq!(attachments.scripts, vec!["validate-x.mjs"]);
        assert_eq!(attachments.templates, vec!["form.json", "report.md"]);
        assert!(!attachments.is_empty());
    }

    #[test]
    fn test_missing_directories_are_empty() {
        let dir = tempfile::tempdir().unwrap();
        let package = SkillPackage::from_dir(dir.path()).unwrap();
        let attachments = Attachments::collect(&package, &Vocabulary::default()).unwrap();
        assert!(attachments.is_empty());
    }
}
