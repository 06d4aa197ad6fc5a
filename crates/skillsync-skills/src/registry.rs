//! Skills registry for the skills root
//!
//! Discovery only records directories; SKILL.md is read later, per skill, by
//! whichever pipeline needs it.

use anyhow::{anyhow, Context, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::skill::SkillPackage;

/// Skill directories found under one skills root, ordered by identifier
pub struct SkillsRegistry {
    /// Discovered skills keyed by identifier
    skills: BTreeMap<String, SkillPackage>,
    /// Skills root to scan
    root: PathBuf,
}

impl SkillsRegistry {
    /// Create an empty registry for a skills root
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            skills: BTreeMap::new(),
            root: root.into(),
        }
    }

    /// Skills root this registry scans
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Scan the skills root for skill directories
    ///
    /// Hidden directories are ignored. A missing or unreadable root is a
    /// structural error.
    pub fn discover(&mut self) -> Result<()> {
        if !self.root.is_dir() {
            return Err(anyhow!("Skills root is not a directory: {:?}", self.root));
        }

        let entries = std::fs::read_dir(&self.root)
            .with_context(|| format!("Failed to read directory {:?}", self.root))?;

        for entry in entries {
            let entry = entry?;
            let path = entry.path();

            if !path.is_dir() {
                continue;
            }

            let hidden = path
                .file_name()
                .and_then(|n| n.to_str())
                .map_or(true, |n| n.starts_with('.'));
            if hidden {
                debug!("Skipping {:?}", path);
                continue;
            }

            match SkillPackage::from_dir(&path) {
                Ok(skill) => {
                    debug!("Discovered skill: {} at {:?}", skill.id, path);
                    self.skills.insert(skill.id.clone(), skill);
                }
                Err(e) => {
                    warn!("Skipping {:?}: {}", path, e);
                }
            }
        }

        info!("Discovered {} skills in {:?}", self.skills.len(), self.root);
        Ok(())
    }

    /// Get a skill by identifier
    pub fn get(&self, id: &str) -> Option<&SkillPackage> {
        self.skills.get(id)
    }

    /// All skills in identifier order
    pub fn iter(&self) -> impl Iterator<Item = &SkillPackage> {
        self.skills.values()
    }

    /// Skills to process: all of them, or only `only` when given
    pub fn select<'a>(&'a self, only: Option<&'a str>) -> impl Iterator<Item = &'a SkillPackage> {
        self.iter()
            .filter(move |skill| only.map_or(true, |id| skill.id == id))
    }

    /// Get number of skills
    pub fn len(&self) -> usize {
        self.skills.len()
    }

    /// Check if registry is empty
    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_registry_new() {
        let registry = SkillsRegistry::new("skills");
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
        assert_eq!(registry.root(), Path::new("skills"));
    }

    #[test]
    fn test_discover_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["zeta", "alpha", ".hidden", "mid"] {
            fs::create_dir(dir.path().join(name)).unwrap();
        }
        fs::write(dir.path().join("README.md"), "not a skill").unwrap();

        let mut registry = SkillsRegistry::new(dir.path());
        registry.discover().unwrap();

        let ids: Vec<_> = registry.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["alpha", "mid", "zeta"]);
        assert!(registry.get("mid").is_some());

        let only: Vec<_> = registry.select(Some("zeta")).map(|s| s.id.as_str()).collect();
        assert_eq!(only, vec!["zeta"]);
        assert_eq!(registry.select(None).count(), 3);
    }

    #[test]
    fn test_discover_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let mut registry = SkillsRegistry::new(dir.path().join("nope"));
        assert!(registry.discover().is_err());
    }
}
