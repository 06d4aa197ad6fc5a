//! Requirement mapping loader
//!
//! The mapping is `{"requirements": [{"file": ..., "skills": [...]}, ...]}`,
//! as JSON or, for `.yaml`/`.yml` files, YAML of the same shape.

use serde_json::Value;
use skillsync_types::RequirementEntry;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::error::{Result, SyncError};

/// Top-level list field of the mapping
const REQUIREMENTS_FIELD: &str = "requirements";

/// Loaded requirement mapping
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mapping {
    /// Well-formed entries in file order
    pub entries: Vec<RequirementEntry>,
    /// 1-based positions of entries lacking a string `file` or a list `skills`
    pub malformed: Vec<usize>,
}

/// Read and validate a mapping file
pub fn load_mapping(path: &Path) -> Result<Mapping> {
    let text = fs::read_to_string(path).map_err(|source| SyncError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml" | "yml")
    );
    let value: Value = if is_yaml {
        serde_yaml::from_str(&text)?
    } else {
        serde_json::from_str(&text)?
    };

    parse_mapping(value)
}

/// Validate an already decoded mapping document
///
/// Only the root shape is fatal. Entries with a non-string `file` or a
/// non-list `skills` are skipped and their positions recorded; non-string
/// items inside `skills` are dropped.
pub fn parse_mapping(value: Value) -> Result<Mapping> {
    let mut root = match value {
        Value::Object(map) => map,
        _ => {
            return Err(SyncError::MappingFormat(
                "mapping file must include requirements array".to_string(),
            ))
        }
    };

    let requirements = match root.remove(REQUIREMENTS_FIELD) {
        Some(Value::Array(items)) => items,
        Some(_) => {
            return Err(SyncError::MappingFormat(
                "requirements must be a list".to_string(),
            ))
        }
        None => {
            return Err(SyncError::MappingFormat(
                "mapping file must include requirements array".to_string(),
            ))
        }
    };

    let mut mapping = Mapping::default();
    for (index, item) in requirements.iter().enumerate() {
        let file = item.get("file").and_then(Value::as_str);
        let skills = item.get("skills").and_then(Value::as_array);

        match (file, skills) {
            (Some(file), Some(skills)) => {
                let skills = skills
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect();
                mapping.entries.push(RequirementEntry::new(file, skills));
            }
            _ => {
                debug!("Skipping malformed mapping entry {}", index + 1);
                mapping.malformed.push(index + 1);
            }
        }
    }

    Ok(mapping)
}
