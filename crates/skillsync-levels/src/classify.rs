//! Lexical classification and filtering
//!
//! Nothing here looks at script contents: scripts are classified by the verb
//! their name starts with, resources by their headings.

use skillsync_types::Vocabulary;
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::io;
use std::path::Path;
use tracing::warn;

/// Most topics taken from one resource file
pub const MAX_TOPICS: usize = 3;

/// Most topic keywords collected across a skill's resources
pub const MAX_KEYWORDS: usize = 6;

/// Scripts split by what their leading verb says they do
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptClasses {
    /// Scripts that inspect state
    pub read: Vec<String>,
    /// Scripts that modify state
    pub write: Vec<String>,
    /// Scripts with an unrecognised verb
    pub other: Vec<String>,
}

/// Leading verb of a script name: the stem up to the first `-` or `_`
pub fn script_verb(name: &str) -> &str {
    let stem = Path::new(name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(name);
    stem.split(['-', '_']).next().unwrap_or(stem)
}

/// Split script names into read / write / other, keeping their order
pub fn classify_scripts(names: &[String], vocabulary: &Vocabulary) -> ScriptClasses {
    let mut classes = ScriptClasses::default();
    for name in names {
        let verb = script_verb(name);
        if vocabulary.read_verbs.iter().any(|v| v == verb) {
            classes.read.push(name.clone());
        } else if vocabulary.write_verbs.iter().any(|v| v == verb) {
            classes.write.push(name.clone());
        } else {
            classes.other.push(name.clone());
        }
    }
    classes
}

/// Drop items that quote generated artifacts or the description file
pub fn filter_generic(items: &[String], vocabulary: &Vocabulary) -> Vec<String> {
    items
        .iter()
        .filter(|item| !vocabulary.is_self_reference(item))
        .cloned()
        .collect()
}

/// Topic labels from a resource's headings, in document order
///
/// `##`/`###` headings qualify unless generic; a `#` heading only counts while
/// nothing else has been found. Scanning stops at [`MAX_TOPICS`].
pub fn topics_from_text(text: &str, vocabulary: &Vocabulary) -> Vec<String> {
    let mut topics = Vec::new();

    for line in text.lines() {
        let stripped = line.trim();
        let candidate = if let Some(rest) = stripped.strip_prefix("## ") {
            Some(rest)
        } else if let Some(rest) = stripped.strip_prefix("### ") {
            Some(rest)
        } else if topics.is_empty() {
            stripped.strip_prefix("# ")
        } else {
            None
        };

        if let Some(candidate) = candidate.map(str::trim) {
            if !candidate.is_empty() && !vocabulary.is_generic_topic(candidate) {
                topics.push(candidate.to_string());
            }
        }

        if topics.len() >= MAX_TOPICS {
            break;
        }
    }

    topics
}

/// Read a resource and derive its topics
pub fn try_extract_topics(path: &Path, vocabulary: &Vocabulary) -> io::Result<Vec<String>> {
    let text = fs::read_to_string(path)?;
    Ok(topics_from_text(&text, vocabulary))
}

/// Topics of a resource file; a read failure yields no topics
pub fn extract_topics(path: &Path, vocabulary: &Vocabulary) -> Vec<String> {
    try_extract_topics(path, vocabulary).unwrap_or_else(|e| {
        warn!("Could not read resource {:?}: {}", path, e);
        Vec::new()
    })
}

/// `api-design-guide` → `api design guide`
pub fn humanize(name: &str) -> String {
    name.replace('-', " ")
}

/// Skill-wide topic keywords
///
/// Walks resources in listing order. Each contributes its topics, or its
/// humanized file stem when it has none; duplicates and generic labels are
/// skipped. Stops as soon as [`MAX_KEYWORDS`] are collected.
pub fn collect_topic_keywords(
    resources: &[String],
    topics: &BTreeMap<String, Vec<String>>,
    vocabulary: &Vocabulary,
) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut keywords = Vec::new();

    for resource in resources {
        let candidates = match topics.get(resource).filter(|t| !t.is_empty()) {
            Some(found) => found.clone(),
            None => {
                let stem = Path::new(resource)
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or(resource);
                vec![humanize(stem)]
            }
        };

        for candidate in candidates {
            if candidate.is_empty() || vocabulary.is_generic_topic(&candidate) {
                continue;
            }
            if seen.insert(candidate.clone()) {
                keywords.push(candidate);
                if keywords.len() >= MAX_KEYWORDS {
                    return keywords;
                }
            }
        }
    }

    keywords
}
