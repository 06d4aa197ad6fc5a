//! Requirement document title and summary extraction

use skillsync_types::RequirementDocument;
use std::fs;
use std::path::Path;

use crate::error::{Result, SyncError};

/// Longest summary kept, in characters, ellipsis included
pub const SUMMARY_MAX_CHARS: usize = 120;

const ELLIPSIS: &str = "...";

/// Table cell separator and its visually equivalent replacement
const TABLE_SEPARATOR: char = '|';
const SAFE_SEPARATOR: char = '／';

const DEFAULT_SUMMARY: &str = "See the document body for requirement details";

/// Derive `(title, summary)` from document text
///
/// The title is the first `# ` heading, falling back to `file_name`. The
/// summary is the first non-empty line that is neither a heading nor a
/// horizontal rule, with a leading quote marker removed. The whole text is
/// scanned; a `---` block at the top is content like any other.
pub fn title_and_summary(file_name: &str, text: &str) -> (String, String) {
    let mut title: Option<String> = None;
    let mut summary: Option<String> = None;

    for line in text.lines() {
        let stripped = line.trim();
        if let Some(heading) = stripped.strip_prefix("# ") {
            if title.is_none() {
                title = Some(heading.trim().to_string());
            }
        } else if summary.is_none()
            && !stripped.is_empty()
            && !stripped.starts_with('#')
            && !is_horizontal_rule(stripped)
        {
            let unquoted = stripped.trim_start_matches(['>', '＞']).trim();
            if !unquoted.is_empty() {
                summary = Some(unquoted.to_string());
            }
        }

        if title.is_some() && summary.is_some() {
            break;
        }
    }

    let title = title
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| file_name.to_string());
    let summary = sanitize_summary(summary.as_deref().unwrap_or(DEFAULT_SUMMARY));
    (title, summary)
}

/// `---`, `***` or `___` style separator line
fn is_horizontal_rule(line: &str) -> bool {
    let compact: String = line.chars().filter(|c| !c.is_whitespace()).collect();
    compact.len() >= 3
        && ['-', '*', '_']
            .iter()
            .any(|&rule| compact.chars().all(|c| c == rule))
}

/// Make a summary safe for a single table cell and cap its length
pub fn sanitize_summary(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .map(|c| if c == TABLE_SEPARATOR { SAFE_SEPARATOR } else { c })
        .collect();

    if cleaned.chars().count() <= SUMMARY_MAX_CHARS {
        return cleaned;
    }

    let keep = SUMMARY_MAX_CHARS - ELLIPSIS.chars().count();
    let mut truncated: String = cleaned.chars().take(keep).collect();
    truncated.push_str(ELLIPSIS);
    truncated
}

/// Read a mapped document relative to the project root
pub fn read_requirement(root: &Path, file: &str) -> Result<RequirementDocument> {
    let path = root.join(file);
    let text = fs::read_to_string(&path).map_err(|source| SyncError::Read {
        path: path.clone(),
        source,
    })?;

    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(file);
    let (title, summary) = title_and_summary(file_name, &text);

    Ok(RequirementDocument {
        path: file.to_string(),
        title,
        summary,
    })
}
