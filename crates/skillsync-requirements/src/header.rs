//! SKILL.md header reference to the requirements index
//!
//! The header is handled as the original line sequence. An update is one
//! splice into the description block; every other byte, line endings
//! included, is copied through unchanged.

use skillsync_skills::description::{walk_regions, BlockLine, Region};
use skillsync_skills::frontmatter::scan_header;
use skillsync_skills::SkillPackage;
use skillsync_types::layout::requirements_index_path;
use skillsync_types::Markers;
use std::fs;
use tracing::debug;

use crate::error::{Result, SyncError};

const DESCRIPTION_FIELD: &str = "description";

/// Indentation used when the block gives no example to follow
const DEFAULT_INDENT: &str = "  ";

/// What to insert and how to recognise the description regions
#[derive(Debug, Clone, Copy)]
pub struct IndexReference<'a> {
    /// Requirement source directory, named in the bullet text
    pub source_dir: &'a str,
    /// Description block markers
    pub markers: &'a Markers,
}

impl IndexReference<'_> {
    /// String whose presence in the SKILL.md header means nothing needs doing
    pub fn marker(&self) -> String {
        format!("`{}`", requirements_index_path())
    }

    /// Bullet line, without indentation
    pub fn bullet(&self) -> String {
        format!(
            "- {}: Requirements index (synced with {})",
            self.marker(),
            self.source_dir
        )
    }
}

/// Compute SKILL.md text with the index reference added
///
/// Returns `None` when the header already carries the reference, or when
/// there is no header or no description block to put it in. Mentions in the
/// body do not count.
pub fn insert_index_reference(text: &str, reference: &IndexReference<'_>) -> Option<String> {
    let segments: Vec<&str> = text.split_inclusive('\n').collect();
    let lines: Vec<&str> = segments
        .iter()
        .map(|segment| segment.trim_end_matches(['\n', '\r']))
        .collect();
    let newline = if text.contains("\r\n") { "\r\n" } else { "\n" };

    let header = scan_header(&lines)?;
    let marker = reference.marker();
    if lines[..=header.close].iter().any(|line| line.contains(&marker)) {
        return None;
    }

    let block = header.block(DESCRIPTION_FIELD)?;
    let (offset, inserted) = plan_insertion(&lines[block.body.clone()], reference);
    let at = block.body.start + offset;

    let mut updated = String::with_capacity(text.len() + 160);
    for segment in &segments[..at] {
        updated.push_str(segment);
    }
    for line in inserted {
        updated.push_str(&line);
        updated.push_str(newline);
    }
    for segment in &segments[at..] {
        updated.push_str(segment);
    }

    Some(updated)
}

/// Block-relative insertion index and the lines to insert there
fn plan_insertion(block: &[&str], reference: &IndexReference<'_>) -> (usize, Vec<String>) {
    let markers = reference.markers;
    let bullet = reference.bullet();

    // Existing resource-map region: append after its last bullet
    let mut region_start: Option<usize> = None;
    let mut last_bullet: Option<usize> = None;
    for (index, region, kind) in walk_regions(block, markers) {
        match region_start {
            None => {
                if kind == BlockLine::OpenResourceMap {
                    region_start = Some(index);
                }
            }
            Some(_) => {
                if region != Region::ResourceMap {
                    break;
                }
                if matches!(kind, BlockLine::Bullet(_)) {
                    last_bullet = Some(index);
                }
            }
        }
    }

    if let Some(start) = region_start {
        let anchor = last_bullet.unwrap_or(start);
        let indent = indentation(block[anchor]);
        return (anchor + 1, vec![format!("{indent}{bullet}")]);
    }

    let heading = &markers.resource_map_heading;

    // New region right before the usage line
    let usage = walk_regions(block, markers)
        .find(|(_, _, kind)| *kind == BlockLine::Usage)
        .map(|(index, _, _)| index);
    if let Some(usage) = usage {
        let indent = indentation(block[usage]);
        return (
            usage,
            vec![
                format!("{indent}{heading}"),
                format!("{indent}{bullet}"),
                String::new(),
            ],
        );
    }

    // New region at the end of the block's text
    let indent = block
        .iter()
        .find(|line| !line.trim().is_empty())
        .map_or(DEFAULT_INDENT, |line| indentation(line));
    match block.iter().rposition(|line| !line.trim().is_empty()) {
        Some(last) => (
            last + 1,
            vec![
                String::new(),
                format!("{indent}{heading}"),
                format!("{indent}{bullet}"),
            ],
        ),
        None => (
            0,
            vec![format!("{indent}{heading}"), format!("{indent}{bullet}")],
        ),
    }
}

fn indentation(line: &str) -> &str {
    &line[..line.len() - line.trim_start().len()]
}

/// Add the index reference to a skill's SKILL.md if it is missing
///
/// Returns `true` when the file was rewritten.
pub fn ensure_header_reference(skill: &SkillPackage, reference: &IndexReference<'_>) -> Result<bool> {
    let path = skill.description_file();
    let text = fs::read_to_string(&path).map_err(|source| SyncError::Read {
        path: path.clone(),
        source,
    })?;

    match insert_index_reference(&text, reference) {
        Some(updated) => {
            fs::write(&path, updated).map_err(|source| SyncError::Write {
                path: path.clone(),
                source,
            })?;
            debug!("Added requirements index reference to {:?}", path);
            Ok(true)
        }
        None => Ok(false),
    }
}

/// Whether [`ensure_header_reference`] would rewrite the skill's SKILL.md
pub fn header_reference_pending(skill: &SkillPackage, reference: &IndexReference<'_>) -> Result<bool> {
    let path = skill.description_file();
    let text = fs::read_to_string(&path).map_err(|source| SyncError::Read {
        path: path.clone(),
        source,
    })?;
    Ok(insert_index_reference(&text, reference).is_some())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    const BULLET: &str =
        "- `resources/requirements-index.md`: Requirements index (synced with docs/00-requirements)";

    fn reference(markers: &Markers) -> IndexReference<'_> {
        IndexReference {
            source_dir: "docs/00-requirements",
            markers,
        }
    }

    #[test]
    fn test_appends_to_existing_region() {
        let markers = Markers::default();
        let text = "---\nname: alpha\ndescription: |\n  Alpha skill.\n\n  📚 Resource references:\n    - `resources/a.md`: A guide\n\n  Use proactively when alpha.\nallowed-tools: Read\n---\n# Alpha\n";

        let updated = insert_index_reference(text, &reference(&markers)).unwrap();
        let expected = format!(
            "---\nname: alpha\ndescription: |\n  Alpha skill.\n\n  📚 Resource references:\n    - `resources/a.md`: A guide\n    {BULLET}\n\n  Use proactively when alpha.\nallowed-tools: Read\n---\n# Alpha\n"
        );
        assert_eq!(updated, expected);
    }

    #[test]
    fn test_new_region_before_usage_line() {
        let markers = Markers::default();
        let text = "---\ndescription: |\n  Alpha skill.\n\n  Use proactively when alpha.\n---\nbody";

        let updated = insert_index_reference(text, &reference(&markers)).unwrap();
        let expected = format!(
            "---\ndescription: |\n  Alpha skill.\n\n  📚 Resource references:\n  {BULLET}\n\n  Use proactively when alpha.\n---\nbody"
        );
        assert_eq!(updated, expected);
    }

    #[test]
    fn test_new_region_at_block_end() {
        let markers = Markers::default();
        let text = "---\ndescription: |\n  Alpha skill.\n\nversion: 1\n---\n";

        let updated = insert_index_reference(text, &reference(&markers)).unwrap();
        let expected = format!(
            "---\ndescription: |\n  Alpha skill.\n\n  📚 Resource references:\n  {BULLET}\n\nversion: 1\n---\n"
        );
        assert_eq!(updated, expected);
    }

    #[test]
    fn test_second_insertion_is_noop() {
        let markers = Markers::default();
        let text = "---\ndescription: |\n  Alpha skill.\n---\n";

        let once = insert_index_reference(text, &reference(&markers)).unwrap();
        assert_eq!(once.matches("requirements-index.md").count(), 1);
        assert!(insert_index_reference(&once, &reference(&markers)).is_none());
    }

    #[test]
    fn test_crlf_line_endings_preserved() {
        let markers = Markers::default();
        let text = "---\r\ndescription: |\r\n  Alpha skill.\r\n---\r\nbody\r\n";

        let updated = insert_index_reference(text, &reference(&markers)).unwrap();
        assert!(!updated.replace("\r\n", "").contains('\n'));
        assert!(updated.ends_with("---\r\nbody\r\n"));
    }

    #[test]
    fn test_body_mention_does_not_count_as_reference() {
        let markers = Markers::default();
        let text = "---\ndescription: |\n  Alpha.\n---\nSee `resources/requirements-index.md` later.\n";

        let updated = insert_index_reference(text, &reference(&markers)).unwrap();
        let expected = format!(
            "---\ndescription: |\n  Alpha.\n\n  📚 Resource references:\n  {BULLET}\n---\nSee `resources/requirements-index.md` later.\n"
        );
        assert_eq!(updated, expected);
        assert!(insert_index_reference(&updated, &reference(&markers)).is_none());
    }

    #[test]
    fn test_no_header_or_block() {
        let markers = Markers::default();
        assert!(insert_index_reference("# No header\n", &reference(&markers)).is_none());
        assert!(
            insert_index_reference("---\nname: x\n---\n", &reference(&markers)).is_none()
        );
    }

    #[test]
    fn test_ensure_header_reference_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let skill_dir = dir.path().join("alpha");
        fs::create_dir(&skill_dir).unwrap();
        fs::write(
            skill_dir.join("SKILL.md"),
            "---\nname: alpha\ndescription: |\n  Alpha skill.\n---\n# Alpha\n",
        )
        .unwrap();

        let skill = SkillPackage::from_dir(&skill_dir).unwrap();
        let markers = Markers::default();
        let reference = reference(&markers);

        assert!(header_reference_pending(&skill, &reference).unwrap());
        assert!(ensure_header_reference(&skill, &reference).unwrap());
        let first = fs::read_to_string(skill_dir.join("SKILL.md")).unwrap();

        assert!(!header_reference_pending(&skill, &reference).unwrap());
        assert!(!ensure_header_reference(&skill, &reference).unwrap());
        let second = fs::read_to_string(skill_dir.join("SKILL.md")).unwrap();
        assert_eq!(first, second);
    }
}
