//! Description block model
//!
//! The description block holds free text plus two list regions, each opened by
//! a marker glyph: reference names (e.g. `📖 Reference books:`) and a resource
//! map of `` - `path`: one-line description `` bullets. A dash-prefixed line
//! belongs to whichever region was opened last; an empty line or the usage
//! line closes both.

use regex::Regex;
use skillsync_types::Markers;
use std::collections::BTreeMap;
use std::sync::LazyLock;

#[allow(clippy::expect_used)]
static MAP_BULLET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-\s+`([^`]+)`\s*:\s*(.+)$").expect("resource map bullet regex is valid")
});

/// Region a description-block line belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    /// Outside any list region
    None,
    /// Reference-names region
    ReferenceNames,
    /// Resource-map region
    ResourceMap,
}

/// What a single description-block line is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockLine<'a> {
    /// The usage statement
    Usage,
    /// Marker opening the reference-names region
    OpenReferenceNames,
    /// Marker opening the resource-map region
    OpenResourceMap,
    /// `- ` item, with the prefix removed
    Bullet(&'a str),
    /// Whitespace only
    Blank,
    /// Anything else
    Other,
}

impl<'a> BlockLine<'a> {
    /// Classify a raw block line
    pub fn classify(line: &'a str, markers: &Markers) -> Self {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            BlockLine::Blank
        } else if markers.is_usage_line(trimmed) {
            BlockLine::Usage
        } else if markers.opens_reference_names(trimmed) {
            BlockLine::OpenReferenceNames
        } else if markers.opens_resource_map(trimmed) {
            BlockLine::OpenResourceMap
        } else if let Some(item) = trimmed.strip_prefix("- ") {
            BlockLine::Bullet(item.trim())
        } else {
            BlockLine::Other
        }
    }
}

/// Walk block lines, yielding each line's index, the region it belongs to and its kind
pub fn walk_regions<'a, S: AsRef<str> + 'a>(
    block: &'a [S],
    markers: &'a Markers,
) -> impl Iterator<Item = (usize, Region, BlockLine<'a>)> + 'a {
    block
        .iter()
        .enumerate()
        .scan(Region::None, move |region, (index, line)| {
            let kind = BlockLine::classify(line.as_ref(), markers);
            *region = match kind {
                BlockLine::Usage | BlockLine::Blank => Region::None,
                BlockLine::OpenReferenceNames => Region::ReferenceNames,
                BlockLine::OpenResourceMap => Region::ResourceMap,
                BlockLine::Bullet(_) | BlockLine::Other => *region,
            };
            Some((index, *region, kind))
        })
}

/// Parsed description block
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DescriptionModel {
    /// Usage statement, trimmed
    pub usage_line: Option<String>,
    /// Items of the reference-names region, in order
    pub reference_names: Vec<String>,
    /// Resource path to one-line description
    pub resource_map: BTreeMap<String, String>,
}

impl DescriptionModel {
    /// Parse the value lines of the description block
    pub fn parse<S: AsRef<str>>(block: &[S], markers: &Markers) -> Self {
        let mut model = Self::default();

        for (index, region, kind) in walk_regions(block, markers) {
            match (kind, region) {
                (BlockLine::Usage, _) => {
                    if model.usage_line.is_none() {
                        model.usage_line = Some(block[index].as_ref().trim().to_string());
                    }
                }
                (BlockLine::Bullet(item), Region::ReferenceNames) => {
                    model.reference_names.push(item.to_string());
                }
                (BlockLine::Bullet(_), Region::ResourceMap) => {
                    if let Some(captures) = MAP_BULLET.captures(block[index].as_ref().trim()) {
                        model
                            .resource_map
                            .insert(captures[1].to_string(), captures[2].trim().to_string());
                    }
                }
                _ => {}
            }
        }

        model
    }

    /// Authored one-line description of an attachment path such as `scripts/x.mjs`
    pub fn describe(&self, path: &str) -> Option<&str> {
        self.resource_map.get(path).map(String::as_str)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    const BLOCK: &[&str] = &[
        "  Designs OAuth2 authorization flows.",
        "",
        "  📖 Reference books:",
        "  - OAuth 2 in Action",
        "  - API Security in Action",
        "",
        "  📚 Resource references:",
        "  - `resources/pkce.md`: PKCE walkthrough",
        "  - `scripts/validate-token.mjs`: token validator",
        "  - not a map bullet",
        "",
        "  Use proactively when designing login flows.",
    ];

    #[test]
    fn test_parse_regions() {
        let model = DescriptionModel::parse(BLOCK, &Markers::default());

        assert_eq!(
            model.usage_line.as_deref(),
            Some("Use proactively when designing login flows.")
        );
        assert_eq!(
            model.reference_names,
            vec!["OAuth 2 in Action", "API Security in Action"]
        );
        assert_eq!(model.describe("resources/pkce.md"), Some("PKCE walkthrough"));
        assert_eq!(
            model.describe("scripts/validate-token.mjs"),
            Some("token validator")
        );
        assert_eq!(model.resource_map.len(), 2);
    }

    #[test]
    fn test_dash_line_follows_most_recent_region() {
        let block = [
            "  📚 Resources:",
            "  - `resources/a.md`: A",
            "  📖 Books:",
            "  - `resources/b.md`: looks like a map entry",
        ];
        let model = DescriptionModel::parse(&block, &Markers::default());
        assert_eq!(model.resource_map.len(), 1);
        assert_eq!(model.reference_names, vec!["`resources/b.md`: looks like a map entry"]);
    }

    #[test]
    fn test_empty_line_closes_regions() {
        let block = ["  📖 Books:", "  - Kept", "", "  - Orphan"];
        let model = DescriptionModel::parse(&block, &Markers::default());
        assert_eq!(model.reference_names, vec!["Kept"]);
    }

    #[test]
    fn test_empty_block() {
        let block: [&str; 0] = [];
        assert_eq!(
            DescriptionModel::parse(&block, &Markers::default()),
            DescriptionModel::default()
        );
    }
}
