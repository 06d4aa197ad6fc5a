//! Body section extraction
//!
//! A section starts at a `## <title>` line and runs to the next `## ` line.
//! Sub-sections nest one level deeper with `### ` and the same rule.

use skillsync_types::Headings;

/// Text under the `## <title>` heading, trimmed
pub fn extract_section(text: &str, title: &str) -> Option<String> {
    extract_at_depth(text, 2, title)
}

/// Text under the `### <title>` heading of an already extracted section, trimmed
pub fn extract_subsection(section: &str, title: &str) -> Option<String> {
    extract_at_depth(section, 3, title)
}

fn extract_at_depth(text: &str, depth: usize, title: &str) -> Option<String> {
    let prefix = format!("{} ", "#".repeat(depth));
    let mut captured: Option<Vec<&str>> = None;

    for line in text.lines() {
        if let Some(heading) = line.strip_prefix(prefix.as_str()) {
            if captured.is_some() {
                break;
            }
            if heading.trim() == title {
                captured = Some(Vec::new());
            }
            continue;
        }
        if let Some(lines) = captured.as_mut() {
            lines.push(line);
        }
    }

    captured.map(|lines| lines.join("\n").trim().to_string())
}

/// First paragraph of a section, lines trimmed and joined by spaces
///
/// A paragraph consisting only of a quote marker counts as empty.
pub fn first_paragraph(section: &str) -> String {
    let joined = section
        .lines()
        .map(str::trim)
        .take_while(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    match joined.as_str() {
        ">" | "＞" => String::new(),
        _ => joined,
    }
}

/// Items of the `- ` bullets in a section, prefix removed
pub fn bullet_items(section: &str) -> Vec<String> {
    section
        .lines()
        .filter_map(|line| line.trim().strip_prefix("- "))
        .map(|item| item.trim().to_string())
        .collect()
}

/// Authored content of the description body
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionModel {
    /// First paragraph under the overview heading
    pub overview: Option<String>,
    /// Items under the "do" best-practice sub-heading
    pub should_do: Vec<String>,
    /// Items under the "avoid" best-practice sub-heading
    pub should_avoid: Vec<String>,
}

impl SectionModel {
    /// Extract the overview and best-practice lists from the body
    ///
    /// Lists are returned as authored; self-reference filtering is the
    /// caller's concern.
    pub fn parse(body: &str, headings: &Headings) -> Self {
        let overview = extract_section(body, &headings.overview)
            .map(|section| first_paragraph(&section))
            .filter(|paragraph| !paragraph.is_empty());

        let practices = extract_section(body, &headings.best_practices).unwrap_or_default();
        let list = |title: &str| {
            extract_subsection(&practices, title)
                .map(|section| bullet_items(&section))
                .unwrap_or_default()
        };

        Self {
            overview,
            should_do: list(&headings.should_do),
            should_avoid: list(&headings.should_avoid),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = "# API Versioning

## Overview

Keeps public APIs evolvable
without breaking clients.

Second paragraph is ignored.

## Best Practices

### Should Do

- Version in the URL path
- Deprecate with a sunset header

### Should Avoid

- Breaking changes without a new version
- Reading `resources/Level1_basics.md` first

## Workflow

- not a best practice
";

    #[test]
    fn test_extract_section_stops_at_same_level() {
        let section = extract_section(BODY, "Best Practices").unwrap_or_default();
        assert!(section.starts_with("### Should Do"));
        assert!(!section.contains("not a best practice"));
    }

    #[test]
    fn test_missing_section() {
        assert_eq!(extract_section(BODY, "Troubleshooting"), None);
        assert_eq!(extract_subsection("### Other\n- x", "Should Do"), None);
    }

    #[test]
    fn test_parse_section_model() {
        let model = SectionModel::parse(BODY, &Headings::default());
        assert_eq!(
            model.overview.as_deref(),
            Some("Keeps public APIs evolvable without breaking clients.")
        );
        assert_eq!(
            model.should_do,
            vec!["Version in the URL path", "Deprecate with a sunset header"]
        );
        assert_eq!(model.should_avoid.len(), 2);
    }

    #[test]
    fn test_quote_only_overview_is_empty() {
        let model = SectionModel::parse("## Overview\n\n>\n", &Headings::default());
        assert_eq!(model.overview, None);
    }

    #[test]
    fn test_no_sections() {
        assert_eq!(
            SectionModel::parse("plain text", &Headings::default()),
            SectionModel::default()
        );
    }
}
