//! Delimiter-bounded header scanning
//!
//! The header is the text between a leading `---` line and the next `---`
//! line. Scanning walks the lines once with three states (outside, in header,
//! in block field) and records line indices only, so callers can splice the
//! original line sequence instead of re-serializing anything.

use std::ops::Range;

/// Line that opens and closes the header
pub const DELIMITER: &str = "---";

/// A header field whose value spans the following indented lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockField {
    /// Field key
    pub key: String,
    /// Index of the `key: |` line
    pub line: usize,
    /// Indices of the value lines
    pub body: Range<usize>,
}

/// Result of scanning a document header
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HeaderLayout {
    /// Index of the closing delimiter line
    pub close: usize,
    /// Inline `key: value` fields in header order, values unquoted
    pub fields: Vec<(String, String)>,
    /// Block-literal fields in header order
    pub blocks: Vec<BlockField>,
}

impl HeaderLayout {
    /// Value of an inline field
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Block-literal field by key
    pub fn block(&self, key: &str) -> Option<&BlockField> {
        self.blocks.iter().find(|b| b.key == key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Outside,
    InHeader,
    InBlock,
}

/// Scan the header of a document given as lines without terminators
///
/// Returns `None` when the first line is not a delimiter or the header is
/// never closed; callers treat that as an empty header.
pub fn scan_header<S: AsRef<str>>(lines: &[S]) -> Option<HeaderLayout> {
    let mut layout = HeaderLayout::default();
    let mut state = ScanState::Outside;
    let mut index = 0;

    while index < lines.len() {
        let line = lines[index].as_ref();
        match state {
            ScanState::Outside => {
                if !is_delimiter(line) {
                    return None;
                }
                state = ScanState::InHeader;
            }
            ScanState::InHeader => {
                if is_delimiter(line) {
                    layout.close = index;
                    return Some(layout);
                }
                if let Some((key, value)) = parse_field(line) {
                    if is_block_marker(value) {
                        layout.blocks.push(BlockField {
                            key: key.to_string(),
                            line: index,
                            body: index + 1..index + 1,
                        });
                        state = ScanState::InBlock;
                    } else {
                        layout.fields.push((key.to_string(), unquote(value).to_string()));
                    }
                }
            }
            ScanState::InBlock => {
                if is_delimiter(line) || ends_block(line) {
                    if let Some(block) = layout.blocks.last_mut() {
                        block.body.end = index;
                    }
                    // Re-examine this line as a header line
                    state = ScanState::InHeader;
                    continue;
                }
            }
        }
        index += 1;
    }

    None
}

/// A document split into lines with its header layout
#[derive(Debug, Clone)]
pub struct ParsedDocument<'a> {
    /// All document lines without terminators
    pub lines: Vec<&'a str>,
    /// Header layout, `None` when the document has no closed header
    pub header: Option<HeaderLayout>,
}

impl<'a> ParsedDocument<'a> {
    /// Split and scan a document
    pub fn parse(text: &'a str) -> Self {
        let lines: Vec<&str> = text.lines().collect();
        let header = scan_header(&lines);
        Self { lines, header }
    }

    /// Inline header field value
    pub fn field(&self, key: &str) -> Option<&str> {
        self.header.as_ref().and_then(|h| h.field(key))
    }

    /// Value lines of a block-literal header field, empty when absent
    pub fn block_lines(&self, key: &str) -> &[&'a str] {
        match self.header.as_ref().and_then(|h| h.block(key)) {
            Some(block) => &self.lines[block.body.clone()],
            None => &[],
        }
    }

    /// Body text after the header, or the whole document when there is none
    pub fn body(&self) -> String {
        let start = self.header.as_ref().map_or(0, |h| h.close + 1);
        self.lines[start..].join("\n")
    }
}

fn is_delimiter(line: &str) -> bool {
    line.trim_end() == DELIMITER
}

fn ends_block(line: &str) -> bool {
    !line.trim().is_empty() && !line.starts_with(char::is_whitespace)
}

/// Split an unindented `key: value` line
fn parse_field(line: &str) -> Option<(&str, &str)> {
    if line.starts_with(char::is_whitespace) {
        return None;
    }
    let (key, value) = line.split_once(':')?;
    let mut chars = key.chars();
    let first = chars.next()?;
    if !(first.is_ascii_alphabetic() || first == '_') {
        return None;
    }
    if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-') {
        return None;
    }
    Some((key, value.trim()))
}

/// `|`, `>`, and their chomping/indentation variants such as `|-` or `>2`
fn is_block_marker(value: &str) -> bool {
    let mut chars = value.chars();
    matches!(chars.next(), Some('|' | '>'))
        && chars.all(|c| c == '+' || c == '-' || c.is_ascii_digit())
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    const SKILL: &str = "---\nname: \"oauth2-flows\"\ndescription: |\n  Implements OAuth2 flows.\n\n  📚 Resource references:\n  - `resources/pkce.md`: PKCE notes\nversion: 1\n---\n\n# OAuth2 Flows\n\n## Overview\n\nBody text.\n";

    #[test]
    fn test_scan_header_fields_and_block() {
        let doc = ParsedDocument::parse(SKILL);
        let header = doc.header.as_ref().expect("header");

        assert_eq!(header.close, 8);
        assert_eq!(doc.field("name"), Some("oauth2-flows"));
        assert_eq!(doc.field("version"), Some("1"));

        let block = header.block("description").expect("description block");
        assert_eq!(block.line, 2);
        assert_eq!(block.body, 3..7);
        assert_eq!(doc.block_lines("description")[0], "  Implements OAuth2 flows.");
    }

    #[test]
    fn test_block_closed_by_delimiter() {
        let lines = ["---", "description: >-", "  folded", "---", "body"];
        let header = scan_header(&lines).unwrap();
        assert_eq!(header.block("description").unwrap().body, 2..3);
        assert_eq!(header.close, 3);
    }

    #[test]
    fn test_missing_delimiter_means_no_header() {
        let doc = ParsedDocument::parse("# Title\n\nname: not a field\n");
        assert!(doc.header.is_none());
        assert_eq!(doc.field("name"), None);
        assert!(doc.block_lines("description").is_empty());
        assert!(doc.body().starts_with("# Title"));
    }

    #[test]
    fn test_unclosed_header_is_empty() {
        assert!(scan_header(&["---", "name: x", "body"]).is_none());
    }

    #[test]
    fn test_body_after_header() {
        let doc = ParsedDocument::parse(SKILL);
        assert!(doc.body().starts_with("\n# OAuth2 Flows"));
        assert!(!doc.body().contains("name:"));
    }

    #[test]
    fn test_parse_field_rejects_indented_and_odd_keys() {
        assert_eq!(parse_field("name: x"), Some(("name", "x")));
        assert_eq!(parse_field("allowed-tools: Read"), Some(("allowed-tools", "Read")));
        assert_eq!(parse_field("  name: x"), None);
        assert_eq!(parse_field("- item: x"), None);
        assert_eq!(parse_field("no colon"), None);
    }
}
