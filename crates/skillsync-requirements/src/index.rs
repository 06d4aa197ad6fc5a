//! Requirements index rendering

use skillsync_types::RequirementDocument;

/// Render `resources/requirements-index.md` for one skill
///
/// Documents appear in the order given, which is mapping-file order.
/// `source_dir` is the directory holding the requirement documents, as shown
/// to readers.
pub fn index_for_skill(skill: &str, source_dir: &str, documents: &[RequirementDocument]) -> String {
    let mut lines: Vec<String> = vec![
        "# Requirements Index".into(),
        String::new(),
        "## Overview".into(),
        String::new(),
        format!(
            "Index of the requirement documents under {source_dir} that apply to the `{skill}` skill."
        ),
        "Read each document in full during implementation and reflect every requirement.".into(),
        String::new(),
        "## Documents".into(),
        String::new(),
    ];

    for document in documents {
        lines.push(format!("### {}", document.title));
        lines.push(format!("- Path: `{}`", document.path));
        lines.push(format!("- Purpose/Scope: {}", document.summary));
        lines.push("- Reading instruction: read the full document body".into());
        lines.push(String::new());
    }

    lines.extend([
        "## Update Rules".into(),
        String::new(),
        format!("- Update this index whenever `{source_dir}` changes"),
        "- When adding a requirement, append it to the mapping and re-sync".into(),
        "- Reflect changes in SKILL.md and Level2/Level3".into(),
    ]);

    let mut content = lines.join("\n").trim_end().to_string();
    content.push('\n');
    content
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(path: &str, title: &str, summary: &str) -> RequirementDocument {
        RequirementDocument {
            path: path.into(),
            title: title.into(),
            summary: summary.into(),
        }
    }

    #[test]
    fn test_index_contains_entry() {
        let index = index_for_skill(
            "alpha",
            "docs",
            &[doc("docs/a.md", "Auth", "Handles login.")],
        );

        assert!(index.starts_with("# Requirements Index\n"));
        assert!(index.contains("### Auth\n- Path: `docs/a.md`\n- Purpose/Scope: Handles login.\n"));
        assert!(index.contains("the `alpha` skill"));
        assert!(index.ends_with("- Reflect changes in SKILL.md and Level2/Level3\n"));
    }

    #[test]
    fn test_index_keeps_given_order() {
        let index = index_for_skill(
            "alpha",
            "docs",
            &[doc("docs/z.md", "Zulu", "z"), doc("docs/a.md", "Alpha", "a")],
        );

        let zulu = index.find("### Zulu").unwrap_or(usize::MAX);
        let alpha = index.find("### Alpha").unwrap_or(0);
        assert!(zulu < alpha);
    }

    #[test]
    fn test_index_without_documents() {
        let index = index_for_skill("alpha", "docs", &[]);
        assert!(index.contains("## Documents\n\n## Update Rules"));
    }
}
