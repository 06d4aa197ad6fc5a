//! Level document composition
//!
//! Each level is a fixed skeleton (Overview, Prerequisites, Detailed Guide,
//! Procedure, Checklist) filled from [`LevelInputs`]. Every attachment class
//! has a "has X" and a "no X" phrasing so empty skills still get complete
//! documents.

use skillsync_skills::{Attachments, DescriptionModel, SkillDescription};
use skillsync_types::layout::{
    CHANGELOG_FILE, EVALS_FILE, LOGS_FILE, RESOURCES_DIR, SCRIPTS_DIR, TEMPLATES_DIR,
};
use skillsync_types::{Level, Vocabulary};
use std::collections::BTreeMap;
use std::path::Path;

use crate::classify::{classify_scripts, collect_topic_keywords, filter_generic, humanize, ScriptClasses};

/// Script whose presence adds a usage-logging step at level 2
const USAGE_LOG_SCRIPT: &str = "log_usage.mjs";

/// Everything the four levels are composed from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LevelInputs {
    /// Authored overview, or the generated fallback sentence
    pub overview: String,
    /// Parsed description block
    pub description: DescriptionModel,
    /// Best practices to follow, self-references removed
    pub should_do: Vec<String>,
    /// Best practices to avoid, self-references removed
    pub should_avoid: Vec<String>,
    /// Attachment listings in output order
    pub attachments: Attachments,
    /// Topics per resource file name
    pub topics: BTreeMap<String, Vec<String>>,
    /// Skill-wide topic keywords
    pub keywords: Vec<String>,
    /// Scripts split by leading verb
    pub scripts: ScriptClasses,
    /// Resources whose names match an advanced pattern, in listing order
    pub advanced_resources: Vec<String>,
}

impl LevelInputs {
    /// Assemble inputs from a parsed skill, its attachments and resource topics
    pub fn new(
        id: &str,
        skill: &SkillDescription,
        attachments: Attachments,
        topics: BTreeMap<String, Vec<String>>,
        vocabulary: &Vocabulary,
    ) -> Self {
        let name = if skill.name.is_empty() { id } else { skill.name.as_str() };
        let overview = skill
            .sections
            .overview
            .clone()
            .unwrap_or_else(|| fallback_overview(name));
        let keywords = collect_topic_keywords(&attachments.resources, &topics, vocabulary);
        let scripts = classify_scripts(&attachments.scripts, vocabulary);
        let advanced_resources = attachments
            .resources
            .iter()
            .filter(|name| vocabulary.is_advanced_resource(name))
            .cloned()
            .collect();

        Self {
            overview,
            description: skill.description.clone(),
            should_do: filter_generic(&skill.sections.should_do, vocabulary),
            should_avoid: filter_generic(&skill.sections.should_avoid, vocabulary),
            attachments,
            topics,
            keywords,
            scripts,
            advanced_resources,
        }
    }
}

/// Overview sentence for skills without an authored one, built from the skill name
pub fn fallback_overview(name: &str) -> String {
    format!(
        "A skill that organizes best practices and decision criteria for {}.",
        humanize(name)
    )
}

/// One-line description of an attachment without an authored one
fn fallback_description(path: &str) -> String {
    let stem = Path::new(path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(path);
    let name = stem.replace(['-', '_'], " ");

    if path.starts_with(&format!("{SCRIPTS_DIR}/")) {
        format!("{name} helper script")
    } else if path.starts_with(&format!("{TEMPLATES_DIR}/")) {
        format!("{name} template")
    } else {
        format!("{name} supporting guide")
    }
}

/// Render the document for one level
pub fn compose(level: Level, inputs: &LevelInputs) -> String {
    match level {
        Level::Basics => basics(inputs),
        Level::Intermediate => intermediate(inputs),
        Level::Advanced => advanced(inputs),
        Level::Expert => expert(inputs),
    }
}

/// Line buffer with the heading conventions shared by all levels
struct Doc {
    lines: Vec<String>,
}

impl Doc {
    fn new(level: Level) -> Self {
        Self {
            lines: vec![format!("# {}", level.title())],
        }
    }

    fn section(&mut self, title: &str) {
        self.lines.push(String::new());
        self.lines.push(format!("## {title}"));
        self.lines.push(String::new());
    }

    fn subsection(&mut self, title: &str) {
        if self.lines.last().is_some_and(|line| !line.is_empty()) {
            self.lines.push(String::new());
        }
        self.lines.push(format!("### {title}"));
    }

    fn text(&mut self, text: impl Into<String>) {
        self.lines.push(text.into());
    }

    fn blank(&mut self) {
        self.lines.push(String::new());
    }

    fn bullet(&mut self, text: impl AsRef<str>) {
        self.lines.push(format!("- {}", text.as_ref()));
    }

    fn bullets(&mut self, lines: impl IntoIterator<Item = String>) {
        self.lines.extend(lines);
    }

    fn check(&mut self, text: &str) {
        self.lines.push(format!("- [ ] {text}"));
    }

    fn steps<S: AsRef<str>>(&mut self, steps: &[S]) {
        for (i, step) in steps.iter().enumerate() {
            self.lines.push(format!("{}. {}", i + 1, step.as_ref()));
        }
    }

    /// Overview section with the authored or fallback paragraph and the level's scope line
    fn overview(&mut self, inputs: &LevelInputs, scope: &str) {
        self.section("Overview");
        self.text(inputs.overview.as_str());
        self.blank();
        self.text(scope);
    }

    fn finish(self) -> String {
        let mut content = self.lines.join("\n");
        content.push('\n');
        content
    }
}

/// `` - `dir/name`: description (key topics: a / b) `` lines
fn entries(inputs: &LevelInputs, dir: &str, names: &[String], with_topics: bool) -> Vec<String> {
    names
        .iter()
        .map(|name| {
            let path = format!("{dir}/{name}");
            let description = inputs
                .description
                .describe(&path)
                .map_or_else(|| fallback_description(&path), str::to_string);
            let topics = if with_topics {
                inputs.topics.get(name).filter(|t| !t.is_empty())
            } else {
                None
            };
            match topics {
                Some(topics) => format!(
                    "- `{path}`: {description} (key topics: {})",
                    topics.join(" / ")
                ),
                None => format!("- `{path}`: {description}"),
            }
        })
        .collect()
}

fn code_list(dir: &str, names: &[String]) -> String {
    names
        .iter()
        .map(|name| format!("`{dir}/{name}`"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn basics(inputs: &LevelInputs) -> String {
    let templates = &inputs.attachments.templates;
    let primary_template = templates.first();

    let mut doc = Doc::new(Level::Basics);
    doc.overview(inputs, "Covers the basic practice that SKILL.md alone supports.");

    doc.section("Prerequisites");
    doc.bullet("Has read the overview and workflow in SKILL.md");
    doc.bullet("Understands the goal and deliverables of the task at hand");

    doc.section("Detailed Guide");
    doc.subsection("When to Use");
    match &inputs.description.usage_line {
        Some(usage) => doc.bullet(usage),
        None => doc.bullet("Use when sharing the basic approach or applying the skill for the first time"),
    }

    doc.subsection("Required Knowledge");
    doc.bullet(format!("Domain: {}", inputs.overview));
    if !inputs.keywords.is_empty() {
        let shown: Vec<&str> = inputs.keywords.iter().take(5).map(String::as_str).collect();
        doc.bullet(format!("Key concepts: {}", shown.join(" / ")));
    }
    if inputs.should_do.is_empty() {
        doc.bullet("Practice: follow the best practices in SKILL.md");
    } else {
        for item in inputs.should_do.iter().take(3) {
            doc.bullet(format!("Practice: {item}"));
        }
    }

    doc.subsection("Decision Criteria");
    if inputs.should_avoid.is_empty() {
        doc.bullet("Confirm that goal, prerequisites, and deliverable requirements are all in place");
    } else {
        for item in inputs.should_avoid.iter().take(3) {
            doc.bullet(format!("Avoid: {item}"));
        }
    }

    doc.subsection("Minimum Deliverable Requirements");
    match primary_template {
        Some(template) => {
            doc.bullet("Fills every required field of the template");
            doc.bullet(format!("Primary template: `{TEMPLATES_DIR}/{template}`"));
        }
        None => doc.bullet("States the goal, prerequisites, rationale, and next actions"),
    }

    doc.subsection("Reference Books");
    if inputs.description.reference_names.is_empty() {
        doc.bullet("No reference books");
    } else {
        for book in &inputs.description.reference_names {
            doc.bullet(book);
        }
    }

    doc.subsection("Key Resources");
    doc.bullet("`SKILL.md`: foundation for the skill's purpose, prerequisites, and decision criteria");

    doc.subsection("Key Templates");
    match primary_template {
        Some(template) => doc.bullet(format!(
            "`{TEMPLATES_DIR}/{template}`: reference only at this level"
        )),
        None => doc.bullet("No templates"),
    }

    doc.section("Procedure");
    doc.steps(&[
        "Review the overview and purpose in SKILL.md",
        "Put the timing of use and the expected deliverable into words",
        "Confirm the prerequisites are met at the start of the work",
    ]);

    doc.section("Checklist");
    doc.check("Can explain when to apply the skill");
    doc.check("Organized the required knowledge and decision criteria");
    if primary_template.is_some() {
        doc.check("Knows the required fields of the template");
    } else {
        doc.check("Meets the minimum deliverable requirements");
    }

    doc.finish()
}

fn intermediate(inputs: &LevelInputs) -> String {
    let Attachments {
        resources,
        scripts,
        templates,
    } = &inputs.attachments;

    let mut doc = Doc::new(Level::Intermediate);
    doc.overview(
        inputs,
        "Organizes practice that builds on resources/, scripts/, and templates/.",
    );

    doc.section("Prerequisites");
    doc.bullet("Understands the content of Level 1");
    doc.bullet("Can explain the scope of SKILL.md");

    doc.section("Detailed Guide");
    doc.subsection("Required Knowledge and Information");
    if inputs.keywords.is_empty() {
        doc.bullet("Work from the content of SKILL.md");
    } else {
        doc.bullet(format!("Key topics: {}", inputs.keywords.join(" / ")));
    }
    if !inputs.should_do.is_empty() {
        let shown: Vec<&str> = inputs.should_do.iter().take(3).map(String::as_str).collect();
        doc.bullet(format!("Practice: {}", shown.join(" / ")));
    }

    doc.subsection("Decision Criteria and Verification");
    if inputs.should_avoid.is_empty() {
        doc.bullet("Make the metrics and check items used for verification explicit");
    } else {
        for item in inputs.should_avoid.iter().take(3) {
            doc.bullet(format!("Avoid: {item}"));
        }
    }

    doc.subsection("Resources");
    if resources.is_empty() {
        doc.bullet("No additional resources");
    } else {
        doc.bullets(entries(inputs, RESOURCES_DIR, resources, true));
    }

    doc.subsection("Scripts");
    if scripts.is_empty() {
        doc.bullet("No scripts");
    } else {
        doc.bullets(entries(inputs, SCRIPTS_DIR, scripts, false));
    }

    doc.subsection("Templates");
    if templates.is_empty() {
        doc.bullet("No templates");
    } else {
        doc.bullets(entries(inputs, TEMPLATES_DIR, templates, false));
    }

    doc.subsection("Deliverable Requirements");
    if templates.is_empty() {
        doc.bullet("Produce a deliverable with clear rationale and next actions");
    } else {
        doc.bullet("Reflect the structure and required fields of the templates");
    }

    doc.section("Procedure");
    let mut steps: Vec<String> = Vec::new();
    if resources.is_empty() {
        steps.push("Organize the steps around SKILL.md and Level 1".into());
    } else {
        steps.push("Select the resources to use and decide the order to apply them".into());
    }
    if !scripts.is_empty() {
        steps.push("Check each script's arguments with `--help` and run the read-only ones first".into());
    }
    if !templates.is_empty() {
        steps.push("Use the templates to keep the deliverable format consistent".into());
    }
    if scripts.iter().any(|s| s == USAGE_LOG_SCRIPT) {
        steps.push(format!("Record the run with `{SCRIPTS_DIR}/{USAGE_LOG_SCRIPT}`"));
    }
    doc.steps(&steps);

    doc.section("Checklist");
    if resources.is_empty() {
        doc.check("Level 1 guidance alone was enough to complete the work");
    } else {
        doc.check("Extracted the needed knowledge from the resources");
    }
    if scripts.is_empty() {
        doc.check("Confirmed that no scripts are needed");
    } else {
        doc.check("Knows each script's role and execution order");
    }
    if templates.is_empty() {
        doc.check("Confirmed that no templates are needed and the deliverable requirements are met");
    } else {
        doc.check("Aligned the deliverable format with the templates");
    }

    doc.finish()
}

fn advanced(inputs: &LevelInputs) -> String {
    let scripts = &inputs.attachments.scripts;
    let templates = &inputs.attachments.templates;
    let has_advanced = !inputs.advanced_resources.is_empty();

    let mut doc = Doc::new(Level::Advanced);
    doc.overview(
        inputs,
        "Covers progressive disclosure design and token optimization in practice.",
    );

    doc.section("Prerequisites");
    doc.bullet("Has completed the Level 2 practice");
    doc.bullet("Knows where the resources, scripts, and templates live");

    doc.section("Detailed Guide");
    doc.subsection("Progressive Disclosure Design");
    doc.bullet("Start with the key points in Level 1/Level 2 and expand to detailed resources only as needed");
    doc.bullet("When an explanation runs long, write a summary and consult only the parts you need");

    doc.subsection("Token Optimization");
    doc.bullet("Defer information not tied to the goal and load required items first");
    doc.bullet("Keep notes on frequently consulted material and reuse them");

    doc.subsection("Advanced Knowledge");
    if has_advanced {
        doc.bullets(entries(inputs, RESOURCES_DIR, &inputs.advanced_resources, true));
    } else {
        doc.bullet("No dedicated advanced resources");
    }

    doc.subsection("Decision Criteria");
    if has_advanced {
        doc.bullet("Load advanced resources only when a detailed judgment is needed");
    }
    doc.bullet("Prefer read-only scripts when verification is needed");

    doc.subsection("Script Classification");
    let ScriptClasses { read, write, other } = &inputs.scripts;
    if !read.is_empty() {
        doc.bullet(format!("Read-only: {}", code_list(SCRIPTS_DIR, read)));
    }
    if !write.is_empty() {
        doc.bullet(format!("Writing: {}", code_list(SCRIPTS_DIR, write)));
    }
    if !other.is_empty() {
        doc.bullet(format!("Other: {}", code_list(SCRIPTS_DIR, other)));
    }
    if scripts.is_empty() {
        doc.bullet("No scripts");
    }
    if templates.is_empty() {
        doc.bullet("No templates");
    } else {
        doc.bullet("Use the templates to keep output consistent");
    }

    doc.section("Procedure");
    let mut steps = vec![
        "Narrow the scope to the minimum information needed",
        "Load advanced resources when gaps appear",
    ];
    if !scripts.is_empty() {
        steps.push("Verify with read-only scripts, then run writing scripts if needed");
    }
    if !templates.is_empty() {
        steps.push("Use the templates to minimize differences in expression");
    }
    steps.push("Summarize and reuse when the volume of information is large");
    doc.steps(&steps);

    doc.section("Checklist");
    doc.check("Designed the scope to widen step by step");
    if scripts.is_empty() {
        doc.check("Confirmed that no scripts are needed");
    } else {
        doc.check("Adjusted the execution order by script type");
    }
    if templates.is_empty() {
        doc.check("Meets the deliverable requirements");
    } else {
        doc.check("Kept deliverables consistent with the templates");
    }
    doc.check("Summarized or split material to limit token use");

    doc.finish()
}

fn expert(inputs: &LevelInputs) -> String {
    let scripts = &inputs.attachments.scripts;

    let mut doc = Doc::new(Level::Expert);
    doc.overview(
        inputs,
        "Organizes how to improve the skill while running the feedback loop.",
    );

    doc.section("Prerequisites");
    doc.bullet("Has completed the Level 3 practice");
    doc.bullet("Can run the scripts and update the logs");

    doc.section("Detailed Guide");
    doc.subsection("Feedback Loop");
    doc.bullet(format!("`{EVALS_FILE}`: definition of the evaluation criteria"));
    doc.bullet(format!("`{CHANGELOG_FILE}`: record of changes"));
    doc.bullet(format!("`{LOGS_FILE}`: accumulated operation logs"));
    if scripts.is_empty() {
        doc.bullet("No scripts");
    } else {
        doc.bullets(entries(inputs, SCRIPTS_DIR, scripts, false));
    }

    doc.subsection("Knowledge for Improvement");
    doc.bullet("Cross-check evaluation results with the logs to find improvement points");
    doc.bullet("Identify which resources/, templates/, and scripts/ need to change");

    doc.subsection("Evaluation and Records");
    doc.bullet(format!(
        "Record run results in {LOGS_FILE} and reflect the evaluation criteria in {EVALS_FILE}"
    ));

    doc.section("Procedure");
    let mut steps = vec![
        "Review the operation logs and list improvement targets".to_string(),
        "Apply the needed changes to resources/, templates/, and scripts/".to_string(),
    ];
    if !scripts.is_empty() {
        steps.push("Verify with the scripts and record the changes".to_string());
    }
    steps.push(format!(
        "Describe the update in {CHANGELOG_FILE} and adjust {EVALS_FILE}"
    ));
    doc.steps(&steps);

    doc.section("Checklist");
    doc.check("Every element of the feedback loop is up to date");
    if scripts.is_empty() {
        doc.check("Confirmed that no scripts are needed");
    } else {
        doc.check("Verified with the scripts");
    }
    doc.check(&format!("Recorded the changes in {CHANGELOG_FILE}"));

    doc.finish()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    fn empty_inputs() -> LevelInputs {
        LevelInputs::new(
            "api-versioning",
            &SkillDescription::default(),
            Attachments::default(),
            BTreeMap::new(),
            &Vocabulary::default(),
        )
    }

    fn rich_inputs() -> LevelInputs {
        let mut skill = SkillDescription::default();
        skill.sections.overview = Some("Keeps APIs evolvable.".into());
        skill.sections.should_do = names(&["Version in the path", "See resources/Level2_intermediate.md"]);
        skill.description.usage_line = Some("Use proactively when changing APIs.".into());
        skill.description.reference_names = names(&["Designing Web APIs"]);
        skill
            .description
            .resource_map
            .insert("scripts/validate-spec.mjs".into(), "lints the OpenAPI spec".into());

        let attachments = Attachments {
            resources: names(&["migration-patterns.md", "notes.md"]),
            scripts: names(&["frobnicate.mjs", "log_usage.mjs", "sync-clients.mjs", "validate-spec.mjs"]),
            templates: names(&["changelog.md", "deprecation-notice.md"]),
        };
        let mut topics = BTreeMap::new();
        topics.insert("migration-patterns.md".to_string(), names(&["Dual Writes", "Sunset Headers"]));
        topics.insert("notes.md".to_string(), Vec::new());

        LevelInputs::new("api-versioning", &skill, attachments, topics, &Vocabulary::default())
    }

    #[test]
    fn test_fallback_overview() {
        let inputs = empty_inputs();
        assert_eq!(
            inputs.overview,
            "A skill that organizes best practices and decision criteria for api versioning."
        );
    }

    #[test]
    fn test_fallback_overview_prefers_header_name() {
        let mut skill = SkillDescription::default();
        skill.name = "token-rotation".into();
        let inputs = LevelInputs::new(
            "rotation-dir",
            &skill,
            Attachments::default(),
            BTreeMap::new(),
            &Vocabulary::default(),
        );
        assert_eq!(
            inputs.overview,
            "A skill that organizes best practices and decision criteria for token rotation."
        );
    }

    #[test]
    fn test_fallback_descriptions() {
        assert_eq!(fallback_description("scripts/check_links.mjs"), "check links helper script");
        assert_eq!(fallback_description("templates/report-form.md"), "report form template");
        assert_eq!(fallback_description("resources/token-guide.md"), "token guide supporting guide");
    }

    #[test]
    fn test_intermediate_without_attachments() {
        let doc = compose(Level::Intermediate, &empty_inputs());
        assert!(doc.starts_with("# Level 2: Intermediate\n\n## Overview\n\n"));
        assert!(doc.contains("### Resources\n- No additional resources\n"));
        assert!(doc.contains("### Scripts\n- No scripts\n"));
        assert!(doc.contains("### Templates\n- No templates\n"));
        assert!(doc.contains("- [ ] Level 1 guidance alone was enough to complete the work\n"));
        assert!(doc.contains("- [ ] Confirmed that no scripts are needed\n"));
        assert!(doc.contains("- [ ] Confirmed that no templates are needed"));
        assert!(doc.ends_with("are met\n"));
    }

    #[test]
    fn test_basics_surfaces_only_primary_template() {
        let doc = compose(Level::Basics, &rich_inputs());
        assert!(doc.contains("- Use proactively when changing APIs.\n"));
        assert!(doc.contains("- Primary template: `templates/changelog.md`\n"));
        assert!(!doc.contains("deprecation-notice"));
        assert!(doc.contains("### Reference Books\n- Designing Web APIs\n"));
        assert!(doc.contains("- Practice: Version in the path\n"));
        assert!(!doc.contains("Level2_intermediate"));
        assert!(doc.contains("- Key concepts: Dual Writes / Sunset Headers / notes\n"));
    }

    #[test]
    fn test_intermediate_lists_all_attachments() {
        let doc = compose(Level::Intermediate, &rich_inputs());
        assert!(doc.contains(
            "- `resources/migration-patterns.md`: migration patterns supporting guide (key topics: Dual Writes / Sunset Headers)\n"
        ));
        assert!(doc.contains("- `resources/notes.md`: notes supporting guide\n"));
        assert!(doc.contains("- `scripts/validate-spec.mjs`: lints the OpenAPI spec\n"));
        assert!(doc.contains("- `templates/deprecation-notice.md`: deprecation notice template\n"));
        assert!(doc.contains("Record the run with `scripts/log_usage.mjs`"));
    }

    #[test]
    fn test_advanced_splits_scripts() {
        let doc = compose(Level::Advanced, &rich_inputs());
        assert!(doc.contains("- Read-only: `scripts/validate-spec.mjs`\n"));
        assert!(doc.contains("- Writing: `scripts/sync-clients.mjs`\n"));
        assert!(doc.contains("- Other: `scripts/frobnicate.mjs`, `scripts/log_usage.mjs`\n"));
        assert!(doc.contains("### Advanced Knowledge\n- `resources/migration-patterns.md`"));
        assert!(!doc.contains("resources/notes.md"));
    }

    #[test]
    fn test_expert_feedback_triad() {
        let doc = compose(Level::Expert, &empty_inputs());
        assert!(doc.contains("- `EVALS.json`: definition of the evaluation criteria\n"));
        assert!(doc.contains("- `CHANGELOG.md`: record of changes\n"));
        assert!(doc.contains("- `LOGS.md`: accumulated operation logs\n- No scripts\n"));
        assert!(doc.contains("3. Describe the update in CHANGELOG.md and adjust EVALS.json\n"));
    }

    #[test]
    fn test_every_level_has_skeleton() {
        let inputs = rich_inputs();
        for level in Level::ALL {
            let doc = compose(level, &inputs);
            assert!(doc.starts_with(&format!("# {}\n", level.title())));
            for heading in ["## Overview", "## Prerequisites", "## Detailed Guide", "## Procedure", "## Checklist"] {
                assert!(doc.contains(heading), "{level} lacks {heading}");
            }
            assert!(doc.ends_with('\n') && !doc.ends_with("\n\n"));
        }
    }
}
