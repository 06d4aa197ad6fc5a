//! `SkillSync` Skills Model
//!
//! Reads skill packages the way the external assistant runtime lays them out:
//! a folder with `SKILL.md` (delimited header + heading-organized body) and
//! optional `resources/`, `scripts/` and `templates/` folders.
//!
//! ## Parsing
//!
//! Nothing here is a grammar. The header, the description block and the body
//! sections are all read by small line-oriented state machines, so the text
//! can be mutated later as a plain line sequence without losing formatting.
//!
//! - [`frontmatter`]: header span, inline fields, block-literal fields
//! - [`description`]: usage line, reference names and resource map of the description block
//! - [`sections`]: overview paragraph and best-practice lists from the body
//! - [`listing`]: deterministic attachment listings

#![deny(unsafe_code, dead_code, unused_imports, unused_variables, missing_docs)]

pub mod description;
pub mod frontmatter;
pub mod listing;
pub mod registry;
pub mod sections;
pub mod skill;

pub use description::DescriptionModel;
pub use frontmatter::{BlockField, HeaderLayout, ParsedDocument};
pub use listing::Attachments;
pub use registry::SkillsRegistry;
pub use sections::SectionModel;
pub use skill::{SkillDescription, SkillPackage};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{Attachments, DescriptionModel, SectionModel, SkillPackage, SkillsRegistry};
}
