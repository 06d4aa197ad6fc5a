//! SkillSync Types - Shared data model for the skill documentation pipelines
//!
//! This crate defines the requirement mapping types, the leveled document
//! kinds, the well-known file layout of a skill package, and the vocabulary
//! tables that drive classification and filtering.

pub mod layout;
pub mod level;
pub mod requirement;
pub mod vocabulary;

pub use level::Level;
pub use requirement::{RequirementDocument, RequirementEntry};
pub use vocabulary::{Headings, Markers, Vocabulary};
