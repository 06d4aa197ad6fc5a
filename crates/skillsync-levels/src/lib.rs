//! `SkillSync` Level Generator
//!
//! Regenerates `resources/Level1_basics.md` through `Level4_expert.md` for
//! each skill from its SKILL.md and attached files.
//!
//! ## Pipeline (per skill)
//!
//! Parse header → parse body sections → enumerate attachments → classify →
//! compose levels 1-4 → write. Output is a pure function of the inputs: the
//! same skill always produces byte-identical files, and every file is
//! overwritten in full.

#![deny(unsafe_code, dead_code, unused_imports, unused_variables, missing_docs)]

pub mod classify;
pub mod compose;
pub mod generator;

pub use classify::{classify_scripts, extract_topics, filter_generic, ScriptClasses};
pub use compose::{compose, LevelInputs};
pub use generator::{LevelGenerator, LevelReport, RenderedLevels, SkillOutcome};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{LevelGenerator, LevelInputs, LevelReport};
}
