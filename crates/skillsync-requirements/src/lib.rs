//! `SkillSync` Requirement Indexer
//!
//! Keeps each skill's `resources/requirements-index.md` in step with the
//! requirement mapping, and makes sure the skill's SKILL.md header points at
//! that index.
//!
//! ## Behavior
//!
//! - Mapping order is preserved inside an index; skills are visited sorted
//! - Missing documents and missing skills are reported, never fatal
//! - Header insertion is a single line splice and is idempotent
//! - A malformed mapping file is the only fatal input error

#![deny(unsafe_code, dead_code, unused_imports, unused_variables, missing_docs)]

pub mod document;
pub mod error;
pub mod header;
pub mod index;
pub mod indexer;
pub mod mapping;

pub use error::{Result, SyncError};
pub use header::{ensure_header_reference, insert_index_reference, IndexReference};
pub use index::index_for_skill;
pub use indexer::{IndexOptions, IndexReport, RequirementIndexer};
pub use mapping::{load_mapping, Mapping};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{IndexOptions, IndexReport, RequirementIndexer, SyncError};
}
