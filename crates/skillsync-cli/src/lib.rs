//! `SkillSync` CLI support
//!
//! Configuration loading, shared command-line flags, and the glue that runs
//! each pipeline and hands its report back to the binaries.

#![deny(unsafe_code, dead_code, unused_imports, unused_variables, missing_docs)]

pub mod args;
pub mod config;
pub mod service;

pub use args::CommonArgs;
pub use config::{Config, Overrides};
