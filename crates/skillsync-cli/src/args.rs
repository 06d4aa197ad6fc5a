//! Flags shared by both binaries

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use crate::config::{Config, Overrides};

/// Root, skill filter and verbosity flags
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Project root (overrides `paths.root`)
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Process only this skill
    #[arg(long, value_name = "ID")]
    pub skill: Option<String>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl CommonArgs {
    /// Load configuration with these flags applied, then start logging
    pub fn init(&self, mapping: Option<PathBuf>) -> Result<Config> {
        let config = Config::load(&Overrides {
            root: self.root.clone(),
            mapping,
        })?;

        let level = skillsync_logging::effective_level(&config.logging.level, self.verbose, self.quiet);
        skillsync_logging::init_logging(&level)?;

        Ok(config)
    }
}
