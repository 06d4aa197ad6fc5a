//! Regenerate per-skill requirement indexes from the requirement mapping

use anyhow::Result;
use clap::Parser;
use skillsync_cli::{service, CommonArgs};
use skillsync_requirements::IndexOptions;
use std::path::PathBuf;

/// Sync requirement documents into skill indexes
#[derive(Parser)]
#[command(name = "sync-requirements", version)]
#[command(about = "Write resources/requirements-index.md for every mapped skill", long_about = None)]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,

    /// Requirement mapping file (JSON or YAML), relative to the root
    #[arg(long, value_name = "FILE")]
    mapping: Option<PathBuf>,

    /// Report what would change without writing
    #[arg(long)]
    dry_run: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.common.init(cli.mapping)?;

    let report = service::sync_requirements(
        &config,
        &IndexOptions {
            skill: cli.common.skill,
            dry_run: cli.dry_run,
        },
    )?;
    print!("{report}");
    Ok(())
}
