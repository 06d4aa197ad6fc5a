//! Regenerate the four level files of every skill

use anyhow::Result;
use clap::Parser;
use skillsync_cli::{service, CommonArgs};

/// Generate Level1_basics.md through Level4_expert.md
#[derive(Parser)]
#[command(name = "update-skill-levels", version)]
#[command(about = "Regenerate the leveled guidance files of each skill", long_about = None)]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.common.init(None)?;

    let report = service::update_skill_levels(&config, cli.common.skill.as_deref())?;
    print!("{report}");
    Ok(())
}
