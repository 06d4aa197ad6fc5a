//! Pipeline runs wired to the resolved configuration

use anyhow::{Context, Result};
use skillsync_levels::{LevelGenerator, LevelReport};
use skillsync_requirements::{IndexOptions, IndexReport, RequirementIndexer};
use tracing::{error, info};

use crate::config::Config;

/// Run the requirement indexer
///
/// A bad mapping file or a write failure aborts the run; everything else is
/// in the returned report.
pub fn sync_requirements(config: &Config, options: &IndexOptions) -> Result<IndexReport> {
    let mapping_path = config.mapping_path();
    info!("Syncing requirements from {:?}", mapping_path);

    let indexer = RequirementIndexer::new(config.root(), config.skills_root(), &mapping_path)
        .with_markers(config.vocabulary.markers.clone());

    match indexer.run(options) {
        Ok(report) => Ok(report),
        Err(e) => {
            if e.is_mapping_error() {
                error!("Requirement mapping {:?} is invalid", mapping_path);
            }
            Err(e).context("Requirement sync failed")
        }
    }
}

/// Run the level generator over every skill, or only `skill`
pub fn update_skill_levels(config: &Config, skill: Option<&str>) -> Result<LevelReport> {
    let skills_root = config.skills_root();
    info!("Generating level files under {:?}", skills_root);

    LevelGenerator::new(skills_root, config.vocabulary.clone())
        .run(skill)
        .context("Level generation failed")
}
