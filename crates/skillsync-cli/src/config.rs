//! Layered configuration for both pipelines

use serde::Deserialize;
use skillsync_types::Vocabulary;
use std::path::{Path, PathBuf};

/// Built-in defaults, the lowest configuration layer
pub const DEFAULT_CONFIG: &str = r#"
[paths]
root = "."
skills_dir = ".claude/skills"
mapping = "docs/00-requirements/requirements-skill-map.json"

[logging]
level = "info"  # trace, debug, info, warn, error
"#;

/// Local override file looked up in the working directory
pub const LOCAL_CONFIG: &str = "skillsync.toml";

/// Where the pipelines read and write
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct PathsConfig {
    /// Project root; mapped document paths resolve against it
    pub root: PathBuf,
    /// Skills directory, relative to the root
    pub skills_dir: PathBuf,
    /// Requirement mapping file, relative to the root
    pub mapping: PathBuf,
}

/// Logging settings
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Default filter directive
    pub level: String,
}

/// Values given on the command line, applied over every other layer
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// `--root`
    pub root: Option<PathBuf>,
    /// `--mapping`
    pub mapping: Option<PathBuf>,
}

/// Resolved configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Paths
    pub paths: PathsConfig,
    /// Logging
    pub logging: LoggingConfig,
    /// Classification tables; every key is optional
    #[serde(default)]
    pub vocabulary: Vocabulary,
}

impl Config {
    /// Global config path: ~/.skillsync/skillsync.toml
    fn global_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".skillsync").join("skillsync.toml"))
    }

    /// Load configuration with layered approach:
    /// 1. Built-in defaults
    /// 2. Global config: ~/.skillsync/skillsync.toml (optional)
    /// 3. Local override: ./skillsync.toml (optional)
    /// 4. Environment variables (`SKILLSYNC__PATHS__ROOT`, ...)
    /// 5. Command-line flags
    pub fn load(overrides: &Overrides) -> anyhow::Result<Self> {
        // Load .env file from current directory
        dotenvy::dotenv().ok();

        Self::load_from(
            Self::global_config_path().as_deref(),
            Path::new(LOCAL_CONFIG),
            overrides,
        )
    }

    /// [`Config::load`] with explicit file locations
    pub fn load_from(
        global: Option<&Path>,
        local: &Path,
        overrides: &Overrides,
    ) -> anyhow::Result<Self> {
        let mut config_builder = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml));

        if let Some(global) = global {
            config_builder = config_builder.add_source(
                config::File::from(global.to_path_buf())
                    .format(config::FileFormat::Toml)
                    .required(false),
            );
        }

        config_builder = config_builder
            .add_source(
                config::File::from(local.to_path_buf())
                    .format(config::FileFormat::Toml)
                    .required(false),
            )
            .add_source(config::Environment::with_prefix("SKILLSYNC").separator("__"));

        if let Some(root) = &overrides.root {
            config_builder =
                config_builder.set_override("paths.root", root.to_string_lossy().into_owned())?;
        }

        if let Some(mapping) = &overrides.mapping {
            config_builder = config_builder
                .set_override("paths.mapping", mapping.to_string_lossy().into_owned())?;
        }

        let config: Self = config_builder.build()?.try_deserialize()?;
        Ok(config)
    }

    /// Project root
    pub fn root(&self) -> &Path {
        &self.paths.root
    }

    /// Skills directory resolved against the root
    pub fn skills_root(&self) -> PathBuf {
        self.paths.root.join(&self.paths.skills_dir)
    }

    /// Mapping file resolved against the root
    pub fn mapping_path(&self) -> PathBuf {
        self.paths.root.join(&self.paths.mapping)
    }
}
