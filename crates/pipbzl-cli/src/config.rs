use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// The configuration file structure (pipbzl.toml)
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PipbzlConfig {
    /// Defaults for the import command
    pub import: ImportConfig,
}

/// `[import]` section
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ImportConfig {
    /// Namespace of the import
    pub name: Option<String>,

    /// The requirements file the wheels were fetched from
    pub input: Option<String>,

    /// Where to write requirements.bzl
    pub output: Option<PathBuf>,

    /// Directory holding the downloaded wheels
    pub directory: Option<PathBuf>,

    /// Repository providing whl_library
    pub rules_repository: Option<String>,
}

impl PipbzlConfig {
    /// Load configuration from pipbzl.toml, searching upward from the given directory
    pub fn load(start_dir: &Path) -> Result<Option<Self>> {
        let mut current = start_dir.to_path_buf();

        loop {
            let config_path = current.join("pipbzl.toml");

            if config_path.exists() {
                let content = std::fs::read_to_string(&config_path)
                    .with_context(|| format!("Failed to read {}", config_path.display()))?;
                let config: PipbzlConfig = toml::from_str(&content)
                    .with_context(|| format!("Failed to parse {}", config_path.display()))?;
                log::debug!("Loaded configuration from {}", config_path.display());
                return Ok(Some(config));
            }

            if !current.pop() {
                return Ok(None);
            }
        }
    }

    /// Load configuration by searching upward from the current working directory
    pub fn load_from_cwd() -> Result<Option<Self>> {
        let cwd = std::env::current_dir()?;
        Self::load(&cwd)
    }
}
