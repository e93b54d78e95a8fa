//! Import command - generate requirements.bzl from downloaded wheels.

use anyhow::{bail, Context, Result};
use clap::Args;
use std::path::PathBuf;

use pipbzl_pm::{load_records, render::DEFAULT_RULES_REPOSITORY, resolve, PackageUniverse, RenderConfig, RequirementsRenderer};

use crate::config::{ImportConfig, PipbzlConfig};

#[derive(Args, Debug, Default)]
pub struct ImportArgs {
    /// The namespace of the import
    #[arg(long)]
    pub name: Option<String>,

    /// The requirements.txt file the wheels were fetched from
    #[arg(long)]
    pub input: Option<String>,

    /// The requirements.bzl file to export
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// The directory holding the downloaded .whl files
    #[arg(long)]
    pub directory: Option<PathBuf>,

    /// Repository providing whl_library
    #[arg(long)]
    pub rules_repository: Option<String>,
}

/// Import settings after merging flags over pipbzl.toml
#[derive(Debug, PartialEq)]
pub struct ImportSettings {
    pub name: String,
    pub input: String,
    pub output: PathBuf,
    pub directory: PathBuf,
    pub rules_repository: String,
}

impl ImportSettings {
    /// Command-line flags take precedence over the config file
    pub fn merge(args: ImportArgs, config: ImportConfig) -> Result<Self> {
        let Some(name) = args.name.or(config.name) else {
            bail!("Missing import name: pass --name or set import.name in pipbzl.toml");
        };
        let Some(directory) = args.directory.or(config.directory) else {
            bail!("Missing wheel directory: pass --directory or set import.directory in pipbzl.toml");
        };
        let Some(output) = args.output.or(config.output) else {
            bail!("Missing output file: pass --output or set import.output in pipbzl.toml");
        };

        Ok(Self {
            name,
            input: args
                .input
                .or(config.input)
                .unwrap_or_else(|| "requirements.txt".to_string()),
            output,
            directory,
            rules_repository: args
                .rules_repository
                .or(config.rules_repository)
                .unwrap_or_else(|| DEFAULT_RULES_REPOSITORY.to_string()),
        })
    }
}

pub fn execute(args: ImportArgs) -> Result<i32> {
    let config = PipbzlConfig::load_from_cwd()?.unwrap_or_default();
    let settings = ImportSettings::merge(args, config.import)?;

    let records = load_records(&settings.directory)
        .with_context(|| format!("Failed to read wheels from {}", settings.directory.display()))?;
    let universe = PackageUniverse::build(records);
    let extras = resolve(&universe);

    let render_config = RenderConfig::new(&settings.name, &settings.input)
        .with_rules_repository(&settings.rules_repository);
    RequirementsRenderer::new(&render_config)
        .write(&settings.output, &universe, &extras)
        .with_context(|| format!("Failed to write {}", settings.output.display()))?;

    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_flags_only() {
        let args = ImportArgs {
            name: Some("deps".to_string()),
            output: Some(PathBuf::from("out.bzl")),
            directory: Some(PathBuf::from("wheels")),
            ..Default::default()
        };

        let settings = ImportSettings::merge(args, ImportConfig::default()).unwrap();

        assert_eq!(settings.name, "deps");
        assert_eq!(settings.input, "requirements.txt");
        assert_eq!(settings.rules_repository, DEFAULT_RULES_REPOSITORY);
    }

    #[test]
    fn test_merge_flags_override_config() {
        let args = ImportArgs {
            name: Some("from_flag".to_string()),
            ..Default::default()
        };
        let config = ImportConfig {
            name: Some("from_file".to_string()),
            input: Some("//:reqs.txt".to_string()),
            output: Some(PathBuf::from("file.bzl")),
            directory: Some(PathBuf::from("file_wheels")),
            rules_repository: Some("@rules_python".to_string()),
        };

        let settings = ImportSettings::merge(args, config).unwrap();

        assert_eq!(settings.name, "from_flag");
        assert_eq!(settings.input, "//:reqs.txt");
        assert_eq!(settings.output, PathBuf::from("file.bzl"));
        assert_eq!(settings.directory, PathBuf::from("file_wheels"));
        assert_eq!(settings.rules_repository, "@rules_python");
    }

    #[test]
    fn test_merge_missing_required() {
        let args = ImportArgs {
            name: Some("deps".to_string()),
            ..Default::default()
        };

        let err = ImportSettings::merge(args, ImportConfig::default()).unwrap_err();
        assert!(err.to_string().contains("--directory"));
    }
}
