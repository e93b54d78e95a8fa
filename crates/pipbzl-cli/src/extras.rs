//! Extras command - show which extras of each wheel can be built.

use anyhow::{Context, Result};
use clap::Args;
use console::style;
use std::path::PathBuf;

use pipbzl_pm::{load_records, ExtrasResolver, PackageUniverse};

use crate::config::PipbzlConfig;

#[derive(Args, Debug)]
pub struct ExtrasArgs {
    /// The directory holding the downloaded .whl files
    #[arg(long)]
    pub directory: Option<PathBuf>,

    /// Only list packages with at least one unsatisfiable extra
    #[arg(long)]
    pub unsatisfiable: bool,
}

pub fn execute(args: ExtrasArgs) -> Result<i32> {
    let directory = match args.directory {
        Some(dir) => dir,
        None => PipbzlConfig::load_from_cwd()?
            .and_then(|c| c.import.directory)
            .context("Missing wheel directory: pass --directory or set import.directory in pipbzl.toml")?,
    };

    let records = load_records(&directory)
        .with_context(|| format!("Failed to read wheels from {}", directory.display()))?;
    let universe = PackageUniverse::build(records);
    let report = ExtrasResolver::new(&universe).report();

    for (identity, verdicts) in &report {
        if args.unsatisfiable && verdicts.iter().all(|v| v.verdict.is_ok()) {
            continue;
        }
        let version = universe
            .get(identity)
            .map(|r| r.version.as_str())
            .unwrap_or_default();
        println!("{} {}", style(identity).green(), style(version).dim());

        for verdict in verdicts {
            match &verdict.verdict {
                Ok(()) => println!("  {} {}", style("+").green(), verdict.extra),
                Err(reason) => println!("  {} {} ({})", style("-").red(), verdict.extra, reason),
            }
        }
    }

    Ok(0)
}
