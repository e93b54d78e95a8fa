//! Discovery of downloaded wheels.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::package::PackageRecord;
use crate::wheel::Wheel;
use crate::Result;

/// Find every `.whl` file below `dir`, sorted by path
pub fn discover_wheels(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut wheels = Vec::new();

    for entry in WalkDir::new(dir).follow_links(true) {
        let entry = entry.map_err(std::io::Error::from)?;
        let path = entry.path();

        if entry.file_type().is_file() && path.extension().is_some_and(|ext| ext == "whl") {
            wheels.push(path.to_path_buf());
        }
    }

    wheels.sort();
    log::info!("Found {} wheels in {}", wheels.len(), dir.display());

    Ok(wheels)
}

/// Discover every wheel below `dir` and read its package record
pub fn load_records(dir: &Path) -> Result<Vec<PackageRecord>> {
    discover_wheels(dir)?
        .into_iter()
        .map(|path| Wheel::new(path)?.to_record())
        .collect()
}
