//! Reading package records out of `.whl` archives.

mod metadata;

pub use metadata::WheelMetadata;

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use crate::package::{PackageRecord, Requirement};
use crate::{ImportError, Result};

/// Components of a wheel file name:
/// `{distribution}-{version}(-{build})?-{python}-{abi}-{platform}.whl`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WheelName {
    pub distribution: String,
    pub version: String,
    pub build: Option<String>,
    pub python: String,
    pub abi: String,
    pub platform: String,
}

impl WheelName {
    /// Parse the file name of `path`
    pub fn from_path(path: &Path) -> Result<Self> {
        let invalid = || ImportError::InvalidWheelName {
            path: path.to_path_buf(),
        };

        let file_name = path.file_name().and_then(|n| n.to_str()).ok_or_else(invalid)?;
        let stem = file_name.strip_suffix(".whl").ok_or_else(invalid)?;
        let parts: Vec<&str> = stem.split('-').collect();

        let (distribution, version, build, tags) = match parts.as_slice() {
            [d, v, py, abi, plat] => (*d, *v, None, [*py, *abi, *plat]),
            [d, v, b, py, abi, plat] => (*d, *v, Some(b.to_string()), [*py, *abi, *plat]),
            _ => return Err(invalid()),
        };

        if distribution.is_empty() || version.is_empty() {
            return Err(invalid());
        }

        Ok(Self {
            distribution: distribution.to_string(),
            version: version.to_string(),
            build,
            python: tags[0].to_string(),
            abi: tags[1].to_string(),
            platform: tags[2].to_string(),
        })
    }

    /// Name of the `.dist-info` directory inside the archive
    pub fn dist_info_dir(&self) -> String {
        format!("{}-{}.dist-info", self.distribution, self.version)
    }
}

/// A wheel on disk
#[derive(Debug, Clone)]
pub struct Wheel {
    path: PathBuf,
    name: WheelName,
}

impl Wheel {
    /// Wrap a wheel path, validating its file name
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let name = WheelName::from_path(&path)?;
        Ok(Self { path, name })
    }

    /// File name of the wheel
    pub fn basename(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Read the wheel's metadata. `metadata.json` wins over `METADATA` when
    /// both are present.
    pub fn metadata(&self) -> Result<WheelMetadata> {
        let file = File::open(&self.path)?;
        let mut archive = zip::ZipArchive::new(BufReader::new(file))?;
        let dist_info = self.find_dist_info(&archive);
        let basename = self.basename();

        if let Some(content) = read_entry(&mut archive, &format!("{}/metadata.json", dist_info))? {
            log::trace!("{}: reading metadata.json", basename);
            return WheelMetadata::from_json(&content);
        }

        if let Some(content) = read_entry(&mut archive, &format!("{}/METADATA", dist_info))? {
            log::trace!("{}: reading METADATA", basename);
            return WheelMetadata::from_headers(&basename, &content);
        }

        Err(ImportError::MissingMetadata { wheel: basename })
    }

    /// Build the package record for this wheel
    pub fn to_record(&self) -> Result<PackageRecord> {
        let metadata = self.metadata()?;
        let basename = self.basename();

        let name = metadata
            .name
            .clone()
            .unwrap_or_else(|| self.name.distribution.clone());
        let version = metadata
            .version
            .clone()
            .unwrap_or_else(|| self.name.version.clone());

        let mut record = PackageRecord::new(name, version, basename);

        for extra in &metadata.extras {
            record.declare_extra(extra.clone());
        }

        for (listed_extra, spec) in &metadata.requires {
            let parsed = Requirement::parse(spec)?;
            match listed_extra.clone().or_else(|| parsed.extra()) {
                Some(extra) => record.add_extra_dependency(extra, parsed.requirement),
                None => record.base_dependencies.push(parsed.requirement),
            }
        }

        log::debug!(
            "Read {} {} ({} base requirements, {} extras)",
            record.name,
            record.version,
            record.base_dependencies.len(),
            record.extra_dependencies.len()
        );

        Ok(record)
    }

    /// The expected `.dist-info` directory, or the first one in the archive
    /// when the file name and the directory disagree (e.g. in case)
    fn find_dist_info(&self, archive: &zip::ZipArchive<BufReader<File>>) -> String {
        let expected = self.name.dist_info_dir();
        let mut fallback = None;

        for entry in archive.file_names() {
            let Some((top, _)) = entry.split_once('/') else {
                continue;
            };
            if top == expected {
                return expected;
            }
            if fallback.is_none() && top.ends_with(".dist-info") {
                fallback = Some(top.to_string());
            }
        }

        fallback.unwrap_or(expected)
    }
}

fn read_entry(archive: &mut zip::ZipArchive<BufReader<File>>, name: &str) -> Result<Option<String>> {
    match archive.by_name(name) {
        Ok(mut entry) => {
            let mut content = String::new();
            entry.read_to_string(&mut content)?;
            Ok(Some(content))
        }
        Err(zip::result::ZipError::FileNotFound) => Ok(None),
        Err(e) => Err(e.into()),
    }
}
