//! Parsing of wheel metadata (`METADATA` headers and legacy `metadata.json`).

use serde::Deserialize;

use crate::{ImportError, Result};

/// The parts of a wheel's metadata needed to build a package record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WheelMetadata {
    pub name: Option<String>,
    pub version: Option<String>,
    /// Extras from `Provides-Extra`, in declaration order
    pub extras: Vec<String>,
    /// Requirement strings, each with the extra it was listed under when the
    /// format records that outside the marker
    pub requires: Vec<(Option<String>, String)>,
}

/// Legacy pydist `metadata.json`
#[derive(Debug, Deserialize)]
struct PydistJson {
    name: Option<String>,
    version: Option<String>,
    #[serde(default)]
    extras: Vec<String>,
    #[serde(default)]
    run_requires: Vec<RunRequires>,
}

#[derive(Debug, Deserialize)]
struct RunRequires {
    extra: Option<String>,
    #[serde(default)]
    requires: Vec<String>,
}

impl WheelMetadata {
    /// Parse a legacy `metadata.json` document
    pub fn from_json(content: &str) -> Result<Self> {
        let pydist: PydistJson = serde_json::from_str(content)?;

        let requires = pydist
            .run_requires
            .into_iter()
            .flat_map(|group| {
                let extra = group.extra;
                group
                    .requires
                    .into_iter()
                    .map(move |req| (extra.clone(), req))
            })
            .collect();

        Ok(Self {
            name: pydist.name,
            version: pydist.version,
            extras: pydist.extras,
            requires,
        })
    }

    /// Parse an RFC 822 style `METADATA` file. Only the header block is read;
    /// the long description after the first blank line is ignored.
    pub fn from_headers(wheel: &str, content: &str) -> Result<Self> {
        let mut metadata = Self::default();

        for (key, value) in header_fields(content) {
            match key.to_ascii_lowercase().as_str() {
                "name" => metadata.name = Some(value),
                "version" => metadata.version = Some(value),
                "provides-extra" => {
                    if !metadata.extras.contains(&value) {
                        metadata.extras.push(value);
                    }
                }
                "requires-dist" => metadata.requires.push((None, value)),
                _ => {}
            }
        }

        if metadata.name.is_none() && metadata.requires.is_empty() && metadata.extras.is_empty() {
            return Err(ImportError::InvalidMetadata {
                wheel: wheel.to_string(),
                message: "no recognizable header fields".to_string(),
            });
        }

        Ok(metadata)
    }
}

/// Split a header block into (field, value) pairs, joining continuation lines
fn header_fields(content: &str) -> Vec<(String, String)> {
    let mut fields: Vec<(String, String)> = Vec::new();

    for line in content.lines() {
        if line.trim().is_empty() {
            break;
        }
        if line.starts_with(' ') || line.starts_with('\t') {
            if let Some((_, value)) = fields.last_mut() {
                value.push(' ');
                value.push_str(line.trim());
            }
            continue;
        }
        if let Some((key, value)) = line.split_once(':') {
            fields.push((key.trim().to_string(), value.trim().to_string()));
        }
    }

    fields
}
