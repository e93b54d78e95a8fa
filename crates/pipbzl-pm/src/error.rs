use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImportError {
    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Archive errors
    #[error("Failed to read wheel archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Invalid wheel file name: {}", .path.display())]
    InvalidWheelName { path: PathBuf },

    // Metadata errors
    #[error("Failed to parse metadata.json: {0}")]
    MetadataJson(#[from] serde_json::Error),

    #[error("No METADATA or metadata.json found in {wheel}")]
    MissingMetadata { wheel: String },

    #[error("Invalid metadata in {wheel}: {message}")]
    InvalidMetadata { wheel: String, message: String },

    // Requirement errors
    #[error("Invalid requirement '{requirement}': {reason}")]
    InvalidRequirement { requirement: String, reason: String },
}

pub type Result<T> = std::result::Result<T, ImportError>;
