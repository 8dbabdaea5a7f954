// ABOUTME: Error types for the remarker application
// ABOUTME: Provides structured error handling for loading, assembling and rendering

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RemarkerError {
    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    #[error("Failed to read file {path:?}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("metafile \"{metafile}\" not found in directory {directory:?}")]
    MetafileNotFound { metafile: String, directory: PathBuf },

    #[error("Expected to find 'sections' heading in metafile")]
    MissingSections,

    #[error("Section entries must contain a \"file\" key")]
    MissingFileKey,

    #[error("Invalid metafile: {0}")]
    InvalidManifest(String),

    #[error("Cannot concatenate presentations unless they have the same HTML and stylesheet")]
    IncompatibleMerge,

    #[error("Cannot merge an empty sequence of presentations")]
    EmptyMerge,

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("Input validation error: {0}")]
    Validation(String),

    #[error("Watch error: {0}")]
    Watch(String),
}

pub type Result<T> = std::result::Result<T, RemarkerError>;
