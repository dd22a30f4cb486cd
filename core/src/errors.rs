use std::path::PathBuf;

use thiserror::Error;

pub use config::ConfigError;

/// Errors that can occur with finding the config directory.
#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("Unable to find the config directory for ruichiji.")]
    Config,
}

/// Errors that can occur while loading content from a [`crate::source::DataSource`].
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("IO error reading {}: {source}", path.display())]
    IO {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to load {resource} status={status}")]
    Status { resource: String, status: u16 },
    #[error("Failed to parse {resource}: {source}")]
    Parse {
        resource: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Unsupported resource: {0}")]
    Unsupported(String),
}

/// Errors that abort rendering a page, leaving its container untouched.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("Failed to write markup: {0}")]
    Format(#[from] std::fmt::Error),
}
