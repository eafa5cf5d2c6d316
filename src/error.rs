//! Error types for shiori operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading rules, manifests or source pages.
///
/// The traversal itself never fails; these only surface at the I/O edges.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Source not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    #[error("Invalid manifest: {0}")]
    InvalidManifest(String),
}

pub type Result<T> = std::result::Result<T, Error>;
