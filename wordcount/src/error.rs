//! Error types for ingestion and configuration.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::ingest::IngestReport;

/// Failure to ingest a text source.
///
/// Words read before the failure stay counted.
#[derive(Error, Debug)]
pub enum IngestError {
    /// The source could not be opened or inspected.
    #[error("cannot open {}: {source}", .path.display())]
    Open {
        /// Path that was opened.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The path exists but is a directory or other non-regular file.
    #[error("{} is not a regular file", .0.display())]
    NotAFile(PathBuf),

    /// The underlying reader failed partway through.
    #[error("read failed after {} lines ({} words): {source}", .ingested.lines, .ingested.words)]
    Read {
        /// Progress made before the failure.
        ingested: IngestReport,
        /// Underlying I/O error.
        source: io::Error,
    },
}

/// Failure to load a [`Config`](crate::Config).
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("cannot read config {}: {source}", .path.display())]
    Read {
        /// Config path.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The config file is not valid TOML for [`Config`](crate::Config).
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}
