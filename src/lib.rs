//! Kinoport: watched-list mirror for a Kinopoisk profile
//!
//! This crate harvests the paginated "watched" listing of a user profile into
//! a local record file, and replays such a file back into the site, marking
//! every record as watched.

pub mod config;
pub mod document;
pub mod harvest;
pub mod pacing;
pub mod replay;
pub mod storage;

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Kinoport operations
#[derive(Debug, Error)]
pub enum KinoportError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Invalid header value for {header}")]
    InvalidHeader { header: &'static str },

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("Malformed response from {url}: {message}")]
    MalformedResponse { url: String, message: String },

    #[error("Gave up on {target} after {attempts} attempts")]
    RetriesExhausted { target: String, attempts: u32 },

    #[error("Malformed record at row {row}: id '{id}' is not numeric")]
    MalformedRecord { row: usize, id: String },

    #[error("Record file error for {path}: {source}")]
    RecordFile {
        path: PathBuf,
        source: RecordCodecError,
    },

    #[error("Record codec error: {0}")]
    Codec(#[from] RecordCodecError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Record file encoding errors
#[derive(Debug, Error)]
pub enum RecordCodecError {
    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error("row {row} has {found} fields, expected 2")]
    FieldCount { row: usize, found: usize },
}

impl From<csv::Error> for KinoportError {
    fn from(error: csv::Error) -> Self {
        KinoportError::Codec(RecordCodecError::Csv(error))
    }
}

/// Result type alias for Kinoport operations
pub type Result<T> = std::result::Result<T, KinoportError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use document::{PagingState, Record};
pub use storage::RecordStore;
