//! Error types for docset builds.

use thiserror::Error;

/// Errors that can occur while loading configuration or building a docset.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid selector '{0}'")]
    Selector(String),

    #[error("failed to compile regexp: {0}")]
    Regex(#[from] regex::Error),

    #[error("search index error: {0}")]
    Index(#[from] rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
