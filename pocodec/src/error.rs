//! All error types for the pocodec crate.
//!
//! These are returned from every fallible operation (reading, writing,
//! encoding resolution, catalog persistence). Malformed PO lines are not
//! errors: the parser skips them silently.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("encoding error: {0}")]
    Encoding(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("catalog error: {0}")]
    Catalog(#[from] serde_json::Error),

    #[error("unknown language: {0}")]
    UnknownLanguage(String),

    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),
}

impl Error {
    /// Creates a new encoding error for an unrecognized codec label.
    pub fn unknown_encoding(label: impl AsRef<str>) -> Self {
        Error::Encoding(format!("unrecognized codec `{}`", label.as_ref()))
    }
}
