//! Error types for the data-loader crate.
//!
//! Loading is the only fallible part of the system: the aggregation core
//! works on already-materialized records and never fails.

use thiserror::Error;

/// Errors that can occur while loading or fetching movie records
///
/// The `#[derive(Error)]` macro from thiserror implements `Display`
/// from the `#[error(...)]` attributes.
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// A record in the data file couldn't be parsed
    ///
    /// `line` is 1-based; for JSON array files it is the line serde_json
    /// reported the error on.
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        reason: String,
    },

    /// A data field had an invalid value
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    /// The file extension doesn't map to a known record format
    #[error("Unsupported data format: {0}")]
    UnsupportedFormat(String),

    /// Two records share the same id
    #[error("Duplicate movie id {id}")]
    DuplicateId { id: i64 },

    /// The backing store could not produce a snapshot
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
