//! Error types for jsoncmp
//!
//! Normalization and comparison are total over parsed documents and never
//! return errors. Everything here belongs to input resolution: argument
//! shape, case registration, and reading or parsing the files of a case.

use std::path::PathBuf;

use thiserror::Error;

/// jsoncmp error types
#[derive(Debug, Error)]
pub enum Error {
    /// Fewer than one left/right pair of paths was given
    #[error("Not enough file arguments: at least one left/right pair is required")]
    NotEnoughPaths,

    /// The path list cannot be split into left/right pairs
    #[error("Uneven number of file arguments: got {0}")]
    OddPathCount(usize),

    /// Two pairs derived the same case name under the strict policy
    #[error("Duplicate test case name: {name}")]
    DuplicateCase { name: String },

    /// A case file could not be read
    #[error("Cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A case file is not valid JSON
    #[error("Cannot parse {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type alias for jsoncmp operations
pub type Result<T> = std::result::Result<T, Error>;
