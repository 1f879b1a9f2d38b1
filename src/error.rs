//! Error types for loading snapshots and rendering fields.

use {
    crate::grid::Field,
    std::{io, path::PathBuf},
    thiserror::Error,
};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Snapshot index file not found: {}", .0.display())]
    MissingIndexFile(PathBuf),

    #[error("Malformed snapshot index {}: token {position} ({token:?}) is not a number", .path.display())]
    MalformedIndex {
        path: PathBuf,
        position: usize,
        token: String,
    },

    #[error("Snapshot file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Shape mismatch in {}: expected {expected} bytes ({rows}x{cols} doubles), found {actual}", .path.display())]
    ShapeMismatch {
        path: PathBuf,
        rows: usize,
        cols: usize,
        expected: u64,
        actual: u64,
    },

    #[error("No color scale configured for field '{field}' in test case {test_case}")]
    UnknownColorScale { test_case: u32, field: Field },

    #[error("Invalid color scale for field '{field}' in test case {test_case}: min {min} must be finite and below max {max}")]
    InvalidColorScale {
        test_case: u32,
        field: Field,
        min: f64,
        max: f64,
    },

    #[error("Invalid grid configuration: {0}")]
    InvalidGrid(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Failed to load the embedded label font")]
    Font,

    #[error("Output format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl Error {
    pub(crate) fn io<P: Into<PathBuf>>(path: P, source: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
