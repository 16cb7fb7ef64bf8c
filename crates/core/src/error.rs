//! Error types for hydroside

use thiserror::Error;

/// Main error type for hydroside operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid raster dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Raster has zero extent; nothing to process")]
    EmptyRaster,

    #[error("Index out of bounds: ({row}, {col}) in raster of size ({rows}, {cols})")]
    IndexOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("Linear index {index} out of bounds for raster of {len} cells")]
    LinearIndexOutOfBounds { index: usize, len: usize },

    #[error("Raster size mismatch for '{name}': expected ({er}, {ec}), got ({ar}, {ac})")]
    SizeMismatch {
        name: &'static str,
        er: usize,
        ec: usize,
        ar: usize,
        ac: usize,
    },

    #[error("Invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("Operation cancelled after {done} of {total} cells")]
    Cancelled { done: usize, total: usize },

    #[error("Algorithm error: {0}")]
    Algorithm(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for hydroside operations
pub type Result<T> = std::result::Result<T, Error>;
