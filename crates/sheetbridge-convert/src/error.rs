//! Conversion error types

use thiserror::Error;

/// Result type for conversion operations
pub type ConvertResult<T> = std::result::Result<T, ConvertError>;

/// Errors that can occur during grid/value conversion and range resolution.
///
/// All of these are local, recoverable failures returned to the immediate
/// caller; conversions are deterministic, so nothing here is retried.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Grid dimensions are incompatible with the requested target or options
    #[error("Shape mismatch: expected {expected}, got {got}")]
    ShapeMismatch { expected: String, got: String },

    /// A mapping read encountered a repeated key
    #[error("Duplicate key in mapping: {key}")]
    DuplicateKey { key: String },

    /// Out-of-range or contradictory scan request
    #[error("Invalid anchor: ({row}, {col}); coordinates are 1-based")]
    InvalidAnchor { row: u32, col: u32 },

    /// The value cannot be written to a sheet
    #[error("Unwritable value: {reason}")]
    UnwritableValue { reason: String },

    /// General read/write coercion failure, with the offending 0-based cell
    #[error("Conversion failed at row {row}, column {col}: {message}")]
    Conversion {
        row: usize,
        col: usize,
        message: String,
    },

    /// Inconsistent table structure (label depths, body shape)
    #[error("Invalid table: {0}")]
    InvalidTable(String),

    /// Core error
    #[error("Core error: {0}")]
    Core(#[from] sheetbridge_core::Error),
}

impl ConvertError {
    /// Build a shape mismatch from a required shape and an actual grid shape
    pub fn shape(expected: impl Into<String>, rows: usize, cols: usize) -> Self {
        ConvertError::ShapeMismatch {
            expected: expected.into(),
            got: format!("{rows}x{cols}"),
        }
    }
}
