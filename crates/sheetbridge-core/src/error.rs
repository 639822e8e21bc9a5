//! Error types for sheetbridge-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in sheetbridge-core
#[derive(Debug, Error)]
pub enum Error {
    /// Rectangle coordinates are zero or unordered
    #[error("Invalid rectangle: ({row1},{col1})..({row2},{col2}) must be 1-based and ordered")]
    InvalidRect {
        row1: u32,
        col1: u32,
        row2: u32,
        col2: u32,
    },

    /// Unknown error-sentinel literal
    #[error("Unknown cell error code: {0}")]
    UnknownErrorCode(String),

    /// A grid shape did not match what an operation required
    #[error("Grid is {rows}x{cols}, but the operation requires {required}")]
    GridShape {
        rows: usize,
        cols: usize,
        required: &'static str,
    },
}
