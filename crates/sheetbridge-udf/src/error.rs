//! Binding and dispatch error types

use sheetbridge_convert::ConvertError;
use thiserror::Error;

/// Result type for binding and dispatch operations
pub type UdfResult<T> = std::result::Result<T, UdfError>;

/// Errors that can occur while binding a call request to a registered
/// function or dispatching it.
#[derive(Debug, Error)]
pub enum UdfError {
    /// The declared signature is internally inconsistent
    #[error("Invalid signature for {name}: {reason}")]
    InvalidSignature { name: String, reason: String },

    /// No function registered under this name
    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    /// Caller and host speak different protocol versions; checked before
    /// any argument is touched
    #[error("Protocol version mismatch: caller sent {caller}, host expects {host}")]
    VersionMismatch { caller: String, host: String },

    /// Argument count cannot be reconciled with the signature
    #[error("{name} takes {expected} argument(s), got {got}")]
    ArityMismatch {
        name: String,
        expected: String,
        got: usize,
    },

    /// Argument or result conversion failed
    #[error(transparent)]
    Convert(#[from] ConvertError),
}
