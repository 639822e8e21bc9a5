//! # sheetbridge-udf
//!
//! Binding and dispatch of user-defined functions against grid-shaped
//! arguments.
//!
//! A host registers functions on an owned [`FnRegistry`], each described by
//! a [`FnMetadata`] signature: named parameters with per-parameter
//! conversion targets, options, defaults and an optional trailing variadic
//! parameter. An incoming [`CallRequest`] carries raw argument grids;
//! [`bind`] validates the protocol version and signature, reconciles
//! arity, converts each argument, and [`invoke`] (or [`invoke_streaming`]
//! for long-running bodies) produces the result grid.
//!
//! Failures inside a function body never propagate as errors to the host;
//! they surface as a 1x1 `ERROR: ...` grid so the calling sheet displays
//! the message.

pub mod bind;
pub mod call;
pub mod descriptor;
pub mod error;
pub mod registry;
pub mod stream;

// Re-exports for convenience
pub use bind::{bind, BoundCall};
pub use call::{error_grid, invoke};
pub use descriptor::{FnDescriptor, FnMetadata, ParamSpec};
pub use error::{UdfError, UdfResult};
pub use registry::{CallRequest, FnBody, FnRegistry, RegisteredFn, StreamFuture, PROTOCOL_VERSION};
pub use stream::{invoke_streaming, StreamEmitter, StreamingCall};
