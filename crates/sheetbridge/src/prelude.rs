//! Prelude module - common imports for sheetbridge users
//!
//! ```rust
//! use sheetbridge::prelude::*;
//! ```

pub use crate::{
    // Binding types
    bind,
    invoke,
    invoke_streaming,
    // Conversion entry points
    read,
    resolve,
    write,
    write_to,
    CallRequest,
    // Collaborator traits
    CellSink,
    CellSource,
    ConvertError,
    ConvertOptions,
    Direction,
    FnBody,
    FnMetadata,
    FnRegistry,
    // Grid types
    Grid,
    MemorySheet,
    Ndim,
    ParamSpec,
    Rect,
    // Value types
    Scalar,
    Table,
    TargetKind,
    UdfError,
    Value,
};
