//! # sheetbridge
//!
//! Conversion between spreadsheet grids and typed values, with shape
//! negotiation at the grid boundary.
//!
//! A host (a COM bridge, a remote add-in protocol, or the in-memory sheet
//! used here) hands over rectangular [`Grid`]s of cell values; sheetbridge
//! reconstructs typed values from them, flattens typed values back, resolves
//! which rectangle of a live sheet an operation should touch, and binds
//! incoming function calls against declared signatures.
//!
//! ## Reading and writing values
//!
//! ```rust
//! use sheetbridge::prelude::*;
//!
//! let mut sheet = MemorySheet::new();
//! let value = Value::List(vec![Scalar::from(1.0), Scalar::from(2.0)]);
//!
//! // Place the value on the sheet, then read it back
//! let rect = write_to(&value, &mut sheet, (1, 1), &ConvertOptions::new()).unwrap();
//! let grid = sheet.read_rect(&rect);
//! let back = read(TargetKind::List, &grid, &ConvertOptions::new()).unwrap();
//! assert_eq!(back, value);
//! ```
//!
//! ## Tables
//!
//! ```rust
//! use sheetbridge::prelude::*;
//! use sheetbridge::Cell;
//!
//! let grid = Grid::from_rows(vec![
//!     vec![Cell::from("id"), Cell::from("score")],
//!     vec![Cell::from(1.0), Cell::from(9.5)],
//!     vec![Cell::from(2.0), Cell::from(7.0)],
//! ]);
//! let value = read(TargetKind::Table, &grid, &ConvertOptions::new()).unwrap();
//! let table = value.as_table().unwrap();
//! assert_eq!(table.index_names, vec![Some("id".to_string())]);
//! assert_eq!(table.body.len(), 2);
//! ```

pub mod prelude;

// Re-export core types
pub use sheetbridge_core::{
    Cell, CellErrorKind, CellSink, CellSource, Grid, MemorySheet, Rect, ScanAxis,
};

// Re-export conversion types
pub use sheetbridge_convert::{
    read, resolve, write, write_to, ConvertError, ConvertOptions, ConvertResult, Direction,
    ErrorMode, Label, Ndim, NumberMode, ParseDates, Scalar, Table, TargetKind, Value,
};

// Re-export function binding types
pub use sheetbridge_udf::{
    bind, error_grid, invoke, invoke_streaming, BoundCall, CallRequest, FnBody, FnDescriptor,
    FnMetadata, FnRegistry, ParamSpec, RegisteredFn, StreamEmitter, StreamFuture, StreamingCall,
    UdfError, UdfResult, PROTOCOL_VERSION,
};
