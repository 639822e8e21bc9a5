//! # sheetbridge-convert
//!
//! The converter pipeline and shape-negotiation half of sheetbridge.
//!
//! Given a raw rectangular [`Grid`](sheetbridge_core::Grid) of cell values
//! and a declarative [`ConvertOptions`] set, [`read`] reconstructs a typed
//! [`Value`] and [`write`] flattens one back into a grid. The
//! [`resolve`](resolve::resolve) function determines which rectangular
//! sub-grid of a sheet an operation should touch (single cell, declared
//! rectangle, or expand-until-blank in one or two directions).
//!
//! Dispatch is driven by an explicit [`TargetKind`] tag supplied by the
//! caller; the grid itself carries no type information to infer from.

pub mod error;
pub mod normalize;
pub mod options;
pub mod reader;
pub mod resolve;
pub mod table;
pub mod value;
pub mod writer;

// Re-exports for convenience
pub use error::{ConvertError, ConvertResult};
pub use options::{ConvertOptions, ErrorMode, Ndim, NumberMode, ParseDates};
pub use reader::{read, TargetKind};
pub use resolve::{resolve, Direction};
pub use table::Table;
pub use value::{Label, Scalar, Value};
pub use writer::{write, write_to};
