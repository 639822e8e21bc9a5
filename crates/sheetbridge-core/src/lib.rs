//! # sheetbridge-core
//!
//! Core data structures for the sheetbridge conversion engine.
//!
//! This crate provides the fundamental types used throughout sheetbridge:
//! - [`Cell`] - A raw spreadsheet cell value (number, text, boolean, date/time,
//!   empty, or one of the closed set of error sentinels)
//! - [`Grid`] - A rectangular, row-major container of cells
//! - [`Rect`] - A 1-based, inclusive rectangle of sheet coordinates
//! - [`CellSource`] and [`CellSink`] - The narrow collaborator contract through
//!   which a live document layer exposes its cells to the engine
//!
//! ## Example
//!
//! ```rust
//! use sheetbridge_core::{Cell, Grid};
//!
//! let grid = Grid::from_rows(vec![
//!     vec![Cell::from("name"), Cell::from("score")],
//!     vec![Cell::from("ada"), Cell::from(42.0)],
//! ]);
//! assert_eq!(grid.height(), 2);
//! assert_eq!(grid.width(), 2);
//! ```

pub mod cell;
pub mod error;
pub mod grid;
pub mod rect;
pub mod source;

// Re-exports for convenience
pub use cell::{Cell, CellErrorKind};
pub use error::{Error, Result};
pub use grid::Grid;
pub use rect::Rect;
pub use source::{CellSink, CellSource, MemorySheet, ScanAxis};
