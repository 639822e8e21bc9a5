//! Collaborator contract for live cell documents
//!
//! The engine never owns a sheet. It reads and writes cells through the
//! narrow traits below, implemented by whatever document layer hosts the
//! grid (a COM bridge, a remote protocol, or the in-memory [`MemorySheet`]
//! used in tests and pure-grid conversions). Every call takes its source or
//! sink explicitly; there is no ambient "current workbook".

use std::collections::BTreeMap;

use crate::cell::Cell;
use crate::error::{Error, Result};
use crate::grid::Grid;
use crate::rect::Rect;

/// Scan axis for the host's "jump to next occupied" primitive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanAxis {
    Down,
    Right,
}

/// Read access to a live sheet.
///
/// Probes are issued strictly in scan order; the engine never issues
/// overlapping concurrent probes for a single resolve call.
pub trait CellSource {
    /// The value of the cell at a 1-based coordinate. Out-of-range
    /// coordinates read as [`Cell::Empty`].
    fn get_cell(&self, row: u32, col: u32) -> Cell;

    /// From an occupied cell, the last occupied cell before the next blank
    /// in the given axis (the host's native jump, e.g. Ctrl+Down).
    ///
    /// The default implementation scans cell-by-cell; hosts with a native
    /// jump primitive may override. Native jumps may treat formula cells
    /// that evaluate to blank as occupied — callers needing exact
    /// by-value boundaries use the resolver's strict mode, which never
    /// calls this.
    fn next_occupied(&self, row: u32, col: u32, axis: ScanAxis) -> (u32, u32) {
        let (mut r, mut c) = (row, col);
        loop {
            let (nr, nc) = match axis {
                ScanAxis::Down => (r + 1, c),
                ScanAxis::Right => (r, c + 1),
            };
            if self.get_cell(nr, nc).is_empty() {
                return (r, c);
            }
            r = nr;
            c = nc;
        }
    }
}

/// Write access to a live sheet.
pub trait CellSink: CellSource {
    /// Write a grid of values over the given rectangle. The rectangle's
    /// shape must match the grid's.
    fn set_rect(&mut self, rect: &Rect, grid: &Grid) -> Result<()>;

    /// Insert blank rows covering `rect`, shifting the previous occupants of
    /// those rows (and everything below them, within the rectangle's column
    /// span) downwards.
    fn insert_rows(&mut self, rect: &Rect) -> Result<()>;

    /// Copy cell formatting from `src` onto `dst`, tiling `src` if `dst` is
    /// larger. Values are untouched.
    fn copy_formatting(&mut self, src: &Rect, dst: &Rect) -> Result<()>;
}

/// In-memory sheet backed by sparse cell storage.
///
/// Only non-empty cells are stored, keyed by (row, col) in a BTreeMap for
/// ordered iteration. Formatting is modeled as an opaque per-cell format
/// index so tests can observe the copy-on-insert policy.
#[derive(Debug, Clone, Default)]
pub struct MemorySheet {
    cells: BTreeMap<(u32, u32), Cell>,
    formats: BTreeMap<(u32, u32), u32>,
}

impl MemorySheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a sheet with a grid placed at the given 1-based anchor
    pub fn with_grid(row: u32, col: u32, grid: &Grid) -> Self {
        let mut sheet = Self::new();
        for (r, c, cell) in grid.cells() {
            sheet.set_cell(row + r as u32, col + c as u32, cell.clone());
        }
        sheet
    }

    /// Set a single cell value
    pub fn set_cell(&mut self, row: u32, col: u32, cell: Cell) {
        if cell.is_empty() {
            self.cells.remove(&(row, col));
        } else {
            self.cells.insert((row, col), cell);
        }
    }

    /// Assign an opaque format index to a cell
    pub fn set_format(&mut self, row: u32, col: u32, format: u32) {
        if format == 0 {
            self.formats.remove(&(row, col));
        } else {
            self.formats.insert((row, col), format);
        }
    }

    /// The format index of a cell (0 = default)
    pub fn format(&self, row: u32, col: u32) -> u32 {
        self.formats.get(&(row, col)).copied().unwrap_or(0)
    }

    /// Read a rectangle out as a grid
    pub fn read_rect(&self, rect: &Rect) -> Grid {
        let rows = (rect.row1..=rect.row2)
            .map(|r| {
                (rect.col1..=rect.col2)
                    .map(|c| self.get_cell(r, c))
                    .collect()
            })
            .collect();
        Grid::from_rows(rows)
    }

    fn shift_down<V: Clone>(
        map: &mut BTreeMap<(u32, u32), V>,
        from_row: u32,
        cols: (u32, u32),
        by: u32,
    ) {
        let moved: Vec<((u32, u32), V)> = map
            .range((from_row, 0)..)
            .filter(|((_, c), _)| *c >= cols.0 && *c <= cols.1)
            .map(|(k, v)| (*k, v.clone()))
            .collect();
        for (k, _) in &moved {
            map.remove(k);
        }
        for ((r, c), v) in moved {
            map.insert((r + by, c), v);
        }
    }
}

impl CellSource for MemorySheet {
    fn get_cell(&self, row: u32, col: u32) -> Cell {
        self.cells.get(&(row, col)).cloned().unwrap_or(Cell::Empty)
    }
}

impl CellSink for MemorySheet {
    fn set_rect(&mut self, rect: &Rect, grid: &Grid) -> Result<()> {
        if rect.height() as usize != grid.height() || rect.width() as usize != grid.width() {
            return Err(Error::GridShape {
                rows: grid.height(),
                cols: grid.width(),
                required: "a grid matching the target rectangle",
            });
        }
        for (r, c, cell) in grid.cells() {
            self.set_cell(rect.row1 + r as u32, rect.col1 + c as u32, cell.clone());
        }
        Ok(())
    }

    fn insert_rows(&mut self, rect: &Rect) -> Result<()> {
        let by = rect.height();
        Self::shift_down(&mut self.cells, rect.row1, (rect.col1, rect.col2), by);
        Self::shift_down(&mut self.formats, rect.row1, (rect.col1, rect.col2), by);
        Ok(())
    }

    fn copy_formatting(&mut self, src: &Rect, dst: &Rect) -> Result<()> {
        for r in dst.row1..=dst.row2 {
            for c in dst.col1..=dst.col2 {
                let sr = src.row1 + (r - dst.row1) % src.height();
                let sc = src.col1 + (c - dst.col1) % src.width();
                let format = self.format(sr, sc);
                self.set_format(r, c, format);
            }
        }
        Ok(())
    }
}
