//! Contiguous-range resolution
//!
//! Given an anchor cell and a direction, computes the bounding rectangle an
//! operation should touch: extend downwards, rightwards, or both
//! ("table") until a blank boundary. Probes are issued strictly in scan
//! order through the [`CellSource`] collaborator; in strict mode the scan is
//! always cell-by-cell so formula cells evaluating to blank count as
//! boundaries, while the non-strict mode may delegate to the host's native
//! jump primitive.

use sheetbridge_core::{CellSource, Rect, ScanAxis};

use crate::error::{ConvertError, ConvertResult};

/// Expansion direction for a resolve request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Extend rows until the first blank below
    Down,
    /// Extend columns until the first blank to the right
    Right,
    /// Extend both ways; the two scans are independent, so an L-shaped
    /// occupied region yields the rectangle bounding the down-scan height
    /// and the right-scan width
    Table,
}

/// Resolve the contiguous range at `anchor` in the given direction.
///
/// An empty anchor cell yields the 1x1 rectangle at the anchor with no
/// scanning. A single occupied cell does not jump across gaps: only the
/// immediate neighbor is checked before any extension happens.
pub fn resolve<S: CellSource + ?Sized>(
    source: &S,
    anchor: (u32, u32),
    direction: Direction,
    strict: bool,
) -> ConvertResult<Rect> {
    let (row, col) = anchor;
    if row == 0 || col == 0 {
        return Err(ConvertError::InvalidAnchor { row, col });
    }

    if source.get_cell(row, col).is_empty() {
        return Ok(Rect::cell(row, col)?);
    }

    let rect = match direction {
        Direction::Down => {
            let row2 = scan_end(source, row, col, ScanAxis::Down, strict);
            Rect::new(row, col, row2, col)?
        }
        Direction::Right => {
            let col2 = scan_end(source, row, col, ScanAxis::Right, strict);
            Rect::new(row, col, row, col2)?
        }
        Direction::Table => {
            let row2 = scan_end(source, row, col, ScanAxis::Down, strict);
            let col2 = scan_end(source, row, col, ScanAxis::Right, strict);
            Rect::new(row, col, row2, col2)?
        }
    };

    tracing::trace!(anchor = ?anchor, ?direction, strict, %rect, "resolved contiguous range");
    Ok(rect)
}

/// Last occupied row (or column) of the contiguous run starting at the
/// anchor. The anchor itself is known to be occupied.
fn scan_end<S: CellSource + ?Sized>(
    source: &S,
    row: u32,
    col: u32,
    axis: ScanAxis,
    strict: bool,
) -> u32 {
    let step = |r: u32, c: u32| match axis {
        ScanAxis::Down => (r + 1, c),
        ScanAxis::Right => (r, c + 1),
    };
    let pick = |r: u32, c: u32| match axis {
        ScanAxis::Down => r,
        ScanAxis::Right => c,
    };

    // Check the immediate neighbor, then the one after, before committing
    // to a full scan or a host jump.
    let (r1, c1) = step(row, col);
    if source.get_cell(r1, c1).is_empty() {
        return pick(row, col);
    }
    let (r2, c2) = step(r1, c1);
    if source.get_cell(r2, c2).is_empty() {
        return pick(r1, c1);
    }

    if strict {
        // Cell-by-cell: stop at the first cell that is empty by value, even
        // if the host's jump would skip past a blank-evaluating formula.
        let (mut r, mut c) = (r2, c2);
        loop {
            let (nr, nc) = step(r, c);
            if source.get_cell(nr, nc).is_empty() {
                return pick(r, c);
            }
            r = nr;
            c = nc;
        }
    } else {
        let (r, c) = source.next_occupied(r1, c1, axis);
        pick(r, c)
    }
}
