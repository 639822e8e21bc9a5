//! Rectangle of sheet coordinates

use crate::error::{Error, Result};

/// A rectangle of sheet coordinates, 1-based and inclusive on both ends.
///
/// Invariant: `row1 <= row2` and `col1 <= col2`, all coordinates >= 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub row1: u32,
    pub col1: u32,
    pub row2: u32,
    pub col2: u32,
}

impl Rect {
    /// Create a rectangle, validating ordering and 1-based coordinates
    pub fn new(row1: u32, col1: u32, row2: u32, col2: u32) -> Result<Self> {
        if row1 == 0 || col1 == 0 || row1 > row2 || col1 > col2 {
            return Err(Error::InvalidRect {
                row1,
                col1,
                row2,
                col2,
            });
        }
        Ok(Rect {
            row1,
            col1,
            row2,
            col2,
        })
    }

    /// A 1x1 rectangle at the given cell
    pub fn cell(row: u32, col: u32) -> Result<Self> {
        Rect::new(row, col, row, col)
    }

    /// Number of columns
    pub fn width(&self) -> u32 {
        self.col2 - self.col1 + 1
    }

    /// Number of rows
    pub fn height(&self) -> u32 {
        self.row2 - self.row1 + 1
    }

    /// Total number of cells
    pub fn cell_count(&self) -> u64 {
        self.width() as u64 * self.height() as u64
    }

    /// Whether `other` lies entirely within this rectangle
    pub fn contains(&self, other: &Rect) -> bool {
        self.row1 <= other.row1
            && self.col1 <= other.col1
            && self.row2 >= other.row2
            && self.col2 >= other.col2
    }

    /// The smallest rectangle covering both `self` and `other`
    pub fn bounding(&self, other: &Rect) -> Rect {
        Rect {
            row1: self.row1.min(other.row1),
            col1: self.col1.min(other.col1),
            row2: self.row2.max(other.row2),
            col2: self.col2.max(other.col2),
        }
    }
}

impl std::fmt::Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({},{})..({},{})",
            self.row1, self.col1, self.row2, self.col2
        )
    }
}
