//! Rectangular grid of cells
//!
//! A [`Grid`] is the unit of exchange at the document boundary: reads hand
//! the engine a grid, writes produce one. Construction tolerates jagged
//! input; rows are padded with [`Cell::Empty`] so a materialized grid is
//! always rectangular.

use crate::cell::Cell;

/// A rectangular, row-major container of heterogeneous cell values.
///
/// Pure data, no behavior beyond shape bookkeeping.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    rows: Vec<Vec<Cell>>,
}

impl Grid {
    /// Build a grid from rows, padding short rows with empty cells so the
    /// result is rectangular.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, Cell::Empty);
                row
            })
            .collect();
        Grid { rows }
    }

    /// A 1x1 grid holding a single cell
    pub fn single(cell: Cell) -> Self {
        Grid {
            rows: vec![vec![cell]],
        }
    }

    /// An empty (0x0) grid
    pub fn empty() -> Self {
        Grid { rows: Vec::new() }
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// Whether the grid holds no cells at all
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get a cell by 0-based position
    pub fn get(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// The rows of the grid
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Consume the grid, returning its rows
    pub fn into_rows(self) -> Vec<Vec<Cell>> {
        self.rows
    }

    /// Iterate over all cells row-major with their 0-based positions
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, &Cell)> {
        self.rows
            .iter()
            .enumerate()
            .flat_map(|(r, row)| row.iter().enumerate().map(move |(c, cell)| (r, c, cell)))
    }

    /// A new grid with rows and columns swapped
    pub fn transposed(&self) -> Grid {
        let width = self.width();
        let rows = (0..width)
            .map(|c| self.rows.iter().map(|row| row[c].clone()).collect())
            .collect();
        Grid { rows }
    }
}

impl From<Vec<Vec<Cell>>> for Grid {
    fn from(rows: Vec<Vec<Cell>>) -> Self {
        Grid::from_rows(rows)
    }
}

impl std::ops::Index<(usize, usize)> for Grid {
    type Output = Cell;

    fn index(&self, (row, col): (usize, usize)) -> &Cell {
        &self.rows[row][col]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn jagged_rows_are_padded() {
        let g = Grid::from_rows(vec![
            vec![Cell::from(1.0), Cell::from(2.0), Cell::from(3.0)],
            vec![Cell::from(4.0)],
        ]);
        assert_eq!(g.width(), 3);
        assert_eq!(g[(1, 1)], Cell::Empty);
        assert_eq!(g[(1, 2)], Cell::Empty);
    }

    #[test]
    fn transpose_swaps_shape() {
        let g = Grid::from_rows(vec![
            vec![Cell::from(1.0), Cell::from(2.0)],
            vec![Cell::from(3.0), Cell::from(4.0)],
            vec![Cell::from(5.0), Cell::from(6.0)],
        ]);
        let t = g.transposed();
        assert_eq!((t.height(), t.width()), (2, 3));
        assert_eq!(t[(1, 2)], Cell::from(6.0));
        assert_eq!(t.transposed(), g);
    }

    #[test]
    fn empty_grid_has_zero_shape() {
        let g = Grid::empty();
        assert_eq!((g.height(), g.width()), (0, 0));
        assert!(g.get(0, 0).is_none());
    }
}
