//! Tabular value reconstruction and flattening
//!
//! Splits a grid into header rows, index columns, and a data body — and
//! back. Supports multi-level (hierarchical) headers and indices, and named
//! or unnamed index levels.
//!
//! Layout conventions, shared by read and write:
//! - header rows come first (`header_depth` of them), then index-prefixed
//!   body rows;
//! - with two or more header rows, the index-level names sit in the *last*
//!   header row, above the index columns; the header cells above them are
//!   blank;
//! - with one header row and one index column, the single cell above the
//!   index is the index name (blank = unnamed);
//! - with no header rows, column labels are positional integers, and with no
//!   index columns, row labels are positional integers.

use sheetbridge_core::Grid;

use crate::error::{ConvertError, ConvertResult};
use crate::normalize::{read_cell, write_scalar};
use crate::options::ConvertOptions;
use crate::value::{Label, Scalar};

/// A tagged table: data body plus (possibly hierarchical) row and column
/// labels.
///
/// Body cells are restricted to non-error scalars; an error sentinel in the
/// body makes the table unwritable.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    /// Data body, row-major
    pub body: Vec<Vec<Scalar>>,
    /// One label per body column; each label has one element per header level
    pub col_labels: Vec<Label>,
    /// One label per body row; each label has one element per index level
    pub row_labels: Vec<Label>,
    /// Name of each index level (None = unnamed)
    pub index_names: Vec<Option<String>>,
    /// Name of each header level; not representable in the flattened grid
    /// form, so writing drops them and reading yields None per level
    pub col_names: Vec<Option<String>>,
}

impl Table {
    /// Build a table with unnamed index levels inferred from the labels
    pub fn new(body: Vec<Vec<Scalar>>, col_labels: Vec<Label>, row_labels: Vec<Label>) -> Self {
        let index_levels = row_labels.first().map_or(1, Vec::len);
        let header_levels = col_labels.first().map_or(1, Vec::len);
        Table {
            body,
            col_labels,
            row_labels,
            index_names: vec![None; index_levels],
            col_names: vec![None; header_levels],
        }
    }

    /// Number of body rows
    pub fn height(&self) -> usize {
        self.body.len()
    }

    /// Number of body columns
    pub fn width(&self) -> usize {
        self.body.first().map_or(self.col_labels.len(), Vec::len)
    }

    /// Validate structural consistency; returns (header levels, index levels)
    fn levels(&self) -> ConvertResult<(usize, usize)> {
        let header_levels = self.col_labels.first().map_or(1, Vec::len);
        if self.col_labels.iter().any(|l| l.len() != header_levels) {
            return Err(ConvertError::InvalidTable(
                "column labels have mixed depths".into(),
            ));
        }
        if header_levels == 0 {
            return Err(ConvertError::InvalidTable(
                "column labels must have at least one level".into(),
            ));
        }
        let index_levels = self.row_labels.first().map_or(1, Vec::len);
        if self.row_labels.iter().any(|l| l.len() != index_levels) {
            return Err(ConvertError::InvalidTable(
                "row labels have mixed depths".into(),
            ));
        }
        if self.row_labels.len() != self.body.len() {
            return Err(ConvertError::InvalidTable(format!(
                "{} row labels for {} body rows",
                self.row_labels.len(),
                self.body.len()
            )));
        }
        let width = self.col_labels.len();
        if self.body.iter().any(|row| row.len() != width) {
            return Err(ConvertError::InvalidTable(format!(
                "body rows must all have {width} columns to match the column labels"
            )));
        }
        if !self.index_names.is_empty() && self.index_names.len() != index_levels {
            return Err(ConvertError::InvalidTable(format!(
                "{} index names for {} index levels",
                self.index_names.len(),
                index_levels
            )));
        }
        Ok((header_levels, index_levels))
    }
}

fn name_from(scalar: &Scalar) -> Option<String> {
    if scalar.is_none() {
        None
    } else {
        Some(scalar.to_string())
    }
}

/// Reconstruct a table from a grid, splitting off `header_depth` header rows
/// and `index_depth` index columns (defaults: one of each).
pub fn read_table(grid: &Grid, opts: &ConvertOptions) -> ConvertResult<Table> {
    let h = opts.header_depth();
    let i = opts.index_depth();
    let height = grid.height();
    let width = grid.width();

    if height < h || width < i || (h == 0 && height == 0) {
        return Err(ConvertError::shape(
            format!("at least {h} header rows and {i} index columns"),
            height,
            width,
        ));
    }

    let missing = opts.missing_or(Scalar::None);
    let mut cells: Vec<Vec<Scalar>> = Vec::with_capacity(height);
    for (r, row) in grid.rows().iter().enumerate() {
        let mut out = Vec::with_capacity(width);
        for (c, cell) in row.iter().enumerate() {
            out.push(read_cell(cell, r, c, &missing, opts)?);
        }
        cells.push(out);
    }

    let col_labels: Vec<Label> = (i..width)
        .map(|c| {
            if h == 0 {
                vec![Scalar::Int((c - i) as i64)]
            } else {
                (0..h).map(|r| cells[r][c].clone()).collect()
            }
        })
        .collect();

    // Positional row labels still occupy one (unnamed) level
    let index_names: Vec<Option<String>> = if i == 0 || h == 0 {
        vec![None; i.max(1)]
    } else if h == 1 {
        // A single header cell names the index only for a single-level index
        if i == 1 {
            vec![name_from(&cells[0][0])]
        } else {
            vec![None; i]
        }
    } else {
        (0..i).map(|c| name_from(&cells[h - 1][c])).collect()
    };

    let mut row_labels = Vec::with_capacity(height - h);
    let mut body = Vec::with_capacity(height - h);
    for (r, row) in cells.into_iter().enumerate().skip(h) {
        let label = if i == 0 {
            vec![Scalar::Int((r - h) as i64)]
        } else {
            row[..i].to_vec()
        };
        row_labels.push(label);
        body.push(row[i..].to_vec());
    }

    Ok(Table {
        body,
        col_labels,
        row_labels,
        index_names,
        col_names: vec![None; h.max(1)],
    })
}

/// Flatten a table into a grid: header rows first (hierarchical labels
/// top-down), then index-prefixed body rows.
///
/// `opts.header`/`opts.index` act as switches here: a depth of 0 omits the
/// header rows / index columns entirely; any other setting emits the table's
/// own level count.
pub fn write_table(table: &Table, opts: &ConvertOptions) -> ConvertResult<Grid> {
    let (header_levels, index_levels) = table.levels()?;
    let with_header = opts.header.map_or(true, |depth| depth > 0);
    let with_index = opts.index.map_or(true, |depth| depth > 0);

    let mut rows: Vec<Vec<Scalar>> = Vec::new();

    if with_header {
        for level in 0..header_levels {
            let mut row = Vec::new();
            if with_index {
                for li in 0..index_levels {
                    if level == header_levels - 1 {
                        row.push(match table.index_names.get(li) {
                            Some(Some(name)) => Scalar::Text(name.clone()),
                            _ => Scalar::None,
                        });
                    } else {
                        row.push(Scalar::None);
                    }
                }
            }
            for label in &table.col_labels {
                row.push(label[level].clone());
            }
            rows.push(row);
        }
    }

    for (r, body_row) in table.body.iter().enumerate() {
        let mut row = Vec::new();
        if with_index {
            row.extend(table.row_labels[r].iter().cloned());
        }
        row.extend(body_row.iter().cloned());
        rows.push(row);
    }

    let mut out = Vec::with_capacity(rows.len());
    for (r, row) in rows.iter().enumerate() {
        let mut cells = Vec::with_capacity(row.len());
        for (c, scalar) in row.iter().enumerate() {
            cells.push(write_scalar(scalar, r, c)?);
        }
        out.push(cells);
    }
    Ok(Grid::from_rows(out))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sheetbridge_core::Cell;

    fn n(v: f64) -> Scalar {
        Scalar::Number(v)
    }

    fn t(s: &str) -> Scalar {
        Scalar::Text(s.into())
    }

    fn grid(rows: Vec<Vec<Cell>>) -> Grid {
        Grid::from_rows(rows)
    }

    /// Two header rows, one index column, hierarchical column labels.
    fn two_level_grid() -> Grid {
        grid(vec![
            vec![
                Cell::Empty,
                Cell::from("a"),
                Cell::from("a"),
                Cell::from("b"),
            ],
            vec![
                Cell::from("ix1"),
                Cell::from("c"),
                Cell::from("d"),
                Cell::from("c"),
            ],
            vec![
                Cell::from(1.0),
                Cell::from(1.0),
                Cell::from(2.0),
                Cell::from(3.0),
            ],
            vec![
                Cell::from(2.0),
                Cell::from(4.0),
                Cell::from(5.0),
                Cell::from(6.0),
            ],
        ])
    }

    #[test]
    fn hierarchical_headers_with_named_index() {
        let opts = ConvertOptions::new().with_header_depth(2).with_index_depth(1);
        let table = read_table(&two_level_grid(), &opts).unwrap();

        assert_eq!(
            table.col_labels,
            vec![
                vec![t("a"), t("c")],
                vec![t("a"), t("d")],
                vec![t("b"), t("c")],
            ]
        );
        assert_eq!(table.index_names, vec![Some("ix1".to_string())]);
        assert_eq!(table.row_labels, vec![vec![n(1.0)], vec![n(2.0)]]);
        assert_eq!(
            table.body,
            vec![vec![n(1.0), n(2.0), n(3.0)], vec![n(4.0), n(5.0), n(6.0)]]
        );
    }

    #[test]
    fn two_level_roundtrip() {
        let opts = ConvertOptions::new().with_header_depth(2).with_index_depth(1);
        let table = read_table(&two_level_grid(), &opts).unwrap();
        let written = write_table(&table, &opts).unwrap();
        assert_eq!(written, two_level_grid());
        assert_eq!(read_table(&written, &opts).unwrap(), table);
    }

    #[test]
    fn single_header_names_single_index_only() {
        let g = grid(vec![
            vec![Cell::from("id"), Cell::from("x")],
            vec![Cell::from(1.0), Cell::from(10.0)],
        ]);
        let opts = ConvertOptions::new();
        let table = read_table(&g, &opts).unwrap();
        assert_eq!(table.index_names, vec![Some("id".to_string())]);
        assert_eq!(table.col_labels, vec![vec![t("x")]]);

        // With a two-level index, a single header row names nothing
        let g2 = grid(vec![
            vec![Cell::from("id"), Cell::from("sub"), Cell::from("x")],
            vec![Cell::from(1.0), Cell::from(2.0), Cell::from(10.0)],
        ]);
        let opts2 = ConvertOptions::new().with_index_depth(2);
        let table2 = read_table(&g2, &opts2).unwrap();
        assert_eq!(table2.index_names, vec![None, None]);
    }

    #[test]
    fn headerless_labels_are_positional() {
        let g = grid(vec![
            vec![Cell::from(10.0), Cell::from(20.0)],
            vec![Cell::from(30.0), Cell::from(40.0)],
        ]);
        let opts = ConvertOptions::new().with_header_depth(0).with_index_depth(0);
        let table = read_table(&g, &opts).unwrap();
        assert_eq!(table.col_labels, vec![vec![Scalar::Int(0)], vec![Scalar::Int(1)]]);
        assert_eq!(table.row_labels, vec![vec![Scalar::Int(0)], vec![Scalar::Int(1)]]);
        assert_eq!(
            table.body,
            vec![vec![n(10.0), n(20.0)], vec![n(30.0), n(40.0)]]
        );
    }

    #[test]
    fn unnamed_index_writes_blank_header_cell() {
        let mut table = Table::new(
            vec![vec![n(1.0)], vec![n(2.0)]],
            vec![vec![t("x")]],
            vec![vec![n(10.0)], vec![n(20.0)]],
        );
        let opts = ConvertOptions::new();
        let written = write_table(&table, &opts).unwrap();
        assert_eq!(written[(0, 0)], Cell::Empty);

        table.index_names = vec![Some("key".into())];
        let named = write_table(&table, &opts).unwrap();
        assert_eq!(named[(0, 0)], Cell::from("key"));
    }

    #[test]
    fn empty_body_cell_reads_as_missing() {
        let g = grid(vec![
            vec![Cell::from("k"), Cell::from("x")],
            vec![Cell::from(1.0), Cell::Empty],
        ]);
        let table = read_table(&g, &ConvertOptions::new()).unwrap();
        assert_eq!(table.body, vec![vec![Scalar::None]]);
    }

    #[test]
    fn mixed_label_depths_are_rejected() {
        let table = Table {
            body: vec![vec![n(1.0), n(2.0)]],
            col_labels: vec![vec![t("a")], vec![t("b"), t("c")]],
            row_labels: vec![vec![n(0.0)]],
            index_names: vec![None],
            col_names: vec![None],
        };
        let err = write_table(&table, &ConvertOptions::new()).unwrap_err();
        assert!(matches!(err, ConvertError::InvalidTable(_)));
    }

    #[test]
    fn undersized_grid_is_a_shape_mismatch() {
        let g = grid(vec![vec![Cell::from("only")]]);
        let opts = ConvertOptions::new().with_header_depth(2).with_index_depth(1);
        let err = read_table(&g, &opts).unwrap_err();
        assert!(matches!(err, ConvertError::ShapeMismatch { .. }));
    }
}
