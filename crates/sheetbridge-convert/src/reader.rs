//! Grid-to-value reconstruction
//!
//! Dispatches on an explicit [`TargetKind`] tag. A transpose, when
//! requested, is applied to the grid before any target-specific handling so
//! every converter only ever sees row-major data.

use sheetbridge_core::Grid;

use crate::error::{ConvertError, ConvertResult};
use crate::normalize::read_cell;
use crate::options::{ConvertOptions, Ndim};
use crate::table::read_table;
use crate::value::{Scalar, Value};

/// What a grid should be reconstructed into.
///
/// Supplied explicitly by the caller; the grid itself carries no type
/// information to infer from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    /// A single scalar from a 1x1 grid
    Scalar,
    /// Dimension-squeezing list read: 1x1 squeezes to a scalar, a single
    /// row or column to a flat list, anything else stays a matrix. The
    /// `ndim` option overrides the squeeze.
    List,
    /// Always a 2-dimensional matrix, with NaN as the default missing token
    Matrix,
    /// Two-column mapping with unique keys
    Map,
    /// Tagged table with headers and indices
    Table,
}

/// Reconstruct a typed value from a grid.
pub fn read(kind: TargetKind, grid: &Grid, opts: &ConvertOptions) -> ConvertResult<Value> {
    let transposed;
    let grid = if opts.transpose {
        transposed = grid.transposed();
        &transposed
    } else {
        grid
    };

    tracing::trace!(?kind, rows = grid.height(), cols = grid.width(), "reading grid");
    match kind {
        TargetKind::Scalar => read_scalar(grid, opts),
        TargetKind::List => read_list(grid, opts),
        TargetKind::Matrix => read_matrix(grid, opts),
        TargetKind::Map => read_map(grid, opts),
        TargetKind::Table => read_table(grid, opts).map(Value::Table),
    }
}

fn read_scalar(grid: &Grid, opts: &ConvertOptions) -> ConvertResult<Value> {
    if grid.height() != 1 || grid.width() != 1 {
        return Err(ConvertError::shape("1x1", grid.height(), grid.width()));
    }
    let missing = opts.missing_or(Scalar::None);
    Ok(Value::Scalar(read_cell(
        &grid[(0, 0)],
        0,
        0,
        &missing,
        opts,
    )?))
}

fn read_all(grid: &Grid, missing: &Scalar, opts: &ConvertOptions) -> ConvertResult<Vec<Vec<Scalar>>> {
    let mut rows = Vec::with_capacity(grid.height());
    for (r, row) in grid.rows().iter().enumerate() {
        let mut out = Vec::with_capacity(row.len());
        for (c, cell) in row.iter().enumerate() {
            out.push(read_cell(cell, r, c, missing, opts)?);
        }
        rows.push(out);
    }
    Ok(rows)
}

fn read_list(grid: &Grid, opts: &ConvertOptions) -> ConvertResult<Value> {
    let missing = opts.missing_or(Scalar::None);
    let (h, w) = (grid.height(), grid.width());
    let mut rows = read_all(grid, &missing, opts)?;

    match opts.ndim {
        None => Ok(if h == 0 {
            Value::List(Vec::new())
        } else if h == 1 && w == 1 {
            Value::Scalar(rows.remove(0).remove(0))
        } else if h == 1 {
            Value::List(rows.remove(0))
        } else if w == 1 {
            Value::List(rows.into_iter().map(|mut r| r.remove(0)).collect())
        } else {
            Value::Matrix(rows)
        }),
        Some(Ndim::One) => {
            if h == 1 {
                Ok(Value::List(rows.remove(0)))
            } else if w == 1 {
                Ok(Value::List(rows.into_iter().map(|mut r| r.remove(0)).collect()))
            } else {
                Err(ConvertError::shape("a single row or column", h, w))
            }
        }
        Some(Ndim::Two) => Ok(Value::Matrix(rows)),
    }
}

fn read_matrix(grid: &Grid, opts: &ConvertOptions) -> ConvertResult<Value> {
    // Numeric matrices default to NaN for empties so the shape stays dense
    let missing = opts.missing_or(Scalar::Number(f64::NAN));
    Ok(Value::Matrix(read_all(grid, &missing, opts)?))
}

fn read_map(grid: &Grid, opts: &ConvertOptions) -> ConvertResult<Value> {
    if grid.width() != 2 {
        return Err(ConvertError::shape(
            "a two-column grid",
            grid.height(),
            grid.width(),
        ));
    }
    let missing = opts.missing_or(Scalar::None);
    let rows = read_all(grid, &missing, opts)?;
    let mut pairs: Vec<(Scalar, Scalar)> = Vec::with_capacity(rows.len());
    for mut row in rows {
        let value = row.remove(1);
        let key = row.remove(0);
        if pairs.iter().any(|(k, _)| *k == key) {
            return Err(ConvertError::DuplicateKey {
                key: key.to_string(),
            });
        }
        pairs.push((key, value));
    }
    Ok(Value::Map(pairs))
}
