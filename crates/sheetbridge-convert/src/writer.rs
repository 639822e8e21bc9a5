//! Value-to-grid flattening and sheet placement
//!
//! [`write`] flattens a typed value into a grid; [`write_to`] additionally
//! places that grid on a sheet at an anchor, growing the sheet and clearing
//! stale cells when the destination already holds a smaller or larger
//! region.

use sheetbridge_core::{Cell, CellSink, Grid, Rect};

use crate::error::{ConvertError, ConvertResult};
use crate::normalize::write_scalar;
use crate::options::ConvertOptions;
use crate::resolve::{resolve, Direction};
use crate::table::write_table;
use crate::value::{Scalar, Value};

/// Flatten a typed value into a grid.
///
/// Scalars become 1x1 grids, flat lists a single row, mappings a two-column
/// grid in insertion order. A transpose, when requested, is applied after
/// flattening.
pub fn write(value: &Value, opts: &ConvertOptions) -> ConvertResult<Grid> {
    let grid = match value {
        Value::Scalar(s) => cells_from(&[vec![s.clone()]])?,
        Value::List(xs) => cells_from(std::slice::from_ref(xs))?,
        Value::Matrix(rows) => cells_from(rows)?,
        Value::Map(pairs) => {
            let rows: Vec<Vec<Scalar>> = pairs
                .iter()
                .map(|(k, v)| vec![k.clone(), v.clone()])
                .collect();
            cells_from(&rows)?
        }
        Value::Table(table) => write_table(table, opts)?,
    };
    Ok(if opts.transpose {
        grid.transposed()
    } else {
        grid
    })
}

fn cells_from(rows: &[Vec<Scalar>]) -> ConvertResult<Grid> {
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

/// Write a value to a sheet at `anchor`, replacing whatever contiguous
/// region currently starts there.
///
/// When the new grid is taller than the occupied region, rows are inserted
/// below it first so content underneath shifts down instead of being
/// overwritten; the inserted rows take their formatting from the row
/// immediately above the insertion point. When the new grid is smaller,
/// the leftover cells of the old region are cleared. Returns the rectangle
/// actually written.
pub fn write_to<S: CellSink + ?Sized>(
    value: &Value,
    sink: &mut S,
    anchor: (u32, u32),
    opts: &ConvertOptions,
) -> ConvertResult<Rect> {
    let (row, col) = anchor;
    if row == 0 || col == 0 {
        return Err(ConvertError::InvalidAnchor { row, col });
    }

    let grid = write(value, opts)?;
    if grid.height() == 0 || grid.width() == 0 {
        return Ok(Rect::cell(row, col)?);
    }

    let occupied = resolve(sink, anchor, Direction::Table, opts.strict_expand)?;
    let height = grid.height() as u32;
    let width = grid.width() as u32;
    let target = Rect::new(row, col, row + height - 1, col + width - 1)?;

    if height > occupied.height() {
        let extra = height - occupied.height();
        let insert_at = occupied.row2 + 1;
        let inserted = Rect::new(insert_at, col, insert_at + extra - 1, col + width - 1)?;
        sink.insert_rows(&inserted)?;
        let above = Rect::new(occupied.row2, col, occupied.row2, col + width - 1)?;
        sink.copy_formatting(&above, &inserted)?;
        tracing::debug!(rows = extra, at = insert_at, "inserted rows below occupied region");
    }

    // Clear whatever the old region covered beyond the new grid
    let union = occupied.bounding(&target);
    if union != target {
        let blank = Grid::from_rows(vec![
            vec![Cell::Empty; union.width() as usize];
            union.height() as usize
        ]);
        sink.set_rect(&union, &blank)?;
    }

    sink.set_rect(&target, &grid)?;
    tracing::debug!(%target, "wrote value");
    Ok(target)
}
