//! Scalar and temporal normalization across the read/write boundary
//!
//! Canonicalizes date/time representations and missing-value sentinels:
//! empty cells become the configured missing token (never `0`, never an
//! empty string), error sentinels become either the missing token or their
//! literal error-code string, and temporal values stay timezone-naive on
//! both sides. Zone-aware ISO text is normalized to its UTC equivalent
//! before the offset is dropped, never silently truncated.

use chrono::NaiveDateTime;
use lazy_regex::regex_is_match;
use sheetbridge_core::Cell;

use crate::error::{ConvertError, ConvertResult};
use crate::options::{ConvertOptions, ErrorMode, NumberMode};
use crate::value::Scalar;

/// Recognize an ISO-8601 date/time string, with optional fraction and
/// optional zone designator.
fn is_iso_datetime(s: &str) -> bool {
    regex_is_match!(
        r"^(-?(?:[1-9][0-9]*)?[0-9]{4})-(1[0-2]|0[1-9])-(3[01]|0[1-9]|[12][0-9])T(2[0-3]|[01][0-9]):([0-5][0-9]):([0-5][0-9])(\.[0-9]+)?(Z|[+-](?:2[0-3]|[01][0-9]):[0-5][0-9])?$",
        s
    )
}

/// Parse an ISO-8601 date/time into a naive timestamp. Zone-aware input is
/// converted to UTC first, then the offset is dropped.
pub(crate) fn parse_iso_datetime(s: &str) -> Option<NaiveDateTime> {
    if !is_iso_datetime(s) {
        return None;
    }
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f").ok()
}

/// Normalize a single cell into a scalar on read.
///
/// `missing` is the effective missing token for the target being read;
/// `col` is the cell's 0-based column within the grid, used for
/// `parse_dates` column selection and error context.
pub fn read_cell(
    cell: &Cell,
    row: usize,
    col: usize,
    missing: &Scalar,
    opts: &ConvertOptions,
) -> ConvertResult<Scalar> {
    let scalar = match cell {
        Cell::Empty => missing.clone(),
        Cell::Bool(b) => Scalar::Bool(*b),
        Cell::Number(n) => match opts.numbers {
            NumberMode::Float => Scalar::Number(*n),
            NumberMode::Int => Scalar::Int(n.round() as i64),
        },
        Cell::Text(s) => {
            if opts.parse_dates.applies_to(col) && is_iso_datetime(s) {
                let dt = parse_iso_datetime(s).ok_or_else(|| ConvertError::Conversion {
                    row,
                    col,
                    message: format!("unparseable date/time text {s:?}"),
                })?;
                Scalar::DateTime(dt)
            } else {
                Scalar::Text(s.clone())
            }
        }
        Cell::DateTime(dt) => Scalar::DateTime(*dt),
        Cell::Error(kind) => match opts.error_mode {
            ErrorMode::Null => missing.clone(),
            ErrorMode::Text => Scalar::Text(kind.to_string()),
        },
    };
    Ok(scalar)
}

/// Flatten a scalar into a cell on write.
///
/// Error sentinels are rejected: error cells can only be produced by the
/// host's own formula evaluation, never injected by this engine.
pub fn write_scalar(scalar: &Scalar, row: usize, col: usize) -> ConvertResult<Cell> {
    let cell = match scalar {
        Scalar::None => Cell::Empty,
        Scalar::Bool(b) => Cell::Bool(*b),
        Scalar::Number(n) => Cell::Number(*n),
        Scalar::Int(i) => Cell::Number(*i as f64),
        Scalar::Text(s) => Cell::Text(s.clone()),
        Scalar::Date(d) => Cell::from(*d),
        Scalar::DateTime(dt) => Cell::DateTime(*dt),
        Scalar::Error(kind) => {
            return Err(ConvertError::UnwritableValue {
                reason: format!("error sentinel {kind} at row {row}, column {col}"),
            })
        }
    };
    Ok(cell)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::ParseDates;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use sheetbridge_core::CellErrorKind;

    fn opts() -> ConvertOptions {
        ConvertOptions::new()
    }

    #[test]
    fn empty_reads_as_missing_token() {
        let got = read_cell(&Cell::Empty, 0, 0, &Scalar::None, &opts()).unwrap();
        assert_eq!(got, Scalar::None);

        let nan = read_cell(&Cell::Empty, 0, 0, &Scalar::Number(f64::NAN), &opts()).unwrap();
        match nan {
            Scalar::Number(n) => assert!(n.is_nan()),
            other => panic!("expected NaN, got {other:?}"),
        }
    }

    #[test]
    fn error_mode_controls_sentinel_reads() {
        let cell = Cell::Error(CellErrorKind::Div0);
        let null = read_cell(&cell, 0, 0, &Scalar::None, &opts()).unwrap();
        assert_eq!(null, Scalar::None);

        let text_opts = opts().with_error_mode(ErrorMode::Text);
        let text = read_cell(&cell, 0, 0, &Scalar::None, &text_opts).unwrap();
        assert_eq!(text, Scalar::Text("#DIV/0!".into()));
    }

    #[test]
    fn integer_coercion_is_opt_in() {
        let cell = Cell::Number(3.0);
        assert_eq!(
            read_cell(&cell, 0, 0, &Scalar::None, &opts()).unwrap(),
            Scalar::Number(3.0)
        );
        let int_opts = opts().with_numbers(NumberMode::Int);
        assert_eq!(
            read_cell(&cell, 0, 0, &Scalar::None, &int_opts).unwrap(),
            Scalar::Int(3)
        );
    }

    #[test]
    fn iso_text_parses_when_enabled() {
        let o = opts().with_parse_dates(ParseDates::All);
        let cell = Cell::Text("2021-01-01T10:30:00".into());
        let expected = NaiveDate::from_ymd_opt(2021, 1, 1)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap();
        assert_eq!(
            read_cell(&cell, 0, 0, &Scalar::None, &o).unwrap(),
            Scalar::DateTime(expected)
        );
        // Disabled by default
        assert_eq!(
            read_cell(&cell, 0, 0, &Scalar::None, &opts()).unwrap(),
            Scalar::Text("2021-01-01T10:30:00".into())
        );
    }

    #[test]
    fn zone_aware_text_normalizes_to_utc_then_naive() {
        let dt = parse_iso_datetime("2021-06-01T12:00:00+02:00").unwrap();
        let expected = NaiveDate::from_ymd_opt(2021, 6, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        assert_eq!(dt, expected);
    }

    #[test]
    fn plain_text_is_not_a_date() {
        assert!(parse_iso_datetime("hello").is_none());
        assert!(parse_iso_datetime("2021-13-01T00:00:00").is_none());
    }

    #[test]
    fn error_sentinels_are_unwritable() {
        let err = write_scalar(&Scalar::Error(CellErrorKind::Na), 2, 3).unwrap_err();
        assert!(matches!(err, ConvertError::UnwritableValue { .. }));
    }

    #[test]
    fn none_writes_as_empty() {
        assert_eq!(write_scalar(&Scalar::None, 0, 0).unwrap(), Cell::Empty);
    }
}
