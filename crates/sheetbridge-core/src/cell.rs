//! Cell value types

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::{Error, Result};

/// Represents the raw value exchanged for a single cell at the document
/// boundary.
///
/// Numbers are always `f64`; the grid itself does not preserve an
/// integer/float distinction. Temporal values are timezone-naive — host
/// timestamps carry no zone information.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Cell {
    /// Empty cell (no value)
    Empty,

    /// Boolean value (TRUE/FALSE)
    Bool(bool),

    /// Numeric value (all numbers stored as f64)
    Number(f64),

    /// String value
    Text(String),

    /// Date/time value, always timezone-naive
    DateTime(NaiveDateTime),

    /// Error sentinel (#VALUE!, #REF!, etc.)
    Error(CellErrorKind),
}

impl Cell {
    /// Check if the cell is empty
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Check if the cell contains an error sentinel
    pub fn is_error(&self) -> bool {
        matches!(self, Cell::Error(_))
    }

    /// Try to get the value as a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            Cell::Bool(true) => Some(1.0),
            Cell::Bool(false) => Some(0.0),
            _ => None,
        }
    }

    /// Try to get the value as a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Cell::Bool(b) => Some(*b),
            Cell::Number(n) => Some(*n != 0.0),
            _ => None,
        }
    }

    /// Try to get the value as a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Get the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Cell::Empty => "empty",
            Cell::Bool(_) => "boolean",
            Cell::Number(_) => "number",
            Cell::Text(_) => "text",
            Cell::DateTime(_) => "datetime",
            Cell::Error(_) => "error",
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::Empty
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => write!(f, ""),
            Cell::Bool(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
            Cell::Number(n) => write!(f, "{}", n),
            Cell::Text(s) => write!(f, "{}", s),
            Cell::DateTime(dt) => write!(f, "{}", dt),
            Cell::Error(e) => write!(f, "{}", e),
        }
    }
}

impl From<bool> for Cell {
    fn from(b: bool) -> Self {
        Cell::Bool(b)
    }
}

impl From<f64> for Cell {
    fn from(n: f64) -> Self {
        Cell::Number(n)
    }
}

impl From<i32> for Cell {
    fn from(n: i32) -> Self {
        Cell::Number(n as f64)
    }
}

impl From<i64> for Cell {
    fn from(n: i64) -> Self {
        Cell::Number(n as f64)
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_owned())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

impl From<NaiveDateTime> for Cell {
    fn from(dt: NaiveDateTime) -> Self {
        Cell::DateTime(dt)
    }
}

impl From<NaiveDate> for Cell {
    fn from(d: NaiveDate) -> Self {
        // Dates widen to midnight; the grid only carries one temporal type.
        Cell::DateTime(d.and_hms_opt(0, 0, 0).expect("midnight is valid"))
    }
}

impl From<CellErrorKind> for Cell {
    fn from(e: CellErrorKind) -> Self {
        Cell::Error(e)
    }
}

/// The closed set of spreadsheet error codes.
///
/// No other variant is permitted as a literal error marker; anything else a
/// host might send is surfaced as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellErrorKind {
    /// #NULL! - Incorrect range operator
    Null,
    /// #DIV/0! - Division by zero
    Div0,
    /// #VALUE! - Wrong type of argument or operand
    Value,
    /// #REF! - Invalid cell reference
    Ref,
    /// #NAME? - Unrecognized name
    Name,
    /// #NUM! - Invalid numeric value
    Num,
    /// #N/A - Value not available
    Na,
}

impl CellErrorKind {
    /// The code as the host displays it
    pub fn as_str(&self) -> &'static str {
        match self {
            CellErrorKind::Null => "#NULL!",
            CellErrorKind::Div0 => "#DIV/0!",
            CellErrorKind::Value => "#VALUE!",
            CellErrorKind::Ref => "#REF!",
            CellErrorKind::Name => "#NAME?",
            CellErrorKind::Num => "#NUM!",
            CellErrorKind::Na => "#N/A",
        }
    }

    /// Parse a display string back into an error kind
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim() {
            "#NULL!" => Ok(CellErrorKind::Null),
            "#DIV/0!" => Ok(CellErrorKind::Div0),
            "#VALUE!" => Ok(CellErrorKind::Value),
            "#REF!" => Ok(CellErrorKind::Ref),
            "#NAME?" => Ok(CellErrorKind::Name),
            "#NUM!" => Ok(CellErrorKind::Num),
            "#N/A" => Ok(CellErrorKind::Na),
            other => Err(Error::UnknownErrorCode(other.to_owned())),
        }
    }

    /// All error kinds, in display order
    pub fn all() -> &'static [CellErrorKind] {
        &[
            CellErrorKind::Null,
            CellErrorKind::Div0,
            CellErrorKind::Value,
            CellErrorKind::Ref,
            CellErrorKind::Name,
            CellErrorKind::Num,
            CellErrorKind::Na,
        ]
    }
}

impl fmt::Display for CellErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn error_codes_roundtrip_through_display() {
        for kind in CellErrorKind::all() {
            assert_eq!(CellErrorKind::parse(kind.as_str()).unwrap(), *kind);
        }
    }

    #[test]
    fn unknown_error_code_is_rejected() {
        assert!(CellErrorKind::parse("#SPILL!").is_err());
        assert!(CellErrorKind::parse("nonsense").is_err());
    }

    #[test]
    fn date_widens_to_midnight() {
        let d = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
        let cell = Cell::from(d);
        assert_eq!(
            cell,
            Cell::DateTime(d.and_hms_opt(0, 0, 0).unwrap())
        );
    }

    #[test]
    fn numeric_coercions() {
        assert_eq!(Cell::from(true).as_number(), Some(1.0));
        assert_eq!(Cell::from(2.5).as_bool(), Some(true));
        assert_eq!(Cell::from("x").as_number(), None);
    }
}
