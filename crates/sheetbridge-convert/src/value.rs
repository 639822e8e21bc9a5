//! Typed values reconstructed from, or flattened into, grids

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use sheetbridge_core::CellErrorKind;

use crate::table::Table;

/// A single typed value at one cell position.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// The canonical "no value" (never `0` and never an empty string)
    None,
    Bool(bool),
    Number(f64),
    /// Integer-coerced number; only produced under
    /// [`NumberMode::Int`](crate::options::NumberMode)
    Int(i64),
    Text(String),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    /// An error sentinel surfaced as data. Readable representation only;
    /// writing it back is rejected — error cells can only be produced by the
    /// host's own formula evaluation.
    Error(CellErrorKind),
}

impl Scalar {
    pub fn is_none(&self) -> bool {
        matches!(self, Scalar::None)
    }

    /// Type name used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Scalar::None => "none",
            Scalar::Bool(_) => "boolean",
            Scalar::Number(_) => "number",
            Scalar::Int(_) => "integer",
            Scalar::Text(_) => "text",
            Scalar::Date(_) => "date",
            Scalar::DateTime(_) => "datetime",
            Scalar::Error(_) => "error",
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::None => write!(f, ""),
            Scalar::Bool(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
            Scalar::Number(n) => write!(f, "{}", n),
            Scalar::Int(i) => write!(f, "{}", i),
            Scalar::Text(s) => write!(f, "{}", s),
            Scalar::Date(d) => write!(f, "{}", d),
            Scalar::DateTime(dt) => write!(f, "{}", dt),
            Scalar::Error(e) => write!(f, "{}", e),
        }
    }
}

impl From<f64> for Scalar {
    fn from(n: f64) -> Self {
        Scalar::Number(n)
    }
}

impl From<i64> for Scalar {
    fn from(n: i64) -> Self {
        Scalar::Int(n)
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Scalar::Bool(b)
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Text(s.to_owned())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::Text(s)
    }
}

impl From<NaiveDate> for Scalar {
    fn from(d: NaiveDate) -> Self {
        Scalar::Date(d)
    }
}

impl From<NaiveDateTime> for Scalar {
    fn from(dt: NaiveDateTime) -> Self {
        Scalar::DateTime(dt)
    }
}

/// A row or column label; one element for flat labels, several for
/// hierarchical (multi-level) labels.
pub type Label = Vec<Scalar>;

/// The richly typed in-memory value exchanged with the converter pipeline.
///
/// Created per read/write call and discarded afterward; the engine keeps no
/// persistent ownership.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Scalar(Scalar),
    /// 1-dimensional list (a single row or column)
    List(Vec<Scalar>),
    /// 2-dimensional list, row-major
    Matrix(Vec<Vec<Scalar>>),
    /// Ordered mapping with unique keys
    Map(Vec<(Scalar, Scalar)>),
    /// Tagged table with (possibly multi-level) headers and indices
    Table(Table),
}

impl Value {
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Value::Scalar(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Scalar]> {
        match self {
            Value::List(xs) => Some(xs),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Value::Table(t) => Some(t),
            _ => None,
        }
    }

    /// Look up a mapping value by key
    pub fn map_get(&self, key: &Scalar) -> Option<&Scalar> {
        match self {
            Value::Map(pairs) => pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }
}

impl From<Scalar> for Value {
    fn from(s: Scalar) -> Self {
        Value::Scalar(s)
    }
}

impl From<Table> for Value {
    fn from(t: Table) -> Self {
        Value::Table(t)
    }
}
