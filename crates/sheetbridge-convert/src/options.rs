//! Conversion options
//!
//! A flat set of named, independently defaulted knobs. Unset options fall
//! back to per-target-type defaults applied by the individual converters
//! (tables default to one header row and one index column; scalars ignore
//! header/index entirely).

use crate::value::Scalar;

/// Forced output dimensionality for list reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ndim {
    One,
    Two,
}

/// How error-sentinel cells are read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Error cells become the missing token (default)
    #[default]
    Null,
    /// Error cells become their literal error-code string
    Text,
}

/// How numeric cells are read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumberMode {
    /// All numbers read as f64 (default)
    #[default]
    Float,
    /// Whole numbers coerce to integers (explicit opt-in)
    Int,
}

/// Which text columns are sniffed for ISO date/times on read
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ParseDates {
    #[default]
    No,
    All,
    /// 0-based column positions within the grid being read
    Columns(Vec<usize>),
}

impl ParseDates {
    pub fn applies_to(&self, col: usize) -> bool {
        match self {
            ParseDates::No => false,
            ParseDates::All => true,
            ParseDates::Columns(cols) => cols.contains(&col),
        }
    }
}

/// Options for reading and writing values at the grid boundary.
///
/// Immutable once built; converters take it by reference.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Forced dimensionality for list reads (None = squeeze automatically)
    pub ndim: Option<Ndim>,
    /// Number of header rows for tables (None = target default of 1)
    pub header: Option<usize>,
    /// Number of index columns for tables (None = target default of 1)
    pub index: Option<usize>,
    /// Swap rows and columns before reading / after writing
    pub transpose: bool,
    /// Display format hint for temporal cells on write; never affects the
    /// stored value
    pub date_format: Option<String>,
    /// What an empty cell reads as (None = target default: `Scalar::None`,
    /// or NaN for numeric matrices)
    pub missing: Option<Scalar>,
    /// How error-sentinel cells are read
    pub error_mode: ErrorMode,
    /// Treat formula cells evaluating to blank as boundaries when resolving
    /// contiguous ranges (forces cell-by-cell scanning)
    pub strict_expand: bool,
    /// ISO date/time sniffing for text cells on read
    pub parse_dates: ParseDates,
    /// Integer coercion for whole numbers (explicit opt-in)
    pub numbers: NumberMode,
}

impl ConvertOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ndim(mut self, ndim: Ndim) -> Self {
        self.ndim = Some(ndim);
        self
    }

    /// Set the header depth directly
    pub fn with_header_depth(mut self, depth: usize) -> Self {
        self.header = Some(depth);
        self
    }

    /// Boolean form: `true` is one header row, `false` is none
    pub fn with_header(self, header: bool) -> Self {
        self.with_header_depth(usize::from(header))
    }

    /// Set the index depth directly
    pub fn with_index_depth(mut self, depth: usize) -> Self {
        self.index = Some(depth);
        self
    }

    /// Boolean form: `true` is one index column, `false` is none
    pub fn with_index(self, index: bool) -> Self {
        self.with_index_depth(usize::from(index))
    }

    pub fn with_transpose(mut self, transpose: bool) -> Self {
        self.transpose = transpose;
        self
    }

    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = Some(format.into());
        self
    }

    pub fn with_missing(mut self, missing: Scalar) -> Self {
        self.missing = Some(missing);
        self
    }

    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    pub fn with_strict_expand(mut self, strict: bool) -> Self {
        self.strict_expand = strict;
        self
    }

    pub fn with_parse_dates(mut self, parse_dates: ParseDates) -> Self {
        self.parse_dates = parse_dates;
        self
    }

    pub fn with_numbers(mut self, numbers: NumberMode) -> Self {
        self.numbers = numbers;
        self
    }

    /// Effective header depth for table targets
    pub(crate) fn header_depth(&self) -> usize {
        self.header.unwrap_or(1)
    }

    /// Effective index depth for table targets
    pub(crate) fn index_depth(&self) -> usize {
        self.index.unwrap_or(1)
    }

    /// Effective missing token, given a per-target default
    pub(crate) fn missing_or(&self, default: Scalar) -> Scalar {
        self.missing.clone().unwrap_or(default)
    }
}
