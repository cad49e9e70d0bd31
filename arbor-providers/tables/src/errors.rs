use std::fmt;

use thiserror::Error;

/// Identifies which input table an error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TableKind {
    /// Pairwise cluster distances.
    Distances,
    /// Case metadata.
    Metadata,
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Distances => "distance",
            Self::Metadata => "metadata",
        })
    }
}

/// What was wrong with a malformed row.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum RowDefect {
    /// The row did not split into the expected number of fields.
    #[error("expected {expected} comma-separated fields but found {actual}")]
    FieldCount {
        /// Fields required by the table layout.
        expected: usize,
        /// Fields present in the row.
        actual: usize,
    },
    /// The distance field did not parse as a real number.
    #[error("distance `{value}` is not a number")]
    UnparsableDistance {
        /// Raw field text.
        value: String,
    },
    /// The distance was NaN or infinite.
    #[error("distance {value} is not finite")]
    NonFiniteDistance {
        /// Parsed value.
        value: f64,
    },
    /// The distance was below zero.
    #[error("distance {value} is negative")]
    NegativeDistance {
        /// Parsed value.
        value: f64,
    },
    /// The label field has too few delimited segments.
    #[error("label `{label}` has no segment {segment} when split on `{delimiter}`")]
    MissingLabelSegment {
        /// Raw label text.
        label: String,
        /// Requested 0-based segment.
        segment: usize,
        /// Delimiter used to split the label.
        delimiter: char,
    },
    /// The extracted cluster identifier was empty.
    #[error("cluster identifier is empty")]
    EmptyIdentifier,
}

/// Errors raised while reading an input table.
#[derive(Debug, Error)]
pub enum TableError {
    /// The table has no header line.
    #[error("{table} table is empty: a header line is required")]
    MissingHeader {
        /// Table that was read.
        table: TableKind,
    },
    /// A data row could not be parsed.
    #[error("{table} table line {line}: {reason}")]
    MalformedRow {
        /// Table that was read.
        table: TableKind,
        /// 1-based line number, counting the header.
        line: usize,
        /// Description of the defect.
        reason: RowDefect,
    },
    /// Opening the underlying source failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    /// The CSV reader failed, for example on invalid UTF-8 or a read error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}
