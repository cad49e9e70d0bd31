//! Comma-separated table readers for distance and case metadata inputs.
//!
//! Both tables are read with [`csv`]. They carry a header line, which is
//! skipped, and use a plain comma as the field separator without quoting.
//! Fields are trimmed and blank lines are ignored.

mod distance;
mod errors;
mod metadata;
mod rows;

pub use distance::DistanceTable;
pub use errors::{RowDefect, TableError, TableKind};
pub use metadata::{LabelFormat, METADATA_FIELDS, MetadataTable};
