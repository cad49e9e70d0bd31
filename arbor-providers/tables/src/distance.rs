//! Reader for the `id1,id2,distance` table.

use std::{fs::File, io::Read, path::Path};

use arbor_core::{DistanceGraph, DistanceRow, GraphError};
use csv::StringRecord;
use tracing::{debug, instrument};

use crate::{
    errors::{RowDefect, TableError, TableKind},
    rows::for_each_row,
};

/// Parsed pairwise distance table.
///
/// # Examples
/// ```
/// use std::io::Cursor;
/// use arbor_providers_tables::DistanceTable;
///
/// let table = DistanceTable::try_from_reader(Cursor::new("id1,id2,dist\nA,B,0.01\n"))?;
/// assert_eq!(table.rows().len(), 1);
/// let graph = table.into_graph()?;
/// assert_eq!(graph.distance("B", "A"), Some(0.01));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DistanceTable {
    rows: Vec<DistanceRow>,
}

impl DistanceTable {
    /// Reads a distance table from `reader`.
    ///
    /// # Errors
    /// Returns [`TableError::MissingHeader`] for an empty source,
    /// [`TableError::MalformedRow`] for a row without exactly three fields or
    /// with a distance that is not a finite, non-negative number, and
    /// [`TableError::Csv`] when the source cannot be read as UTF-8 text.
    pub fn try_from_reader(reader: impl Read) -> Result<Self, TableError> {
        let mut rows = Vec::new();
        for_each_row(reader, TableKind::Distances, |_, record| {
            rows.push(parse_row(record)?);
            Ok(())
        })?;
        Ok(Self { rows })
    }

    /// Opens and reads the distance table at `path`.
    ///
    /// # Errors
    /// Returns [`TableError::Io`] when the file cannot be opened, otherwise
    /// the errors of [`Self::try_from_reader`].
    #[instrument(name = "tables.distances", err, skip(path), fields(path = %path.as_ref().display()))]
    pub fn try_from_path(path: impl AsRef<Path>) -> Result<Self, TableError> {
        let file = File::open(path.as_ref())?;
        let table = Self::try_from_reader(file)?;
        debug!(rows = table.rows.len(), "distance table loaded");
        Ok(table)
    }

    /// Parsed rows in file order.
    #[must_use]
    pub fn rows(&self) -> &[DistanceRow] {
        &self.rows
    }

    /// Builds the distance graph, inserting rows in file order.
    ///
    /// # Errors
    /// Propagates [`GraphError`]; rows accepted by the reader never trigger it.
    pub fn into_graph(self) -> Result<DistanceGraph, GraphError> {
        DistanceGraph::from_rows(self.rows)
    }
}

fn parse_row(record: &StringRecord) -> Result<DistanceRow, RowDefect> {
    let (Some(left), Some(right), Some(raw), None) =
        (record.get(0), record.get(1), record.get(2), record.get(3))
    else {
        return Err(RowDefect::FieldCount {
            expected: 3,
            actual: record.len(),
        });
    };
    let distance = parse_distance(raw)?;
    Ok(DistanceRow::new(left, right, distance))
}

fn parse_distance(raw: &str) -> Result<f64, RowDefect> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| RowDefect::UnparsableDistance {
            value: raw.to_owned(),
        })?;
    if !value.is_finite() {
        return Err(RowDefect::NonFiniteDistance { value });
    }
    if value < 0.0 {
        return Err(RowDefect::NegativeDistance { value });
    }
    Ok(value)
}
