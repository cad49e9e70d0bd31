//! Reader for the five-column case metadata table.

use std::{fs::File, io::Read, path::Path};

use arbor_core::CaseRecord;
use csv::StringRecord;
use tracing::{debug, instrument};

use crate::{
    errors::{RowDefect, TableError, TableKind},
    rows::{expect_fields, for_each_row},
};

/// Number of comma-separated fields in a metadata row.
pub const METADATA_FIELDS: usize = 5;

/// Where the cluster identifier sits inside a metadata row.
///
/// The identifier is one segment of a composite label: the label is field
/// `column` of the row and is split on `delimiter`.
///
/// # Examples
/// ```
/// use arbor_providers_tables::LabelFormat;
///
/// let format = LabelFormat::default();
/// assert_eq!(format.extract("seq7|KX123|2020").ok(), Some("KX123"));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LabelFormat {
    /// 0-based field holding the label.
    pub column: usize,
    /// Separator between label segments.
    pub delimiter: char,
    /// 0-based segment holding the cluster identifier.
    pub segment: usize,
}

impl Default for LabelFormat {
    fn default() -> Self {
        Self {
            column: 0,
            delimiter: '|',
            segment: 1,
        }
    }
}

impl LabelFormat {
    /// Extracts the cluster identifier from `label`.
    ///
    /// # Errors
    /// Returns [`RowDefect::MissingLabelSegment`] when the label has too few
    /// segments and [`RowDefect::EmptyIdentifier`] when the segment is empty.
    pub fn extract<'a>(&self, label: &'a str) -> Result<&'a str, RowDefect> {
        let id = label
            .split(self.delimiter)
            .nth(self.segment)
            .ok_or_else(|| RowDefect::MissingLabelSegment {
                label: label.to_owned(),
                segment: self.segment,
                delimiter: self.delimiter,
            })?;
        if id.is_empty() {
            return Err(RowDefect::EmptyIdentifier);
        }
        Ok(id)
    }

    fn record(&self, line: usize, fields: &StringRecord) -> Result<CaseRecord, RowDefect> {
        expect_fields(fields, METADATA_FIELDS)?;
        let label = fields.get(self.column).ok_or(RowDefect::FieldCount {
            expected: self.column + 1,
            actual: fields.len(),
        })?;
        Ok(CaseRecord::new(line, self.extract(label)?))
    }
}

/// Case records extracted from the metadata table, one per data row.
///
/// # Examples
/// ```
/// use std::io::Cursor;
/// use arbor_providers_tables::{LabelFormat, MetadataTable};
///
/// let raw = "label,a,b,c,d\ns1|KX1|x,1,2,3,4\ns2|KX2|y,1,2,3,4\n";
/// let table = MetadataTable::try_from_reader(Cursor::new(raw), LabelFormat::default())?;
/// let clusters: Vec<&str> = table.records().iter().map(|r| r.cluster.as_str()).collect();
/// assert_eq!(clusters, ["KX1", "KX2"]);
/// assert_eq!(table.records()[1].line, 3);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MetadataTable {
    records: Vec<CaseRecord>,
}

impl MetadataTable {
    /// Reads a metadata table from `reader`.
    ///
    /// # Errors
    /// Returns [`TableError::MissingHeader`] for an empty source,
    /// [`TableError::MalformedRow`] for a row without exactly five fields or
    /// whose label does not yield a cluster identifier, and
    /// [`TableError::Csv`] when the source cannot be read as UTF-8 text.
    pub fn try_from_reader(reader: impl Read, format: LabelFormat) -> Result<Self, TableError> {
        let mut records = Vec::new();
        for_each_row(reader, TableKind::Metadata, |line, fields| {
            records.push(format.record(line, fields)?);
            Ok(())
        })?;
        Ok(Self { records })
    }

    /// Opens and reads the metadata table at `path`.
    ///
    /// # Errors
    /// Returns [`TableError::Io`] when the file cannot be opened, otherwise
    /// the errors of [`Self::try_from_reader`].
    #[instrument(name = "tables.metadata", err, skip(path), fields(path = %path.as_ref().display()))]
    pub fn try_from_path(path: impl AsRef<Path>, format: LabelFormat) -> Result<Self, TableError> {
        let file = File::open(path.as_ref())?;
        let table = Self::try_from_reader(file, format)?;
        debug!(records = table.records.len(), "metadata table loaded");
        Ok(table)
    }

    /// Extracted records in file order.
    #[must_use]
    pub fn records(&self) -> &[CaseRecord] {
        &self.records
    }

    /// Consumes the table and returns its records.
    #[must_use]
    pub fn into_records(self) -> Vec<CaseRecord> {
        self.records
    }
}
