//! CSV record iteration shared by both table readers.

use std::io::Read;

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::errors::{RowDefect, TableError, TableKind};

/// Feeds every data record of `reader` to `visit` with its 1-based line.
///
/// The first non-blank line is the header and is skipped. Blank lines are
/// ignored, fields are trimmed and quotes carry no meaning. Records may have
/// any field count; `visit` decides what is acceptable. Returns the number
/// of records visited.
pub(crate) fn for_each_row<R, F>(reader: R, table: TableKind, mut visit: F) -> Result<usize, TableError>
where
    R: Read,
    F: FnMut(usize, &StringRecord) -> Result<(), RowDefect>,
{
    let mut records = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .quoting(false)
        .from_reader(reader);
    if records.headers()?.is_empty() {
        return Err(TableError::MissingHeader { table });
    }

    let mut record = StringRecord::new();
    let mut rows = 0;
    while records.read_record(&mut record)? {
        let line = line_of(&record);
        visit(line, &record).map_err(|reason| TableError::MalformedRow {
            table,
            line,
            reason,
        })?;
        rows += 1;
    }
    Ok(rows)
}

fn line_of(record: &StringRecord) -> usize {
    record
        .position()
        .and_then(|position| usize::try_from(position.line()).ok())
        .unwrap_or(0)
}

/// Checks that `record` has exactly `expected` fields.
pub(crate) fn expect_fields(record: &StringRecord, expected: usize) -> Result<(), RowDefect> {
    if record.len() == expected {
        Ok(())
    } else {
        Err(RowDefect::FieldCount {
            expected,
            actual: record.len(),
        })
    }
}
