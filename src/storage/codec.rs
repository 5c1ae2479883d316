//! Record file codec
//!
//! Record files hold one `id;name` row per record and no header. The field
//! delimiter is a semicolon because titles regularly contain commas; fields
//! are quoted only when they contain the delimiter, quotes or line breaks.

use crate::document::Record;
use crate::storage::RecordStore;
use crate::{KinoportError, RecordCodecError, Result};
use csv::{ReaderBuilder, Terminator, WriterBuilder};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

const DELIMITER: u8 = b';';

/// Fields per row: id, then name
const FIELDS_PER_ROW: usize = 2;

/// Writes records as `id;name` rows
pub fn write_records<W: Write>(writer: W, records: &[Record]) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(false)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);

    for record in records {
        writer.serialize(record)?;
    }

    writer.flush()?;
    Ok(())
}

/// Reads `id;name` rows in file order
///
/// Every row must have exactly two fields; anything else is an error for
/// the whole file. Rows are numbered from 1 in errors.
pub fn read_records<R: Read>(reader: R) -> Result<Vec<Record>> {
    let mut reader = ReaderBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut records = Vec::new();
    for (index, row) in reader.records().enumerate() {
        let row = row?;
        if row.len() != FIELDS_PER_ROW {
            return Err(RecordCodecError::FieldCount {
                row: index + 1,
                found: row.len(),
            }
            .into());
        }

        records.push(Record::new(&row[0], &row[1]));
    }

    Ok(records)
}

/// Decodes an in-memory record file
pub fn deserialize(bytes: &[u8]) -> Result<Vec<Record>> {
    read_records(bytes)
}

/// Writes the whole store to `path`, replacing any existing file
pub fn save_records(path: &Path, store: &RecordStore) -> Result<()> {
    let file = File::create(path)?;
    write_records(file, &store.records()).map_err(|e| with_path(e, path))
}

/// Reads every record from the file at `path`
pub fn load_records(path: &Path) -> Result<Vec<Record>> {
    let file = File::open(path)?;
    read_records(file).map_err(|e| with_path(e, path))
}

fn with_path(error: KinoportError, path: &Path) -> KinoportError {
    match error {
        KinoportError::Codec(source) => KinoportError::RecordFile {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    }
}
