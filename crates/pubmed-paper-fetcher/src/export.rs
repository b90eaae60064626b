//! CSV output.
//!
//! The output file is append-only: the header row is written when the file is
//! created and never again, so repeated runs accumulate rows.

use std::fs::OpenOptions;
use std::path::Path;

use tracing::{debug, info};

use crate::error::ExportError;
use crate::models::ParsedRecord;

/// Append `records` to the CSV file at `path`, in order.
///
/// A header row is written first if the file does not exist yet. Returns the
/// number of rows appended.
pub fn append_records(path: &Path, records: &[ParsedRecord]) -> Result<usize, ExportError> {
    let io_err = |source: std::io::Error| ExportError::Io { path: path.display().to_string(), source };

    let exists = path.exists();
    let file = OpenOptions::new().create(true).append(true).open(path).map_err(io_err)?;

    let mut writer = csv::WriterBuilder::new().has_headers(!exists).from_writer(file);
    if !exists && records.is_empty() {
        // serde only emits headers alongside the first row
        writer.write_record(crate::models::CSV_HEADERS)?;
    }
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush().map_err(io_err)?;

    debug!(path = %path.display(), new_file = !exists, "flushed CSV output");
    info!(path = %path.display(), rows = records.len(), "appended records");
    Ok(records.len())
}
