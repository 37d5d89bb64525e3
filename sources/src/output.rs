//! CSV output.
//!
//! Rows are sorted on their timestamp before being written.  All timestamps share the same
//! ISO-8601 UTC format so plain string order is time order.
//!

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, trace};

use crate::{OutputError, Position, Record, TaggedPosition};

/// Stable sort on the timestamp.
///
pub fn sort_by_time<T: Record>(rows: &mut [T]) {
    rows.sort_by(|a, b| a.timestamp().cmp(b.timestamp()));
}

/// Sort then serialize `rows` into `out`, header included even with no rows.
///
pub fn write_csv<T, W>(out: W, mut rows: Vec<T>) -> Result<usize, OutputError>
where
    T: Serialize + Record,
    W: Write,
{
    sort_by_time(&mut rows);

    let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(out);
    wtr.write_record(T::HEADER)?;
    for r in &rows {
        wtr.serialize(r)?;
    }
    wtr.flush().map_err(|e| OutputError::Io("output".to_string(), e))?;
    trace!("{} rows written", rows.len());
    Ok(rows.len())
}

fn create(path: &Path) -> Result<File, OutputError> {
    let name = path.to_string_lossy().to_string();
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir).map_err(|e| OutputError::Io(name.clone(), e))?;
        }
    }
    File::create(path).map_err(|e| OutputError::Io(name, e))
}

/// Write the positions of one run into `path`.
///
#[tracing::instrument(skip(positions))]
pub fn write_positions(path: &Path, positions: Vec<Position>) -> Result<usize, OutputError> {
    debug!("{} positions", positions.len());
    write_csv(create(path)?, positions)
}

/// Same with the `aircraft` column in front.
///
#[tracing::instrument(skip(positions))]
pub fn write_tagged(path: &Path, positions: Vec<TaggedPosition>) -> Result<usize, OutputError> {
    debug!("{} positions", positions.len());
    write_csv(create(path)?, positions)
}
