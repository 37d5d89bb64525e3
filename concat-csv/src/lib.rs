//! Library part of `concat-csv`.
//!
//! Merge every `.csv` file of a directory into a single one.  Files are taken in name order,
//! which for the files written by `fr24ctl` is also creation order.  Only the header of the
//! first file is kept.
//!

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use eyre::{eyre, Result};
use tracing::{debug, trace, warn};

/// Default output name, inside the scanned directory.
pub const COMBINED: &str = "combined.csv";

/// List the CSV files in `dir`, sorted by name, leaving `skip` out.
///
#[tracing::instrument]
pub fn list_csv(dir: &Path, skip: Option<&Path>) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(eyre!("{} is not a directory", dir.display()));
    }

    let skip = skip.and_then(|p| p.canonicalize().ok());
    let mut files = fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file())
        .filter(|p| {
            p.extension()
                .map(|ext| ext.eq_ignore_ascii_case("csv"))
                .unwrap_or(false)
        })
        .filter(|p| match (&skip, p.canonicalize()) {
            (Some(skip), Ok(p)) => *skip != p,
            _ => true,
        })
        .collect::<Vec<_>>();
    files.sort();
    debug!("{} files", files.len());
    Ok(files)
}

/// Copy every row of `files` into `out`, header written once.  Returns the number of rows.
///
#[tracing::instrument(skip(out))]
pub fn concat<W: Write>(files: &[PathBuf], out: W) -> Result<usize> {
    let mut wtr = WriterBuilder::new().flexible(true).from_writer(out);
    let mut header: Option<StringRecord> = None;
    let mut rows = 0;

    for fname in files {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(fname)?;

        let this = rdr.headers()?.clone();
        if this.is_empty() {
            warn!("{} is empty, skipping", fname.display());
            continue;
        }

        match &header {
            None => {
                wtr.write_record(&this)?;
                header = Some(this);
            }
            Some(first) if *first != this => {
                warn!("{} has a different header: {:?}", fname.display(), this);
            }
            _ => (),
        }

        let mut n = 0;
        for rec in rdr.records() {
            wtr.write_record(&rec?)?;
            n += 1;
        }
        trace!("{}: {} rows", fname.display(), n);
        rows += n;
    }
    wtr.flush()?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "latitude,longitude,timestamp,altitude,speed,direction";

    fn setup(dir: &Path) {
        fs::write(
            dir.join("b.csv"),
            format!("{HEADER}\n3.0,4.0,2024-06-01T11:00:00Z,2000,200,90\n"),
        )
        .unwrap();
        fs::write(
            dir.join("a.csv"),
            format!("{HEADER}\n1.0,2.0,2024-06-01T10:00:00Z,1000,150,80\n1.5,2.5,2024-06-01T10:01:00Z,1100,160,81\n"),
        )
        .unwrap();
        fs::write(dir.join("notes.txt"), "not a csv").unwrap();
    }

    #[test]
    fn test_list_csv() {
        let dir = tempfile::tempdir().unwrap();
        setup(dir.path());

        let files = list_csv(dir.path(), None).unwrap();
        assert_eq!(vec![dir.path().join("a.csv"), dir.path().join("b.csv")], files);
    }

    #[test]
    fn test_list_csv_skip_output() {
        let dir = tempfile::tempdir().unwrap();
        setup(dir.path());
        let out = dir.path().join("b.csv");

        let files = list_csv(dir.path(), Some(&out)).unwrap();
        assert_eq!(vec![dir.path().join("a.csv")], files);
    }

    #[test]
    fn test_list_csv_not_a_dir() {
        assert!(list_csv(Path::new("/nonexistent"), None).is_err());
    }

    #[test]
    fn test_concat_single_header() {
        let dir = tempfile::tempdir().unwrap();
        setup(dir.path());
        let files = list_csv(dir.path(), None).unwrap();

        let mut out = vec![];
        let n = concat(&files, &mut out).unwrap();
        assert_eq!(3, n);

        let s = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = s.lines().collect();
        assert_eq!(
            vec![
                HEADER,
                "1.0,2.0,2024-06-01T10:00:00Z,1000,150,80",
                "1.5,2.5,2024-06-01T10:01:00Z,1100,160,81",
                "3.0,4.0,2024-06-01T11:00:00Z,2000,200,90",
            ],
            lines
        );
    }

    #[test]
    fn test_concat_skips_empty() {
        let dir = tempfile::tempdir().unwrap();
        setup(dir.path());
        fs::write(dir.path().join("0.csv"), "").unwrap();
        let files = list_csv(dir.path(), None).unwrap();
        assert_eq!(3, files.len());

        let mut out = vec![];
        let n = concat(&files, &mut out).unwrap();
        assert_eq!(3, n);
        assert!(String::from_utf8(out).unwrap().starts_with(HEADER));
    }

    #[test]
    fn test_concat_nothing() {
        let mut out = vec![];
        assert_eq!(0, concat(&[], &mut out).unwrap());
        assert!(out.is_empty());
    }
}
