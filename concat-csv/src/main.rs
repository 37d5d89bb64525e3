//!
//! A command-line utility to merge the CSV files of a directory into a single file.
//!
//! # Overview
//!
//! All the `.csv` files found in the given directory are read in name order.  The header of the
//! first one is written once, followed by every data row of every file.  The output file is
//! skipped if it lives in the same directory.
//!
//! # Examples
//!
//! ```bash
//! $ concat-csv results
//! 3 files, 1234 rows written to results/combined.csv
//!
//! $ concat-csv -o all.csv results
//! 3 files, 1234 rows written to all.csv
//! ```
//!

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use clap::Parser;
use eyre::Result;

use concat_csv::{concat, list_csv, COMBINED};
use fr24_common::{init_logging, verbosity};

/// Program name.
const NAME: &str = env!("CARGO_PKG_NAME");
/// Program version.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Command-line options.
///
#[derive(Debug, Parser)]
#[clap(name = NAME, version = VERSION, about = env!("CARGO_PKG_DESCRIPTION"))]
pub struct Opts {
    /// Output file, default is `combined.csv` inside the directory.
    #[clap(short = 'o', long)]
    pub output: Option<PathBuf>,
    /// Verbose mode.
    #[clap(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbose: u8,
    /// Directory to scan.
    pub dir: PathBuf,
}

fn main() -> Result<()> {
    // Basic option parsing.
    //
    let opts = Opts::parse();

    init_logging(NAME, verbosity(false, opts.verbose), false, None)?;

    if opts.verbose > 0 {
        eprintln!("{}", banner());
    }

    let output = opts.output.unwrap_or_else(|| opts.dir.join(COMBINED));
    let files = list_csv(&opts.dir, Some(&output))?;

    let out = BufWriter::new(File::create(&output)?);
    let rows = concat(&files, out)?;

    println!("{} files, {} rows written to {}", files.len(), rows, output.display());
    Ok(())
}

// -----

fn banner() -> String {
    format!(
        "{} v{} - {}\n{}\n",
        NAME,
        VERSION,
        env!("CARGO_PKG_AUTHORS"),
        env!("CARGO_PKG_DESCRIPTION")
    )
}
