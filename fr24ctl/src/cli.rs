//! Module describing all possible commands and sub-commands to the `fr24ctl` main driver
//!
//! We have four main commands:
//!
//! - `fetch`
//! - `list`
//! - `completion`
//! - `version`
//!
//! `fetch` resolves the flights of every configured registration over the date window, gets
//! their tracks, drops the ground samples and writes the rest as CSV in the results directory.
//! Options given here take precedence over the configuration file.
//!
//! `list` displays what `fetch` would do with the current configuration.
//!
//! `completion` is here just to configure the various shells completion system.
//!

use std::path::PathBuf;

use clap::{crate_authors, crate_description, crate_name, crate_version, Parser};
use clap_complete::shells::Shell;

use crate::RunMode;

/// CLI options
#[derive(Parser)]
#[command(disable_version_flag = true)]
#[clap(name = crate_name!(), about = crate_description!())]
#[clap(version = crate_version!(), author = crate_authors!())]
pub struct Opts {
    /// configuration file.
    #[clap(short = 'c', long)]
    pub config: Option<PathBuf>,
    /// debug mode.
    #[clap(short = 'D', long = "debug")]
    pub debug: bool,
    /// Verbose mode.
    #[clap(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbose: u8,
    /// Display utility full version.
    #[clap(short = 'V', long)]
    pub version: bool,
    /// Hierarchical logging output.
    #[clap(long)]
    pub tree: bool,
    /// Also log into hourly files in this directory.
    #[clap(long)]
    pub log_dir: Option<String>,
    /// Sub-commands (see below).
    #[clap(subcommand)]
    pub subcmd: SubCommand,
}

// ------

/// All sub-commands:
///
/// `completion SHELL`
/// `fetch [-B date] [-E date] [--aggregate] [--mode MODE] [-o DIR] [REG...]`
/// `list`
/// `version`
///
#[derive(Debug, Parser)]
pub enum SubCommand {
    /// Generate Completion stuff
    Completion(ComplOpts),
    /// Fetch airborne tracks for the configured aircraft
    Fetch(FetchOpts),
    /// Display the current configuration
    List,
    /// List all package versions
    Version,
}

// ------

/// Options for fetching data, all optional as the configuration file has them.
///
#[derive(Debug, Default, Parser)]
pub struct FetchOpts {
    /// First day (YYYY-MM-DD)
    #[clap(short = 'B', long)]
    pub begin: Option<String>,
    /// Last day (YYYY-MM-DD), included
    #[clap(short = 'E', long)]
    pub end: Option<String>,
    /// One file for all aircraft with an `aircraft` column
    #[clap(short = 'a', long)]
    pub aggregate: bool,
    /// Which API token to use
    #[clap(short = 'm', long)]
    pub mode: Option<RunMode>,
    /// Results directory.
    #[clap(short = 'o', long)]
    pub output: Option<PathBuf>,
    /// Registrations, replace the configured list
    pub aircraft: Vec<String>,
}

// ------

/// Options to generate completion files at runtime
///
#[derive(Debug, Parser)]
pub struct ComplOpts {
    #[clap(value_parser)]
    pub shell: Shell,
}
