//! Library part of the `fr24ctl` utility.
//!
//! The API access, filtering and CSV output are in the `fr24-sources` crate; configuration
//! loading and logging come from `fr24-common`.  This crate holds the command-line glue:
//! options, configuration file contents and the sub-commands.
//!

pub use cli::*;
pub use cmds::*;
pub use config::*;
pub use error::*;

mod cli;
mod cmds;
mod config;
mod error;
