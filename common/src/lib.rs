//! This library is there to share some common code amongst all fr24-tracks modules.
//!
//! - `ConfigFile` finds and loads the HCL configuration file,
//! - `DateWindow` turns a pair of calendar dates into the UTC interval used by the API,
//! - `init_logging` sets up `tracing` for the binaries.
//!

mod config;
mod daterange;
mod logging;

use clap::{crate_name, crate_version};
pub use config::*;
pub use daterange::*;
pub use logging::*;

const NAME: &str = crate_name!();
const VERSION: &str = crate_version!();

pub fn version() -> String {
    format!("{}/{}", NAME, VERSION)
}

/// Build a `PathBuf` out of a list of components.
///
#[macro_export]
macro_rules! makepath {
    ($($item:expr),+) => {
        [$($item),+].iter().collect::<std::path::PathBuf>()
    };
}
