//! Module to deal with the Flightradar24 API.
//!
//! The different submodules deal with:
//!
//! - talking to the API (bearer token, GET, retry on 429),
//! - decoding the answers we care about,
//! - separating airborne samples from ground ones,
//! - writing the result as CSV.
//!
//! `Fr24` ties everything together for a single registration.
//!

// Re-export these modules for a shorted import path.
//
pub use client::*;
pub use error::*;
pub use filter::*;
pub use format::*;
pub use fr24::*;
pub use output::*;

mod client;
mod error;
mod filter;
mod format;
mod fr24;
mod output;

#[cfg(test)]
mod testing;

pub fn version() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}
