//! Error module
//!

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Status {
    #[error("No aircraft given, use the `aircraft` list or the command line")]
    NoAircraft,
    #[error("No date window, set date_from/date_to or use -B/-E")]
    MissingDates,
    #[error("Invalid registration {0:?}")]
    BadRegistration(String),
}
