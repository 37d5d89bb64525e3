//! Configuration file for `fr24ctl`.
//!
//! ```hcl
//! version   = 1
//! mode      = "test"
//! aircraft  = ["D-AIBL", "F-HBXA"]
//! date_from = "2024-06-01"
//! date_to   = "2024-06-03"
//! output    = "results"
//!
//! api {
//!   retry_delay = 20
//!   pause       = 10
//! }
//!
//! filter {
//!   min_altitude = 32
//!   min_speed    = 10
//! }
//! ```
//!
//! Credentials are never in the file, they come from the environment.
//!

use std::env;
use std::path::PathBuf;

use clap::ValueEnum;
use serde::Deserialize;

use fr24_common::{ConfigError, Versioned};
use fr24_sources::{ApiConfig, Thresholds};

/// Current version
pub const CVERSION: usize = 1;

/// Default results directory
const RESULTS: &str = "results";

/// Token for the real API
pub const PROD_TOKEN: &str = "FR24_API_TOKEN";
/// Token for the sandbox
pub const TEST_TOKEN: &str = "FR24_SANDBOX_TOKEN";

/// Selects which credential we use.
///
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Eq,
    PartialEq,
    strum::Display,
    strum::EnumString,
    ValueEnum,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RunMode {
    Production,
    #[default]
    Test,
}

impl RunMode {
    /// Name of the environment variable holding the token
    ///
    pub fn token_var(&self) -> &'static str {
        match self {
            RunMode::Production => PROD_TOKEN,
            RunMode::Test => TEST_TOKEN,
        }
    }

    /// Fetch the token from the environment
    ///
    pub fn token(&self) -> Result<String, ConfigError> {
        let var = self.token_var();
        env::var(var)
            .ok()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ConfigError::MissingCredential(var.to_string()))
    }
}

/// Configuration for the CLI tool.
///
#[derive(Debug, Deserialize)]
pub struct Config {
    /// File format version
    pub version: usize,
    /// Credential set
    #[serde(default)]
    pub mode: RunMode,
    /// Registrations to fetch
    #[serde(default)]
    pub aircraft: Vec<String>,
    /// First day (YYYY-MM-DD)
    pub date_from: Option<String>,
    /// Last day (YYYY-MM-DD), included
    pub date_to: Option<String>,
    /// Results directory
    #[serde(default = "default_output")]
    pub output: PathBuf,
    /// One file for everything
    #[serde(default)]
    pub aggregate: bool,
    /// API parameters
    #[serde(default)]
    pub api: ApiConfig,
    /// Airborne thresholds
    #[serde(default)]
    pub filter: Thresholds,
}

fn default_output() -> PathBuf {
    PathBuf::from(RESULTS)
}

impl Versioned for Config {
    fn version(&self) -> usize {
        self.version
    }

    fn expected() -> usize {
        CVERSION
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            version: CVERSION,
            mode: RunMode::default(),
            aircraft: vec![],
            date_from: None,
            date_to: None,
            output: default_output(),
            aggregate: false,
            api: ApiConfig::default(),
            filter: Thresholds::default(),
        }
    }
}
