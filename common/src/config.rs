//! This is the `ConfigFile` struct.
//!
//! This is for finding the right default locations for various configuration files for
//! `fr24-tracks`.  This is a configuration file/struct neutral loading engine, storing only the
//! base directory and with `load()` read the proper file or the default one.
//!
//! This encapsulates the configuration file, available with `.inner()` or `.inner_mut()`.
//!

use std::fmt::Debug;
use std::fs;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, trace};

use crate::makepath;

/// Config filename
const CONFIG: &str = "config.hcl";

/// Main name for the directory base
const TAG: &str = "fr24-tracks";

/// Every configuration file carries a version number so we can detect stale files.
///
pub trait Versioned {
    /// Version found in the loaded file
    fn version(&self) -> usize;
    /// Version the code expects
    fn expected() -> usize;
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Bad file version {found}, expected {expected}")]
    BadFileVersion { found: usize, expected: usize },
    #[error("Unknown config file {0:?} and no default in {1:?}")]
    MissingConfig(PathBuf, PathBuf),
    #[error("Can not read {0:?}: {1}")]
    Read(PathBuf, std::io::Error),
    #[error("Can not parse {0:?}: {1}")]
    Parse(PathBuf, hcl::Error),
    #[error("Missing credential, set {0} in the environment")]
    MissingCredential(String),
}

/// Configuration for the CLI tool, supposed to include parameters and most importantly
/// the list of aircraft to fetch.
///
#[derive(Debug)]
pub struct ConfigFile<T: Debug + DeserializeOwned + Versioned> {
    /// Tag is the project name.
    tag: String,
    /// This is the base directory for all files.
    basedir: PathBuf,
    /// File we actually loaded
    path: PathBuf,
    inner: T,
}

/// Find the default base directory for `tag`.
///
#[tracing::instrument]
pub fn config_dir(tag: &str) -> PathBuf {
    match BaseDirs::new() {
        Some(base) => {
            #[cfg(unix)]
            let base = base.home_dir().join(".config");

            #[cfg(windows)]
            let base = base.data_local_dir().to_path_buf();

            debug!("base = {base:?}");
            base.join(tag)
        }
        // No home directory at all, stay local
        None => makepath!(".", tag),
    }
}

impl<T> ConfigFile<T>
where
    T: Debug + DeserializeOwned + Versioned,
{
    /// Returns the path of the default config directory
    ///
    pub fn config_path(&self) -> PathBuf {
        self.basedir.clone()
    }

    /// Returns the path of the default config file for our tag
    ///
    pub fn default_file() -> PathBuf {
        config_dir(TAG).join(CONFIG)
    }

    /// Returns the path of the file we loaded
    ///
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Project tag
    ///
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Load the file and return a struct T in the right format.
    ///
    /// Use the following search path:
    /// - file specified on CLI
    /// - default basedir (base on $HOME or $LOCALAPPDATA)
    ///
    #[tracing::instrument]
    pub fn load(fname: Option<&Path>) -> Result<ConfigFile<T>, ConfigError> {
        let basedir = config_dir(TAG);
        let default = Self::default_file();

        let fname = match fname {
            Some(fname) => fname.to_path_buf(),
            None => default.clone(),
        };

        if !fname.exists() {
            return Err(ConfigError::MissingConfig(fname, default));
        }

        trace!("Loading config file {fname:?} from {basedir:?}");

        let data = fs::read_to_string(&fname).map_err(|e| ConfigError::Read(fname.clone(), e))?;
        debug!("string data = {data}");

        let inner = Self::parse(&fname, &data)?;
        debug!("struct data = {inner:?}");

        Ok(ConfigFile {
            tag: TAG.to_string(),
            basedir,
            path: fname,
            inner,
        })
    }

    /// Parse HCL content and check the version.
    ///
    pub fn parse(fname: &Path, data: &str) -> Result<T, ConfigError> {
        let inner: T = hcl::from_str(data).map_err(|e| ConfigError::Parse(fname.to_path_buf(), e))?;
        if inner.version() != T::expected() {
            return Err(ConfigError::BadFileVersion {
                found: inner.version(),
                expected: T::expected(),
            });
        }
        Ok(inner)
    }

    /// Return the inner configuration file
    ///
    pub fn inner(&self) -> &T {
        &self.inner
    }

    /// Return the inner configuration file as putable
    ///
    pub fn inner_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the container
    ///
    pub fn into_inner(self) -> T {
        self.inner
    }
}
