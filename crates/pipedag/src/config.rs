//! Configuration management for pipedag.
//!
//! The only setting is where the pipeline database lives. It comes from the
//! `DATABASE_URL` environment variable, a plain filesystem path, and defaults
//! to `pipelines.db` in the working directory.

use std::env::VarError;
use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::store::PipelineStore;

/// Environment variable naming the database file.
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";

/// Database file used when `DATABASE_URL` is unset.
pub const DEFAULT_DATABASE_PATH: &str = "pipelines.db";

/// Configuration for pipedag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Path to the `SQLite` database file
    pub database_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
        }
    }
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `DATABASE_URL` is set but empty or not
    /// valid Unicode.
    pub fn from_env() -> Result<Self> {
        match std::env::var(DATABASE_URL_VAR) {
            Ok(value) => Self::from_lookup(|_| Some(value.clone())),
            Err(VarError::NotPresent) => Ok(Self::default()),
            Err(VarError::NotUnicode(_)) => Err(Error::Config(format!(
                "{DATABASE_URL_VAR} is not valid Unicode"
            ))),
        }
    }

    /// Load configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `DATABASE_URL` resolves to an empty value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        match lookup(DATABASE_URL_VAR) {
            None => Ok(Self::default()),
            Some(value) if value.trim().is_empty() => Err(Error::Config(format!(
                "{DATABASE_URL_VAR} is set but empty"
            ))),
            Some(value) => Ok(Self {
                database_path: PathBuf::from(value),
            }),
        }
    }

    /// Open the store this configuration points at.
    ///
    /// # Errors
    ///
    /// See [`PipelineStore::open`].
    pub fn open_store(&self) -> Result<PipelineStore> {
        PipelineStore::open(&self.database_path)
    }
}
