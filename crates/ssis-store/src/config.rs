//! Store configuration
//!
//! Where the three tables live. Values come from defaults, an optional TOML
//! file, and the `SSIS_DATA_DIR` environment variable, in that order.

use crate::error::{StoreError, StoreResult};
use crate::record::EntityKind;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable overriding [`StoreConfig::data_dir`]
pub const DATA_DIR_ENV: &str = "SSIS_DATA_DIR";

/// Locations of the persisted tables
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Directory holding the table files
    pub data_dir: PathBuf,
    /// College table file name
    pub colleges_file: String,
    /// Program table file name
    pub programs_file: String,
    /// Student table file name
    pub students_file: String,
}

impl StoreConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With data directory
    #[inline]
    #[must_use]
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// With file name for one table
    #[must_use]
    pub fn with_file(mut self, kind: EntityKind, file_name: impl Into<String>) -> Self {
        let file_name = file_name.into();
        match kind {
            EntityKind::College => self.colleges_file = file_name,
            EntityKind::Program => self.programs_file = file_name,
            EntityKind::Student => self.students_file = file_name,
        }
        self
    }

    /// Parse configuration from TOML text; missing keys keep defaults
    ///
    /// # Errors
    /// [`StoreError::Config`] if the text is not valid TOML for this struct.
    pub fn from_toml_str(text: &str) -> StoreResult<Self> {
        toml::from_str(text).map_err(|e| StoreError::Config(e.to_string()))
    }

    /// Read configuration from a TOML file
    ///
    /// # Errors
    /// I/O error if the file cannot be read, [`StoreError::Config`] if it
    /// does not parse.
    pub fn from_file(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| StoreError::io_error(path, e))?;
        Self::from_toml_str(&text)
    }

    /// Apply `SSIS_DATA_DIR` if set and non-empty
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        match std::env::var(DATA_DIR_ENV) {
            Ok(dir) if !dir.trim().is_empty() => self.with_data_dir(dir),
            _ => self,
        }
    }

    /// File name configured for a table
    #[must_use]
    pub fn file_name(&self, kind: EntityKind) -> &str {
        match kind {
            EntityKind::College => &self.colleges_file,
            EntityKind::Program => &self.programs_file,
            EntityKind::Student => &self.students_file,
        }
    }

    /// Full path of a table file
    #[must_use]
    pub fn path_for(&self, kind: EntityKind) -> PathBuf {
        self.data_dir.join(self.file_name(kind))
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            colleges_file: EntityKind::College.file_name().to_string(),
            programs_file: EntityKind::Program.file_name().to_string(),
            students_file: EntityKind::Student.file_name().to_string(),
        }
    }
}
