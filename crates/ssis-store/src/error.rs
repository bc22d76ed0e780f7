//! Error types for the record store
//!
//! Only faults that abort an operation live here:
//! - I/O and CSV codec failures on a persisted table
//! - Primary-key collisions the indexed table refuses to hold
//! - Unknown column names and unreadable configuration
//!
//! Expected domain outcomes (missing parents, duplicate keys seen by the
//! validation layer, no-match updates) are returned as data instead.

use crate::record::EntityKind;
use std::path::PathBuf;

/// Main store error type
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// IO error on a persisted table
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV read or write failure on a persisted table
    #[error("csv error on {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Two records in one table share a primary key (case-insensitive)
    #[error("duplicate {kind} key: '{key}'")]
    DuplicateKey { kind: EntityKind, key: String },

    /// Column name not declared for the entity
    #[error("unknown {kind} field: '{field}'")]
    UnknownField { kind: EntityKind, field: String },

    /// Configuration could not be read or parsed
    #[error("configuration error: {0}")]
    Config(String),
}

impl StoreError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create CSV error for path
    pub fn csv_error(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::Csv {
            path: path.into(),
            source,
        }
    }

    /// Create duplicate key error
    pub fn duplicate_key(kind: EntityKind, key: impl Into<String>) -> Self {
        Self::DuplicateKey {
            kind,
            key: key.into(),
        }
    }

    /// Create unknown field error
    pub fn unknown_field(kind: EntityKind, field: impl Into<String>) -> Self {
        Self::UnknownField {
            kind,
            field: field.into(),
        }
    }

    /// Whether the error came from the persistence layer
    #[inline]
    #[must_use]
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. } | Self::Csv { .. })
    }
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;
