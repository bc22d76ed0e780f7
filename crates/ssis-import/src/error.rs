//! Error types for bulk import
//!
//! A row that breaks a domain rule is not an error: it becomes a skip
//! reason in the report. These variants abort the whole import.

use ssis_store::StoreError;
use std::path::PathBuf;

/// Fatal import failure
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    /// Source file could not be opened
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Source is not readable CSV
    #[error("malformed source at row {row}: {source}")]
    Malformed {
        row: usize,
        #[source]
        source: csv::Error,
    },

    /// Committing a row failed
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl ImportError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for import operations
pub type ImportResult<T> = Result<T, ImportError>;

#[cfg(test)]
mod tests {
    use super::*;
    use ssis_store::EntityKind;

    #[test]
    fn store_error_converts() {
        let err: ImportError = StoreError::duplicate_key(EntityKind::College, "CCS").into();
        assert!(matches!(err, ImportError::Store(_)));
        assert_eq!(err.to_string(), "store error: duplicate college key: 'CCS'");
    }

    #[test]
    fn io_error_names_path() {
        let err = ImportError::io_error(
            "missing.csv",
            std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        );
        assert!(err.to_string().starts_with("io error reading missing.csv"));
    }
}
