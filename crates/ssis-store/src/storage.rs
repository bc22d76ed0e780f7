//! Persistence adapters
//!
//! A table keeps its rows in memory and hands the full ordered sequence to a
//! [`TableStorage`] on every write. Storage never sees partial updates.

use crate::error::{StoreError, StoreResult};
use crate::record::{Field, Record};
use parking_lot::Mutex;
use std::fmt::Debug;
use std::fs::{self, File};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Whole-table persistence for one entity kind
pub trait TableStorage<E: Record>: Debug {
    /// Create an empty (header-only) table if none exists yet
    fn ensure(&self) -> StoreResult<()>;

    /// Read every persisted row in stored order
    fn load(&self) -> StoreResult<Vec<E>>;

    /// Replace the persisted table with exactly `records`
    fn save(&self, records: &[&E]) -> StoreResult<()>;

    /// Human-readable location for logs
    fn location(&self) -> String;
}

/// Header-first CSV file, one record per line
#[derive(Debug, Clone)]
pub struct CsvStorage<E> {
    path: PathBuf,
    _record: PhantomData<fn() -> E>,
}

impl<E: Record> CsvStorage<E> {
    /// Storage backed by the file at `path`
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _record: PhantomData,
        }
    }

    /// File path
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_all(&self, records: &[&E]) -> StoreResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StoreError::io_error(parent, e))?;
        }

        let file = File::create(&self.path).map_err(|e| StoreError::io_error(&self.path, e))?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        // Header goes out explicitly so empty tables still carry it
        writer
            .write_record(E::KIND.columns())
            .map_err(|e| StoreError::csv_error(&self.path, e))?;
        for record in records {
            writer
                .serialize(record)
                .map_err(|e| StoreError::csv_error(&self.path, e))?;
        }
        writer
            .flush()
            .map_err(|e| StoreError::io_error(&self.path, e))
    }
}

impl<E: Record> TableStorage<E> for CsvStorage<E> {
    fn ensure(&self) -> StoreResult<()> {
        if self.path.exists() {
            return Ok(());
        }
        tracing::debug!("Creating {} table at {}", E::KIND, self.path.display());
        self.write_all(&[])
    }

    fn load(&self) -> StoreResult<Vec<E>> {
        self.ensure()?;

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(&self.path)
            .map_err(|e| StoreError::csv_error(&self.path, e))?;

        let headers = reader
            .headers()
            .map_err(|e| StoreError::csv_error(&self.path, e))?
            .clone();

        // Columns are matched by header name; short rows read the rest as empty
        let mut records = Vec::new();
        for row in reader.records() {
            let row = row.map_err(|e| StoreError::csv_error(&self.path, e))?;
            records.push(E::from_fields(|field| {
                headers
                    .iter()
                    .position(|column| column == field.name())
                    .and_then(|index| row.get(index))
                    .unwrap_or_default()
                    .to_string()
            }));
        }

        tracing::debug!("Loaded {} {} rows from {}", records.len(), E::KIND, self.path.display());
        Ok(records)
    }

    fn save(&self, records: &[&E]) -> StoreResult<()> {
        self.write_all(records)?;
        tracing::debug!("Wrote {} {} rows to {}", records.len(), E::KIND, self.path.display());
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// In-memory storage; clones share the same rows
#[derive(Debug)]
pub struct MemoryStorage<E> {
    rows: Arc<Mutex<Vec<E>>>,
}

impl<E: Record> MemoryStorage<E> {
    /// Empty storage
    #[must_use]
    pub fn new() -> Self {
        Self::with_rows(Vec::new())
    }

    /// Storage pre-filled with `rows`
    #[must_use]
    pub fn with_rows(rows: Vec<E>) -> Self {
        Self {
            rows: Arc::new(Mutex::new(rows)),
        }
    }

    /// Snapshot of what is currently persisted
    #[must_use]
    pub fn snapshot(&self) -> Vec<E> {
        self.rows.lock().clone()
    }
}

impl<E: Record> Clone for MemoryStorage<E> {
    fn clone(&self) -> Self {
        Self {
            rows: Arc::clone(&self.rows),
        }
    }
}

impl<E: Record> Default for MemoryStorage<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Record> TableStorage<E> for MemoryStorage<E> {
    fn ensure(&self) -> StoreResult<()> {
        Ok(())
    }

    fn load(&self) -> StoreResult<Vec<E>> {
        Ok(self.snapshot())
    }

    fn save(&self, records: &[&E]) -> StoreResult<()> {
        *self.rows.lock() = records.iter().map(|r| (*r).clone()).collect();
        Ok(())
    }

    fn location(&self) -> String {
        format!("memory:{}", E::KIND)
    }
}
