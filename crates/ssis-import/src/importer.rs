//! Batch insertion with per-row validation
//!
//! Rows are processed in source order against the store's current tables.
//! Each accepted row is committed immediately, so later rows in the same
//! batch see it (duplicates within one file are caught) and a failure part
//! way through leaves earlier rows in place.
//!
//! Parents must already exist: import colleges, then programs, then students
//! (see [`EntityKind::import_order`]).

use crate::error::ImportResult;
use crate::source::{ImportRow, ImportSource};
use ssis_store::{College, Entity, EntityKind, Field, Program, Record, RecordStore, Rejection, Student};
use std::io::Read;
use std::path::Path;

/// A row that was not imported
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// 1-based data row number (header excluded)
    pub row: usize,
    /// Why it was skipped
    pub rejection: Rejection,
}

impl SkippedRow {
    /// Primary key of the skipped row as read from the source
    #[must_use]
    pub fn key(&self) -> &str {
        self.rejection.key()
    }
}

/// Result of one import run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Rows committed
    pub added: usize,
    /// Rows skipped, in source order
    pub skipped: Vec<SkippedRow>,
}

impl ImportReport {
    /// Human-readable skip reasons, in source order
    #[must_use]
    pub fn reasons(&self) -> Vec<String> {
        self.skipped
            .iter()
            .map(|skip| skip.rejection.to_string())
            .collect()
    }

    /// `(added, reasons)` for presentation
    #[must_use]
    pub fn into_parts(self) -> (usize, Vec<String>) {
        let reasons = self.reasons();
        (self.added, reasons)
    }

    /// Rows seen in total
    #[must_use]
    pub fn processed(&self) -> usize {
        self.added + self.skipped.len()
    }
}

/// Imports rows into a [`RecordStore`]
#[derive(Debug)]
pub struct BulkImporter<'a> {
    store: &'a mut RecordStore,
}

impl<'a> BulkImporter<'a> {
    /// Importer writing into `store`
    pub fn new(store: &'a mut RecordStore) -> Self {
        Self { store }
    }

    /// Import a CSV file into the table of `kind`
    ///
    /// # Errors
    /// I/O or malformed-source errors, or a store write failure. Rows
    /// committed before the failure stay committed.
    pub fn import_file(&mut self, kind: EntityKind, path: impl AsRef<Path>) -> ImportResult<ImportReport> {
        let path = path.as_ref();
        tracing::info!("Importing {} rows from {}", kind, path.display());
        let source = ImportSource::open(path)?;
        self.import_source(kind, source)
    }

    /// Import CSV text from any reader
    ///
    /// # Errors
    /// See [`BulkImporter::import_file`].
    pub fn import_reader<R: Read>(&mut self, kind: EntityKind, reader: R) -> ImportResult<ImportReport> {
        let source = ImportSource::from_reader(reader)?;
        self.import_source(kind, source)
    }

    /// Import already-parsed rows
    ///
    /// # Errors
    /// A store write failure.
    pub fn import_rows<I>(&mut self, kind: EntityKind, rows: I) -> ImportResult<ImportReport>
    where
        I: IntoIterator<Item = ImportRow>,
    {
        self.import_source(kind, rows.into_iter().map(Ok))
    }

    /// Import colleges (`code, name`)
    ///
    /// # Errors
    /// See [`BulkImporter::import_file`].
    pub fn import_colleges(&mut self, path: impl AsRef<Path>) -> ImportResult<ImportReport> {
        self.import_file(EntityKind::College, path)
    }

    /// Import programs (`code, name, college_code`)
    ///
    /// # Errors
    /// See [`BulkImporter::import_file`].
    pub fn import_programs(&mut self, path: impl AsRef<Path>) -> ImportResult<ImportReport> {
        self.import_file(EntityKind::Program, path)
    }

    /// Import students (`id, firstname, lastname, program_code, year, gender`)
    ///
    /// # Errors
    /// See [`BulkImporter::import_file`].
    pub fn import_students(&mut self, path: impl AsRef<Path>) -> ImportResult<ImportReport> {
        self.import_file(EntityKind::Student, path)
    }

    fn import_source<I>(&mut self, kind: EntityKind, rows: I) -> ImportResult<ImportReport>
    where
        I: IntoIterator<Item = ImportResult<ImportRow>>,
    {
        let report = match kind {
            EntityKind::College => self.import_typed::<College, _>(rows)?,
            EntityKind::Program => self.import_typed::<Program, _>(rows)?,
            EntityKind::Student => self.import_typed::<Student, _>(rows)?,
        };
        tracing::info!(
            "Imported {} {} rows, skipped {}",
            report.added,
            kind,
            report.skipped.len()
        );
        Ok(report)
    }

    fn import_typed<E, I>(&mut self, rows: I) -> ImportResult<ImportReport>
    where
        E: Entity,
        I: IntoIterator<Item = ImportResult<ImportRow>>,
    {
        let mut report = ImportReport::default();

        for (index, row) in rows.into_iter().enumerate() {
            let row = row?;
            let record = E::from_fields(|field| row.get(field.name()).to_string());

            match self.store.check_new(&record) {
                Ok(()) => {
                    self.store.insert(record)?;
                    report.added += 1;
                }
                Err(rejection) => {
                    tracing::warn!("Skipping {} row {}: {}", E::KIND, index + 1, rejection);
                    report.skipped.push(SkippedRow {
                        row: index + 1,
                        rejection,
                    });
                }
            }
        }

        Ok(report)
    }
}
