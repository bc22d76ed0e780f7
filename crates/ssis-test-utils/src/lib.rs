//! Testing utilities for SSIS workspace
//!
//! Shared test helpers, fixtures, and failing storage.

#![allow(missing_docs)]

use ssis_store::{
    College, CsvStorage, MemoryStorage, Program, Record, RecordStore, StoreConfig, StoreError,
    StoreResult, Student, TableStorage,
};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

/// Install a test subscriber honouring `RUST_LOG`; safe to call repeatedly
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn college(code: &str) -> College {
    College::new(code, format!("College {code}"))
}

pub fn program(code: &str, college_code: &str) -> Program {
    Program::new(code, format!("Program {code}"), college_code)
}

pub fn student(id: &str, program_code: &str) -> Student {
    Student::new(id, "Juan", "Cruz", program_code)
        .with_year("1")
        .with_gender("Male")
}

/// In-memory store with College `CCS` → Program `BSCS` → Student `2023-0001`
pub fn seeded_store() -> RecordStore {
    let mut store = RecordStore::in_memory().unwrap();
    store.insert(college("CCS")).unwrap();
    store.insert(program("BSCS", "CCS")).unwrap();
    store.insert(student("2023-0001", "BSCS")).unwrap();
    store
}

/// CSV-backed store in a fresh temporary directory
pub fn temp_store() -> (TempDir, RecordStore) {
    let dir = tempfile::tempdir().unwrap();
    let store = open_in(dir.path());
    (dir, store)
}

/// Open a CSV-backed store in `dir`
pub fn open_in(dir: &Path) -> RecordStore {
    RecordStore::open(&StoreConfig::new().with_data_dir(dir)).unwrap()
}

/// Write a CSV file into `dir` and return its path
pub fn write_csv(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

/// Storage whose writes fail once [`FailSwitch::trip`] is called
#[derive(Debug)]
pub struct FailingStorage<E> {
    inner: MemoryStorage<E>,
    switch: FailSwitch,
}

/// Shared toggle for [`FailingStorage`]
#[derive(Debug, Clone, Default)]
pub struct FailSwitch(Arc<AtomicBool>);

impl FailSwitch {
    pub fn trip(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn reset(&self) {
        self.0.store(false, Ordering::SeqCst);
    }

    fn tripped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

impl<E: Record> FailingStorage<E> {
    pub fn new(inner: MemoryStorage<E>, switch: FailSwitch) -> Self {
        Self { inner, switch }
    }
}

impl<E: Record> Clone for FailingStorage<E> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            switch: self.switch.clone(),
        }
    }
}

impl<E: Record> TableStorage<E> for FailingStorage<E> {
    fn ensure(&self) -> StoreResult<()> {
        self.inner.ensure()
    }

    fn load(&self) -> StoreResult<Vec<E>> {
        self.inner.load()
    }

    fn save(&self, records: &[&E]) -> StoreResult<()> {
        if self.switch.tripped() {
            return Err(StoreError::io_error(
                self.location(),
                std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
            ));
        }
        self.inner.save(records)
    }

    fn location(&self) -> String {
        format!("failing:{}", E::KIND)
    }
}

/// Store whose student table fails on write after `switch.trip()`
pub fn store_with_failing_students(
    students: MemoryStorage<Student>,
    switch: FailSwitch,
) -> RecordStore {
    RecordStore::with_storages(
        Box::new(MemoryStorage::<College>::new()),
        Box::new(MemoryStorage::<Program>::new()),
        Box::new(FailingStorage::new(students, switch)),
    )
    .unwrap()
}

/// CSV storage for one table in `dir`, for tests that inspect files directly
pub fn csv_storage<E: Record>(dir: &Path) -> CsvStorage<E> {
    CsvStorage::new(dir.join(E::KIND.file_name()))
}
