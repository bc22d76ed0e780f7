//! SSIS Bulk Importer
//!
//! Validated batch insertion of CSV sources into a [`ssis_store::RecordStore`].
//!
//! # Overview
//!
//! - **ImportSource**: header-driven CSV rows ([`ImportRow`])
//! - **BulkImporter**: applies the store's admission rules row by row
//! - **ImportReport**: rows added plus a skip reason for every rejected row
//!
//! Rows that break a rule are skipped and reported; the batch continues.
//! Nothing is rolled back. Import in dependency order: colleges, programs,
//! then students.
//!
//! # Example
//!
//! ```rust
//! use ssis_import::BulkImporter;
//! use ssis_store::{EntityKind, RecordStore};
//!
//! let mut store = RecordStore::in_memory().unwrap();
//! let mut importer = BulkImporter::new(&mut store);
//!
//! let report = importer
//!     .import_reader(EntityKind::College, "code,name\nCCS,Computer Studies\nCCS,Again\n".as_bytes())
//!     .unwrap();
//!
//! let (added, reasons) = report.into_parts();
//! assert_eq!(added, 1);
//! assert!(reasons[0].contains("already exists"));
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod error;
pub mod importer;
pub mod source;

// Re-exports
pub use error::{ImportError, ImportResult};
pub use importer::{BulkImporter, ImportReport, SkippedRow};
pub use source::{ImportRow, ImportSource};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
