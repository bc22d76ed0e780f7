//! SSIS Record Store
//!
//! College, program and student tables backed by flat CSV files, with
//! referential integrity maintained by cascading renames and deletes.
//!
//! # Overview
//!
//! - **Record**: typed entities ([`College`], [`Program`], [`Student`])
//! - **Table**: in-memory index by primary key, rewritten wholesale on every change
//! - **TableStorage**: persistence adapter ([`CsvStorage`], [`MemoryStorage`])
//! - **RecordStore**: owns the three tables and runs cascades from [`FOREIGN_KEYS`]
//! - **Validation**: admission rules producing [`Rejection`] values
//!
//! # Example
//!
//! ```rust
//! use ssis_store::prelude::*;
//!
//! let mut store = RecordStore::in_memory().unwrap();
//! store.create(College::new("CCS", "College of Computer Studies")).unwrap();
//!
//! // Parent must exist
//! let admission = store.create(Program::new("BSEE", "Electrical", "COE")).unwrap();
//! assert!(!admission.is_accepted());
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod config;
pub mod error;
pub mod query;
pub mod record;
pub mod schema;
pub mod storage;
pub mod store;
pub mod table;
pub mod validation;

// Re-exports
pub use config::StoreConfig;
pub use error::{StoreError, StoreResult};
pub use query::{exists, exists_by_name, search, sort, sort_by_name, SortColumn};
pub use record::{
    College, CollegeField, EntityKind, Field, Program, ProgramField, Record, Student, StudentField,
};
pub use schema::{ForeignKey, ReferentialAction, FOREIGN_KEYS};
pub use storage::{CsvStorage, MemoryStorage, TableStorage};
pub use store::{Admission, CascadeSummary, Entity, RecordStore, TableCounts};
pub use table::Table;
pub use validation::{is_valid_student_id, Rejection};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the record store
    pub use crate::{
        Admission, College, EntityKind, Program, Record, RecordStore, Rejection, SortColumn,
        StoreConfig, StoreError, Student,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
