//! The record store
//!
//! [`RecordStore`] owns the College, Program and Student tables and keeps
//! them consistent: renames of a parent key are rewritten into children and
//! deletes remove every transitive dependent. Both are driven by the
//! [`ForeignKey`] table rather than per-pair code.
//!
//! # Example
//!
//! ```rust
//! use ssis_store::{College, Program, RecordStore};
//!
//! let mut store = RecordStore::in_memory().unwrap();
//! store.insert(College::new("CCS", "College of Computer Studies")).unwrap();
//! store.insert(Program::new("BSCS", "Computer Science", "CCS")).unwrap();
//!
//! store.update_college("CCS", College::new("CCIS", "Computing and Information")).unwrap();
//! assert_eq!(store.programs().get("BSCS").unwrap().college_code, "CCIS");
//!
//! let summary = store.delete_college("CCIS").unwrap();
//! assert_eq!(summary.total(), 2);
//! ```

use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};
use crate::query::{sort, SortColumn};
use crate::record::{fold_key, keys_match, College, EntityKind, Field, Program, Record, Student};
use crate::schema::{children_of, ForeignKey, ReferentialAction, FOREIGN_KEYS};
use crate::storage::{CsvStorage, MemoryStorage, TableStorage};
use crate::table::Table;
use crate::validation::{admit, Rejection};
use std::collections::{BTreeMap, BTreeSet, VecDeque};

/// Entity with a table in the store
pub trait Entity: Record {
    /// The entity's table
    fn table(store: &RecordStore) -> &Table<Self>;

    /// The entity's table, mutable
    fn table_mut(store: &mut RecordStore) -> &mut Table<Self>;
}

impl Entity for College {
    fn table(store: &RecordStore) -> &Table<Self> {
        &store.colleges
    }

    fn table_mut(store: &mut RecordStore) -> &mut Table<Self> {
        &mut store.colleges
    }
}

impl Entity for Program {
    fn table(store: &RecordStore) -> &Table<Self> {
        &store.programs
    }

    fn table_mut(store: &mut RecordStore) -> &mut Table<Self> {
        &mut store.programs
    }
}

impl Entity for Student {
    fn table(store: &RecordStore) -> &Table<Self> {
        &store.students
    }

    fn table_mut(store: &mut RecordStore) -> &mut Table<Self> {
        &mut store.students
    }
}

/// Type-erased view of a table used by the cascade routines
trait Linked {
    fn contains_key(&self, key: &str) -> bool;
    fn rewrite_column(&mut self, column: &str, old: &str, new: &str) -> StoreResult<usize>;
    fn remove_matching(&mut self, column: &str, keys: &BTreeSet<String>) -> StoreResult<Vec<String>>;
    fn flush(&mut self) -> StoreResult<()>;
}

impl<E: Record> Linked for Table<E> {
    fn contains_key(&self, key: &str) -> bool {
        Table::contains_key(self, key)
    }

    fn rewrite_column(&mut self, column: &str, old: &str, new: &str) -> StoreResult<usize> {
        let field = E::field_named(column).ok_or_else(|| StoreError::unknown_field(E::KIND, column))?;
        Ok(Table::rewrite_column(self, field, old, new))
    }

    fn remove_matching(&mut self, column: &str, keys: &BTreeSet<String>) -> StoreResult<Vec<String>> {
        let field = E::field_named(column).ok_or_else(|| StoreError::unknown_field(E::KIND, column))?;
        Ok(Table::remove_matching(self, field, keys))
    }

    fn flush(&mut self) -> StoreResult<()> {
        Table::flush(self)
    }
}

/// Outcome of an interactive create or edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission {
    /// Record committed
    Accepted,
    /// Record refused; nothing was written
    Rejected(Rejection),
}

impl Admission {
    /// Whether the record was committed
    #[inline]
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }

    /// Rejection reason, if any
    #[must_use]
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Self::Accepted => None,
            Self::Rejected(rejection) => Some(rejection),
        }
    }
}

/// Rows removed by a cascading delete, per kind
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CascadeSummary {
    removed: BTreeMap<EntityKind, usize>,
}

impl CascadeSummary {
    /// Rows removed from one table
    #[must_use]
    pub fn removed(&self, kind: EntityKind) -> usize {
        self.removed.get(&kind).copied().unwrap_or(0)
    }

    /// Rows removed across all tables
    #[must_use]
    pub fn total(&self) -> usize {
        self.removed.values().sum()
    }

    fn record(&mut self, kind: EntityKind, count: usize) {
        *self.removed.entry(kind).or_default() += count;
    }
}

/// Rows per table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableCounts {
    /// Colleges
    pub colleges: usize,
    /// Programs
    pub programs: usize,
    /// Students
    pub students: usize,
}

/// Repository owning the three entity tables
#[derive(Debug)]
pub struct RecordStore {
    colleges: Table<College>,
    programs: Table<Program>,
    students: Table<Student>,
    foreign_keys: Vec<ForeignKey>,
}

impl RecordStore {
    /// Open CSV-backed tables at the configured locations, creating missing files
    ///
    /// # Errors
    /// I/O or CSV errors from reading the tables, or
    /// [`StoreError::DuplicateKey`] if a file repeats a key.
    pub fn open(config: &StoreConfig) -> StoreResult<Self> {
        tracing::info!("Opening record store in {}", config.data_dir.display());
        Self::with_storages(
            Box::new(CsvStorage::new(config.path_for(EntityKind::College))),
            Box::new(CsvStorage::new(config.path_for(EntityKind::Program))),
            Box::new(CsvStorage::new(config.path_for(EntityKind::Student))),
        )
    }

    /// Store with empty in-memory tables
    ///
    /// # Errors
    /// Never fails in practice; kept fallible to match [`RecordStore::open`].
    pub fn in_memory() -> StoreResult<Self> {
        Self::with_storages(
            Box::new(MemoryStorage::new()),
            Box::new(MemoryStorage::new()),
            Box::new(MemoryStorage::new()),
        )
    }

    /// Store over arbitrary persistence adapters
    ///
    /// # Errors
    /// Whatever the adapters return while loading.
    pub fn with_storages(
        colleges: Box<dyn TableStorage<College>>,
        programs: Box<dyn TableStorage<Program>>,
        students: Box<dyn TableStorage<Student>>,
    ) -> StoreResult<Self> {
        let store = Self {
            colleges: Table::open(colleges)?,
            programs: Table::open(programs)?,
            students: Table::open(students)?,
            foreign_keys: FOREIGN_KEYS.to_vec(),
        };
        tracing::debug!("Record store loaded: {:?}", store.counts());
        Ok(store)
    }

    /// With a custom relationship table
    #[must_use]
    pub fn with_foreign_keys(mut self, foreign_keys: Vec<ForeignKey>) -> Self {
        self.foreign_keys = foreign_keys;
        self
    }

    /// Declared relationships
    #[inline]
    #[must_use]
    pub fn foreign_keys(&self) -> &[ForeignKey] {
        &self.foreign_keys
    }

    /// Table for an entity type
    #[inline]
    #[must_use]
    pub fn table<E: Entity>(&self) -> &Table<E> {
        E::table(self)
    }

    /// Mutable table for an entity type
    #[inline]
    pub fn table_mut<E: Entity>(&mut self) -> &mut Table<E> {
        E::table_mut(self)
    }

    /// College table
    #[inline]
    #[must_use]
    pub fn colleges(&self) -> &Table<College> {
        &self.colleges
    }

    /// Program table
    #[inline]
    #[must_use]
    pub fn programs(&self) -> &Table<Program> {
        &self.programs
    }

    /// Student table
    #[inline]
    #[must_use]
    pub fn students(&self) -> &Table<Student> {
        &self.students
    }

    /// Re-read all three tables from storage
    ///
    /// # Errors
    /// Storage errors from any table.
    pub fn reload(&mut self) -> StoreResult<()> {
        self.colleges.reload()?;
        self.programs.reload()?;
        self.students.reload()
    }

    /// Rows per table
    #[must_use]
    pub fn counts(&self) -> TableCounts {
        TableCounts {
            colleges: self.colleges.len(),
            programs: self.programs.len(),
            students: self.students.len(),
        }
    }

    /// Whether a primary key exists in the table of `kind`
    #[must_use]
    pub fn contains(&self, kind: EntityKind, key: &str) -> bool {
        self.linked(kind).contains_key(key)
    }

    fn linked(&self, kind: EntityKind) -> &dyn Linked {
        match kind {
            EntityKind::College => &self.colleges,
            EntityKind::Program => &self.programs,
            EntityKind::Student => &self.students,
        }
    }

    fn linked_mut(&mut self, kind: EntityKind) -> &mut dyn Linked {
        match kind {
            EntityKind::College => &mut self.colleges,
            EntityKind::Program => &mut self.programs,
            EntityKind::Student => &mut self.students,
        }
    }

    /// Append a record without validation (see [`RecordStore::create`])
    ///
    /// # Errors
    /// [`StoreError::DuplicateKey`] or a storage error.
    pub fn insert<E: Entity>(&mut self, record: E) -> StoreResult<()> {
        tracing::info!("Inserting {} '{}'", E::KIND, record.primary_key());
        E::table_mut(self).insert(record)
    }

    /// Replace the first record matching `field` without cascading
    ///
    /// # Errors
    /// [`StoreError::DuplicateKey`] or a storage error.
    pub fn update<E: Entity>(&mut self, field: E::Field, value: &str, record: E) -> StoreResult<bool> {
        E::table_mut(self).update(field, value, record)
    }

    /// Remove every record matching `field` without cascading
    ///
    /// # Errors
    /// A storage error.
    pub fn delete<E: Entity>(&mut self, field: E::Field, value: &str) -> StoreResult<usize> {
        E::table_mut(self).delete(field, value)
    }

    /// Update the record keyed by `old_key`, rewriting references to it when the key changes
    ///
    /// Returns `false` and touches nothing if `old_key` does not exist. A
    /// change of case only is not a key change.
    ///
    /// # Errors
    /// [`StoreError::DuplicateKey`] if the new key is taken, or a storage error.
    pub fn update_cascading<E: Entity>(&mut self, old_key: &str, record: E) -> StoreResult<bool> {
        let new_key = record.primary_key().to_string();
        if !E::table_mut(self).update(E::Field::PRIMARY, old_key, record)? {
            tracing::debug!("No {} '{}' to update", E::KIND, old_key);
            return Ok(false);
        }
        if keys_match(old_key, &new_key) {
            return Ok(true);
        }

        tracing::info!("Renamed {} '{}' to '{}'", E::KIND, old_key, new_key);
        let relationships: Vec<ForeignKey> = children_of(&self.foreign_keys, E::KIND)
            .filter(|fk| fk.on_rename == ReferentialAction::Cascade)
            .copied()
            .collect();

        for fk in relationships {
            let child = self.linked_mut(fk.child);
            let changed = child.rewrite_column(fk.column, old_key, &new_key)?;
            if changed > 0 {
                child.flush()?;
                tracing::info!("Rewrote {} {} references to '{}'", changed, fk.child, new_key);
            }
        }
        Ok(true)
    }

    /// Delete the record keyed by `key` and every record that transitively depends on it
    ///
    /// Each touched table is written once, parents first.
    ///
    /// # Errors
    /// A storage error; tables written before the failure stay written.
    pub fn delete_cascading<E: Entity>(&mut self, key: &str) -> StoreResult<CascadeSummary> {
        let mut summary = CascadeSummary::default();
        let touched = self.dependents_of(E::KIND);

        let root = BTreeSet::from([fold_key(key)]);
        let removed = E::table_mut(self).remove_matching(E::Field::PRIMARY, &root);
        summary.record(E::KIND, removed.len());

        let mut frontier = VecDeque::from([(E::KIND, root)]);
        while let Some((parent, keys)) = frontier.pop_front() {
            let relationships: Vec<ForeignKey> = children_of(&self.foreign_keys, parent)
                .filter(|fk| fk.on_delete == ReferentialAction::Cascade)
                .copied()
                .collect();

            for fk in relationships {
                let removed = self.linked_mut(fk.child).remove_matching(fk.column, &keys)?;
                summary.record(fk.child, removed.len());
                if !removed.is_empty() {
                    frontier.push_back((fk.child, removed.iter().map(|k| fold_key(k)).collect()));
                }
            }
        }

        for kind in touched {
            self.linked_mut(kind).flush()?;
        }

        tracing::info!(
            "Deleted {} '{}' ({} rows across tables)",
            E::KIND,
            key,
            summary.total()
        );
        Ok(summary)
    }

    /// `kind` followed by every kind reachable through cascading deletes, parents first
    fn dependents_of(&self, kind: EntityKind) -> Vec<EntityKind> {
        let mut order = vec![kind];
        let mut next = 0;
        while let Some(&parent) = order.get(next) {
            for fk in children_of(&self.foreign_keys, parent) {
                if fk.on_delete == ReferentialAction::Cascade && !order.contains(&fk.child) {
                    order.push(fk.child);
                }
            }
            next += 1;
        }
        order
    }

    /// Rename or edit a college, cascading a code change into its programs
    ///
    /// # Errors
    /// See [`RecordStore::update_cascading`].
    pub fn update_college(&mut self, old_code: &str, college: College) -> StoreResult<bool> {
        self.update_cascading(old_code, college)
    }

    /// Rename or edit a program, cascading a code change into its students
    ///
    /// # Errors
    /// See [`RecordStore::update_cascading`].
    pub fn update_program(&mut self, old_code: &str, program: Program) -> StoreResult<bool> {
        self.update_cascading(old_code, program)
    }

    /// Delete a college with its programs and their students
    ///
    /// # Errors
    /// See [`RecordStore::delete_cascading`].
    pub fn delete_college(&mut self, code: &str) -> StoreResult<CascadeSummary> {
        self.delete_cascading::<College>(code)
    }

    /// Delete a program with its students
    ///
    /// # Errors
    /// See [`RecordStore::delete_cascading`].
    pub fn delete_program(&mut self, code: &str) -> StoreResult<CascadeSummary> {
        self.delete_cascading::<Program>(code)
    }

    /// Validate a new record against the current tables
    ///
    /// # Errors
    /// Returns the [`Rejection`] that stopped the record.
    pub fn check_new<E: Entity>(&self, record: &E) -> Result<(), Rejection> {
        admit(
            record,
            &self.foreign_keys,
            |kind, code| self.contains(kind, code),
            |key| E::table(self).contains_key(key),
        )
    }

    /// Validate and insert a record
    ///
    /// # Errors
    /// Only storage errors; validation failures come back as [`Admission::Rejected`].
    pub fn create<E: Entity>(&mut self, record: E) -> StoreResult<Admission> {
        if let Err(rejection) = self.check_new(&record) {
            tracing::debug!("Rejected new {}: {}", E::KIND, rejection);
            return Ok(Admission::Rejected(rejection));
        }
        self.insert(record)?;
        Ok(Admission::Accepted)
    }

    /// Validate and apply an edit of the record keyed by `old_key`
    ///
    /// Editing a key that does not exist is rejected with
    /// [`Rejection::NotFound`].
    ///
    /// The duplicate check only applies when the key changes
    /// (case-insensitively). Key changes cascade into dependents.
    ///
    /// # Errors
    /// Only storage errors; validation failures come back as [`Admission::Rejected`].
    pub fn edit<E: Entity>(&mut self, old_key: &str, record: E) -> StoreResult<Admission> {
        let key_changed = !keys_match(old_key, record.primary_key());
        let checked = admit(
            &record,
            &self.foreign_keys,
            |kind, code| self.contains(kind, code),
            |key| key_changed && E::table(self).contains_key(key),
        );
        if let Err(rejection) = checked {
            tracing::debug!("Rejected edit of {} '{}': {}", E::KIND, old_key, rejection);
            return Ok(Admission::Rejected(rejection));
        }
        if !self.update_cascading(old_key, record)? {
            return Ok(Admission::Rejected(Rejection::NotFound {
                kind: E::KIND,
                key: old_key.to_string(),
            }));
        }
        Ok(Admission::Accepted)
    }

    /// College code of a student, looked up through the student's program
    #[must_use]
    pub fn college_of(&self, student: &Student) -> Option<&str> {
        self.programs
            .get(&student.program_code)
            .map(|program| program.college_code.as_str())
    }

    /// Sort students by the college of their program (unknown programs sort as empty)
    #[must_use]
    pub fn sort_students_by_college(&self, students: &[Student], descending: bool) -> Vec<Student> {
        let mut keyed: Vec<(String, &Student)> = students
            .iter()
            .map(|s| (fold_key(self.college_of(s).unwrap_or_default()), s))
            .collect();
        if descending {
            keyed.sort_by(|(a, _), (b, _)| b.cmp(a));
        } else {
            keyed.sort_by(|(a, _), (b, _)| a.cmp(b));
        }
        keyed.into_iter().map(|(_, s)| s.clone()).collect()
    }

    /// Every record of `E`, sorted
    #[must_use]
    pub fn sorted<E: Entity>(&self, column: SortColumn<E::Field>, descending: bool) -> Vec<E> {
        sort(&E::table(self).load(), column, descending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{CollegeField, StudentField};
    use pretty_assertions::assert_eq;

    fn seeded() -> RecordStore {
        let mut store = RecordStore::in_memory().unwrap();
        store.insert(College::new("CCS", "Computer Studies")).unwrap();
        store.insert(College::new("COE", "Engineering")).unwrap();
        store.insert(Program::new("BSCS", "Computer Science", "CCS")).unwrap();
        store.insert(Program::new("BSIT", "Information Technology", "ccs")).unwrap();
        store.insert(Program::new("BSCE", "Civil Engineering", "COE")).unwrap();
        store.insert(Student::new("2023-0001", "Juan", "Cruz", "BSCS")).unwrap();
        store.insert(Student::new("2023-0002", "Ana", "Reyes", "BSIT")).unwrap();
        store.insert(Student::new("2023-0003", "Ben", "Santos", "BSCE")).unwrap();
        store
    }

    #[test]
    fn rename_college_rewrites_programs() {
        let mut store = seeded();
        assert!(store
            .update_college("CCS", College::new("CCIS", "Computing"))
            .unwrap());

        assert!(!store.colleges().contains_key("CCS"));
        assert_eq!(store.programs().get("BSCS").unwrap().college_code, "CCIS");
        assert_eq!(store.programs().get("BSIT").unwrap().college_code, "CCIS");
        assert_eq!(store.programs().get("BSCE").unwrap().college_code, "COE");
    }

    #[test]
    fn case_only_rename_does_not_cascade() {
        let mut store = seeded();
        store
            .update_college("CCS", College::new("ccs", "Computer Studies"))
            .unwrap();
        assert_eq!(store.programs().get("BSIT").unwrap().college_code, "ccs");
        assert_eq!(store.programs().get("BSCS").unwrap().college_code, "CCS");
    }

    #[test]
    fn rename_missing_parent_touches_nothing() {
        let mut store = seeded();
        let found = store
            .update_program("NOPE", Program::new("NEW", "New", "CCS"))
            .unwrap();
        assert!(!found);
        assert!(!store.programs().contains_key("NEW"));
    }

    #[test]
    fn rename_program_rewrites_students() {
        let mut store = seeded();
        store
            .update_program("BSCS", Program::new("BSCOMSCI", "Computer Science", "CCS"))
            .unwrap();
        assert_eq!(store.students().get("2023-0001").unwrap().program_code, "BSCOMSCI");
        assert_eq!(store.students().get("2023-0002").unwrap().program_code, "BSIT");
    }

    #[test]
    fn delete_college_is_transitive() {
        let mut store = seeded();
        let summary = store.delete_college("ccs").unwrap();

        assert_eq!(summary.removed(EntityKind::College), 1);
        assert_eq!(summary.removed(EntityKind::Program), 2);
        assert_eq!(summary.removed(EntityKind::Student), 2);
        assert_eq!(
            store.counts(),
            TableCounts {
                colleges: 1,
                programs: 1,
                students: 1
            }
        );
        assert!(store.students().contains_key("2023-0003"));
    }

    #[test]
    fn delete_program_removes_students() {
        let mut store = seeded();
        let summary = store.delete_program("BSCS").unwrap();
        assert_eq!(summary.total(), 2);
        assert!(!store.students().contains_key("2023-0001"));
        assert!(store.programs().contains_key("BSIT"));
    }

    #[test]
    fn delete_missing_key_is_noop() {
        let mut store = seeded();
        let before = store.students().load();
        let summary = store.delete_college("XYZ").unwrap();
        assert_eq!(summary.total(), 0);
        assert_eq!(store.students().load(), before);
    }

    #[test]
    fn no_action_relationship_leaves_children() {
        let fks = vec![ForeignKey {
            on_delete: ReferentialAction::NoAction,
            on_rename: ReferentialAction::NoAction,
            ..FOREIGN_KEYS[0]
        }];
        let mut store = seeded().with_foreign_keys(fks);

        store.update_college("CCS", College::new("CCIS", "Computing")).unwrap();
        assert_eq!(store.programs().get("BSCS").unwrap().college_code, "CCS");

        store.delete_college("CCIS").unwrap();
        assert_eq!(store.programs().len(), 3);
    }

    #[test]
    fn create_rejects_missing_parent() {
        let mut store = seeded();
        let admission = store
            .create(Student::new("2024-0001", "New", "Person", "BSXX"))
            .unwrap();
        assert!(matches!(
            admission,
            Admission::Rejected(Rejection::MissingParent { parent: EntityKind::Program, .. })
        ));
        assert_eq!(store.students().len(), 3);
    }

    #[test]
    fn create_rejects_duplicates_case_insensitively() {
        let mut store = seeded();
        let admission = store.create(College::new("coe", "Again")).unwrap();
        assert_eq!(
            admission.rejection().map(ToString::to_string),
            Some("'coe': already exists".to_string())
        );
    }

    #[test]
    fn create_accepts_valid_student() {
        let mut store = seeded();
        let admission = store
            .create(Student::new("2024-0001", "New", "Person", "bscs").with_year("1"))
            .unwrap();
        assert!(admission.is_accepted());
        assert!(store.students().contains_key("2024-0001"));
    }

    #[test]
    fn edit_same_key_skips_duplicate_check() {
        let mut store = seeded();
        let admission = store
            .edit("2023-0001", Student::new("2023-0001", "Juan", "dela Cruz", "BSCS"))
            .unwrap();
        assert!(admission.is_accepted());
        assert_eq!(store.students().get("2023-0001").unwrap().lastname, "dela Cruz");
    }

    #[test]
    fn edit_into_taken_key_rejected() {
        let mut store = seeded();
        let admission = store
            .edit("2023-0001", Student::new("2023-0002", "Juan", "Cruz", "BSCS"))
            .unwrap();
        assert!(matches!(
            admission,
            Admission::Rejected(Rejection::DuplicateKey { .. })
        ));
    }

    #[test]
    fn edit_missing_record_rejected() {
        let mut store = seeded();
        let admission = store.edit("NOPE", College::new("NEW", "New")).unwrap();
        assert_eq!(
            admission,
            Admission::Rejected(Rejection::NotFound {
                kind: EntityKind::College,
                key: "NOPE".to_string(),
            })
        );
        assert!(!store.colleges().contains_key("NEW"));
        assert_eq!(store.colleges().len(), 2);
    }

    #[test]
    fn cyclic_relationships_terminate() {
        let fks = vec![
            ForeignKey::cascading(EntityKind::Program, "college_code", EntityKind::College),
            ForeignKey::cascading(EntityKind::College, "name", EntityKind::Program),
        ];
        let mut store = seeded().with_foreign_keys(fks);

        let summary = store.delete_college("XYZ").unwrap();
        assert_eq!(summary.total(), 0);

        let summary = store.delete_college("COE").unwrap();
        assert_eq!(summary.removed(EntityKind::College), 1);
        assert_eq!(summary.removed(EntityKind::Program), 1);
        assert_eq!(store.programs().len(), 2);
    }

    #[test]
    fn delete_touches_every_dependent_table() {
        let store = seeded();
        assert_eq!(
            store.dependents_of(EntityKind::College),
            vec![EntityKind::College, EntityKind::Program, EntityKind::Student]
        );
        assert_eq!(
            store.dependents_of(EntityKind::Student),
            vec![EntityKind::Student]
        );
    }

    #[test]
    fn edit_college_code_cascades() {
        let mut store = seeded();
        let admission = store.edit("COE", College::new("CEN", "Engineering")).unwrap();
        assert!(admission.is_accepted());
        assert_eq!(store.programs().get("BSCE").unwrap().college_code, "CEN");
    }

    #[test]
    fn college_lookup_and_sort() {
        let store = seeded();
        let students = store.students().load();
        assert_eq!(store.college_of(&students[0]), Some("CCS"));

        let sorted = store.sort_students_by_college(&students, true);
        assert_eq!(sorted[0].id, "2023-0003");

        let orphan = Student::new("2023-0009", "No", "Program", "NONE");
        assert_eq!(store.college_of(&orphan), None);
    }

    #[test]
    fn plain_update_and_delete_do_not_cascade() {
        let mut store = seeded();
        store
            .update(CollegeField::Code, "CCS", College::new("CCIS", "Computing"))
            .unwrap();
        assert_eq!(store.programs().get("BSCS").unwrap().college_code, "CCS");

        let removed = store.delete::<Student>(StudentField::ProgramCode, "BSIT").unwrap();
        assert_eq!(removed, 1);
    }

    #[test]
    fn sorted_by_column() {
        let store = seeded();
        let programs = store.sorted::<Program>(SortColumn::Name, false);
        assert_eq!(programs[0].code, "BSCE");
    }
}
