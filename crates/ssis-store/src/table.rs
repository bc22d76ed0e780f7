//! Indexed in-memory table mirrored to a [`TableStorage`]
//!
//! Rows live in an [`IndexMap`] keyed by the case-folded primary key, so
//! lookups are O(1) and iteration keeps insertion order. Every mutation
//! rewrites the whole table through the storage adapter before returning.

use crate::error::{StoreError, StoreResult};
use crate::record::{fold_key, keys_match, Field, Record};
use crate::storage::TableStorage;
use indexmap::IndexMap;
use std::collections::BTreeSet;
use std::fmt;

/// One entity table
pub struct Table<E: Record> {
    rows: IndexMap<String, E>,
    storage: Box<dyn TableStorage<E>>,
}

impl<E: Record> Table<E> {
    /// Open a table, creating its persisted form if missing
    ///
    /// # Errors
    /// Returns an I/O error if the storage cannot be read, or
    /// [`StoreError::DuplicateKey`] if two stored rows share a key.
    pub fn open(storage: Box<dyn TableStorage<E>>) -> StoreResult<Self> {
        storage.ensure()?;
        let rows = Self::index(storage.load()?)?;
        Ok(Self { rows, storage })
    }

    fn index(records: Vec<E>) -> StoreResult<IndexMap<String, E>> {
        let mut rows = IndexMap::with_capacity(records.len());
        for record in records {
            let key = fold_key(record.primary_key());
            if rows.contains_key(&key) {
                return Err(StoreError::duplicate_key(E::KIND, record.primary_key()));
            }
            rows.insert(key, record);
        }
        Ok(rows)
    }

    /// Re-read the persisted table, discarding in-memory state
    ///
    /// # Errors
    /// Same as [`Table::open`].
    pub fn reload(&mut self) -> StoreResult<()> {
        self.rows = Self::index(self.storage.load()?)?;
        Ok(())
    }

    /// Ordered snapshot of every record
    #[must_use]
    pub fn load(&self) -> Vec<E> {
        self.rows.values().cloned().collect()
    }

    /// Iterate records in order
    pub fn iter(&self) -> impl Iterator<Item = &E> {
        self.rows.values()
    }

    /// Primary keys as stored, in order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.rows.values().map(|record| record.primary_key())
    }

    /// Number of records
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Lookup by primary key (case-insensitive)
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&E> {
        self.rows.get(&fold_key(key))
    }

    /// Whether a primary key is present (case-insensitive)
    #[inline]
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.rows.contains_key(&fold_key(key))
    }

    /// Storage location for logs
    #[must_use]
    pub fn location(&self) -> String {
        self.storage.location()
    }

    /// Replace the whole table with `records`, in order
    ///
    /// # Errors
    /// [`StoreError::DuplicateKey`] if `records` repeat a key (nothing is
    /// written), or the storage error if the write fails.
    pub fn save(&mut self, records: Vec<E>) -> StoreResult<()> {
        self.rows = Self::index(records)?;
        self.flush()
    }

    /// Append one record and persist
    ///
    /// Callers validate parents beforehand; only key uniqueness is enforced.
    ///
    /// # Errors
    /// [`StoreError::DuplicateKey`] if the key is taken, or the storage error.
    pub fn insert(&mut self, record: E) -> StoreResult<()> {
        let key = fold_key(record.primary_key());
        if self.rows.contains_key(&key) {
            return Err(StoreError::duplicate_key(E::KIND, record.primary_key()));
        }
        self.rows.insert(key, record);
        self.flush()
    }

    /// Replace the first record whose `field` matches `value` with `record`
    ///
    /// Returns `false` without writing when nothing matches.
    ///
    /// # Errors
    /// [`StoreError::DuplicateKey`] if `record` would take another row's key,
    /// or the storage error.
    pub fn update(&mut self, field: E::Field, value: &str, record: E) -> StoreResult<bool> {
        let position = if field == E::Field::PRIMARY {
            self.rows.get_index_of(&fold_key(value))
        } else {
            self.rows
                .values()
                .position(|existing| keys_match(existing.get(field), value))
        };
        let Some(position) = position else {
            return Ok(false);
        };

        let new_key = fold_key(record.primary_key());
        let key_changed = self
            .rows
            .get_index(position)
            .is_some_and(|(old_key, _)| *old_key != new_key);

        if key_changed {
            if self.rows.contains_key(&new_key) {
                return Err(StoreError::duplicate_key(E::KIND, record.primary_key()));
            }
            let mut replacement = Some((new_key, record));
            self.rows = std::mem::take(&mut self.rows)
                .into_iter()
                .enumerate()
                .map(|(i, entry)| {
                    if i == position {
                        replacement.take().unwrap_or(entry)
                    } else {
                        entry
                    }
                })
                .collect();
        } else if let Some((_, slot)) = self.rows.get_index_mut(position) {
            *slot = record;
        }

        self.flush()?;
        Ok(true)
    }

    /// Remove every record whose `field` matches `value` and persist the rest
    ///
    /// Returns how many records were removed; the table is written even when
    /// nothing matched.
    ///
    /// # Errors
    /// The storage error if the write fails.
    pub fn delete(&mut self, field: E::Field, value: &str) -> StoreResult<usize> {
        let target = fold_key(value);
        let before = self.rows.len();
        self.rows
            .retain(|_, record| fold_key(record.get(field)) != target);
        let removed = before - self.rows.len();
        self.flush()?;
        Ok(removed)
    }

    /// Rewrite `field` from `old` to `new` in memory; returns rows changed
    pub(crate) fn rewrite_column(&mut self, field: E::Field, old: &str, new: &str) -> usize {
        let mut changed = 0;
        for record in self.rows.values_mut() {
            if keys_match(record.get(field), old) {
                record.set(field, new.to_string());
                changed += 1;
            }
        }
        changed
    }

    /// Drop rows whose `field` (folded) is in `keys` in memory; returns removed primary keys
    pub(crate) fn remove_matching(&mut self, field: E::Field, keys: &BTreeSet<String>) -> Vec<String> {
        let mut removed = Vec::new();
        self.rows.retain(|_, record| {
            if keys.contains(&fold_key(record.get(field))) {
                removed.push(record.primary_key().to_string());
                false
            } else {
                true
            }
        });
        removed
    }

    /// Persist the in-memory rows
    ///
    /// On failure the table is reloaded so memory matches what storage holds.
    pub(crate) fn flush(&mut self) -> StoreResult<()> {
        let records: Vec<&E> = self.rows.values().collect();
        match self.storage.save(&records) {
            Ok(()) => Ok(()),
            Err(err) => {
                tracing::warn!("Write to {} failed: {}", self.storage.location(), err);
                if let Err(reload_err) = self.reload() {
                    tracing::warn!(
                        "Reload of {} after failed write also failed: {}",
                        self.storage.location(),
                        reload_err
                    );
                }
                Err(err)
            }
        }
    }
}

impl<E: Record> fmt::Debug for Table<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Table")
            .field("kind", &E::KIND)
            .field("rows", &self.rows.len())
            .field("storage", &self.storage.location())
            .finish()
    }
}
