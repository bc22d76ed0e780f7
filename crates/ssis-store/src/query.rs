//! Search, sort and existence checks over record slices
//!
//! These work on any ordered sequence of records, whether a table snapshot or
//! an already-filtered view, and never touch persistence.

use crate::error::{StoreError, StoreResult};
use crate::record::{fold_key, keys_match, Field, Record};
use std::cmp::Ordering;

/// Case-insensitive check for a record whose `field` equals `value`
#[must_use]
pub fn exists<E: Record>(records: &[E], field: E::Field, value: &str) -> bool {
    records.iter().any(|record| keys_match(record.get(field), value))
}

/// Records with any column containing `query` (case-insensitive), in input order
///
/// An empty query returns every record unchanged.
#[must_use]
pub fn search<E: Record>(records: &[E], query: &str) -> Vec<E> {
    if query.is_empty() {
        return records.to_vec();
    }
    let needle = fold_key(query);
    records
        .iter()
        .filter(|record| {
            E::Field::ALL
                .iter()
                .any(|field| fold_key(record.get(*field)).contains(&needle))
        })
        .cloned()
        .collect()
}

/// Column to sort by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn<F> {
    /// Synthetic `"name"` column: [`Record::display_name`], case-folded
    Name,
    /// A declared column
    Field(F),
}

impl<F: Field> SortColumn<F> {
    /// Resolve a column name; `"name"` always selects [`SortColumn::Name`]
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        if name == "name" {
            Some(Self::Name)
        } else {
            F::parse(name).map(Self::Field)
        }
    }
}

impl<F> From<F> for SortColumn<F> {
    fn from(field: F) -> Self {
        Self::Field(field)
    }
}

/// Comparable form of a column value
#[derive(Debug, Clone, PartialEq, Eq)]
enum SortKey<'a> {
    /// ASCII digits only, leading zeros stripped
    Number(&'a str),
    /// Anything else, case-folded
    Text(String),
}

impl<'a> SortKey<'a> {
    fn of(value: &'a str) -> Self {
        if !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()) {
            let trimmed = value.trim_start_matches('0');
            Self::Number(if trimmed.is_empty() { "0" } else { trimmed })
        } else {
            Self::Text(fold_key(value))
        }
    }
}

impl Ord for SortKey<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            // Longer digit strings are larger once leading zeros are gone
            (Self::Number(a), Self::Number(b)) => a.len().cmp(&b.len()).then_with(|| a.cmp(b)),
            (Self::Number(_), Self::Text(_)) => Ordering::Less,
            (Self::Text(_), Self::Number(_)) => Ordering::Greater,
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
        }
    }
}

impl PartialOrd for SortKey<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn sort_key<E: Record>(record: &E, column: SortColumn<E::Field>) -> SortKey<'_> {
    match column {
        SortColumn::Name => SortKey::Text(fold_key(record.display_name())),
        SortColumn::Field(field) => SortKey::of(record.get(field)),
    }
}

/// Stable sort by `column`
///
/// Digit-only values compare numerically (`"2" < "10"`), everything else
/// compares case-folded. Descending order keeps equal records in input order.
#[must_use]
pub fn sort<E: Record>(records: &[E], column: SortColumn<E::Field>, descending: bool) -> Vec<E> {
    let mut keyed: Vec<(SortKey<'_>, &E)> = records
        .iter()
        .map(|record| (sort_key(record, column), record))
        .collect();

    if descending {
        keyed.sort_by(|(a, _), (b, _)| b.cmp(a));
    } else {
        keyed.sort_by(|(a, _), (b, _)| a.cmp(b));
    }

    keyed.into_iter().map(|(_, record)| record.clone()).collect()
}

/// [`sort`] with the column given by name
///
/// # Errors
/// Returns [`StoreError::UnknownField`] if `column` is neither `"name"` nor a
/// declared column of the entity.
pub fn sort_by_name<E: Record>(records: &[E], column: &str, descending: bool) -> StoreResult<Vec<E>> {
    let column = SortColumn::parse(column).ok_or_else(|| StoreError::unknown_field(E::KIND, column))?;
    Ok(sort(records, column, descending))
}

/// [`exists`] with the column given by name
///
/// # Errors
/// Returns [`StoreError::UnknownField`] for an undeclared column.
pub fn exists_by_name<E: Record>(records: &[E], field: &str, value: &str) -> StoreResult<bool> {
    let field = E::field_named(field).ok_or_else(|| StoreError::unknown_field(E::KIND, field))?;
    Ok(exists(records, field, value))
}
