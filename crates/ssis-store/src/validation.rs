//! Admission rules shared by interactive edits and bulk import
//!
//! A record is admitted when its required columns are filled, its format
//! checks pass, every declared parent exists and its primary key is free.
//! Failures are returned as [`Rejection`] values, never as errors.

use crate::record::{EntityKind, Field, Record};
use crate::schema::{parents_of, ForeignKey};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static STUDENT_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{4}$").expect("student id pattern is valid"));

/// Check a student ID against `YYYY-NNNN` (four ASCII digits, hyphen, four ASCII digits)
#[inline]
#[must_use]
pub fn is_valid_student_id(id: &str) -> bool {
    STUDENT_ID.is_match(id)
}

/// Why a record was not admitted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// One or more required columns are empty
    MissingFields {
        kind: EntityKind,
        key: String,
        fields: Vec<&'static str>,
    },

    /// Student ID does not follow `YYYY-NNNN`
    InvalidStudentId { id: String },

    /// Referenced parent record does not exist
    MissingParent {
        key: String,
        parent: EntityKind,
        code: String,
    },

    /// Primary key already taken
    DuplicateKey { kind: EntityKind, key: String },

    /// Record to edit does not exist
    NotFound { kind: EntityKind, key: String },
}

impl Rejection {
    /// Key of the rejected record
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::MissingFields { key, .. }
            | Self::MissingParent { key, .. }
            | Self::DuplicateKey { key, .. }
            | Self::NotFound { key, .. } => key,
            Self::InvalidStudentId { id } => id,
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingFields { kind, key, fields } => {
                let pk = kind.columns().first().copied().unwrap_or("key");
                write!(
                    f,
                    "row with {pk} '{key}': missing required fields ({})",
                    fields.join(", ")
                )
            }
            Self::InvalidStudentId { id } => {
                write!(f, "'{id}': invalid ID format, must be YYYY-NNNN")
            }
            Self::MissingParent { key, parent, code } => {
                write!(f, "'{key}': {parent} '{code}' does not exist")
            }
            Self::DuplicateKey { key, .. } => write!(f, "'{key}': already exists"),
            Self::NotFound { kind, key } => write!(f, "'{key}': no such {kind}"),
        }
    }
}

/// Required columns of `record` that are empty
#[must_use]
pub fn missing_fields<E: Record>(record: &E) -> Vec<&'static str> {
    E::REQUIRED
        .iter()
        .filter(|field| record.get(**field).is_empty())
        .map(|field| field.name())
        .collect()
}

/// Decide whether `record` may enter its table
///
/// Checks run in this order and stop at the first failure:
/// 1. required columns non-empty
/// 2. entity format rules ([`Record::check_format`])
/// 3. each declared parent exists (`parent_exists(kind, code)`)
/// 4. primary key not taken (`key_exists(key)`)
pub fn admit<E: Record>(
    record: &E,
    foreign_keys: &[ForeignKey],
    parent_exists: impl Fn(EntityKind, &str) -> bool,
    key_exists: impl Fn(&str) -> bool,
) -> Result<(), Rejection> {
    let key = record.primary_key();

    let missing = missing_fields(record);
    if !missing.is_empty() {
        return Err(Rejection::MissingFields {
            kind: E::KIND,
            key: key.to_string(),
            fields: missing,
        });
    }

    record.check_format()?;

    for fk in parents_of(foreign_keys, E::KIND) {
        let Some(column) = E::field_named(fk.column) else {
            continue;
        };
        let code = record.get(column);
        if !parent_exists(fk.parent, code) {
            return Err(Rejection::MissingParent {
                key: key.to_string(),
                parent: fk.parent,
                code: code.to_string(),
            });
        }
    }

    if key_exists(key) {
        return Err(Rejection::DuplicateKey {
            kind: E::KIND,
            key: key.to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{College, Program, Student};
    use crate::schema::FOREIGN_KEYS;
    use proptest::prelude::*;

    fn nothing_exists(_: EntityKind, _: &str) -> bool {
        false
    }

    #[test]
    fn student_id_examples() {
        assert!(is_valid_student_id("2023-0001"));
        assert!(is_valid_student_id("0000-9999"));
        assert!(!is_valid_student_id("2023-001"));
        assert!(!is_valid_student_id("2023_0001"));
        assert!(!is_valid_student_id("2023-0001\n"));
        assert!(!is_valid_student_id(" 2023-0001"));
        assert!(!is_valid_student_id("２０２３-0001"));
    }

    #[test]
    fn missing_fields_listed_in_order() {
        let student = Student::new("", "Juan", "", "BSCS");
        assert_eq!(missing_fields(&student), vec!["id", "lastname"]);
    }

    #[test]
    fn missing_fields_checked_first() {
        let student = Student::new("bad", "", "Cruz", "BSCS");
        let result = admit(&student, FOREIGN_KEYS, nothing_exists, |_| true);
        assert!(matches!(result, Err(Rejection::MissingFields { .. })));
    }

    #[test]
    fn format_checked_before_parent() {
        let student = Student::new("bad", "Juan", "Cruz", "BSCS");
        let result = admit(&student, FOREIGN_KEYS, nothing_exists, |_| false);
        assert_eq!(
            result,
            Err(Rejection::InvalidStudentId {
                id: "bad".to_string()
            })
        );
    }

    #[test]
    fn missing_parent_names_the_parent() {
        let program = Program::new("BSCS", "Computer Science", "CCS");
        let err = admit(&program, FOREIGN_KEYS, nothing_exists, |_| false).unwrap_err();
        assert_eq!(err.to_string(), "'BSCS': college 'CCS' does not exist");
    }

    #[test]
    fn duplicate_checked_last() {
        let college = College::new("CCS", "Computing");
        let err = admit(&college, FOREIGN_KEYS, nothing_exists, |key| key == "CCS").unwrap_err();
        assert!(err.to_string().contains("already exists"));
        assert_eq!(err.key(), "CCS");
    }

    #[test]
    fn not_found_names_the_kind() {
        let rejection = Rejection::NotFound {
            kind: EntityKind::Program,
            key: "BSXX".to_string(),
        };
        assert_eq!(rejection.to_string(), "'BSXX': no such program");
        assert_eq!(rejection.key(), "BSXX");
    }

    #[test]
    fn admitted_when_parent_present_and_key_free() {
        let student = Student::new("2023-0001", "Juan", "Cruz", "BSCS");
        let result = admit(
            &student,
            FOREIGN_KEYS,
            |kind, code| kind == EntityKind::Program && code == "BSCS",
            |_| false,
        );
        assert!(result.is_ok());
    }

    proptest! {
        #[test]
        fn prop_matching_ids_always_pass(year in 0u32..10_000, serial in 0u32..10_000) {
            let id = format!("{year:04}-{serial:04}");
            prop_assert!(is_valid_student_id(&id));
        }

        #[test]
        fn prop_non_matching_ids_rejected(id in "\\PC{0,12}") {
            let bytes = id.as_bytes();
            let shaped = bytes.len() == 9
                && bytes[4] == b'-'
                && bytes[..4].iter().all(u8::is_ascii_digit)
                && bytes[5..].iter().all(u8::is_ascii_digit);
            prop_assert_eq!(is_valid_student_id(&id), shaped);
        }
    }
}
