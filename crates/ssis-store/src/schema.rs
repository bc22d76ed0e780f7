//! Declared foreign-key relationships
//!
//! The cascade routines in [`crate::store`] are driven entirely by this table:
//! adding a relationship here is enough for renames and deletes to propagate.

use crate::record::EntityKind;

/// What happens to children when the parent key changes or disappears
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferentialAction {
    /// Propagate: rewrite the reference on rename, remove the child on delete
    Cascade,
    /// Leave children untouched
    NoAction,
}

/// A child column referencing a parent primary key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForeignKey {
    /// Table holding the reference
    pub child: EntityKind,
    /// Column in the child table
    pub column: &'static str,
    /// Referenced table (by primary key)
    pub parent: EntityKind,
    /// Action when the parent primary key is renamed
    pub on_rename: ReferentialAction,
    /// Action when the parent is deleted
    pub on_delete: ReferentialAction,
}

impl ForeignKey {
    /// Cascading relationship in both directions
    #[must_use]
    pub const fn cascading(child: EntityKind, column: &'static str, parent: EntityKind) -> Self {
        Self {
            child,
            column,
            parent,
            on_rename: ReferentialAction::Cascade,
            on_delete: ReferentialAction::Cascade,
        }
    }
}

/// College → Program → Student
pub const FOREIGN_KEYS: &[ForeignKey] = &[
    ForeignKey::cascading(EntityKind::Program, "college_code", EntityKind::College),
    ForeignKey::cascading(EntityKind::Student, "program_code", EntityKind::Program),
];

/// Relationships in which `kind` is the referenced parent
pub fn children_of(
    foreign_keys: &[ForeignKey],
    kind: EntityKind,
) -> impl Iterator<Item = &ForeignKey> {
    foreign_keys.iter().filter(move |fk| fk.parent == kind)
}

/// Relationships in which `kind` holds the reference
pub fn parents_of(
    foreign_keys: &[ForeignKey],
    kind: EntityKind,
) -> impl Iterator<Item = &ForeignKey> {
    foreign_keys.iter().filter(move |fk| fk.child == kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_column_is_declared_on_its_child() {
        for fk in FOREIGN_KEYS {
            assert!(
                fk.child.columns().contains(&fk.column),
                "{} has no column {}",
                fk.child,
                fk.column
            );
        }
    }

    #[test]
    fn parents_precede_children_in_import_order() {
        let order = EntityKind::import_order();
        for fk in FOREIGN_KEYS {
            let parent = order.iter().position(|k| *k == fk.parent);
            let child = order.iter().position(|k| *k == fk.child);
            assert!(parent < child);
        }
    }

    #[test]
    fn lookups_by_kind() {
        let children: Vec<_> = children_of(FOREIGN_KEYS, EntityKind::College)
            .map(|fk| fk.child)
            .collect();
        assert_eq!(children, vec![EntityKind::Program]);

        assert_eq!(parents_of(FOREIGN_KEYS, EntityKind::College).count(), 0);
        assert_eq!(children_of(FOREIGN_KEYS, EntityKind::Student).count(), 0);
    }
}
