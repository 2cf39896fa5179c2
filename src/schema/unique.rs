//! Uniqueness resolution for relationship cardinality.

use super::{Column, Table};

/// Cardinality of one relationship endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    /// Exactly one row on this side
    One,
    /// Zero or many rows on this side
    Many,
}

impl Cardinality {
    /// Cardinality of the endpoint formed by `column` of `table`
    pub fn of(table: &Table, column: &Column) -> Self {
        if is_unique(table, column) {
            Cardinality::One
        } else {
            Cardinality::Many
        }
    }
}

/// Whether `column` is effectively unique within `table`.
///
/// True for an explicit unique flag, a primary key, or a unique constraint
/// whose only member is the column. Multi-column constraints never count.
pub fn is_unique(table: &Table, column: &Column) -> bool {
    if column.unique == Some(true) || column.primary_key {
        return true;
    }

    table
        .unique_constraints
        .iter()
        .any(|uc| uc.columns.len() == 1 && uc.columns[0] == column.name)
}
