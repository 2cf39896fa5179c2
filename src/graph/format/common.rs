//! Helpers shared by the Mermaid and DOT emitters.

use super::DiagramOptions;
use crate::schema::{is_unique, Cardinality, Column, Schema, Table};
use tracing::warn;

/// Marker standing in for elided enum members
pub(super) const ELLIPSIS: &str = "...";

/// A foreign key whose both endpoints are present in the schema
#[derive(Debug)]
pub(super) struct Relationship<'a> {
    /// Referenced (parent) table
    pub target_table: &'a Table,
    /// Table holding the foreign key column
    pub source_table: &'a Table,
    /// The foreign key column, used as the relationship label
    pub source_column: &'a Column,
    pub target_cardinality: Cardinality,
    pub source_cardinality: Cardinality,
}

/// Key role of a column: `PK,FK`, `PK`, `FK` or `UK`
pub(super) fn key_role(table: &Table, column: &Column) -> Option<&'static str> {
    match (column.primary_key, column.is_foreign_key()) {
        (true, true) => Some("PK,FK"),
        (true, false) => Some("PK"),
        (false, true) => Some("FK"),
        (false, false) if is_unique(table, column) => Some("UK"),
        (false, false) => None,
    }
}

/// Annotations for a column: comment, nullable, indexed, then enum members
pub(super) fn column_options(column: &Column, options: &DiagramOptions) -> Vec<String> {
    let mut result = Vec::new();

    if !options.omit_comments {
        if let Some(comment) = column.comment.as_deref() {
            if !comment.trim().is_empty() {
                result.push(comment.to_string());
            }
        }
    }

    if column.nullable == Some(true) {
        result.push("nullable".to_string());
    }

    if column.index == Some(true) {
        result.push("indexed".to_string());
    }

    if let Some(values) = &column.enum_values {
        result.extend(enum_members(values, options.max_enum_members));
    }

    result
}

/// Enum members to display, keeping the first and last values when eliding
pub(super) fn enum_members(values: &[String], max: usize) -> Vec<String> {
    if max == 0 {
        return Vec::new();
    }
    if values.len() <= max {
        return values.to_vec();
    }

    let mut members: Vec<String> = values[..max - 1].to_vec();
    members.push(ELLIPSIS.to_string());
    if let Some(last) = values.last() {
        members.push(last.clone());
    }
    members
}

/// Replace commas inside type parameters at any nesting depth, trimming the
/// whitespace around them: `NUMERIC(10, 2)` -> `NUMERIC(10-2)`
pub(super) fn sanitize_type(col_type: &str, delimiter: &str) -> String {
    let mut result = String::with_capacity(col_type.len());
    let mut depth = 0usize;
    let mut chars = col_type.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '(' => {
                depth += 1;
                result.push(c);
            }
            ')' => {
                depth = depth.saturating_sub(1);
                result.push(c);
            }
            ',' if depth > 0 => {
                result.truncate(result.trim_end().len());
                result.push_str(delimiter);
                while chars.next_if(|c| c.is_whitespace()).is_some() {}
            }
            _ => result.push(c),
        }
    }

    result
}

/// Resolve the relationships of a foreign key column.
///
/// Targets missing from `schema` are expected after filtering; they are
/// logged and skipped.
pub(super) fn relationships<'a>(
    schema: &'a Schema,
    table: &'a Table,
    column: &'a Column,
) -> Vec<Relationship<'a>> {
    let mut result = Vec::with_capacity(column.foreign_keys.len());

    for fk in &column.foreign_keys {
        let Some(target_table) = schema.get_table(fk.target_table()) else {
            warn!(
                "Table '{}.{}' is a foreign key to '{}' which is not included in the graph, skipping the connection.",
                table.name,
                column.name,
                fk.target_table()
            );
            continue;
        };

        let Some(target_column) = target_table.get_column(fk.target_column()) else {
            warn!(
                "Table '{}.{}' references missing column '{}', skipping the connection.",
                table.name, column.name, fk.target_fullname
            );
            continue;
        };

        result.push(Relationship {
            target_table,
            source_table: table,
            source_column: column,
            target_cardinality: Cardinality::of(target_table, target_column),
            source_cardinality: Cardinality::of(table, column),
        });
    }

    result
}
