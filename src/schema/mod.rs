//! Uniform schema model consumed by the diagram emitters.
//!
//! This module provides:
//! - Data models for tables, columns, foreign keys and unique constraints
//! - Column ordering policies for display
//! - Uniqueness resolution feeding cardinality inference
//! - Table filtering by include/exclude patterns

pub mod filter;
mod sort;
mod unique;

pub use filter::{filter_schema, resolve_included_tables};
pub use sort::{column_sort_key, sort_columns, ColumnSort};
pub use unique::{is_unique, Cardinality};

use crate::error::{DiagramError, Result};
use indexmap::IndexMap;
use std::collections::BTreeSet;

/// Foreign key reference held by a column
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ForeignKey {
    /// Dotted `[schema.]table.column` path of the referenced column
    pub target_fullname: String,
}

impl ForeignKey {
    /// Create a foreign key, rejecting targets without a table segment
    pub fn new(target_fullname: impl Into<String>) -> Result<Self> {
        let target_fullname = target_fullname.into();
        match target_fullname.rsplit_once('.') {
            Some((table, column)) if !table.is_empty() && !column.is_empty() => {
                Ok(Self { target_fullname })
            }
            _ => Err(DiagramError::config(format!(
                "foreign key target '{}' must have the form table.column",
                target_fullname
            ))),
        }
    }

    /// Key of the referenced table (every segment but the last)
    pub fn target_table(&self) -> &str {
        self.target_fullname
            .rsplit_once('.')
            .map(|(table, _)| table)
            .unwrap_or_default()
    }

    /// Name of the referenced column (the last segment)
    pub fn target_column(&self) -> &str {
        self.target_fullname
            .rsplit_once('.')
            .map(|(_, column)| column)
            .unwrap_or(&self.target_fullname)
    }
}

/// Column definition within a table
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Key of the owning table
    pub table: String,
    /// Column name
    pub name: String,
    /// Declared type, rendered as a string
    pub col_type: String,
    /// Whether this column is part of the primary key
    pub primary_key: bool,
    /// Whether this column allows NULL values (None = unknown)
    pub nullable: Option<bool>,
    /// Referenced columns
    pub foreign_keys: BTreeSet<ForeignKey>,
    /// Explicit unique flag (None = unknown)
    pub unique: Option<bool>,
    /// Explicit index flag (None = unknown)
    pub index: Option<bool>,
    /// Column comment
    pub comment: Option<String>,
    /// Members of an enumerated type, in declaration order
    pub enum_values: Option<Vec<String>>,
}

impl Column {
    pub fn new(name: impl Into<String>, col_type: impl Into<String>) -> Self {
        Self {
            table: String::new(),
            name: name.into(),
            col_type: col_type.into(),
            primary_key: false,
            nullable: None,
            foreign_keys: BTreeSet::new(),
            unique: None,
            index: None,
            comment: None,
            enum_values: None,
        }
    }

    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = Some(nullable);
        self
    }

    pub fn unique(mut self, unique: bool) -> Self {
        self.unique = Some(unique);
        self
    }

    pub fn index(mut self, index: bool) -> Self {
        self.index = Some(index);
        self
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn enum_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enum_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Add a foreign key reference to `target` (`table.column`)
    pub fn references(mut self, target: &str) -> Result<Self> {
        self.foreign_keys.insert(ForeignKey::new(target)?);
        Ok(self)
    }

    pub fn is_foreign_key(&self) -> bool {
        !self.foreign_keys.is_empty()
    }
}

/// Named set of columns enforced unique together
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniqueConstraint {
    pub name: Option<String>,
    pub columns: Vec<String>,
}

/// Complete table definition
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Table name
    pub name: String,
    /// Namespace the table lives in
    pub schema: Option<String>,
    /// Columns in declaration order
    pub columns: IndexMap<String, Column>,
    /// Table-level unique constraints
    pub unique_constraints: Vec<UniqueConstraint>,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schema: None,
            columns: IndexMap::new(),
            unique_constraints: Vec::new(),
        }
    }

    pub fn in_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Key of this table within a [`Schema`]: `schema.name` or `name`
    pub fn fullname(&self) -> String {
        match &self.schema {
            Some(schema) => format!("{}.{}", schema, self.name),
            None => self.name.clone(),
        }
    }

    /// Add a column, binding it to this table
    pub fn add_column(&mut self, mut column: Column) -> Result<()> {
        if self.columns.contains_key(&column.name) {
            return Err(DiagramError::config(format!(
                "duplicate column '{}' in table '{}'",
                column.name,
                self.fullname()
            )));
        }
        column.table = self.fullname();
        self.columns.insert(column.name.clone(), column);
        Ok(())
    }

    /// Builder-style [`Table::add_column`]
    pub fn with_column(mut self, column: Column) -> Result<Self> {
        self.add_column(column)?;
        Ok(self)
    }

    pub fn with_unique_constraint<I, S>(mut self, name: Option<&str>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.unique_constraints.push(UniqueConstraint {
            name: name.map(str::to_string),
            columns: columns.into_iter().map(Into::into).collect(),
        });
        self
    }

    pub fn get_column(&self, name: &str) -> Option<&Column> {
        self.columns.get(name)
    }
}

/// Collection of tables keyed by fullname, in registration order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    tables: IndexMap<String, Table>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a table under its fullname
    pub fn add_table(&mut self, table: Table) -> Result<()> {
        let key = table.fullname();
        if self.tables.contains_key(&key) {
            return Err(DiagramError::config(format!(
                "table '{}' is defined more than once",
                key
            )));
        }
        self.tables.insert(key, table);
        Ok(())
    }

    pub fn from_tables(tables: IndexMap<String, Table>) -> Self {
        Self { tables }
    }

    pub fn get_table(&self, key: &str) -> Option<&Table> {
        self.tables.get(key)
    }

    pub fn contains_table(&self, key: &str) -> bool {
        self.tables.contains_key(key)
    }

    /// Tables in registration order
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.tables.values()
    }

    /// Table keys in registration order
    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_foreign_key_split() {
        let fk = ForeignKey::new("users.id").unwrap();
        assert_eq!(fk.target_table(), "users");
        assert_eq!(fk.target_column(), "id");

        let fk = ForeignKey::new("some_schema.bar.id").unwrap();
        assert_eq!(fk.target_table(), "some_schema.bar");
        assert_eq!(fk.target_column(), "id");
    }

    #[test]
    fn test_foreign_key_requires_table() {
        assert!(ForeignKey::new("id").is_err());
        assert!(ForeignKey::new(".id").is_err());
        assert!(ForeignKey::new("users.").is_err());
    }

    #[test]
    fn test_add_column_binds_table() {
        let table = Table::new("foo")
            .in_schema("some_schema")
            .with_column(Column::new("id", "UUID").primary_key())
            .unwrap();

        assert_eq!(table.fullname(), "some_schema.foo");
        assert_eq!(table.get_column("id").unwrap().table, "some_schema.foo");
    }

    #[test]
    fn test_duplicate_column_rejected() {
        let mut table = Table::new("users");
        table.add_column(Column::new("id", "INT")).unwrap();
        let err = table.add_column(Column::new("id", "INT")).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_schema_preserves_order() {
        let mut schema = Schema::new();
        schema.add_table(Table::new("zebra")).unwrap();
        schema.add_table(Table::new("apple")).unwrap();

        let names: Vec<_> = schema.table_names().collect();
        assert_eq!(names, vec!["zebra", "apple"]);
        assert!(schema.add_table(Table::new("apple")).is_err());
    }
}
