//! Declarative metadata documents.
//!
//! A metadata document lists tables the way an ORM's declarative registry
//! holds them. Missing flags follow the ORM defaults: a column is nullable
//! unless it is part of the primary key, and unique/index stay unknown.

use super::ModelAdapter;
use crate::error::{DiagramError, Result};
use crate::schema::{Column, ForeignKey, Table};
use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Registry of table definitions attached to a declarative base
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct MetaData {
    #[serde(default)]
    pub tables: Vec<SourceTable>,
}

/// A model module: tables registered into the base metadata on import
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ModelModule {
    #[serde(default)]
    pub tables: Vec<SourceTable>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct SourceTable {
    pub name: String,
    /// Namespace; the table is keyed as `schema.name` when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    /// Table comment; diagrams only show column comments
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default)]
    pub columns: Vec<SourceColumn>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unique_constraints: Vec<SourceUniqueConstraint>,
}

impl SourceTable {
    pub fn fullname(&self) -> String {
        match &self.schema {
            Some(schema) => format!("{}.{}", schema, self.name),
            None => self.name.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct SourceColumn {
    pub name: String,
    #[serde(rename = "type")]
    pub col_type: String,
    #[serde(default)]
    pub primary_key: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nullable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Referenced columns as `[schema.]table.column`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub foreign_keys: Vec<String>,
    /// Members of an enumerated type
    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct SourceUniqueConstraint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub columns: Vec<String>,
}

/// Adapter over an in-memory [`MetaData`] registry
#[derive(Debug, Clone)]
pub struct MetaDataAdapter {
    metadata: MetaData,
}

impl MetaDataAdapter {
    pub fn new(metadata: MetaData) -> Self {
        Self { metadata }
    }

    /// Parse a metadata document (`tables: [...]`) from YAML
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let metadata: MetaData = serde_yaml_ng::from_str(content)?;
        Ok(Self::new(metadata))
    }

    pub fn metadata(&self) -> &MetaData {
        &self.metadata
    }
}

impl ModelAdapter for MetaDataAdapter {
    fn tables(&self) -> Result<IndexMap<String, Table>> {
        let mut tables = IndexMap::with_capacity(self.metadata.tables.len());

        for source in &self.metadata.tables {
            let table = adapt_table(source)?;
            let key = table.fullname();
            if tables.insert(key.clone(), table).is_some() {
                return Err(DiagramError::config(format!(
                    "table '{}' is defined more than once",
                    key
                )));
            }
        }

        Ok(tables)
    }
}

fn adapt_table(source: &SourceTable) -> Result<Table> {
    let mut table = Table::new(&source.name);
    table.schema = source.schema.clone();

    for column in &source.columns {
        table.add_column(adapt_column(column)?)?;
    }

    for uc in &source.unique_constraints {
        table = table.with_unique_constraint(uc.name.as_deref(), uc.columns.iter().cloned());
    }

    Ok(table)
}

fn adapt_column(source: &SourceColumn) -> Result<Column> {
    let mut column = Column::new(&source.name, &source.col_type);
    column.primary_key = source.primary_key;
    column.nullable = Some(source.nullable.unwrap_or(!source.primary_key));
    column.unique = source.unique;
    column.index = source.index;
    column.comment = source.comment.clone();
    column.enum_values = source.enum_values.clone();

    for target in &source.foreign_keys {
        column.foreign_keys.insert(ForeignKey::new(target.as_str())?);
    }

    Ok(column)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCUMENT: &str = r#"
tables:
  - name: users
    columns:
      - { name: id, type: CHAR(32), primary_key: true }
      - { name: display_name, type: VARCHAR(100) }
  - name: posts
    schema: blog
    columns:
      - { name: id, type: CHAR(32), primary_key: true }
      - { name: author, type: CHAR(32), nullable: false, foreign_keys: [users.id] }
      - { name: state, type: VARCHAR(6), enum: [draft, live] }
    unique_constraints:
      - { columns: [state] }
"#;

    #[test]
    fn test_adapts_tables_in_order() {
        let adapter = MetaDataAdapter::from_yaml_str(DOCUMENT).unwrap();
        let tables = adapter.tables().unwrap();

        let keys: Vec<_> = tables.keys().cloned().collect();
        assert_eq!(keys, vec!["users", "blog.posts"]);
    }

    #[test]
    fn test_nullable_defaults_follow_primary_key() {
        let tables = MetaDataAdapter::from_yaml_str(DOCUMENT)
            .unwrap()
            .tables()
            .unwrap();
        let users = &tables["users"];

        assert_eq!(users.get_column("id").unwrap().nullable, Some(false));
        assert_eq!(users.get_column("display_name").unwrap().nullable, Some(true));
        assert_eq!(users.get_column("display_name").unwrap().unique, None);
    }

    #[test]
    fn test_foreign_keys_and_constraints() {
        let tables = MetaDataAdapter::from_yaml_str(DOCUMENT)
            .unwrap()
            .tables()
            .unwrap();
        let posts = &tables["blog.posts"];
        let author = posts.get_column("author").unwrap();

        assert_eq!(author.table, "blog.posts");
        assert_eq!(author.nullable, Some(false));
        assert_eq!(
            author.foreign_keys.iter().next().unwrap().target_fullname,
            "users.id"
        );
        assert_eq!(posts.unique_constraints.len(), 1);
        assert_eq!(
            posts.get_column("state").unwrap().enum_values,
            Some(vec!["draft".to_string(), "live".to_string()])
        );
    }

    #[test]
    fn test_malformed_foreign_key_rejected() {
        let doc = "tables:\n  - name: a\n    columns:\n      - { name: b, type: INT, foreign_keys: [nowhere] }\n";
        let err = MetaDataAdapter::from_yaml_str(doc)
            .unwrap()
            .tables()
            .unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let doc = "tables:\n  - name: a\n    colums: []\n";
        assert!(MetaDataAdapter::from_yaml_str(doc).is_err());
    }

    #[test]
    fn test_model_module_unknown_field_rejected() {
        assert!(serde_yaml_ng::from_str::<ModelModule>("tabels: []\n").is_err());

        let module: ModelModule = serde_yaml_ng::from_str("tables: []\n").unwrap();
        assert!(module.tables.is_empty());
    }
}
