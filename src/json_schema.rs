//! JSON Schema generation for schema source documents.
//!
//! Schemas are generated using the schemars crate and can be exported via the `schema` subcommand.

use crate::adapter::{MetaData, ModelModule};
use schemars::{schema_for, Schema};
use std::collections::BTreeMap;

/// Returns the JSON schemas of all source document kinds.
/// Uses BTreeMap for deterministic ordering (important for diffable output).
pub fn all_schemas() -> BTreeMap<&'static str, Schema> {
    let mut schemas = BTreeMap::new();

    // `metadata` entry of a declarative base
    schemas.insert("metadata", schema_for!(MetaData));

    // model module registered with --import-module
    schemas.insert("module", schema_for!(ModelModule));

    schemas
}

/// Generate a single schema by document kind.
pub fn get_schema(kind: &str) -> Option<Schema> {
    all_schemas().remove(kind)
}

/// List all available schema names.
pub fn schema_names() -> Vec<&'static str> {
    all_schemas().keys().copied().collect()
}
