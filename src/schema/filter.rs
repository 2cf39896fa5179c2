//! Table selection by include/exclude patterns.
//!
//! Patterns are regular expressions matched from the start of the table key,
//! so a bare table name selects that table (and any table it prefixes).

use super::Schema;
use crate::error::{DiagramError, Result};
use ahash::AHashSet;
use regex::Regex;

/// Resolve which tables survive filtering.
///
/// At most one of `include` and `exclude` may be non-empty. An include filter
/// that selects nothing is rejected rather than producing an empty diagram.
pub fn resolve_included_tables(
    include: &AHashSet<String>,
    exclude: &AHashSet<String>,
    all_tables: &AHashSet<String>,
) -> Result<AHashSet<String>> {
    match (include.is_empty(), exclude.is_empty()) {
        (true, true) => Ok(all_tables.clone()),
        (true, false) => {
            let patterns = compile_patterns(exclude)?;
            Ok(all_tables
                .iter()
                .filter(|name| !matches_any(&patterns, name))
                .cloned()
                .collect())
        }
        (false, true) => {
            let patterns = compile_patterns(include)?;
            let included: AHashSet<String> = all_tables
                .iter()
                .filter(|name| matches_any(&patterns, name))
                .cloned()
                .collect();

            if included.is_empty() {
                return Err(DiagramError::config(format!(
                    "no tables match the include patterns: {}",
                    sorted(include).join(", ")
                )));
            }
            Ok(included)
        }
        (false, false) => Err(DiagramError::config(
            "include and exclude table filters cannot be used together",
        )),
    }
}

/// Copy the tables named in `included` into a new schema, keeping their order
pub fn filter_schema(schema: &Schema, included: &AHashSet<String>) -> Schema {
    let tables = schema
        .tables
        .iter()
        .filter(|(key, _)| included.contains(key.as_str()))
        .map(|(key, table)| (key.clone(), table.clone()))
        .collect();

    Schema::from_tables(tables)
}

fn compile_patterns(patterns: &AHashSet<String>) -> Result<Vec<Regex>> {
    sorted(patterns)
        .into_iter()
        .map(|p| {
            Regex::new(&format!("^(?:{})", p))
                .map_err(|e| DiagramError::config(format!("invalid table pattern '{}': {}", p, e)))
        })
        .collect()
}

fn matches_any(patterns: &[Regex], name: &str) -> bool {
    patterns.iter().any(|re| re.is_match(name))
}

fn sorted(set: &AHashSet<String>) -> Vec<&str> {
    let mut items: Vec<&str> = set.iter().map(String::as_str).collect();
    items.sort_unstable();
    items
}
