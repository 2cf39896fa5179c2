//! Column ordering policies for diagram output.

use super::{Column, Table};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a table's columns are ordered in the diagram
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColumnSort {
    /// Primary keys, then foreign keys, then the rest; alphabetical within each group
    #[default]
    KeyBased,
    /// Declaration order
    PreserveOrder,
}

impl FromStr for ColumnSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "key-based" => Ok(ColumnSort::KeyBased),
            "preserve-order" | "preserve" => Ok(ColumnSort::PreserveOrder),
            _ => Err(format!(
                "Unknown column sort: {}. Valid options: key-based, preserve-order",
                s
            )),
        }
    }
}

impl fmt::Display for ColumnSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnSort::KeyBased => write!(f, "key-based"),
            ColumnSort::PreserveOrder => write!(f, "preserve-order"),
        }
    }
}

/// Sort key for the key-based policy: (group, name)
pub fn column_sort_key(column: &Column) -> (u8, &str) {
    let group = if column.primary_key {
        1
    } else if column.is_foreign_key() {
        2
    } else {
        3
    };
    (group, column.name.as_str())
}

/// Order a table's columns for display
pub fn sort_columns(table: &Table, policy: ColumnSort) -> Vec<&Column> {
    let mut columns: Vec<&Column> = table.columns.values().collect();
    if policy == ColumnSort::KeyBased {
        columns.sort_by(|a, b| column_sort_key(a).cmp(&column_sort_key(b)));
    }
    columns
}
