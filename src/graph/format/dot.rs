//! Graphviz DOT format output for ERD diagrams.

use super::common::{column_options, relationships, Relationship};
use super::DiagramOptions;
use crate::schema::{is_unique, sort_columns, Cardinality, Column, Schema, Table};

/// Generate an undirected DOT graph with one HTML-like table node per table,
/// each followed by the edges of its foreign keys
pub fn to_dot(schema: &Schema, options: &DiagramOptions) -> String {
    let mut output = String::new();

    output.push_str("graph database {\n");

    for table in schema.tables() {
        output.push_str(&format!(
            "{} [label=<\n{}\n>, margin=0, shape=none];\n",
            escape_dot_id(&table.name),
            generate_table_label(table, options)
        ));

        for column in table.columns.values().filter(|c| c.is_foreign_key()) {
            for relationship in relationships(schema, table, column) {
                output.push_str(&edge_statement(&relationship));
            }
        }
    }

    output.push_str("}\n");
    output
}

/// Generate the HTML-like label: a title row and one row per column
fn generate_table_label(table: &Table, options: &DiagramOptions) -> String {
    let mut lines = Vec::with_capacity(table.columns.len() + 3);

    lines.push(
        "    <table border=\"0\" cellborder=\"1\" cellspacing=\"0\" cellpadding=\"4\">".to_string(),
    );
    lines.push(format!(
        "        <tr><td colspan=\"3\" bgcolor=\"lightblue\"><b>{}</b></td></tr>",
        escape_html(&table.name)
    ));

    for column in sort_columns(table, options.column_sort) {
        lines.push(format!(
            "        <tr><td align=\"left\">{}</td><td align=\"left\">{}</td><td>{}</td></tr>",
            escape_html(&column.col_type),
            escape_html(&column.name),
            escape_html(&column_description(table, column, options))
        ));
    }

    lines.push("    </table>".to_string());
    lines.join("\n")
}

/// Role names (sorted) followed by the column options, separated by `; `
fn column_description(table: &Table, column: &Column, options: &DiagramOptions) -> String {
    let mut roles = Vec::new();
    if column.is_foreign_key() {
        roles.push("Foreign Key");
    }
    if column.primary_key {
        roles.push("Primary Key");
    }
    if !column.primary_key && is_unique(table, column) {
        roles.push("Unique");
    }

    let mut parts = Vec::new();
    if !roles.is_empty() {
        parts.push(roles.join(", "));
    }
    parts.extend(column_options(column, options));
    parts.join("; ")
}

fn edge_statement(relationship: &Relationship<'_>) -> String {
    format!(
        "{} -- {}  [arrowhead={}, arrowtail={}, dir=both, label={}];\n",
        escape_dot_id(&relationship.target_table.name),
        escape_dot_id(&relationship.source_table.name),
        arrow_style(relationship.source_cardinality),
        arrow_style(relationship.target_cardinality),
        escape_dot_id(&relationship.source_column.name)
    )
}

/// Crow's foot for the many side, no marker for the one side
fn arrow_style(cardinality: Cardinality) -> &'static str {
    match cardinality {
        Cardinality::One => "none",
        Cardinality::Many => "crow",
    }
}

/// Escape a string for use in DOT HTML labels
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Escape a string for use as a DOT node ID
fn escape_dot_id(s: &str) -> String {
    if s.chars().all(|c| c.is_alphanumeric() || c == '_') && !s.is_empty() {
        s.to_string()
    } else {
        format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
    }
}
