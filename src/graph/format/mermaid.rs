//! Mermaid erDiagram format output.

use super::common::{column_options, key_role, relationships, sanitize_type, Relationship};
use super::DiagramOptions;
use crate::schema::{sort_columns, Cardinality, Column, Schema, Table};

/// Generate a Mermaid erDiagram: all entity blocks first, then relationships
pub fn to_mermaid(schema: &Schema, options: &DiagramOptions) -> String {
    let mut output = String::new();

    if let Some(layout) = options.layout {
        output.push_str("---\n");
        output.push_str("    config:\n");
        output.push_str(&format!("        layout: {}\n", layout));
        output.push_str("---\n");
    }

    output.push_str("erDiagram\n");

    for table in schema.tables() {
        output.push_str(&entity_block(table, options));
    }

    for table in schema.tables() {
        for column in table.columns.values().filter(|c| c.is_foreign_key()) {
            for relationship in relationships(schema, table, column) {
                output.push_str(&relationship_line(&relationship));
            }
        }
    }

    let trimmed = output.trim_end_matches('\n');
    format!("{}\n", trimmed)
}

fn entity_block(table: &Table, options: &DiagramOptions) -> String {
    let mut block = format!("  {} {{\n", escape_mermaid_id(&table.name));

    for column in sort_columns(table, options.column_sort) {
        block.push_str(&attribute_line(table, column, options));
    }

    block.push_str("  }\n\n");
    block
}

fn attribute_line(table: &Table, column: &Column, options: &DiagramOptions) -> String {
    let mut line = format!(
        "{} {}",
        sanitize_type(&column.col_type, options.type_parameter_delimiter()),
        escape_mermaid_id(&column.name)
    );

    if let Some(role) = key_role(table, column) {
        line.push(' ');
        line.push_str(role);
    }

    let annotations = column_options(column, options);
    if !annotations.is_empty() {
        let escaped: Vec<String> = annotations.iter().map(|a| escape_comment(a)).collect();
        line.push_str(&format!(" \"{}\"", escaped.join(",")));
    }

    format!("    {}\n", line)
}

fn relationship_line(relationship: &Relationship<'_>) -> String {
    let left = match relationship.target_cardinality {
        Cardinality::One => "||",
        Cardinality::Many => "}o",
    };
    let right = match relationship.source_cardinality {
        Cardinality::One => "o|",
        Cardinality::Many => "o{",
    };

    format!(
        "  {} {}--{} {} : {}\n",
        escape_mermaid_id(&relationship.target_table.name),
        left,
        right,
        escape_mermaid_id(&relationship.source_table.name),
        escape_mermaid_id(&relationship.source_column.name)
    )
}

/// Escape a string for use as a Mermaid entity ID
fn escape_mermaid_id(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Attribute comments are double-quoted and single-line: inner double quotes
/// become single quotes and line breaks become spaces
fn escape_comment(s: &str) -> String {
    s.replace("\r\n", " ")
        .replace(|c: char| c == '\n' || c == '\r', " ")
        .replace('"', "'")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::format::Layout;

    fn create_test_schema() -> Schema {
        let mut schema = Schema::new();
        schema
            .add_table(
                Table::new("users")
                    .with_column(Column::new("id", "CHAR(32)").primary_key().nullable(false))
                    .unwrap()
                    .with_column(Column::new("display_name", "VARCHAR(100)").nullable(true))
                    .unwrap(),
            )
            .unwrap();
        schema
            .add_table(
                Table::new("posts")
                    .with_column(Column::new("id", "CHAR(32)").primary_key().nullable(false))
                    .unwrap()
                    .with_column(
                        Column::new("author", "CHAR(32)")
                            .nullable(false)
                            .references("users.id")
                            .unwrap(),
                    )
                    .unwrap()
                    .with_column(
                        Column::new("live", "BOOLEAN")
                            .nullable(true)
                            .comment("True if post is published"),
                    )
                    .unwrap()
                    .with_column(Column::new("price", "NUMERIC(10, 2)").nullable(false))
                    .unwrap(),
            )
            .unwrap();
        schema
    }

    #[test]
    fn test_mermaid_er_diagram() {
        let output = to_mermaid(&create_test_schema(), &DiagramOptions::default());

        assert!(output.starts_with("erDiagram\n"));
        assert!(output.contains("  users {\n"));
        assert!(output.contains("  posts {\n"));
        assert!(output.ends_with("users ||--o{ posts : author\n"));
    }

    #[test]
    fn test_mermaid_columns() {
        let output = to_mermaid(&create_test_schema(), &DiagramOptions::default());

        assert!(output.contains("    CHAR(32) id PK\n"));
        assert!(output.contains("    CHAR(32) author FK\n"));
        assert!(output.contains("    BOOLEAN live \"True if post is published,nullable\"\n"));
        assert!(output.contains("    VARCHAR(100) display_name \"nullable\"\n"));
        assert!(output.contains("    NUMERIC(10-2) price\n"));
    }

    #[test]
    fn test_mermaid_layout_preamble() {
        let options = DiagramOptions::builder()
            .layout(Some(Layout::Elk))
            .build()
            .unwrap();
        let output = to_mermaid(&create_test_schema(), &options);

        assert!(output.starts_with("---\n    config:\n        layout: elk\n---\nerDiagram\n"));
    }

    #[test]
    fn test_mermaid_single_trailing_newline() {
        let mut schema = Schema::new();
        schema.add_table(Table::new("lonely")).unwrap();
        let output = to_mermaid(&schema, &DiagramOptions::default());

        assert_eq!(output, "erDiagram\n  lonely {\n  }\n");
    }

    #[test]
    fn test_mermaid_escapes_names_and_multiline_comments() {
        let mut schema = Schema::new();
        schema
            .add_table(
                Table::new("order items")
                    .with_column(Column::new("id", "INTEGER").primary_key().nullable(false))
                    .unwrap()
                    .with_column(
                        Column::new("unit price", "NUMERIC(10, 2)")
                            .nullable(false)
                            .comment("Price per unit\nbefore \"tax\"\r\nin cents"),
                    )
                    .unwrap()
                    .with_column(
                        Column::new("parent item", "INTEGER")
                            .nullable(false)
                            .references("order items.id")
                            .unwrap(),
                    )
                    .unwrap(),
            )
            .unwrap();

        let output = to_mermaid(&schema, &DiagramOptions::default());

        assert!(output.contains("  order_items {\n"));
        assert!(output.contains(
            "    NUMERIC(10-2) unit_price \"Price per unit before 'tax' in cents\"\n"
        ));
        assert!(output.ends_with("  order_items ||--o{ order_items : parent_item\n"));
        for line in output.lines().filter(|l| l.starts_with("    ")) {
            assert_eq!(line.matches('"').count() % 2, 0, "line {:?}", line);
        }
    }

    #[test]
    fn test_escape_comment() {
        assert_eq!(escape_comment("say \"hi\""), "say 'hi'");
        assert_eq!(escape_comment("two\nlines\r\nthree"), "two lines three");
        assert_eq!(escape_mermaid_id("line-item"), "line-item");
        assert_eq!(escape_mermaid_id("order items"), "order_items");
    }
}
