//! Diagram rendering entry point.
//!
//! Resolves the table filter, builds the filtered model and hands it to the
//! emitter for the requested format. The input schema is never modified.

use crate::error::{DiagramError, Result};
use crate::graph::{to_dot, to_mermaid, DiagramOptions, OutputFormat};
use crate::schema::{filter_schema, resolve_included_tables, Schema};
use ahash::AHashSet;
use tracing::debug;

/// Everything `render` needs besides the schema
#[derive(Debug, Clone, Default)]
pub struct RenderRequest {
    /// Patterns of tables to keep
    pub include_tables: AHashSet<String>,
    /// Patterns of tables to drop
    pub exclude_tables: AHashSet<String>,
    pub format: OutputFormat,
    pub options: DiagramOptions,
}

impl RenderRequest {
    pub fn new(format: OutputFormat, options: DiagramOptions) -> Self {
        Self {
            include_tables: AHashSet::new(),
            exclude_tables: AHashSet::new(),
            format,
            options,
        }
    }

    pub fn include<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include_tables.extend(patterns.into_iter().map(Into::into));
        self
    }

    pub fn exclude<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_tables.extend(patterns.into_iter().map(Into::into));
        self
    }
}

/// Render `schema` as a diagram string
pub fn render(schema: &Schema, request: &RenderRequest) -> Result<String> {
    if request.options.layout.is_some() && !request.format.supports_layout() {
        return Err(DiagramError::config(format!(
            "the layout option can only be used with the mermaid format, not {}",
            request.format
        )));
    }

    let all_tables: AHashSet<String> = schema.table_names().map(str::to_string).collect();
    let included = resolve_included_tables(
        &request.include_tables,
        &request.exclude_tables,
        &all_tables,
    )?;
    let filtered = filter_schema(schema, &included);

    debug!(
        format = %request.format,
        tables = filtered.len(),
        excluded = schema.len() - filtered.len(),
        "rendering diagram"
    );

    Ok(match request.format {
        OutputFormat::Mermaid => to_mermaid(&filtered, &request.options),
        OutputFormat::Dot => to_dot(&filtered, &request.options),
    })
}
