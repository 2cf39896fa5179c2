//! Output format implementations for ERD visualization.

mod common;
mod dot;
mod mermaid;

pub use dot::to_dot;
pub use mermaid::to_mermaid;

use crate::error::{DiagramError, Result};
use crate::schema::ColumnSort;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default number of enum members listed before eliding the middle ones
pub const MAX_ENUM_MEMBERS_DEFAULT: usize = 3;

/// Default replacement for commas inside type parameters
pub const TYPE_PARAMETER_DELIMITER_DEFAULT: &str = "-";

/// Output format for ERD export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Mermaid erDiagram format
    #[default]
    #[serde(alias = "mmd")]
    Mermaid,
    /// Graphviz DOT format
    #[serde(alias = "gv")]
    Dot,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mermaid" | "mmd" => Ok(OutputFormat::Mermaid),
            "dot" | "gv" => Ok(OutputFormat::Dot),
            _ => Err(format!(
                "Unknown format: {}. Valid options: mermaid, mmd, dot, gv",
                s
            )),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Mermaid => write!(f, "mermaid"),
            OutputFormat::Dot => write!(f, "dot"),
        }
    }
}

impl OutputFormat {
    /// Info string used to fence the diagram when embedding it in a document
    pub fn comment_format(&self) -> &'static str {
        match self {
            OutputFormat::Mermaid => "mermaid",
            OutputFormat::Dot => "dot",
        }
    }

    /// Whether the format understands a rendering-engine layout directive
    pub fn supports_layout(&self) -> bool {
        matches!(self, OutputFormat::Mermaid)
    }
}

/// Mermaid rendering engine layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    Dagre,
    Elk,
}

impl FromStr for Layout {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dagre" => Ok(Layout::Dagre),
            "elk" => Ok(Layout::Elk),
            _ => Err(format!("Unknown layout: {}. Valid options: dagre, elk", s)),
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layout::Dagre => write!(f, "dagre"),
            Layout::Elk => write!(f, "elk"),
        }
    }
}

/// Rendering options shared by both emitters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramOptions {
    pub column_sort: ColumnSort,
    pub omit_comments: bool,
    pub max_enum_members: usize,
    pub layout: Option<Layout>,
    type_parameter_delimiter: String,
}

impl Default for DiagramOptions {
    fn default() -> Self {
        Self {
            column_sort: ColumnSort::default(),
            omit_comments: false,
            max_enum_members: MAX_ENUM_MEMBERS_DEFAULT,
            layout: None,
            type_parameter_delimiter: TYPE_PARAMETER_DELIMITER_DEFAULT.to_string(),
        }
    }
}

impl DiagramOptions {
    /// Create a new builder
    pub fn builder() -> DiagramOptionsBuilder {
        DiagramOptionsBuilder::default()
    }

    pub fn type_parameter_delimiter(&self) -> &str {
        &self.type_parameter_delimiter
    }
}

/// Builder for DiagramOptions
#[derive(Debug, Default)]
pub struct DiagramOptionsBuilder {
    column_sort: Option<ColumnSort>,
    omit_comments: bool,
    max_enum_members: Option<usize>,
    layout: Option<Layout>,
    type_parameter_delimiter: Option<String>,
}

impl DiagramOptionsBuilder {
    pub fn column_sort(mut self, column_sort: ColumnSort) -> Self {
        self.column_sort = Some(column_sort);
        self
    }

    pub fn omit_comments(mut self, omit_comments: bool) -> Self {
        self.omit_comments = omit_comments;
        self
    }

    pub fn max_enum_members(mut self, max_enum_members: usize) -> Self {
        self.max_enum_members = Some(max_enum_members);
        self
    }

    pub fn layout(mut self, layout: Option<Layout>) -> Self {
        self.layout = layout;
        self
    }

    pub fn type_parameter_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.type_parameter_delimiter = Some(delimiter.into());
        self
    }

    /// Validate and build the options
    pub fn build(self) -> Result<DiagramOptions> {
        let delimiter = self
            .type_parameter_delimiter
            .unwrap_or_else(|| TYPE_PARAMETER_DELIMITER_DEFAULT.to_string());

        if delimiter.is_empty() || delimiter.contains(',') || delimiter.contains(' ') {
            return Err(DiagramError::config(format!(
                "type parameter delimiter '{}' must be non-empty and contain neither commas nor spaces",
                delimiter
            )));
        }

        Ok(DiagramOptions {
            column_sort: self.column_sort.unwrap_or_default(),
            omit_comments: self.omit_comments,
            max_enum_members: self
                .max_enum_members
                .unwrap_or(MAX_ENUM_MEMBERS_DEFAULT),
            layout: self.layout,
            type_parameter_delimiter: delimiter,
        })
    }
}
