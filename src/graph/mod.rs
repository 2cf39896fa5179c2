//! ERD (Entity-Relationship Diagram) generation module.
//!
//! This module provides:
//! - Mermaid `erDiagram` output with an optional layout preamble
//! - Graphviz DOT output with HTML-like table labels
//! - Shared relationship and cardinality resolution for both formats

pub mod format;

pub use format::{
    to_dot, to_mermaid, DiagramOptions, DiagramOptionsBuilder, Layout, OutputFormat,
};
