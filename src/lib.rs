// Allow dead code for items that are part of the public API but only used in tests
#![allow(dead_code)]

pub mod adapter;
pub mod config;
pub mod error;
pub mod graph;
pub mod inject;
pub mod json_schema;
pub mod render;
pub mod schema;

pub use error::{DiagramError, Result};
pub use render::{render, RenderRequest};
