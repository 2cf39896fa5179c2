//! Django settings source.
//!
//! Selected for dotted settings module paths. Table listing is not
//! available for this family; callers get [`DiagramError::Unsupported`].

use super::ModelAdapter;
use crate::error::{DiagramError, Result};
use crate::schema::Table;
use indexmap::IndexMap;

#[derive(Debug, Clone)]
pub struct DjangoAdapter {
    settings_module: String,
}

impl DjangoAdapter {
    pub fn from_settings(settings_module: &str) -> Self {
        Self {
            settings_module: settings_module.to_string(),
        }
    }

    pub fn settings_module(&self) -> &str {
        &self.settings_module
    }
}

impl ModelAdapter for DjangoAdapter {
    fn tables(&self) -> Result<IndexMap<String, Table>> {
        Err(DiagramError::Unsupported(format!(
            "listing tables from Django settings '{}' is not implemented",
            self.settings_module
        )))
    }
}
