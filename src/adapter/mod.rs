//! Schema model adapters.
//!
//! An adapter normalizes one family of source schema descriptions into the
//! uniform [`Schema`] model. The family is picked from the shape of the
//! identifier the caller supplies:
//! - `module:Base` selects declarative metadata documents ([`MetaDataAdapter`])
//! - a dotted `package.settings` path selects the Django adapter, which cannot
//!   list tables yet

mod django;
mod metadata;
mod resolve;

pub use django::DjangoAdapter;
pub use metadata::{
    MetaData, MetaDataAdapter, ModelModule, SourceColumn, SourceTable, SourceUniqueConstraint,
};
pub use resolve::SourceResolver;

use crate::error::{DiagramError, Result};
use crate::schema::{Schema, Table};
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;

static DOTTED_PATH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)*$").unwrap());

static IDENTIFIER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

/// Uniform access to a source schema description
pub trait ModelAdapter {
    /// All tables keyed by fullname, in source order
    fn tables(&self) -> Result<IndexMap<String, Table>>;

    /// Build the schema model from [`ModelAdapter::tables`]
    fn schema(&self) -> Result<Schema> {
        Ok(Schema::from_tables(self.tables()?))
    }
}

/// Source family selected by the shape of a base identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceKind {
    /// `module:Class` pointing at a declarative base carrying `metadata`
    MetaData { module: String, class_name: String },
    /// Dotted settings module path
    Django { settings_module: String },
}

impl SourceKind {
    /// Classify a base identifier
    pub fn detect(identifier: &str) -> Result<Self> {
        let identifier = identifier.trim();

        if let Some((module, class_name)) = identifier.split_once(':') {
            if DOTTED_PATH_RE.is_match(module) && IDENTIFIER_RE.is_match(class_name) {
                return Ok(SourceKind::MetaData {
                    module: module.to_string(),
                    class_name: class_name.to_string(),
                });
            }
        } else if DOTTED_PATH_RE.is_match(identifier) && identifier.contains('.') {
            return Ok(SourceKind::Django {
                settings_module: identifier.to_string(),
            });
        }

        Err(DiagramError::config(format!(
            "cannot determine the schema source for '{}': expected 'module:Base' or a dotted settings module",
            identifier
        )))
    }
}

/// Pick and construct the adapter for `identifier`.
///
/// For metadata sources, every module in `imports` is registered into the
/// base metadata before the adapter is returned.
pub fn adapter_for_base(
    identifier: &str,
    resolver: &SourceResolver,
    imports: &[String],
) -> Result<Box<dyn ModelAdapter>> {
    match SourceKind::detect(identifier)? {
        SourceKind::MetaData { module, class_name } => {
            let mut metadata = resolver.load_base(&module, &class_name)?;
            for import in imports {
                resolver.register_module(&mut metadata, import)?;
            }
            Ok(Box::new(MetaDataAdapter::new(metadata)))
        }
        SourceKind::Django { settings_module } => {
            Ok(Box::new(DjangoAdapter::from_settings(&settings_module)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_metadata_source() {
        assert_eq!(
            SourceKind::detect("example.base:Base").unwrap(),
            SourceKind::MetaData {
                module: "example.base".to_string(),
                class_name: "Base".to_string(),
            }
        );
    }

    #[test]
    fn test_detect_django_source() {
        assert_eq!(
            SourceKind::detect("mysite.settings").unwrap(),
            SourceKind::Django {
                settings_module: "mysite.settings".to_string(),
            }
        );
    }

    #[test]
    fn test_detect_rejects_other_shapes() {
        for identifier in ["", "base", "a:b:c", "example.base:", ":Base", "my site.settings"] {
            let err = SourceKind::detect(identifier).unwrap_err();
            assert!(err.is_configuration(), "identifier {:?}", identifier);
        }
    }
}
