//! Locating schema source documents on disk.
//!
//! A module path such as `example.models` maps to `example/models.yaml`
//! (or `.yml` / `.json`) below one of the search directories. The current
//! directory is always searched last.

use super::metadata::{MetaData, ModelModule};
use crate::error::{DiagramError, Result};
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const EXTENSIONS: [&str; 3] = ["yaml", "yml", "json"];

/// An object in a base document; only its `metadata` entry is read
#[derive(Debug, Default, Deserialize)]
struct BaseObject {
    #[serde(default)]
    metadata: Option<MetaData>,
}

/// Resolves module paths against a list of search directories
#[derive(Debug, Clone, Default)]
pub struct SourceResolver {
    search_dirs: Vec<PathBuf>,
}

impl SourceResolver {
    pub fn new(search_dirs: Vec<PathBuf>) -> Self {
        Self { search_dirs }
    }

    /// Find the document backing `module`
    pub fn find_module(&self, module: &str) -> Result<PathBuf> {
        let relative: PathBuf = module.split('.').collect();

        for dir in self.search_dirs.iter().map(PathBuf::as_path).chain([Path::new(".")]) {
            for ext in EXTENSIONS {
                let candidate = dir.join(&relative).with_extension(ext);
                if candidate.is_file() {
                    debug!(module, path = %candidate.display(), "resolved module");
                    return Ok(candidate);
                }
            }
        }

        Err(DiagramError::config(format!(
            "module '{}' not found in search path ({})",
            module,
            self.describe_search_path()
        )))
    }

    /// Load the metadata attached to `class_name` in `module`
    pub fn load_base(&self, module: &str, class_name: &str) -> Result<MetaData> {
        let path = self.find_module(module)?;
        let mut objects: IndexMap<String, BaseObject> = load_document(&path)?;

        let object = objects.swap_remove(class_name).ok_or_else(|| {
            DiagramError::config(format!(
                "module '{}' has no attribute '{}'",
                module, class_name
            ))
        })?;

        object.metadata.ok_or_else(|| {
            DiagramError::config(format!(
                "'{}:{}' has no metadata; it is not a declarative base",
                module, class_name
            ))
        })
    }

    /// Register the tables of a model module into `metadata`.
    ///
    /// A trailing `:*` (wildcard import) is accepted and has the same effect.
    pub fn register_module(&self, metadata: &mut MetaData, module: &str) -> Result<()> {
        let module = module.strip_suffix(":*").unwrap_or(module);
        let path = self.find_module(module)?;
        let loaded: ModelModule = load_document(&path)?;

        for table in loaded.tables {
            let key = table.fullname();
            if metadata.tables.iter().any(|t| t.fullname() == key) {
                return Err(DiagramError::config(format!(
                    "table '{}' from module '{}' is already registered",
                    key, module
                )));
            }
            metadata.tables.push(table);
        }

        Ok(())
    }

    fn describe_search_path(&self) -> String {
        self.search_dirs
            .iter()
            .map(|d| d.display().to_string())
            .chain([".".to_string()])
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Deserialize a YAML or JSON document, chosen by extension
fn load_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if is_json {
        Ok(serde_json::from_str(&content)?)
    } else {
        Ok(serde_yaml_ng::from_str(&content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &Path, relative: &str, content: &str) {
        let path = dir.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn create_package() -> TempDir {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            "example/base.yaml",
            "Base:\n  metadata:\n    tables: []\nHelper:\n  value: 1\n",
        );
        write(
            dir.path(),
            "example/models.json",
            r#"{"tables": [{"name": "users", "columns": [{"name": "id", "type": "INT", "primary_key": true}]}]}"#,
        );
        dir
    }

    #[test]
    fn test_find_module_by_extension() {
        let dir = create_package();
        let resolver = SourceResolver::new(vec![dir.path().to_path_buf()]);

        let path = resolver.find_module("example.models").unwrap();
        assert!(path.ends_with("example/models.json"));
        assert!(resolver.find_module("example.missing").is_err());
    }

    #[test]
    fn test_load_base_and_register() {
        let dir = create_package();
        let resolver = SourceResolver::new(vec![dir.path().to_path_buf()]);

        let mut metadata = resolver.load_base("example.base", "Base").unwrap();
        assert!(metadata.tables.is_empty());

        resolver
            .register_module(&mut metadata, "example.models:*")
            .unwrap();
        assert_eq!(metadata.tables.len(), 1);

        let err = resolver
            .register_module(&mut metadata, "example.models")
            .unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_register_misspelled_module_rejected() {
        let dir = create_package();
        write(dir.path(), "example/typo.yaml", "tabels:\n  - name: users\n");
        let resolver = SourceResolver::new(vec![dir.path().to_path_buf()]);

        let mut metadata = resolver.load_base("example.base", "Base").unwrap();
        assert!(resolver.register_module(&mut metadata, "example.typo").is_err());
        assert!(metadata.tables.is_empty());
    }

    #[test]
    fn test_base_without_metadata() {
        let dir = create_package();
        let resolver = SourceResolver::new(vec![dir.path().to_path_buf()]);

        let err = resolver.load_base("example.base", "Helper").unwrap_err();
        assert!(err.to_string().contains("has no metadata"));

        let err = resolver.load_base("example.base", "Missing").unwrap_err();
        assert!(err.is_configuration());
    }
}
