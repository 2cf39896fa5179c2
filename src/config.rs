//! YAML project configuration.
//!
//! Every key is optional; command-line flags take precedence over the file.

use crate::graph::Layout;
use crate::schema::ColumnSort;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File looked up in the working directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = ".erdscribe.yaml";

/// Options loaded from the configuration file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    /// Base identifier, `module:Base` or a dotted settings module
    pub base: Option<String>,
    /// Model modules to register before rendering
    pub imports: Vec<String>,
    /// Directories searched for source documents
    pub schema_dirs: Vec<PathBuf>,
    pub include_tables: Vec<String>,
    pub exclude_tables: Vec<String>,
    pub column_sort: Option<ColumnSort>,
    pub omit_comments: Option<bool>,
    pub max_enum_members: Option<usize>,
    pub type_parameter_delimiter: Option<String>,
    pub layout: Option<Layout>,
}

impl ProjectConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("cannot read config file {}: {}", path.display(), e))?;
        let config: ProjectConfig = serde_yaml_ng::from_str(&content)
            .map_err(|e| anyhow::anyhow!("invalid config file {}: {}", path.display(), e))?;
        Ok(config)
    }

    /// Load `explicit` if given (it must exist), else the default file if present
    pub fn discover(explicit: Option<&Path>) -> anyhow::Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.is_file() {
                    Self::load(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let yaml = r#"
base: example.base:Base
imports:
  - example.models
include_tables:
  - ^com.*
column_sort: preserve-order
omit_comments: true
max_enum_members: 5
type_parameter_delimiter: _
layout: elk
"#;
        let config: ProjectConfig = serde_yaml_ng::from_str(yaml).unwrap();

        assert_eq!(config.base.as_deref(), Some("example.base:Base"));
        assert_eq!(config.imports, vec!["example.models"]);
        assert_eq!(config.include_tables, vec!["^com.*"]);
        assert_eq!(config.column_sort, Some(ColumnSort::PreserveOrder));
        assert_eq!(config.omit_comments, Some(true));
        assert_eq!(config.max_enum_members, Some(5));
        assert_eq!(config.type_parameter_delimiter.as_deref(), Some("_"));
        assert_eq!(config.layout, Some(Layout::Elk));
    }

    #[test]
    fn test_empty_config() {
        let config: ProjectConfig = serde_yaml_ng::from_str("{}").unwrap();
        assert_eq!(config, ProjectConfig::default());
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(serde_yaml_ng::from_str::<ProjectConfig>("colum_sort: key-based").is_err());
    }

    #[test]
    fn test_missing_explicit_file() {
        assert!(ProjectConfig::discover(Some(Path::new("/nonexistent/erd.yaml"))).is_err());
    }
}
