//! Graph command implementation for ERD generation.

use crate::adapter::{adapter_for_base, ModelAdapter, SourceResolver};
use crate::config::ProjectConfig;
use crate::graph::{DiagramOptions, Layout, OutputFormat};
use crate::render::{render, RenderRequest};
use anyhow::{bail, Context, Result};
use clap::Args;
use std::fs;
use std::path::PathBuf;
use tracing::info;

/// Options shared by the `graph` and `inject` commands
#[derive(Args, Debug, Default)]
pub struct DiagramArgs {
    /// Declarative base (`module:Base`) or dotted settings module
    #[arg(value_name = "BASE")]
    pub base: Option<String>,

    /// Model module to register before rendering; a trailing `:*` is accepted (repeatable)
    #[arg(long = "import-module", value_name = "MODULE")]
    pub import_module: Vec<String>,

    /// Directory searched for source documents (repeatable)
    #[arg(long = "schema-dir", value_name = "DIR")]
    pub schema_dir: Vec<PathBuf>,

    /// Only include tables matching these patterns (repeatable)
    #[arg(long = "include-tables", value_name = "PATTERN")]
    pub include_tables: Vec<String>,

    /// Exclude tables matching these patterns (repeatable)
    #[arg(long = "exclude-tables", value_name = "PATTERN")]
    pub exclude_tables: Vec<String>,

    /// Output format: mermaid, mmd, dot, gv
    #[arg(short, long)]
    pub format: Option<String>,

    /// Column order: key-based, preserve-order
    #[arg(long)]
    pub column_sort: Option<String>,

    /// Leave column comments out of the diagram
    #[arg(long, overrides_with = "no_omit_comments")]
    pub omit_comments: bool,

    /// Show column comments even if the configuration file omits them
    #[arg(long, overrides_with = "omit_comments")]
    pub no_omit_comments: bool,

    /// Enum members listed per column (0 hides them)
    #[arg(long, value_name = "N")]
    pub max_enum_members: Option<usize>,

    /// Mermaid layout engine: dagre, elk
    #[arg(long)]
    pub layout: Option<String>,

    /// Replacement for commas inside type parameters, e.g. NUMERIC(10-2)
    #[arg(long, value_name = "DELIMITER")]
    pub type_parameter_delimiter: Option<String>,

    /// YAML configuration file (default: .erdscribe.yaml if present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Fully resolved settings for one diagram
#[derive(Debug)]
pub struct GraphSettings {
    pub base: String,
    pub imports: Vec<String>,
    pub schema_dirs: Vec<PathBuf>,
    pub request: RenderRequest,
}

impl GraphSettings {
    /// Merge command-line arguments over the configuration file
    pub fn resolve(args: DiagramArgs, config: ProjectConfig) -> Result<Self> {
        let Some(base) = args.base.or(config.base) else {
            bail!("no base given: pass BASE or set `base` in the configuration file");
        };

        let format: OutputFormat = match args.format {
            Some(f) => f.parse().map_err(|e: String| anyhow::anyhow!(e))?,
            None => OutputFormat::default(),
        };

        let column_sort = match args.column_sort {
            Some(s) => s.parse().map_err(|e: String| anyhow::anyhow!(e))?,
            None => config.column_sort.unwrap_or_default(),
        };

        let layout: Option<Layout> = match args.layout {
            Some(l) => Some(l.parse().map_err(|e: String| anyhow::anyhow!(e))?),
            None => config.layout,
        };

        let omit_comments = if args.no_omit_comments {
            false
        } else {
            args.omit_comments || config.omit_comments.unwrap_or(false)
        };

        let mut builder = DiagramOptions::builder()
            .column_sort(column_sort)
            .omit_comments(omit_comments)
            .layout(layout);
        if let Some(max) = args.max_enum_members.or(config.max_enum_members) {
            builder = builder.max_enum_members(max);
        }
        if let Some(delimiter) = args
            .type_parameter_delimiter
            .or(config.type_parameter_delimiter)
        {
            builder = builder.type_parameter_delimiter(delimiter);
        }
        let options = builder.build()?;

        let request = RenderRequest::new(format, options)
            .include(prefer_cli(args.include_tables, config.include_tables))
            .exclude(prefer_cli(args.exclude_tables, config.exclude_tables));

        Ok(Self {
            base,
            imports: prefer_cli(args.import_module, config.imports),
            schema_dirs: prefer_cli(args.schema_dir, config.schema_dirs),
            request,
        })
    }

    /// Load the schema source and render the diagram
    pub fn build_diagram(&self) -> Result<String> {
        let resolver = SourceResolver::new(self.schema_dirs.clone());
        let adapter = adapter_for_base(&self.base, &resolver, &self.imports)?;
        let schema = adapter.schema()?;

        info!(
            base = %self.base,
            tables = schema.len(),
            "loaded schema"
        );

        Ok(render(&schema, &self.request)?)
    }
}

/// A non-empty command-line list replaces the configured one
fn prefer_cli<T>(cli: Vec<T>, configured: Vec<T>) -> Vec<T> {
    if cli.is_empty() {
        configured
    } else {
        cli
    }
}

/// Run the graph command
pub fn run(args: DiagramArgs, output: Option<PathBuf>) -> Result<()> {
    let config = ProjectConfig::discover(args.config.as_deref())?;
    let settings = GraphSettings::resolve(args, config)?;
    let diagram = settings.build_diagram()?;

    match output {
        Some(path) => {
            fs::write(&path, diagram.as_bytes())
                .with_context(|| format!("cannot write {}", path.display()))?;
            eprintln!("ERD written to: {}", path.display());
        }
        None => print!("{}", diagram),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ColumnSort;

    fn args(base: &str) -> DiagramArgs {
        DiagramArgs {
            base: Some(base.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_cli_overrides_config() {
        let mut cli = args("example.base:Base");
        cli.column_sort = Some("preserve-order".to_string());
        cli.include_tables = vec!["users".to_string()];

        let config = ProjectConfig {
            base: Some("other.base:Base".to_string()),
            column_sort: Some(ColumnSort::KeyBased),
            include_tables: vec!["posts".to_string()],
            max_enum_members: Some(7),
            ..Default::default()
        };

        let settings = GraphSettings::resolve(cli, config).unwrap();
        assert_eq!(settings.base, "example.base:Base");
        assert_eq!(settings.request.options.column_sort, ColumnSort::PreserveOrder);
        assert_eq!(settings.request.options.max_enum_members, 7);
        assert!(settings.request.include_tables.contains("users"));
        assert!(!settings.request.include_tables.contains("posts"));
    }

    #[test]
    fn test_omit_comments_from_config_can_be_turned_off() {
        let config = ProjectConfig {
            omit_comments: Some(true),
            ..Default::default()
        };

        let settings =
            GraphSettings::resolve(args("example.base:Base"), config.clone()).unwrap();
        assert!(settings.request.options.omit_comments);

        let mut cli = args("example.base:Base");
        cli.no_omit_comments = true;
        let settings = GraphSettings::resolve(cli, config).unwrap();
        assert!(!settings.request.options.omit_comments);
    }

    #[test]
    fn test_base_from_config() {
        let config = ProjectConfig {
            base: Some("example.base:Base".to_string()),
            imports: vec!["example.models".to_string()],
            ..Default::default()
        };

        let settings = GraphSettings::resolve(DiagramArgs::default(), config).unwrap();
        assert_eq!(settings.base, "example.base:Base");
        assert_eq!(settings.imports, vec!["example.models"]);
    }

    #[test]
    fn test_missing_base() {
        assert!(GraphSettings::resolve(DiagramArgs::default(), ProjectConfig::default()).is_err());
    }

    #[test]
    fn test_unknown_format() {
        let mut cli = args("example.base:Base");
        cli.format = Some("png".to_string());
        assert!(GraphSettings::resolve(cli, ProjectConfig::default()).is_err());
    }
}
