mod graph;
mod inject;

pub use graph::DiagramArgs;

use crate::inject::{BEGIN_TAG_DEFAULT, END_TAG_DEFAULT};
use crate::json_schema;
use clap::{ArgAction, CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "erdscribe")]
#[command(version)]
#[command(about = "Render ORM schema metadata as Mermaid or Graphviz ER diagrams", long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print an entity-relationship diagram of a schema
    #[command(after_help = "Examples:
  erdscribe graph example.base:Base --import-module example.models
  erdscribe graph example.base:Base --format dot -o schema.dot
  erdscribe graph example.base:Base --include-tables '^com.*' --layout elk")]
    Graph {
        #[command(flatten)]
        args: DiagramArgs,

        /// Write the diagram to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Replace the marked region of a document with a fenced diagram
    #[command(after_help = "Examples:
  erdscribe inject README.md example.base:Base --import-module example.models
  erdscribe inject README.md --check")]
    Inject {
        /// Document containing the begin and end tags
        file: PathBuf,

        #[command(flatten)]
        args: DiagramArgs,

        /// Tag opening the replaced region
        #[arg(long, default_value = BEGIN_TAG_DEFAULT)]
        replace_begin_tag: String,

        /// Tag closing the replaced region
        #[arg(long, default_value = END_TAG_DEFAULT)]
        replace_end_tag: String,

        /// Fail instead of writing when the document is out of date
        #[arg(long)]
        check: bool,
    },

    /// Print the JSON Schema of source documents
    Schema {
        /// Document kind to print (default: all)
        #[arg(value_name = "KIND")]
        kind: Option<String>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Graph { args, output } => graph::run(args, output),
        Commands::Inject {
            file,
            args,
            replace_begin_tag,
            replace_end_tag,
            check,
        } => inject::run(file, args, replace_begin_tag, replace_end_tag, check),
        Commands::Schema { kind } => {
            let output = match kind {
                Some(kind) => {
                    let schema = json_schema::get_schema(&kind).ok_or_else(|| {
                        anyhow::anyhow!(
                            "Unknown schema: {}. Valid options: {}",
                            kind,
                            json_schema::schema_names().join(", ")
                        )
                    })?;
                    serde_json::to_string_pretty(&schema)?
                }
                None => serde_json::to_string_pretty(&json_schema::all_schemas())?,
            };
            println!("{}", output);
            Ok(())
        }
        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "erdscribe", &mut io::stdout());
            Ok(())
        }
    }
}
