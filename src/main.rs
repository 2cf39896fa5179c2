// Allow dead code for items that are part of the public API but only used in tests
#![allow(dead_code)]

mod adapter;
mod cmd;
mod config;
mod error;
mod graph;
mod inject;
mod json_schema;
mod render;
mod schema;

use clap::Parser;
use cmd::Cli;
use tracing::Level;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = cmd::run(cli) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

/// Diagnostics go to stderr so diagrams on stdout stay clean
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
