//! Shellform CLI - shell-correct formatting for build-system generators

use std::path::Path;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};
use shellform::util::Config;

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("shellform=debug")
    } else {
        EnvFilter::new("shellform=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    // An explicit --config must load; the implicit file in the working
    // directory is best-effort.
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::load_or_default(Path::new("shellform.toml")),
    };

    // Execute command
    match cli.command {
        Commands::Escape(args) => commands::escape::execute(args, &config),
        Commands::Relative(args) => commands::relative::execute(args, &config),
        Commands::ConfigEscape(args) => commands::config_escape::execute(args),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
