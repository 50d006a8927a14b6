//! Package registrar CLI
//!
//! Orders extension registrations and merges package configuration.

mod cli;
mod commands;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use error::Result;
use registrar_config::RegistrarConfig;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("{}: logging disabled: {}", "warning".yellow().bold(), e);
    }
    if cli.verbose {
        tracing::debug!("Verbose mode enabled");
    }

    let config = RegistrarConfig::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::Sort { file } => commands::run_sort(&file, &config),
        Commands::Compose {
            descriptor,
            output,
            dry_run,
        } => commands::run_compose(&descriptor, output.as_deref(), dry_run, &config),
        Commands::Check { descriptor } => commands::run_check(&descriptor, &config),
    }
}
