//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Package registrar - order extensions and merge package configuration
#[derive(Parser, Debug)]
#[command(name = "registrar")]
#[command(author, version, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to registrar.toml
    #[arg(short, long, global = true, env = "REGISTRAR_CONFIG")]
    pub config: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Order an extension list and print the `extensions` block
    ///
    /// The input is TOML or JSON (by extension) with an `extensions` table
    /// of `key = definition` entries and an optional `types` table.
    ///
    /// Examples:
    ///   registrar sort extensions.toml
    ///   registrar --config registrar.toml sort extensions.json
    Sort {
        /// Definitions file (.toml or .json)
        file: PathBuf,
    },

    /// Merge a package descriptor into the configuration file
    Compose {
        /// Package descriptor (JSON)
        descriptor: PathBuf,

        /// Output path (overrides [output] path in registrar.toml)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the merged document instead of writing it
        #[arg(long)]
        dry_run: bool,
    },

    /// Resolve the extension order of a descriptor without writing anything
    Check {
        /// Package descriptor (JSON)
        descriptor: PathBuf,
    },
}
