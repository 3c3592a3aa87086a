// SPDX-License-Identifier: AGPL-3.0-or-later
//! fsops CLI
//!
//! Enumerate, inspect and mutate paths through the native backend.

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(name = "fsops")]
#[command(author, version, about = "fsops - cross-platform filesystem operations", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List directory contents
    #[command(alias = "dir")]
    Ls {
        /// Path to list; empty lists the filesystem root (drives on Windows)
        #[arg(default_value = ".")]
        path: String,

        /// Long format with details
        #[arg(short, long)]
        long: bool,

        /// Show all files including hidden
        #[arg(short, long)]
        all: bool,

        /// Human-readable sizes
        #[arg(short = 'H', long)]
        human: bool,

        /// Stop after this many entries
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Recursively list paths matching a glob pattern
    Glob {
        /// Directory to search
        path: String,

        /// Pattern matched against paths relative to PATH
        pattern: Option<String>,

        /// Case-insensitive matching
        #[arg(short, long)]
        ignore_case: bool,
    },

    /// Move or rename, replacing any existing destination
    Mv {
        /// Source path
        source: String,

        /// Destination path
        dest: String,
    },

    /// Remove files or empty directories
    Rm {
        /// Path(s) to remove
        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// Create directories
    Mkdir {
        /// Directory path(s) to create
        #[arg(required = true)]
        paths: Vec<String>,

        /// Create parent directories as needed
        #[arg(short, long)]
        parents: bool,
    },

    /// Show file or directory information
    Stat {
        /// Path to inspect
        path: String,
    },

    /// List filesystem roots (drive letters on Windows, `/` children elsewhere)
    Roots,
}

/// `FSOPS_LOG` wins over `--verbose`.
fn log_level(verbose: bool) -> LevelFilter {
    let from_env = std::env::var("FSOPS_LOG").ok().and_then(|v| v.parse().ok());
    from_env.unwrap_or(if verbose { LevelFilter::DEBUG } else { LevelFilter::WARN })
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(log_level(cli.verbose))
        .with_writer(std::io::stderr)
        .init();

    let config = match fsops_core::FsConfig::load_or_default(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };
    let fs = fsops_platform::filesystem(config);

    let result = match cli.command {
        Commands::Ls { path, long, all, human, limit } => {
            commands::ls(&fs, &path, long, all, human, limit)
        }
        Commands::Glob { path, pattern, ignore_case } => {
            commands::glob(&fs, &path, pattern.as_deref(), ignore_case)
        }
        Commands::Mv { source, dest } => commands::mv(&fs, &source, &dest),
        Commands::Rm { paths } => commands::rm(&fs, &paths),
        Commands::Mkdir { paths, parents } => commands::mkdir(&fs, &paths, parents),
        Commands::Stat { path } => commands::stat(&fs, &path),
        Commands::Roots => commands::roots(&fs),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
