mod checksum;
mod commands;
mod output;

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Exit code for a failed validation verdict.
const EXIT_FAIL: i32 = 1;

/// Exit code for structural errors (unreadable file, bad table shape).
const EXIT_FATAL: i32 = 2;

#[derive(Parser)]
#[command(name = "chargeval")]
#[command(version, about = "Charging-station dataset validator and view builder", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the dataset and print a report
    Validate {
        /// Directory containing the dataset CSV files
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,

        /// Enable strict mode (warnings fail the run)
        #[arg(short, long)]
        strict: bool,

        /// Severity for orphan/missing-aggregation findings: warning, error
        #[arg(long, default_value = "warning")]
        references: String,

        /// Output format: text, json
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Validate, then build the derived view tables
    BuildViews {
        /// Directory containing the dataset CSV files
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,

        /// Output directory for the generated view tables
        #[arg(long, default_value = "generated")]
        out_dir: PathBuf,

        /// Enable strict mode (warnings fail the run)
        #[arg(short, long)]
        strict: bool,

        /// Severity for orphan/missing-aggregation findings: warning, error
        #[arg(long, default_value = "warning")]
        references: String,

        /// Output format: text, json
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Write a SHA-256 checksum manifest for distribution files
    Checksums {
        /// Root directory manifest paths are made relative to
        #[arg(long, default_value = ".")]
        root: PathBuf,

        /// Output manifest file
        #[arg(short, long, default_value = "checksums.sha256")]
        out: PathBuf,

        /// Files to include in the manifest
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    // Initialize tracing
    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_level(true)
                .compact(),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            log_level,
        ))
        .init();

    let result = match cli.command {
        Commands::Validate {
            data_dir,
            strict,
            references,
            format,
        } => commands::validate::execute(&data_dir, strict, &references, &format),

        Commands::BuildViews {
            data_dir,
            out_dir,
            strict,
            references,
            format,
        } => commands::build_views::execute(&data_dir, &out_dir, strict, &references, &format),

        Commands::Checksums { root, out, files } => {
            commands::checksums::execute(&root, &out, &files)
        }
    };

    // Structural failure, distinct from a data-quality fail (EXIT_FAIL is
    // taken inside the commands once the report is printed).
    if let Err(err) = result {
        eprintln!("{} {err:#}", "Error:".red().bold());
        std::process::exit(EXIT_FATAL);
    }
}
