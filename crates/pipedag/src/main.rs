//! Pipedag CLI - pipeline graph analysis from the command line.
//!
//! Reads pipeline JSON (`{"nodes": [...], "edges": [...], "name": ...}`) from a
//! file or stdin and prints the same JSON payloads an HTTP front end would send.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

mod cli;

/// Pipedag: pipeline statistics, DAG checking and storage.
#[derive(Parser)]
#[command(name = "pipedag")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Database file (defaults to $DATABASE_URL, then pipelines.db)
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Count nodes and edges and check whether the pipeline is a DAG
    Analyze {
        /// Pipeline JSON file (reads stdin when omitted or "-")
        input: Option<PathBuf>,
    },

    /// Analyze a pipeline and save it to the database
    Save {
        /// Pipeline JSON file (reads stdin when omitted or "-")
        input: Option<PathBuf>,

        /// Name for the saved pipeline (overrides any name in the input)
        #[arg(short, long)]
        name: Option<String>,
    },

    /// List saved pipelines, newest first
    List {
        /// One line per pipeline instead of JSON
        #[arg(short, long)]
        brief: bool,
    },

    /// Check that the CLI is alive
    Ping,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let database = cli.database;

    let result = match cli.command {
        Commands::Analyze { input } => cli::analyze::run(input.as_deref()),
        Commands::Save { input, name } => {
            cli::save::run(database.as_deref(), input.as_deref(), name)
        }
        Commands::List { brief } => cli::list::run(database.as_deref(), brief),
        Commands::Ping => cli::output::print_json(&pipedag::api::ping()).map(|()| true),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("{}: {e}", "error".red().bold());
            // Show cause chain for nested errors
            for cause in e.chain().skip(1) {
                eprintln!("  {}: {cause}", "caused by".dimmed());
            }
            ExitCode::FAILURE
        }
    }
}
