//! action-usage CLI - action usage reports from the command line.
//!
//! Reads the pipeline database and reports where an action is used and
//! whether those usages cross a group-visibility boundary.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

mod cli;

/// action-usage: where is a CI action used, and can its consumers see it?
#[derive(Parser)]
#[command(name = "action-usage")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file (defaults to ./action-usage.yaml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Pipeline database path (overrides the configuration file)
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    /// ID of the shared-infra group (overrides the configuration file)
    #[arg(short, long, global = true)]
    shared_infra_group: Option<i64>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List pipeline jobs using an action through a parent action
    Pipelines {
        /// Action ID
        action: i64,
    },

    /// List actions embedding an action as a step
    Actions {
        /// Action ID
        action: i64,
    },

    /// Show pipeline and action usages together
    Usage {
        /// Action ID
        action: i64,
    },

    /// Report whether an action is referenced anywhere
    Used {
        /// Action ID
        action: i64,
    },
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

    let options = cli::Options {
        config: cli.config,
        database: cli.database,
        shared_infra_group: cli.shared_infra_group,
        json: cli.json,
    };

    let result = cli::Context::from_options(options).and_then(|ctx| match cli.command {
        Commands::Pipelines { action } => cli::pipelines::run(&ctx, action.into()),
        Commands::Actions { action } => cli::actions::run(&ctx, action.into()),
        Commands::Usage { action } => cli::usage::run(&ctx, action.into()),
        Commands::Used { action } => cli::used::run(&ctx, action.into()),
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {e}", "error".red().bold());
            // Show cause chain for nested errors
            let mut source = std::error::Error::source(&e);
            while let Some(cause) = source {
                eprintln!("  {}: {cause}", "caused by".dimmed());
                source = std::error::Error::source(cause);
            }
            ExitCode::FAILURE
        }
    }
}
