//! # formkit CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use formkit_cli::format::{run_format_number, FormatNumberArgs};
use formkit_cli::messages::{run_messages, MessagesArgs};
use formkit_cli::validate::{run_validate, ValidateArgs};
use formkit_cli::EXIT_ERROR;

/// formkit: declarative form field validation
///
/// Validates JSON/YAML documents against form definitions built from the
/// formkit field factories, and exposes the message catalog and number
/// formatting used in validation messages.
#[derive(Parser, Debug)]
#[command(name = "formkit", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a document against a form definition.
    Validate(ValidateArgs),

    /// Print the validation message catalog.
    Messages(MessagesArgs),

    /// Format a number as it appears in threshold messages.
    FormatNumber(FormatNumberArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level.
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("formkit CLI v{} starting", env!("CARGO_PKG_VERSION"));

    let result = match &cli.command {
        Commands::Validate(args) => run_validate(args),
        Commands::Messages(args) => run_messages(args),
        Commands::FormatNumber(args) => run_format_number(args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}
