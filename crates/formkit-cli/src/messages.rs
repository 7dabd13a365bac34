//! # Messages Subcommand
//!
//! Prints the validation message catalog, long form by default.

use anyhow::Result;
use clap::Args;

use formkit_core::{ShortValidationError, ValidationError};

use crate::EXIT_OK;

/// Arguments for the messages subcommand.
#[derive(Args, Debug)]
pub struct MessagesArgs {
    /// Print the short-form catalog.
    #[arg(long)]
    pub short: bool,
}

/// `(entry name, text)` pairs of the selected catalog, in catalog order.
pub fn catalog(short: bool) -> Vec<(String, &'static str)> {
    if short {
        ShortValidationError::ALL
            .iter()
            .map(|e| (format!("{e:?}"), e.as_str()))
            .collect()
    } else {
        ValidationError::ALL
            .iter()
            .map(|e| (format!("{e:?}"), e.as_str()))
            .collect()
    }
}

/// Execute the messages subcommand.
pub fn run_messages(args: &MessagesArgs) -> Result<u8> {
    let entries = catalog(args.short);
    let width = entries.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
    for (name, text) in &entries {
        println!("  {name:<width$}  {text}");
    }
    Ok(EXIT_OK)
}
