//! # Format-Number Subcommand
//!
//! Formats a number the way min/max threshold messages render it.
//!
//! ```bash
//! formkit format-number 1234.5 --currency     # $1,234.5
//! formkit format-number -0.125 --min-fraction 3
//! ```

use anyhow::{bail, Result};
use clap::Args;

use formkit_core::{normalize_number, NumberFormat, MAX_FRACTION_DIGITS};

use crate::EXIT_OK;

/// Arguments for the format-number subcommand.
#[derive(Args, Debug)]
pub struct FormatNumberArgs {
    /// The number to format.
    #[arg(allow_negative_numbers = true)]
    pub value: f64,

    /// Prefix with `$`.
    #[arg(long)]
    pub currency: bool,

    /// Fraction digits always printed.
    #[arg(long, default_value_t = 0)]
    pub min_fraction: usize,

    /// Fraction digits kept after rounding.
    #[arg(long, default_value_t = 2)]
    pub max_fraction: usize,
}

/// Format `args.value` with the requested options.
///
/// # Errors
///
/// Rejects digit bounds above the supported maximum and a maximum below
/// the minimum.
pub fn format_value(args: &FormatNumberArgs) -> Result<String> {
    if args.min_fraction > MAX_FRACTION_DIGITS || args.max_fraction > MAX_FRACTION_DIGITS {
        bail!("fraction digits must be at most {MAX_FRACTION_DIGITS}");
    }
    if args.max_fraction < args.min_fraction {
        bail!(
            "--max-fraction {} is below --min-fraction {}",
            args.max_fraction,
            args.min_fraction
        );
    }
    let format = NumberFormat {
        is_currency: args.currency,
        minimum_fraction_digits: args.min_fraction,
        maximum_fraction_digits: args.max_fraction,
    };
    Ok(normalize_number(args.value, format))
}

/// Execute the format-number subcommand.
pub fn run_format_number(args: &FormatNumberArgs) -> Result<u8> {
    println!("{}", format_value(args)?);
    Ok(EXIT_OK)
}
