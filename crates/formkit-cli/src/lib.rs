//! # formkit-cli: Command-Line Interface for formkit
//!
//! The `formkit` binary. Argument parsing lives in `main.rs`; each
//! subcommand module holds its clap arguments, a pure function computing
//! the result, and a `run_*` handler that prints it and returns the exit
//! code.
//!
//! ## Subcommands
//!
//! - `formkit validate`: Validate a JSON/YAML document against a form definition.
//! - `formkit messages`: Print the validation message catalog.
//! - `formkit format-number`: Format a number the way threshold messages do.
//!
//! ## Exit Codes
//!
//! - `0`: success (document valid).
//! - `1`: document invalid.
//! - `2`: operational error (unreadable file, bad definition).

pub mod format;
pub mod messages;
pub mod validate;

/// Exit code for a valid document or a successful command.
pub const EXIT_OK: u8 = 0;
/// Exit code for a document that failed validation.
pub const EXIT_INVALID: u8 = 1;
/// Exit code for operational errors.
pub const EXIT_ERROR: u8 = 2;
