//! # formkit-core: Foundational Types for formkit
//!
//! This crate is the leaf of the formkit workspace. It defines everything a
//! field descriptor needs that is not the descriptor itself:
//!
//! 1. **The message catalog.** `ValidationError` and `ShortValidationError`
//!    are closed enums with fixed texts; `ErrorMessage` pairs an entry with
//!    an optional formatted parameter. Display wording never leaks into
//!    match arms.
//!
//! 2. **Cast values.** `FieldValue` is the typed result of a successful
//!    evaluation, keeping `Absent` and `Null` distinct.
//!
//! 3. **Explicit context.** `ValidationContext` is passed to every
//!    evaluation; cross-field predicates read it, descriptors never store it.
//!
//! 4. **en-US formatting.** `normalize_number` and `format_date` produce the
//!    threshold text embedded in min/max messages.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `formkit-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests, except on constant
//!   patterns compiled in `patterns`.

pub mod context;
pub mod error;
pub mod messages;
pub mod normalize;
pub mod patterns;
pub mod temporal;
pub mod value;

// Re-export primary types for ergonomic imports.
pub use context::{json_type_name, ValidationContext, NEW_PASSWORD_KEY, OLD_PASSWORD_KEY};
pub use error::FormkitError;
pub use messages::{
    get_already_exists_error, get_input_lower_than_value_error_text,
    get_input_max_value_error_text, get_input_min_value_error_text, get_max_length_error,
    get_min_count_error, get_min_length_error, get_year_max_value_error_text,
    get_year_min_value_error_text, ErrorMessage, ShortValidationError, ValidationError, Verbosity,
};
pub use normalize::{normalize_number, parse_integer_numbers, NumberFormat, MAX_FRACTION_DIGITS};
pub use temporal::{date_without_timezone_shift, format_date, is_date, parse_date};
pub use value::FieldValue;
