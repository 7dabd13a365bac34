//! # Validation Message Catalog
//!
//! The fixed, enumerated catalog of human-readable validation messages, in
//! a long form ([`ValidationError`]) and a short form for compact UI
//! surfaces ([`ShortValidationError`]).
//!
//! A field failure carries an [`ErrorMessage`]: one catalog entry plus an
//! optional formatted parameter (a length, a threshold amount, a date).
//! The catalog text is stable; the parameter is formatted once, when the
//! field descriptor is built, so evaluating a descriptor never formats.
//!
//! Threshold messages render as `"{catalog text} {parameter}"`, e.g.
//! `"Min character length is 2"` or `"Field must be greater than or equal to $1,000"`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::normalize::{normalize_number, NumberFormat};

/// Long-form validation messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValidationError {
    Email,
    PasswordDoNotMatch,
    RequiredField,
    Number,
    Integer,
    Url,
    MinLength,
    MaxLength,
    AlreadyExists,
    InternalNameUnique,
    PhoneNumber,
    CurrencyAmount,
    AcceptanceRequired,
    MinValue,
    MaxValue,
    EqualToValue,
    LowerThanValue,
    SelectOneOption,
    MustBePositive,
    SocialSecurityNumber,
    MinCount,
    NewPasswordIsTheSame,
    DateFormat,
    AtLeastOneChecked,
    ZipCode,
    Domain,
    SpecialSymbolsNotAllowed,
    QueryDangerousSymbolsNotAllowed,
    NumbersNotAllowed,
    MinHomeValue,
    AdulthoodDate,
    ForbiddenSymbol,
}

impl ValidationError {
    /// Every long-form catalog entry, in catalog order.
    pub const ALL: [ValidationError; 32] = [
        Self::Email,
        Self::PasswordDoNotMatch,
        Self::RequiredField,
        Self::Number,
        Self::Integer,
        Self::Url,
        Self::MinLength,
        Self::MaxLength,
        Self::AlreadyExists,
        Self::InternalNameUnique,
        Self::PhoneNumber,
        Self::CurrencyAmount,
        Self::AcceptanceRequired,
        Self::MinValue,
        Self::MaxValue,
        Self::EqualToValue,
        Self::LowerThanValue,
        Self::SelectOneOption,
        Self::MustBePositive,
        Self::SocialSecurityNumber,
        Self::MinCount,
        Self::NewPasswordIsTheSame,
        Self::DateFormat,
        Self::AtLeastOneChecked,
        Self::ZipCode,
        Self::Domain,
        Self::SpecialSymbolsNotAllowed,
        Self::QueryDangerousSymbolsNotAllowed,
        Self::NumbersNotAllowed,
        Self::MinHomeValue,
        Self::AdulthoodDate,
        Self::ForbiddenSymbol,
    ];

    /// The catalog text.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "Field value should be a valid email",
            Self::PasswordDoNotMatch => "Your password and confirmation password do not match",
            Self::RequiredField => "Required field should not be empty",
            Self::Number => "Field value should be a number",
            Self::Integer => "Field value should be an integer",
            Self::Url => "Field value should be a valid url",
            Self::MinLength => "Min character length is",
            Self::MaxLength => "Max character length is",
            Self::AlreadyExists => "Already exists",
            Self::InternalNameUnique => "The Internal Name must be unique",
            Self::PhoneNumber => "Field value should be a valid phone number",
            Self::CurrencyAmount => "Field value should be a valid amount",
            Self::AcceptanceRequired => "You should accept it to continue",
            Self::MinValue => "Field must be greater than or equal to",
            Self::MaxValue => "Field must be lower than or equal to",
            Self::EqualToValue => "Field must be equal to",
            Self::LowerThanValue => "Field must be lower than",
            Self::SelectOneOption => "Please select one",
            Self::MustBePositive => "Field must be positive",
            Self::SocialSecurityNumber => "Field value should be a valid social security",
            Self::MinCount => "Choose at least one",
            Self::NewPasswordIsTheSame => "Your new password cannot be the same as old password",
            Self::DateFormat => "Wrong date format",
            Self::AtLeastOneChecked => "At least one checkbox needs to be checked",
            Self::ZipCode => "Must be a valid zip code",
            Self::Domain => "Field value should be a valid domain",
            Self::SpecialSymbolsNotAllowed => "Field value should not contain special symbols",
            Self::QueryDangerousSymbolsNotAllowed => "Restricted symbols: $ > < = ; +",
            Self::NumbersNotAllowed => "Field value should not contain numbers",
            Self::MinHomeValue => "Home value must be at least",
            Self::AdulthoodDate => {
                "You must be at least 18 years old to submit a mortgage application"
            }
            Self::ForbiddenSymbol => "Field contains forbidden symbol",
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Short-form validation messages for compact UI surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShortValidationError {
    PhoneNumber,
    SocialSecurityNumber,
    MinValue,
    MaxValue,
    AtLeastOneChecked,
    SpecialSymbolsNotAllowed,
}

impl ShortValidationError {
    /// Every short-form catalog entry, in catalog order.
    pub const ALL: [ShortValidationError; 6] = [
        Self::PhoneNumber,
        Self::SocialSecurityNumber,
        Self::MinValue,
        Self::MaxValue,
        Self::AtLeastOneChecked,
        Self::SpecialSymbolsNotAllowed,
    ];

    /// The catalog text.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PhoneNumber => "Please provide valid phone number",
            Self::SocialSecurityNumber => "Please provide valid SSN",
            Self::MinValue => "Field must not be less than",
            Self::MaxValue => "Field must not be greater than",
            Self::AtLeastOneChecked => "Please check at least one checkbox",
            Self::SpecialSymbolsNotAllowed => "Special symbols are not allowed",
        }
    }
}

impl fmt::Display for ShortValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Selects between the long and the short catalog where both have an entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verbosity {
    #[default]
    Long,
    Short,
}

impl Verbosity {
    /// `Long` when `is_long_message` is set, `Short` otherwise.
    pub fn from_long_flag(is_long_message: bool) -> Self {
        if is_long_message {
            Self::Long
        } else {
            Self::Short
        }
    }
}

/// The message attached to a single field failure.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ErrorMessage {
    /// A long-form catalog entry, optionally followed by a parameter.
    Catalog {
        error: ValidationError,
        param: Option<String>,
    },

    /// A short-form catalog entry, optionally followed by a parameter.
    Short {
        error: ShortValidationError,
        param: Option<String>,
    },

    /// `"{entity} already exists"`.
    AlreadyExists { entity: String },

    /// Caller-supplied text, used verbatim.
    Custom(String),
}

impl ErrorMessage {
    /// A bare long-form catalog entry.
    pub fn catalog(error: ValidationError) -> Self {
        Self::Catalog { error, param: None }
    }

    /// A bare short-form catalog entry.
    pub fn short(error: ShortValidationError) -> Self {
        Self::Short { error, param: None }
    }

    /// Caller-supplied text.
    pub fn custom(text: impl Into<String>) -> Self {
        Self::Custom(text.into())
    }

    /// Attach (or replace) the formatted parameter.
    ///
    /// Has no effect on `AlreadyExists` and `Custom` messages.
    pub fn with_param(self, param: impl Into<String>) -> Self {
        match self {
            Self::Catalog { error, .. } => Self::Catalog {
                error,
                param: Some(param.into()),
            },
            Self::Short { error, .. } => Self::Short {
                error,
                param: Some(param.into()),
            },
            other => other,
        }
    }

    /// The long-form catalog entry, if this message is one.
    pub fn catalog_entry(&self) -> Option<ValidationError> {
        match self {
            Self::Catalog { error, .. } => Some(*error),
            _ => None,
        }
    }

    /// The short-form catalog entry, if this message is one.
    pub fn short_entry(&self) -> Option<ShortValidationError> {
        match self {
            Self::Short { error, .. } => Some(*error),
            _ => None,
        }
    }

    /// Returns true if this message is the given long-form catalog entry,
    /// regardless of its parameter.
    pub fn is(&self, error: ValidationError) -> bool {
        self.catalog_entry() == Some(error)
    }

    /// The formatted parameter, if any.
    pub fn param(&self) -> Option<&str> {
        match self {
            Self::Catalog { param, .. } | Self::Short { param, .. } => param.as_deref(),
            Self::AlreadyExists { entity } => Some(entity),
            Self::Custom(_) => None,
        }
    }
}

impl From<ValidationError> for ErrorMessage {
    fn from(error: ValidationError) -> Self {
        Self::catalog(error)
    }
}

impl From<ShortValidationError> for ErrorMessage {
    fn from(error: ShortValidationError) -> Self {
        Self::short(error)
    }
}

impl fmt::Display for ErrorMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Catalog { error, param } => write_with_param(f, error.as_str(), param),
            Self::Short { error, param } => write_with_param(f, error.as_str(), param),
            Self::AlreadyExists { entity } => write!(
                f,
                "{entity} {}",
                ValidationError::AlreadyExists.as_str().to_lowercase()
            ),
            Self::Custom(text) => f.write_str(text),
        }
    }
}

fn write_with_param(
    f: &mut fmt::Formatter<'_>,
    text: &str,
    param: &Option<String>,
) -> fmt::Result {
    match param {
        Some(p) => write!(f, "{text} {p}"),
        None => f.write_str(text),
    }
}

/// `"Min character length is {length}"`.
pub fn get_min_length_error(length: usize) -> ErrorMessage {
    ErrorMessage::catalog(ValidationError::MinLength).with_param(length.to_string())
}

/// `"Max character length is {length}"`.
pub fn get_max_length_error(length: usize) -> ErrorMessage {
    ErrorMessage::catalog(ValidationError::MaxLength).with_param(length.to_string())
}

/// `"{entity} already exists"`.
pub fn get_already_exists_error(entity: impl Into<String>) -> ErrorMessage {
    ErrorMessage::AlreadyExists {
        entity: entity.into(),
    }
}

/// `"Choose at least one {entity}"`.
pub fn get_min_count_error(entity: impl Into<String>) -> ErrorMessage {
    ErrorMessage::catalog(ValidationError::MinCount).with_param(entity)
}

/// Minimum-value message with the threshold run through the en-US formatter.
pub fn get_input_min_value_error_text(
    value: f64,
    is_currency: bool,
    verbosity: Verbosity,
) -> ErrorMessage {
    let normalized = normalize_number(value, NumberFormat::new(is_currency));
    match verbosity {
        Verbosity::Long => ErrorMessage::catalog(ValidationError::MinValue),
        Verbosity::Short => ErrorMessage::short(ShortValidationError::MinValue),
    }
    .with_param(normalized)
}

/// Maximum-value message with the threshold run through the en-US formatter.
pub fn get_input_max_value_error_text(
    value: f64,
    is_currency: bool,
    verbosity: Verbosity,
) -> ErrorMessage {
    let normalized = normalize_number(value, NumberFormat::new(is_currency));
    match verbosity {
        Verbosity::Long => ErrorMessage::catalog(ValidationError::MaxValue),
        Verbosity::Short => ErrorMessage::short(ShortValidationError::MaxValue),
    }
    .with_param(normalized)
}

/// Lower-than message. Zero and absent thresholds skip the formatter.
pub fn get_input_lower_than_value_error_text(value: Option<f64>, is_currency: bool) -> ErrorMessage {
    let message = ErrorMessage::catalog(ValidationError::LowerThanValue);
    match value {
        Some(v) if v != 0.0 && !v.is_nan() => {
            message.with_param(normalize_number(v, NumberFormat::new(is_currency)))
        }
        Some(v) => message.with_param(v.to_string()),
        None => message,
    }
}

/// Minimum-year message. Years are printed raw, without digit grouping.
pub fn get_year_min_value_error_text(year: i32, verbosity: Verbosity) -> ErrorMessage {
    match verbosity {
        Verbosity::Long => ErrorMessage::catalog(ValidationError::MinValue),
        Verbosity::Short => ErrorMessage::short(ShortValidationError::MinValue),
    }
    .with_param(year.to_string())
}

/// Maximum-year message. Years are printed raw, without digit grouping.
pub fn get_year_max_value_error_text(year: i32, verbosity: Verbosity) -> ErrorMessage {
    match verbosity {
        Verbosity::Long => ErrorMessage::catalog(ValidationError::MaxValue),
        Verbosity::Short => ErrorMessage::short(ShortValidationError::MaxValue),
    }
    .with_param(year.to_string())
}
