//! # Field Factories
//!
//! Functions that build the reusable field schemas forms are assembled
//! from. Each factory takes an options struct whose `Default` holds the
//! usual configuration (almost always a required field), so the common
//! call is `get_name_field(Default::default())` and variations read as
//! `get_name_field(NameFieldOptions { min_length: 1, ..Default::default() })`.
//!
//! Every text-based factory starts from [`get_text_field`]: surrounding
//! whitespace is trimmed and characters outside the latin allow-list are
//! rejected before any field-specific pattern runs.

use chrono::{DateTime, Utc};
use regex::Regex;

use formkit_core::{
    get_max_length_error, get_min_length_error,
    patterns::{
        CELL_PHONE_NUMBER, DOMAIN, EXCEPT_QUERY_DANGEROUS_SYMBOLS, EXCEPT_SPECIAL_SYMBOLS,
        LATIN_LETTERS_NUMBERS_SPECIAL_CHARACTERS, LESS_THAN_ONE, MATCH_ALL, PHONE_NUMBER,
        PHONE_NUMBER_OR_EMPTY,
    },
    ErrorMessage, FieldValue, ShortValidationError, ValidationContext, ValidationError, Verbosity,
    NEW_PASSWORD_KEY, OLD_PASSWORD_KEY,
};

use crate::schema::{date_bound_message, FieldSchema};

/// Options shared by factories whose only setting is the presence mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldOptions {
    pub is_required: bool,
}

impl Default for FieldOptions {
    fn default() -> Self {
        Self { is_required: true }
    }
}

impl FieldOptions {
    pub fn optional() -> Self {
        Self { is_required: false }
    }
}

fn presence(schema: FieldSchema, is_required: bool, message: impl Into<ErrorMessage>) -> FieldSchema {
    if is_required {
        schema.required(message)
    } else {
        schema.not_required()
    }
}

// -- Scalars ---------------------------------------------------------------

/// Boolean field. `""` counts as `false`.
pub fn get_boolean_field(options: FieldOptions) -> FieldSchema {
    let schema = FieldSchema::boolean().empty_string_to_false();
    presence(schema, options.is_required, ValidationError::RequiredField)
}

/// Whole-number field. `""` counts as `null`, which only optional fields accept.
pub fn get_integer_field(options: FieldOptions) -> FieldSchema {
    let schema = FieldSchema::number()
        .integer()
        .empty_string_to_null()
        .nullable(!options.is_required)
        .type_error(ValidationError::Integer);
    presence(schema, options.is_required, ValidationError::RequiredField)
}

/// Number field accepting fractions. `""` counts as `null`.
pub fn get_float_field(options: FieldOptions) -> FieldSchema {
    let schema = FieldSchema::number()
        .empty_string_to_null()
        .nullable(!options.is_required)
        .type_error(ValidationError::Number);
    presence(schema, options.is_required, ValidationError::RequiredField)
}

// -- Text ------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct TextFieldOptions {
    pub is_required: bool,
    /// Message reported when a required field is empty.
    pub error_text: ErrorMessage,
}

impl Default for TextFieldOptions {
    fn default() -> Self {
        Self {
            is_required: true,
            error_text: ValidationError::RequiredField.into(),
        }
    }
}

impl From<FieldOptions> for TextFieldOptions {
    fn from(options: FieldOptions) -> Self {
        Self {
            is_required: options.is_required,
            ..Self::default()
        }
    }
}

/// Trimmed text restricted to latin letters, digits, whitespace and
/// common punctuation.
pub fn get_text_field(options: TextFieldOptions) -> FieldSchema {
    let schema = FieldSchema::string().trim().matches(
        LATIN_LETTERS_NUMBERS_SPECIAL_CHARACTERS.clone(),
        ValidationError::ForbiddenSymbol,
    );
    presence(schema, options.is_required, options.error_text)
}

fn text_field(is_required: bool) -> FieldSchema {
    get_text_field(FieldOptions { is_required }.into())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameFieldOptions {
    pub is_required: bool,
    pub min_length: usize,
    pub max_length: usize,
}

impl Default for NameFieldOptions {
    fn default() -> Self {
        Self {
            is_required: true,
            min_length: 2,
            max_length: 450,
        }
    }
}

/// Text bounded by character count.
///
/// A `min_length` of exactly 1 attaches no minimum-length constraint at all.
pub fn get_name_field(options: NameFieldOptions) -> FieldSchema {
    let schema = text_field(options.is_required).max_length(
        options.max_length,
        get_max_length_error(options.max_length),
    );

    if options.min_length == 1 {
        return schema;
    }

    schema.min_length(options.min_length, get_min_length_error(options.min_length))
}

#[derive(Debug, Clone)]
pub struct EmailFieldOptions {
    pub is_required: bool,
    /// Replaces the built-in email check when set.
    pub email_validation_regexp: Option<Regex>,
}

impl Default for EmailFieldOptions {
    fn default() -> Self {
        Self {
            is_required: true,
            email_validation_regexp: None,
        }
    }
}

/// Email address, at most 100 characters (at least 2 when required).
pub fn get_email_field(options: EmailFieldOptions) -> FieldSchema {
    let schema = get_name_field(NameFieldOptions {
        is_required: options.is_required,
        min_length: if options.is_required { 2 } else { 0 },
        max_length: 100,
    });

    match options.email_validation_regexp {
        Some(pattern) => schema.matches(pattern, ValidationError::Email),
        None => schema.email(ValidationError::Email),
    }
}

/// Absolute `http`, `https` or `ftp` URL.
pub fn get_url_field(options: FieldOptions) -> FieldSchema {
    let schema = FieldSchema::string().url(ValidationError::Url);
    presence(schema, options.is_required, ValidationError::RequiredField)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellPhoneNumberFieldOptions {
    pub is_required: bool,
    /// Long or short phone-number message.
    pub message: Verbosity,
}

impl Default for CellPhoneNumberFieldOptions {
    fn default() -> Self {
        Self {
            is_required: true,
            message: Verbosity::Long,
        }
    }
}

/// `(NNN) NNN-NNNN`.
pub fn get_cell_phone_number_field(options: CellPhoneNumberFieldOptions) -> FieldSchema {
    let message: ErrorMessage = match options.message {
        Verbosity::Long => ValidationError::PhoneNumber.into(),
        Verbosity::Short => ShortValidationError::PhoneNumber.into(),
    };
    text_field(options.is_required).matches(CELL_PHONE_NUMBER.clone(), message)
}

/// `NNN-NNN-NNNN`; optional fields also accept `""`.
pub fn get_phone_number_field(options: FieldOptions) -> FieldSchema {
    let pattern = if options.is_required {
        PHONE_NUMBER.clone()
    } else {
        PHONE_NUMBER_OR_EMPTY.clone()
    };
    text_field(options.is_required).matches(pattern, ValidationError::PhoneNumber)
}

/// Social security number: text of at least 9 characters.
pub fn get_ssn_field(options: FieldOptions) -> FieldSchema {
    const SSN_LENGTH: usize = 9;
    text_field(options.is_required).min_length(SSN_LENGTH, get_min_length_error(SSN_LENGTH))
}

#[derive(Debug, Clone)]
pub struct CurrencyFieldOptions {
    pub is_required: bool,
    /// Shape of a valid amount.
    pub currency: Regex,
    /// Additional pattern the amount must match.
    pub exception: Regex,
    pub exception_error_text: ErrorMessage,
    /// Message for an empty required field; `RequiredField` when unset.
    pub empty_error_text: Option<ErrorMessage>,
}

impl Default for CurrencyFieldOptions {
    fn default() -> Self {
        Self {
            is_required: true,
            currency: MATCH_ALL.clone(),
            exception: MATCH_ALL.clone(),
            exception_error_text: ErrorMessage::custom(""),
            empty_error_text: None,
        }
    }
}

pub fn get_currency_field(options: CurrencyFieldOptions) -> FieldSchema {
    let text = TextFieldOptions {
        is_required: options.is_required,
        error_text: options
            .empty_error_text
            .unwrap_or_else(|| ValidationError::RequiredField.into()),
    };
    get_text_field(text)
        .matches(options.currency, ValidationError::CurrencyAmount)
        .matches(options.exception, options.exception_error_text)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymbolsFieldOptions {
    pub is_required: bool,
    pub is_long_message: bool,
}

impl Default for SymbolsFieldOptions {
    fn default() -> Self {
        Self {
            is_required: true,
            is_long_message: true,
        }
    }
}

/// Text of latin letters, digits and whitespace only.
pub fn get_except_special_symbols_text_field(options: SymbolsFieldOptions) -> FieldSchema {
    let message: ErrorMessage = match Verbosity::from_long_flag(options.is_long_message) {
        Verbosity::Long => ValidationError::SpecialSymbolsNotAllowed.into(),
        Verbosity::Short => ShortValidationError::SpecialSymbolsNotAllowed.into(),
    };
    text_field(options.is_required).matches(EXCEPT_SPECIAL_SYMBOLS.clone(), message)
}

/// Text without `( ) $ | > < = ; +`.
pub fn get_except_query_dangerous_symbols_text_field(options: FieldOptions) -> FieldSchema {
    text_field(options.is_required).matches(
        EXCEPT_QUERY_DANGEROUS_SYMBOLS.clone(),
        ValidationError::QueryDangerousSymbolsNotAllowed,
    )
}

/// Domain name such as `example.com`.
pub fn get_domain_field(options: FieldOptions) -> FieldSchema {
    text_field(options.is_required).matches(DOMAIN.clone(), ValidationError::Domain)
}

/// Amount text that must not be below one (`0`, `0.5`, `00.99` fail).
pub fn get_min_one_amount_field(options: FieldOptions) -> FieldSchema {
    text_field(options.is_required).excludes(
        LESS_THAN_ONE.clone(),
        ErrorMessage::catalog(ValidationError::MinValue).with_param("1"),
    )
}

// -- Dates -----------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct DateFieldOptions {
    pub is_required: bool,
    /// Latest accepted date, inclusive.
    pub max_date: Option<DateTime<Utc>>,
    pub max_date_validation_message: Option<ErrorMessage>,
    /// Earliest accepted date, inclusive.
    pub min_date: Option<DateTime<Utc>>,
    pub min_date_validation_message: Option<ErrorMessage>,
}

impl Default for DateFieldOptions {
    fn default() -> Self {
        Self {
            is_required: true,
            max_date: None,
            max_date_validation_message: None,
            min_date: None,
            min_date_validation_message: None,
        }
    }
}

/// Date field with optional inclusive bounds.
///
/// Without a custom message a bound failure reads like
/// `"Field must be lower than or equal to 12/31/2024"`.
pub fn get_date_field(options: DateFieldOptions) -> FieldSchema {
    let mut schema = FieldSchema::date();

    if let Some(max) = options.max_date {
        let message = options
            .max_date_validation_message
            .unwrap_or_else(|| date_bound_message(ValidationError::MaxValue, &max));
        schema = schema.max_date(max, message);
    }

    if let Some(min) = options.min_date {
        let message = options
            .min_date_validation_message
            .unwrap_or_else(|| date_bound_message(ValidationError::MinValue, &min));
        schema = schema.min_date(min, message);
    }

    presence(schema, options.is_required, ValidationError::RequiredField)
}

/// Text that must parse as a date. Accepts `null` in both modes.
pub fn get_text_date_field(options: FieldOptions) -> FieldSchema {
    let schema = FieldSchema::string().text_date(ValidationError::DateFormat);
    presence(schema, options.is_required, ValidationError::RequiredField).nullable(true)
}

// -- Choices ---------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RadioCardFieldOptions {
    pub is_required: bool,
    pub nullable: bool,
}

impl Default for RadioCardFieldOptions {
    fn default() -> Self {
        Self {
            is_required: true,
            nullable: false,
        }
    }
}

/// A single selected option.
///
/// | required | nullable | absent | `null` |
/// |----------|----------|--------|--------|
/// | yes      | no       | fails  | fails  |
/// | yes      | yes      | fails  | passes |
/// | no       | yes      | passes | passes |
/// | no       | no       | passes | fails  |
pub fn get_radio_card_field(options: RadioCardFieldOptions) -> FieldSchema {
    let schema = FieldSchema::string();
    presence(schema, options.is_required, ValidationError::SelectOneOption)
        .nullable(options.nullable)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckboxGroupFieldOptions {
    pub is_required: bool,
    pub is_long_message: bool,
}

impl Default for CheckboxGroupFieldOptions {
    fn default() -> Self {
        Self {
            is_required: true,
            is_long_message: true,
        }
    }
}

/// List of checked option values; required groups need at least one.
pub fn get_checkbox_group_field(options: CheckboxGroupFieldOptions) -> FieldSchema {
    let schema = FieldSchema::array();
    if !options.is_required {
        return schema;
    }

    let message: ErrorMessage = match Verbosity::from_long_flag(options.is_long_message) {
        Verbosity::Long => ValidationError::AtLeastOneChecked.into(),
        Verbosity::Short => ShortValidationError::AtLeastOneChecked.into(),
    };
    schema
        .required(ValidationError::RequiredField)
        .min_items(1, message)
}

// -- Passwords -------------------------------------------------------------

/// True when `value` differs from the context's `oldPassword`.
pub fn check_new_password(value: &FieldValue, context: &ValidationContext) -> bool {
    value.as_str() != context.get_str(OLD_PASSWORD_KEY)
}

/// True when `value` equals the context's `newPassword`.
pub fn check_confirm_password(value: &FieldValue, context: &ValidationContext) -> bool {
    value.as_str() == context.get_str(NEW_PASSWORD_KEY)
}

/// Password that must differ from `oldPassword` in the context.
pub fn get_new_password_field(options: FieldOptions) -> FieldSchema {
    text_field(options.is_required).test(
        "check-new-password",
        ValidationError::NewPasswordIsTheSame,
        check_new_password,
    )
}

/// Password that must equal `newPassword` in the context.
pub fn get_confirm_password_field(options: FieldOptions) -> FieldSchema {
    text_field(options.is_required).test(
        "check-confirm-password",
        ValidationError::PasswordDoNotMatch,
        check_confirm_password,
    )
}
