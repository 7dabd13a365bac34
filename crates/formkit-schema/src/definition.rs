//! # Form Definitions
//!
//! Serialized descriptions of forms, loadable from YAML or JSON. Each field
//! entry names the factory that builds it (`kind`) and carries that
//! factory's options. Regular expressions and dates are given as strings
//! and compiled when the definition is built into a [`FormSchema`].
//!
//! ```yaml
//! name: signup
//! fields:
//!   - name: email
//!     kind: email
//!   - name: phone
//!     kind: phone_number
//!     is_required: false
//!   - name: birth_date
//!     kind: date
//!     max_date: "2008-01-01"
//! ```
//!
//! Building fails fast: the first invalid pattern, unparseable date or
//! inconsistent option set aborts with a [`DefinitionError`] naming the
//! field.

use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use formkit_core::{
    parse_date, patterns, ErrorMessage, FormkitError, ShortValidationError, ValidationError,
    Verbosity,
};

use crate::fields::{
    get_boolean_field, get_cell_phone_number_field, get_checkbox_group_field,
    get_confirm_password_field, get_currency_field, get_date_field, get_domain_field,
    get_email_field, get_except_query_dangerous_symbols_text_field,
    get_except_special_symbols_text_field, get_float_field, get_integer_field,
    get_min_one_amount_field, get_name_field, get_new_password_field, get_phone_number_field,
    get_radio_card_field, get_ssn_field, get_text_date_field, get_text_field, get_url_field,
    CellPhoneNumberFieldOptions, CheckboxGroupFieldOptions, CurrencyFieldOptions,
    DateFieldOptions, EmailFieldOptions, FieldOptions, NameFieldOptions, RadioCardFieldOptions,
    SymbolsFieldOptions, TextFieldOptions,
};
use crate::schema::FieldSchema;
use crate::validate::FormSchema;

/// Error loading or building a form definition.
#[derive(Error, Debug)]
pub enum DefinitionError {
    /// A file could not be read.
    #[error("cannot read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A file could not be parsed.
    #[error("cannot parse '{path}': {reason}")]
    Parse { path: String, reason: String },

    /// Two fields share a name.
    #[error("duplicate field '{0}'")]
    DuplicateField(String),

    /// A pattern option did not compile.
    #[error("field '{field}': {source}")]
    InvalidPattern {
        field: String,
        #[source]
        source: FormkitError,
    },

    /// A date option did not parse.
    #[error("field '{field}': {source}")]
    InvalidDate {
        field: String,
        #[source]
        source: FormkitError,
    },

    /// Options that contradict each other.
    #[error("field '{field}': {reason}")]
    InvalidOptions { field: String, reason: String },
}

fn default_true() -> bool {
    true
}

/// A serialized form: a name and its fields in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormDefinition {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
}

/// One named field and the factory that builds it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub name: String,
    #[serde(flatten)]
    pub kind: FieldKindDefinition,
}

/// Factory selection plus options, tagged by `kind`.
///
/// Message options accept either a catalog text, which is then reported as
/// that catalog entry, or free text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldKindDefinition {
    Boolean {
        #[serde(default = "default_true")]
        is_required: bool,
    },
    Integer {
        #[serde(default = "default_true")]
        is_required: bool,
    },
    Float {
        #[serde(default = "default_true")]
        is_required: bool,
    },
    Text {
        #[serde(default = "default_true")]
        is_required: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        error_text: Option<String>,
    },
    Name {
        #[serde(default = "default_true")]
        is_required: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min_length: Option<usize>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_length: Option<usize>,
    },
    Email {
        #[serde(default = "default_true")]
        is_required: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        email_validation_regexp: Option<String>,
    },
    Url {
        #[serde(default = "default_true")]
        is_required: bool,
    },
    CellPhoneNumber {
        #[serde(default = "default_true")]
        is_required: bool,
        #[serde(default)]
        message: Verbosity,
    },
    PhoneNumber {
        #[serde(default = "default_true")]
        is_required: bool,
    },
    Ssn {
        #[serde(default = "default_true")]
        is_required: bool,
    },
    Currency {
        #[serde(default = "default_true")]
        is_required: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        currency: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        exception: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        exception_error_text: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        empty_error_text: Option<String>,
    },
    ExceptSpecialSymbols {
        #[serde(default = "default_true")]
        is_required: bool,
        #[serde(default = "default_true")]
        is_long_message: bool,
    },
    ExceptQueryDangerousSymbols {
        #[serde(default = "default_true")]
        is_required: bool,
    },
    Domain {
        #[serde(default = "default_true")]
        is_required: bool,
    },
    MinOneAmount {
        #[serde(default = "default_true")]
        is_required: bool,
    },
    Date {
        #[serde(default = "default_true")]
        is_required: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min_date: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min_date_validation_message: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_date: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_date_validation_message: Option<String>,
    },
    TextDate {
        #[serde(default = "default_true")]
        is_required: bool,
    },
    RadioCard {
        #[serde(default = "default_true")]
        is_required: bool,
        #[serde(default)]
        nullable: bool,
    },
    CheckboxGroup {
        #[serde(default = "default_true")]
        is_required: bool,
        #[serde(default = "default_true")]
        is_long_message: bool,
    },
    NewPassword {
        #[serde(default = "default_true")]
        is_required: bool,
    },
    ConfirmPassword {
        #[serde(default = "default_true")]
        is_required: bool,
    },
}

impl FieldKindDefinition {
    /// The `kind` tag as written in definition files.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Boolean { .. } => "boolean",
            Self::Integer { .. } => "integer",
            Self::Float { .. } => "float",
            Self::Text { .. } => "text",
            Self::Name { .. } => "name",
            Self::Email { .. } => "email",
            Self::Url { .. } => "url",
            Self::CellPhoneNumber { .. } => "cell_phone_number",
            Self::PhoneNumber { .. } => "phone_number",
            Self::Ssn { .. } => "ssn",
            Self::Currency { .. } => "currency",
            Self::ExceptSpecialSymbols { .. } => "except_special_symbols",
            Self::ExceptQueryDangerousSymbols { .. } => "except_query_dangerous_symbols",
            Self::Domain { .. } => "domain",
            Self::MinOneAmount { .. } => "min_one_amount",
            Self::Date { .. } => "date",
            Self::TextDate { .. } => "text_date",
            Self::RadioCard { .. } => "radio_card",
            Self::CheckboxGroup { .. } => "checkbox_group",
            Self::NewPassword { .. } => "new_password",
            Self::ConfirmPassword { .. } => "confirm_password",
        }
    }
}

impl FieldDefinition {
    /// Build the field schema this entry describes.
    pub fn build(&self) -> Result<FieldSchema, DefinitionError> {
        let field = self.name.as_str();
        let schema = match &self.kind {
            FieldKindDefinition::Boolean { is_required } => {
                get_boolean_field(required(*is_required))
            }
            FieldKindDefinition::Integer { is_required } => {
                get_integer_field(required(*is_required))
            }
            FieldKindDefinition::Float { is_required } => get_float_field(required(*is_required)),
            FieldKindDefinition::Text {
                is_required,
                error_text,
            } => get_text_field(TextFieldOptions {
                is_required: *is_required,
                error_text: error_text
                    .as_deref()
                    .map_or_else(|| ValidationError::RequiredField.into(), message_from_text),
            }),
            FieldKindDefinition::Name {
                is_required,
                min_length,
                max_length,
            } => {
                let defaults = NameFieldOptions::default();
                let options = NameFieldOptions {
                    is_required: *is_required,
                    min_length: min_length.unwrap_or(defaults.min_length),
                    max_length: max_length.unwrap_or(defaults.max_length),
                };
                if options.min_length > options.max_length {
                    return Err(invalid_options(
                        field,
                        format!(
                            "min_length {} exceeds max_length {}",
                            options.min_length, options.max_length
                        ),
                    ));
                }
                get_name_field(options)
            }
            FieldKindDefinition::Email {
                is_required,
                email_validation_regexp,
            } => get_email_field(EmailFieldOptions {
                is_required: *is_required,
                email_validation_regexp: email_validation_regexp
                    .as_deref()
                    .map(|p| compile(field, p))
                    .transpose()?,
            }),
            FieldKindDefinition::Url { is_required } => get_url_field(required(*is_required)),
            FieldKindDefinition::CellPhoneNumber {
                is_required,
                message,
            } => get_cell_phone_number_field(CellPhoneNumberFieldOptions {
                is_required: *is_required,
                message: *message,
            }),
            FieldKindDefinition::PhoneNumber { is_required } => {
                get_phone_number_field(required(*is_required))
            }
            FieldKindDefinition::Ssn { is_required } => get_ssn_field(required(*is_required)),
            FieldKindDefinition::Currency {
                is_required,
                currency,
                exception,
                exception_error_text,
                empty_error_text,
            } => {
                let defaults = CurrencyFieldOptions::default();
                get_currency_field(CurrencyFieldOptions {
                    is_required: *is_required,
                    currency: match currency {
                        Some(p) => compile(field, p)?,
                        None => defaults.currency,
                    },
                    exception: match exception {
                        Some(p) => compile(field, p)?,
                        None => defaults.exception,
                    },
                    exception_error_text: exception_error_text
                        .as_deref()
                        .map_or(defaults.exception_error_text, message_from_text),
                    empty_error_text: empty_error_text.as_deref().map(message_from_text),
                })
            }
            FieldKindDefinition::ExceptSpecialSymbols {
                is_required,
                is_long_message,
            } => get_except_special_symbols_text_field(SymbolsFieldOptions {
                is_required: *is_required,
                is_long_message: *is_long_message,
            }),
            FieldKindDefinition::ExceptQueryDangerousSymbols { is_required } => {
                get_except_query_dangerous_symbols_text_field(required(*is_required))
            }
            FieldKindDefinition::Domain { is_required } => {
                get_domain_field(required(*is_required))
            }
            FieldKindDefinition::MinOneAmount { is_required } => {
                get_min_one_amount_field(required(*is_required))
            }
            FieldKindDefinition::Date {
                is_required,
                min_date,
                min_date_validation_message,
                max_date,
                max_date_validation_message,
            } => {
                let min_date = min_date.as_deref().map(|d| date(field, d)).transpose()?;
                let max_date = max_date.as_deref().map(|d| date(field, d)).transpose()?;
                if let (Some(min), Some(max)) = (&min_date, &max_date) {
                    if min > max {
                        return Err(invalid_options(field, "min_date is after max_date"));
                    }
                }
                get_date_field(DateFieldOptions {
                    is_required: *is_required,
                    max_date,
                    max_date_validation_message: max_date_validation_message
                        .as_deref()
                        .map(message_from_text),
                    min_date,
                    min_date_validation_message: min_date_validation_message
                        .as_deref()
                        .map(message_from_text),
                })
            }
            FieldKindDefinition::TextDate { is_required } => {
                get_text_date_field(required(*is_required))
            }
            FieldKindDefinition::RadioCard {
                is_required,
                nullable,
            } => get_radio_card_field(RadioCardFieldOptions {
                is_required: *is_required,
                nullable: *nullable,
            }),
            FieldKindDefinition::CheckboxGroup {
                is_required,
                is_long_message,
            } => get_checkbox_group_field(CheckboxGroupFieldOptions {
                is_required: *is_required,
                is_long_message: *is_long_message,
            }),
            FieldKindDefinition::NewPassword { is_required } => {
                get_new_password_field(required(*is_required))
            }
            FieldKindDefinition::ConfirmPassword { is_required } => {
                get_confirm_password_field(required(*is_required))
            }
        };
        Ok(schema)
    }
}

impl FormDefinition {
    /// Parse a YAML definition.
    pub fn from_yaml_str(source: &str) -> Result<Self, DefinitionError> {
        serde_yaml::from_str(source).map_err(|e| DefinitionError::Parse {
            path: "<yaml>".to_string(),
            reason: e.to_string(),
        })
    }

    /// Parse a JSON definition.
    pub fn from_json_str(source: &str) -> Result<Self, DefinitionError> {
        serde_json::from_str(source).map_err(|e| DefinitionError::Parse {
            path: "<json>".to_string(),
            reason: e.to_string(),
        })
    }

    /// Load a definition file. `.yaml`/`.yml` files are read as YAML,
    /// everything else as JSON.
    pub fn load(path: &Path) -> Result<Self, DefinitionError> {
        let content = read(path)?;
        let parsed = if is_yaml(path) {
            serde_yaml::from_str(&content).map_err(|e| e.to_string())
        } else {
            serde_json::from_str(&content).map_err(|e| e.to_string())
        };
        parsed.map_err(|reason| DefinitionError::Parse {
            path: path.display().to_string(),
            reason,
        })
    }

    /// Build the form schema, failing on the first bad field.
    pub fn into_schema(self) -> Result<FormSchema, DefinitionError> {
        let mut form = FormSchema::new(self.name.clone());
        for field in &self.fields {
            if form.get(&field.name).is_some() {
                tracing::warn!(form = %self.name, field = %field.name, "duplicate field in definition");
                return Err(DefinitionError::DuplicateField(field.name.clone()));
            }
            let schema = field.build().inspect_err(|e| {
                tracing::warn!(form = %self.name, kind = field.kind.tag(), "{e}");
            })?;
            form = form.field(field.name.clone(), schema);
        }
        tracing::debug!(form = %self.name, fields = form.len(), "form definition built");
        Ok(form)
    }
}

/// Load a JSON or YAML document (a form submission or a context) from disk.
pub fn load_document(path: &Path) -> Result<Value, DefinitionError> {
    let content = read(path)?;
    let parsed = if is_yaml(path) {
        serde_yaml::from_str::<Value>(&content).map_err(|e| format!("invalid YAML: {e}"))
    } else {
        serde_json::from_str::<Value>(&content).map_err(|e| format!("invalid JSON: {e}"))
    };
    parsed.map_err(|reason| DefinitionError::Parse {
        path: path.display().to_string(),
        reason,
    })
}

fn read(path: &Path) -> Result<String, DefinitionError> {
    std::fs::read_to_string(path).map_err(|source| DefinitionError::Io {
        path: path.display().to_string(),
        source,
    })
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml" | "yml")
    )
}

fn required(is_required: bool) -> FieldOptions {
    FieldOptions { is_required }
}

fn compile(field: &str, pattern: &str) -> Result<Regex, DefinitionError> {
    patterns::compile(pattern).map_err(|source| DefinitionError::InvalidPattern {
        field: field.to_string(),
        source,
    })
}

fn date(field: &str, input: &str) -> Result<chrono::DateTime<chrono::Utc>, DefinitionError> {
    parse_date(input).map_err(|source| DefinitionError::InvalidDate {
        field: field.to_string(),
        source,
    })
}

fn invalid_options(field: &str, reason: impl Into<String>) -> DefinitionError {
    DefinitionError::InvalidOptions {
        field: field.to_string(),
        reason: reason.into(),
    }
}

/// Map message text back to its catalog entry when it is one.
fn message_from_text(text: &str) -> ErrorMessage {
    if let Some(error) = ValidationError::ALL.iter().find(|e| e.as_str() == text) {
        return ErrorMessage::catalog(*error);
    }
    if let Some(error) = ShortValidationError::ALL.iter().find(|e| e.as_str() == text) {
        return ErrorMessage::short(*error);
    }
    ErrorMessage::custom(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_tag_matches_serialized_tag() {
        let field = FieldDefinition {
            name: "plan".to_string(),
            kind: FieldKindDefinition::RadioCard {
                is_required: true,
                nullable: false,
            },
        };
        let json = serde_json::to_value(&field).unwrap();
        assert_eq!(json["kind"], field.kind.tag());
        assert_eq!(json["name"], "plan");
    }

    #[test]
    fn test_defaults_to_required() {
        let def = FormDefinition::from_yaml_str("name: f\nfields:\n  - name: a\n    kind: url\n")
            .unwrap();
        assert_eq!(
            def.fields[0].kind,
            FieldKindDefinition::Url { is_required: true }
        );
    }

    #[test]
    fn test_message_from_text_recognizes_catalog() {
        assert!(message_from_text("Field value should be a valid email").is(ValidationError::Email));
        assert_eq!(
            message_from_text("Please provide valid SSN").short_entry(),
            Some(ShortValidationError::SocialSecurityNumber)
        );
        assert_eq!(
            message_from_text("Pick a plan"),
            ErrorMessage::custom("Pick a plan")
        );
    }

    #[test]
    fn test_unknown_kind_is_a_parse_error() {
        let err = FormDefinition::from_json_str(r#"{"name":"f","fields":[{"name":"a","kind":"zip"}]}"#)
            .unwrap_err();
        assert!(matches!(err, DefinitionError::Parse { .. }));
    }
}
