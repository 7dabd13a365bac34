//! # formkit-schema: Field Schemas & Field Factories
//!
//! Declarative, reusable validators for form inputs.
//!
//! ## Schema Engine (`schema`)
//!
//! [`FieldSchema`] is an immutable rule for one value: a kind to cast to,
//! a required/optional mode, a nullable flag and an ordered list of
//! constraints. Builder methods consume and return the schema.
//!
//! ## Field Factories (`fields`)
//!
//! The preconfigured schemas forms are built from: text, name, email,
//! phone, currency, date, checkbox group, password confirmation and so
//! on. Each takes an options struct whose `Default` is the common case.
//!
//! ## Forms (`validate`, `definition`)
//!
//! [`FormSchema`] applies named field schemas to a JSON document.
//! [`FormDefinition`] describes a form in YAML or JSON and builds the
//! corresponding `FormSchema`.
//!
//! ## Crate Policy
//!
//! - Depends only on `formkit-core` internally.
//! - Evaluation never mutates a schema. Only form-level evaluation logs.
//! - Cross-field rules read the [`ValidationContext`](formkit_core::ValidationContext)
//!   passed to each evaluation.

pub mod definition;
pub mod fields;
pub mod schema;
pub mod validate;

pub use definition::{
    load_document, DefinitionError, FieldDefinition, FieldKindDefinition, FormDefinition,
};
pub use fields::{
    check_confirm_password, check_new_password, get_boolean_field, get_cell_phone_number_field,
    get_checkbox_group_field, get_confirm_password_field, get_currency_field, get_date_field,
    get_domain_field, get_email_field, get_except_query_dangerous_symbols_text_field,
    get_except_special_symbols_text_field, get_float_field, get_integer_field,
    get_min_one_amount_field, get_name_field, get_new_password_field, get_phone_number_field,
    get_radio_card_field, get_ssn_field, get_text_date_field, get_text_field, get_url_field,
    CellPhoneNumberFieldOptions, CheckboxGroupFieldOptions, CurrencyFieldOptions,
    DateFieldOptions, EmailFieldOptions, FieldOptions, NameFieldOptions, RadioCardFieldOptions,
    SymbolsFieldOptions, TextFieldOptions,
};
pub use schema::{Constraint, FieldKind, FieldSchema, Predicate, Presence, Rule};
pub use validate::{FormSchema, FormValidationError, FormValues, ValidationViolations, Violation};
