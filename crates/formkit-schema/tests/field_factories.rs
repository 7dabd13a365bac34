//! # Field Factory Tests
//!
//! Exercises every field factory through its public options: presence
//! modes, type casting, pattern and length constraints, and the
//! cross-field password rules.

use formkit_core::{
    parse_date, ErrorMessage, FieldValue, ShortValidationError, ValidationContext,
    ValidationError, Verbosity, NEW_PASSWORD_KEY, OLD_PASSWORD_KEY,
};
use formkit_schema::*;
use proptest::prelude::*;
use regex::Regex;
use serde_json::{json, Value};

fn ctx() -> ValidationContext {
    ValidationContext::new()
}

fn message(schema: &FieldSchema, value: Value) -> ErrorMessage {
    schema.validate_value(&value).unwrap_err().message
}

fn required_message(schema: &FieldSchema, value: Option<Value>) -> ErrorMessage {
    let violation = schema.validate(value.as_ref(), &ctx()).unwrap_err();
    assert_eq!(violation.constraint, "required");
    violation.message
}

/// Every factory, built in required mode.
fn required_factories() -> Vec<(&'static str, FieldSchema)> {
    vec![
        ("integer", get_integer_field(Default::default())),
        ("float", get_float_field(Default::default())),
        ("text", get_text_field(Default::default())),
        ("name", get_name_field(Default::default())),
        ("email", get_email_field(Default::default())),
        ("url", get_url_field(Default::default())),
        ("cell_phone", get_cell_phone_number_field(Default::default())),
        ("phone", get_phone_number_field(Default::default())),
        ("ssn", get_ssn_field(Default::default())),
        ("currency", get_currency_field(Default::default())),
        ("special", get_except_special_symbols_text_field(Default::default())),
        ("query", get_except_query_dangerous_symbols_text_field(Default::default())),
        ("domain", get_domain_field(Default::default())),
        ("min_one", get_min_one_amount_field(Default::default())),
        ("date", get_date_field(Default::default())),
        ("text_date", get_text_date_field(Default::default())),
        ("new_password", get_new_password_field(Default::default())),
        ("confirm_password", get_confirm_password_field(Default::default())),
    ]
}

/// Every factory, built in optional mode.
fn optional_factories() -> Vec<(&'static str, FieldSchema)> {
    let optional = FieldOptions::optional();
    vec![
        ("boolean", get_boolean_field(optional)),
        ("integer", get_integer_field(optional)),
        ("float", get_float_field(optional)),
        (
            "text",
            get_text_field(TextFieldOptions {
                is_required: false,
                ..Default::default()
            }),
        ),
        (
            "name",
            get_name_field(NameFieldOptions {
                is_required: false,
                ..Default::default()
            }),
        ),
        (
            "email",
            get_email_field(EmailFieldOptions {
                is_required: false,
                ..Default::default()
            }),
        ),
        ("url", get_url_field(optional)),
        (
            "cell_phone",
            get_cell_phone_number_field(CellPhoneNumberFieldOptions {
                is_required: false,
                ..Default::default()
            }),
        ),
        ("phone", get_phone_number_field(optional)),
        ("ssn", get_ssn_field(optional)),
        (
            "currency",
            get_currency_field(CurrencyFieldOptions {
                is_required: false,
                currency: Regex::new(r"^\d+(\.\d{2})?$").unwrap(),
                ..Default::default()
            }),
        ),
        (
            "special",
            get_except_special_symbols_text_field(SymbolsFieldOptions {
                is_required: false,
                ..Default::default()
            }),
        ),
        ("query", get_except_query_dangerous_symbols_text_field(optional)),
        ("domain", get_domain_field(optional)),
        ("min_one", get_min_one_amount_field(optional)),
        (
            "date",
            get_date_field(DateFieldOptions {
                is_required: false,
                min_date: Some(parse_date("2020-01-01").unwrap()),
                ..Default::default()
            }),
        ),
        ("text_date", get_text_date_field(optional)),
        (
            "radio_card",
            get_radio_card_field(RadioCardFieldOptions {
                is_required: false,
                nullable: false,
            }),
        ),
        (
            "checkbox_group",
            get_checkbox_group_field(CheckboxGroupFieldOptions {
                is_required: false,
                ..Default::default()
            }),
        ),
        ("new_password", get_new_password_field(optional)),
        ("confirm_password", get_confirm_password_field(optional)),
    ]
}

// ---------------------------------------------------------------------------
// 1. Presence modes
// ---------------------------------------------------------------------------

#[test]
fn required_fields_reject_empty_and_absent_with_required_message() {
    for (name, schema) in required_factories() {
        for candidate in [None, Some(json!(""))] {
            let violation = schema
                .validate(candidate.as_ref(), &ctx())
                .expect_err(name);
            assert_eq!(violation.constraint, "required", "{name}");
            assert!(
                violation.message.is(ValidationError::RequiredField),
                "{name}: {}",
                violation.message
            );
        }
    }
}

#[test]
fn required_boolean_maps_empty_string_to_false() {
    let schema = get_boolean_field(Default::default());
    assert_eq!(
        schema.validate_value(&json!("")).unwrap(),
        FieldValue::Bool(false)
    );
    assert!(required_message(&schema, None).is(ValidationError::RequiredField));
}

#[test]
fn required_radio_card_uses_select_one_option() {
    let schema = get_radio_card_field(Default::default());
    assert!(required_message(&schema, None).is(ValidationError::SelectOneOption));
    assert!(required_message(&schema, Some(json!(""))).is(ValidationError::SelectOneOption));
}

#[test]
fn required_checkbox_group_distinguishes_absent_from_empty_list() {
    let schema = get_checkbox_group_field(Default::default());
    assert!(required_message(&schema, None).is(ValidationError::RequiredField));
    assert!(message(&schema, json!([])).is(ValidationError::AtLeastOneChecked));
    assert!(schema.validate_value(&json!(["a"])).is_ok());
}

#[test]
fn optional_fields_accept_empty_and_absent() {
    for (name, schema) in optional_factories() {
        assert!(schema.validate(None, &ctx()).is_ok(), "{name}: absent");
        assert!(
            schema.validate_value(&json!("")).is_ok(),
            "{name}: empty string"
        );
    }
}

#[test]
fn optional_empty_skips_cross_field_rules() {
    let context = ctx().with(NEW_PASSWORD_KEY, "secret");
    let schema = get_confirm_password_field(FieldOptions::optional());
    assert!(schema.validate(Some(&json!("")), &context).is_ok());
    assert!(schema.validate(Some(&json!("other")), &context).is_err());
}

#[test]
fn text_field_whitespace_only_counts_as_empty() {
    let schema = get_text_field(Default::default());
    assert!(required_message(&schema, Some(json!("   "))).is(ValidationError::RequiredField));
    let optional = get_text_field(TextFieldOptions {
        is_required: false,
        ..Default::default()
    });
    assert_eq!(
        optional.validate_value(&json!("  \t")).unwrap(),
        FieldValue::from("")
    );
}

// ---------------------------------------------------------------------------
// 2. Numbers
// ---------------------------------------------------------------------------

#[test]
fn integer_field_casts_numeric_strings() {
    let schema = get_integer_field(Default::default());
    assert_eq!(
        schema.validate_value(&json!("42")).unwrap(),
        FieldValue::Integer(42)
    );
    assert!(message(&schema, json!("3.5")).is(ValidationError::Integer));
    assert!(message(&schema, json!("abc")).is(ValidationError::Integer));
}

#[test]
fn integer_field_null_handling_depends_on_mode() {
    let required = get_integer_field(Default::default());
    assert!(required_message(&required, Some(Value::Null)).is(ValidationError::RequiredField));

    let optional = get_integer_field(FieldOptions::optional());
    assert_eq!(optional.validate_value(&Value::Null).unwrap(), FieldValue::Null);
    assert_eq!(optional.validate_value(&json!("")).unwrap(), FieldValue::Null);
}

#[test]
fn float_field_accepts_fractions() {
    let schema = get_float_field(Default::default());
    assert_eq!(
        schema.validate_value(&json!("3.5")).unwrap(),
        FieldValue::Float(3.5)
    );
    assert!(message(&schema, json!("3.5.1")).is(ValidationError::Number));
}

#[test]
fn min_one_amount_rejects_amounts_below_one() {
    let schema = get_min_one_amount_field(Default::default());
    for small in ["0", "0.", "0.5", "00.99"] {
        let msg = message(&schema, json!(small));
        assert_eq!(msg.to_string(), "Field must be greater than or equal to 1");
    }
    for amount in ["1", "1.5", "250"] {
        assert!(schema.validate_value(&json!(amount)).is_ok(), "{amount}");
    }
}

// ---------------------------------------------------------------------------
// 3. Text patterns and lengths
// ---------------------------------------------------------------------------

#[test]
fn text_field_rejects_forbidden_symbols() {
    let schema = get_text_field(Default::default());
    assert!(schema.validate_value(&json!("O'Brien, Apt. #4")).is_ok());
    assert!(schema.validate_value(&json!("Unit №5")).is_ok());
    assert!(message(&schema, json!("Zoë")).is(ValidationError::ForbiddenSymbol));
    assert!(message(&schema, json!("Привет")).is(ValidationError::ForbiddenSymbol));
}

#[test]
fn name_field_bounds_length() {
    let schema = get_name_field(Default::default());
    assert_eq!(
        message(&schema, json!("A")).to_string(),
        "Min character length is 2"
    );
    assert_eq!(
        message(&schema, json!("a".repeat(451))).to_string(),
        "Max character length is 450"
    );
    assert!(schema.validate_value(&json!("Al")).is_ok());
}

#[test]
fn email_field_built_in_check() {
    let schema = get_email_field(Default::default());
    assert!(message(&schema, json!("a@@b.com")).is(ValidationError::Email));
    assert!(schema.validate_value(&json!("a@b.com")).is_ok());
    assert!(schema.validate_value(&json!("  a@b.com  ")).is_ok());
    assert!(schema.validate_value(&json!("first.last@mail.example.org")).is_ok());
    for malformed in ["a@b", "a..b@c.com", ".a@b.com", "a.@b.com"] {
        assert!(
            message(&schema, json!(malformed)).is(ValidationError::Email),
            "{malformed}"
        );
    }
}

#[test]
fn email_field_length_limits() {
    let long = format!("{}@example.com", "a".repeat(95));
    let schema = get_email_field(Default::default());
    assert!(message(&schema, json!(long)).is(ValidationError::MaxLength));

    let optional = get_email_field(EmailFieldOptions {
        is_required: false,
        ..Default::default()
    });
    assert!(message(&optional, json!("x")).is(ValidationError::Email));
}

#[test]
fn email_field_custom_regexp_replaces_built_in_check() {
    let schema = get_email_field(EmailFieldOptions {
        is_required: true,
        email_validation_regexp: Some(Regex::new(r"^[a-z]+@corp\.example$").unwrap()),
    });
    assert!(schema.validate_value(&json!("ada@corp.example")).is_ok());
    assert!(message(&schema, json!("ada@gmail.com")).is(ValidationError::Email));
}

#[test]
fn phone_number_field() {
    let optional = get_phone_number_field(FieldOptions::optional());
    assert!(optional.validate_value(&json!("")).is_ok());
    assert!(optional.validate_value(&json!("123-456-7890")).is_ok());
    assert!(message(&optional, json!("1234567890")).is(ValidationError::PhoneNumber));

    let required = get_phone_number_field(Default::default());
    assert!(required.validate_value(&json!(" 123-456-7890 ")).is_ok());
}

#[test]
fn cell_phone_number_field_message_variants() {
    let long = get_cell_phone_number_field(Default::default());
    assert!(long.validate_value(&json!("(555) 123-4567")).is_ok());
    assert!(message(&long, json!("555-123-4567")).is(ValidationError::PhoneNumber));

    let short = get_cell_phone_number_field(CellPhoneNumberFieldOptions {
        is_required: true,
        message: Verbosity::Short,
    });
    assert_eq!(
        message(&short, json!("555")).short_entry(),
        Some(ShortValidationError::PhoneNumber)
    );
}

#[test]
fn ssn_field_requires_nine_characters() {
    let schema = get_ssn_field(Default::default());
    assert_eq!(
        message(&schema, json!("12345678")).to_string(),
        "Min character length is 9"
    );
    assert!(schema.validate_value(&json!("123-45-6789")).is_ok());
}

#[test]
fn url_field() {
    let schema = get_url_field(Default::default());
    assert!(schema.validate_value(&json!("https://example.com/a?b=c")).is_ok());
    assert!(message(&schema, json!("example.com")).is(ValidationError::Url));
}

#[test]
fn domain_field() {
    let schema = get_domain_field(Default::default());
    assert!(schema.validate_value(&json!("example.co.uk")).is_ok());
    assert!(message(&schema, json!("https://example.com")).is(ValidationError::Domain));
}

#[test]
fn currency_field_patterns() {
    let schema = get_currency_field(CurrencyFieldOptions {
        is_required: true,
        currency: Regex::new(r"^\d+(\.\d{2})?$").unwrap(),
        exception: Regex::new(r"^[1-9]").unwrap(),
        exception_error_text: ErrorMessage::custom("Amount must not start with zero"),
        empty_error_text: Some(ErrorMessage::custom("Enter an amount")),
    });
    assert!(schema.validate_value(&json!("125.00")).is_ok());
    assert!(message(&schema, json!("12.5")).is(ValidationError::CurrencyAmount));
    assert_eq!(
        message(&schema, json!("012.00")).to_string(),
        "Amount must not start with zero"
    );
    assert_eq!(
        required_message(&schema, Some(json!(""))).to_string(),
        "Enter an amount"
    );
}

#[test]
fn except_special_symbols_field() {
    let long = get_except_special_symbols_text_field(Default::default());
    assert!(long.validate_value(&json!("Main Street 12")).is_ok());
    assert!(message(&long, json!("Main St.")).is(ValidationError::SpecialSymbolsNotAllowed));

    let short = get_except_special_symbols_text_field(SymbolsFieldOptions {
        is_required: true,
        is_long_message: false,
    });
    assert_eq!(
        message(&short, json!("a&b")).short_entry(),
        Some(ShortValidationError::SpecialSymbolsNotAllowed)
    );
}

#[test]
fn except_query_dangerous_symbols_field() {
    let schema = get_except_query_dangerous_symbols_text_field(Default::default());
    assert!(schema.validate_value(&json!("Smith & Sons, Ltd.")).is_ok());
    for dangerous in ["a=b", "x;y", "1+1", "$5", "a|b", "(a)"] {
        assert!(
            message(&schema, json!(dangerous)).is(ValidationError::QueryDangerousSymbolsNotAllowed),
            "{dangerous}"
        );
    }
}

// ---------------------------------------------------------------------------
// 4. Dates
// ---------------------------------------------------------------------------

#[test]
fn date_field_default_bound_messages() {
    let schema = get_date_field(DateFieldOptions {
        min_date: Some(parse_date("2020-01-15").unwrap()),
        max_date: Some(parse_date("2024-12-31").unwrap()),
        ..Default::default()
    });
    assert!(schema.validate_value(&json!("2022-06-01")).is_ok());
    assert_eq!(
        message(&schema, json!("2019-12-31")).to_string(),
        "Field must be greater than or equal to 1/15/2020"
    );
    assert_eq!(
        message(&schema, json!("2025-01-01")).to_string(),
        "Field must be lower than or equal to 12/31/2024"
    );
    assert!(message(&schema, json!("31/31/2020")).is(ValidationError::DateFormat));
}

#[test]
fn date_field_custom_bound_message() {
    let schema = get_date_field(DateFieldOptions {
        max_date: Some(parse_date("2006-10-16").unwrap()),
        max_date_validation_message: Some(ValidationError::AdulthoodDate.into()),
        ..Default::default()
    });
    assert!(message(&schema, json!("2010-01-01")).is(ValidationError::AdulthoodDate));
}

#[test]
fn text_date_field_is_nullable_in_both_modes() {
    for options in [FieldOptions::default(), FieldOptions::optional()] {
        let schema = get_text_date_field(options);
        assert_eq!(schema.validate_value(&Value::Null).unwrap(), FieldValue::Null);
        assert!(schema.validate_value(&json!("03/05/2024")).is_ok());
        assert!(message(&schema, json!("soon")).is(ValidationError::DateFormat));
    }
}

// ---------------------------------------------------------------------------
// 5. Choices
// ---------------------------------------------------------------------------

#[test]
fn radio_card_required_and_nullable_matrix() {
    let cases = [
        // (is_required, nullable, absent ok, null ok)
        (true, false, false, false),
        (true, true, false, true),
        (false, true, true, true),
        (false, false, true, false),
    ];
    for (is_required, nullable, absent_ok, null_ok) in cases {
        let schema = get_radio_card_field(RadioCardFieldOptions {
            is_required,
            nullable,
        });
        assert_eq!(
            schema.validate(None, &ctx()).is_ok(),
            absent_ok,
            "required={is_required} nullable={nullable} absent"
        );
        assert_eq!(
            schema.validate_value(&Value::Null).is_ok(),
            null_ok,
            "required={is_required} nullable={nullable} null"
        );
        assert!(schema.validate_value(&json!("basic")).is_ok());
    }
}

#[test]
fn checkbox_group_short_message() {
    let schema = get_checkbox_group_field(CheckboxGroupFieldOptions {
        is_required: true,
        is_long_message: false,
    });
    assert_eq!(
        message(&schema, json!([])).to_string(),
        "Please check at least one checkbox"
    );
}

// ---------------------------------------------------------------------------
// 6. Passwords
// ---------------------------------------------------------------------------

#[test]
fn check_new_password_against_old_password() {
    let context = ctx().with(OLD_PASSWORD_KEY, "x");
    assert!(!check_new_password(&FieldValue::from("x"), &context));
    assert!(check_new_password(&FieldValue::from("y"), &context));
}

#[test]
fn new_password_field_rejects_old_password() {
    let schema = get_new_password_field(Default::default());
    let context = ctx().with(OLD_PASSWORD_KEY, "hunter2");
    let violation = schema.validate(Some(&json!("hunter2")), &context).unwrap_err();
    assert_eq!(violation.constraint, "check-new-password");
    assert!(violation.message.is(ValidationError::NewPasswordIsTheSame));
    assert!(schema.validate(Some(&json!("hunter3")), &context).is_ok());
}

#[test]
fn confirm_password_field_matches_new_password() {
    let schema = get_confirm_password_field(Default::default());
    let context = ctx().with(NEW_PASSWORD_KEY, "correct horse");
    assert!(schema.validate(Some(&json!("correct horse")), &context).is_ok());
    let violation = schema
        .validate(Some(&json!("correct horse battery")), &context)
        .unwrap_err();
    assert!(violation.message.is(ValidationError::PasswordDoNotMatch));
}

#[test]
fn shared_schema_across_threads() {
    let schema = std::sync::Arc::new(get_confirm_password_field(Default::default()));
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let schema = schema.clone();
            std::thread::spawn(move || {
                let password = format!("pw-{i}");
                let context = ValidationContext::new().with(NEW_PASSWORD_KEY, password.clone());
                schema.validate(Some(&json!(password)), &context).is_ok()
            })
        })
        .collect();
    for handle in handles {
        assert!(handle.join().unwrap());
    }
}

// ---------------------------------------------------------------------------
// 7. Properties
// ---------------------------------------------------------------------------

proptest! {
    /// A name field with a minimum length of 1 never reports a minimum-length failure.
    #[test]
    fn name_field_min_length_one_never_fails_min(text in "[a-zA-Z0-9 ]{0,20}") {
        let schema = get_name_field(NameFieldOptions { min_length: 1, ..Default::default() });
        if let Err(violation) = schema.validate_value(&json!(text)) {
            prop_assert!(!violation.message.is(ValidationError::MinLength));
        }
    }

    /// Optional fields short-circuit on empty input regardless of constraints.
    #[test]
    fn optional_text_fields_accept_blank_input(spaces in " {0,8}") {
        for (name, schema) in optional_factories() {
            if schema.kind() == FieldKind::String && name != "url" && name != "radio_card" && name != "text_date" {
                prop_assert!(schema.validate_value(&json!(spaces)).is_ok(), "{}", name);
            }
        }
    }

    /// Integers round-trip through their string form.
    #[test]
    fn integer_field_casts_any_i32_string(n in any::<i32>()) {
        let schema = get_integer_field(Default::default());
        prop_assert_eq!(
            schema.validate_value(&json!(n.to_string())).unwrap(),
            FieldValue::Integer(i64::from(n))
        );
    }
}
