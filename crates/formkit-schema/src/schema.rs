//! # Field Schema Engine
//!
//! A [`FieldSchema`] is an immutable validation rule for one input value:
//! a value kind, a presence mode, a nullable flag, and an ordered list of
//! [`Constraint`]s. Builder methods consume the schema and return a new one,
//! so a schema shared between several forms can only be extended through
//! an explicit `clone()`.
//!
//! ## Evaluation Order
//!
//! 1. **Transform.** Kinds that map `""` (to `null` for numbers, to `false`
//!    for booleans) do so before anything else.
//! 2. **Cast.** The JSON candidate is cast to the field kind (numeric
//!    strings to numbers, strings to dates, text trimmed when configured).
//!    A non-empty candidate that cannot be cast yields the type error.
//! 3. **Null.** Nullable schemas accept `null`. Otherwise a required schema
//!    reports its required message and an optional one its type error.
//! 4. **Presence.** Absent input and `""` fail a required schema with its
//!    required message, and pass an optional one *without running any
//!    constraint*.
//! 5. **Constraints.** Run in attachment order. [`FieldSchema::validate`]
//!    stops at the first failure; [`FieldSchema::validate_all`] collects
//!    every failure.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde_json::Value;

use formkit_core::{
    format_date, json_type_name, parse_date, temporal::is_date, ErrorMessage, FieldValue,
    ValidationContext, ValidationError,
};

use crate::validate::Violation;

/// Cross-field predicate: receives the cast value and the validation context.
pub type Predicate = Arc<dyn Fn(&FieldValue, &ValidationContext) -> bool + Send + Sync>;

/// The value kind a schema casts its candidate to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Boolean,
    Number,
    Integer,
    String,
    Date,
    Array,
}

impl FieldKind {
    fn default_type_error(self) -> ErrorMessage {
        match self {
            Self::Boolean => ErrorMessage::custom("Field value should be true or false"),
            Self::Number => ErrorMessage::catalog(ValidationError::Number),
            Self::Integer => ErrorMessage::catalog(ValidationError::Integer),
            Self::String => ErrorMessage::custom("Field value should be text"),
            Self::Date => ErrorMessage::catalog(ValidationError::DateFormat),
            Self::Array => ErrorMessage::custom("Field value should be a list of options"),
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::String => "string",
            Self::Date => "date",
            Self::Array => "array",
        };
        f.write_str(name)
    }
}

/// Whether absent/empty input is itself a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Presence {
    Required(ErrorMessage),
    Optional,
}

/// Rewrite applied to an empty-string candidate before casting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EmptyString {
    Keep,
    ToNull,
    ToFalse,
}

/// The predicate half of a [`Constraint`].
#[derive(Clone)]
pub enum Rule {
    /// Text must match the pattern.
    Matches(Regex),
    /// Text must not match the pattern.
    Excludes(Regex),
    /// Text has at least this many characters.
    MinLength(usize),
    /// Text has at most this many characters.
    MaxLength(usize),
    /// Number is at least this value.
    MinValue(f64),
    /// Number is at most this value.
    MaxValue(f64),
    /// Date is not before this instant.
    MinDate(DateTime<Utc>),
    /// Date is not after this instant.
    MaxDate(DateTime<Utc>),
    /// List has at least this many items.
    MinItems(usize),
    /// Text is an email address.
    Email,
    /// Text is an absolute `http`, `https` or `ftp` URL with a host.
    Url,
    /// Text parses as a date.
    TextDate,
    /// Caller-supplied predicate with context access.
    Test(Predicate),
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Matches(re) => f.debug_tuple("Matches").field(&re.as_str()).finish(),
            Self::Excludes(re) => f.debug_tuple("Excludes").field(&re.as_str()).finish(),
            Self::MinLength(n) => f.debug_tuple("MinLength").field(n).finish(),
            Self::MaxLength(n) => f.debug_tuple("MaxLength").field(n).finish(),
            Self::MinValue(v) => f.debug_tuple("MinValue").field(v).finish(),
            Self::MaxValue(v) => f.debug_tuple("MaxValue").field(v).finish(),
            Self::MinDate(d) => f.debug_tuple("MinDate").field(d).finish(),
            Self::MaxDate(d) => f.debug_tuple("MaxDate").field(d).finish(),
            Self::MinItems(n) => f.debug_tuple("MinItems").field(n).finish(),
            Self::Email => f.write_str("Email"),
            Self::Url => f.write_str("Url"),
            Self::TextDate => f.write_str("TextDate"),
            Self::Test(_) => f.write_str("Test(<predicate>)"),
        }
    }
}

impl Rule {
    /// Evaluate against a cast, non-empty value. Rules that do not apply to
    /// the value's kind pass.
    fn check(&self, value: &FieldValue, context: &ValidationContext) -> bool {
        match (self, value) {
            (Self::Matches(re), FieldValue::Text(s)) => re.is_match(s),
            (Self::Excludes(re), FieldValue::Text(s)) => !re.is_match(s),
            (Self::MinLength(n), FieldValue::Text(s)) => s.chars().count() >= *n,
            (Self::MaxLength(n), FieldValue::Text(s)) => s.chars().count() <= *n,
            (Self::MinValue(min), v) => v.as_f64().map_or(true, |x| x >= *min),
            (Self::MaxValue(max), v) => v.as_f64().map_or(true, |x| x <= *max),
            (Self::MinDate(min), FieldValue::Date(d)) => d >= min,
            (Self::MaxDate(max), FieldValue::Date(d)) => d <= max,
            (Self::MinItems(n), FieldValue::List(items)) => items.len() >= *n,
            (Self::Email, FieldValue::Text(s)) => formkit_core::patterns::EMAIL.is_match(s),
            (Self::Url, FieldValue::Text(s)) => is_url(s),
            (Self::TextDate, FieldValue::Text(s)) => is_date(s),
            (Self::Test(predicate), v) => predicate(v, context),
            _ => true,
        }
    }
}

fn is_url(s: &str) -> bool {
    if s.chars().any(char::is_whitespace) {
        return false;
    }
    match url::Url::parse(s) {
        Ok(parsed) => {
            matches!(parsed.scheme(), "http" | "https" | "ftp")
                && parsed.host_str().is_some_and(|h| !h.is_empty())
        }
        Err(_) => false,
    }
}

/// A named rule plus the message reported when it fails.
#[derive(Debug, Clone)]
pub struct Constraint {
    name: String,
    message: ErrorMessage,
    rule: Rule,
}

impl Constraint {
    pub fn new(name: impl Into<String>, message: impl Into<ErrorMessage>, rule: Rule) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
            rule,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn message(&self) -> &ErrorMessage {
        &self.message
    }

    pub fn rule(&self) -> &Rule {
        &self.rule
    }
}

static NULL: Value = Value::Null;

/// Constraint name reported for presence failures.
pub const REQUIRED: &str = "required";
/// Constraint name reported for cast failures.
pub const TYPE_ERROR: &str = "typeError";

/// An immutable, composable validation rule for one input value.
#[derive(Debug, Clone)]
pub struct FieldSchema {
    kind: FieldKind,
    presence: Presence,
    nullable: bool,
    trim: bool,
    empty_string: EmptyString,
    type_error: ErrorMessage,
    constraints: Vec<Constraint>,
}

impl FieldSchema {
    /// An optional, non-nullable schema of the given kind with no constraints.
    pub fn new(kind: FieldKind) -> Self {
        Self {
            kind,
            presence: Presence::Optional,
            nullable: false,
            trim: false,
            empty_string: EmptyString::Keep,
            type_error: kind.default_type_error(),
            constraints: Vec::new(),
        }
    }

    pub fn boolean() -> Self {
        Self::new(FieldKind::Boolean)
    }

    pub fn number() -> Self {
        Self::new(FieldKind::Number)
    }

    pub fn string() -> Self {
        Self::new(FieldKind::String)
    }

    pub fn date() -> Self {
        Self::new(FieldKind::Date)
    }

    pub fn array() -> Self {
        Self::new(FieldKind::Array)
    }

    // -- Modes ---------------------------------------------------------------

    /// Reject absent and empty input with `message`.
    pub fn required(mut self, message: impl Into<ErrorMessage>) -> Self {
        self.presence = Presence::Required(message.into());
        self
    }

    /// Accept absent and empty input, skipping constraints.
    pub fn not_required(mut self) -> Self {
        self.presence = Presence::Optional;
        self
    }

    /// Accept (or stop accepting) `null`.
    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    /// Trim surrounding whitespace from text before validating.
    pub fn trim(mut self) -> Self {
        self.trim = true;
        self
    }

    /// Restrict a number schema to whole numbers; fractions become type errors.
    pub fn integer(mut self) -> Self {
        if self.kind == FieldKind::Number {
            if self.type_error == FieldKind::Number.default_type_error() {
                self.type_error = FieldKind::Integer.default_type_error();
            }
            self.kind = FieldKind::Integer;
        }
        self
    }

    /// Message reported when the candidate cannot be cast to the kind.
    pub fn type_error(mut self, message: impl Into<ErrorMessage>) -> Self {
        self.type_error = message.into();
        self
    }

    /// Treat `""` as `null`.
    pub fn empty_string_to_null(mut self) -> Self {
        self.empty_string = EmptyString::ToNull;
        self
    }

    /// Treat `""` as `false`.
    pub fn empty_string_to_false(mut self) -> Self {
        self.empty_string = EmptyString::ToFalse;
        self
    }

    // -- Constraints ---------------------------------------------------------

    /// Attach a constraint. Constraints run in attachment order.
    pub fn constraint(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    pub fn matches(self, pattern: Regex, message: impl Into<ErrorMessage>) -> Self {
        self.constraint(Constraint::new("matches", message, Rule::Matches(pattern)))
    }

    pub fn excludes(self, pattern: Regex, message: impl Into<ErrorMessage>) -> Self {
        self.constraint(Constraint::new("excludes", message, Rule::Excludes(pattern)))
    }

    pub fn min_length(self, length: usize, message: impl Into<ErrorMessage>) -> Self {
        self.constraint(Constraint::new("min", message, Rule::MinLength(length)))
    }

    pub fn max_length(self, length: usize, message: impl Into<ErrorMessage>) -> Self {
        self.constraint(Constraint::new("max", message, Rule::MaxLength(length)))
    }

    pub fn min_value(self, min: f64, message: impl Into<ErrorMessage>) -> Self {
        self.constraint(Constraint::new("min", message, Rule::MinValue(min)))
    }

    pub fn max_value(self, max: f64, message: impl Into<ErrorMessage>) -> Self {
        self.constraint(Constraint::new("max", message, Rule::MaxValue(max)))
    }

    pub fn min_date(self, min: DateTime<Utc>, message: impl Into<ErrorMessage>) -> Self {
        self.constraint(Constraint::new("min", message, Rule::MinDate(min)))
    }

    pub fn max_date(self, max: DateTime<Utc>, message: impl Into<ErrorMessage>) -> Self {
        self.constraint(Constraint::new("max", message, Rule::MaxDate(max)))
    }

    pub fn min_items(self, count: usize, message: impl Into<ErrorMessage>) -> Self {
        self.constraint(Constraint::new("min", message, Rule::MinItems(count)))
    }

    pub fn email(self, message: impl Into<ErrorMessage>) -> Self {
        self.constraint(Constraint::new("email", message, Rule::Email))
    }

    pub fn url(self, message: impl Into<ErrorMessage>) -> Self {
        self.constraint(Constraint::new("url", message, Rule::Url))
    }

    pub fn text_date(self, message: impl Into<ErrorMessage>) -> Self {
        self.constraint(Constraint::new("is-text-date", message, Rule::TextDate))
    }

    /// Attach a named predicate with access to the validation context.
    pub fn test<F>(self, name: impl Into<String>, message: impl Into<ErrorMessage>, predicate: F) -> Self
    where
        F: Fn(&FieldValue, &ValidationContext) -> bool + Send + Sync + 'static,
    {
        self.constraint(Constraint::new(name, message, Rule::Test(Arc::new(predicate))))
    }

    // -- Introspection -------------------------------------------------------

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn presence(&self) -> &Presence {
        &self.presence
    }

    pub fn is_required(&self) -> bool {
        matches!(self.presence, Presence::Required(_))
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Returns true if a constraint with this name is attached.
    pub fn has_constraint(&self, name: &str) -> bool {
        self.constraints.iter().any(|c| c.name == name)
    }

    // -- Evaluation ----------------------------------------------------------

    /// Evaluate a candidate, stopping at the first failure.
    ///
    /// `None` means the value is absent. On success returns the cast value.
    pub fn validate(
        &self,
        value: Option<&Value>,
        context: &ValidationContext,
    ) -> Result<FieldValue, Violation> {
        let cast = match self.prepare(value)? {
            Prepared::Done(v) => return Ok(v),
            Prepared::Check(v) => v,
        };

        for constraint in &self.constraints {
            if !constraint.rule.check(&cast, context) {
                return Err(Violation::new(&constraint.name, constraint.message.clone()));
            }
        }
        Ok(cast)
    }

    /// Evaluate a candidate, reporting every failing constraint.
    pub fn validate_all(
        &self,
        value: Option<&Value>,
        context: &ValidationContext,
    ) -> Result<FieldValue, Vec<Violation>> {
        let cast = match self.prepare(value) {
            Ok(Prepared::Done(v)) => return Ok(v),
            Ok(Prepared::Check(v)) => v,
            Err(violation) => return Err(vec![violation]),
        };

        let failures: Vec<Violation> = self
            .constraints
            .iter()
            .filter(|c| !c.rule.check(&cast, context))
            .map(|c| Violation::new(&c.name, c.message.clone()))
            .collect();

        if failures.is_empty() {
            Ok(cast)
        } else {
            Err(failures)
        }
    }

    /// Evaluate a present value with an empty context.
    pub fn validate_value(&self, value: &Value) -> Result<FieldValue, Violation> {
        self.validate(Some(value), &ValidationContext::new())
    }

    /// Returns true if the candidate passes.
    pub fn is_valid(&self, value: Option<&Value>, context: &ValidationContext) -> bool {
        self.validate(value, context).is_ok()
    }

    /// Steps 1–4 of the evaluation order.
    fn prepare(&self, value: Option<&Value>) -> Result<Prepared, Violation> {
        let value = match (value, self.empty_string) {
            (Some(Value::String(s)), EmptyString::ToNull) if s.is_empty() => Some(&NULL),
            (Some(Value::String(s)), EmptyString::ToFalse) if s.is_empty() => {
                return Ok(Prepared::Check(FieldValue::Bool(false)));
            }
            (v, _) => v,
        };

        let cast = match value {
            None => FieldValue::Absent,
            Some(Value::Null) => FieldValue::Null,
            Some(v) => self
                .cast(v)
                .ok_or_else(|| Violation::new(TYPE_ERROR, self.type_error.clone()))?,
        };

        if cast.is_null() {
            return match (&self.presence, self.nullable) {
                (_, true) => Ok(Prepared::Done(cast)),
                (Presence::Required(message), false) => {
                    Err(Violation::new(REQUIRED, message.clone()))
                }
                (Presence::Optional, false) => {
                    Err(Violation::new(TYPE_ERROR, self.type_error.clone()))
                }
            };
        }

        if cast.is_empty() {
            return match &self.presence {
                Presence::Required(message) => Err(Violation::new(REQUIRED, message.clone())),
                Presence::Optional => Ok(Prepared::Done(cast)),
            };
        }

        Ok(Prepared::Check(cast))
    }

    /// Cast a present, non-null JSON value to this schema's kind.
    fn cast(&self, value: &Value) -> Option<FieldValue> {
        match self.kind {
            FieldKind::Boolean => cast_bool(value).map(FieldValue::Bool),
            FieldKind::Number => cast_number(value).map(FieldValue::Float),
            FieldKind::Integer => cast_integer(value).map(FieldValue::Integer),
            FieldKind::String => cast_text(value, self.trim).map(FieldValue::Text),
            FieldKind::Date => match value {
                Value::String(s) if s.trim().is_empty() => Some(FieldValue::Absent),
                Value::String(s) => parse_date(s).ok().map(FieldValue::Date),
                Value::Number(n) => n
                    .as_i64()
                    .and_then(DateTime::<Utc>::from_timestamp_millis)
                    .map(FieldValue::Date),
                _ => None,
            },
            FieldKind::Array => match value {
                Value::String(s) if s.is_empty() => Some(FieldValue::Absent),
                Value::Array(items) => items
                    .iter()
                    .map(scalar_to_string)
                    .collect::<Option<Vec<_>>>()
                    .map(FieldValue::List),
                _ => None,
            },
        }
    }

    /// Human-readable description of a cast failure, logged by
    /// [`FormSchema`](crate::FormSchema) on `typeError` violations.
    pub fn describe_type_mismatch(&self, value: &Value) -> String {
        format!("expected {}, got {}", self.kind, json_type_name(value))
    }
}

enum Prepared {
    /// Evaluation finished without running constraints.
    Done(FieldValue),
    /// Cast value that still has to pass the constraints.
    Check(FieldValue),
}

fn cast_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => match n.as_f64() {
            Some(x) if x == 1.0 => Some(true),
            Some(x) if x == 0.0 => Some(false),
            _ => None,
        },
        Value::String(s) => {
            let s = s.trim();
            if s.eq_ignore_ascii_case("true") || s == "1" {
                Some(true)
            } else if s.eq_ignore_ascii_case("false") || s == "0" {
                Some(false)
            } else {
                None
            }
        }
        _ => None,
    }
}

fn cast_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

fn cast_integer(value: &Value) -> Option<i64> {
    if let Value::Number(n) = value {
        if let Some(i) = n.as_i64() {
            return Some(i);
        }
    }
    let n = cast_number(value)?;
    if n.fract() != 0.0 || n < i64::MIN as f64 || n >= i64::MAX as f64 {
        return None;
    }
    Some(n as i64)
}

fn cast_text(value: &Value, trim: bool) -> Option<String> {
    let text = scalar_to_string(value)?;
    Some(if trim { text.trim().to_string() } else { text })
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Default bound message for date constraints: catalog text plus `M/D/YYYY`.
pub fn date_bound_message(error: ValidationError, bound: &DateTime<Utc>) -> ErrorMessage {
    ErrorMessage::catalog(error).with_param(format_date(bound))
}
