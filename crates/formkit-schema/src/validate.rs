//! # Form Validation
//!
//! Applies a set of named [`FieldSchema`]s to a JSON document and reports
//! failures with structured context: the field path, the constraint that
//! failed, and the catalog message.
//!
//! A [`FormSchema`] keeps its fields in declaration order, so both the
//! abort-early result of [`FormSchema::validate`] and the collected result
//! of [`FormSchema::validate_all`] are deterministic.

use std::fmt;

use serde::ser::{Serialize, SerializeStruct, Serializer};
use serde_json::{Map, Value};
use thiserror::Error;

use formkit_core::{json_type_name, ErrorMessage, FieldValue, ValidationContext};

use crate::schema::{FieldSchema, TYPE_ERROR};

/// Error during form validation.
#[derive(Error, Debug)]
pub enum FormValidationError {
    /// The document did not conform to the form.
    #[error("validation failed for form '{form}':\n{violations}")]
    ValidationFailed {
        /// Name of the form that was validated against.
        form: String,
        /// Structured list of individual violations.
        violations: ValidationViolations,
    },

    /// The document was not a JSON object.
    #[error("form '{form}' expects an object document, got {found}")]
    NotAnObject {
        form: String,
        found: &'static str,
    },
}

impl FormValidationError {
    /// The violations carried by a `ValidationFailed` error.
    pub fn violations(&self) -> Option<&ValidationViolations> {
        match self {
            Self::ValidationFailed { violations, .. } => Some(violations),
            Self::NotAnObject { .. } => None,
        }
    }
}

/// A single field failure.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    /// Field path within the document. Empty when the violation comes from
    /// a bare field evaluation.
    pub path: String,
    /// Name of the failing constraint (`required`, `typeError`, `min`, ...).
    pub constraint: String,
    /// The message attached to the failing constraint.
    pub message: ErrorMessage,
}

impl Violation {
    pub fn new(constraint: impl Into<String>, message: ErrorMessage) -> Self {
        Self {
            path: String::new(),
            constraint: constraint.into(),
            message,
        }
    }

    /// The same violation, located at `path`.
    pub fn at(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "  (value): {}", self.message)
        } else {
            write!(f, "  {}: {}", self.path, self.message)
        }
    }
}

impl Serialize for Violation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Violation", 3)?;
        state.serialize_field("path", &self.path)?;
        state.serialize_field("constraint", &self.constraint)?;
        state.serialize_field("message", &self.message.to_string())?;
        state.end()
    }
}

/// Collection of validation violations.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
#[serde(transparent)]
pub struct ValidationViolations {
    violations: Vec<Violation>,
}

impl ValidationViolations {
    /// Returns the number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Returns true if there are no violations.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns a slice of all violations.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// The first violation reported for `path`.
    pub fn for_path(&self, path: &str) -> Option<&Violation> {
        self.violations.iter().find(|v| v.path == path)
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_inner(self) -> Vec<Violation> {
        self.violations
    }
}

impl From<Vec<Violation>> for ValidationViolations {
    fn from(violations: Vec<Violation>) -> Self {
        Self { violations }
    }
}

impl fmt::Display for ValidationViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

/// Cast values of a successfully validated document, in field order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormValues {
    values: Vec<(String, FieldValue)>,
}

impl FormValues {
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// JSON object of the cast values. Absent fields are left out.
    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = self
            .values
            .iter()
            .filter_map(|(name, value)| value.to_json().map(|v| (name.clone(), v)))
            .collect();
        Value::Object(map)
    }
}

/// An ordered set of named field schemas.
#[derive(Debug, Clone, Default)]
pub struct FormSchema {
    name: String,
    fields: Vec<(String, FieldSchema)>,
}

impl FormSchema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Add a field, replacing any field of the same name in place.
    pub fn field(mut self, name: impl Into<String>, schema: FieldSchema) -> Self {
        let name = name.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => slot.1 = schema,
            None => self.fields.push((name, schema)),
        }
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get(&self, name: &str) -> Option<&FieldSchema> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, schema)| schema)
    }

    /// Returns the field names in declaration order.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Validate a document, stopping at the first failing field.
    ///
    /// # Errors
    ///
    /// Returns `ValidationFailed` with exactly one violation, or
    /// `NotAnObject` if `document` is not a JSON object.
    pub fn validate(
        &self,
        document: &Value,
        context: &ValidationContext,
    ) -> Result<FormValues, FormValidationError> {
        let object = self.as_object(document)?;
        let mut values = Vec::with_capacity(self.fields.len());

        for (name, schema) in &self.fields {
            match schema.validate(object.get(name), context) {
                Ok(value) => values.push((name.clone(), value)),
                Err(violation) => {
                    self.log_type_mismatch(name, schema, object.get(name), &violation);
                    tracing::debug!(form = %self.name, field = %name, "form validation stopped");
                    return Err(self.failed(vec![violation.at(name.clone())]));
                }
            }
        }

        tracing::debug!(form = %self.name, fields = values.len(), "form validated");
        Ok(FormValues { values })
    }

    /// Validate a document, reporting every field that fails.
    ///
    /// Each field contributes at most its first failing constraint.
    pub fn validate_all(
        &self,
        document: &Value,
        context: &ValidationContext,
    ) -> Result<FormValues, FormValidationError> {
        let object = self.as_object(document)?;
        let mut values = Vec::with_capacity(self.fields.len());
        let mut violations = Vec::new();

        for (name, schema) in &self.fields {
            match schema.validate(object.get(name), context) {
                Ok(value) => values.push((name.clone(), value)),
                Err(violation) => {
                    self.log_type_mismatch(name, schema, object.get(name), &violation);
                    violations.push(violation.at(name.clone()));
                }
            }
        }

        tracing::debug!(
            form = %self.name,
            fields = self.fields.len(),
            failed = violations.len(),
            "form validated"
        );

        if violations.is_empty() {
            Ok(FormValues { values })
        } else {
            Err(self.failed(violations))
        }
    }

    fn log_type_mismatch(
        &self,
        name: &str,
        schema: &FieldSchema,
        candidate: Option<&Value>,
        violation: &Violation,
    ) {
        if violation.constraint != TYPE_ERROR {
            return;
        }
        if let Some(candidate) = candidate {
            tracing::debug!(
                form = %self.name,
                field = %name,
                mismatch = %schema.describe_type_mismatch(candidate),
                "field failed to cast"
            );
        }
    }

    fn as_object<'a>(&self, document: &'a Value) -> Result<&'a Map<String, Value>, FormValidationError> {
        document
            .as_object()
            .ok_or_else(|| FormValidationError::NotAnObject {
                form: self.name.clone(),
                found: json_type_name(document),
            })
    }

    fn failed(&self, violations: Vec<Violation>) -> FormValidationError {
        FormValidationError::ValidationFailed {
            form: self.name.clone(),
            violations: violations.into(),
        }
    }
}
