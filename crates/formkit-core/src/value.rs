//! # Field Values
//!
//! [`FieldValue`] is what a field descriptor produces when a candidate
//! passes: the candidate cast to the field's kind. `"42"` evaluated by an
//! integer field becomes `FieldValue::Integer(42)`, `""` evaluated by a
//! boolean field becomes `FieldValue::Bool(false)`.
//!
//! `Absent` (the key was missing) and `Null` (the key was present with a
//! JSON `null`) are kept apart because required and nullable modes treat
//! them differently.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::temporal::to_iso_string;

/// A candidate value after casting to its field kind.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Absent,
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    Date(DateTime<Utc>),
    List(Vec<String>),
}

impl FieldValue {
    /// Returns true for `Absent`.
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Returns true for `Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Absent input or the empty string.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Absent => true,
            Self::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Numeric view of `Integer` and `Float` values.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<&DateTime<Utc>> {
        match self {
            Self::Date(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// JSON rendering; `None` for `Absent`.
    ///
    /// Dates render as ISO 8601 strings with milliseconds. Non-finite floats
    /// render as `null`.
    pub fn to_json(&self) -> Option<Value> {
        let value = match self {
            Self::Absent => return None,
            Self::Null => Value::Null,
            Self::Bool(b) => Value::Bool(*b),
            Self::Integer(i) => Value::from(*i),
            Self::Float(f) => serde_json::Number::from_f64(*f).map_or(Value::Null, Value::Number),
            Self::Text(s) => Value::String(s.clone()),
            Self::Date(d) => Value::String(to_iso_string(d)),
            Self::List(items) => Value::Array(items.iter().cloned().map(Value::String).collect()),
        };
        Some(value)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_means_absent_or_empty_string() {
        assert!(FieldValue::Absent.is_empty());
        assert!(FieldValue::from("").is_empty());
        assert!(!FieldValue::from(" ").is_empty());
        assert!(!FieldValue::Null.is_empty());
        assert!(!FieldValue::Bool(false).is_empty());
    }

    #[test]
    fn json_rendering() {
        assert_eq!(FieldValue::Absent.to_json(), None);
        assert_eq!(FieldValue::Null.to_json(), Some(Value::Null));
        assert_eq!(FieldValue::Integer(42).to_json(), Some(json!(42)));
        assert_eq!(FieldValue::Float(f64::NAN).to_json(), Some(Value::Null));
        assert_eq!(
            FieldValue::List(vec!["a".into()]).to_json(),
            Some(json!(["a"]))
        );
        let date = crate::temporal::parse_date("2024-03-05").unwrap();
        assert_eq!(
            FieldValue::Date(date).to_json(),
            Some(json!("2024-03-05T00:00:00.000Z"))
        );
    }

    #[test]
    fn numeric_views() {
        assert_eq!(FieldValue::Integer(3).as_f64(), Some(3.0));
        assert_eq!(FieldValue::Float(3.5).as_i64(), None);
        assert_eq!(FieldValue::from("x").as_str(), Some("x"));
    }
}
