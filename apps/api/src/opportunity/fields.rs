//! Field normalization for model output.
//!
//! The model is asked for `{"value": ..., "confidence": ...}` wrappers but may
//! answer with bare values, nulls, or placeholder strings. Everything is funnelled
//! through `RawField` so the "wrapped or not" decision is made exactly once.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Strings the model uses to mean "no value".
pub const SENTINELS: &[&str] = &["Not mentioned", "Not provided"];

/// A `(value, confidence)` pair. `value` is `None` when the model gave nothing usable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedField {
    pub value: Option<Value>,
    pub confidence: f64,
}

/// Raw model field, classified by shape.
#[derive(Debug, Clone, PartialEq)]
pub enum RawField {
    /// A plain value. The model expressed no confidence, so it counts as 0.0.
    Scalar(Value),
    /// An object carrying `value` and/or `confidence`.
    Wrapped { value: Value, confidence: f64 },
}

impl RawField {
    pub fn from_json(raw: &Value) -> Self {
        match raw {
            Value::Object(map) if map.contains_key("value") || map.contains_key("confidence") => {
                RawField::Wrapped {
                    value: map.get("value").cloned().unwrap_or(Value::Null),
                    confidence: map.get("confidence").and_then(score).unwrap_or(0.0),
                }
            }
            other => RawField::Scalar(other.clone()),
        }
    }

    /// Normalizes, replacing null and sentinel values with `default`.
    /// Confidence survives the substitution.
    pub fn normalize_or(self, default: Option<Value>) -> NormalizedField {
        let (value, confidence) = match self {
            RawField::Scalar(value) => (value, 0.0),
            RawField::Wrapped { value, confidence } => (value, confidence),
        };
        let value = if is_sentinel(&value) { default } else { Some(value) };
        NormalizedField { value, confidence }
    }
}

/// Normalizes a possibly-missing field. A missing key behaves like `null`.
pub fn normalize_field(raw: Option<&Value>) -> NormalizedField {
    normalize_field_or(raw, None)
}

pub fn normalize_field_or(raw: Option<&Value>, default: Option<Value>) -> NormalizedField {
    match raw {
        Some(raw) => RawField::from_json(raw).normalize_or(default),
        None => NormalizedField {
            value: default,
            confidence: 0.0,
        },
    }
}

fn is_sentinel(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => {
            let s = s.trim();
            SENTINELS.iter().any(|sentinel| s.eq_ignore_ascii_case(sentinel))
        }
        _ => false,
    }
}

/// Reads a probability from a number or numeric string, clamped to `[0, 1]`.
fn score(value: &Value) -> Option<f64> {
    let raw = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    raw.is_finite().then(|| raw.clamp(0.0, 1.0))
}

fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

impl NormalizedField {
    /// The value as non-blank text. Numbers and booleans are stringified.
    pub fn text(&self) -> Option<String> {
        self.value.as_ref().and_then(text)
    }

    pub fn flag(&self) -> Option<bool> {
        match self.value.as_ref()? {
            Value::Bool(b) => Some(*b),
            Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "yes" => Some(true),
                "false" | "no" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn score(&self) -> Option<f64> {
        self.value.as_ref().and_then(score)
    }

    /// Tags from an array or a comma-separated string; blanks dropped.
    pub fn tags(&self) -> Vec<String> {
        match &self.value {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(String::from)
                .collect(),
            Some(Value::String(s)) => s
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(String::from)
                .collect(),
            _ => Vec::new(),
        }
    }
}
