//! Record normalization from JSONL lines to the unified GospelRecord struct

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub const DEFAULT_AUTHOR: &str = "Unknown";
pub const DEFAULT_CATEGORY: &str = "other";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GospelRecord {
    pub message: String,
    pub author: String,
    pub sentiment: f64,
    pub category: String,
}

/// Raw shape of a producer line before coercion. Every field may be absent.
///
/// `sentiment` keeps an explicit `null` apart from a missing key: only the
/// missing key defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawRecord {
    message: Value,
    author: Value,
    #[serde(deserialize_with = "present_value")]
    sentiment: Option<Value>,
    category: Value,
}

/// Only invoked when the key exists, so `null` arrives as `Some(Value::Null)`
fn present_value<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

#[derive(Debug)]
pub enum RecordError {
    InvalidJson(serde_json::Error),
    NotAnObject(&'static str),
    InvalidField { field: &'static str, reason: String },
}

impl From<serde_json::Error> for RecordError {
    fn from(err: serde_json::Error) -> Self {
        RecordError::InvalidJson(err)
    }
}

impl std::fmt::Display for RecordError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordError::InvalidJson(e) => write!(f, "Invalid JSON: {}", e),
            RecordError::NotAnObject(kind) => write!(f, "Expected a JSON object but got: {}", kind),
            RecordError::InvalidField { field, reason } => {
                write!(f, "Invalid field '{}': {}", field, reason)
            }
        }
    }
}

impl std::error::Error for RecordError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RecordError::InvalidJson(e) => Some(e),
            _ => None,
        }
    }
}

impl GospelRecord {
    pub fn new(message: &str, author: &str, sentiment: f64, category: &str) -> Self {
        Self {
            message: message.to_string(),
            author: author.to_string(),
            sentiment,
            category: category.to_string(),
        }
    }

    /// Parse a GospelRecord from a JSONL line
    ///
    /// Missing fields fall back to defaults (`author = "Unknown"`,
    /// `sentiment = 0.0`, `category = "other"`). Sentiment may arrive as a
    /// number or a numeric string; `null` and non-finite values are rejected.
    pub fn from_jsonl(line: &str) -> Result<Self, RecordError> {
        let value: Value = serde_json::from_str(line)?;
        if !value.is_object() {
            return Err(RecordError::NotAnObject(json_kind(&value)));
        }

        let raw: RawRecord = serde_json::from_value(value)?;

        Ok(Self {
            message: coerce_message(raw.message)?,
            author: coerce_label(raw.author, DEFAULT_AUTHOR),
            sentiment: coerce_sentiment(raw.sentiment)?,
            category: coerce_label(raw.category, DEFAULT_CATEGORY),
        })
    }
}

fn coerce_message(value: Value) -> Result<String, RecordError> {
    match value {
        Value::String(s) => Ok(s),
        Value::Null => Ok(String::new()),
        other => Err(RecordError::InvalidField {
            field: "message",
            reason: format!("expected a string, got {}", json_kind(&other)),
        }),
    }
}

fn coerce_label(value: Value, default: &str) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => default.to_string(),
        other => other.to_string(),
    }
}

fn coerce_sentiment(value: Option<Value>) -> Result<f64, RecordError> {
    let sentiment = match value {
        None => return Ok(0.0),
        Some(Value::Number(n)) => n.as_f64().ok_or_else(|| RecordError::InvalidField {
            field: "sentiment",
            reason: format!("{} is not representable as f64", n),
        })?,
        Some(Value::String(s)) => s.trim().parse::<f64>().map_err(|_| RecordError::InvalidField {
            field: "sentiment",
            reason: format!("'{}' is not a number", s),
        })?,
        Some(other) => {
            return Err(RecordError::InvalidField {
                field: "sentiment",
                reason: format!("expected a number, got {}", json_kind(&other)),
            })
        }
    };

    // "nan" and "inf" parse as f64 but would poison impact and the chart axes
    if !sentiment.is_finite() {
        return Err(RecordError::InvalidField {
            field: "sentiment",
            reason: format!("{} is not a finite number", sentiment),
        });
    }

    Ok(sentiment)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
