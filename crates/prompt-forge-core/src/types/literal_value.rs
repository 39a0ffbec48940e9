use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A literal appearing in schema source: `literal(...)` targets and `default(...)` values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LiteralValue {
    String(String),
    Number(f64),
    Boolean(bool),
    Null,
}

impl LiteralValue {
    /// Returns true if the decoded JSON value equals this literal.
    pub fn matches(&self, value: &Value) -> bool {
        match (self, value) {
            (Self::String(s), Value::String(v)) => s == v,
            (Self::Number(n), Value::Number(v)) => v.as_f64() == Some(*n),
            (Self::Boolean(b), Value::Bool(v)) => b == v,
            (Self::Null, Value::Null) => true,
            _ => false,
        }
    }

    /// Converts this literal to its JSON form.
    pub fn to_json(&self) -> Value {
        match self {
            Self::String(s) => Value::String(s.clone()),
            Self::Number(n) => serde_json::Number::from_f64(*n)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            Self::Boolean(b) => Value::Bool(*b),
            Self::Null => Value::Null,
        }
    }
}

impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "{}", Value::String(s.clone())),
            Self::Number(n) => write!(f, "{}", format_number(*n)),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Null => write!(f, "null"),
        }
    }
}

/// Formats a number without a trailing `.0` when it is integral.
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}
