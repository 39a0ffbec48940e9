use serde::{Deserialize, Serialize};

use super::literal_value::format_number;

/// Length limits shared by strings (characters) and arrays (elements).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LengthChecks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exact: Option<usize>,
}

impl LengthChecks {
    pub fn unconstrained() -> Self {
        Self::default()
    }

    pub fn is_unconstrained(&self) -> bool {
        self.min.is_none() && self.max.is_none() && self.exact.is_none()
    }

    /// Returns one message per violated limit. `unit` is the plural noun in
    /// `String must contain at least 3 character(s)`.
    pub fn violations(&self, subject: &str, unit: &str, len: usize) -> Vec<String> {
        let mut out = Vec::new();
        if let Some(min) = self.min {
            if len < min {
                out.push(format!("{subject} must contain at least {min} {unit}(s)"));
            }
        }
        if let Some(max) = self.max {
            if len > max {
                out.push(format!("{subject} must contain at most {max} {unit}(s)"));
            }
        }
        if let Some(exact) = self.exact {
            if len != exact {
                out.push(format!("{subject} must contain exactly {exact} {unit}(s)"));
            }
        }
        out
    }
}

/// Built-in string formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StringFormat {
    Email,
    Url,
    Uuid,
}

impl StringFormat {
    pub fn method_name(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Url => "url",
            Self::Uuid => "uuid",
        }
    }

    pub fn accepts(&self, s: &str) -> bool {
        match self {
            Self::Email => is_email(s),
            Self::Url => is_url(s),
            Self::Uuid => is_uuid(s),
        }
    }
}

fn is_email(s: &str) -> bool {
    if s.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

fn is_url(s: &str) -> bool {
    let Some((scheme, rest)) = s.split_once("://") else {
        return false;
    };
    let mut chars = scheme.chars();
    let starts_alpha = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
    starts_alpha
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        && !rest.is_empty()
        && !rest.chars().any(char::is_whitespace)
}

fn is_uuid(s: &str) -> bool {
    let groups: Vec<&str> = s.split('-').collect();
    let lens = [8, 4, 4, 4, 12];
    groups.len() == lens.len()
        && groups
            .iter()
            .zip(lens)
            .all(|(g, n)| g.len() == n && g.chars().all(|c| c.is_ascii_hexdigit()))
}

/// Constraints on a `string()` node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringChecks {
    #[serde(default)]
    pub length: LengthChecks,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<StringFormat>,
}

impl StringChecks {
    pub fn unconstrained() -> Self {
        Self::default()
    }
}

/// One end of a numeric range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bound {
    pub value: f64,
    pub inclusive: bool,
}

impl Bound {
    pub fn inclusive(value: f64) -> Self {
        Self {
            value,
            inclusive: true,
        }
    }

    pub fn exclusive(value: f64) -> Self {
        Self {
            value,
            inclusive: false,
        }
    }
}

/// Constraints on a `number()` node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NumberChecks {
    #[serde(default)]
    pub integer: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lower: Option<Bound>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upper: Option<Bound>,
}

impl NumberChecks {
    pub fn unconstrained() -> Self {
        Self::default()
    }

    pub fn violations(&self, n: f64) -> Vec<String> {
        let mut out = Vec::new();
        if self.integer && n.fract() != 0.0 {
            out.push("Expected integer, received float".to_string());
        }
        if let Some(lower) = self.lower {
            let v = format_number(lower.value);
            if lower.inclusive && n < lower.value {
                out.push(format!("Number must be greater than or equal to {v}"));
            } else if !lower.inclusive && n <= lower.value {
                out.push(format!("Number must be greater than {v}"));
            }
        }
        if let Some(upper) = self.upper {
            let v = format_number(upper.value);
            if upper.inclusive && n > upper.value {
                out.push(format!("Number must be less than or equal to {v}"));
            } else if !upper.inclusive && n >= upper.value {
                out.push(format!("Number must be less than {v}"));
            }
        }
        out
    }
}
