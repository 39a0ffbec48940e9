//! Structural checking of decoded JSON values against a [`SchemaNode`].

use serde_json::{Map, Value};

use crate::types::{
    EnumVariants, Issue, IssuePath, LiteralValue, NodeKind, ObjectShape, SchemaNode, UnknownKeys,
};

/// The JSON type name used in `Expected X, received Y` messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl SchemaNode {
    /// Checks `value` against this node and returns every violation found,
    /// in document order. An empty vector means the value conforms.
    pub fn check(&self, value: &Value) -> Vec<Issue> {
        let mut issues = Vec::new();
        self.check_at(value, &IssuePath::root(), &mut issues);
        issues
    }

    fn check_at(&self, value: &Value, path: &IssuePath, issues: &mut Vec<Issue>) {
        if value.is_null() && (self.nullable || self.kind.admits_null()) {
            return;
        }

        match &self.kind {
            NodeKind::Any | NodeKind::Unknown => {}
            NodeKind::Null => expect_type(value, "null", path, issues),
            NodeKind::Boolean => expect_type(value, "boolean", path, issues),
            NodeKind::String(checks) => {
                let Value::String(s) = value else {
                    return mismatch("string", value, path, issues);
                };
                let len = s.chars().count();
                for message in checks.length.violations("String", "character", len) {
                    issues.push(Issue::new(path.clone(), message));
                }
                if let Some(format) = checks.format {
                    if !format.accepts(s) {
                        issues.push(Issue::new(
                            path.clone(),
                            format!("Invalid {}", format.method_name()),
                        ));
                    }
                }
            }
            NodeKind::Number(checks) => {
                let Some(n) = value.as_f64() else {
                    return mismatch("number", value, path, issues);
                };
                for message in checks.violations(n) {
                    issues.push(Issue::new(path.clone(), message));
                }
            }
            NodeKind::Literal(literal) => {
                if !literal.matches(value) {
                    issues.push(Issue::new(
                        path.clone(),
                        format!("Invalid literal value, expected {literal}"),
                    ));
                }
            }
            NodeKind::Enum(variants) => check_enum(variants, value, path, issues),
            NodeKind::Array { element, length } => {
                let Value::Array(items) = value else {
                    return mismatch("array", value, path, issues);
                };
                for message in length.violations("Array", "element", items.len()) {
                    issues.push(Issue::new(path.clone(), message));
                }
                for (i, item) in items.iter().enumerate() {
                    element.check_at(item, &path.index(i), issues);
                }
            }
            NodeKind::Object(shape) => {
                let Value::Object(map) = value else {
                    return mismatch("object", value, path, issues);
                };
                check_object(shape, map, path, issues);
            }
            NodeKind::Union(members) => {
                if !members.iter().any(|m| m.check(value).is_empty()) {
                    issues.push(Issue::new(path.clone(), "Invalid input"));
                }
            }
            NodeKind::Record { key, value: inner } => {
                let Value::Object(map) = value else {
                    return mismatch("object", value, path, issues);
                };
                for (k, v) in map {
                    let entry_path = path.key(k);
                    if let Some(key_node) = key {
                        key_node.check_at(&Value::String(k.clone()), &entry_path, issues);
                    }
                    inner.check_at(v, &entry_path, issues);
                }
            }
        }
    }
}

impl NodeKind {
    fn admits_null(&self) -> bool {
        matches!(
            self,
            Self::Null | Self::Any | Self::Unknown | Self::Literal(LiteralValue::Null)
        )
    }
}

fn mismatch(expected: &str, value: &Value, path: &IssuePath, issues: &mut Vec<Issue>) {
    issues.push(Issue::new(
        path.clone(),
        format!("Expected {expected}, received {}", json_type_name(value)),
    ));
}

fn expect_type(value: &Value, expected: &str, path: &IssuePath, issues: &mut Vec<Issue>) {
    if json_type_name(value) != expected {
        mismatch(expected, value, path, issues);
    }
}

fn check_enum(variants: &EnumVariants, value: &Value, path: &IssuePath, issues: &mut Vec<Issue>) {
    let expected = variants.expected_list();
    match value {
        Value::String(s) if variants.contains(s) => {}
        Value::String(s) => issues.push(Issue::new(
            path.clone(),
            format!("Invalid enum value. Expected {expected}, received '{s}'"),
        )),
        other => issues.push(Issue::new(
            path.clone(),
            format!("Expected {expected}, received {}", json_type_name(other)),
        )),
    }
}

fn check_object(
    shape: &ObjectShape,
    map: &Map<String, Value>,
    path: &IssuePath,
    issues: &mut Vec<Issue>,
) {
    for field in &shape.fields {
        let field_path = path.key(&field.name);
        match map.get(&field.name) {
            Some(v) => field.node.check_at(v, &field_path, issues),
            None if field.node.accepts_missing() => {}
            None => issues.push(Issue::new(field_path, "Required")),
        }
    }

    if shape.unknown_keys == UnknownKeys::Strict {
        let unknown: Vec<String> = map
            .keys()
            .filter(|k| shape.field(k).is_none())
            .map(|k| format!("'{k}'"))
            .collect();
        if !unknown.is_empty() {
            issues.push(Issue::new(
                path.clone(),
                format!("Unrecognized key(s) in object: {}", unknown.join(", ")),
            ));
        }
    }
}
