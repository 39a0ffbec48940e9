use serde::{Deserialize, Serialize};

use super::schema_node::SchemaNode;

/// How an object node treats keys that are not declared in its shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownKeys {
    /// Ignore undeclared keys.
    #[default]
    Strip,
    /// Undeclared keys are violations.
    Strict,
    /// Allow undeclared keys through.
    Passthrough,
}

/// A named entry in an object shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeField {
    pub name: String,
    pub node: SchemaNode,
}

impl ShapeField {
    pub fn new(name: impl Into<String>, node: SchemaNode) -> Self {
        Self {
            name: name.into(),
            node,
        }
    }
}

/// The declared fields of an `object({...})` node, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectShape {
    pub fields: Vec<ShapeField>,
    #[serde(default)]
    pub unknown_keys: UnknownKeys,
}

impl ObjectShape {
    pub fn new(fields: Vec<ShapeField>) -> Self {
        Self {
            fields,
            unknown_keys: UnknownKeys::Strip,
        }
    }

    pub fn field(&self, name: &str) -> Option<&ShapeField> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Marks every field optional.
    pub fn make_partial(&mut self) {
        for field in &mut self.fields {
            field.node.optional = true;
        }
    }
}
