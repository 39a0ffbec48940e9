use std::fmt;

use serde::{Deserialize, Serialize};

use super::constraints::{LengthChecks, NumberChecks, StringChecks};
use super::enum_variants::EnumVariants;
use super::literal_value::LiteralValue;
use super::object_shape::ObjectShape;

/// The shape-describing part of a schema node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum NodeKind {
    String(StringChecks),
    Number(NumberChecks),
    Boolean,
    Null,
    Any,
    Unknown,
    Literal(LiteralValue),
    Enum(EnumVariants),
    Array {
        element: Box<SchemaNode>,
        #[serde(default)]
        length: LengthChecks,
    },
    Object(ObjectShape),
    Union(Vec<SchemaNode>),
    Record {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        key: Option<Box<SchemaNode>>,
        value: Box<SchemaNode>,
    },
}

impl NodeKind {
    /// The builder name used in schema source, e.g. `string` or `object`.
    pub fn builder_name(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::Number(_) => "number",
            Self::Boolean => "boolean",
            Self::Null => "null",
            Self::Any => "any",
            Self::Unknown => "unknown",
            Self::Literal(_) => "literal",
            Self::Enum(_) => "enum",
            Self::Array { .. } => "array",
            Self::Object(_) => "object",
            Self::Union(_) => "union",
            Self::Record { .. } => "record",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(v) => write!(f, "literal({v})"),
            Self::Enum(v) => write!(f, "enum{v}"),
            Self::Array { element, .. } => write!(f, "array<{}>", element.kind),
            Self::Object(shape) => write!(f, "object({} fields)", shape.fields.len()),
            Self::Union(members) => write!(f, "union({} members)", members.len()),
            Self::Record { value, .. } => write!(f, "record<{}>", value.kind),
            other => write!(f, "{}", other.builder_name()),
        }
    }
}

/// A compiled schema expression: a node kind plus the modifiers chained onto it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaNode {
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "is_false")]
    pub optional: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub nullable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<LiteralValue>,
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl SchemaNode {
    /// Creates a required, non-nullable node with no description or default.
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            optional: false,
            nullable: false,
            description: None,
            default: None,
        }
    }

    /// Returns true if an object may omit a key holding this node.
    pub fn accepts_missing(&self) -> bool {
        self.optional
            || self.default.is_some()
            || matches!(self.kind, NodeKind::Any | NodeKind::Unknown)
    }

    /// Returns true if the node carries no modifiers beyond its kind.
    pub fn is_bare(&self) -> bool {
        !self.optional && !self.nullable && self.description.is_none() && self.default.is_none()
    }

    /// Returns the object shape if this node is object-like, looking through
    /// the optional/nullable/describe/default wrappers.
    pub fn as_object(&self) -> Option<&ObjectShape> {
        match &self.kind {
            NodeKind::Object(shape) => Some(shape),
            _ => None,
        }
    }

    /// Number of node levels in the tree; a leaf has depth 1.
    pub fn depth(&self) -> usize {
        let children = match &self.kind {
            NodeKind::Array { element, .. } => element.depth(),
            NodeKind::Object(shape) => shape.fields.iter().map(|f| f.node.depth()).max().unwrap_or(0),
            NodeKind::Union(members) => members.iter().map(SchemaNode::depth).max().unwrap_or(0),
            NodeKind::Record { key, value } => {
                value.depth().max(key.as_ref().map_or(0, |k| k.depth()))
            }
            _ => 0,
        };
        children + 1
    }

    /// Declared top-level field names in declaration order; empty unless object-like.
    pub fn top_level_fields(&self) -> Vec<String> {
        self.as_object()
            .map(|shape| shape.field_names().map(str::to_string).collect())
            .unwrap_or_default()
    }
}

impl fmt::Display for SchemaNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if self.nullable {
            write!(f, "?null")?;
        }
        if self.optional {
            write!(f, "?")?;
        }
        Ok(())
    }
}
