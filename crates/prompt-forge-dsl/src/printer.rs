use prompt_forge_core::types::{
    format_number, Bound, LengthChecks, NodeKind, ObjectShape, SchemaNode, UnknownKeys,
};
use serde_json::Value;

/// Print a schema node as canonical schema source.
///
/// Objects are laid out one field per line with 2-space indentation and a
/// trailing comma; everything else stays on one line. The `z.` namespace is
/// never emitted. `parse(print(node))` reproduces `node`.
pub fn print(node: &SchemaNode) -> String {
    let mut output = String::new();
    print_node(node, &mut output, 0);
    output
}

fn print_node(node: &SchemaNode, output: &mut String, depth: usize) {
    print_kind(&node.kind, output, depth);

    if let Some(description) = &node.description {
        output.push_str(&format!(".describe({})", quote(description)));
    }
    if let Some(default) = &node.default {
        output.push_str(&format!(".default({default})"));
    }
    if node.nullable {
        output.push_str(".nullable()");
    }
    if node.optional {
        output.push_str(".optional()");
    }
}

fn print_kind(kind: &NodeKind, output: &mut String, depth: usize) {
    match kind {
        NodeKind::String(checks) => {
            output.push_str("string()");
            print_length(&checks.length, output);
            if let Some(format) = checks.format {
                output.push_str(&format!(".{}()", format.method_name()));
            }
        }
        NodeKind::Number(checks) => {
            output.push_str("number()");
            if checks.integer {
                output.push_str(".int()");
            }
            if let Some(lower) = checks.lower {
                print_bound(lower, "min", "gt", output);
            }
            if let Some(upper) = checks.upper {
                print_bound(upper, "max", "lt", output);
            }
        }
        NodeKind::Literal(value) => output.push_str(&format!("literal({value})")),
        NodeKind::Enum(variants) => {
            let quoted: Vec<String> = variants.iter().map(|v| quote(v)).collect();
            output.push_str(&format!("enum([{}])", quoted.join(", ")));
        }
        NodeKind::Array { element, length } => {
            output.push_str("array(");
            print_node(element, output, depth);
            output.push(')');
            print_length(length, output);
        }
        NodeKind::Object(shape) => print_object(shape, output, depth),
        NodeKind::Union(members) => {
            output.push_str("union([");
            for (i, member) in members.iter().enumerate() {
                if i > 0 {
                    output.push_str(", ");
                }
                print_node(member, output, depth);
            }
            output.push_str("])");
        }
        NodeKind::Record { key, value } => {
            output.push_str("record(");
            if let Some(key) = key {
                print_node(key, output, depth);
                output.push_str(", ");
            }
            print_node(value, output, depth);
            output.push(')');
        }
        other => {
            output.push_str(other.builder_name());
            output.push_str("()");
        }
    }
}

fn print_object(shape: &ObjectShape, output: &mut String, depth: usize) {
    if shape.fields.is_empty() {
        output.push_str("object({})");
    } else {
        let indent = "  ".repeat(depth + 1);
        output.push_str("object({\n");
        for field in &shape.fields {
            output.push_str(&indent);
            output.push_str(&print_key(&field.name));
            output.push_str(": ");
            print_node(&field.node, output, depth + 1);
            output.push_str(",\n");
        }
        output.push_str(&"  ".repeat(depth));
        output.push_str("})");
    }

    match shape.unknown_keys {
        UnknownKeys::Strip => {}
        UnknownKeys::Strict => output.push_str(".strict()"),
        UnknownKeys::Passthrough => output.push_str(".passthrough()"),
    }
}

fn print_length(length: &LengthChecks, output: &mut String) {
    if let Some(min) = length.min {
        output.push_str(&format!(".min({min})"));
    }
    if let Some(max) = length.max {
        output.push_str(&format!(".max({max})"));
    }
    if let Some(exact) = length.exact {
        output.push_str(&format!(".length({exact})"));
    }
}

fn print_bound(bound: Bound, inclusive: &str, exclusive: &str, output: &mut String) {
    let method = if bound.inclusive { inclusive } else { exclusive };
    output.push_str(&format!(".{method}({})", format_number(bound.value)));
}

/// Keys that lex as identifiers print bare; everything else is quoted.
fn print_key(key: &str) -> String {
    let mut chars = key.chars();
    let bare = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        && !matches!(key, "true" | "false" | "null");
    if bare {
        key.to_string()
    } else {
        quote(key)
    }
}

fn quote(s: &str) -> String {
    Value::String(s.to_string()).to_string()
}
