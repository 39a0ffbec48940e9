//! Renders a [`PromptSpec`] into the canonical sectioned prompt text.
//!
//! Sections appear in a fixed order and only when they have content:
//!
//! ```text
//! <agent_role>            trimmed role text
//! <schema_of_expected_result>  trimmed schema source
//! <examples>              escaped example pairs, blank pairs dropped
//! <instructions>          trimmed instructions
//! <user_input>            one escaped element per non-blank entry
//! ```
//!
//! Sections are separated by a single blank line.

use crate::escape::{element_name, escape_markup};
use crate::types::{ExamplePair, PromptSpec, UserInput};

const SECTION_SEPARATOR: &str = "\n\n";

/// Assembles the prompt text for `spec`.
///
/// Pure and total: the same spec always yields byte-identical output, and an
/// all-blank spec yields an empty string.
pub fn assemble(spec: &PromptSpec) -> String {
    let mut sections: Vec<String> = Vec::with_capacity(5);

    if let Some(section) = wrap_trimmed("agent_role", &spec.agent_role) {
        sections.push(section);
    }
    if let Some(section) = wrap_trimmed("schema_of_expected_result", &spec.schema_source) {
        sections.push(section);
    }
    if let Some(section) = examples_section(&spec.examples) {
        sections.push(section);
    }
    if let Some(section) = wrap_trimmed("instructions", &spec.instructions) {
        sections.push(section);
    }
    if let Some(section) = user_input_section(&spec.user_input) {
        sections.push(section);
    }

    tracing::trace!(sections = sections.len(), "assembled prompt");
    sections.join(SECTION_SEPARATOR)
}

fn wrap_trimmed(tag: &str, content: &str) -> Option<String> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(format!("<{tag}>\n{trimmed}\n</{tag}>"))
}

fn examples_section(examples: &[ExamplePair]) -> Option<String> {
    let blocks: Vec<String> = examples
        .iter()
        .filter(|e| !e.is_blank())
        .map(|e| {
            format!(
                "  <example>\n    <user_input>{}</user_input>\n    <expected_output>{}</expected_output>\n  </example>",
                escape_markup(&e.input),
                escape_markup(&e.output)
            )
        })
        .collect();

    if blocks.is_empty() {
        return None;
    }
    Some(format!("<examples>\n{}\n</examples>", blocks.join("\n")))
}

fn user_input_section(input: &UserInput) -> Option<String> {
    let lines: Vec<String> = input
        .non_blank()
        .map(|(key, value)| {
            let tag = element_name(key);
            format!("  <{tag}>{}</{tag}>", escape_markup(value))
        })
        .collect();

    if lines.is_empty() {
        return None;
    }
    Some(format!("<user_input>\n{}\n</user_input>", lines.join("\n")))
}
