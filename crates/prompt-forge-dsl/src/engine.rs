//! The schema engine: compile schema source once, validate candidate output
//! text against it many times.
//!
//! Every public operation here is total. Compile failures become `None` or an
//! empty field list, and validation failures of any kind become a
//! [`ValidationResult`].

use std::panic::{self, AssertUnwindSafe};

use prompt_forge_core::types::{ExampleId, ExamplePair, Issue, SchemaNode, ValidationResult};
use serde_json::Value;

use crate::error::DslError;
use crate::parser::parse;

/// A schema compiled into a reusable, immutable validator.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledValidator {
    root: SchemaNode,
}

impl CompiledValidator {
    pub fn new(root: SchemaNode) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &SchemaNode {
        &self.root
    }

    /// Checks an already decoded value and returns every violation.
    pub fn check_value(&self, value: &Value) -> Vec<Issue> {
        self.root.check(value)
    }

    /// Declared top-level field names when the root is object-like.
    pub fn top_level_fields(&self) -> Vec<String> {
        self.root.top_level_fields()
    }
}

/// Compiles `source`, returning the diagnostics on failure.
///
/// # Errors
///
/// Returns the lexer or parser errors for malformed source.
pub fn try_compile(source: &str) -> Result<CompiledValidator, Vec<DslError>> {
    parse(source).map(CompiledValidator::new)
}

/// Compiles `source`, or returns `None` if it is not a valid schema.
///
/// In-progress schema text is expected to be malformed much of the time, so
/// failures are logged at debug level only.
pub fn compile(source: &str) -> Option<CompiledValidator> {
    match try_compile(source) {
        Ok(validator) => Some(validator),
        Err(errors) => {
            tracing::debug!(
                errors = errors.len(),
                first = %errors.first().map(ToString::to_string).unwrap_or_default(),
                "schema did not compile"
            );
            None
        }
    }
}

/// Validates JSON text against a compiled validator.
///
/// The check recurses at most [`MAX_DEPTH`](crate::parser::MAX_DEPTH) levels,
/// since compiled trees never nest deeper. A panic inside the check is still
/// contained and reported as `Validation failed`, but it goes through the
/// process panic hook first, so embedders that must keep stderr clean should
/// install their own hook.
pub fn validate(validator: &CompiledValidator, raw_text: &str) -> ValidationResult {
    let value: Value = match serde_json::from_str(raw_text) {
        Ok(value) => value,
        Err(_) => return ValidationResult::invalid_json(),
    };

    match panic::catch_unwind(AssertUnwindSafe(|| validator.check_value(&value))) {
        Ok(issues) if issues.is_empty() => ValidationResult::valid(),
        Ok(issues) => {
            let messages: Vec<String> = issues.iter().map(ToString::to_string).collect();
            ValidationResult::invalid(messages.join(", "))
        }
        Err(_) => {
            tracing::warn!("schema check panicked; reporting generic failure");
            ValidationResult::validation_failed()
        }
    }
}

/// Best-effort list of the schema's top-level field names, in declaration
/// order. Empty when the source does not compile or the root is not an object.
pub fn extract_top_level_fields(source: &str) -> Vec<String> {
    compile(source)
        .map(|v| v.top_level_fields())
        .unwrap_or_default()
}

/// The live validation outcome for one example pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExampleCheck {
    pub id: ExampleId,
    pub result: ValidationResult,
}

/// Validates each example's expected output.
///
/// Without a validator, or for a blank output, an example counts as valid so
/// that an unfinished schema or example never blocks editing.
pub fn check_examples(
    validator: Option<&CompiledValidator>,
    examples: &[ExamplePair],
) -> Vec<ExampleCheck> {
    examples
        .iter()
        .map(|example| {
            let result = match validator {
                Some(v) if !example.output.trim().is_empty() => validate(v, &example.output),
                _ => ValidationResult::valid(),
            };
            ExampleCheck {
                id: example.id.clone(),
                result,
            }
        })
        .collect()
}
