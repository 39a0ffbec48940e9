use miette::{Diagnostic, NamedSource, SourceSpan};
use prompt_forge_dsl::parser::MAX_DEPTH;
use prompt_forge_dsl::{DslError, Span};

/// A diagnostic wrapping a `DslError` for rich miette rendering.
///
/// The module-level `#[allow(unused_assignments)]` in main.rs is required
/// because miette's derive macro generates assignment patterns that rustc
/// flags as unused.
#[derive(Debug, thiserror::Error, Diagnostic)]
#[error("{message}")]
pub struct SchemaDiagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("{label}")]
    span: SourceSpan,

    message: String,
    label: String,

    #[help]
    suggestion: Option<String>,
}

fn source_span(span: &Span) -> SourceSpan {
    (span.start, span.len()).into()
}

/// Convert a `DslError` into a miette `SchemaDiagnostic`.
pub fn dsl_error_to_diagnostic(error: &DslError, source: &str, filename: &str) -> SchemaDiagnostic {
    let src = NamedSource::new(filename, source.to_string());
    let (message, label, suggestion) = describe(error);

    let span = match error.span() {
        Some(span) => source_span(span),
        // Last character, or an empty span for empty source.
        None => {
            let start = source.char_indices().next_back().map_or(0, |(i, _)| i);
            (start, source.len() - start).into()
        }
    };

    SchemaDiagnostic {
        src,
        span,
        message,
        label,
        suggestion,
    }
}

fn describe(error: &DslError) -> (String, String, Option<String>) {
    match error {
        DslError::InvalidToken { .. } => (
            "invalid token".to_string(),
            "unrecognized token".to_string(),
            Some("Check for typos or unsupported characters.".to_string()),
        ),

        DslError::UnexpectedToken {
            expected, found, ..
        } => (
            format!("unexpected token: expected {expected}, found {found}"),
            format!("expected {expected}"),
            None,
        ),

        DslError::UnexpectedEndOfInput { expected } => (
            format!("unexpected end of input: expected {expected}"),
            "input ended here".to_string(),
            Some(format!("Add {expected} to complete the schema.")),
        ),

        DslError::UnknownBuilder { name, .. } => (
            format!("unknown builder '{name}'"),
            "not a schema builder".to_string(),
            Some(
                "Start with string(), number(), boolean(), object({...}), array(...), \
                 enum([...]), literal(...), union([...]) or record(...)."
                    .to_string(),
            ),
        ),

        DslError::UnknownMethod { name, .. } => (
            format!("unknown method '{name}'"),
            "not a schema method".to_string(),
            None,
        ),

        DslError::InvalidMethodTarget { method, kind, .. } => (
            format!("'{method}' cannot be applied to {kind}()"),
            format!("not supported on {kind}()"),
            Some(format!("Remove .{method}() or change the base type.")),
        ),

        DslError::WrongArgumentCount {
            name,
            expected,
            found,
            ..
        } => (
            format!("'{name}' takes {expected} argument(s), found {found}"),
            format!("expected {expected} argument(s)"),
            None,
        ),

        DslError::InvalidArgument { name, expected, .. } => (
            format!("invalid argument to '{name}'"),
            format!("expected {expected}"),
            None,
        ),

        DslError::InvalidNumberLiteral { text, .. } => (
            format!("invalid number literal '{text}'"),
            "expected a finite number".to_string(),
            None,
        ),

        DslError::DuplicateKey { key, .. } => (
            format!("duplicate key '{key}'"),
            "already defined above".to_string(),
            Some("Remove the duplicate or rename one of the keys.".to_string()),
        ),

        DslError::EmptyEnumVariants { .. } => (
            "enum has no variants".to_string(),
            "empty variant list".to_string(),
            Some("Provide at least one string, e.g. enum([\"low\", \"high\"])".to_string()),
        ),

        DslError::DuplicateEnumVariant { variant, .. } => (
            format!("duplicate enum variant '{variant}'"),
            "already listed above".to_string(),
            Some("Remove the duplicate variant.".to_string()),
        ),

        DslError::UnionTooSmall { found, .. } => (
            format!("union needs at least two members, found {found}"),
            "too few members".to_string(),
            Some("Use the single member directly, or add another option.".to_string()),
        ),

        DslError::NestingTooDeep { limit, .. } => (
            format!("schema nests deeper than {limit} levels"),
            "nesting limit reached here".to_string(),
            Some(format!("Flatten the schema below {MAX_DEPTH} levels.")),
        ),

        // Catch future non_exhaustive variants
        _ => (error.to_string(), "error".to_string(), None),
    }
}

/// Render all parse errors for a file using miette.
///
/// Returns a vector of `miette::Report` that can be printed to stderr.
pub fn render_diagnostics(
    errors: &[DslError],
    source: &str,
    filename: &str,
) -> Vec<miette::Report> {
    errors
        .iter()
        .map(|e| {
            let diagnostic = dsl_error_to_diagnostic(e, source, filename);
            miette::Report::new(diagnostic)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_token_diagnostic() {
        let err = DslError::InvalidToken {
            span: Span::new(0, 3),
        };
        let diag = dsl_error_to_diagnostic(&err, "???", "result.schema");
        assert!(diag.message.contains("invalid token"));
        assert_eq!(diag.span.offset(), 0);
        assert_eq!(diag.span.len(), 3);
        assert!(diag.suggestion.is_some());
    }

    #[test]
    fn unexpected_token_diagnostic() {
        let err = DslError::UnexpectedToken {
            expected: "'('".into(),
            found: "'{'".into(),
            span: Span::new(6, 7),
        };
        let diag = dsl_error_to_diagnostic(&err, "object{}", "result.schema");
        assert!(diag.message.contains("expected '('"));
        assert!(diag.label.contains("expected '('"));
    }

    #[test]
    fn end_of_input_points_at_last_byte() {
        let err = DslError::UnexpectedEndOfInput {
            expected: "')'".into(),
        };
        let source = "string(";
        let diag = dsl_error_to_diagnostic(&err, source, "result.schema");
        assert!(diag.message.contains("unexpected end"));
        assert_eq!(diag.span.offset(), source.len() - 1);
        assert_eq!(diag.span.len(), 1);
        assert!(diag.suggestion.is_some());
    }

    #[test]
    fn end_of_input_on_empty_source_has_empty_span() {
        let err = DslError::UnexpectedEndOfInput {
            expected: "a schema".into(),
        };
        let diag = dsl_error_to_diagnostic(&err, "", "result.schema");
        assert_eq!(diag.span.offset(), 0);
        assert!(diag.span.is_empty());
    }

    #[test]
    fn method_target_diagnostic_suggests_removal() {
        let err = DslError::InvalidMethodTarget {
            method: "min".into(),
            kind: "boolean".into(),
            span: Span::new(10, 13),
        };
        let diag = dsl_error_to_diagnostic(&err, "boolean().min(1)", "result.schema");
        assert!(diag.message.contains("boolean()"));
        assert!(diag.suggestion.as_ref().unwrap().contains(".min()"));
    }

    #[test]
    fn duplicate_key_diagnostic() {
        let err = DslError::DuplicateKey {
            key: "a".into(),
            span: Span::new(23, 24),
        };
        let diag =
            dsl_error_to_diagnostic(&err, "object({ a: string(), a: number() })", "r.schema");
        assert!(diag.message.contains("duplicate key 'a'"));
        assert!(diag.label.contains("already defined"));
    }

    #[test]
    fn nesting_diagnostic_names_limit() {
        let err = DslError::NestingTooDeep {
            limit: MAX_DEPTH,
            span: Span::new(0, 1),
        };
        let diag = dsl_error_to_diagnostic(&err, "a", "r.schema");
        assert!(diag.message.contains(&MAX_DEPTH.to_string()));
    }

    #[test]
    fn render_diagnostics_produces_reports() {
        let errors = prompt_forge_dsl::parse("object({ a: nope() })").unwrap_err();
        let reports = render_diagnostics(&errors, "object({ a: nope() })", "r.schema");
        assert_eq!(reports.len(), errors.len());
        assert!(!reports.is_empty());
    }
}
