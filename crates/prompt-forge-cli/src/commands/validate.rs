use std::io::Read;
use std::path::PathBuf;

use prompt_forge_core::types::ValidationResult;

use crate::cli::ValidateArgs;
use crate::error::CliError;
use crate::output::OutputContext;

use super::{compile_schema_file, read_file};

/// A value to validate and where it came from.
struct Candidate {
    label: String,
    text: String,
}

/// Run the `validate` command: check JSON values against a schema file.
pub fn run(args: ValidateArgs, output: &OutputContext) -> Result<(), CliError> {
    let validator = compile_schema_file(&args.schema)?;
    let candidates = collect_candidates(args.value, &args.files)?;

    let results: Vec<(String, ValidationResult)> = candidates
        .into_iter()
        .map(|c| {
            let result = prompt_forge_dsl::validate(&validator, &c.text);
            tracing::debug!(source = %c.label, valid = result.valid, "validated");
            (c.label, result)
        })
        .collect();
    let invalid = results.iter().filter(|(_, r)| !r.valid).count();

    output.validation_report(&args.schema, &results);

    if invalid > 0 {
        return Err(CliError::ValidationFailed {
            invalid,
            total: results.len(),
        });
    }
    output.success(&format!("{} value(s) valid", results.len()));
    Ok(())
}

fn collect_candidates(
    value: Option<String>,
    files: &[PathBuf],
) -> Result<Vec<Candidate>, CliError> {
    if let Some(text) = value {
        return Ok(vec![Candidate {
            label: "--value".to_string(),
            text,
        }]);
    }

    if files.is_empty() {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .map_err(|e| CliError::Io {
                path: PathBuf::from("<stdin>"),
                source: e,
            })?;
        return Ok(vec![Candidate {
            label: "<stdin>".to_string(),
            text,
        }]);
    }

    files
        .iter()
        .map(|path| {
            Ok(Candidate {
                label: path.display().to_string(),
                text: read_file(path)?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_value_wins() {
        let candidates = collect_candidates(Some("{}".into()), &[]).unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].label, "--value");
        assert_eq!(candidates[0].text, "{}");
    }

    #[test]
    fn files_are_read_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.json");
        let b = dir.path().join("b.json");
        std::fs::write(&a, "1").unwrap();
        std::fs::write(&b, "2").unwrap();
        let candidates = collect_candidates(None, &[b.clone(), a.clone()]).unwrap();
        let texts: Vec<&str> = candidates.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["2", "1"]);
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = collect_candidates(None, &[PathBuf::from("/nonexistent/out.json")]);
        assert!(matches!(result, Err(CliError::Io { .. })));
    }
}
