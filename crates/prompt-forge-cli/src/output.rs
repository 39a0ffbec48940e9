use std::path::Path;

use console::Term;
use prompt_forge_core::types::ValidationResult;
use prompt_forge_dsl::ExampleCheck;
use serde_json::{json, Value};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Output format mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
    Plain,
}

/// Where results go and how they look, derived from the global flags.
///
/// Command payloads (validation verdicts, assembled prompts) go to stdout.
/// Status lines, warnings and errors go to stderr.
pub struct OutputContext {
    pub mode: OutputMode,
    pub verbose: u8,
    pub quiet: bool,
    pub use_color: bool,
}

impl OutputContext {
    pub fn from_global(global: &GlobalOpts) -> Self {
        let mode = match global.format.as_str() {
            "json" => OutputMode::Json,
            "plain" => OutputMode::Plain,
            _ => OutputMode::Human,
        };

        let use_color = !global.no_color
            && std::env::var("TERM").map_or(true, |t| t != "dumb")
            && Term::stderr().is_term();

        Self {
            mode,
            verbose: global.verbose,
            quiet: global.quiet,
            use_color,
        }
    }

    pub fn success(&self, msg: &str) {
        if self.quiet || self.mode != OutputMode::Human {
            return;
        }
        eprintln!("{} {msg}", self.paint("ok", console::Style::new().green().bold()));
    }

    pub fn warn(&self, msg: &str) {
        if self.quiet {
            return;
        }
        match self.mode {
            OutputMode::Human => {
                let tag = self.paint("warning:", console::Style::new().yellow().bold());
                eprintln!("{tag} {msg}");
            }
            OutputMode::Json => eprintln!("{}", json!({ "warning": msg })),
            OutputMode::Plain => eprintln!("warning\t{msg}"),
        }
    }

    pub fn print_error(&self, err: &CliError) {
        match self.mode {
            OutputMode::Human => {
                let tag = self.paint("error:", console::Style::new().red().bold());
                eprintln!("{tag} {err}");
            }
            OutputMode::Json => eprintln!("{}", err.to_json()),
            OutputMode::Plain => eprintln!("error\t{err}"),
        }
    }

    /// Pretty-printed JSON on stdout.
    pub fn print_json(&self, value: &Value) {
        if let Ok(s) = serde_json::to_string_pretty(value) {
            println!("{s}");
        }
    }

    /// Stderr line for human mode; silent under `-q`.
    pub fn status(&self, msg: &str) {
        if self.quiet || self.mode != OutputMode::Human {
            return;
        }
        eprintln!("{msg}");
    }

    /// Print one verdict per validated source, or a single JSON report.
    pub fn validation_report(&self, schema: &Path, results: &[(String, ValidationResult)]) {
        if self.mode == OutputMode::Json {
            self.print_json(&validation_json(schema, results));
            return;
        }
        for (label, result) in results {
            println!("{}", self.verdict_line(label, result));
        }
    }

    fn verdict_line(&self, label: &str, result: &ValidationResult) -> String {
        let error = result.error.as_deref();
        match self.mode {
            OutputMode::Plain => {
                let verdict = if result.valid { "valid" } else { "invalid" };
                format!("{label}\t{verdict}\t{}", error.unwrap_or_default())
            }
            _ => match error {
                None => format!("{label} .... valid"),
                Some(error) => format!("{label} .... invalid: {error}"),
            },
        }
    }

    /// Warn about every example whose output misses the schema. Matching
    /// examples are listed only with `-v`.
    pub fn example_checks(&self, checks: &[ExampleCheck]) {
        for (index, check) in checks.iter().enumerate() {
            match &check.result.error {
                Some(error) => self.warn(&example_mismatch(index, check, error)),
                None if self.verbose > 0 => self.status(&format!(
                    "  example {} {}",
                    index + 1,
                    self.paint("matches the schema", console::Style::new().dim())
                )),
                None => {}
            }
        }
    }

    fn paint(&self, text: &str, style: console::Style) -> String {
        if self.use_color {
            style.apply_to(text).to_string()
        } else {
            text.to_string()
        }
    }
}

/// `{"schema": .., "results": [{source, valid, error}]}`
pub fn validation_json(schema: &Path, results: &[(String, ValidationResult)]) -> Value {
    let list: Vec<Value> = results
        .iter()
        .map(|(label, result)| {
            json!({
                "source": label,
                "valid": result.valid,
                "error": result.error,
            })
        })
        .collect();
    json!({
        "schema": schema.display().to_string(),
        "results": list,
    })
}

/// `[{id, valid, error}]`, one entry per checked example.
pub fn example_checks_json(checks: &[ExampleCheck]) -> Value {
    checks
        .iter()
        .map(|c| {
            json!({
                "id": c.id.as_str(),
                "valid": c.result.valid,
                "error": c.result.error,
            })
        })
        .collect()
}

fn example_mismatch(index: usize, check: &ExampleCheck, error: &str) -> String {
    format!(
        "example {} ({}) does not match the schema: {error}",
        index + 1,
        check.id
    )
}
