use std::path::PathBuf;

use crate::cli::CheckArgs;
use crate::config::CliConfig;
use crate::diagnostic::render_diagnostics;
use crate::error::CliError;
use crate::output::{OutputContext, OutputMode};

use super::{discover_schema_files, read_file};

/// Run the `check` command: compile schema files and render diagnostics.
pub fn run(args: CheckArgs, config: &CliConfig, output: &OutputContext) -> Result<(), CliError> {
    let paths = if args.paths.is_empty() {
        vec![PathBuf::from(&config.cli.default_schema_dir)]
    } else {
        args.paths
    };
    let files = discover_schema_files(&paths, &config.cli.schema_extension)?;

    let mut total_errors = 0usize;
    let mut failed_files = 0usize;
    let mut file_results: Vec<serde_json::Value> = Vec::new();

    for file in &files {
        let source_text = read_file(file)?;
        let filename = file.display().to_string();

        match prompt_forge_dsl::try_compile(&source_text) {
            Ok(validator) => {
                let canonical = prompt_forge_dsl::print(validator.root());
                let fields = validator.top_level_fields();

                match output.mode {
                    OutputMode::Human => {
                        output.status(&format!("  {filename} .... ok"));
                        if args.print {
                            println!("{canonical}");
                        }
                        if args.fields {
                            for field in &fields {
                                println!("{field}");
                            }
                        }
                    }
                    OutputMode::Json => {
                        let mut entry = serde_json::json!({
                            "file": filename,
                            "valid": true,
                            "errors": [],
                        });
                        if args.print {
                            entry["canonical"] = serde_json::Value::String(canonical);
                        }
                        if args.fields {
                            entry["fields"] = serde_json::json!(fields);
                        }
                        file_results.push(entry);
                    }
                    OutputMode::Plain => {
                        println!("{filename}\tok\t{}", fields.join(","));
                        if args.print {
                            println!("{canonical}");
                        }
                    }
                }
            }
            Err(errors) => {
                failed_files += 1;
                total_errors += errors.len();

                match output.mode {
                    OutputMode::Human => {
                        let reports = render_diagnostics(&errors, &source_text, &filename);
                        for report in &reports {
                            eprintln!("{report:?}");
                        }
                    }
                    OutputMode::Json => {
                        let error_list: Vec<serde_json::Value> = errors
                            .iter()
                            .map(|e| serde_json::json!({ "message": e.to_string() }))
                            .collect();
                        file_results.push(serde_json::json!({
                            "file": filename,
                            "valid": false,
                            "errors": error_list,
                        }));
                    }
                    OutputMode::Plain => {
                        for err in &errors {
                            eprintln!("{filename}\terror\t{err}");
                        }
                    }
                }
            }
        }
    }

    match output.mode {
        OutputMode::Human => {
            let summary = format!(
                "{} of {} schema files compiled, {total_errors} errors",
                files.len() - failed_files,
                files.len()
            );
            if failed_files > 0 {
                output.warn(&summary);
            } else {
                output.success(&summary);
            }
        }
        OutputMode::Json => {
            output.print_json(&serde_json::json!({
                "files": files.len(),
                "failed": failed_files,
                "errors": total_errors,
                "results": file_results,
            }));
        }
        OutputMode::Plain => {
            println!("{}\t{failed_files}\t{total_errors}", files.len());
        }
    }

    if failed_files > 0 {
        Err(CliError::Parse {
            errors: vec![], // individual errors already rendered
            source_text: String::new(),
            file: PathBuf::from("(multiple)"),
        })
    } else {
        Ok(())
    }
}
