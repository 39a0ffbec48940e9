use crate::cli::FieldsArgs;
use crate::error::CliError;
use crate::output::{OutputContext, OutputMode};

use super::compile_schema_file;

/// Run the `fields` command: list a schema's top-level fields.
///
/// Unlike the best-effort engine call, a schema that does not compile is an
/// error here so the diagnostics reach the user.
pub fn run(args: FieldsArgs, output: &OutputContext) -> Result<(), CliError> {
    let validator = compile_schema_file(&args.schema)?;
    let fields = validator.top_level_fields();

    match output.mode {
        OutputMode::Json => output.print_json(&serde_json::json!({
            "schema": args.schema.display().to_string(),
            "fields": fields,
        })),
        OutputMode::Human | OutputMode::Plain => {
            if fields.is_empty() {
                output.status("schema root is not an object; no fields");
            }
            for field in &fields {
                println!("{field}");
            }
        }
    }

    Ok(())
}
