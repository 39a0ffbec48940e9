use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// The prompt-forge binary, isolated from any user or project config.
#[allow(deprecated)]
fn prompt_forge(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("prompt-forge").unwrap();
    cmd.current_dir(dir)
        .env_remove("PROMPT_FORGE_CONFIG")
        .env_remove("RUST_LOG")
        .env("XDG_CONFIG_HOME", dir.join(".xdg"))
        .env("HOME", dir)
        .env("NO_COLOR", "1");
    cmd
}

fn workspace() -> TempDir {
    tempfile::tempdir().unwrap()
}

fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

const RESULT_SCHEMA: &str = "z.object({\n  result: z.string(),\n})\n";

// ---------------------------------------------------------------------------
// Help and version
// ---------------------------------------------------------------------------

#[test]
fn help_exits_zero() {
    let dir = workspace();
    prompt_forge(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Prompt assembly"));
}

#[test]
fn version_exits_zero() {
    let dir = workspace();
    prompt_forge(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("prompt-forge"));
}

#[test]
fn unknown_subcommand_is_usage_error() {
    let dir = workspace();
    prompt_forge(dir.path()).arg("frobnicate").assert().code(2);
}

// ---------------------------------------------------------------------------
// check
// ---------------------------------------------------------------------------

#[test]
fn check_valid_schema_directory() {
    let dir = workspace();
    write(&dir, "schemas/result.schema", RESULT_SCHEMA);
    write(&dir, "schemas/nested/list.schema", "array(number().int())");

    prompt_forge(dir.path())
        .arg("check")
        .assert()
        .success()
        .stderr(predicate::str::contains("2 of 2 schema files compiled"));
}

#[test]
fn check_prints_canonical_form_and_fields() {
    let dir = workspace();
    let path = write(
        &dir,
        "r.schema",
        "z.object({ title: z.string().min(1), tags: z.array(z.string()).optional() })",
    );

    prompt_forge(dir.path())
        .args(["check", "--print", "--fields"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("title: string().min(1),"))
        .stdout(predicate::str::contains("tags: array(string()).optional(),"))
        .stdout(predicate::str::contains("z.").not());
}

#[test]
fn check_invalid_schema_exits_three_with_diagnostic() {
    let dir = workspace();
    let path = write(&dir, "bad.schema", "object({ a: boolean().min(1) })");

    prompt_forge(dir.path())
        .arg("check")
        .arg(&path)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("min"));
}

#[test]
fn check_json_reports_each_file() {
    let dir = workspace();
    write(&dir, "schemas/ok.schema", "string()");
    write(&dir, "schemas/bad.schema", "string(");

    let out = prompt_forge(dir.path())
        .args(["--format", "json", "check"])
        .assert()
        .code(3)
        .get_output()
        .stdout
        .clone();
    let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(json["files"], 2);
    assert_eq!(json["failed"], 1);
    assert_eq!(json["results"].as_array().unwrap().len(), 2);
}

#[test]
fn check_missing_directory_is_usage_error() {
    let dir = workspace();
    prompt_forge(dir.path())
        .arg("check")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("no schema files found"));
}

#[test]
fn check_uses_configured_extension() {
    let dir = workspace();
    write(&dir, "config.toml", "[cli]\nschema_extension = \"zod\"\n");
    write(&dir, "schemas/result.zod", RESULT_SCHEMA);

    prompt_forge(dir.path())
        .arg("check")
        .assert()
        .success()
        .stderr(predicate::str::contains("1 of 1 schema files compiled"));
}

// ---------------------------------------------------------------------------
// validate
// ---------------------------------------------------------------------------

#[test]
fn validate_inline_value_passes() {
    let dir = workspace();
    let schema = write(&dir, "r.schema", RESULT_SCHEMA);

    prompt_forge(dir.path())
        .args(["validate", "--schema"])
        .arg(&schema)
        .args(["--value", r#"{"result":"ok"}"#])
        .assert()
        .success()
        .stdout(predicate::str::contains("valid"));
}

#[test]
fn validate_reports_missing_field_and_exits_four() {
    let dir = workspace();
    let schema = write(&dir, "r.schema", RESULT_SCHEMA);

    prompt_forge(dir.path())
        .args(["validate", "--schema"])
        .arg(&schema)
        .args(["--value", r#"{"other":"ok"}"#])
        .assert()
        .code(4)
        .stdout(predicate::str::contains("result: Required"));
}

#[test]
fn validate_reports_invalid_json() {
    let dir = workspace();
    let schema = write(&dir, "r.schema", RESULT_SCHEMA);

    prompt_forge(dir.path())
        .args(["validate", "-s"])
        .arg(&schema)
        .args(["--value", "{not json"])
        .assert()
        .code(4)
        .stdout(predicate::str::contains("Invalid JSON"));
}

#[test]
fn validate_files_json_output() {
    let dir = workspace();
    let schema = write(&dir, "r.schema", RESULT_SCHEMA);
    let good = write(&dir, "good.json", r#"{"result":"yes"}"#);
    let bad = write(&dir, "bad.json", r#"{"result":1}"#);

    let out = prompt_forge(dir.path())
        .args(["--format", "json", "validate", "--schema"])
        .arg(&schema)
        .arg(&good)
        .arg(&bad)
        .assert()
        .code(4)
        .get_output()
        .stdout
        .clone();
    let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
    let results = json["results"].as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["valid"], true);
    assert_eq!(results[1]["valid"], false);
    assert_eq!(
        results[1]["error"],
        "result: Expected string, received number"
    );
}

#[test]
fn validate_reads_stdin() {
    let dir = workspace();
    let schema = write(&dir, "r.schema", "array(string())");

    prompt_forge(dir.path())
        .args(["--format", "plain", "validate", "--schema"])
        .arg(&schema)
        .write_stdin(r#"["a","b"]"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("<stdin>\tvalid"));
}

#[test]
fn validate_with_broken_schema_exits_three() {
    let dir = workspace();
    let schema = write(&dir, "r.schema", "object({");

    prompt_forge(dir.path())
        .args(["validate", "--schema"])
        .arg(&schema)
        .args(["--value", "{}"])
        .assert()
        .code(3);
}

// ---------------------------------------------------------------------------
// fields
// ---------------------------------------------------------------------------

#[test]
fn fields_lists_top_level_fields_in_order() {
    let dir = workspace();
    let schema = write(
        &dir,
        "r.schema",
        "object({ zeta: string(), alpha: number(), mid: boolean() }).optional()",
    );

    prompt_forge(dir.path())
        .arg("fields")
        .arg(&schema)
        .assert()
        .success()
        .stdout("zeta\nalpha\nmid\n");
}

#[test]
fn fields_of_non_object_is_empty() {
    let dir = workspace();
    let schema = write(&dir, "r.schema", "array(string())");

    prompt_forge(dir.path())
        .args(["--format", "json", "fields"])
        .arg(&schema)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"fields\": []"));
}

// ---------------------------------------------------------------------------
// assemble
// ---------------------------------------------------------------------------

const PROMPT: &str = r#"
agent_role = "  Role  "
schema = "string()"
instructions = "Do it"

[[examples]]
input = "a<b"
output = '"ok"'

[inputs]
input = "x & y"
"#;

#[test]
fn assemble_renders_canonical_prompt() {
    let dir = workspace();
    let prompt = write(&dir, "prompt.toml", PROMPT);

    let expected = "<agent_role>\nRole\n</agent_role>\n\n\
<schema_of_expected_result>\nstring()\n</schema_of_expected_result>\n\n\
<examples>\n  <example>\n    <user_input>a&lt;b</user_input>\n    <expected_output>&quot;ok&quot;</expected_output>\n  </example>\n</examples>\n\n\
<instructions>\nDo it\n</instructions>\n\n\
<user_input>\n  <input>x &amp; y</input>\n</user_input>\n";

    prompt_forge(dir.path())
        .arg("assemble")
        .arg(&prompt)
        .assert()
        .success()
        .stdout(expected);
}

#[test]
fn assemble_cli_inputs_override_file_inputs() {
    let dir = workspace();
    let prompt = write(&dir, "prompt.toml", PROMPT);

    prompt_forge(dir.path())
        .arg("assemble")
        .arg(&prompt)
        .args(["-i", "replaced", "--input", "topic=rust"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "  <input>replaced</input>\n  <topic>rust</topic>",
        ));
}

#[test]
fn assemble_warns_about_invalid_examples_without_failing() {
    let dir = workspace();
    let prompt = write(
        &dir,
        "prompt.toml",
        r#"
schema = "object({ result: string() })"

[[examples]]
id = "ex-1"
input = "q"
output = '{"wrong": true}'
"#,
    );

    prompt_forge(dir.path())
        .arg("assemble")
        .arg(&prompt)
        .assert()
        .success()
        .stderr(predicate::str::contains("example 1 (ex-1)"))
        .stderr(predicate::str::contains("result: Required"));
}

#[test]
fn assemble_no_check_examples_skips_warnings() {
    let dir = workspace();
    let prompt = write(
        &dir,
        "prompt.toml",
        "schema = \"string()\"\n[[examples]]\ninput = \"q\"\noutput = \"42\"\n",
    );

    prompt_forge(dir.path())
        .arg("assemble")
        .arg(&prompt)
        .arg("--no-check-examples")
        .assert()
        .success()
        .stderr(predicate::str::contains("warning").not());
}

#[test]
fn assemble_writes_output_file() {
    let dir = workspace();
    let prompt = write(&dir, "prompt.json", r#"{"instructions":"Only this"}"#);
    let out = dir.path().join("out.txt");

    prompt_forge(dir.path())
        .arg("assemble")
        .arg(&prompt)
        .arg("-o")
        .arg(&out)
        .assert()
        .success();

    let written = fs::read_to_string(&out).unwrap();
    assert_eq!(written, "<instructions>\nOnly this\n</instructions>");
}

#[test]
fn assemble_malformed_prompt_file_is_usage_error() {
    let dir = workspace();
    let prompt = write(&dir, "prompt.toml", "schema = [");

    prompt_forge(dir.path())
        .arg("assemble")
        .arg(&prompt)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid prompt file"));
}

// ---------------------------------------------------------------------------
// init
// ---------------------------------------------------------------------------

#[test]
fn init_scaffolds_workspace_that_checks_and_assembles() {
    let dir = workspace();
    prompt_forge(dir.path())
        .args(["init", "demo"])
        .assert()
        .success();

    let project = dir.path().join("demo");
    assert!(project.join("config.toml").exists());
    assert!(project.join("schemas/result.schema").exists());
    assert!(project.join("prompts/example.toml").exists());

    prompt_forge(&project).arg("check").assert().success();
    prompt_forge(&project)
        .args(["assemble", "prompts/example.toml", "-i", "What is Rust?"])
        .assert()
        .success()
        .stdout(predicate::str::contains("<input>What is Rust?</input>"))
        .stderr(predicate::str::contains("does not match").not());
}

#[test]
fn init_existing_directory_without_force_fails() {
    let dir = workspace();
    fs::create_dir(dir.path().join("demo")).unwrap();

    prompt_forge(dir.path())
        .args(["init", "demo"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn init_existing_directory_with_force_succeeds() {
    let dir = workspace();
    fs::create_dir(dir.path().join("demo")).unwrap();

    prompt_forge(dir.path())
        .args(["init", "demo", "--force"])
        .assert()
        .success();
    assert!(dir.path().join("demo/schemas/result.schema").exists());
}

// ---------------------------------------------------------------------------
// completions and global flags
// ---------------------------------------------------------------------------

#[test]
fn completions_bash() {
    let dir = workspace();
    prompt_forge(dir.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("prompt-forge"));
}

#[test]
fn malformed_config_is_usage_error() {
    let dir = workspace();
    write(&dir, "config.toml", "[cli\n");

    prompt_forge(dir.path())
        .args(["completions", "bash"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("configuration error"));
}

#[test]
fn quiet_suppresses_success_message() {
    let dir = workspace();
    write(&dir, "schemas/result.schema", RESULT_SCHEMA);

    prompt_forge(dir.path())
        .args(["-q", "check"])
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}
