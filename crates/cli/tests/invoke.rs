//! End-to-end checks against the built `timeutils` binary.
//!
//! Run with: cargo test -p timeutils-cli --test invoke

use std::io::Write;
use std::process::{Command, Output, Stdio};

use pretty_assertions::assert_eq;

/// A command isolated from the user's config file and environment.
fn timeutils(config_home: &tempfile::TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_timeutils"));
    cmd.env("XDG_CONFIG_HOME", config_home.path())
        .env("HOME", config_home.path())
        .env("NO_COLOR", "1")
        .env_remove("TIMEUTILS_JSON")
        .env_remove("TIMEUTILS_NO_COLOR")
        .env_remove("RUST_LOG");
    cmd
}

fn run(args: &[&str]) -> Output {
    let home = tempfile::tempdir().unwrap();
    timeutils(&home)
        .args(args)
        .output()
        .expect("failed to execute timeutils")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_unix_timestamp() {
    let output = run(&["unix_timestamp", "2024-01-15T10:30:00-08:00"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "1705343400\n");
}

#[test]
fn test_strftime() {
    let output = run(&["strftime", "%A, %B %d, %Y", "2024-01-15T10:30:00Z"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "Monday, January 15, 2024\n");
}

#[test]
fn test_days_difference_negative() {
    let output = run(&[
        "days_difference",
        "2024-01-20T10:30:00Z",
        "2024-01-15T10:30:00Z",
    ]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "-5\n");
}

#[test]
fn test_strftime_format_starting_with_hyphen() {
    let output = run(&["strftime", "-%Y-", "2024-01-15T10:30:00Z"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "-2024-\n");

    let output = run(&["--json", "strftime", "-%d", "2024-01-15T10:30:00Z"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["result"], "-15");
}

#[test]
fn test_rust_log_enables_logging_without_verbose() {
    let home = tempfile::tempdir().unwrap();
    let output = timeutils(&home)
        .env("RUST_LOG", "debug")
        .args(["unix_timestamp", "2024-01-15T10:30:00Z"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(stdout(&output), "1705314600\n");
    assert!(
        stderr(&output).contains("call: dispatching"),
        "stderr: {}",
        stderr(&output)
    );
}

#[test]
fn test_quiet_by_default() {
    let output = run(&["unix_timestamp", "2024-01-15T10:30:00Z"]);
    assert!(output.status.success());
    assert!(stderr(&output).is_empty(), "stderr: {}", stderr(&output));
}

#[test]
fn test_invalid_timestamp_exits_nonzero() {
    let output = run(&["days_difference", "invalid", "2024-01-15T10:30:00Z"]);
    assert!(!output.status.success());
    assert!(stdout(&output).is_empty());
    assert!(
        stderr(&output).contains("Invalid start timestamp: "),
        "stderr: {}",
        stderr(&output)
    );
}

#[test]
fn test_unknown_function_exits_nonzero() {
    let output = run(&["now"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("unknown function: now"));
}

#[test]
fn test_missing_function_exits_nonzero() {
    let output = run(&[]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("No function given"));
}

#[test]
fn test_json_output() {
    let output = run(&["--json", "parse_rfc3339", "2024-01-15T10:30:45Z"]);
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["function"], "parse_rfc3339");
    assert!(value.get("error").is_none());

    let components: serde_json::Value =
        serde_json::from_str(value["result"].as_str().unwrap()).unwrap();
    assert_eq!(components["year"], "2024");
    assert_eq!(components["unix"], "1705314645");
    assert_eq!(components["weekday"], "1");
}

#[test]
fn test_json_error_output() {
    let output = run(&["--json", "strftime", "%Q", "2024-01-15T10:30:00Z"]);
    assert!(!output.status.success());

    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert!(value.get("result").is_none());
    assert!(value["error"]
        .as_str()
        .unwrap()
        .starts_with("Invalid strftime format: "));
}

#[test]
fn test_json_from_env() {
    let home = tempfile::tempdir().unwrap();
    let output = timeutils(&home)
        .env("TIMEUTILS_JSON", "1")
        .args(["unix_timestamp", "1970-01-01T00:00:00Z"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["result"], "0");
}

#[test]
fn test_functions_listing() {
    let output = run(&["--functions"]);
    assert!(output.status.success());

    let text = stdout(&output);
    for signature in [
        "unix_timestamp(timestamp)",
        "strftime(format, timestamp)",
        "days_difference(start_timestamp, end_timestamp)",
        "parse_rfc3339(timestamp)",
    ] {
        assert!(text.contains(signature), "missing {signature} in:\n{text}");
    }
}

#[test]
fn test_functions_schema_json() {
    let output = run(&["--functions", "--json"]);
    assert!(output.status.success());

    let schema: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(schema["provider"]["type_name"], "timeutils");
    assert_eq!(schema["provider"]["version"], env!("CARGO_PKG_VERSION"));

    let names: Vec<&str> = schema["functions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["name"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        ["unix_timestamp", "strftime", "days_difference", "parse_rfc3339"]
    );
    assert_eq!(schema["resources"], serde_json::json!([]));
    assert_eq!(schema["data_sources"], serde_json::json!([]));
}

fn run_batch(input: &str) -> Output {
    let home = tempfile::tempdir().unwrap();
    let mut child = timeutils(&home)
        .arg("--batch")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn timeutils");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

#[test]
fn test_batch_mode() {
    let output = run_batch(concat!(
        r#"{"function":"unix_timestamp","arguments":["2024-01-15T10:30:00Z"]}"#,
        "\n\n",
        r#"{"function":"strftime","arguments":["%Y-%m-%d","2024-01-15T10:30:00Z"]}"#,
        "\n",
    ));
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        concat!(
            r#"{"function":"unix_timestamp","result":"1705314600"}"#,
            "\n",
            r#"{"function":"strftime","result":"2024-01-15"}"#,
            "\n",
        )
    );
}

#[test]
fn test_batch_mode_reports_failures() {
    let output = run_batch(concat!(
        "garbage\n",
        r#"{"function":"unix_timestamp","arguments":["1970-01-01T00:00:01Z"]}"#,
        "\n",
    ));
    assert!(!output.status.success());

    let lines: Vec<serde_json::Value> = stdout(&output)
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0]["error"]
        .as_str()
        .unwrap()
        .starts_with("invalid request: "));
    assert_eq!(lines[1]["result"], "1");
}

#[test]
#[cfg(target_os = "linux")]
fn test_config_file_enables_json() {
    let home = tempfile::tempdir().unwrap();
    let config_dir = home.path().join("timeutils");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(config_dir.join("config.toml"), "json = true\n").unwrap();

    let output = timeutils(&home)
        .args(["unix_timestamp", "1970-01-01T00:01:00Z"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["result"], "60");
}
