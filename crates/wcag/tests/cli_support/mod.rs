#![allow(dead_code)]

use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

pub fn wcag_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_wcag"))
}

pub fn run_cli(home: &Path, args: &[&str]) -> Output {
    let mut cmd = Command::new(wcag_bin());
    cmd.args(args)
        .env("WCAG_CHECKLIST_HOME", home)
        .env("RUST_LOG", "error")
        .env_remove("WCAG_CHECKLIST");
    cmd.output().expect("failed to execute wcag CLI")
}

pub fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn parse_json_output(output: &Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let json_start = stdout.find(|c| c == '{' || c == '[').unwrap_or_else(|| {
        panic!(
            "no JSON payload found in output\nstdout:\n{}\nstderr:\n{}",
            stdout,
            String::from_utf8_lossy(&output.stderr)
        )
    });
    let mut deserializer = serde_json::Deserializer::from_str(&stdout[json_start..]);
    serde_json::Value::deserialize(&mut deserializer).unwrap_or_else(|err| {
        panic!(
            "failed to parse JSON output: {}\nstdout:\n{}\nstderr:\n{}",
            err,
            stdout,
            String::from_utf8_lossy(&output.stderr)
        )
    })
}

pub fn run_cli_ok(home: &Path, args: &[&str]) -> String {
    let output = run_cli(home, args);
    assert!(
        output.status.success(),
        "command failed: {}\nstdout:\n{}\nstderr:\n{}",
        args.join(" "),
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    stdout_of(&output)
}

pub fn run_cli_json<T: DeserializeOwned>(home: &Path, args: &[&str]) -> T {
    let output = run_cli(home, args);
    assert!(
        output.status.success(),
        "command failed: {}\nstdout:\n{}\nstderr:\n{}",
        args.join(" "),
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_value(parse_json_output(&output)).unwrap_or_else(|err| {
        panic!(
            "failed to deserialize JSON output: {}\nstdout:\n{}",
            err,
            String::from_utf8_lossy(&output.stdout)
        )
    })
}

pub fn run_cli_json_error(home: &Path, args: &[&str]) -> serde_json::Value {
    let output = run_cli(home, args);
    assert!(
        !output.status.success(),
        "command unexpectedly succeeded: {}\nstdout:\n{}",
        args.join(" "),
        String::from_utf8_lossy(&output.stdout)
    );
    parse_json_output(&output)
}
