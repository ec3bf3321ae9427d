//! Shared helpers for `cmdroute` CLI tests.

#![allow(unreachable_pub)]

use std::fs;
use std::process::Command;

use assert_cmd::cargo;

/// A small registry: one explicit root with a group and subcommand, and a
/// default root with one disabled subcommand. `cmd1 --opt9` is obsolete.
#[allow(dead_code)]
pub const REGISTRY: &str = r#"{
  // identifiers are case-sensitive
  "text": "ordinal",
  "default_root": "default",
  "commands": [
    { "id": "root1", "name": "first", "type": "root" },
    { "id": "grp1", "name": "grp1", "type": "group", "owners": ["root1"] },
    {
      "id": "cmd1",
      "name": "command one",
      "type": "subcommand",
      "owners": ["grp1"],
      "options": [
        { "id": "opt1", "data_type": "integer" },
        { "id": "opt7", "alias": "o7", "data_type": "boolean" },
        { "id": "opt9", "data_type": "string", "obsolete": true },
      ],
      "arguments": [{ "id": "arg1" }],
    },
    { "id": "default", "name": "default", "type": "root" },
    {
      "id": "cmd_d1",
      "name": "cmd_d1",
      "type": "subcommand",
      "owners": ["default"],
      "flags": ["disabled"],
    },
    { "id": "cmd_nr1", "name": "cmd_nr1", "type": "subcommand" },
  ],
}"#;

pub fn cmdroute() -> Command {
    Command::new(cargo::cargo_bin!("cmdroute"))
}

/// Write `content` to `name` inside a fresh temp dir.
#[allow(dead_code)]
pub fn write_temp(name: &str, content: &str) -> (tempfile::TempDir, String) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join(name);
    fs::write(&path, content).expect("write temp file");
    (dir, path.to_string_lossy().to_string())
}

/// Parse stdout as a single JSON document.
#[allow(dead_code)]
pub fn stdout_json(output: &std::process::Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).unwrap_or_else(|e| panic!("invalid json ({e}): {stdout}"))
}
