//! Integration tests for the lintrc CLI
//!
//! These tests drive the binary end-to-end against profile directories
//! written into temporary folders.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[allow(deprecated)]
fn cli() -> Command {
    let mut cmd = Command::cargo_bin("lintrc").unwrap();
    cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

/// A profile directory with a small extension chain and a cycle
fn create_profiles() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();

    fs::write(
        dir.join("base.json"),
        r#"{
  // shared defaults
  "rules": { "no-var": 0, "quotemark": 0 },
}"#,
    )
    .unwrap();

    fs::write(
        dir.join("backend.json"),
        r#"{
  "extends": "base",
  "parser": "@typescript-eslint/parser",
  "rules": { "no-var": 2 },
  "overrides": [
    { "files": ["*.ts"], "rules": { "ts-only": ["warn", "strict"] } }
  ]
}"#,
    )
    .unwrap();

    fs::write(dir.join("loop-a.yaml"), "extends: loop-b\n").unwrap();
    fs::write(dir.join("loop-b.yaml"), "extends: [loop-a]\n").unwrap();

    temp_dir
}

fn profiles_arg(dir: &Path) -> [String; 3] {
    [
        "--no-builtin".to_string(),
        "--profiles".to_string(),
        dir.display().to_string(),
    ]
}

#[test]
fn test_help_command() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("resolve"))
        .stdout(predicate::str::contains("chain"));
}

#[test]
fn test_rust_log_takes_precedence_over_verbosity() {
    let temp = create_profiles();
    cli()
        .env("RUST_LOG", "lintrc=debug")
        .args(profiles_arg(temp.path()))
        .arg("profiles")
        .assert()
        .success()
        .stderr(predicate::str::contains("Registering profile 'base'"));

    cli()
        .args(profiles_arg(temp.path()))
        .arg("profiles")
        .assert()
        .success()
        .stderr(predicate::str::contains("Registering profile").not());
}

#[test]
fn test_version_command() {
    cli()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(VERSION));
}

#[test]
fn test_profiles_lists_builtins() {
    cli()
        .arg("profiles")
        .assert()
        .success()
        .stdout(predicate::str::contains("backend"))
        .stdout(predicate::str::contains("frontend"))
        .stdout(predicate::str::contains("react-native [root]"));
}

#[test]
fn test_profiles_from_directory() {
    let temp = create_profiles();
    cli()
        .args(profiles_arg(temp.path()))
        .arg("profiles")
        .assert()
        .success()
        .stdout(predicate::str::contains("backend extends base"))
        .stdout(predicate::str::contains("react-native").not());
}

#[test]
fn test_duplicate_profile_id_is_rejected() {
    let temp = create_profiles();
    // backend.json collides with the bundled backend profile
    cli()
        .args(["--profiles", &temp.path().display().to_string(), "profiles"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Profile 'backend' is already registered"));
}

#[test]
fn test_chain_in_merge_order() {
    let temp = create_profiles();
    cli()
        .args(profiles_arg(temp.path()))
        .args(["chain", "backend"])
        .assert()
        .success()
        .stdout(
            predicate::str::is_match(r"(?s)1\. base .*2\. backend \(1 rules, 1 overrides\)")
                .unwrap(),
        );
}

#[test]
fn test_resolve_json_applies_last_writer_wins() {
    let temp = create_profiles();
    let output = cli()
        .args(profiles_arg(temp.path()))
        .args(["resolve", "backend", "src/main.js", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let config: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(config["profile"], "backend");
    assert_eq!(config["chain"], serde_json::json!(["base", "backend"]));
    assert_eq!(config["rules"]["no-var"], "error");
    assert_eq!(config["rules"]["quotemark"], "off");
    assert!(config["rules"].get("ts-only").is_none());
}

#[test]
fn test_resolve_many_paths_respects_overrides() {
    let temp = create_profiles();
    let output = cli()
        .args(profiles_arg(temp.path()))
        .args(["resolve", "backend", "a.ts", "a.js", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let configs: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(configs.len(), 2);
    assert_eq!(configs[0]["file"], "a.ts");
    assert_eq!(configs[0]["rules"]["ts-only"], serde_json::json!(["warn", "strict"]));
    assert_eq!(configs[0]["appliedOverrides"], serde_json::json!(["backend#0"]));
    assert!(configs[1]["rules"].get("ts-only").is_none());
}

#[test]
fn test_resolve_human_output() {
    let temp = create_profiles();
    cli()
        .args(profiles_arg(temp.path()))
        .args(["--no-color", "resolve", "backend", "lib/x.ts"])
        .assert()
        .success()
        .stdout(predicate::str::contains("lib/x.ts (backend)"))
        .stdout(predicate::str::contains("chain:     base → backend"))
        .stdout(predicate::str::contains("error no-var"))
        .stdout(predicate::str::contains("warn  ts-only [\"strict\"]"));
}

#[test]
fn test_resolve_yaml_output() {
    let temp = create_profiles();
    cli()
        .args(profiles_arg(temp.path()))
        .args(["resolve", "backend", "a.js", "-f", "yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("profile: backend"))
        .stdout(predicate::str::contains("no-var: error"));
}

#[test]
fn test_resolve_unknown_profile_fails() {
    let temp = create_profiles();
    cli()
        .args(profiles_arg(temp.path()))
        .args(["resolve", "missing", "a.ts"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Profile not found: 'missing'"));
}

#[test]
fn test_resolve_cycle_fails() {
    let temp = create_profiles();
    cli()
        .args(profiles_arg(temp.path()))
        .args(["resolve", "loop-a", "a.ts"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cyclic extension detected"));
}

#[test]
fn test_builtin_profile_needs_its_bases() {
    cli()
        .args(["resolve", "backend", "src/index.ts"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("'eslint:recommended'"));
}

#[test]
fn test_check_reports_rule_issues() {
    let temp = create_profiles();
    let catalog_dir = TempDir::new().unwrap();
    let catalog = catalog_dir.path().join("catalog.yaml");
    fs::write(&catalog, "core:\n  rules: [no-var, quotemark]\nplugins: {}\n").unwrap();

    cli()
        .args(profiles_arg(temp.path()))
        .args(["--plugins", &catalog.display().to_string()])
        .args(["check", "backend", "a.ts"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("rule 'ts-only' is not defined"))
        .stderr(predicate::str::contains("Found 1 rule issue(s)"));

    cli()
        .args(profiles_arg(temp.path()))
        .args(["--plugins", &catalog.display().to_string()])
        .args(["check", "backend", "a.js"])
        .assert()
        .success();
}

#[test]
fn test_check_requires_catalog() {
    let temp = create_profiles();
    cli()
        .args(profiles_arg(temp.path()))
        .args(["check", "backend", "a.ts"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--plugins"));
}

#[test]
fn test_config_validate() {
    let temp = TempDir::new().unwrap();
    let good = temp.path().join(".lintrc.json");
    fs::write(&good, r#"{ "rules": { "eqeqeq": "error" } }"#).unwrap();
    let bad_glob = temp.path().join("bad.yaml");
    fs::write(&bad_glob, "overrides:\n  - files: ['[oops']\n    rules: { a: 1 }\n").unwrap();
    let bad_json = temp.path().join("broken.json");
    fs::write(&bad_json, r#"{ "rules": { "eqeqeq": "loud" } }"#).unwrap();

    cli()
        .args(["config", "validate", &good.display().to_string()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"));

    cli()
        .current_dir(temp.path())
        .args(["config", "validate"])
        .assert()
        .success();

    cli()
        .args(["config", "validate", &bad_glob.display().to_string()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid glob pattern '[oops'"));

    cli()
        .args(["config", "validate", &bad_json.display().to_string()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse"));
}

#[test]
fn test_config_show_resolved_cascade() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    fs::create_dir_all(root.join("packages/app/src")).unwrap();
    fs::write(
        root.join(".lintrc.yaml"),
        "root: true\nrules:\n  eqeqeq: error\n  no-var: error\n",
    )
    .unwrap();
    fs::write(
        root.join("packages/app/.lintrc.json"),
        r#"{
  "rules": { "no-var": "off" },
  "overrides": [{ "files": ["src/*.ts"], "rules": { "app-src": 2 } }]
}"#,
    )
    .unwrap();

    let output = cli()
        .current_dir(root)
        .args(["--no-builtin", "config", "show", "--resolved", "packages/app/src/main.ts"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let config: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(config["file"], "packages/app/src/main.ts");
    assert_eq!(config["rules"]["eqeqeq"], "error");
    assert_eq!(config["rules"]["no-var"], "off");
    assert_eq!(config["chain"].as_array().unwrap().len(), 2);
    assert_eq!(config["rules"]["app-src"], "error");
    assert_eq!(config["appliedOverrides"].as_array().unwrap().len(), 1);
}

#[test]
fn test_config_show_file() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("strict.toml");
    fs::write(&file, "[rules]\neqeqeq = \"error\"\n").unwrap();

    cli()
        .args(["config", "show", &file.display().to_string()])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"id\": \"strict\""))
        .stdout(predicate::str::contains("\"eqeqeq\": \"error\""));
}

#[test]
fn test_schema_command() {
    cli()
        .arg("schema")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"title\": \"lintrc profile\""));
}

#[test]
fn test_generate_completion() {
    cli()
        .args(["--generate-completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("lintrc"));
}
