//! CLI integration tests for the schema-graph binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("schema-graph"))
}

// Helper to create a temp model file
fn write_temp_file(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

const SHOP: &str = r#"{
    "project_name": "shop",
    "root": {
        "subpackages": [{
            "name": "app",
            "full_name": "app",
            "types": [
                {
                    "kind": "class", "name": "Order", "full_name": "app.Order",
                    "fields": [{ "identifier": "total", "type": { "full_type": "double" } }]
                },
                {
                    "kind": "class", "name": "Customer", "full_name": "app.Customer",
                    "fields": [{
                        "identifier": "orders",
                        "type": { "full_type": "List", "generic_arguments": [{ "full_type": "app.Order" }] }
                    }]
                }
            ]
        }]
    }
}"#;

const CYCLE: &str = r#"{
    "project_name": "loop",
    "root": {
        "types": [
            { "kind": "class", "name": "A", "full_name": "A", "super_class": "B" },
            { "kind": "class", "name": "B", "full_name": "B", "super_class": "A" }
        ]
    }
}"#;

const EXTERNAL_SUPER: &str = r#"{
    "project_name": "shop",
    "root": {
        "types": [{ "kind": "class", "name": "Order", "full_name": "Order", "super_class": "lib.Entity" }]
    }
}"#;

mod generate_command {
    use super::*;

    #[test]
    fn basic_generate() {
        let dir = TempDir::new().unwrap();
        let model = write_temp_file(&dir, "model.json", SHOP);

        cmd()
            .args(["generate", model.to_str().unwrap()])
            .assert()
            .success()
            .stdout(predicate::str::contains(r#""ns_uri":"shop/app""#))
            .stdout(predicate::str::contains(r#""target":"app.Order""#));
    }

    #[test]
    fn generate_with_pretty() {
        let dir = TempDir::new().unwrap();
        let model = write_temp_file(&dir, "model.json", SHOP);

        cmd()
            .args(["generate", model.to_str().unwrap(), "--pretty"])
            .assert()
            .success()
            .stdout(predicate::str::contains("{\n"));
    }

    #[test]
    fn generate_with_output_file() {
        let dir = TempDir::new().unwrap();
        let model = write_temp_file(&dir, "model.json", SHOP);
        let output = dir.path().join("graph.json");

        cmd()
            .args([
                "generate",
                model.to_str().unwrap(),
                "--output",
                output.to_str().unwrap(),
            ])
            .assert()
            .success()
            .stdout(predicate::str::is_empty());

        let content = fs::read_to_string(&output).unwrap();
        let graph: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(graph["declarations"]["app.Order"]["kind"], "class");
    }

    #[test]
    fn generate_with_dummy_class() {
        let dir = TempDir::new().unwrap();
        let model = write_temp_file(&dir, "model.json", SHOP);

        cmd()
            .args([
                "generate",
                model.to_str().unwrap(),
                "--dummy-class",
                "Placeholder",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains(r#""classifiers":["Placeholder"]"#));
    }

    #[test]
    fn generate_with_config_file() {
        let dir = TempDir::new().unwrap();
        let model = write_temp_file(&dir, "model.json", SHOP);
        let config = write_temp_file(&dir, "config.json", r#"{"default_package": "shoproot"}"#);

        cmd()
            .args([
                "generate",
                model.to_str().unwrap(),
                "--config",
                config.to_str().unwrap(),
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains(r#""name":"shoproot""#));
    }

    #[test]
    fn invalid_config_exits_2() {
        let dir = TempDir::new().unwrap();
        let model = write_temp_file(&dir, "model.json", SHOP);
        let config = write_temp_file(&dir, "config.json", r#"{"dummy_class": "yes"}"#);

        cmd()
            .args([
                "generate",
                model.to_str().unwrap(),
                "--config",
                config.to_str().unwrap(),
            ])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("Error loading config"));
    }

    #[test]
    fn inheritance_cycle_exits_2() {
        let dir = TempDir::new().unwrap();
        let model = write_temp_file(&dir, "model.json", CYCLE);

        cmd()
            .args(["generate", model.to_str().unwrap()])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("A -> B -> A"));
    }

    #[test]
    fn invalid_model_exits_1() {
        let dir = TempDir::new().unwrap();
        let model = write_temp_file(&dir, "model.json", r#"{"root": {}}"#);

        cmd()
            .args(["generate", model.to_str().unwrap()])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Invalid model"));
    }

    #[test]
    fn skip_validation_still_rejects_malformed_model() {
        let dir = TempDir::new().unwrap();
        let model = write_temp_file(&dir, "model.json", r#"{"root": {}}"#);

        cmd()
            .args(["generate", model.to_str().unwrap(), "--skip-validation"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("invalid model"));
    }

    #[test]
    fn external_super_type_warns_on_stderr() {
        let dir = TempDir::new().unwrap();
        let model = write_temp_file(&dir, "model.json", EXTERNAL_SUPER);

        cmd()
            .args(["generate", model.to_str().unwrap()])
            .env_remove("RUST_LOG")
            .assert()
            .success()
            .stdout(predicate::str::contains(r#""code":"W001""#))
            .stderr(predicate::str::contains("lib.Entity"));
    }
}

mod validate_command {
    use super::*;

    #[test]
    fn valid_model() {
        let dir = TempDir::new().unwrap();
        let model = write_temp_file(&dir, "model.json", SHOP);

        cmd()
            .args(["validate", model.to_str().unwrap()])
            .assert()
            .success()
            .stdout(predicate::str::contains("Valid"));
    }

    #[test]
    fn invalid_model_lists_paths() {
        let dir = TempDir::new().unwrap();
        let model = write_temp_file(
            &dir,
            "model.json",
            r#"{"project_name": "x", "root": {"types": [{"kind": "struct", "name": "A", "full_name": "A"}]}}"#,
        );

        cmd()
            .args(["validate", model.to_str().unwrap()])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("/root/types/0/kind"));
    }

    #[test]
    fn json_output_valid() {
        let dir = TempDir::new().unwrap();
        let model = write_temp_file(&dir, "model.json", SHOP);

        cmd()
            .args(["validate", model.to_str().unwrap(), "--json"])
            .assert()
            .success()
            .stdout(predicate::str::contains(r#"{"valid":true}"#));
    }

    #[test]
    fn json_output_invalid() {
        let dir = TempDir::new().unwrap();
        let model = write_temp_file(&dir, "model.json", r#"{"root": {}}"#);

        cmd()
            .args(["validate", model.to_str().unwrap(), "--json"])
            .assert()
            .code(1)
            .stdout(predicate::str::contains(r#""valid":false"#));
    }
}

mod check_command {
    use super::*;

    #[test]
    fn clean_model_passes() {
        let dir = TempDir::new().unwrap();
        let model = write_temp_file(&dir, "model.json", SHOP);

        cmd()
            .args(["check", model.to_str().unwrap()])
            .assert()
            .success()
            .stdout(predicate::str::contains("2 types checked, all passed"));
    }

    #[test]
    fn cycle_fails() {
        let dir = TempDir::new().unwrap();
        let model = write_temp_file(&dir, "model.json", CYCLE);

        cmd()
            .args(["check", model.to_str().unwrap()])
            .assert()
            .code(1)
            .stdout(predicate::str::contains("E002"));
    }

    #[test]
    fn warnings_pass_unless_strict() {
        let dir = TempDir::new().unwrap();
        let model = write_temp_file(&dir, "model.json", EXTERNAL_SUPER);

        cmd()
            .args(["check", model.to_str().unwrap()])
            .assert()
            .success()
            .stdout(predicate::str::contains("W001"));

        cmd()
            .args(["check", model.to_str().unwrap(), "--strict"])
            .assert()
            .code(1);
    }

    #[test]
    fn quiet_hides_warnings() {
        let dir = TempDir::new().unwrap();
        let model = write_temp_file(&dir, "model.json", EXTERNAL_SUPER);

        cmd()
            .args(["check", model.to_str().unwrap(), "--quiet"])
            .assert()
            .success()
            .stdout(predicate::str::contains("W001").not());
    }

    #[test]
    fn json_format() {
        let dir = TempDir::new().unwrap();
        let model = write_temp_file(&dir, "model.json", CYCLE);

        let output = cmd()
            .args(["check", model.to_str().unwrap(), "--format", "json"])
            .assert()
            .code(1)
            .get_output()
            .stdout
            .clone();

        let result: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(result["project"], "loop");
        assert!(result["errors"].as_u64().unwrap() >= 1);
        assert_eq!(result["diagnostics"][0]["severity"], "error");
    }
}

mod error_handling {
    use super::*;

    #[test]
    fn missing_model_file_exits_3() {
        cmd()
            .args(["generate", "/nonexistent/model.json"])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("file not found"));
    }

    #[test]
    fn malformed_json_exits_2() {
        let dir = TempDir::new().unwrap();
        let model = write_temp_file(&dir, "model.json", "not json");

        cmd()
            .args(["validate", model.to_str().unwrap()])
            .assert()
            .code(2);
    }

    #[test]
    fn unknown_subcommand() {
        cmd().arg("resolve").assert().failure();
    }
}

mod help_and_version {
    use super::*;

    #[test]
    fn help_lists_commands() {
        cmd()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("generate"))
            .stdout(predicate::str::contains("validate"))
            .stdout(predicate::str::contains("check"));
    }

    #[test]
    fn version() {
        cmd()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("schema-graph"));
    }
}
