//! Tests for the `quotegen init` command

use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::tempdir;

fn quotegen_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_quotegen"))
}

#[test]
fn init_creates_configuration_file() {
    let dir = tempdir().unwrap();
    let expected_file = dir.path().join("crm-migration.json");

    let output = Command::new(quotegen_binary())
        .args(["init", "crm-migration", "-o"])
        .arg(dir.path())
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Created:"), "Should show 'Created:'");
    assert!(stdout.contains("crm-migration.json"), "Should show filename");
    assert!(stdout.contains("3 baselines, Enterprise Solution (10 items)"));

    let content = fs::read_to_string(&expected_file).unwrap();
    let record: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(record["project_name"], "crm-migration");
    assert_eq!(record["selected_architecture"], "enterprise");
    assert_eq!(record["baseline_count"], 3);
    assert_eq!(record["baseline_data"][2]["name"], "Baseline 3");
    assert_eq!(record["rates"]["Project Manager"], 900);
}

#[test]
fn init_refuses_overwrite() {
    let dir = tempdir().unwrap();
    let existing_file = dir.path().join("existing.json");
    fs::write(&existing_file, "{}").unwrap();

    let output = Command::new(quotegen_binary())
        .args(["init", "existing", "-o"])
        .arg(dir.path())
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success(), "Command should fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("already exists"), "Should say file already exists");
    assert_eq!(fs::read_to_string(&existing_file).unwrap(), "{}");
}

#[test]
fn init_sanitizes_filename() {
    let dir = tempdir().unwrap();

    let output = Command::new(quotegen_binary())
        .args(["init", "My Cool Project!", "-o"])
        .arg(dir.path())
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command should succeed");
    assert!(
        dir.path().join("My_Cool_Project_.json").exists(),
        "Filename should be sanitized"
    );
}

#[test]
fn init_default_name() {
    let dir = tempdir().unwrap();

    let output = Command::new(quotegen_binary())
        .args(["init", "-o"])
        .arg(dir.path())
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command should succeed");
    assert!(dir.path().join("my-project.json").exists());
}

#[test]
fn init_toml_with_options() {
    let dir = tempdir().unwrap();

    let output = Command::new(quotegen_binary())
        .args(["init", "lake", "--format", "toml", "--architecture", "data-platform"])
        .args(["--baselines", "5", "-o"])
        .arg(dir.path())
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command should succeed");
    let content = fs::read_to_string(dir.path().join("lake.toml")).unwrap();
    assert!(content.contains("selected_architecture = \"data-platform\""));
    assert!(content.contains("baseline_count = 5"));
}

#[test]
fn init_rejects_unknown_architecture() {
    let dir = tempdir().unwrap();

    let output = Command::new(quotegen_binary())
        .args(["init", "demo", "--architecture", "cobol", "-o"])
        .arg(dir.path())
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown architecture: cobol"));
    assert!(!dir.path().join("demo.json").exists());
}

#[test]
fn init_generated_file_generates() {
    let dir = tempdir().unwrap();

    let output = Command::new(quotegen_binary())
        .args(["init", "demo", "-o"])
        .arg(dir.path())
        .output()
        .expect("Failed to execute command");
    assert!(output.status.success(), "init should succeed");

    let output = Command::new(quotegen_binary())
        .arg("generate")
        .arg(dir.path().join("demo.json"))
        .current_dir(dir.path())
        .output()
        .expect("Failed to execute generate");

    assert!(output.status.success(), "generate should succeed");
    assert!(dir.path().join("Quotation_demo.xlsx").exists());
}
