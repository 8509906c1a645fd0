//! Tests for the `quotegen generate`, `preview` and `catalog` commands

use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::tempdir;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn quotegen_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_quotegen"))
}

#[test]
fn generate_writes_default_output_name() {
    let dir = tempdir().unwrap();

    let output = Command::new(quotegen_binary())
        .arg("generate")
        .arg(fixtures_dir().join("valid.json"))
        .current_dir(dir.path())
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Generated: Quotation_CRM_Migration.xlsx"));
    assert!(stdout.contains("Fast Track: 3 quarters, 160 days, €96000 + 25% = €120000"));

    let bytes = fs::read(dir.path().join("Quotation_CRM_Migration.xlsx")).unwrap();
    assert_eq!(&bytes[0..2], b"PK");

    // Cost-model notes are info, never errors
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("info[I002]"));
    assert!(!stderr.contains("error["));
}

#[test]
fn generate_to_explicit_path_with_options() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("offer.xlsx");

    let output = Command::new(quotegen_binary())
        .arg("generate")
        .arg(fixtures_dir().join("valid.toml"))
        .arg("-o")
        .arg(&target)
        .args(["--currency", "$", "--date", "2026-03-01", "--validity", "60"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command should succeed");
    assert!(target.exists());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Baseline 2: 8 quarters, 160 days, $96000"));
}

#[test]
fn generate_json_report() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("offer.xlsx");

    let output = Command::new(quotegen_binary())
        .arg("generate")
        .arg(fixtures_dir().join("valid.json"))
        .arg("-o")
        .arg(&target)
        .args(["--format", "json"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command should succeed");
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["project"], "CRM Migration");
    assert_eq!(
        report["sheets"],
        serde_json::json!([
            "Dashboard",
            "Configuration",
            "Standard",
            "Fast Track",
            "Extended",
            "Quotation",
            "Charts"
        ])
    );
    let first = &report["baselines"][0];
    assert_eq!(first["effort_days"], 120);
    assert_eq!(first["cost"], 72000);
    assert_eq!(first["margin_percent"], 20);
    assert_eq!(first["final_price"], "86400");

    let diagnostics = report["diagnostics"].as_array().unwrap();
    assert_eq!(diagnostics.len(), 3);
    assert!(diagnostics.iter().all(|d| d["code"] == "I002"));
}

#[test]
fn generate_without_project_name_fails() {
    let dir = tempdir().unwrap();

    let output = Command::new(quotegen_binary())
        .arg("generate")
        .arg(fixtures_dir().join("unnamed.json"))
        .current_dir(dir.path())
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Project name is required"));
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0, "nothing written");
}

#[test]
fn generate_rejects_unknown_extension() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("quote.yaml");
    fs::write(&config, "project_name: x").unwrap();

    let output = Command::new(quotegen_binary())
        .arg("generate")
        .arg(&config)
        .current_dir(dir.path())
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unsupported configuration format"));
}

#[test]
fn preview_prints_configuration() {
    let output = Command::new(quotegen_binary())
        .arg("preview")
        .arg(fixtures_dir().join("valid.json"))
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("PROJECT CONFIGURATION PREVIEW"));
    assert!(stdout.contains("Client:      ACME"));
    assert!(stdout.contains("Risk:        Very High"));
    assert!(stdout.contains("Web Application"));
    assert!(stdout.contains("  8. Project Management"));
    assert!(stdout.contains("  QA Tester: €500/day"));
}

#[test]
fn preview_reports_repairs() {
    let output = Command::new(quotegen_binary())
        .arg("preview")
        .arg(fixtures_dir().join("repaired.json"))
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "warnings do not fail preview");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("BASELINES: 5"));
    assert!(stdout.contains("Enterprise Solution"));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("warning[W003]: unknown architecture 'cobol'"));
}

#[test]
fn catalog_lists_templates_in_order() {
    let output = Command::new(quotegen_binary())
        .args(["catalog", "--items"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let positions: Vec<usize> = ["web-app", "mobile-app", "enterprise", "data-platform"]
        .iter()
        .map(|key| stdout.find(key).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
    assert!(stdout.contains("Enterprise Solution - 10 items (default)"));
    assert!(stdout.contains("App Store Deployment"));
}
