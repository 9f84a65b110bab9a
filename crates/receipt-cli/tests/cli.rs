//! End-to-end tests for the `receipt` binary using text input.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const WALMART: &str = "Walmart\n03/15/2023\nMilk $3.99\nBread $2.50\nTotal: $6.49\n";

fn receipt(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("receipt").unwrap();
    // Keep tests away from any real user configuration.
    cmd.env("XDG_CONFIG_HOME", config_dir.path())
        .env("HOME", config_dir.path())
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn scan_text_file_as_json() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("walmart.txt");
    fs::write(&input, WALMART).unwrap();

    let output = receipt(&dir).arg("scan").arg(&input).output().unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["store"], "Walmart");
    assert_eq!(json["date"], "03/15/2023");
    assert_eq!(json["total"], 6.49);
    assert_eq!(json["items"].as_array().unwrap().len(), 3);
    assert_eq!(json["items"][0]["name"], "Milk");
    assert_eq!(json["items"][1]["price"], 2.5);
    assert_eq!(json["items"][2]["name"], "Total:");
}

#[test]
fn scan_text_file_with_byte_order_mark() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("bom.txt");
    fs::write(&input, format!("\u{feff}{}", WALMART)).unwrap();

    let output = receipt(&dir).arg("scan").arg(&input).output().unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["store"], "Walmart");
}

#[test]
fn scan_stdin_as_text_report() {
    let dir = TempDir::new().unwrap();

    receipt(&dir)
        .args(["scan", "-", "--format", "text"])
        .write_stdin(WALMART)
        .assert()
        .success()
        .stdout(predicate::str::contains("Store: Walmart"))
        .stdout(predicate::str::contains("  Bread: $2.50"))
        .stdout(predicate::str::contains("Total: $6.49"))
        .stdout(predicate::str::contains("=== RAW OCR TEXT ==="));
}

#[test]
fn scan_text_report_without_raw() {
    let dir = TempDir::new().unwrap();

    receipt(&dir)
        .args(["scan", "-", "-f", "text", "--no-raw"])
        .write_stdin("Cafe\nTea $1.20\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Tea: $1.20"))
        .stdout(predicate::str::contains("RAW OCR TEXT").not());
}

#[test]
fn scan_reports_missing_fields() {
    let dir = TempDir::new().unwrap();

    receipt(&dir)
        .args(["scan", "-", "--show-missing"])
        .write_stdin("THANK YOU\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Not found: date, items, total"));
}

#[test]
fn scan_writes_csv_to_file() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("r.txt");
    let output = dir.path().join("r.csv");
    fs::write(&input, WALMART).unwrap();

    receipt(&dir)
        .arg("scan")
        .arg(&input)
        .args(["--format", "csv", "--output"])
        .arg(&output)
        .assert()
        .success();

    let csv = fs::read_to_string(&output).unwrap();
    assert!(csv.starts_with("store,date,item,price,total\n"));
    assert!(csv.contains("Walmart,03/15/2023,Milk,3.99,6.49\n"));
}

#[test]
fn scan_rejects_non_image_input() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("receipt.pdf");
    fs::write(&input, b"%PDF-1.4").unwrap();

    receipt(&dir)
        .arg("scan")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Please select an image or text file"));
}

#[test]
fn scan_image_without_models_fails() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("receipt.png");
    fs::write(&input, b"not really a png").unwrap();
    let models = dir.path().join("no-models");

    receipt(&dir)
        .arg("scan")
        .arg(&input)
        .arg("--model-dir")
        .arg(&models)
        .assert()
        .failure()
        .stderr(predicate::str::contains("OCR models not found"));
}

#[test]
fn batch_writes_outputs_and_summary() {
    let dir = TempDir::new().unwrap();
    let inputs = dir.path().join("in");
    let out = dir.path().join("out");
    fs::create_dir_all(&inputs).unwrap();
    fs::write(inputs.join("a.txt"), WALMART).unwrap();
    fs::write(inputs.join("b.txt"), "Cafe\nTea $1.20\n").unwrap();
    fs::write(inputs.join("notes.md"), "ignored").unwrap();

    let pattern = format!("{}/*", inputs.display());
    receipt(&dir)
        .args(["batch", &pattern, "--summary", "--output-dir"])
        .arg(&out)
        .assert()
        .success()
        .stderr(predicate::str::contains("Found 2 files"));

    assert!(out.join("a.json").exists());
    assert!(out.join("b.json").exists());

    let summary = fs::read_to_string(out.join("summary.csv")).unwrap();
    assert!(summary.contains("a.txt,success,Walmart,03/15/2023,3,6.49,"));
    assert!(summary.contains("b.txt,success,Cafe,,1,,"));
}

#[test]
fn config_init_get_and_set() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.json");
    let config_arg = config.to_str().unwrap();

    receipt(&dir)
        .args(["--config", config_arg, "config", "init"])
        .assert()
        .success();
    assert!(config.exists());

    receipt(&dir)
        .args(["--config", config_arg, "config", "set", "ocr.min_confidence", "0.5"])
        .assert()
        .success();

    receipt(&dir)
        .args(["--config", config_arg, "config", "get", "ocr.min_confidence"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0.5"));

    receipt(&dir)
        .args(["--config", config_arg, "config", "set", "ocr.nonexistent", "1"])
        .assert()
        .failure();
}

#[test]
fn config_disables_raw_text() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.json");
    fs::write(&config, r#"{"output": {"include_raw_text": false}}"#).unwrap();

    receipt(&dir)
        .arg("--config")
        .arg(&config)
        .args(["scan", "-", "-f", "text"])
        .write_stdin("Cafe\nTea $1.20\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("RAW OCR TEXT").not());
}

#[test]
fn config_show_reports_missing_models() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.json");
    let models = dir.path().join("no-models");
    fs::write(
        &config,
        format!(r#"{{"models": {{"model_dir": {}}}}}"#, serde_json::json!(models)),
    )
    .unwrap();

    receipt(&dir)
        .arg("--config")
        .arg(&config)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"include_raw_text\": true"))
        .stderr(predicate::str::contains("OCR models not found"));
}
