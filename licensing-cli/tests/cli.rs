use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;

fn sample_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("licensing-parser")
        .join("docs")
        .join("samples")
        .join(name)
}

#[test]
fn parse_renders_treeviz_by_default() {
    let mut cmd = cargo_bin_cmd!("licensing");
    cmd.arg("parse").arg(sample_path("full_specification.txt"));

    let output_pred = predicate::str::starts_with("⧉ 23 sections")
        .and(predicate::str::contains("Ⓐ 4.1.1"))
        .and(predicate::str::contains("Ⓑ 1.2"));

    cmd.assert().success().stdout(output_pred);
}

#[test]
fn parse_show_bounds() {
    let mut cmd = cargo_bin_cmd!("licensing");
    cmd.arg("parse")
        .arg(sample_path("full_specification.txt"))
        .arg("--show-bounds");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("[area≥100 gas]"));
}

#[test]
fn parse_json_to_file_then_match_saved_forest() {
    let dir = tempfile::tempdir().unwrap();
    let saved = dir.path().join("forest.json");

    let mut parse = cargo_bin_cmd!("licensing");
    parse
        .arg("parse")
        .arg(sample_path("full_specification.txt"))
        .arg("--format")
        .arg("json")
        .arg("--output")
        .arg(&saved);
    parse.assert().success().stdout(predicate::str::is_empty());

    let forest: serde_json::Value = serde_json::from_str(&fs::read_to_string(&saved).unwrap()).unwrap();
    assert_eq!(forest.as_array().unwrap().len(), 17);

    let mut matched = cargo_bin_cmd!("licensing");
    matched
        .arg("match")
        .arg(&saved)
        .arg("--area")
        .arg("150")
        .arg("--seats")
        .arg("50")
        .arg("--gas");
    matched.assert().success().stdout(
        predicate::str::contains("§ 3.2.1")
            .and(predicate::str::contains("Ⓑ 1.1"))
            .and(predicate::str::contains("3.5").not()),
    );
}

#[test]
fn match_json_report() {
    let mut cmd = cargo_bin_cmd!("licensing");
    cmd.arg("match")
        .arg(sample_path("full_specification.txt"))
        .args(["--area", "150", "--seats", "50", "--gas", "--format", "json"]);

    let output = cmd.assert().success().get_output().stdout.clone();
    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(report["total_sections"], 23);
    assert_eq!(report["matched_sections"], 4);
    assert_eq!(report["matched"][0]["id"], "3.2");
}

#[test]
fn match_with_profile_file() {
    let dir = tempfile::tempdir().unwrap();
    let profile = dir.path().join("profile.json");
    fs::write(
        &profile,
        r#"{"area": 80, "seatCount": 20, "usesGas": false, "servesMeat": false, "offersDelivery": true}"#,
    )
    .unwrap();

    let mut cmd = cargo_bin_cmd!("licensing");
    cmd.arg("match")
        .arg(sample_path("orphans.txt"))
        .arg("--profile")
        .arg(&profile);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("7.1.2.1").and(predicate::str::contains("9.4.1").not()));
}

#[test]
fn config_file_disables_carve_out() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("licensing.toml");
    fs::write(&config, "[matching.carve_out]\nenabled = false\n").unwrap();

    let mut cmd = cargo_bin_cmd!("licensing");
    cmd.arg("match")
        .arg(sample_path("full_specification.txt"))
        .args(["--area", "80", "--seats", "10", "--meat"])
        .arg("--config")
        .arg(&config);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("§ 3.5"));
}

#[test]
fn negative_seat_count_is_rejected() {
    let mut cmd = cargo_bin_cmd!("licensing");
    cmd.arg("match")
        .arg(sample_path("full_specification.txt"))
        .args(["--area", "80", "--seats", "-3"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("seat count must not be negative"));
}

#[test]
fn unknown_format_is_rejected() {
    let mut cmd = cargo_bin_cmd!("licensing");
    cmd.arg("parse")
        .arg(sample_path("full_specification.txt"))
        .args(["--format", "xml"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("unknown format 'xml'"));
}

#[test]
fn missing_input_file_is_reported() {
    let mut cmd = cargo_bin_cmd!("licensing");
    cmd.arg("parse").arg("/nonexistent/spec.txt");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}

#[test]
fn list_formats() {
    let mut cmd = cargo_bin_cmd!("licensing");
    cmd.arg("--list-formats");

    cmd.assert().success().stdout(
        predicate::str::contains("json")
            .and(predicate::str::contains("yaml"))
            .and(predicate::str::contains("treeviz")),
    );
}
