use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

fn orgchart() -> Command {
    let mut cmd = Command::cargo_bin("orgchart").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn analyze_seed_as_text() {
    orgchart()
        .args(["analyze"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Enterprise Analysis"))
        .stdout(predicate::str::contains("Health Score: 80/100 (healthy)"))
        .stdout(predicate::str::contains("Duplicate Titles: No duplicates found"));
}

#[test]
fn analyze_json_and_fail_below() {
    let out = orgchart().args(["analyze", "--format", "json"]).output().unwrap();
    assert!(out.status.success());
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v["score"]["score"], 80);
    assert_eq!(v["integrity"]["snapshot_sha256"].as_str().map(str::len), Some(64));

    orgchart().args(["analyze", "--fail-below", "90"]).assert().code(3);
}

#[test]
fn usage_errors_exit_two() {
    orgchart().args(["analyze", "--format", "yaml"]).assert().code(2);
    orgchart().args(["rename", "seed-1", "COO"]).assert().code(2).stderr(predicate::str::contains("requires --store"));
}

#[test]
fn missing_store_is_io_error_unless_seeded() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("absent.json");
    orgchart().arg("--store").arg(&store).arg("analyze").assert().code(4);
    orgchart().arg("--store").arg(&store).args(["--seed-if-missing", "analyze"]).assert().success();
}

#[test]
fn edits_sweep_references_in_the_store() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("org.json");
    let csv = dir.path().join("org.csv");
    fs::write(
        &csv,
        "id,grade,title,buName,incumbentName,reportsToUp\n\
         a,G7,CEO,GL,Asha,\n\
         b,G6,CFO,GL,Ben,CEO\n\
         c,G4,Controller,GL,,CFO\n",
    )
    .unwrap();

    orgchart().arg("--store").arg(&store).arg("import-csv").arg(&csv).assert().success();
    orgchart().arg("--store").arg(&store).args(["rename", "b", "Group CFO"]).assert().success();

    let doc: serde_json::Value = serde_json::from_str(&fs::read_to_string(&store).unwrap()).unwrap();
    assert_eq!(doc["version"], 4);
    let nodes = doc["data"]["nodes"].as_array().unwrap();
    let controller = nodes.iter().find(|n| n["title"] == "Controller").unwrap();
    assert_eq!(controller["reporting"]["up"], "");

    orgchart()
        .arg("--store")
        .arg(&store)
        .arg("tree")
        .assert()
        .success()
        .stdout(predicate::str::contains("Unlinked Roles").not())
        .stdout(predicate::str::contains("[G4] Controller · (vacant)"));

    orgchart().arg("--store").arg(&store).args(["delete", "zzz"]).assert().code(2);
}

#[test]
fn seed_refuses_to_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("org.json");
    orgchart().arg("--store").arg(&store).arg("seed").assert().success();
    orgchart().arg("--store").arg(&store).arg("seed").assert().code(2);
    orgchart().arg("--store").arg(&store).args(["seed", "--force"]).assert().success();
}

#[test]
fn export_csv_starts_with_bom_and_header() {
    orgchart()
        .args(["export-csv", "--bu", "Rail"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("\u{FEFF}id,archived,grade,level,title,buName"))
        .stdout(predicate::str::contains("Signalling Design Engineer"))
        .stdout(predicate::str::contains("Pavement Specialist").not());
}
