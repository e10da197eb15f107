#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn fleet(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("fleet").unwrap();
    cmd.current_dir(dir.path())
        .env("FLEET_ROOT", dir.path())
        .env_remove("RUST_LOG");
    cmd
}

fn write_csv(dir: &TempDir, body: &str) -> std::path::PathBuf {
    let path = dir.path().join("stock.csv");
    std::fs::write(
        &path,
        format!("name,dose,unit,quantity,route,expiry_date,space_id\n{body}"),
    )
    .unwrap();
    path
}

// ---------------------------------------------------------------------------
// fleet init
// ---------------------------------------------------------------------------

#[test]
fn init_writes_config() {
    let dir = TempDir::new().unwrap();
    fleet(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("created: .fleet/config.yaml"));

    let content = std::fs::read_to_string(dir.path().join(".fleet/config.yaml")).unwrap();
    assert!(content.contains("ampulario_expiry_days: 3"));
}

#[test]
fn init_is_idempotent() {
    let dir = TempDir::new().unwrap();
    fleet(&dir).arg("init").assert().success();
    fleet(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("exists:"));
}

// ---------------------------------------------------------------------------
// fleet config
// ---------------------------------------------------------------------------

#[test]
fn config_validate_requires_init() {
    let dir = TempDir::new().unwrap();
    fleet(&dir)
        .args(["config", "validate"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("fleet init"));
}

#[test]
fn config_validate_clean_default() {
    let dir = TempDir::new().unwrap();
    fleet(&dir).arg("init").assert().success();
    fleet(&dir)
        .args(["config", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Config is valid"));
}

#[test]
fn config_validate_flags_negative_threshold() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join(".fleet")).unwrap();
    std::fs::write(
        dir.path().join(".fleet/config.yaml"),
        "fleet:\n  name: north\nalerts:\n  review_overdue_days: -1\n",
    )
    .unwrap();
    fleet(&dir)
        .args(["config", "validate"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("review_overdue_days"));
}

#[test]
fn config_show_json_uses_defaults_without_init() {
    let dir = TempDir::new().unwrap();
    let out = fleet(&dir)
        .args(["config", "show", "--json"])
        .output()
        .unwrap();
    assert!(out.status.success());
    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(json["server"]["port"], 3141);
    assert_eq!(json["import"]["max_rows"], 5000);
}

// ---------------------------------------------------------------------------
// fleet alerts
// ---------------------------------------------------------------------------

#[test]
fn alerts_lists_demo_fleet() {
    let dir = TempDir::new().unwrap();
    fleet(&dir)
        .arg("alerts")
        .assert()
        .success()
        .stdout(predicate::str::contains("expired"))
        .stdout(predicate::str::contains("review_pending"));
}

#[test]
fn alerts_json_is_sorted_by_severity() {
    let dir = TempDir::new().unwrap();
    let out = fleet(&dir).args(["alerts", "--json"]).output().unwrap();
    assert!(out.status.success());
    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let alerts = json.as_array().unwrap();
    assert!(!alerts.is_empty());
    assert_eq!(alerts[0]["severity"], "high");
}

#[test]
fn alerts_empty_when_demo_data_disabled() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join(".fleet")).unwrap();
    std::fs::write(
        dir.path().join(".fleet/config.yaml"),
        "fleet:\n  name: north\nserver:\n  seed_demo_data: false\n",
    )
    .unwrap();
    fleet(&dir)
        .arg("alerts")
        .assert()
        .success()
        .stdout(predicate::str::contains("No active alerts"));
}

// ---------------------------------------------------------------------------
// fleet import check
// ---------------------------------------------------------------------------

#[test]
fn import_check_accepts_valid_file() {
    let dir = TempDir::new().unwrap();
    let csv = write_csv(
        &dir,
        "Adrenaline,1,mg,10,IV,2030-01-31,cabinet-a\nMidazolam,5,mg,4,IM,31/01/2030,cabinet-b\n",
    );
    fleet(&dir)
        .args(["import", "check"])
        .arg(&csv)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 rows would be imported"));
}

#[test]
fn import_check_reports_bad_rows() {
    let dir = TempDir::new().unwrap();
    let csv = write_csv(
        &dir,
        "Adrenaline,1,mg,10,IV,2030-01-31,cabinet-a\n,5,mg,4,IM,2030-01-31,cabinet-z\n",
    );
    fleet(&dir)
        .args(["import", "check"])
        .arg(&csv)
        .assert()
        .failure()
        .stdout(predicate::str::contains("row 3"))
        .stdout(predicate::str::contains("cabinet-z"));
}

#[test]
fn import_check_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    fleet(&dir)
        .args(["import", "check", "nope.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}
