use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::str::contains;
use tempfile::TempDir;

fn cmd(home: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("po-harvest");
    cmd.env("HOME", home.path()).env("PO_HARVEST_LOG", "off");
    cmd
}

#[test]
fn version_flag() {
    let home = TempDir::new().unwrap();
    cmd(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(contains("po-harvest"));
}

#[test]
fn fetch_requires_an_input() {
    let home = TempDir::new().unwrap();
    cmd(&home).arg("fetch").assert().failure();
}

#[test]
fn unreadable_input_reports_error_code() {
    let home = TempDir::new().unwrap();
    let missing = home.path().join("missing.xlsx");
    cmd(&home)
        .args(["--json", "ids", missing.to_str().unwrap()])
        .assert()
        .failure()
        .stdout(contains("INPUT_UNREADABLE"));
}

#[test]
fn config_shows_defaults() {
    let home = TempDir::new().unwrap();
    cmd(&home)
        .arg("config")
        .assert()
        .success()
        .stdout(contains("vendor_id = \"VL0000446\""))
        .stdout(contains("delay_ms = 500"));
}

#[test]
fn invalid_settings_file_is_rejected() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("bad.toml");
    std::fs::write(&path, "[portal]\nbase_url = \"ftp://nope\"\n").unwrap();
    cmd(&home)
        .args(["--json", "--config", path.to_str().unwrap(), "config"])
        .assert()
        .failure()
        .stdout(contains("INVALID_SETTINGS"));
}

#[test]
fn summarize_rejects_bad_quantity() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("rows.csv");
    std::fs::write(
        &path,
        "Tanggal PO,No PO,Distribution Center,Product Name,Qty\n2024-01-01,PO-1,DC1,Widget,lots\n",
    )
    .unwrap();
    cmd(&home)
        .args(["--json", "summarize", path.to_str().unwrap()])
        .assert()
        .failure()
        .stdout(contains("EXPORT_FAILED"));
}
