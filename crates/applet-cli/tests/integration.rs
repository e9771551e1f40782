#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const SINCE: &str = "2024-05-01T12:00:00Z";
const BEFORE: &str = "2024-06-01T12:00:00Z";

fn applets(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("applets").unwrap();
    cmd.current_dir(dir.path()).env("APPLETS_ROOT", dir.path());
    cmd
}

fn json_output(cmd: &mut Command) -> serde_json::Value {
    let out = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&out).unwrap()
}

// ---------------------------------------------------------------------------
// applets init
// ---------------------------------------------------------------------------

#[test]
fn init_writes_config_and_catalog() {
    let dir = TempDir::new().unwrap();
    applets(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("created .applets/config.yaml"));

    assert!(dir.path().join(".applets/config.yaml").exists());
    assert!(dir.path().join(".applets/catalog.yaml").exists());
}

#[test]
fn init_keeps_existing_files() {
    let dir = TempDir::new().unwrap();
    applets(&dir).arg("init").assert().success();
    applets(&dir).args(["applet", "toggle", "1"]).assert().success();

    applets(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("kept existing .applets/catalog.yaml"));

    let applet = json_output(applets(&dir).args(["--json", "applet", "show", "1"]));
    assert_eq!(applet["enabled"], false);
}

// ---------------------------------------------------------------------------
// Catalog commands
// ---------------------------------------------------------------------------

#[test]
fn service_list_shows_seeded_services() {
    let dir = TempDir::new().unwrap();
    applets(&dir)
        .args(["service", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("instagram"))
        .stdout(predicate::str::contains("Google Sheets"));
}

#[test]
fn service_show_unknown_fails() {
    let dir = TempDir::new().unwrap();
    applets(&dir)
        .args(["service", "show", "99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("service not found: 99"));
}

#[test]
fn applet_toggle_round_trips() {
    let dir = TempDir::new().unwrap();
    applets(&dir)
        .args(["applet", "toggle", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Applet 3 disabled"));

    let disabled = json_output(applets(&dir).args(["--json", "applet", "list", "--enabled", "false"]));
    let ids: Vec<&str> = disabled
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["3"]);
    assert_eq!(disabled[0]["triggerService"]["slug"], "wordpress");
    assert_eq!(disabled[0]["triggerService"]["id"], "5");

    applets(&dir)
        .args(["applet", "toggle", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Applet 3 enabled"));
}

// ---------------------------------------------------------------------------
// Activity feed
// ---------------------------------------------------------------------------

#[test]
fn activity_list_json_page() {
    let dir = TempDir::new().unwrap();
    let page = json_output(applets(&dir).args([
        "--json", "activity", "list", "1", "--since", SINCE, "--before", BEFORE,
    ]));

    assert_eq!(page["totalCount"], 200);
    assert_eq!(page["perPage"], 20);
    assert_eq!(page["totalPages"], 10);
    assert_eq!(page["activities"].as_array().unwrap().len(), 20);
    assert_eq!(page["activities"][0]["triggerData"]["service"], "Instagram");
    assert_eq!(page["activities"][0]["appletId"], "1");
}

#[test]
fn activity_list_matches_between_runs() {
    let dir = TempDir::new().unwrap();
    let args = [
        "--json", "activity", "list", "4", "--since", SINCE, "--before", BEFORE, "--page", "3",
    ];
    let a = json_output(applets(&dir).args(args));
    let b = json_output(applets(&dir).args(args));
    assert_eq!(a, b);
}

#[test]
fn activity_count_agrees_with_list() {
    let dir = TempDir::new().unwrap();
    let filters = ["--since", SINCE, "--before", BEFORE, "--status", "skipped"];

    let count = json_output(
        applets(&dir)
            .args(["--json", "activity", "count", "2"])
            .args(filters),
    );
    let page = json_output(
        applets(&dir)
            .args(["--json", "activity", "list", "2", "--per-page", "100"])
            .args(filters),
    );
    assert_eq!(count["appletId"], "2");
    assert_eq!(count["totalCount"], page["totalCount"]);
    assert!(page["activities"]
        .as_array()
        .unwrap()
        .iter()
        .all(|a| a["status"] == "skipped"));
}

#[test]
fn activity_list_table_output() {
    let dir = TempDir::new().unwrap();
    applets(&dir)
        .args(["activity", "list", "1", "--since", SINCE, "--before", BEFORE])
        .assert()
        .success()
        .stdout(predicate::str::contains("RAN AT"))
        .stdout(predicate::str::contains("page 1 of 10"));
}

#[test]
fn activity_latest_limits_results() {
    let dir = TempDir::new().unwrap();
    let out = json_output(applets(&dir).args([
        "--json", "activity", "latest", "5", "--since", "2000-01-01", "--limit", "4",
    ]));
    assert_eq!(out["activities"].as_array().unwrap().len(), 4);
}

#[test]
fn activity_for_unknown_applet_fails() {
    let dir = TempDir::new().unwrap();
    applets(&dir)
        .args(["activity", "list", "42"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("applet not found: 42"));
}
