//! End-to-end tests driving the `dredge` binary against a temporary workspace.

use serde_json::Value;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const ENV_KEYS: [&str; 6] = [
    "DREDGE_DEPTH_MIN",
    "DREDGE_DEPTH_MAX",
    "DREDGE_SHALLOW_THRESHOLD",
    "DREDGE_SHOW_BOUNDARY",
    "DREDGE_EXPORT_DIR",
    "DREDGE_OPERATOR",
];

fn dredge(workspace: &Path, args: &[&str]) -> Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_dredge"));
    for key in ENV_KEYS {
        command.env_remove(key);
    }
    command
        .arg("--workspace")
        .arg(workspace)
        .args(args)
        .output()
        .expect("Failed to execute dredge")
}

/// Run with `--json` and return the `data` payload of a successful call
fn dredge_json(workspace: &Path, args: &[&str]) -> Value {
    let mut full = vec!["--json"];
    full.extend_from_slice(args);
    let output = dredge(workspace, &full);
    assert!(
        output.status.success(),
        "dredge {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    let parsed: Value =
        serde_json::from_slice(&output.stdout).expect("Output should be valid JSON");
    assert_eq!(parsed["status"], "success");
    parsed["data"].clone()
}

fn init_workspace() -> TempDir {
    let dir = TempDir::new().unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_dredge"))
        .arg("init")
        .arg(dir.path())
        .arg("--operator")
        .arg("Eng. Test")
        .output()
        .unwrap();
    assert!(output.status.success());
    dir
}

fn add_record(workspace: &Path, lat: &str, lng: &str, depth: &str, volume: &str, material: &str) {
    dredge_json(
        workspace,
        &[
            "record",
            "add",
            &format!("--lat={}", lat),
            &format!("--lng={}", lng),
            "--depth",
            depth,
            "--volume",
            volume,
            "--material",
            material,
            "--vessel",
            "Draga Norte",
            "--timestamp",
            "2024-06-01T08:30:00Z",
        ],
    );
}

fn add_vertex(workspace: &Path, lat: &str, lng: &str) -> Value {
    dredge_json(workspace, &["boundary", "add", "--", lat, lng])
}

/// Project with a square boundary, two records inside it and one outside
fn seeded_workspace() -> TempDir {
    let dir = init_workspace();
    let workspace = dir.path();
    dredge_json(workspace, &["project", "create", "Canal Norte", "--client", "Porto"]);

    add_record(workspace, "-23.95", "-46.35", "8.2", "100", "sand");
    add_record(workspace, "-23.96", "-46.36", "11.6", "50", "clay");
    add_record(workspace, "-23.50", "-46.00", "20", "500", "sand");

    add_vertex(workspace, "-24.0", "-46.4");
    add_vertex(workspace, "-24.0", "-46.3");
    add_vertex(workspace, "-23.9", "-46.3");
    add_vertex(workspace, "-23.9", "-46.4");
    dir
}

#[test]
fn test_init_json_output_is_valid() {
    let dir = TempDir::new().unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_dredge"))
        .args(["--json", "init"])
        .arg(dir.path())
        .output()
        .unwrap();

    let parsed: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(parsed["status"], "success");
    assert_eq!(parsed["data"]["operator"], "Eng. Supervisor");
    assert!(dir.path().join(".dredge/config.toml").exists());
    assert!(dir.path().join(".dredge/records.json").exists());
}

#[test]
fn test_init_twice_requires_force() {
    let dir = init_workspace();
    let again = Command::new(env!("CARGO_BIN_EXE_dredge")).arg("init").arg(dir.path()).output().unwrap();
    assert!(!again.status.success());

    let forced = Command::new(env!("CARGO_BIN_EXE_dredge"))
        .arg("init")
        .arg(dir.path())
        .arg("--force")
        .output()
        .unwrap();
    assert!(forced.status.success());
}

#[test]
fn test_dry_run_init_creates_nothing() {
    let dir = TempDir::new().unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_dredge"))
        .args(["--dry-run", "--json", "init"])
        .arg(dir.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let parsed: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["data"]["dry_run"], true);
    assert!(!dir.path().join(".dredge").exists());
}

#[test]
fn test_commands_need_a_workspace() {
    let dir = TempDir::new().unwrap();
    let output = dredge(dir.path(), &["project", "list"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Not in a DredgeMap workspace"));
}

#[test]
fn test_stats_inside_official_boundary() {
    let dir = seeded_workspace();
    let data = dredge_json(dir.path(), &["stats"]);

    assert_eq!(data["polygons"], serde_json::json!(["Official Area"]));
    assert_eq!(data["stats"]["count"], 2);
    assert_eq!(data["stats"]["volume"], 150.0);
    assert_eq!(data["stats"]["is_official_boundary"], true);
    assert_eq!(data["stats"]["material_distribution"][0]["material"], "Sand");
    assert_eq!(data["observed_depth_range"]["min"], 8.0);
    assert_eq!(data["observed_depth_range"]["max"], 20.0);
    assert_eq!(data["shallow_records"], 2);
}

#[test]
fn test_stats_depth_filter_and_hidden_boundary() {
    let dir = seeded_workspace();

    let deep = dredge_json(dir.path(), &["stats", "--min", "10"]);
    assert_eq!(deep["stats"]["count"], 1);
    assert_eq!(deep["stats"]["volume"], 50.0);

    let hidden = dredge(dir.path(), &["--json", "stats", "--hide-boundary"]);
    assert!(!hidden.status.success());
    assert!(String::from_utf8_lossy(&hidden.stderr).contains("No active selection"));

    let inverted = dredge(dir.path(), &["stats", "--min", "20", "--max", "5"]);
    assert!(!inverted.status.success());
}

#[test]
fn test_adhoc_polygon_selection() {
    let dir = seeded_workspace();
    let selection = dir.path().join("selection.geojson");
    std::fs::write(
        &selection,
        r#"{"type":"Polygon","coordinates":[[[-46.1,-23.6],[-45.9,-23.6],[-45.9,-23.4],[-46.1,-23.4],[-46.1,-23.6]]]}"#,
    )
    .unwrap();

    let data = dredge_json(
        dir.path(),
        &["stats", "--hide-boundary", "--adhoc", selection.to_str().unwrap()],
    );
    assert_eq!(data["polygons"], serde_json::json!(["Manual Selection"]));
    assert_eq!(data["stats"]["count"], 1);
    assert_eq!(data["stats"]["volume"], 500.0);
    assert_eq!(data["stats"]["is_official_boundary"], false);
}

#[test]
fn test_export_writes_feature_collection() {
    let dir = seeded_workspace();
    let data = dredge_json(dir.path(), &["export"]);

    assert_eq!(data["polygon_features"], 1);
    assert_eq!(data["point_features"], 2);

    let path = data["path"].as_str().unwrap();
    assert!(path.contains("exports"));
    assert!(data["filename"].as_str().unwrap().starts_with("dredge_selection_"));

    let document: Value = serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(document["type"], "FeatureCollection");
    let features = document["features"].as_array().unwrap();
    assert_eq!(features.len(), 3);
    assert_eq!(features[0]["properties"]["type"], "Official Area");
    assert_eq!(features[0]["properties"]["calc_volume"], 150.0);
    assert_eq!(features[0]["geometry"]["coordinates"][0].as_array().unwrap().len(), 5);
    assert_eq!(features[1]["geometry"]["type"], "Point");
    assert_eq!(features[1]["properties"]["vessel_name"], "Draga Norte");
}

#[test]
fn test_boundary_edits_persist() {
    let dir = seeded_workspace();

    let listed = dredge_json(dir.path(), &["boundary", "list"]);
    assert_eq!(listed["vertices"].as_array().unwrap().len(), 4);
    assert_eq!(listed["is_polygon"], true);
    assert!(listed["area_m2"].as_f64().unwrap() > 0.0);

    let undone = dredge_json(dir.path(), &["boundary", "undo"]);
    assert_eq!(undone["vertices"].as_array().unwrap().len(), 3);

    let removed = dredge_json(dir.path(), &["boundary", "remove", "1"]);
    let vertices = removed["vertices"].as_array().unwrap();
    assert_eq!(vertices.len(), 2);
    assert_eq!(vertices[0]["lng"], -46.3);
    assert_eq!(removed["is_polygon"], false);

    let out_of_range = dredge(dir.path(), &["boundary", "remove", "9"]);
    assert!(!out_of_range.status.success());

    let cleared = dredge_json(dir.path(), &["boundary", "clear"]);
    assert!(cleared["vertices"].as_array().unwrap().is_empty());

    let empty_undo = dredge(dir.path(), &["boundary", "undo"]);
    assert!(!empty_undo.status.success());
}

#[test]
fn test_record_edits_are_audited() {
    let dir = seeded_workspace();

    let clay = dredge_json(dir.path(), &["record", "list", "--search", "CLAY"]);
    let clay = clay.as_array().unwrap();
    assert_eq!(clay.len(), 1);
    let id = clay[0]["id"].as_str().unwrap().to_string();

    let updated = dredge_json(dir.path(), &["record", "update", &id, "--volume", "75"]);
    assert_eq!(updated["volume"], 75.0);
    assert_eq!(updated["material"], "Clay");

    dredge_json(dir.path(), &["record", "delete", &id]);

    let audit = dredge_json(dir.path(), &["record", "audit"]);
    let audit = audit.as_array().unwrap();
    assert_eq!(audit.len(), 5);
    assert_eq!(audit[0]["action"], "DELETE");
    assert_eq!(audit[0]["user"], "Eng. Test");
    assert_eq!(audit[1]["details"], "Record changed: Clay -> Clay, Vol: 50 -> 75 m³");

    let shallow = dredge_json(dir.path(), &["record", "list", "--shallow"]);
    assert_eq!(shallow.as_array().unwrap().len(), 1);
}

#[test]
fn test_summary_groups_by_month() {
    let dir = seeded_workspace();
    let data = dredge_json(dir.path(), &["summary"]);

    assert_eq!(data["summary"]["record_count"], 3);
    assert_eq!(data["summary"]["vessel_count"], 1);
    assert_eq!(data["summary"]["total_volume"], 650.0);
    assert_eq!(data["monthly"].as_array().unwrap().len(), 1);
    assert_eq!(data["peak_month"], "2024-06");
    assert_eq!(data["average_monthly_volume"], 650.0);
}

#[test]
fn test_project_delete_clears_active() {
    let dir = seeded_workspace();
    let shown = dredge_json(dir.path(), &["project", "show"]);
    let id = shown["id"].as_str().unwrap().to_string();
    assert_eq!(shown["record_count"], 3);

    let planned = dredge_json(dir.path(), &["--dry-run", "project", "delete", &id]);
    assert_eq!(planned["dry_run"], true);
    assert_eq!(dredge_json(dir.path(), &["project", "list"]).as_array().unwrap().len(), 1);

    dredge_json(dir.path(), &["project", "delete", &id]);
    let status = dredge_json(dir.path(), &["status", "--verbose"]);
    assert_eq!(status["project_count"], 0);
    assert!(status["active_project"].is_null());
    assert!(status["config"].as_array().unwrap().iter().any(|entry| entry["key"] == "operator"));
}
