//! Integration tests for the shell commands

use nanairo_shell::{commands, ShellConfig, ShellError};
use std::path::Path;

fn config_in(dir: &Path) -> ShellConfig {
    ShellConfig {
        scene_dir: dir.to_path_buf(),
        ..ShellConfig::default()
    }
}

#[test]
fn test_default_then_validate() {
    let dir = tempfile::tempdir().unwrap();
    let path = commands::write_default(&config_in(dir.path()), None, None).unwrap();

    let report = commands::validate(&path).unwrap();
    assert!(report.ends_with(": OK\n"));
}

#[test]
fn test_validate_counts_every_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = commands::write_default(&config_in(dir.path()), None, None).unwrap();

    let mut json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    json["Object"][2]["SurfaceIndex"] = serde_json::json!(9);
    json["Object"][3]["EmitterIndex"] = serde_json::json!(5);
    std::fs::write(&path, json.to_string()).unwrap();

    match commands::validate(&path) {
        Err(ShellError::Invalid { count, .. }) => assert_eq!(count, 2),
        other => panic!("expected validation errors, got {:?}", other),
    }
}

#[test]
fn test_validate_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = commands::validate(&dir.path().join("Nope.nana")).unwrap_err();
    assert!(matches!(err, ShellError::Scene(_)));
}

#[test]
fn test_info() {
    let dir = tempfile::tempdir().unwrap();
    let path = commands::write_default(&config_in(dir.path()), None, None).unwrap();

    let out = commands::info(&path).unwrap();
    assert!(out.starts_with("Scene: CornellBox\nResolution: 1280x720\n"));
    assert!(out.contains("Objects: 10\n"));
    assert!(out.contains("  Camera (CameraObject)\n"));
    assert!(out.contains("    Floor (SingleObject)\n"));
    assert!(out.contains("Missing resources:\n"));
}

#[test]
fn test_info_empty_scene() {
    let dir = tempfile::tempdir().unwrap();
    let path = commands::write_default(&config_in(dir.path()), Some("DefaultScene"), None).unwrap();

    let out = commands::info(&path).unwrap();
    assert!(out.contains("Objects: 2\n"));
    assert!(!out.contains("Missing resources"));
}

#[test]
fn test_config_file_drives_default() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("nanairo.toml");
    let scenes = dir.path().join("scenes");
    std::fs::write(
        &config_path,
        format!(
            "scene_dir = {:?}\ndefault_preset = \"DefaultScene\"\n",
            scenes.display().to_string()
        ),
    )
    .unwrap();

    let config = ShellConfig::load_from_file(&config_path).unwrap();
    let path = commands::write_default(&config, None, None).unwrap();
    assert_eq!(path, scenes.join("DefaultScene.nana"));
}
