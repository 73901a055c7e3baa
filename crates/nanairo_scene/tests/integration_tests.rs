//! Integration tests for nanairo_scene crate
//!
//! Tests the build, save, load and validate pipeline

use nanairo_scene::*;
use serde_json::Value as Json;

fn collect_keys(json: &Json, keys: &mut Vec<String>) {
    match json {
        Json::Object(map) => {
            for (key, value) in map {
                keys.push(key.clone());
                collect_keys(value, keys);
            }
        }
        Json::Array(items) => items.iter().for_each(|item| collect_keys(item, keys)),
        _ => {}
    }
}

#[test]
fn test_scene_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("CornellBox.nana");

    let scene = build_default_scene();
    SceneFile::save(&scene, &path).expect("Failed to save");
    let loaded = SceneFile::load(&path).expect("Failed to load");

    assert_eq!(loaded, scene);
}

#[test]
fn test_every_key_is_a_registry_token() {
    let json = serde_json::to_value(build_default_scene()).unwrap();
    let mut keys = Vec::new();
    collect_keys(&json, &mut keys);

    for key in keys {
        assert!(Symbol::from_token(&key).is_some(), "'{}' is not a registered token", key);
    }
}

#[test]
fn test_every_type_tag_is_a_registry_token() {
    let json = serde_json::to_value(build_default_scene()).unwrap();
    let mut tags = vec![json["Bvh"]["Type"].clone(), json["RenderingMethod"]["Type"].clone()];
    for section in ["Object", "SurfaceModel", "TextureModel", "EmitterModel"] {
        for item in json[section].as_array().unwrap() {
            tags.push(item["Type"].clone());
        }
    }
    for object in json["Object"].as_array().unwrap() {
        for transformation in object["Transformation"].as_array().unwrap() {
            tags.push(transformation["Type"].clone());
        }
    }

    for tag in tags {
        let tag = tag.as_str().unwrap().to_string();
        assert!(Symbol::from_token(&tag).is_some(), "'{}' is not a registered token", tag);
    }
}

#[test]
fn test_load_rejects_invalid_surface_index() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Broken.nana");

    let mut json = serde_json::to_value(build_default_scene()).unwrap();
    json["Object"][4]["SurfaceIndex"] = Json::from(3);
    std::fs::write(&path, serde_json::to_string_pretty(&json).unwrap()).unwrap();

    match SceneFile::load(&path) {
        Err(SceneError::Validation(ValidationError::InvalidReference { path, index, len })) => {
            assert_eq!(path, "Object[4].SurfaceIndex");
            assert_eq!(index, 3);
            assert_eq!(len, 3);
        }
        other => panic!("expected an invalid reference, got {:?}", other),
    }
}

#[test]
fn test_load_rejects_huge_group_level() {
    let mut json = serde_json::to_value(build_default_scene()).unwrap();
    json["Object"][2]["GroupLevel"] = Json::from(4_000_000_000u32);

    match SceneFile::from_json_str(&json.to_string()) {
        Err(SceneError::Validation(ValidationError::SchemaViolation { path, .. })) => {
            assert_eq!(path, "Object[2].GroupLevel");
        }
        other => panic!("expected a schema violation, got {:?}", other),
    }
}

#[test]
fn test_load_rejects_object_outside_world() {
    let mut json = serde_json::to_value(build_default_scene()).unwrap();
    json["Object"][9]["GroupLevel"] = Json::from(0);

    let err = SceneFile::from_json_str(&json.to_string()).unwrap_err();
    assert!(matches!(
        err,
        SceneError::Validation(ValidationError::SchemaViolation { ref path, .. }) if path == "Object[9].GroupLevel"
    ));
}

#[test]
fn test_load_rejects_mixed_color_shapes() {
    let mut json = serde_json::to_value(build_default_scene()).unwrap();
    json["TextureModel"][0]["Color"]["Value"] = serde_json::json!([0.5, 0.5, 0.5]);

    let err = SceneFile::from_json_str(&json.to_string()).unwrap_err();
    assert!(err.is_validation());
}

#[test]
fn test_load_checks_path() {
    let dir = tempfile::tempdir().unwrap();

    let missing = dir.path().join("Missing.nana");
    assert!(matches!(SceneFile::load(&missing), Err(SceneError::FileNotFound(_))));

    let text = dir.path().join("CornellBox.json");
    std::fs::write(&text, SceneFile::to_json_string(&build_default_scene()).unwrap()).unwrap();
    assert!(matches!(SceneFile::load(&text), Err(SceneError::NotSceneFile(_))));
}

#[test]
fn test_property_view_edit() {
    let scene = build_default_scene();
    let mut properties = scene.to_properties().unwrap();

    let system = get_property(&properties, "System").unwrap().clone();
    assert_eq!(system.get("NumOfThreads"), Some(Value::Int(4)));

    // Nested objects are shared with the shallow copy
    let copy = shallow_copy(&properties);
    copy["System"].set("NumOfThreads", Value::from(8)).unwrap();
    set_property(&mut properties, "Scene", vec![("SceneName", "Edited")].into_iter().collect::<Value>());

    let edited = SceneDocument::from_properties(&properties).unwrap();
    assert_eq!(edited.system.num_of_threads, 8);
    assert_eq!(edited.scene_name(), "Edited");
    assert_eq!(copy["Scene"].get("SceneName"), Some(Value::from("CornellBox")));
}

#[test]
fn test_property_view_rejects_invalid_edit() {
    let mut properties = build_default_scene().to_properties().unwrap();
    properties.remove("Bvh");
    assert!(SceneDocument::from_properties(&properties).is_err());

    let mut properties = build_default_scene().to_properties().unwrap();
    properties["Object"].as_array().unwrap()[2].set("SurfaceIndex", Value::from(7)).unwrap();
    let err = SceneDocument::from_properties(&properties).unwrap_err();
    assert!(matches!(err, SceneError::Validation(ValidationError::InvalidReference { .. })));
}

#[test]
fn test_session_lifecycle() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = SceneSession::new();
    let path = session.save_as(dir.path().join("scene")).unwrap();

    session.document_mut().system.num_of_threads = 2;
    session.save().unwrap();

    let reopened = SceneSession::open(&path).unwrap();
    assert_eq!(reopened.document().system.num_of_threads, 2);
    assert!(!reopened.is_modified());
}

#[test]
fn test_presets() {
    for preset in PresetScene::ALL {
        if let Some(scene) = preset.build() {
            assert_eq!(scene.scene_name(), preset.name());
            SceneValidator::validate(&scene).unwrap();
        }
    }
}

#[test]
fn test_missing_resources() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("CornellBox.nana");
    let scene = build_default_scene();

    assert_eq!(missing_resources(&scene, &path).len(), 5);

    let cube = resolve_resource_path(&path, "resources/models/Primitives/Cube.obj");
    std::fs::create_dir_all(cube.parent().unwrap()).unwrap();
    std::fs::write(&cube, "").unwrap();
    assert_eq!(missing_resources(&scene, &path).len(), 4);
}
