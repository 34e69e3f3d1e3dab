//! Integration tests for configuration and scene files on disk

use std::fs;

use crate::config::{ConfigError, FileFormat};
use crate::core::config::{Config, GroupNames, LowHighConfig, NamingConfig, TieBreak};
use crate::scene::{EntityKind, Scene, SceneSnapshot, SnapshotError, World};

#[test]
fn test_toml_config_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lowhigh.toml");
    let config = LowHighConfig::new(
        NamingConfig::new("lp", "hp")
            .with_common_group(true)
            .with_tie_break(TieBreak::LastMatch),
    )
    .with_groups(GroupNames {
        common_bake: "Bake_All".to_string(),
        ..GroupNames::default()
    });

    config.save_to_file(&path).unwrap();

    assert_eq!(LowHighConfig::load_from_file(&path).unwrap(), config);
}

#[test]
fn test_partial_ron_config_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lowhigh.ron");
    fs::write(&path, r#"(naming: (suffix_low: "__LP__", create_groups: false))"#).unwrap();

    let config = LowHighConfig::load_from_file(&path).unwrap();

    assert_eq!(config.naming.suffix_low, "LP");
    assert_eq!(config.naming.suffix_high, "high");
    assert!(!config.naming.create_groups);
    assert_eq!(config.groups, GroupNames::default());
}

#[test]
fn test_empty_suffix_is_rejected_on_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lowhigh.toml");
    fs::write(&path, "[naming]\nsuffix_high = \"___\"\n").unwrap();

    assert!(matches!(LowHighConfig::load_from_file(&path), Err(ConfigError::Invalid(_))));
}

#[test]
fn test_unsupported_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lowhigh.yaml");
    fs::write(&path, "naming: {}").unwrap();

    assert!(matches!(LowHighConfig::load_from_file(&path), Err(ConfigError::UnsupportedFormat(_))));
    assert!(FileFormat::from_path(&path).is_err());
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();

    let result = LowHighConfig::load_from_file(dir.path().join("absent.toml"));

    assert!(matches!(result, Err(ConfigError::Io(_))));
}

#[test]
fn test_scene_file_round_trip_in_both_formats() {
    let dir = tempfile::tempdir().unwrap();
    let mut scene = Scene::new(World::new());
    let rock = scene.world.spawn_mesh("Rock_low");
    let lamp = scene.world.spawn("Lamp", EntityKind::Other, None);
    scene.groups.get_or_create("LOW");
    scene.groups.link("LOW", rock).unwrap();
    scene.groups.get_or_create("Lights");
    scene.groups.link("Lights", lamp).unwrap();
    scene.groups.get_or_create("Bake_Empty");
    let snapshot = scene.snapshot();

    for file in ["scene.toml", "scene.ron"] {
        let path = dir.path().join(file);
        snapshot.save(&path).unwrap();

        let loaded = SceneSnapshot::load(&path).unwrap();
        assert_eq!(loaded, snapshot, "{file}");
        assert_eq!(Scene::from_snapshot(&loaded).unwrap().snapshot(), snapshot, "{file}");
    }
}

#[test]
fn test_hand_written_scene_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scene.toml");
    fs::write(
        &path,
        r#"
groups = ["Scene"]

[[entities]]
name = "Rock"
groups = ["Scene"]
payload = { name = "RockMesh" }

[[entities]]
name = "Rock.001"
payload = { name = "RockMesh" }
"#,
    )
    .unwrap();

    let scene = Scene::from_snapshot(&SceneSnapshot::load(&path).unwrap()).unwrap();

    assert_eq!(scene.world.payload_count(), 1);
    assert_eq!(scene.groups.get("Scene").map(crate::scene::Group::len), Some(1));
}

#[test]
fn test_malformed_scene_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scene.ron");
    fs::write(&path, "(entities: [ (name: ").unwrap();

    assert!(matches!(
        SceneSnapshot::load(&path),
        Err(SnapshotError::Document(ConfigError::Parse(_)))
    ));
}
