//! Configuration system tests
//!
//! Tests for config paths, preferences, and keymap registry persistence.

mod common;

use chordmap::config::Preferences;
use chordmap::config_paths;
use chordmap::keymap::{
    default_keymap, load_keymaps_file, KeyFun, KeyMaps, KeySeq, KeymapError, KeymapSession,
};

use common::{chord, registry_with, user_map};

// ========================================================================
// Config Paths Tests
// ========================================================================

#[test]
fn test_config_dir_returns_some() {
    assert!(config_paths::config_dir().is_some());
}

#[test]
fn test_config_dir_contains_app_name() {
    let dir = config_paths::config_dir().unwrap();
    assert!(dir.to_string_lossy().contains("chordmap"));
}

#[test]
fn test_keymaps_prefs_file_name() {
    let path = config_paths::keymaps_prefs_file().unwrap();
    assert!(path.to_string_lossy().ends_with("key_maps_prefs.json"));
}

#[test]
fn test_config_file_ends_with_yaml() {
    let path = config_paths::config_file().unwrap();
    assert!(path.to_string_lossy().ends_with("config.yaml"));
}

#[test]
fn test_logs_dir_is_subdir_of_config() {
    let config = config_paths::config_dir().unwrap();
    let logs = config_paths::logs_dir().unwrap();
    assert!(logs.starts_with(&config));
}

// ========================================================================
// Preferences Tests
// ========================================================================

#[test]
fn test_prefs_save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.yaml");

    let prefs = Preferences {
        key_map: "MacStd".to_string(),
        save_key_maps: true,
    };
    prefs.save_to(&path).unwrap();

    assert_eq!(Preferences::load_from(&path), prefs);
}

#[test]
fn test_prefs_missing_file_is_default() {
    let dir = tempfile::tempdir().unwrap();
    let prefs = Preferences::load_from(&dir.path().join("nope.yaml"));
    assert_eq!(prefs, Preferences::default());
}

#[test]
fn test_prefs_invalid_yaml_is_default() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "key_map: [unclosed").unwrap();
    assert_eq!(Preferences::load_from(&path), Preferences::default());
}

// ========================================================================
// Registry Persistence Tests
// ========================================================================

#[test]
fn test_registry_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("keymaps.json");

    let maps = registry_with("Mine", user_map());
    maps.save_json(&path).unwrap();

    let loaded = load_keymaps_file(&path).unwrap();
    assert_eq!(loaded, maps);
    assert_eq!(loaded.map_by_name("Mine").unwrap().0, &user_map());
}

#[test]
fn test_saved_sequences_use_semicolon_encoding() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("keymaps.json");

    registry_with("Mine", user_map()).save_json(&path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("\"Control+X;o\": \"NextPanel\""));
    assert!(text.contains("\"F3;\": \"SearchFile\""));
}

#[test]
fn test_load_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = load_keymaps_file(&dir.path().join("missing.json"));
    assert!(matches!(result, Err(KeymapError::Io { .. })));
}

#[test]
fn test_loaded_old_file_activates_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("old.json");
    std::fs::write(
        &path,
        r#"[
  {
    "Name": "Legacy",
    "Desc": "saved by an older version",
    "Map": {
      "Control+X;o": "KeyFunNextPanel",
      "Control+X;w": "KeyFunWindowSplit",
      "Control+c;Control+c": "KeyFunExecCmd"
    }
  }
]"#,
    )
    .unwrap();

    let maps = load_keymaps_file(&path).unwrap();

    // Both retired names are dropped, everything else is filled in
    let (_, report) = maps.clone().activate("Legacy", &default_keymap()).unwrap();
    assert_eq!(report.removed.len(), 2);
    assert!(report.removed.contains(&KeySeq::new("Control+X", "w")));

    // The only keymap left in the registry becomes the active one
    let session = KeymapSession::new();
    session.replace_maps(&maps);
    assert_eq!(session.active_name(), "Legacy");
    for fun in KeyFun::COMMANDS {
        assert!(session.active().map().has_fun(fun), "{} unbound", fun);
    }
    assert_eq!(
        session.resolve(&chord("Control+X"), &chord("o")),
        KeyFun::NextPanel
    );
    assert!(session.maps_changed());
}

#[test]
fn test_export_then_replace_maps() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("export.json");

    let session = KeymapSession::new();
    session.edit_maps(|maps| {
        maps.push(chordmap::keymap::KeyMapsItem::new(
            "Mine",
            "",
            user_map(),
        ))
    });
    session.maps().save_json(&path).unwrap();

    let other = KeymapSession::new();
    let mut loaded = KeyMaps::new();
    loaded.open_json(&path).unwrap();
    other.replace_maps(&loaded);

    assert!(other.activate_by_name("Mine").is_some());
    assert_eq!(
        other.resolve(&chord("F3"), &chordmap::keymap::KeyChord::none()),
        KeyFun::SearchFile
    );
}
