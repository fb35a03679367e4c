//! Integration tests for loading and saving the TOML configuration.

use libos::{ConfigError, LibosConfig};

#[test]
fn test_missing_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();

    let cfg = LibosConfig::load(&dir.path().join("absent.toml")).unwrap();

    assert_eq!(cfg, LibosConfig::default());
}

#[test]
fn test_save_then_load_preserves_values() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");
    let mut cfg = LibosConfig::default();
    cfg.keyboard.x11_display = Some(":2".to_string());
    cfg.logging.level = "libos=debug".to_string();

    // Act
    cfg.save(&path).unwrap();
    let loaded = LibosConfig::load(&path).unwrap();

    // Assert
    assert_eq!(loaded, cfg);
}

#[test]
fn test_malformed_file_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[keyboard\nx11_display = 3").unwrap();

    let result = LibosConfig::load(&path);

    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn test_directory_path_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();

    let result = LibosConfig::load(dir.path());

    assert!(matches!(result, Err(ConfigError::Io { .. })));
}
