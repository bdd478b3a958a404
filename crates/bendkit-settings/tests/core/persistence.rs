use bendkit_core::{MeasurementSystem, Vector2};
use bendkit_settings::{Config, ConfigError, SettingsError};
use tempfile::tempdir;

fn customized() -> Config {
    let mut config = Config::new();
    config.pen.initial_position = Vector2::new(10.0, -2.5);
    config.pen.initial_direction = Vector2::new(0.0, 1.0);
    config.output.invert_y = true;
    config.output.measurement_system = MeasurementSystem::Imperial;
    config.editing.default_bend_angle = 45.0;
    config
}

#[test]
fn test_toml_save_and_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");

    let config = customized();
    config.save_to_file(&path).unwrap();
    let loaded = Config::load_from_file(&path).unwrap();

    assert_eq!(loaded, config);
}

#[test]
fn test_json_save_and_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("config.json");

    let config = customized();
    config.save_to_file(&path).unwrap();
    let loaded = Config::load_from_file(&path).unwrap();

    assert_eq!(loaded, config);
}

#[test]
fn test_load_rejects_invalid_values() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[editing]\ndefault_split_ratio = 2.0\n").unwrap();

    let err = Config::load_from_file(&path).unwrap_err();
    assert!(matches!(
        err,
        SettingsError::Config(ConfigError::ValueOutOfRange { .. })
    ));
}

#[test]
fn test_load_reports_parse_errors() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = Config::load_from_file(&path).unwrap_err();
    assert!(matches!(err, SettingsError::JsonError(_)));
}

#[test]
fn test_load_missing_file() {
    let dir = tempdir().unwrap();
    let err = Config::load_from_file(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, SettingsError::IoError(_)));
}
