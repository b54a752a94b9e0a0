//! Unit tests for configuration resolution and graceful degradation
//!
//! Tests the implementation of:
//! - Missing TOML file falls back to compiled defaults
//! - Malformed TOML file is a configuration error
//! - Priority order: CLI > environment > TOML > default
//!
//! Note: Uses serial_test crate to prevent ENV variable race conditions.
//! Tests that read or set SENTISCOPE_* variables are marked with #[serial].

use sentiscope_common::config::{
    load_toml_config, ClassifierToml, ConfigOverrides, ServiceConfig, TomlConfig, DEFAULT_MODEL,
    DEFAULT_PORT, DEFAULT_UPLOAD_FOLDER, ENV_HF_TOKEN, ENV_PORT, ENV_UPLOAD_FOLDER,
};
use sentiscope_common::Error;
use serial_test::serial;
use std::env;
use std::path::PathBuf;
use tempfile::TempDir;

fn clear_env() {
    env::remove_var(ENV_UPLOAD_FOLDER);
    env::remove_var(ENV_PORT);
    env::remove_var(ENV_HF_TOKEN);
    env::remove_var("SENTISCOPE_HOST");
}

#[test]
#[serial]
fn test_defaults_when_nothing_configured() {
    clear_env();

    let config = ServiceConfig::from_sources(TomlConfig::default(), ConfigOverrides::default())
        .unwrap();

    assert_eq!(config.upload_folder, PathBuf::from(DEFAULT_UPLOAD_FOLDER));
    assert_eq!(config.port, DEFAULT_PORT);
    assert_eq!(config.classifier.model, DEFAULT_MODEL);
    assert!(config.classifier.api_token.is_none());
    assert_eq!(config.log_level, "info");
    assert!(!config.debug);
}

#[test]
#[serial]
fn test_missing_toml_file_uses_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config = load_toml_config(&temp_dir.path().join("absent.toml")).unwrap();

    assert!(config.upload_folder.is_none());
    assert!(config.port.is_none());
}

#[test]
#[serial]
fn test_malformed_toml_is_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    std::fs::write(&path, "port = \"not a number\"\n[[[").unwrap();

    let err = load_toml_config(&path).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[test]
#[serial]
fn test_toml_overrides_defaults() {
    clear_env();
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
upload_folder = "/srv/sentiscope"
port = 8088

[classifier]
endpoint = "http://localhost:9000/models"
batch_size = 2

[logging]
level = "warn"
"#,
    )
    .unwrap();

    let overrides = ConfigOverrides {
        config_path: Some(path),
        ..ConfigOverrides::default()
    };
    let config = ServiceConfig::load(overrides).unwrap();

    assert_eq!(config.upload_folder, PathBuf::from("/srv/sentiscope"));
    assert_eq!(config.port, 8088);
    assert_eq!(config.classifier.batch_size, 2);
    assert_eq!(
        config.classifier.model_url(),
        format!("http://localhost:9000/models/{}", DEFAULT_MODEL)
    );
    assert_eq!(config.log_level, "warn");
}

#[test]
#[serial]
fn test_env_overrides_toml() {
    clear_env();
    env::set_var(ENV_UPLOAD_FOLDER, "/from/env");
    env::set_var(ENV_PORT, "7000");

    let toml_config = TomlConfig {
        upload_folder: Some(PathBuf::from("/from/toml")),
        port: Some(8000),
        ..TomlConfig::default()
    };
    let config = ServiceConfig::from_sources(toml_config, ConfigOverrides::default()).unwrap();

    assert_eq!(config.upload_folder, PathBuf::from("/from/env"));
    assert_eq!(config.port, 7000);

    clear_env();
}

#[test]
#[serial]
fn test_cli_overrides_env() {
    clear_env();
    env::set_var(ENV_UPLOAD_FOLDER, "/from/env");
    env::set_var(ENV_HF_TOKEN, "env-token");

    let overrides = ConfigOverrides {
        upload_folder: Some(PathBuf::from("/from/cli")),
        api_token: Some("cli-token".to_string()),
        debug: true,
        ..ConfigOverrides::default()
    };
    let config = ServiceConfig::from_sources(TomlConfig::default(), overrides).unwrap();

    assert_eq!(config.upload_folder, PathBuf::from("/from/cli"));
    assert_eq!(config.classifier.api_token.as_deref(), Some("cli-token"));
    assert_eq!(config.log_level, "debug");
    assert!(config.debug);

    clear_env();
}

#[test]
#[serial]
fn test_invalid_env_port_is_error() {
    clear_env();
    env::set_var(ENV_PORT, "seventy");

    let err = ServiceConfig::from_sources(TomlConfig::default(), ConfigOverrides::default())
        .unwrap_err();
    assert!(matches!(err, Error::Config(_)));

    clear_env();
}

#[test]
#[serial]
fn test_zero_batch_size_is_error() {
    clear_env();
    let toml_config = TomlConfig {
        classifier: ClassifierToml {
            batch_size: Some(0),
            ..ClassifierToml::default()
        },
        ..TomlConfig::default()
    };

    let err = ServiceConfig::from_sources(toml_config, ConfigOverrides::default()).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}
