//! Integration tests for configuration loading
//!
//! Tests that verify config loading from files and environment variables.

use std::fs;

use driftnet::data::config::{AppConfig, CliArgs, DEFAULT_CONFIG_DIR};
use driftnet::field::FieldParams;
use serial_test::serial;

#[test]
#[serial]
fn test_shipped_defaults_match_builtin() {
    let config = AppConfig::load_from(DEFAULT_CONFIG_DIR).unwrap();
    assert_eq!(config, AppConfig::default());
    assert_eq!(config.field, FieldParams::default());
}

#[test]
#[serial]
fn test_missing_dir_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig::load_from(dir.path().join("nope")).unwrap();
    assert_eq!(config, AppConfig::default());
}

#[test]
#[serial]
fn test_user_file_overrides_default_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("default.toml"),
        "[window]\nwidth = 640\nheight = 480\n",
    )
    .unwrap();
    fs::write(dir.path().join("user.toml"), "[window]\nwidth = 800\n").unwrap();

    let config = AppConfig::load_from(dir.path()).unwrap();
    assert_eq!(config.window.width, 800);
    assert_eq!(config.window.height, 480);
}

#[test]
#[serial]
fn test_env_override() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("user.toml"), "[field]\nmax_particles = 30\n").unwrap();

    std::env::set_var("DRIFTNET_FIELD__MAX_PARTICLES", "12");
    let config = AppConfig::load_from(dir.path());
    std::env::remove_var("DRIFTNET_FIELD__MAX_PARTICLES");

    assert_eq!(config.unwrap().field.max_particles, 12);
}

#[test]
#[serial]
fn test_bad_value_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("user.toml"), "[field]\nlink_window = \"four\"\n").unwrap();

    assert!(AppConfig::load_from(dir.path()).is_err());
}

#[test]
#[serial]
fn test_cli_beats_files() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("user.toml"), "[debug]\nseed = 1\n").unwrap();

    let cli = CliArgs::eval_args(
        ["driftnet", "--config", dir.path().to_str().unwrap(), "--seed", "2"]
            .into_iter()
            .map(String::from),
    )
    .unwrap();

    let mut config = AppConfig::load_from(cli.config_dir()).unwrap();
    assert_eq!(config.debug.seed, Some(1));

    cli.apply(&mut config);
    assert_eq!(config.debug.seed, Some(2));
}
