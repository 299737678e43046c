use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use pathdedup::cli::ScopeArg;
use pathdedup::config::{Config, ConfigError};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_config_load_defaults() {
    // Figment without Env to avoid interference from the environment
    let figment = Figment::from(Serialized::defaults(Config::default()));
    let config: Config = figment.extract().unwrap();
    assert_eq!(config.precision.digits(), 1);
    assert_eq!(config.scope, ScopeArg::Auto);
    assert_eq!(config.parallel_threshold, 256);
}

#[test]
fn test_config_load_from_env() {
    std::env::set_var("PATHDEDUP_ENVTEST_PRECISION", "4");
    std::env::set_var("PATHDEDUP_ENVTEST_SCOPE", "selection");

    let figment = Figment::from(Serialized::defaults(Config::default()))
        .merge(Env::prefixed("PATHDEDUP_ENVTEST_"));
    let config: Config = figment.extract().unwrap();

    assert_eq!(config.precision.digits(), 4);
    assert_eq!(config.scope, ScopeArg::Selection);

    std::env::remove_var("PATHDEDUP_ENVTEST_PRECISION");
    std::env::remove_var("PATHDEDUP_ENVTEST_SCOPE");
}

#[test]
fn test_config_load_from_toml() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(
        &config_path,
        r#"
precision = 0
scope = "document"
parallel_threshold = 32
"#,
    )
    .unwrap();

    let config = Config::load_from_path(Some(&config_path)).unwrap();

    assert_eq!(config.precision.digits(), 0);
    assert_eq!(config.scope, ScopeArg::Document);
    assert_eq!(config.parallel_threshold, 32);
}

#[test]
fn test_config_partial_toml_keeps_defaults() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "precision = 5\n").unwrap();

    let figment =
        Figment::from(Serialized::defaults(Config::default())).merge(Toml::file(&config_path));
    let config: Config = figment.extract().unwrap();

    assert_eq!(config.precision.digits(), 5);
    assert_eq!(config.scope, ScopeArg::Auto);
}

#[test]
fn test_config_invalid_values() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");

    fs::write(&config_path, "scope = \"everything\"\n").unwrap();
    assert!(matches!(
        Config::load_from_path(Some(&config_path)),
        Err(ConfigError::Figment(_))
    ));

    fs::write(&config_path, "parallel_threshold = 0\n").unwrap();
    let err = Config::load_from_path(Some(&config_path)).unwrap_err();
    assert!(err.to_string().contains("parallel_threshold"));
}

#[test]
fn test_config_invalid_toml() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "precision = = 2").unwrap();

    let figment =
        Figment::from(Serialized::defaults(Config::default())).merge(Toml::file(&config_path));
    let result: Result<Config, _> = figment.extract();
    assert!(result.is_err());
}

#[test]
fn test_config_round_trips_through_toml() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");

    let config = Config::default().with_overrides(None, Some(ScopeArg::Selection));
    fs::write(&config_path, config.to_toml().unwrap()).unwrap();

    let saved = fs::read_to_string(&config_path).unwrap();
    assert!(saved.contains("scope = \"selection\""));
    assert_eq!(Config::load_from_path(Some(&config_path)).unwrap(), config);
}
