use dynorder_config::{ConfigLoadError, ConfigLoader, EnvConfig};
use dynorder_core::{FieldMatching, SortOrder, TextCollation};
use std::fs;
use tempfile::TempDir;

fn write_config(dir: &TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("dynorder.toml");
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn defaults_apply_without_file_or_env() {
    let load = ConfigLoader::new()
        .load_with_env(EnvConfig::default())
        .unwrap();

    assert_eq!(load.config.field_matching, FieldMatching::IgnoreCase);
    assert_eq!(load.config.text_collation, TextCollation::Ordinal);
    assert_eq!(load.config.default_order, SortOrder::Ascending);
    assert_eq!(load.config.max_clauses, 8);
    assert!(!load.metadata.env_file_loaded);
}

#[test]
fn file_overrides_defaults() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
[ordering]
field_matching = "exact"
default_order = "descending"
"#,
    );

    let load = ConfigLoader::new()
        .with_config_path(&path)
        .load_with_env(EnvConfig::default())
        .unwrap();

    assert_eq!(load.config.field_matching, FieldMatching::Exact);
    assert_eq!(load.config.default_order, SortOrder::Descending);
    assert_eq!(load.config.max_clauses, 8);
    assert_eq!(load.metadata.config_path.as_deref(), Some(path.as_path()));
}

#[test]
fn env_overrides_file() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
[ordering]
text_collation = "ordinal"
max_clauses = 4
"#,
    );

    let env = EnvConfig {
        config_path: Some(path.clone()),
        text_collation: Some(TextCollation::CaseInsensitive),
        ..EnvConfig::default()
    };
    let load = ConfigLoader::new().load_with_env(env).unwrap();

    assert_eq!(load.config.text_collation, TextCollation::CaseInsensitive);
    assert_eq!(load.config.max_clauses, 4);
    assert_eq!(load.metadata.config_path, Some(path));
}

#[test]
fn explicit_path_beats_env_path() {
    let dir = TempDir::new().unwrap();
    let explicit = write_config(&dir, "[ordering]\nmax_clauses = 2\n");

    let env = EnvConfig {
        config_path: Some(dir.path().join("elsewhere.toml")),
        ..EnvConfig::default()
    };
    let load = ConfigLoader::new()
        .with_config_path(&explicit)
        .load_with_env(env)
        .unwrap();

    assert_eq!(load.config.max_clauses, 2);
}

#[test]
fn missing_explicit_path_is_an_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.toml");

    let err = ConfigLoader::new()
        .with_config_path(&missing)
        .load_with_env(EnvConfig::default())
        .unwrap_err();
    assert!(matches!(err, ConfigLoadError::MissingConfig { ref path } if *path == missing));

    let env = EnvConfig {
        config_path: Some(missing.clone()),
        ..EnvConfig::default()
    };
    let err = ConfigLoader::new().load_with_env(env).unwrap_err();
    assert!(matches!(err, ConfigLoadError::MissingConfig { .. }));
}

#[test]
fn malformed_file_reports_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[ordering]\nfield_matching = \"fuzzy\"\n");

    let err = ConfigLoader::new()
        .with_config_path(&path)
        .load_with_env(EnvConfig::default())
        .unwrap_err();
    assert!(matches!(err, ConfigLoadError::Parse { .. }));
}

#[test]
fn zero_max_clauses_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[ordering]\nmax_clauses = 0\n");

    let err = ConfigLoader::new()
        .with_config_path(&path)
        .load_with_env(EnvConfig::default())
        .unwrap_err();
    assert!(matches!(
        err,
        ConfigLoadError::Invalid(dynorder_core::OrderError::InvalidConfig(_))
    ));
}

#[test]
fn env_file_seeds_the_process_environment() {
    let dir = TempDir::new().unwrap();
    let env_file = dir.path().join(".env");
    fs::write(&env_file, "DYNORDER_MAX_CLAUSES=3\n").unwrap();

    let load = ConfigLoader::new()
        .with_config_path(write_config(&dir, "[ordering]\n"))
        .with_env_file(&env_file)
        .load()
        .unwrap();

    assert!(load.metadata.env_file_loaded);
    assert_eq!(load.config.max_clauses, 3);
}

#[test]
fn missing_explicit_env_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("absent.env");

    let err = ConfigLoader::new()
        .with_config_path(write_config(&dir, "[ordering]\n"))
        .with_env_file(&missing)
        .load()
        .unwrap_err();
    assert!(matches!(err, ConfigLoadError::MissingEnvFile { ref path } if *path == missing));
}
