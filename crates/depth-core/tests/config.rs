use depth_core::config::{dirs_path, GlobalConfig};

#[test]
fn test_global_config_default_jobs_nonzero() {
    let config = GlobalConfig::default();
    assert!(config.resolve.jobs > 0, "jobs should be > 0");
}

#[test]
fn test_global_config_default_is_unbounded_and_external_only() {
    let config = GlobalConfig::default();
    assert!(!config.resolve.internal);
    assert!(!config.resolve.test);
    assert_eq!(config.resolve.max_depth, 0);
}

#[test]
fn test_global_config_default_importer_uses_go() {
    let config = GlobalConfig::default();
    assert_eq!(config.importer.go, "go");
    assert!(config.importer.index.is_none());
}

#[test]
fn test_global_config_empty_toml_applies_defaults() {
    let config: GlobalConfig = toml::from_str("").unwrap();
    assert!(config.resolve.jobs > 0);
    assert_eq!(config.importer.go, "go");
}

#[test]
fn test_dirs_path_contains_depth() {
    let path = dirs_path();
    assert!(path.ends_with(".depth"));
}

#[test]
fn test_global_config_parse_from_toml() {
    let toml = r#"
[resolve]
internal = true
test = true
max-depth = 3
jobs = 2

[importer]
go = "/usr/local/go/bin/go"
index = "/tmp/modules.toml"
"#;
    let config: GlobalConfig = toml::from_str(toml).unwrap();
    assert!(config.resolve.internal);
    assert!(config.resolve.test);
    assert_eq!(config.resolve.max_depth, 3);
    assert_eq!(config.resolve.jobs, 2);
    assert_eq!(config.importer.go, "/usr/local/go/bin/go");
    assert_eq!(
        config.importer.index.as_deref(),
        Some(std::path::Path::new("/tmp/modules.toml"))
    );
}

#[test]
fn test_load_from_missing_file_returns_defaults() {
    let tmp = tempfile::TempDir::new().unwrap();
    let config = GlobalConfig::load_from(&tmp.path().join("config.toml")).unwrap();
    assert_eq!(config.resolve.max_depth, 0);
}

#[test]
fn test_load_from_malformed_file_is_config_error() {
    let tmp = tempfile::TempDir::new().unwrap();
    let path = tmp.path().join("config.toml");
    std::fs::write(&path, "[resolve\nmax-depth = ").unwrap();
    let err = GlobalConfig::load_from(&path).unwrap_err();
    assert!(err.to_string().starts_with("Config error"), "got: {err}");
}
