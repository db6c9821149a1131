//! Unit tests for config module

use tempfile::TempDir;
use unzipall::config::ExtractConfig;
use unzipall::{Config, ShutdownPolicy, ToolKind};

#[test]
fn default_config_has_expected_values() {
    let config = Config::default();
    assert_eq!(config.extract.workers, 20);
    assert_eq!(config.extract.suffix, ".zip");
    assert_eq!(config.extract.tool, "unzip");
    assert_eq!(config.extract.timeout, None);
    assert!(config.extract.extra_args.is_empty());
    assert!(!config.extract.follow_links);
    assert_eq!(config.extract.shutdown, ShutdownPolicy::Detach);
}

#[test]
fn config_serialization_roundtrip() {
    let mut config = Config::default();
    config.extract.timeout = Some(90);
    config.extract.shutdown = ShutdownPolicy::Drain;
    let toml_str = toml::to_string(&config).unwrap();
    let parsed: Config = toml::from_str(&toml_str).unwrap();
    assert_eq!(parsed.extract.timeout, Some(90));
    assert_eq!(parsed.extract.shutdown, ShutdownPolicy::Drain);
    assert_eq!(parsed.extract.workers, config.extract.workers);
}

#[test]
fn partial_extract_section_keeps_defaults() {
    let toml_str = r#"
[extract]
workers = 4
tool = "7z"
extra_args = ["-pSECRET"]
"#;
    let config: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(config.extract.workers, 4);
    assert_eq!(config.extract.tool_kind(), ToolKind::SevenZip);
    assert_eq!(config.extract.extra_args, vec!["-pSECRET".to_string()]);
    assert_eq!(config.extract.suffix, ".zip");
}

#[test]
fn empty_file_is_all_defaults() {
    let config: Config = toml::from_str("").unwrap();
    assert_eq!(config.extract.workers, 20);
}

#[test]
fn unknown_shutdown_policy_fails_to_parse() {
    let toml_str = r#"
[extract]
shutdown = "abort"
"#;
    assert!(toml::from_str::<Config>(toml_str).is_err());
}

#[test]
fn load_from_missing_file_returns_defaults() {
    let temp = TempDir::new().unwrap();
    let config = Config::load_from(&temp.path().join("config.toml")).unwrap();
    assert_eq!(config.extract.workers, 20);
}

#[test]
fn save_to_then_load_from_preserves_values() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("nested/dir/config.toml");
    let config = Config {
        extract: ExtractConfig {
            workers: 6,
            suffix: ".jar".to_string(),
            follow_links: true,
            ..Default::default()
        },
    };

    config.save_to(&path).unwrap();
    let loaded = Config::load_from(&path).unwrap();

    assert_eq!(loaded.extract.workers, 6);
    assert_eq!(loaded.extract.suffix, ".jar");
    assert!(loaded.extract.follow_links);
}

#[test]
fn load_from_rejects_invalid_values() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    std::fs::write(&path, "[extract]\ntimeout = 0\n").unwrap();

    let err = Config::load_from(&path).unwrap_err();
    assert!(err.to_string().contains("Invalid config"));
    assert!(err.to_string().contains("extract.timeout must be > 0"));
}

#[test]
fn load_from_reports_parse_errors_with_path() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    std::fs::write(&path, "[extract\nworkers = ").unwrap();

    let err = Config::load_from(&path).unwrap_err();
    assert!(err.to_string().contains("Failed to parse config file"));
}
