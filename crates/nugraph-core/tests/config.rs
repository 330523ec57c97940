use std::path::{Path, PathBuf};

use nugraph_core::config::{Config, ImageFormat, NUGET_FLAT_CONTAINER_URL};

#[test]
fn test_config_defaults_from_empty_toml() {
    let config = Config::from_str("").unwrap();
    assert_eq!(config.max_depth(), nugraph_core::DEFAULT_MAX_DEPTH);
    assert_eq!(config.format(), ImageFormat::Png);
    assert_eq!(config.java(), "java");
    assert_eq!(config.registry.url, NUGET_FLAT_CONTAINER_URL);
    assert_eq!(config.registry.retries, 3);
    assert!(config.registry.local_feed.is_none());
}

#[test]
fn test_config_parse_full() {
    let toml = r#"
package = "Newtonsoft.Json"
version = "13.0.1"
max-depth = 3
output = "out/graph.svg"
visualizer-path = "/opt/plantuml.jar"
format = "svg"
framework = "net8.0"

[registry]
url = "https://nuget.example.com/flat"
local-feed = "./packages"
timeout-secs = 5
retries = 1
"#;
    let config = Config::from_str(toml).unwrap();
    let root = config.root().unwrap();
    assert_eq!(root.name(), "Newtonsoft.Json");
    assert_eq!(root.version(), "13.0.1");
    assert_eq!(config.max_depth(), 3);
    assert_eq!(config.format(), ImageFormat::Svg);
    assert_eq!(config.framework.as_deref(), Some("net8.0"));
    assert_eq!(config.registry.url, "https://nuget.example.com/flat");
    assert_eq!(
        config.registry.local_feed.as_deref(),
        Some(Path::new("./packages"))
    );
    assert_eq!(config.registry.timeout_secs, 5);
    assert_eq!(
        config.visualizer_path().unwrap(),
        Path::new("/opt/plantuml.jar")
    );
}

#[test]
fn test_config_script_defaults_next_to_output() {
    let config = Config::from_str(r#"output = "out/graph.png""#).unwrap();
    assert_eq!(config.output_path(), PathBuf::from("out/graph.png"));
    assert_eq!(config.script_path(), PathBuf::from("out/graph.puml"));
}

#[test]
fn test_config_default_output_follows_format() {
    let config = Config::from_str(r#"format = "svg""#).unwrap();
    assert_eq!(config.output_path(), PathBuf::from("dependencies.svg"));
}

#[test]
fn test_config_root_requires_package_and_version() {
    let config = Config::from_str(r#"package = "Serilog""#).unwrap();
    let err = config.root().unwrap_err();
    assert!(err.to_string().contains("version"), "got: {err}");
}

#[test]
fn test_config_missing_visualizer_is_error() {
    let config = Config::default();
    assert!(config.visualizer_path().is_err());
}

#[test]
fn test_config_malformed_is_error() {
    let err = Config::from_str("max-depth = \"deep\"").unwrap_err();
    assert!(err.to_string().contains("Config error"), "got: {err}");
}

#[test]
fn test_config_load_missing_file_is_default() {
    let tmp = tempfile::tempdir().unwrap();
    let config = Config::load(&tmp.path().join("nugraph.toml")).unwrap();
    assert!(config.package.is_none());
}

#[test]
fn test_config_load_from_file() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("nugraph.toml");
    std::fs::write(&path, "package = \"Serilog\"\nversion = \"2.10.0\"\n").unwrap();
    let config = Config::load(&path).unwrap();
    assert_eq!(config.root().unwrap().to_string(), "Serilog 2.10.0");
}

#[test]
fn test_config_accepts_snake_case_keys() {
    let toml = r#"
package_name = "Serilog"
version = "2.10.0"
visualizer_path = "/opt/plantuml.jar"
output_path = "graph.png"
"#;
    let config = Config::from_str(toml).unwrap();
    assert_eq!(config.package.as_deref(), Some("Serilog"));
    assert_eq!(
        config.visualizer_path().unwrap(),
        Path::new("/opt/plantuml.jar")
    );
    assert_eq!(config.output_path(), PathBuf::from("graph.png"));
}
