//! Tests for server configuration loading.

use std::fs;

use tempfile::TempDir;
use tictactoe_core::Mark;
use tictactoe_server::ServerConfig;

fn write_config(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("server.toml");
    fs::write(&path, content).expect("Failed to write TOML");
    path
}

#[test]
fn test_defaults() {
    let config = ServerConfig::default();
    assert_eq!(config.host(), "127.0.0.1");
    assert_eq!(*config.port(), 8080);
    assert_eq!(*config.default_size(), 3);
    assert_eq!(*config.computer_mark(), Mark::O);
    assert!(config.validate().is_ok());
}

#[test]
fn test_load_full_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_config(
        &dir,
        r#"host = "0.0.0.0"
port = 9000
default_size = 4
computer_mark = "X"
"#,
    );

    let config = ServerConfig::from_file(&path).expect("Load failed");
    assert_eq!(config.host(), "0.0.0.0");
    assert_eq!(*config.port(), 9000);
    assert_eq!(*config.default_size(), 4);
    assert_eq!(*config.computer_mark(), Mark::X);
}

#[test]
fn test_missing_keys_take_defaults() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_config(&dir, "port = 3000\n");

    let config = ServerConfig::from_file(&path).expect("Load failed");
    assert_eq!(*config.port(), 3000);
    assert_eq!(config.host(), "127.0.0.1");
    assert_eq!(*config.default_size(), 3);
}

#[test]
fn test_out_of_range_size_rejected() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_config(&dir, "default_size = 12\n");

    let err = ServerConfig::from_file(&path).unwrap_err();
    assert!(err.message.contains("default_size 12"));
}

#[test]
fn test_unreadable_and_malformed_files() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    assert!(ServerConfig::from_file(dir.path().join("missing.toml")).is_err());

    let path = write_config(&dir, "port = \"not a number\"\n");
    let err = ServerConfig::from_file(&path).unwrap_err();
    assert!(err.message.starts_with("Failed to parse config"));
}

#[test]
fn test_cli_overrides() {
    let config = ServerConfig::default().with_overrides(Some("::1".to_string()), Some(1234));
    assert_eq!(config.host(), "::1");
    assert_eq!(*config.port(), 1234);

    let config = ServerConfig::default().with_overrides(None, None);
    assert_eq!(config, ServerConfig::default());
}
