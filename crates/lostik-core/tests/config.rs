//! Loading connection settings from disk

use lostik_core::protocol::{ConnectionConfig, DEFAULT_BAUD_RATE};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use tempfile::TempDir;

fn write_config(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("lostik.json");
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_load_full_config() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"{
    "port_name": "/dev/ttyUSB1",
    "baud_rate": 115200,
    "timeout_ms": 2500
}"#,
    );

    let config = ConnectionConfig::load(&path).unwrap();
    assert_eq!(config.port_name, "/dev/ttyUSB1");
    assert_eq!(config.baud_rate, 115200);
    assert_eq!(config.timeout_ms, 2500);
}

#[test]
fn test_load_partial_config() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, r#"{"port_name": "COM3"}"#);

    let config = ConnectionConfig::load(&path).unwrap();
    assert_eq!(config.port_name, "COM3");
    assert_eq!(config.baud_rate, DEFAULT_BAUD_RATE);
}

#[test]
fn test_save_then_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("saved.json");

    let mut config = ConnectionConfig::new("/dev/ttyUSB0");
    config.timeout_ms = 500;
    config.save(&path).unwrap();

    assert_eq!(ConnectionConfig::load(&path).unwrap(), config);
}

#[test]
fn test_invalid_json() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "port_name = /dev/ttyUSB0");

    let err = ConnectionConfig::load(&path).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidData);
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new().unwrap();
    let err = ConnectionConfig::load(&dir.path().join("absent.json")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}
