//! Integration tests for config loading used by the CLI.
//!
//! Exercises real TOML files through the collector config loader.

use std::fs;

use tempfile::TempDir;

use kubevulndb_collector::CollectorConfig;

#[tokio::test]
async fn loads_valid_config_file() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config_path = temp_dir.path().join("kubevulndb.toml");

    let valid_config = r#"
feed_url = "https://feed.example.test/index.json"
registry_api_url = "https://registry.example.test/api/cve"
registry_page_prefix = "https://registry.example.test/"
exclude_ids = ["CVE-2020-8554"]
request_timeout_secs = 15
max_response_bytes = 1048576
"#;
    fs::write(&config_path, valid_config).expect("should write config");

    let config = CollectorConfig::load(&config_path).await.expect("should load");
    assert_eq!(config.feed_url, "https://feed.example.test/index.json");
    assert_eq!(config.request_timeout_secs, 15);
    assert_eq!(config.exclude_ids, vec!["CVE-2020-8554"]);
}

#[tokio::test]
async fn rejects_invalid_config_values() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config_path = temp_dir.path().join("kubevulndb.toml");

    let invalid_config = r#"
feed_url = "https://feed.example.test/index.json"
registry_api_url = "https://registry.example.test/api/cve"
registry_page_prefix = "https://registry.example.test/"
exclude_ids = []
request_timeout_secs = 0
max_response_bytes = 1048576
"#;
    fs::write(&config_path, invalid_config).expect("should write config");

    assert!(CollectorConfig::load(&config_path).await.is_err());
}

#[tokio::test]
async fn missing_file_is_an_io_error() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let missing = temp_dir.path().join("does-not-exist.toml");

    let result = CollectorConfig::load(&missing).await;
    assert!(matches!(
        result,
        Err(kubevulndb_collector::CollectorError::Io { .. }),
    ));
}
