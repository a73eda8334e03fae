//! Integration tests for configuration loading

use signcoach::infra::Config;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_load_config_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();

    let config_content = r#"
[session]
id = "test-session"

[geometry]
extension_margin = 0.2
touch_radius = 0.05

[recognition]
precision_threshold = 0.9
similarity_falloff = 1.5

[references]
dir = "/tmp/test-references"

[metrics]
interval_secs = 30
"#;

    temp_file.write_all(config_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = Config::from_file(temp_file.path()).unwrap();

    assert_eq!(config.session_id(), "test-session");
    assert_eq!(config.extension_margin(), 0.2);
    assert_eq!(config.touch_radius(), 0.05);
    assert_eq!(config.precision_threshold(), 0.9);
    assert_eq!(config.similarity_falloff(), 1.5);
    assert_eq!(config.references_dir(), "/tmp/test-references");
    assert_eq!(config.metrics_interval_secs(), 30);
}

#[test]
fn test_partial_config_uses_section_defaults() {
    let mut temp_file = NamedTempFile::new().unwrap();

    // Only the session section present; everything else defaulted
    temp_file.write_all(b"[session]\nid = \"partial\"\n").unwrap();
    temp_file.flush().unwrap();

    let config = Config::from_file(temp_file.path()).unwrap();

    assert_eq!(config.session_id(), "partial");
    assert_eq!(config.extension_margin(), 0.15);
    assert_eq!(config.touch_radius(), 0.08);
    assert_eq!(config.normalize_epsilon(), 0.001);
    assert_eq!(config.precision_threshold(), 0.85);
    assert_eq!(config.fallback_similarity(), 0.5);
}

#[test]
fn test_load_from_path_fallback() {
    // A missing file falls back to defaults instead of failing
    let config = Config::load_from_path("/nonexistent/path/config.toml");
    assert_eq!(config.session_id(), "signcoach");
    assert_eq!(config.precision_threshold(), 0.85);
    assert_eq!(config.config_file(), "default");
}

#[test]
fn test_unparseable_config_falls_back() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"this is not toml {{{{").unwrap();
    temp_file.flush().unwrap();

    let config = Config::load_from_path(temp_file.path().to_str().unwrap());
    assert_eq!(config.session_id(), "signcoach");
}
