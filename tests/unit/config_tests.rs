// Configuration module unit tests

use imgate::config::*;
use imgate::image::{Color, ResizeFilter, Size};
use std::io::Write;

const MINIMAL: &str = r#"
server:
  address: "127.0.0.1"
  port: 8080
proxy:
  url: "http://origin.local"
"#;

#[test]
fn test_minimal_config_uses_defaults() {
    let config = Config::from_yaml_with_env(MINIMAL).expect("Failed to parse config");

    assert_eq!(config.server.threads, 4);
    assert!(!config.server.access_log);
    assert_eq!(config.proxy.timeout, 1000);
    assert_eq!(config.proxy.max_requests, 1000);
    assert_eq!(config.image.background, Color::new(255, 255, 255));
    assert_eq!(config.image.jpeg_quality, 75);
    assert_eq!(config.image.contain_filter, ResizeFilter::Nearest);
    assert_eq!(config.stats.period, 300);
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.format, LoggingFormat::Json);
    assert!(config.logging.remote_endpoint.is_none());
    assert!(config.watermark.is_none());
    assert!(config.validate().is_ok());
}

#[test]
fn test_full_config() {
    let yaml = r#"
server:
  address: "0.0.0.0"
  port: 9000
  threads: 8
  access_log: true
proxy:
  url: "https://cdn.example.com/media"
  timeout: 2500
  max_requests: 64
image:
  background: "0,0,0"
  jpeg_quality: 90
  contain_filter: lanczos3
watermark:
  path: /srv/marks
  file_white_big: wb.png
  file_white_small: ws.png
  file_black_big: bb.png
  file_black_small: bs.png
  margin: 12
  size_threshold: 400x300
  color_threshold: "180,180,180"
stats:
  period: 60
logging:
  level: debug
  format: pretty
  remote_endpoint: "http://collector:4317"
"#;
    let config = Config::from_yaml_with_env(yaml).expect("Failed to parse config");

    assert_eq!(config.server.listen_addr(), "0.0.0.0:9000");
    assert!(config.server.access_log);
    assert_eq!(config.proxy.timeout_duration().as_millis(), 2500);
    assert_eq!(config.image.background, Color::new(0, 0, 0));
    assert_eq!(config.image.contain_filter, ResizeFilter::Lanczos3);

    let watermark = config.watermark.as_ref().unwrap();
    assert_eq!(watermark.margin, 12);
    assert_eq!(watermark.size_threshold, Size::new(400, 300));
    assert_eq!(watermark.color_threshold, Color::new(180, 180, 180));
    assert_eq!(watermark.filenames(), ["wb.png", "ws.png", "bb.png", "bs.png"]);

    assert_eq!(config.stats.period, 60);
    assert_eq!(config.logging.format, LoggingFormat::Pretty);
    assert!(config.validate().is_ok());
}

#[test]
fn test_env_var_substitution() {
    std::env::set_var("IMGATE_TEST_ORIGIN", "http://from-env.local");
    let yaml = r#"
server:
  address: "127.0.0.1"
  port: 8080
proxy:
  url: "${IMGATE_TEST_ORIGIN}"
"#;
    let config = Config::from_yaml_with_env(yaml).expect("Failed to parse config");
    assert_eq!(config.proxy.url, "http://from-env.local");
}

#[test]
fn test_missing_env_var_is_an_error() {
    let yaml = r#"
server:
  address: "127.0.0.1"
  port: 8080
proxy:
  url: "${IMGATE_TEST_DEFINITELY_UNSET}"
"#;
    let err = Config::from_yaml_with_env(yaml).unwrap_err();
    assert!(err.contains("IMGATE_TEST_DEFINITELY_UNSET"));
}

#[test]
fn test_missing_proxy_section_fails() {
    let yaml = r#"
server:
  address: "127.0.0.1"
  port: 8080
"#;
    assert!(Config::from_yaml_with_env(yaml).is_err());
}

#[test]
fn test_invalid_origin_scheme_fails_validation() {
    let yaml = MINIMAL.replace("http://origin.local", "ftp://origin.local");
    let config = Config::from_yaml_with_env(&yaml).unwrap();
    assert!(config.validate().is_err());
}

#[test]
fn test_zero_timeout_fails_validation() {
    let yaml = format!("{}  timeout: 0\n", MINIMAL);
    let config = Config::from_yaml_with_env(&yaml).unwrap();
    assert!(config.validate().is_err());
}

#[test]
fn test_zero_stats_period_fails_validation() {
    let yaml = format!("{}stats:\n  period: 0\n", MINIMAL);
    let config = Config::from_yaml_with_env(&yaml).unwrap();
    assert!(config.validate().is_err());
}

#[test]
fn test_bad_background_fails_to_parse() {
    let yaml = format!("{}image:\n  background: \"300,0,0\"\n", MINIMAL);
    assert!(Config::from_yaml_with_env(&yaml).is_err());
}

#[test]
fn test_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(MINIMAL.as_bytes()).unwrap();

    let config = Config::from_file(file.path()).expect("Failed to load config file");
    assert_eq!(config.server.port, 8080);
}

#[test]
fn test_from_missing_file() {
    assert!(Config::from_file("/nonexistent/imgate.yaml").is_err());
}
