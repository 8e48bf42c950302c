use momentum_tracker::config::{Config, LogFormatConfig};
use momentum_tracker::momentum::Thresholds;
use momentum_tracker::tracker::TrackerSettings;
use std::time::Duration;

#[test]
fn test_example_config_matches_defaults() {
    let config: Config = toml::from_str(include_str!("../../config.toml.example")).unwrap();
    let defaults = Config::default();

    assert_eq!(config.screener.data_dir, defaults.screener.data_dir);
    assert_eq!(config.screener.exclude_exchanges, vec!["OTC".to_string()]);
    assert_eq!(
        Thresholds::from(&config.detector),
        Thresholds::from(&defaults.detector)
    );
    assert_eq!(
        TrackerSettings::from(&config.tracker),
        TrackerSettings::default()
    );
    assert_eq!(config.sink.top_n, 5);
    assert_eq!(config.telemetry.log_format, LogFormatConfig::Pretty);
    assert!(config.telemetry.metrics_port.is_none());
}

#[test]
fn test_load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
        [tracker]
        monitor_interval_secs = 15

        [telemetry]
        log_format = "json"
        metrics_port = 9100
        "#,
    )
    .unwrap();

    let config = Config::load(&path).unwrap();
    let settings = TrackerSettings::from(&config.tracker);
    assert_eq!(settings.monitor_interval, Duration::from_secs(15));
    assert_eq!(settings.retry_delay, Duration::from_secs(30));
    assert_eq!(config.telemetry.log_format, LogFormatConfig::Json);
    assert_eq!(config.telemetry.metrics_port, Some(9100));
}
