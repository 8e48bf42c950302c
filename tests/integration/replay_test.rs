use momentum_tracker::momentum::{Alert, AlertKind, MomentumDetector};
use momentum_tracker::screener::{ReplayScreener, UniverseFilter};
use momentum_tracker::sink::{AlertSink, ConsoleSink};
use momentum_tracker::snapshot::Snapshot;
use momentum_tracker::tracker::{shutdown_channel, RunSummary, Tracker, TrackerSettings};
use std::path::Path;
use std::time::Duration;

#[derive(Default)]
struct CollectingSink {
    emitted: Vec<Vec<Alert>>,
}

impl AlertSink for CollectingSink {
    fn emit(&mut self, alerts: &[Alert], _snapshot: &Snapshot) -> anyhow::Result<()> {
        self.emitted.push(alerts.to_vec());
        Ok(())
    }
}

fn write_captures(dir: &Path) {
    std::fs::write(
        dir.join("raw_data_20240301_143000.json"),
        r#"{
            "timestamp": "2024-03-01T14:30:00Z",
            "records": [
                {"name": "AAA", "close": 3.0, "volume": 5000000, "change|5": 1.0, "exchange": "NASDAQ"},
                {"name": "BBB", "close": 2.0, "volume": 4000000, "change|5": 0.5, "exchange": "NYSE"},
                {"name": "CCC", "close": 1.0, "volume": 3000000, "change|5": 0.2, "exchange": "AMEX"}
            ]
        }"#,
    )
    .unwrap();
    std::fs::write(dir.join("raw_data_20240301_143200.json"), "{not json").unwrap();
    std::fs::write(
        dir.join("raw_data_20240301_143400.json"),
        r#"{
            "timestamp": "2024-03-01T14:34:00Z",
            "records": [
                {"name": "CCC", "close": 1.3, "volume": 9000000, "change|5": 2.0, "exchange": "AMEX"},
                {"name": "PINK", "close": 0.1, "volume": 8000000, "change|5": 90.0, "exchange": "OTC"},
                {"name": "AAA", "close": 3.0, "volume": 5000000, "change|5": 1.0, "exchange": "NASDAQ"},
                {"name": "BIG", "close": 80.0, "volume": 4500000, "change|5": 12.0, "exchange": "NYSE"},
                {"name": "BBB", "close": 2.0, "volume": 4000000, "change|5": 0.5, "exchange": "NYSE"}
            ]
        }"#,
    )
    .unwrap();
}

fn fast_settings() -> TrackerSettings {
    TrackerSettings {
        monitor_interval: Duration::ZERO,
        retry_delay: Duration::ZERO,
        max_history: 10,
    }
}

#[tokio::test]
async fn test_replay_directory_until_exhausted() {
    let dir = tempfile::tempdir().unwrap();
    write_captures(dir.path());

    let screener = ReplayScreener::from_dir(dir.path(), UniverseFilter::default()).unwrap();
    let mut tracker = Tracker::new(
        screener,
        CollectingSink::default(),
        MomentumDetector::with_defaults(),
        fast_settings(),
    );

    let (_tx, rx) = shutdown_channel();
    let summary = tracker.run(rx).await;

    assert_eq!(
        summary,
        RunSummary {
            ticks: 3,
            compared: 2,
            failed: 1,
            rejected: 0,
            alerts: 2,
        }
    );
    assert_eq!(tracker.history().len(), 2);

    // OTC and over-priced rows never reach the detector
    let last = tracker.sink().emitted.last().unwrap();
    let kinds: Vec<(AlertKind, &str)> = last.iter().map(|a| (a.kind(), a.ticker())).collect();
    assert_eq!(
        kinds,
        vec![(AlertKind::VolumeClimber, "CCC"), (AlertKind::PriceSpike, "CCC")]
    );
}

#[tokio::test]
async fn test_replay_renders_console_report() {
    let dir = tempfile::tempdir().unwrap();
    write_captures(dir.path());

    let screener = ReplayScreener::from_dir(dir.path(), UniverseFilter::default()).unwrap();
    let mut tracker = Tracker::new(
        screener,
        ConsoleSink::new(Vec::new(), 5),
        MomentumDetector::with_defaults(),
        fast_settings(),
    );

    let (_tx, rx) = shutdown_channel();
    tracker.run(rx).await;
    let report = String::from_utf8(tracker.into_sink().into_inner()).unwrap();

    // The undecodable capture produces no report
    assert_eq!(report.matches("MOMENTUM ALERTS - ").count(), 2);
    assert!(report.contains("MOMENTUM ALERTS - 14:30:00 (3 tickers)"));
    assert!(report.contains("MOMENTUM ALERTS - 14:34:00 (3 tickers)"));
    assert_eq!(report.matches("No significant momentum detected this cycle.").count(), 1);

    assert!(report.contains("VOLUME CLIMBERS (1 found):"));
    assert!(report.contains("Rank:   3 ->   1 (+ 2)"));
    assert!(report.contains("PRICE SPIKES (1 found):"));
    assert!(report.contains("9,000,000"));
    assert!(!report.contains("NEW HIGH VOLUME"));
    assert!(!report.contains("PINK"));
    assert!(!report.contains("BIG"));
}

#[tokio::test]
async fn test_shutdown_stops_follow_mode() {
    let dir = tempfile::tempdir().unwrap();
    write_captures(dir.path());

    let screener = ReplayScreener::follow_dir(dir.path(), UniverseFilter::default());
    let mut tracker = Tracker::new(
        screener,
        CollectingSink::default(),
        MomentumDetector::with_defaults(),
        TrackerSettings {
            monitor_interval: Duration::from_millis(5),
            retry_delay: Duration::from_millis(5),
            max_history: 10,
        },
    );

    let (tx, rx) = shutdown_channel();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        let _ = tx.send(true);
    });

    let summary = tracker.run(rx).await;
    assert!(summary.ticks >= 1);
    // Only the newest capture is served; nothing newer ever arrives
    assert_eq!(summary.compared, 1);
    assert_eq!(tracker.history().len(), 1);
}
