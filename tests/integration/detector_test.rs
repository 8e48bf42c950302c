use chrono::{TimeZone, Utc};
use momentum_tracker::momentum::{
    Alert, AlertKind, DetectorInputError, MomentumDetector, SnapshotSide, Thresholds,
};
use momentum_tracker::snapshot::{HistoryWindow, Row, Snapshot};

fn snapshot(minute: u32, rows: Vec<Row>) -> Snapshot {
    Snapshot::new(Utc.with_ymd_and_hms(2024, 3, 1, 14, minute, 0).unwrap(), rows)
}

fn quiet(ticker: &str, rank: u32) -> Row {
    Row::new(ticker, rank, 1_000_000.0, 3.0, 1.0)
}

fn kinds(alerts: &[Alert]) -> Vec<(AlertKind, &str)> {
    alerts.iter().map(|a| (a.kind(), a.ticker())).collect()
}

#[test]
fn test_full_cycle_through_history_window() {
    let detector = MomentumDetector::with_defaults();
    let mut history = HistoryWindow::new(3);

    let baseline = snapshot(0, vec![quiet("AAA", 1), quiet("BBB", 2), quiet("CCC", 60)]);
    let alerts = detector.detect(history.latest(), &baseline).unwrap();
    assert!(alerts.is_empty());
    history.push(baseline);

    let next = snapshot(
        2,
        vec![
            quiet("CCC", 1),
            quiet("AAA", 2),
            quiet("BBB", 3),
            Row::new("DDD", 4, 800_000.0, 2.0, 14.0),
        ],
    );
    let alerts = detector.detect(history.latest(), &next).unwrap();
    assert_eq!(
        kinds(&alerts),
        vec![
            (AlertKind::VolumeClimber, "CCC"),
            (AlertKind::NewHighVolume, "CCC"),
            (AlertKind::NewHighVolume, "DDD"),
            (AlertKind::PriceSpike, "DDD"),
        ]
    );
    history.push(next);

    match &alerts[0] {
        Alert::VolumeClimber(c) => {
            assert_eq!(c.previous_rank, 60);
            assert_eq!(c.current_rank, 1);
            assert_eq!(c.rank_delta, 59);
        }
        other => panic!("expected climber, got {other:?}"),
    }
    match &alerts[1] {
        Alert::NewHighVolume(n) => assert_eq!(n.previous_rank, Some(60)),
        other => panic!("expected newcomer, got {other:?}"),
    }
    assert_eq!(history.len(), 2);
}

#[test]
fn test_price_delta_spike_against_previous_close() {
    let detector = MomentumDetector::with_defaults();
    let previous = snapshot(0, vec![Row::new("AAA", 1, 1_000_000.0, 2.00, 1.0)]);
    let current = snapshot(2, vec![Row::new("AAA", 1, 1_200_000.0, 2.20, 1.0)]);

    let alerts = detector.detect(Some(&previous), &current).unwrap();
    assert_eq!(kinds(&alerts), vec![(AlertKind::PriceSpike, "AAA")]);
    match &alerts[0] {
        Alert::PriceSpike(s) => {
            let delta = s.price_change_pct.unwrap();
            assert!((delta - 10.0).abs() < 1e-9);
        }
        other => panic!("expected spike, got {other:?}"),
    }
}

#[test]
fn test_custom_thresholds() {
    let detector = MomentumDetector::new(Thresholds {
        top_k_for_newcomer: 2,
        min_rank_improvement: 5,
        change_pct_threshold: 50.0,
        price_delta_pct_threshold: 50.0,
    });
    let previous = snapshot(0, vec![quiet("AAA", 1), quiet("BBB", 2), quiet("CCC", 8)]);
    let current = snapshot(
        2,
        vec![
            quiet("BBB", 1),
            quiet("CCC", 2),
            quiet("AAA", 3),
            Row::new("DDD", 4, 500_000.0, 3.0, 20.0),
        ],
    );

    let alerts = detector.detect(Some(&previous), &current).unwrap();
    // BBB only climbs one rank and DDD lands outside the top two
    assert_eq!(
        kinds(&alerts),
        vec![
            (AlertKind::VolumeClimber, "CCC"),
            (AlertKind::NewHighVolume, "CCC"),
        ]
    );
}

#[test]
fn test_duplicate_ticker_rejected() {
    let detector = MomentumDetector::with_defaults();
    let previous = snapshot(0, vec![quiet("AAA", 1), quiet("AAA", 2)]);
    let current = snapshot(2, vec![quiet("AAA", 1)]);

    let err = detector.detect(Some(&previous), &current).unwrap_err();
    assert!(matches!(
        err,
        DetectorInputError::DuplicateTicker { ref ticker, side: SnapshotSide::Previous } if ticker == "AAA"
    ));
}

#[test]
fn test_alerts_serialize_with_kind_tag() {
    let detector = MomentumDetector::with_defaults();
    let previous = snapshot(0, vec![quiet("AAA", 1)]);
    let current = snapshot(2, vec![Row::new("AAA", 1, 1_000_000.0, 3.0, 9.5)]);

    assert!(detector.detect(None, &current).unwrap().is_empty());
    let alerts = detector.detect(Some(&previous), &current).unwrap();
    let json = serde_json::to_value(&alerts).unwrap();
    assert_eq!(json[0]["kind"], "price_spike");
    assert_eq!(json[0]["ticker"], "AAA");
}
