//! End-to-end tests: source lines → store → dashboard views.

use lab_telemetry::classify::{ActuatorAction, Status};
use lab_telemetry::metrics::average;
use lab_telemetry::sampling::{chart_series, table_rows};
use lab_telemetry::source::{parse_line, SourceEvent};
use lab_telemetry::{DashboardView, Field, MonitorConfig, Reading, ReadingStore};
use time::macros::datetime;
use time::Duration;

// ── Helpers ────────────────────────────────────────────────────

fn reading_at(minute: i64, temperature: f32, humidity: f32) -> Reading {
    let ts = datetime!(2024-05-01 08:00 UTC) + Duration::minutes(minute);
    let label = format!("{:02}:{:02}", ts.hour(), ts.minute());
    Reading::new(ts, label, temperature, humidity)
}

fn apply(store: &mut ReadingStore, line: &str) {
    match parse_line(line).unwrap() {
        Some(SourceEvent::Reading(r)) => store.append(r),
        Some(SourceEvent::Disconnected) => store.mark_disconnected(),
        other => panic!("unexpected event {:?}", other),
    }
}

fn default_config() -> MonitorConfig {
    MonitorConfig::from_lookup(|_| None).unwrap()
}

// ── Properties ─────────────────────────────────────────────────

#[test]
fn invalid_readings_never_surface() {
    let history = vec![
        reading_at(0, -50.0, 50.0),
        reading_at(10, 100.0, 50.0),
        reading_at(20, 20.0, -1.0),
        reading_at(30, 20.0, 100.5),
        reading_at(40, f32::NAN, 50.0),
        reading_at(50, 20.0, f32::NEG_INFINITY),
    ];

    assert!(chart_series(&history).is_empty());
    assert!(table_rows(&history, 10).is_empty());
}

#[test]
fn off_cadence_readings_never_surface() {
    let history: Vec<Reading> = (1..10).map(|m| reading_at(m, 22.0, 50.0)).collect();

    assert!(chart_series(&history).is_empty());
    assert!(table_rows(&history, 10).is_empty());
}

#[test]
fn classification_boundaries() {
    let history = vec![
        reading_at(0, 25.0, 50.0),
        reading_at(10, 25.01, 50.0),
        reading_at(20, 26.01, 50.0),
    ];
    let rows = table_rows(&history, 10);

    assert_eq!(rows[2].status, Status::Normal);
    assert_eq!(rows[2].actuator_action, ActuatorAction::Standby);
    assert_eq!(rows[1].status, Status::Caution);
    assert_eq!(rows[1].actuator_action, ActuatorAction::ActiveCooling);
    assert_eq!(rows[0].status, Status::Warning);
}

#[test]
fn empty_average_is_no_data() {
    assert_eq!(average(Field::Temperature, &[]), None);
    assert_eq!(average(Field::Humidity, &[]), None);
}

#[test]
fn table_keeps_ten_most_recent() {
    // 15 qualifying samples with a raw reading in between each
    let mut history = Vec::new();
    for i in 0..15 {
        history.push(reading_at(i * 10, 20.0 + i as f32, 50.0));
        history.push(reading_at(i * 10 + 3, 99.0, 50.0));
    }

    let rows = table_rows(&history, 10);
    assert_eq!(rows.len(), 10);
    for (i, row) in rows.iter().enumerate() {
        assert_eq!(row.index, i);
        assert_eq!(row.temperature, 20.0 + (14 - i) as f32);
    }
}

#[test]
fn chart_series_is_idempotent() {
    let mut store = ReadingStore::new(100);
    for m in 0..45 {
        store.append(reading_at(m, 21.0 + m as f32 / 10.0, 55.0));
    }

    let snapshot = store.snapshot();
    assert_eq!(chart_series(&snapshot), chart_series(&snapshot));
    assert_eq!(chart_series(&snapshot).len(), 5);
}

#[test]
fn end_to_end_from_source_lines() {
    let config = default_config();
    let mut store = ReadingStore::new(config.history_capacity());

    apply(&mut store, "reading,2024-05-01T10:10:00Z,27.5,65");
    apply(&mut store, "reading,2024-05-01T10:11:00Z,30,70");

    let view = DashboardView::compute(&store, &config);
    assert_eq!(view.chart.len(), 1);
    assert_eq!(view.chart[0].time_label, "10:10");
    assert_eq!(view.chart[0].temperature, 27.5);

    assert_eq!(view.table.len(), 1);
    assert_eq!(view.table[0].status, Status::Warning);
    assert_eq!(view.table[0].actuator_action, ActuatorAction::ActiveCooling);

    // Rolling stats use raw readings, including the off-cadence one
    assert_eq!(view.rolling.avg_temperature, Some(28.75));
    assert_eq!(view.rolling.avg_humidity, Some(67.5));
    assert_eq!(view.current.as_ref().map(|r| r.temperature), Some(30.0));

    apply(&mut store, "disconnected");
    let stale = DashboardView::compute(&store, &config);
    assert!(!stale.connected);
    assert_eq!(stale.table, view.table);
}

#[test]
fn history_bound_is_enforced() {
    let mut store = ReadingStore::new(12);
    for m in 0..50 {
        store.append(reading_at(m, 20.0, 50.0));
        assert!(store.snapshot().len() <= 12);
    }

    let snapshot = store.snapshot();
    assert_eq!(snapshot.len(), 12);
    assert_eq!(snapshot[0].time_label, "08:38");
    assert_eq!(snapshot[11].time_label, "08:49");
}

#[test]
fn day_chart_at_minute_cadence() {
    let config = default_config();
    let mut store = ReadingStore::new(config.history_capacity());
    for m in 0..config.history_capacity() as i64 {
        store.append(reading_at(m, 24.0 + (m % 10) as f32 / 10.0, 60.0));
    }

    let view = DashboardView::compute(&store, &config);
    assert_eq!(view.chart.len(), 144);
    assert_eq!(view.chart[0].time_label, "08:00");
    assert_eq!(view.sample_stats.samples, 144);
    assert_eq!(view.sample_stats.avg_temperature, Some(24.0));
    assert!(view.rolling.avg_temperature.unwrap() > 24.0);
}
