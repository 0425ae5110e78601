// SPDX-FileCopyrightText: 2026 Tok Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the session and price override stores.

use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use indexmap::IndexMap;
use tok_cost::{CostTracker, ManualClock, ModelPrice};
use tok_storage::{PriceOverrideStore, SessionStore};

fn clock() -> Arc<ManualClock> {
    let start = DateTime::parse_from_rfc3339("2026-05-01T08:30:00.5Z")
        .unwrap()
        .with_timezone(&Utc);
    Arc::new(ManualClock::new(start))
}

fn price(prompt: f64, completion: f64) -> ModelPrice {
    ModelPrice::new(prompt, completion).unwrap()
}

#[test]
fn session_missing_file_starts_fresh() {
    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::new(dir.path());
    assert!(store.load().is_none());
    assert!(store.load_tracker().is_empty());
}

#[test]
fn session_corrupt_file_starts_fresh() {
    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::new(dir.path());
    std::fs::write(store.path(), "{\"startTime\": 12, \"totals\": ").unwrap();

    assert!(store.load().is_none());
    let tracker = store.load_tracker();
    assert!(tracker.is_empty());
}

#[test]
fn session_round_trip_is_exact() {
    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::new(dir.path());
    let clock = clock();

    let mut tracker = CostTracker::with_clock(clock.clone());
    tracker.add("gpt-4o", 1000, 500, &price(2.5, 10.0));
    tracker.add("claude-3-haiku", 300, 0, &price(0.25, 1.25));
    store.save(&tracker.export_state()).unwrap();

    let loaded = store.load().expect("state saved");
    assert_eq!(loaded, tracker.export_state());

    clock.advance(TimeDelta::seconds(10));
    let resumed = store.load_tracker_with_clock(clock.clone());
    assert_eq!(resumed.summary(), tracker.summary());
    assert!((resumed.duration() - 10.0).abs() < 1e-9);
}

#[test]
fn session_record_uses_camel_case_keys() {
    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::new(dir.path());
    let mut tracker = CostTracker::with_clock(clock());
    tracker.add("gpt-4o", 10, 0, &price(2.5, 10.0));
    store.save(&tracker.export_state()).unwrap();

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(store.path()).unwrap()).unwrap();
    assert_eq!(raw["startTime"], "2026-05-01T08:30:00.500Z");
    assert_eq!(raw["totals"]["gpt-4o"]["promptTokens"], 10);
}

#[test]
fn prices_missing_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = PriceOverrideStore::new(dir.path());
    assert!(!store.exists());
    assert!(store.load().is_empty());
}

#[test]
fn prices_corrupt_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = PriceOverrideStore::new(dir.path());
    std::fs::write(store.path(), "prices = nope").unwrap();
    assert!(store.exists());
    assert!(store.load().is_empty());
}

#[test]
fn prices_set_accumulates_and_overwrites() {
    let dir = tempfile::tempdir().unwrap();
    let store = PriceOverrideStore::new(dir.path());
    store.set("custom", price(5.0, 15.0)).unwrap();
    store.set("gpt-4o", price(1.0, 1.0)).unwrap();
    store.set("custom", price(6.0, 18.0)).unwrap();

    let loaded = store.load();
    let models: Vec<&str> = loaded.keys().map(String::as_str).collect();
    assert_eq!(models, vec!["custom", "gpt-4o"]);
    assert_eq!(loaded["custom"], price(6.0, 18.0));
}

#[test]
fn prices_record_format() {
    let dir = tempfile::tempdir().unwrap();
    let store = PriceOverrideStore::new(dir.path());
    let mut prices = IndexMap::new();
    prices.insert("m".to_string(), price(5.0, 15.0));
    store.save(&prices).unwrap();

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(store.path()).unwrap()).unwrap();
    assert_eq!(
        raw,
        serde_json::json!({ "prices": { "m": { "prompt": 5.0, "completion": 15.0 } } })
    );
}

#[test]
fn prices_invalid_entries_are_dropped() {
    let dir = tempfile::tempdir().unwrap();
    let store = PriceOverrideStore::new(dir.path());
    std::fs::write(
        store.path(),
        r#"{"prices": {"ok": {"prompt": 1.0, "completion": 2.0}, "bad": {"prompt": -1.0, "completion": 2.0}}}"#,
    )
    .unwrap();

    let loaded = store.load();
    assert_eq!(loaded.len(), 1);
    assert!(loaded.contains_key("ok"));
}
