use std::sync::Arc;

use cadence_core::config::CadenceConfig;
use cadence_core::errors::TimingError;
use cadence_core::models::{Channel, EngagementAction, EngagementEvent, Urgency};
use cadence_core::traits::FixedClock;
use cadence_prediction::TimingEngine;
use chrono::{NaiveDate, NaiveDateTime, Timelike};
use test_fixtures::{FixtureStore, StoreOp};

// ── Helpers ───────────────────────────────────────────────────────────────

fn at(month: u32, day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, month, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

fn engine(store: FixtureStore, now: NaiveDateTime) -> TimingEngine<FixtureStore> {
    TimingEngine::new(store, CadenceConfig::default())
        .unwrap()
        .with_clock(Arc::new(FixedClock(now)))
}

// ── Contact resolution ────────────────────────────────────────────────────

#[test]
fn unknown_contact_is_an_error() {
    let engine = engine(FixtureStore::new(), at(6, 10, 9));
    let err = engine
        .predict_optimal_timing("ghost", Channel::Email, Urgency::Medium)
        .unwrap_err();
    assert!(matches!(
        err,
        TimingError::ContactNotFound { ref contact_id } if contact_id == "ghost"
    ));
}

#[test]
fn empty_history_still_predicts() {
    let store = FixtureStore::new().with_contact("c1", None, "medical");
    let engine = engine(store, at(6, 10, 9));
    let prediction = engine
        .predict_optimal_timing("c1", Channel::Email, Urgency::Medium)
        .unwrap();

    assert!(prediction.optimal_time > at(6, 10, 9));
    assert!(prediction.channel_preferences.is_empty());
    assert!((prediction.confidence - 0.3).abs() < 1e-9);
    assert_eq!(prediction.category, "medical");
    assert!(prediction
        .reasoning
        .iter()
        .any(|r| r.factor == "Industry Best Practices"));
}

#[test]
fn unknown_category_uses_fallback_norms() {
    let store = FixtureStore::new().with_contact("c1", None, "veterinary");
    let engine = engine(store, at(6, 10, 9));
    let prediction = engine
        .predict_optimal_timing("c1", Channel::Email, Urgency::Low)
        .unwrap();
    assert_eq!(prediction.category, "medical");
}

// ── Degradation ───────────────────────────────────────────────────────────

#[test]
fn store_failures_degrade_to_defaults() {
    let store = FixtureStore::from_fixture("scenarios/dental_office.json");
    store.fail(StoreOp::History);
    store.fail(StoreOp::Profile);
    let engine = engine(store, at(6, 10, 9));

    let prediction = engine
        .predict_optimal_timing("dr-lee", Channel::Email, Urgency::Medium)
        .unwrap();
    assert!(prediction.channel_preferences.is_empty());
    assert!((prediction.confidence - 0.3).abs() < 1e-9);
    assert!(!prediction
        .reasoning
        .iter()
        .any(|r| r.factor == "Organization Schedule"));
}

#[test]
fn directory_failure_uses_default_context() {
    let store = FixtureStore::from_fixture("scenarios/dental_office.json");
    store.fail(StoreOp::ContactInfo);
    let engine = engine(store, at(6, 10, 9));

    let prediction = engine
        .predict_optimal_timing("anyone", Channel::Sms, Urgency::Medium)
        .unwrap();
    assert_eq!(prediction.category, "medical");
}

#[test]
fn failed_history_is_not_cached() {
    let store = FixtureStore::from_fixture("scenarios/dental_office.json");
    store.fail(StoreOp::History);
    let engine = engine(store, at(6, 10, 9));
    engine
        .predict_optimal_timing("dr-lee", Channel::Email, Urgency::Medium)
        .unwrap();

    engine.store().heal(StoreOp::History);
    let prediction = engine
        .predict_optimal_timing("dr-lee", Channel::Email, Urgency::Medium)
        .unwrap();
    assert!(!prediction.channel_preferences.is_empty());
    assert_eq!(engine.store().history_calls(), 2);
}

// ── Caching and determinism ───────────────────────────────────────────────

#[test]
fn repeated_predictions_hit_the_caches() {
    let store = FixtureStore::from_fixture("scenarios/dental_office.json");
    let engine = engine(store, at(6, 10, 9));

    let first = engine
        .predict_optimal_timing("dr-lee", Channel::Email, Urgency::Medium)
        .unwrap();
    let second = engine
        .predict_optimal_timing("dr-lee", Channel::Email, Urgency::Medium)
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(engine.store().history_calls(), 1);
    assert_eq!(engine.store().profile_calls(), 1);
    assert!(engine.caches().history.hit_rate() > 0.0);
}

#[test]
fn profile_cache_is_shared_across_members() {
    let store = FixtureStore::from_fixture("scenarios/dental_office.json");
    let engine = engine(store, at(6, 10, 9));
    for contact in ["dr-lee", "hygienist-kim"] {
        engine
            .predict_optimal_timing(contact, Channel::Email, Urgency::Medium)
            .unwrap();
    }
    assert_eq!(engine.store().profile_calls(), 1);
}

// ── Prediction content ────────────────────────────────────────────────────

#[test]
fn schedule_and_channels_shape_the_prediction() {
    let store = FixtureStore::from_fixture("scenarios/dental_office.json");
    let engine = engine(store, at(6, 10, 9));
    let prediction = engine
        .predict_optimal_timing("dr-lee", Channel::Sms, Urgency::Medium)
        .unwrap();

    // Ten events, a schedule, and a split between two buckets.
    assert!(prediction.confidence > 0.5);
    assert!(prediction.confidence <= 0.95);
    assert_eq!(prediction.channel_preferences[0].channel, Channel::Email);
    assert_eq!(prediction.channel_preferences[0].interactions, 5);
    assert!(prediction
        .channel_preferences
        .iter()
        .flat_map(|c| &c.best_times)
        .all(|w| w.start > at(6, 10, 9) && w.time_zone == "America/Chicago"));
    assert!(prediction
        .reasoning
        .iter()
        .any(|r| r.factor == "Organization Schedule"));
    assert!(prediction
        .reasoning
        .windows(2)
        .all(|w| w[0].weight >= w[1].weight));
    assert!(prediction.alternative_windows.len() <= 3);
    assert!(prediction
        .alternative_windows
        .iter()
        .all(|w| w.start != prediction.optimal_time));
}

#[test]
fn custom_norms_table_is_loaded_from_config() {
    let path = std::env::temp_dir().join(format!("cadence-norms-{}.toml", std::process::id()));
    std::fs::write(
        &path,
        r#"
version = 2

[categories.optometry]
best_days = ["Fri"]
best_times = [{ range = "16:00-17:00", score = 1.0 }]
avoid_times = []
response_window_hours = 24
"#,
    )
    .unwrap();

    let mut config = CadenceConfig::default();
    config.engine.norms_path = Some(path.display().to_string());
    let store = FixtureStore::new().with_contact("c1", None, "optometry");
    let engine = TimingEngine::new(store, config)
        .unwrap()
        .with_clock(Arc::new(FixedClock(at(6, 10, 9))));
    let prediction = engine
        .predict_optimal_timing("c1", Channel::Email, Urgency::Medium)
        .unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(prediction.category, "optometry");
    // Friday 2024-06-14 at 16:00: best day and best time.
    assert_eq!(prediction.optimal_time, at(6, 14, 16));
}

#[test]
fn missing_norms_file_fails_construction() {
    let mut config = CadenceConfig::default();
    config.engine.norms_path = Some("/nonexistent/cadence-norms.toml".into());
    let result = TimingEngine::new(FixtureStore::new(), config);
    assert!(matches!(result, Err(TimingError::Config(_))));
}

#[test]
fn recent_activity_moves_the_recommendation() {
    let now = at(6, 10, 9);
    let events: Vec<_> = (0..6)
        .map(|week| {
            let ts = at(6, 6, 15) - chrono::Duration::weeks(week);
            EngagementEvent::from_action("c1", Channel::Email, EngagementAction::Purchase, ts)
        })
        .collect();
    let store = FixtureStore::new()
        .with_contact("c1", None, "medical")
        .with_events(events);
    let engine = engine(store, now);
    let prediction = engine
        .predict_optimal_timing("c1", Channel::Email, Urgency::Medium)
        .unwrap();
    // Thursday 15:00: peak bucket, best day, best time.
    assert_eq!(prediction.optimal_time, at(6, 13, 15));
    assert_eq!(prediction.optimal_time.hour(), 15);
}
