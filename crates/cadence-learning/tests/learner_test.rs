use std::sync::Arc;

use cadence_core::config::CadenceConfig;
use cadence_core::models::{Channel, EngagementAction, EngagementEvent, Urgency};
use cadence_core::traits::{EventStore, FixedClock};
use cadence_learning::{ChannelSink, IncrementalLearner, RetrainingSignal};
use cadence_prediction::TimingEngine;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use test_fixtures::{FixtureStore, StoreOp};
use tokio::sync::mpsc;

// ── Helpers ───────────────────────────────────────────────────────────────

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 10)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap()
}

fn reply(contact: &str, minutes_ago: i64) -> EngagementEvent {
    EngagementEvent::from_action(
        contact,
        Channel::Email,
        EngagementAction::Replied,
        now() - Duration::minutes(minutes_ago),
    )
}

fn setup() -> (
    Arc<FixtureStore>,
    TimingEngine<Arc<FixtureStore>>,
    IncrementalLearner,
) {
    let store = Arc::new(FixtureStore::from_fixture("scenarios/dental_office.json"));
    let config = CadenceConfig::default();
    let engine = TimingEngine::new(Arc::clone(&store), config.clone())
        .unwrap()
        .with_clock(Arc::new(FixedClock(now())));
    let directory: Arc<dyn EventStore> = store.clone();
    let learner = IncrementalLearner::new(Arc::clone(engine.caches()), config.learning)
        .with_directory(directory);
    (store, engine, learner)
}

fn best_time_confidence(engine: &TimingEngine<Arc<FixtureStore>>) -> f64 {
    engine
        .caches()
        .profiles
        .get("org-dental")
        .unwrap()
        .preference("best_time")
        .unwrap()
        .confidence
}

// ── Preference reinforcement ──────────────────────────────────────────────

#[test]
fn material_event_reinforces_cached_profile() {
    let (_store, engine, learner) = setup();
    engine
        .predict_optimal_timing("dr-lee", Channel::Email, Urgency::Medium)
        .unwrap();

    // Organization resolved through the directory.
    let outcome = learner.consume(reply("dr-lee", 30));
    let reinforced = outcome.reinforced.unwrap();
    assert!((reinforced - 0.61).abs() < 1e-9);
    assert!((best_time_confidence(&engine) - 0.61).abs() < 1e-9);
}

#[test]
fn immaterial_event_leaves_profile_alone() {
    let (_store, engine, learner) = setup();
    engine
        .predict_optimal_timing("dr-lee", Channel::Email, Urgency::Medium)
        .unwrap();

    let clicked = EngagementEvent::from_action(
        "dr-lee",
        Channel::Email,
        EngagementAction::Clicked,
        now(),
    );
    let outcome = learner.consume(clicked);
    assert_eq!(outcome.reinforced, None);
    assert!((best_time_confidence(&engine) - 0.6).abs() < 1e-9);
}

#[test]
fn uncached_profile_is_loaded_and_reinforced() {
    let (store, engine, learner) = setup();
    let outcome = learner.consume(reply("dr-lee", 30));
    assert!((outcome.reinforced.unwrap() - 0.61).abs() < 1e-9);
    assert_eq!(store.profile_calls(), 1);

    // The prediction reads the reinforced profile from the cache.
    engine
        .predict_optimal_timing("dr-lee", Channel::Email, Urgency::Medium)
        .unwrap();
    assert_eq!(store.profile_calls(), 1);
    assert!((best_time_confidence(&engine) - 0.61).abs() < 1e-9);
}

#[test]
fn reinforcement_survives_cache_expiry() {
    let store = Arc::new(FixtureStore::from_fixture("scenarios/dental_office.json"));
    let mut config = CadenceConfig::default();
    config.cache.ttl_secs = 1;
    let engine = TimingEngine::new(Arc::clone(&store), config.clone())
        .unwrap()
        .with_clock(Arc::new(FixedClock(now())));
    let directory: Arc<dyn EventStore> = store.clone();
    let learner = IncrementalLearner::new(Arc::clone(engine.caches()), config.learning)
        .with_directory(directory);

    engine
        .predict_optimal_timing("dr-lee", Channel::Email, Urgency::Medium)
        .unwrap();
    for i in 0..5 {
        learner.consume(reply("dr-lee", 60 - i));
    }
    assert!((best_time_confidence(&engine) - 0.65).abs() < 1e-9);

    std::thread::sleep(std::time::Duration::from_millis(1500));
    engine
        .predict_optimal_timing("dr-lee", Channel::Email, Urgency::Medium)
        .unwrap();
    assert_eq!(store.profile_calls(), 2);
    assert!((best_time_confidence(&engine) - 0.65).abs() < 1e-9);
}

#[test]
fn organization_without_profile_is_not_reinforced() {
    let (_store, engine, learner) = setup();
    let outcome = learner.consume(reply("dr-solo", 30).with_organization("org-none"));
    assert_eq!(outcome.reinforced, None);
    assert!(!engine.caches().profiles.contains("org-none"));
}

#[test]
fn directory_failure_skips_reinforcement() {
    let (store, engine, learner) = setup();
    engine
        .predict_optimal_timing("dr-lee", Channel::Email, Urgency::Medium)
        .unwrap();
    store.fail(StoreOp::ContactInfo);

    let outcome = learner.consume(reply("dr-lee", 30));
    assert_eq!(outcome.reinforced, None);
    assert_eq!(outcome.cached_events, 1);

    // An event carrying its organization needs no lookup.
    let outcome = learner.consume(reply("dr-lee", 20).with_organization("org-dental"));
    assert!(outcome.reinforced.is_some());
}

// ── Cache updates ─────────────────────────────────────────────────────────

#[test]
fn next_prediction_sees_the_event_without_reloading() {
    let (store, engine, learner) = setup();
    let before = engine
        .predict_optimal_timing("dr-lee", Channel::Email, Urgency::Medium)
        .unwrap();
    assert_eq!(before.channel_preferences[0].interactions, 5);

    learner.consume(reply("dr-lee", 30));
    let after = engine
        .predict_optimal_timing("dr-lee", Channel::Email, Urgency::Medium)
        .unwrap();

    assert_eq!(after.channel_preferences[0].channel, Channel::Email);
    assert_eq!(after.channel_preferences[0].interactions, 6);
    assert_eq!(store.history_calls(), 1);
}

#[test]
fn pending_events_are_replaced_by_store_history() {
    let (store, engine, learner) = setup();
    let event = reply("dr-lee", 30);
    store.push_event(event.clone());
    learner.consume(event);

    // The pending entry does not satisfy a prediction on its own.
    let prediction = engine
        .predict_optimal_timing("dr-lee", Channel::Email, Urgency::Medium)
        .unwrap();
    assert_eq!(store.history_calls(), 1);
    assert_eq!(prediction.channel_preferences[0].interactions, 6);

    let cached = engine.caches().history.peek("dr-lee").unwrap();
    assert!(cached.hydrated);
    assert_eq!(cached.events.len(), 11);
    assert_eq!(cached.total_cached, 1);
}

// ── Async driver ──────────────────────────────────────────────────────────

#[tokio::test]
async fn run_drains_channel_and_signals_retraining() {
    let (_store, _engine, learner) = setup();
    let (sink, mut signals) = ChannelSink::channel();
    let learner = learner.with_sink(Arc::new(sink));

    let (tx, rx) = mpsc::channel(8);
    let producer = tokio::spawn(async move {
        for i in 0..25 {
            tx.send(reply("hygienist-kim", 100 - i)).await.unwrap();
        }
    });

    let consumed = learner.run(rx).await;
    producer.await.unwrap();
    assert_eq!(consumed, 25);

    let mut received = Vec::new();
    while let Ok(signal) = signals.try_recv() {
        received.push(signal);
    }
    assert_eq!(
        received,
        vec![
            RetrainingSignal {
                contact_id: "hygienist-kim".into(),
                cached_events: 10,
            },
            RetrainingSignal {
                contact_id: "hygienist-kim".into(),
                cached_events: 20,
            },
        ]
    );
}

#[tokio::test]
async fn run_preserves_per_contact_order() {
    let (_store, engine, learner) = setup();
    let (tx, rx) = mpsc::channel(4);
    let events: Vec<_> = (0..5).map(|i| reply("dr-solo", 50 - i * 10)).collect();
    let expected_newest = events[4].timestamp;

    let producer = tokio::spawn(async move {
        for event in events {
            tx.send(event).await.unwrap();
        }
    });
    learner.run(rx).await;
    producer.await.unwrap();

    let cached = engine.caches().history.peek("dr-solo").unwrap();
    assert_eq!(cached.events.len(), 5);
    assert_eq!(cached.events[0].timestamp, expected_newest);
    assert!(cached
        .events
        .windows(2)
        .all(|w| w[0].timestamp > w[1].timestamp));
}

#[tokio::test]
async fn dropped_signal_receiver_does_not_stop_learning() {
    let (_store, _engine, learner) = setup();
    let (sink, signals) = ChannelSink::channel();
    drop(signals);
    let learner = learner.with_sink(Arc::new(sink));

    let outcomes: Vec<_> = (0..10).map(|i| learner.consume(reply("c9", i))).collect();
    assert!(outcomes[9].retraining_signalled);
    assert_eq!(outcomes[9].cached_events, 10);
}
