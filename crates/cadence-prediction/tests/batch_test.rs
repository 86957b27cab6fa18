use std::sync::Arc;
use std::time::Duration;

use cadence_core::config::CadenceConfig;
use cadence_core::errors::TimingError;
use cadence_core::models::{CampaignOptions, Channel, Urgency};
use cadence_core::traits::FixedClock;
use cadence_prediction::TimingEngine;
use chrono::NaiveDate;
use test_fixtures::FixtureStore;

fn contacts(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("c{i:02}")).collect()
}

fn engine_for(ids: &[String], batch_size: usize) -> TimingEngine<FixtureStore> {
    let store = ids.iter().fold(
        FixtureStore::new().with_history_delay(Duration::from_millis(5)),
        |store, id| store.with_contact(id, None, "medical"),
    );
    let mut config = CadenceConfig::default();
    config.engine.batch_size = batch_size;
    let now = NaiveDate::from_ymd_opt(2024, 6, 10)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap();
    TimingEngine::new(store, config)
        .unwrap()
        .with_clock(Arc::new(FixedClock(now)))
}

#[test]
fn batch_of_25_runs_in_three_groups() {
    let ids = contacts(25);
    let engine = engine_for(&ids, 10);
    let options = CampaignOptions {
        urgency: Urgency::Medium,
        content_type: "newsletter".into(),
    };

    let outcome = engine.try_optimal_send_window(&ids, Channel::Email, &options);
    assert_eq!(outcome.group_sizes, vec![10, 10, 5]);
    assert_eq!(outcome.succeeded(), 25);
    assert!(engine.store().max_concurrent_history() <= 10);

    let predictions = outcome.into_predictions();
    assert_eq!(predictions.len(), 25);
    for id in &ids {
        assert!(predictions.contains_key(id));
    }
}

#[test]
fn results_keep_input_order() {
    let ids = contacts(12);
    let engine = engine_for(&ids, 4);
    let outcome = engine.try_optimal_send_window(&ids, Channel::Sms, &CampaignOptions::default());
    let order: Vec<&String> = outcome.results.iter().map(|(id, _)| id).collect();
    assert_eq!(order, ids.iter().collect::<Vec<_>>());
    assert_eq!(outcome.group_sizes, vec![4, 4, 4]);
}

#[test]
fn members_share_one_request_time() {
    let ids = contacts(6);
    let engine = engine_for(&ids, 3);
    let predictions = engine.optimal_send_window(&ids, Channel::Email, &CampaignOptions::default());
    let first = &predictions[&ids[0]];
    // Identical inputs at the same instant give identical slots.
    assert!(predictions
        .values()
        .all(|p| p.optimal_time == first.optimal_time));
}

#[test]
fn failed_members_are_omitted() {
    let mut ids = contacts(5);
    let engine = engine_for(&ids, 10);
    ids.insert(2, "unknown".to_string());

    let outcome = engine.try_optimal_send_window(&ids, Channel::Email, &CampaignOptions::default());
    assert_eq!(outcome.failed(), 1);
    let (failed_id, result) = &outcome.results[2];
    assert_eq!(failed_id, "unknown");
    assert!(matches!(result, Err(TimingError::ContactNotFound { .. })));

    let predictions = engine.optimal_send_window(&ids, Channel::Email, &CampaignOptions::default());
    assert_eq!(predictions.len(), 5);
    assert!(!predictions.contains_key("unknown"));
}

#[test]
fn empty_batch_is_empty() {
    let engine = engine_for(&[], 10);
    let outcome = engine.try_optimal_send_window(&[], Channel::Email, &CampaignOptions::default());
    assert!(outcome.results.is_empty());
    assert!(outcome.group_sizes.is_empty());
}
