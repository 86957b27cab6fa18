use std::collections::HashSet;
use std::sync::Arc;

use cadence_core::config::CadenceConfig;
use cadence_core::models::{Channel, EngagementEvent, Urgency};
use cadence_core::traits::FixedClock;
use cadence_prediction::{IndividualPattern, TimingEngine};
use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};
use proptest::prelude::*;
use test_fixtures::FixtureStore;

fn base() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 3)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

fn arb_event() -> impl Strategy<Value = EngagementEvent> {
    let channel = prop_oneof![Just(Channel::Email), Just(Channel::Sms), Just(Channel::Call)];
    (0i64..60 * 24, -20.0f64..10.0, channel).prop_map(|(hours_back, score, channel)| {
        EngagementEvent::new("c1", channel, base() - Duration::hours(hours_back), score)
    })
}

fn arb_urgency() -> impl Strategy<Value = Urgency> {
    prop_oneof![Just(Urgency::Low), Just(Urgency::Medium), Just(Urgency::High)]
}

proptest! {
    #[test]
    fn consistency_stays_in_unit_interval(history in prop::collection::vec(arb_event(), 0..80)) {
        let pattern = IndividualPattern::analyze(&history);
        prop_assert!((0.0..=1.0).contains(&pattern.consistency));
        prop_assert!(pattern.peak_times.len() <= 5);
        prop_assert_eq!(pattern.has_pattern, !history.is_empty());
    }

    #[test]
    fn predictions_respect_bounds(
        history in prop::collection::vec(arb_event(), 0..60),
        urgency in arb_urgency(),
        offset_minutes in 0i64..7 * 24 * 60,
        category in prop_oneof![
            Just("dental"),
            Just("medical"),
            Just("aesthetic"),
            Just("unknown"),
        ],
    ) {
        let now = base() + Duration::minutes(offset_minutes);
        let store = FixtureStore::new()
            .with_contact("c1", None, category)
            .with_events(history);
        let engine = TimingEngine::new(store, CadenceConfig::default())
            .unwrap()
            .with_clock(Arc::new(FixedClock(now)));
        let prediction = engine.predict_optimal_timing("c1", Channel::Email, urgency).unwrap();

        prop_assert!((0.0..=0.95).contains(&prediction.confidence));
        if !urgency.is_high() {
            prop_assert!((8..=18).contains(&prediction.optimal_time.hour()));
        }

        prop_assert!(prediction.alternative_windows.len() <= 3);
        let starts: HashSet<NaiveDateTime> =
            prediction.alternative_windows.iter().map(|w| w.start).collect();
        prop_assert_eq!(starts.len(), prediction.alternative_windows.len());
        prop_assert!(!starts.contains(&prediction.optimal_time));
        prop_assert!(prediction.alternative_windows.iter().all(|w| w.start > now));

        // Same snapshot, same clock, same answer.
        let again = engine.predict_optimal_timing("c1", Channel::Email, urgency).unwrap();
        prop_assert_eq!(prediction, again);
    }
}
