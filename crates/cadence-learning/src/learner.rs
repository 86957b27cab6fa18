//! IncrementalLearner: folds new engagement events into the shared caches.

use std::sync::Arc;

use cadence_core::config::LearningConfig;
use cadence_core::models::EngagementEvent;
use cadence_core::traits::{EventStore, NoOpRetrainingSink, RetrainingSink};
use cadence_observability::events;
use cadence_prediction::EngineCaches;
use tokio::sync::mpsc;
use tracing::debug;

/// What consuming one event changed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LearnOutcome {
    /// The contact's append count after this event.
    pub cached_events: u64,
    /// New preference confidence, when the event reinforced a profile.
    pub reinforced: Option<f64>,
    pub retraining_signalled: bool,
}

/// Single consumer of engagement events.
///
/// Shares its caches with a [`cadence_prediction::TimingEngine`], so the next
/// prediction for a contact sees the event without reloading the store.
pub struct IncrementalLearner {
    caches: Arc<EngineCaches>,
    config: LearningConfig,
    sink: Arc<dyn RetrainingSink>,
    /// Resolves a contact's organization when the event does not carry one,
    /// and loads profiles that are not cached yet.
    directory: Option<Arc<dyn EventStore>>,
}

impl IncrementalLearner {
    pub fn new(caches: Arc<EngineCaches>, config: LearningConfig) -> Self {
        Self {
            caches,
            config,
            sink: Arc::new(NoOpRetrainingSink),
            directory: None,
        }
    }

    pub fn with_sink(mut self, sink: Arc<dyn RetrainingSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn with_directory(mut self, directory: Arc<dyn EventStore>) -> Self {
        self.directory = Some(directory);
        self
    }

    pub fn config(&self) -> &LearningConfig {
        &self.config
    }

    /// Apply one event.
    pub fn consume(&self, event: EngagementEvent) -> LearnOutcome {
        let span = cadence_observability::learning_span!(event.contact_id);
        let _guard = span.enter();

        let contact_id = event.contact_id.clone();
        let material = event.engagement_score > self.config.materiality_threshold;
        let organization = if material {
            self.organization_of(&event)
        } else {
            None
        };

        let cached_events = self.caches.history.append(event);

        let reinforced = organization.and_then(|org| self.reinforce(&org));

        let retraining_signalled =
            self.config.retrain_every > 0 && cached_events % self.config.retrain_every == 0;
        if retraining_signalled {
            events::retraining_signalled(&contact_id, cached_events);
            self.sink.retraining_needed(&contact_id, cached_events);
        }

        LearnOutcome {
            cached_events,
            reinforced,
            retraining_signalled,
        }
    }

    /// Drain `rx` until every sender is dropped. Returns the number of events consumed.
    pub async fn run(&self, mut rx: mpsc::Receiver<EngagementEvent>) -> u64 {
        let mut consumed = 0;
        while let Some(event) = rx.recv().await {
            self.consume(event);
            consumed += 1;
        }
        debug!(consumed, "learner input closed");
        consumed
    }

    fn reinforce(&self, organization_id: &str) -> Option<f64> {
        let kind = &self.config.preference_kind;
        let increment = self.config.preference_increment;
        let profiles = &self.caches.profiles;
        let confidence = match profiles.reinforce_preference(organization_id, kind, increment) {
            Some(confidence) => confidence,
            None if !profiles.contains(organization_id) && self.load_profile(organization_id) => {
                profiles.reinforce_preference(organization_id, kind, increment)?
            }
            None => return None,
        };
        events::preference_reinforced(organization_id, kind, confidence);
        Some(confidence)
    }

    /// Pull an uncached profile through the directory so the event is not lost.
    fn load_profile(&self, organization_id: &str) -> bool {
        let Some(directory) = self.directory.as_ref() else {
            return false;
        };
        match directory.organization_profile(organization_id) {
            Ok(Some(profile)) => {
                self.caches.profiles.insert(profile);
                true
            }
            Ok(None) => false,
            Err(err) => {
                events::store_degraded(
                    "organization_profile",
                    organization_id,
                    &err.to_string(),
                    "preference left unchanged",
                );
                false
            }
        }
    }

    fn organization_of(&self, event: &EngagementEvent) -> Option<String> {
        if let Some(org) = &event.organization_id {
            return Some(org.clone());
        }
        let directory = self.directory.as_ref()?;
        match directory.contact_info(&event.contact_id) {
            Ok(info) => info.and_then(|i| i.organization_id),
            Err(err) => {
                events::store_degraded(
                    "contact_info",
                    &event.contact_id,
                    &err.to_string(),
                    "preference left unchanged",
                );
                None
            }
        }
    }
}
