//! TimingEngine: resolves a contact, gathers its evidence, runs the four
//! analyses, and turns the winning candidate into a `TimingPrediction`.

use std::sync::Arc;

use cadence_core::config::CadenceConfig;
use cadence_core::errors::{TimingError, TimingResult};
use cadence_core::models::{
    Channel, ContactInfo, DomainNormTable, EngagementEvent, OrganizationScheduleProfile,
    TimingPrediction, Urgency,
};
use cadence_core::traits::{Clock, EventStore, SystemClock};
use cadence_observability::events;
use chrono::NaiveDateTime;

use crate::analysis::{analyze_channels, DomainNormProvider, IndividualPattern, ScheduleAnalysis};
use crate::cache::EngineCaches;
use crate::scoring::{self, ScoringInputs};
use crate::{confidence, reasoning};

/// Prediction engine over an injected store, norms table, clock, and caches.
pub struct TimingEngine<S: EventStore> {
    store: S,
    norms: DomainNormProvider,
    caches: Arc<EngineCaches>,
    clock: Arc<dyn Clock>,
    config: CadenceConfig,
}

impl<S: EventStore> TimingEngine<S> {
    /// Build an engine reading the system clock. Loads the norms table from
    /// `engine.norms_path` when one is configured.
    pub fn new(store: S, config: CadenceConfig) -> TimingResult<Self> {
        let table = match &config.engine.norms_path {
            Some(path) => DomainNormTable::from_path(path)?,
            None => DomainNormTable::builtin(),
        };
        let caches = EngineCaches::from_config(&config.cache, config.engine.history_limit);
        Ok(Self {
            store,
            norms: DomainNormProvider::new(table, config.engine.default_category.clone()),
            caches: Arc::new(caches),
            clock: Arc::new(SystemClock),
            config,
        })
    }

    pub fn with_norms(mut self, table: DomainNormTable) -> Self {
        self.norms = DomainNormProvider::new(table, self.config.engine.default_category.clone());
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Share caches with a learner or another engine.
    pub fn with_caches(mut self, caches: Arc<EngineCaches>) -> Self {
        self.caches = caches;
        self
    }

    pub fn caches(&self) -> &Arc<EngineCaches> {
        &self.caches
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &CadenceConfig {
        &self.config
    }

    pub(crate) fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }

    /// Recommend when to reach `contact_id` over `channel`.
    ///
    /// Fails only for unknown contacts. Store outages degrade to the
    /// no-history and no-schedule paths.
    pub fn predict_optimal_timing(
        &self,
        contact_id: &str,
        channel: Channel,
        urgency: Urgency,
    ) -> TimingResult<TimingPrediction> {
        self.predict_at(contact_id, channel, urgency, self.clock.now())
    }

    /// Predict relative to an explicit request time.
    pub fn predict_at(
        &self,
        contact_id: &str,
        channel: Channel,
        urgency: Urgency,
        now: NaiveDateTime,
    ) -> TimingResult<TimingPrediction> {
        let span = cadence_observability::prediction_span!(contact_id, channel, urgency);
        let _guard = span.enter();

        let contact = self.resolve_contact(contact_id)?;
        let (history, profile) = rayon::join(
            || self.history_for(contact_id),
            || {
                contact
                    .organization_id
                    .as_deref()
                    .and_then(|org| self.profile_for(org))
            },
        );

        let pattern = IndividualPattern::analyze(&history);
        let schedule = ScheduleAnalysis::analyze(profile.as_deref());
        let norms = self.norms.lookup(&contact.professional_category);
        if norms.fell_back {
            events::norms_fallback(&contact.professional_category, norms.category);
        }

        let time_zone = schedule
            .time_zone
            .clone()
            .unwrap_or_else(|| self.config.engine.time_zone.clone());
        let channel_preferences = analyze_channels(&history, channel, now, &time_zone);

        let inputs = ScoringInputs {
            now,
            urgency,
            pattern: &pattern,
            schedule: &schedule,
            norms,
            config: &self.config.engine,
        };
        let selection = scoring::select(&inputs);
        let alternative_windows = scoring::alternatives(&selection.optimal, &inputs, &time_zone);

        let confidence =
            confidence::estimate(history.len(), pattern.consistency, schedule.has_schedule);
        let reasoning = reasoning::compose(
            &pattern,
            &schedule,
            &norms,
            &contact.professional_category,
            &channel_preferences,
        );

        events::prediction_completed(
            contact_id,
            confidence,
            selection.used_default,
            selection.candidates_considered,
        );

        Ok(TimingPrediction {
            contact_id: contact_id.to_string(),
            optimal_time: selection.optimal.time,
            confidence,
            reasoning,
            alternative_windows,
            channel_preferences,
            category: norms.category.to_string(),
            urgency,
            used_default: selection.used_default,
        })
    }

    /// Directory lookup. A failing store yields a context with no
    /// organization and the default category.
    pub(crate) fn resolve_contact(&self, contact_id: &str) -> TimingResult<ContactInfo> {
        match self.store.contact_info(contact_id) {
            Ok(Some(info)) => Ok(info),
            Ok(None) => Err(TimingError::ContactNotFound {
                contact_id: contact_id.to_string(),
            }),
            Err(err) => {
                events::store_degraded(
                    "contact_info",
                    contact_id,
                    &err.to_string(),
                    "default contact context",
                );
                Ok(ContactInfo {
                    contact_id: contact_id.to_string(),
                    organization_id: None,
                    professional_category: self.config.engine.default_category.clone(),
                })
            }
        }
    }

    /// Cached history, loading it from the store on a miss.
    pub(crate) fn history_for(&self, contact_id: &str) -> Arc<Vec<EngagementEvent>> {
        if let Some(history) = self.caches.history.get(contact_id) {
            return history;
        }
        match self
            .store
            .engagement_history(contact_id, self.config.engine.history_limit)
        {
            Ok(loaded) => self.caches.history.hydrate(contact_id, loaded),
            Err(err) => {
                events::store_degraded(
                    "engagement_history",
                    contact_id,
                    &err.to_string(),
                    "no history",
                );
                Arc::new(Vec::new())
            }
        }
    }

    /// Cached profile, loading it from the store on a miss.
    pub(crate) fn profile_for(
        &self,
        organization_id: &str,
    ) -> Option<Arc<OrganizationScheduleProfile>> {
        if let Some(profile) = self.caches.profiles.get(organization_id) {
            return Some(profile);
        }
        match self.store.organization_profile(organization_id) {
            Ok(Some(profile)) => Some(self.caches.profiles.insert(profile)),
            Ok(None) => None,
            Err(err) => {
                events::store_degraded(
                    "organization_profile",
                    organization_id,
                    &err.to_string(),
                    "no schedule",
                );
                None
            }
        }
    }
}
