//! Injectable per-contact history and per-organization profile caches.
//!
//! Both use `moka::sync::Cache` bounded by entry count and TTL, and track
//! hits/misses. Updates are per-key upserts; nothing holds a lock across a
//! prediction. Learned preference confidence outlives cache entries.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use cadence_core::config::CacheConfig;
use cadence_core::models::{EngagementEvent, OrganizationScheduleProfile};
use dashmap::DashMap;
use moka::ops::compute::Op;
use moka::sync::Cache;

/// Shared hit/miss counters.
#[derive(Debug, Default)]
struct Stats {
    hits: AtomicU64,
    misses: AtomicU64,
}

impl Stats {
    fn record(&self, hit: bool) {
        let counter = if hit { &self.hits } else { &self.misses };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    fn hit_rate(&self) -> f64 {
        let h = self.hits.load(Ordering::Relaxed) as f64;
        let m = self.misses.load(Ordering::Relaxed) as f64;
        let total = h + m;
        if total == 0.0 {
            0.0
        } else {
            h / total
        }
    }
}

/// A contact's cached history.
#[derive(Debug, Clone, Default)]
pub struct CachedHistory {
    /// Newest first.
    pub events: Arc<Vec<EngagementEvent>>,
    /// False while the entry holds only events appended by the learner and
    /// has not yet been loaded from the store.
    pub hydrated: bool,
    /// Events appended through [`HistoryCache::append`] since the entry was created.
    pub total_cached: u64,
}

/// Per-contact engagement history.
pub struct HistoryCache {
    cache: Cache<String, CachedHistory>,
    limit: usize,
    stats: Stats,
}

impl HistoryCache {
    pub fn new(max_contacts: u64, ttl: std::time::Duration, limit: usize) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_contacts)
            .time_to_live(ttl)
            .build();
        Self {
            cache,
            limit,
            stats: Stats::default(),
        }
    }

    /// Loaded history for a contact. Pending entries count as misses.
    pub fn get(&self, contact_id: &str) -> Option<Arc<Vec<EngagementEvent>>> {
        let found = self
            .cache
            .get(contact_id)
            .filter(|entry| entry.hydrated)
            .map(|entry| entry.events);
        self.stats.record(found.is_some());
        found
    }

    /// Store history loaded from the event store, replacing any pending
    /// events (the store already holds them) but keeping the append count.
    pub fn hydrate(
        &self,
        contact_id: &str,
        mut events: Vec<EngagementEvent>,
    ) -> Arc<Vec<EngagementEvent>> {
        events.truncate(self.limit);
        let events = Arc::new(events);
        let shared = Arc::clone(&events);
        self.cache
            .entry_by_ref(contact_id)
            .and_upsert_with(move |existing| CachedHistory {
                events: shared,
                hydrated: true,
                total_cached: existing.map(|e| e.into_value().total_cached).unwrap_or(0),
            });
        events
    }

    /// Add a newly observed event. Returns the contact's append count.
    pub fn append(&self, event: EngagementEvent) -> u64 {
        let limit = self.limit;
        let contact_id = event.contact_id.clone();
        let entry = self
            .cache
            .entry(contact_id)
            .and_upsert_with(move |existing| {
                let current = existing.map(|e| e.into_value()).unwrap_or_default();
                let mut events = Vec::with_capacity(current.events.len() + 1);
                events.push(event);
                events.extend(current.events.iter().take(limit.saturating_sub(1)).cloned());
                CachedHistory {
                    events: Arc::new(events),
                    hydrated: current.hydrated,
                    total_cached: current.total_cached + 1,
                }
            });
        entry.into_value().total_cached
    }

    pub fn peek(&self, contact_id: &str) -> Option<CachedHistory> {
        self.cache.get(contact_id)
    }

    pub fn invalidate(&self, contact_id: &str) {
        self.cache.invalidate(contact_id);
    }

    pub fn hit_rate(&self) -> f64 {
        self.stats.hit_rate()
    }

    pub fn hits(&self) -> u64 {
        self.stats.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.stats.misses.load(Ordering::Relaxed)
    }
}

/// Per-organization schedule profiles. Absent profiles are never cached.
///
/// Reinforced confidences are also kept in a ledger outside the TTL-bound
/// cache and re-applied whenever a profile is (re)loaded, so expiry never
/// rolls a preference back.
pub struct ProfileCache {
    cache: Cache<String, Arc<OrganizationScheduleProfile>>,
    /// Highest confidence reached per (organization, preference kind).
    reinforced: DashMap<(String, String), f64>,
    stats: Stats,
}

impl ProfileCache {
    pub fn new(max_organizations: u64, ttl: std::time::Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_organizations)
            .time_to_live(ttl)
            .build();
        Self {
            cache,
            reinforced: DashMap::new(),
            stats: Stats::default(),
        }
    }

    pub fn get(&self, organization_id: &str) -> Option<Arc<OrganizationScheduleProfile>> {
        let found = self.cache.get(organization_id);
        self.stats.record(found.is_some());
        found
    }

    /// Whether a profile is cached, without touching the hit/miss stats.
    pub fn contains(&self, organization_id: &str) -> bool {
        self.cache.contains_key(organization_id)
    }

    /// Cache a profile loaded from the store, carrying over any confidence
    /// the learner has reinforced since.
    pub fn insert(
        &self,
        profile: OrganizationScheduleProfile,
    ) -> Arc<OrganizationScheduleProfile> {
        let key = profile.organization_id.clone();
        self.cache
            .entry(key)
            .and_upsert_with(|_| Arc::new(self.with_reinforcements(profile)))
            .into_value()
    }

    /// Raise the confidence of a cached profile's preference. Returns the new
    /// confidence, or `None` when the profile is not cached or lacks the
    /// preference.
    pub fn reinforce_preference(
        &self,
        organization_id: &str,
        kind: &str,
        increment: f64,
    ) -> Option<f64> {
        let mut reinforced = None;
        self.cache
            .entry_by_ref(organization_id)
            .and_compute_with(|existing| {
                let Some(entry) = existing else {
                    return Op::Nop;
                };
                let mut profile = entry.value().as_ref().clone();
                let Some(preference) = profile.preference_mut(kind) else {
                    return Op::Nop;
                };
                let confidence = preference.reinforce(increment);
                self.reinforced
                    .entry((organization_id.to_string(), kind.to_string()))
                    .and_modify(|c| *c = c.max(confidence))
                    .or_insert(confidence);
                reinforced = Some(confidence);
                Op::Put(Arc::new(profile))
            });
        reinforced
    }

    /// Confidence the learner has driven a preference to, if any.
    pub fn reinforced_confidence(&self, organization_id: &str, kind: &str) -> Option<f64> {
        self.reinforced
            .get(&(organization_id.to_string(), kind.to_string()))
            .map(|c| *c)
    }

    pub fn invalidate(&self, organization_id: &str) {
        self.cache.invalidate(organization_id);
    }

    pub fn hit_rate(&self) -> f64 {
        self.stats.hit_rate()
    }

    fn with_reinforcements(
        &self,
        mut profile: OrganizationScheduleProfile,
    ) -> OrganizationScheduleProfile {
        let organization_id = profile.organization_id.clone();
        for preference in &mut profile.communication_preferences {
            let key = (organization_id.clone(), preference.kind.clone());
            if let Some(confidence) = self.reinforced.get(&key) {
                preference.confidence = preference.confidence.max(*confidence);
            }
        }
        profile
    }
}

/// The two caches an engine and its learner share.
pub struct EngineCaches {
    pub history: HistoryCache,
    pub profiles: ProfileCache,
}

impl EngineCaches {
    pub fn from_config(config: &CacheConfig, history_limit: usize) -> Self {
        Self {
            history: HistoryCache::new(config.max_contacts, config.ttl(), history_limit),
            profiles: ProfileCache::new(config.max_organizations, config.ttl()),
        }
    }
}

impl Default for EngineCaches {
    fn default() -> Self {
        Self::from_config(
            &CacheConfig::default(),
            cadence_core::config::defaults::DEFAULT_HISTORY_LIMIT,
        )
    }
}
