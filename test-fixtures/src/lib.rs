//! Test fixtures for the Cadence workspace: a JSON fixture loader and an
//! in-memory `EventStore` with failure injection.

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;
use std::time::Duration;

use cadence_core::errors::{StoreError, TimingResult};
use cadence_core::models::{ContactInfo, EngagementEvent, OrganizationScheduleProfile};
use cadence_core::traits::EventStore;
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Root directory of the test-fixtures folder.
fn fixtures_root() -> PathBuf {
    // Works from any crate in the workspace: walk up to find test-fixtures.
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let mut path = PathBuf::from(&manifest_dir);

    while !path.join("test-fixtures").exists() {
        if !path.pop() {
            panic!(
                "Could not find test-fixtures directory from CARGO_MANIFEST_DIR={}",
                manifest_dir
            );
        }
    }
    path.join("test-fixtures")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Check that a fixture file exists.
pub fn fixture_exists(relative_path: &str) -> bool {
    fixtures_root().join(relative_path).exists()
}

/// Load an organization profile fixture.
pub fn load_profile(relative_path: &str) -> OrganizationScheduleProfile {
    load_fixture(relative_path)
}

/// A store snapshot as laid out in `scenarios/*.json`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoreSnapshot {
    #[serde(default)]
    pub contacts: Vec<ContactInfo>,
    #[serde(default)]
    pub profiles: Vec<OrganizationScheduleProfile>,
    #[serde(default)]
    pub events: Vec<EngagementEvent>,
}

/// Store operations that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOp {
    History,
    Profile,
    ContactInfo,
    OrganizationEngagements,
}

impl StoreOp {
    fn name(self) -> &'static str {
        match self {
            Self::History => "engagement_history",
            Self::Profile => "organization_profile",
            Self::ContactInfo => "contact_info",
            Self::OrganizationEngagements => "organization_engagements",
        }
    }
}

/// In-memory `EventStore`.
///
/// Records how often and how concurrently history is fetched so tests can
/// observe caching and batch grouping.
#[derive(Default)]
pub struct FixtureStore {
    contacts: HashMap<String, ContactInfo>,
    profiles: HashMap<String, OrganizationScheduleProfile>,
    events: RwLock<Vec<EngagementEvent>>,
    failing: RwLock<HashSet<StoreOp>>,
    history_delay: Option<Duration>,
    history_calls: AtomicUsize,
    profile_calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl FixtureStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a `scenarios/*.json` fixture.
    pub fn from_fixture(relative_path: &str) -> Self {
        let snapshot: StoreSnapshot = load_fixture(relative_path);
        Self::from_snapshot(snapshot)
    }

    pub fn from_snapshot(snapshot: StoreSnapshot) -> Self {
        let mut store = Self::new();
        for contact in snapshot.contacts {
            store.contacts.insert(contact.contact_id.clone(), contact);
        }
        for profile in snapshot.profiles {
            store = store.with_profile(profile);
        }
        store.with_events(snapshot.events)
    }

    pub fn with_contact(
        mut self,
        contact_id: &str,
        organization_id: Option<&str>,
        category: &str,
    ) -> Self {
        self.contacts.insert(
            contact_id.to_string(),
            ContactInfo {
                contact_id: contact_id.to_string(),
                organization_id: organization_id.map(str::to_string),
                professional_category: category.to_string(),
            },
        );
        self
    }

    pub fn with_profile(mut self, profile: OrganizationScheduleProfile) -> Self {
        self.profiles.insert(profile.organization_id.clone(), profile);
        self
    }

    pub fn with_events(self, events: impl IntoIterator<Item = EngagementEvent>) -> Self {
        if let Ok(mut stored) = self.events.write() {
            stored.extend(events);
        }
        self
    }

    /// Sleep inside every history fetch, widening the window in which
    /// concurrent fetches overlap.
    pub fn with_history_delay(mut self, delay: Duration) -> Self {
        self.history_delay = Some(delay);
        self
    }

    /// Record a new event, as the host pipeline would.
    pub fn push_event(&self, event: EngagementEvent) {
        if let Ok(mut stored) = self.events.write() {
            stored.push(event);
        }
    }

    pub fn fail(&self, op: StoreOp) {
        if let Ok(mut failing) = self.failing.write() {
            failing.insert(op);
        }
    }

    pub fn heal(&self, op: StoreOp) {
        if let Ok(mut failing) = self.failing.write() {
            failing.remove(&op);
        }
    }

    pub fn history_calls(&self) -> usize {
        self.history_calls.load(Ordering::SeqCst)
    }

    pub fn profile_calls(&self) -> usize {
        self.profile_calls.load(Ordering::SeqCst)
    }

    /// Peak number of history fetches observed running at once.
    pub fn max_concurrent_history(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    fn check(&self, op: StoreOp) -> TimingResult<()> {
        let failing = self.failing.read().map(|f| f.contains(&op)).unwrap_or(false);
        if failing {
            return Err(StoreError::Unavailable {
                reason: format!("{} injected failure", op.name()),
            }
            .into());
        }
        Ok(())
    }

    fn newest_first(
        &self,
        keep: impl Fn(&EngagementEvent) -> bool,
        limit: usize,
    ) -> Vec<EngagementEvent> {
        let stored = match self.events.read() {
            Ok(stored) => stored,
            Err(poisoned) => poisoned.into_inner(),
        };
        let mut matching: Vec<EngagementEvent> =
            stored.iter().filter(|e| keep(e)).cloned().collect();
        matching.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        matching.truncate(limit);
        matching
    }
}

impl EventStore for FixtureStore {
    fn engagement_history(
        &self,
        contact_id: &str,
        limit: usize,
    ) -> TimingResult<Vec<EngagementEvent>> {
        self.history_calls.fetch_add(1, Ordering::SeqCst);
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);
        if let Some(delay) = self.history_delay {
            std::thread::sleep(delay);
        }
        let result = self
            .check(StoreOp::History)
            .map(|_| self.newest_first(|e| e.contact_id == contact_id, limit));
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }

    fn organization_profile(
        &self,
        organization_id: &str,
    ) -> TimingResult<Option<OrganizationScheduleProfile>> {
        self.profile_calls.fetch_add(1, Ordering::SeqCst);
        self.check(StoreOp::Profile)?;
        Ok(self.profiles.get(organization_id).cloned())
    }

    fn contact_info(&self, contact_id: &str) -> TimingResult<Option<ContactInfo>> {
        self.check(StoreOp::ContactInfo)?;
        Ok(self.contacts.get(contact_id).cloned())
    }

    fn organization_engagements(
        &self,
        organization_id: &str,
        limit: usize,
    ) -> TimingResult<Vec<EngagementEvent>> {
        self.check(StoreOp::OrganizationEngagements)?;
        let members: HashSet<&str> = self
            .contacts
            .values()
            .filter(|c| c.organization_id.as_deref() == Some(organization_id))
            .map(|c| c.contact_id.as_str())
            .collect();
        Ok(self.newest_first(
            |e| {
                e.organization_id.as_deref() == Some(organization_id)
                    || members.contains(e.contact_id.as_str())
            },
            limit,
        ))
    }
}

/// A dental organization with a one-hour lunch and a Tuesday do-not-contact
/// period, shared by tests across crates.
pub fn dental_profile() -> OrganizationScheduleProfile {
    load_profile("profiles/dental_practice.json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadence_core::models::Channel;
    use chrono::NaiveDate;

    #[test]
    fn fixtures_root_exists() {
        assert!(fixtures_root().exists(), "test-fixtures directory not found");
    }

    #[test]
    fn all_fixture_files_exist() {
        for f in ["profiles/dental_practice.json", "scenarios/dental_office.json"] {
            assert!(fixture_exists(f), "Missing fixture: {}", f);
        }
    }

    #[test]
    fn dental_profile_parses() {
        let profile = dental_profile();
        assert_eq!(profile.organization_id, "org-dental");
        assert_eq!(profile.category, "dental");
        assert!(profile.busy_periods.iter().any(|b| b.avoid_contact));
        assert!(profile.preference("best_time").is_some());
    }

    #[test]
    fn scenario_store_answers_lookups() {
        let store = FixtureStore::from_fixture("scenarios/dental_office.json");
        let info = store.contact_info("dr-lee").unwrap().unwrap();
        assert_eq!(info.organization_id.as_deref(), Some("org-dental"));
        let history = store.engagement_history("dr-lee", 100).unwrap();
        assert!(!history.is_empty());
        assert!(history.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));
        assert!(!store.organization_engagements("org-dental", 500).unwrap().is_empty());
        assert!(store.organization_profile("org-dental").unwrap().is_some());
    }

    #[test]
    fn injected_failures_surface_as_store_errors() {
        let store = FixtureStore::new().with_contact("c1", None, "medical");
        store.fail(StoreOp::ContactInfo);
        let err = store.contact_info("c1").unwrap_err();
        assert!(err.is_upstream());
        store.heal(StoreOp::ContactInfo);
        assert!(store.contact_info("c1").unwrap().is_some());
    }

    #[test]
    fn history_respects_limit() {
        let ts = NaiveDate::from_ymd_opt(2024, 6, 4).unwrap();
        let events = (8..14).map(|h| {
            EngagementEvent::new("c1", Channel::Email, ts.and_hms_opt(h, 0, 0).unwrap(), 1.0)
        });
        let store = FixtureStore::new().with_events(events);
        let history = store.engagement_history("c1", 3).unwrap();
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].timestamp, ts.and_hms_opt(13, 0, 0).unwrap());
        assert_eq!(store.history_calls(), 1);
    }
}
