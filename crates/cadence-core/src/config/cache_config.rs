use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::defaults;

/// Bounds for the per-contact and per-organization caches.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub max_contacts: u64,
    pub max_organizations: u64,
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_contacts: defaults::DEFAULT_MAX_CONTACTS,
            max_organizations: defaults::DEFAULT_MAX_ORGANIZATIONS,
            ttl_secs: defaults::DEFAULT_CACHE_TTL_SECS,
        }
    }
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}
