// Single source of truth for all default values.

// --- Engine ---
pub const DEFAULT_LOOKAHEAD_DAYS: u32 = 7;
pub const DEFAULT_BUSINESS_START_HOUR: u32 = 8;
pub const DEFAULT_BUSINESS_END_HOUR: u32 = 17;
pub const DEFAULT_BATCH_SIZE: usize = 10;
pub const DEFAULT_HISTORY_LIMIT: usize = 100;
pub const DEFAULT_INSIGHTS_LIMIT: usize = 500;
pub const DEFAULT_TIME_ZONE: &str = "America/New_York";
pub const DEFAULT_CATEGORY: &str = "medical";

// --- Cache ---
pub const DEFAULT_MAX_CONTACTS: u64 = 10_000;
pub const DEFAULT_MAX_ORGANIZATIONS: u64 = 1_000;
pub const DEFAULT_CACHE_TTL_SECS: u64 = 900; // 15 minutes

// --- Learning ---
pub const DEFAULT_MATERIALITY_THRESHOLD: f64 = 2.0;
pub const DEFAULT_RETRAIN_EVERY: u64 = 10;
pub const DEFAULT_PREFERENCE_INCREMENT: f64 = 0.01;
pub const DEFAULT_PREFERENCE_KIND: &str = "best_time";

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = true;
