use super::{ConfigError, StoreError};

/// Top-level error type for the timing engine.
///
/// Missing data is never an error: absent history, schedules, or unknown
/// professional categories resolve to documented fallbacks. Only conditions
/// with no sensible default surface here.
#[derive(Debug, thiserror::Error)]
pub enum TimingError {
    #[error("contact not found: {contact_id}")]
    ContactNotFound { contact_id: String },

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

impl TimingError {
    /// Whether the error stems from an upstream dependency rather than the
    /// caller's input. Upstream failures are degraded to fallbacks.
    pub fn is_upstream(&self) -> bool {
        matches!(self, Self::Store(_))
    }
}
