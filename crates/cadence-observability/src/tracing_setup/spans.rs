//! Span definitions per operation: prediction, batch, insights, learning.

/// Create a single-contact prediction span.
#[macro_export]
macro_rules! prediction_span {
    ($contact_id:expr, $channel:expr, $urgency:expr) => {
        tracing::info_span!(
            "cadence.prediction",
            contact_id = %$contact_id,
            channel = %$channel,
            urgency = %$urgency
        )
    };
}

/// Create a batch prediction span.
#[macro_export]
macro_rules! batch_span {
    ($contacts:expr, $group_size:expr) => {
        tracing::info_span!("cadence.batch", contacts = $contacts, group_size = $group_size)
    };
}

/// Create an organization insights span.
#[macro_export]
macro_rules! insights_span {
    ($organization_id:expr) => {
        tracing::info_span!("cadence.insights", organization_id = %$organization_id)
    };
}

/// Create a learning span for one consumed event.
#[macro_export]
macro_rules! learning_span {
    ($contact_id:expr) => {
        tracing::debug_span!("cadence.learning", contact_id = %$contact_id)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const PREDICTION: &str = "cadence.prediction";
    pub const BATCH: &str = "cadence.batch";
    pub const INSIGHTS: &str = "cadence.insights";
    pub const LEARNING: &str = "cadence.learning";
}
