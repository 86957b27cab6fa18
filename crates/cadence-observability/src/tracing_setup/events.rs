//! Structured log events for key engine operations.
//!
//! Each function emits a `tracing` event with structured fields.

/// An upstream lookup failed and the engine fell back to missing-data defaults.
pub fn store_degraded(operation: &str, key: &str, failure: &str, fallback: &str) {
    tracing::warn!(
        event = "store_degraded",
        operation = %operation,
        key = %key,
        failure = %failure,
        fallback = %fallback,
        "event store lookup degraded"
    );
}

/// A contact's category had no norms entry.
pub fn norms_fallback(requested: &str, applied: &str) {
    tracing::debug!(
        event = "norms_fallback",
        requested = %requested,
        applied = %applied,
        "domain norms fell back"
    );
}

/// A prediction was produced.
pub fn prediction_completed(
    contact_id: &str,
    confidence: f64,
    used_default: bool,
    candidates: usize,
) {
    tracing::info!(
        event = "prediction_completed",
        contact_id = %contact_id,
        confidence = confidence,
        used_default = used_default,
        candidates = candidates,
        "prediction completed"
    );
}

/// One member of a batch failed; the rest of the batch continues.
pub fn batch_member_failed(contact_id: &str, error: &str) {
    tracing::warn!(
        event = "batch_member_failed",
        contact_id = %contact_id,
        error = %error,
        "batch member prediction failed"
    );
}

/// A batch group finished.
pub fn batch_group_completed(group: usize, size: usize, failed: usize) {
    tracing::debug!(
        event = "batch_group_completed",
        group = group,
        size = size,
        failed = failed,
        "batch group completed"
    );
}

/// An organization preference gained confidence from a material event.
pub fn preference_reinforced(organization_id: &str, kind: &str, confidence: f64) {
    tracing::debug!(
        event = "preference_reinforced",
        organization_id = %organization_id,
        kind = %kind,
        confidence = confidence,
        "organization preference reinforced"
    );
}

/// Enough new events accumulated for a contact to warrant retraining.
pub fn retraining_signalled(contact_id: &str, cached_events: u64) {
    tracing::info!(
        event = "retraining_signalled",
        contact_id = %contact_id,
        cached_events = cached_events,
        "retraining needed"
    );
}
