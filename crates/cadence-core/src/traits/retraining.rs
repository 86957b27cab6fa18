/// Receiver of "retraining needed" notifications raised by the learner.
///
/// The engine only announces that enough new events have accumulated for a
/// contact; what retraining means is up to the consumer.
pub trait RetrainingSink: Send + Sync {
    fn retraining_needed(&self, contact_id: &str, cached_events: u64);
}

/// Discards every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpRetrainingSink;

impl RetrainingSink for NoOpRetrainingSink {
    fn retraining_needed(&self, _contact_id: &str, _cached_events: u64) {}
}
