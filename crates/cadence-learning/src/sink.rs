//! Channel-backed retraining sink.

use cadence_core::traits::RetrainingSink;
use tokio::sync::mpsc;

/// A contact has accumulated enough new events to retrain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrainingSignal {
    pub contact_id: String,
    pub cached_events: u64,
}

/// Forwards retraining signals to whoever holds the receiver.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<RetrainingSignal>,
}

impl ChannelSink {
    pub fn new(tx: mpsc::UnboundedSender<RetrainingSignal>) -> Self {
        Self { tx }
    }

    /// A sink and the receiver its signals arrive on.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<RetrainingSignal>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }
}

impl RetrainingSink for ChannelSink {
    fn retraining_needed(&self, contact_id: &str, cached_events: u64) {
        let signal = RetrainingSignal {
            contact_id: contact_id.to_string(),
            cached_events,
        };
        if self.tx.send(signal).is_err() {
            tracing::debug!(
                contact_id,
                cached_events,
                "retraining receiver dropped; signal discarded"
            );
        }
    }
}
