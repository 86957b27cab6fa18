mod clock;
mod event_store;
mod retraining;

pub use clock::{Clock, FixedClock, SystemClock};
pub use event_store::EventStore;
pub use retraining::{NoOpRetrainingSink, RetrainingSink};
