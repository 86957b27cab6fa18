//! # cadence-learning
//!
//! Keeps the prediction caches current as engagement events arrive:
//! append → reinforce organization preference → signal retraining.
//! The learner is a single consumer; feed it directly or through a channel.

pub mod learner;
pub mod sink;

pub use learner::{IncrementalLearner, LearnOutcome};
pub use sink::{ChannelSink, RetrainingSignal};
