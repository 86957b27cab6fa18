//! # cadence-observability
//!
//! Structured logging for the timing engine: subscriber setup, span macros,
//! and typed log events for degradations, predictions, and learning.

pub mod tracing_setup;

pub use tracing_setup::events;
pub use tracing_setup::{init_tracing, init_tracing_from_config};
