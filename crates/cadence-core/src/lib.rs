//! # cadence-core
//!
//! Foundation crate for the Cadence engagement timing engine.
//! Defines the data model, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod time;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::CadenceConfig;
pub use errors::{TimingError, TimingResult};
pub use models::{
    Channel, EngagementAction, EngagementEvent, OrganizationScheduleProfile, TimeRange,
    TimingPrediction, Urgency,
};
