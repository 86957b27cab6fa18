//! # cadence-prediction
//!
//! Recommends when, and over which channel, to reach a contact.
//!
//! ## Analyses
//!
//! | Analysis | Signal Source |
//! |----------|--------------|
//! | Individual pattern | Mean engagement per (weekday, hour) bucket |
//! | Organization schedule | Office hours, lunch, and do-not-contact periods |
//! | Domain norms | Static best/avoid times per professional category |
//! | Channel preference | Engagement rate and latency per channel |
//!
//! ## Selection
//!
//! Hourly candidates over a 7-day horizon are scored from a 0.5 base,
//! adjusted by each analysis, biased toward sooner slots under high urgency,
//! and clamped to [0, 1]. The best candidate becomes the recommendation;
//! nearby hours and the next business day become alternatives.

pub mod analysis;
pub mod batch;
pub mod cache;
pub mod confidence;
pub mod engine;
pub mod insights;
pub mod reasoning;
pub mod scoring;

pub use analysis::{DomainNormProvider, IndividualPattern, NormLookup, ScheduleAnalysis};
pub use batch::BatchOutcome;
pub use cache::{EngineCaches, HistoryCache, ProfileCache};
pub use engine::TimingEngine;
pub use insights::build_insights;
pub use scoring::{Candidate, Selection};
