//! Candidate scoring, selection, and alternative windows.
//!
//! Scoring is a pure function of the request time and the four analyses, so
//! the same inputs always yield the same recommendation.

mod alternatives;
mod candidates;
mod selector;

pub use alternatives::alternatives;
pub use candidates::{enumerate, score_at, score_candidate, urgency_multiplier};
pub use selector::{default_time, select};

use cadence_core::config::EngineConfig;
use cadence_core::models::Urgency;
use chrono::NaiveDateTime;
use serde::Serialize;

use crate::analysis::{IndividualPattern, NormLookup, ScheduleAnalysis};

/// Everything candidate scoring reads. Built once per prediction.
#[derive(Debug, Clone, Copy)]
pub struct ScoringInputs<'a> {
    pub now: NaiveDateTime,
    pub urgency: Urgency,
    pub pattern: &'a IndividualPattern,
    pub schedule: &'a ScheduleAnalysis,
    pub norms: NormLookup<'a>,
    pub config: &'a EngineConfig,
}

/// A scored hourly slot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Candidate {
    pub time: NaiveDateTime,
    pub score: f64,
}

/// The chosen slot and how it was reached.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Selection {
    pub optimal: Candidate,
    pub used_default: bool,
    pub candidates_considered: usize,
}
