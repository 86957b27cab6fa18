//! The four independent analyses feeding candidate scoring.

mod channel;
mod norms;
mod pattern;
mod schedule;

pub use channel::analyze_channels;
pub use norms::{DomainNormProvider, NormLookup};
pub use pattern::{IndividualPattern, PeakTime};
pub use schedule::{AvailableWindow, ScheduleAnalysis};
