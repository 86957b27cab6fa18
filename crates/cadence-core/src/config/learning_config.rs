use serde::{Deserialize, Serialize};

use super::defaults;

/// Incremental learner thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LearningConfig {
    /// Events scoring above this update organization preferences.
    pub materiality_threshold: f64,
    /// A retraining signal is raised every N cached events per contact.
    pub retrain_every: u64,
    /// Confidence added to the tracked preference per material event.
    pub preference_increment: f64,
    /// Communication preference kind the learner reinforces.
    pub preference_kind: String,
}

impl Default for LearningConfig {
    fn default() -> Self {
        Self {
            materiality_threshold: defaults::DEFAULT_MATERIALITY_THRESHOLD,
            retrain_every: defaults::DEFAULT_RETRAIN_EVERY,
            preference_increment: defaults::DEFAULT_PREFERENCE_INCREMENT,
            preference_kind: defaults::DEFAULT_PREFERENCE_KIND.to_string(),
        }
    }
}
