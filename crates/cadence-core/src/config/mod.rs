pub mod cache_config;
pub mod defaults;
pub mod engine_config;
pub mod learning_config;
pub mod observability_config;

pub use cache_config::CacheConfig;
pub use engine_config::EngineConfig;
pub use learning_config::LearningConfig;
pub use observability_config::ObservabilityConfig;

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::errors::{ConfigError, TimingResult};

/// Top-level configuration aggregating all subsystem configs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CadenceConfig {
    pub engine: EngineConfig,
    pub cache: CacheConfig,
    pub learning: LearningConfig,
    pub observability: ObservabilityConfig,
}

impl CadenceConfig {
    /// Parse a TOML string. Missing sections and fields take their defaults.
    pub fn from_toml(toml_str: &str) -> TimingResult<Self> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseFailed {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file.
    pub fn from_path(path: impl AsRef<Path>) -> TimingResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml(&raw)
    }

    fn validate(&self) -> TimingResult<()> {
        let engine = &self.engine;
        if engine.business_start_hour > engine.business_end_hour || engine.business_end_hour > 23 {
            return Err(ConfigError::InvalidValue {
                field: "engine.business_end_hour".into(),
                reason: format!(
                    "business hours {}..={} are not a valid range",
                    engine.business_start_hour, engine.business_end_hour
                ),
            }
            .into());
        }
        if engine.batch_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "engine.batch_size".into(),
                reason: "must be at least 1".into(),
            }
            .into());
        }
        if self.learning.retrain_every == 0 {
            return Err(ConfigError::InvalidValue {
                field: "learning.retrain_every".into(),
                reason: "must be at least 1".into(),
            }
            .into());
        }
        Ok(())
    }
}
