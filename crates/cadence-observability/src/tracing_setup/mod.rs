//! Tracing setup: structured logging with span definitions and event types.

pub mod events;
pub mod spans;

use cadence_core::config::ObservabilityConfig;
use tracing_subscriber::EnvFilter;

/// Environment variable consulted for the log filter.
pub const LOG_ENV_VAR: &str = "CADENCE_LOG";

/// Install the default subscriber: JSON lines at `info`, unless `CADENCE_LOG`
/// says otherwise.
pub fn init_tracing() -> bool {
    init_tracing_from_config(&ObservabilityConfig::default())
}

/// Initialize from config. `CADENCE_LOG` still wins over `log_level`.
/// Returns false if a global subscriber was already installed.
pub fn init_tracing_from_config(config: &ObservabilityConfig) -> bool {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);
    if config.json {
        builder.json().try_init().is_ok()
    } else {
        builder.try_init().is_ok()
    }
}
