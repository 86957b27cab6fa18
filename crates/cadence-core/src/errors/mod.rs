mod config_error;
mod store_error;
mod timing_error;

pub use config_error::ConfigError;
pub use store_error::StoreError;
pub use timing_error::TimingError;

/// Convenience alias used across every Cadence crate.
pub type TimingResult<T> = Result<T, TimingError>;
