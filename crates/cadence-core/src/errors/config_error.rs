/// Configuration and static-table loading errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse TOML: {reason}")]
    ParseFailed { reason: String },

    #[error("failed to read {path}: {reason}")]
    ReadFailed { path: String, reason: String },

    #[error("invalid time range `{value}`: expected HH:MM-HH:MM with start before end")]
    InvalidTimeRange { value: String },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}
