/// Failures reported by an `EventStore` implementation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("event store unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("event store query `{operation}` failed: {reason}")]
    QueryFailed { operation: String, reason: String },

    #[error("malformed record for {entity} `{id}`: {details}")]
    MalformedRecord {
        entity: String,
        id: String,
        details: String,
    },
}
