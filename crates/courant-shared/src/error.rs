use thiserror::Error;

use crate::types::RecordId;

/// A user input was rejected locally.  Recovered in place, surfaced
/// as a no-op to the UI, never fatal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Comment text is empty after trimming")]
    EmptyComment,

    #[error("No record with id {0} in the current view")]
    UnknownRecord(RecordId),
}

/// The stream provider reported a failure.  Visible but non-fatal;
/// retry policy belongs to the transport layer, not this core.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubscriptionError {
    #[error("Stream provider connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Stream provider closed the subscription")]
    ProviderClosed,
}
