use crate::domain::envelope::EventRecord;
use crate::domain::result::DomainResult;
use async_trait::async_trait;

/// Store-assigned acknowledgement for one persisted event
#[derive(Debug, Clone, PartialEq)]
pub struct StoreAck {
    pub inserted_id: String,
}

/// Trait for persisting admissible events
///
/// Implementations should:
/// - Store the event record exactly as received, without reshaping it
/// - Return the store-assigned identifier on success
/// - Return error if the write fails
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait EventSink: Send + Sync {
    /// Store a single event record
    ///
    /// # Arguments
    /// * `event` - EventRecord to persist
    ///
    /// # Returns
    /// StoreAck carrying the assigned identifier, DomainError on failure
    async fn store(&self, event: &EventRecord) -> DomainResult<StoreAck>;
}
