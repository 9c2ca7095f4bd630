use async_trait::async_trait;
use common::{DomainError, DomainResult, EventRecord, EventSink, MongoClient, StoreAck};
use mongodb::Collection;
use tracing::{debug, error};

/// MongoDB implementation of the event sink
///
/// One insert per event. The record is written exactly as received; the
/// store assigns the document id carried back in the acknowledgement.
pub struct MongoEventSink {
    collection: Collection<EventRecord>,
}

impl MongoEventSink {
    /// Create a new MongoEventSink over the named collection
    pub fn new(client: &MongoClient, collection: &str) -> Self {
        Self {
            collection: client.database().collection::<EventRecord>(collection),
        }
    }
}

#[async_trait]
impl EventSink for MongoEventSink {
    async fn store(&self, event: &EventRecord) -> DomainResult<StoreAck> {
        let result = self.collection.insert_one(event, None).await.map_err(|e| {
            error!(error = %e, "Failed to insert event document");
            DomainError::StoreError(e.into())
        })?;

        debug!(inserted_id = %result.inserted_id, "Inserted event document");
        Ok(StoreAck {
            inserted_id: result.inserted_id.to_string(),
        })
    }
}
