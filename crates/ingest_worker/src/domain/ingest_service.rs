use common::{DomainResult, Envelope, EventSink, StoreAck};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// What became of a single frame
#[derive(Debug, Clone, PartialEq)]
pub enum FrameDisposition {
    /// Admissible event, persisted; carries the sink acknowledgement
    Stored(StoreAck),
    /// Decoded frame whose status code marks it as an endpoint rejection
    Rejected { code: i64 },
    /// Frame that could not be decoded into an envelope
    Malformed,
}

/// Domain service that applies the per-frame pipeline
///
/// Flow:
/// 1. Decode the raw frame into an envelope
/// 2. Filter on the status code
/// 3. Dispatch the event payload to the sink, unchanged
///
/// Malformed and rejected frames are logged with their raw payload and
/// consumed; only a sink failure propagates, since a lost write is fatal
/// for the run.
pub struct IngestService {
    sink: Arc<dyn EventSink>,
}

impl IngestService {
    /// Create a new IngestService with its sink dependency
    pub fn new(sink: Arc<dyn EventSink>) -> Self {
        Self { sink }
    }

    /// Process one raw frame end to end
    #[instrument(skip_all, fields(frame_size = frame.len()))]
    pub async fn process_frame(&self, frame: &[u8]) -> DomainResult<FrameDisposition> {
        let envelope = match Envelope::decode(frame) {
            Ok(envelope) => envelope,
            Err(e) => {
                warn!(
                    error = %e,
                    payload = %String::from_utf8_lossy(frame),
                    "skipping malformed frame"
                );
                return Ok(FrameDisposition::Malformed);
            }
        };

        if !envelope.is_event() {
            warn!(
                code = envelope.code,
                payload = %String::from_utf8_lossy(frame),
                "skipping frame rejected by the endpoint"
            );
            return Ok(FrameDisposition::Rejected {
                code: envelope.code,
            });
        }

        let Some(event) = envelope.event else {
            warn!(
                payload = %String::from_utf8_lossy(frame),
                "skipping event frame without an event payload"
            );
            return Ok(FrameDisposition::Malformed);
        };

        let ack = self.sink.store(&event).await?;
        info!(inserted_id = %ack.inserted_id, "stored event");
        Ok(FrameDisposition::Stored(ack))
    }
}
