use crate::domain::IngestService;
use common::{DomainError, EventSink, FrameSource, ReceiveError};
use std::sync::Arc;
use tokio::sync::oneshot;
use tracing::{debug, error, info};

/// Why the ingestion loop stopped
#[derive(Debug)]
pub enum LoopExit {
    /// The stream ended after a local or remote close
    StreamClosed,
    /// A receive failed at the transport level
    ReadFailed(ReceiveError),
    /// The sink rejected a dispatch
    SinkFailed(DomainError),
}

/// Long-running worker draining the streaming session into the sink
///
/// The loop stops only through its own results: end of stream, a failed
/// read, or a failed dispatch. External shutdown reaches it as a
/// transport-level close observed on the next receive; nothing cancels an
/// in-flight dispatch.
pub struct IngestWorker {
    source: Box<dyn FrameSource>,
    service: IngestService,
}

impl IngestWorker {
    /// Create a new IngestWorker over a frame source and an event sink
    pub fn new(source: Box<dyn FrameSource>, sink: Arc<dyn EventSink>) -> Self {
        Self {
            source,
            service: IngestService::new(sink),
        }
    }

    /// Run the receive/decode/filter/dispatch loop until it stops
    ///
    /// Fires `done` exactly once, on every exit path. The send is
    /// non-blocking; an absent receiver is ignored.
    pub async fn run(mut self, done: oneshot::Sender<LoopExit>) {
        info!("Ingestion loop started");

        let exit = self.drain().await;
        match &exit {
            LoopExit::StreamClosed => info!("Ingestion loop stopped: stream closed"),
            LoopExit::ReadFailed(e) => error!(error = %e, "Ingestion loop stopped: read failed"),
            LoopExit::SinkFailed(e) => error!(error = %e, "Ingestion loop stopped: sink failure"),
        }

        let _ = done.send(exit);
    }

    async fn drain(&mut self) -> LoopExit {
        loop {
            let frame = match self.source.receive().await {
                Ok(frame) => frame,
                Err(ReceiveError::Closed { reason }) => {
                    if let Some(reason) = reason {
                        debug!(reason = %reason, "close frame received");
                    }
                    return LoopExit::StreamClosed;
                }
                Err(e) => return LoopExit::ReadFailed(e),
            };

            if let Err(e) = self.service.process_frame(&frame).await {
                return LoopExit::SinkFailed(e);
            }
        }
    }
}
