use crate::ingest_worker::LoopExit;
use common::CloseControl;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Outcome of supervising the session's shutdown
#[derive(Debug)]
pub enum ShutdownOutcome {
    /// The ingestion loop reported its exit
    Completed(LoopExit),
    /// The loop did not report in time; teardown proceeds anyway
    Abandoned,
}

/// Race the interrupt notification against the loop's own completion
///
/// If the loop completes first there is nothing left to coordinate. On an
/// interrupt the peer is notified with a close frame (best effort, at most
/// once) and the loop is given `grace` to observe the closed stream and
/// report; expiry is not an error, it only bounds shutdown latency. If the
/// close frame cannot be sent there is nothing to wait for. Resource
/// teardown is the caller's job and happens regardless of the outcome.
pub async fn supervise(
    control: &mut dyn CloseControl,
    mut done: oneshot::Receiver<LoopExit>,
    interrupt: CancellationToken,
    grace: Duration,
) -> ShutdownOutcome {
    tokio::select! {
        result = &mut done => {
            match result {
                Ok(exit) => {
                    info!("Ingestion loop completed on its own");
                    ShutdownOutcome::Completed(exit)
                }
                Err(_) => {
                    warn!("Ingestion loop dropped its completion handle");
                    ShutdownOutcome::Abandoned
                }
            }
        }
        _ = interrupt.cancelled() => {
            info!("Interrupt received, notifying the endpoint");

            if let Err(e) = control.send_close("").await {
                warn!(error = %e, "Failed to send close frame, proceeding to teardown");
                return ShutdownOutcome::Abandoned;
            }

            match timeout(grace, done).await {
                Ok(Ok(exit)) => {
                    info!("Ingestion loop acknowledged the close");
                    ShutdownOutcome::Completed(exit)
                }
                Ok(Err(_)) => {
                    warn!("Ingestion loop dropped its completion handle");
                    ShutdownOutcome::Abandoned
                }
                Err(_) => {
                    warn!(
                        grace_ms = grace.as_millis(),
                        "Ingestion loop did not stop within the grace period"
                    );
                    ShutdownOutcome::Abandoned
                }
            }
        }
    }
}
