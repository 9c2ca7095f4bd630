use crate::ws::error::{ReceiveError, WriteError};
use async_trait::async_trait;
use bytes::Bytes;

/// Trait for the receive side of the streaming session
/// Abstracts the read half so the ingestion loop can run against a scripted source
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait FrameSource: Send {
    /// Receive the next data frame payload, preserving arrival order
    /// Control frames are handled by the protocol layer and never surface here
    /// Returns ReceiveError::Closed once the stream has ended
    async fn receive(&mut self) -> Result<Bytes, ReceiveError>;
}

/// Trait for the close-control side of the streaming session
/// Abstracts the write half used by the shutdown path
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait CloseControl: Send {
    /// Send a normal-closure close frame
    /// Does not wait for the peer to acknowledge
    async fn send_close(&mut self, reason: &str) -> Result<(), WriteError>;
}
