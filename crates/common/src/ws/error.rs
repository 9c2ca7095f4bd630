use thiserror::Error;
use tokio_tungstenite::tungstenite;

/// Failure to establish the streaming session
///
/// A handshake rejection means the endpoint answered the upgrade request
/// with a plain HTTP response; its status and body carry the reason and are
/// surfaced for diagnosis. Anything else is a network-level dial failure.
#[derive(Error, Debug)]
pub enum ConnectError {
    #[error("Handshake rejected with status {status}: {body}")]
    HandshakeRejected { status: u16, body: String },

    #[error("Dial failed: {0}")]
    Dial(#[from] tungstenite::Error),
}

/// Failure of a single receive
#[derive(Error, Debug)]
pub enum ReceiveError {
    /// The peer sent a close frame or the stream ended
    #[error("Stream closed")]
    Closed { reason: Option<String> },

    #[error("Read failed: {0}")]
    Read(tungstenite::Error),
}

/// Failure to send the close control frame
#[derive(Error, Debug)]
#[error("Close frame send failed: {0}")]
pub struct WriteError(#[from] tungstenite::Error);
