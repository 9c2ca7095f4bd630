use crate::ws::error::{ConnectError, ReceiveError, WriteError};
use crate::ws::traits::{CloseControl, FrameSource};
use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::tungstenite::{self, Message};
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::info;
use url::Url;

type WsStream = WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>;

/// Path the push stream is served on
const STREAM_PATH: &str = "/stream/";

/// Build the streaming endpoint URL from the configured host and access key
///
/// The key rides in the query string and is a credential; logs must use
/// [`redacted_endpoint`] instead of the rendered URL.
pub fn endpoint_url(host: &str, key: &str) -> Result<Url, url::ParseError> {
    let mut endpoint = Url::parse(&format!("wss://{}", host))?;
    endpoint.set_path(STREAM_PATH);
    endpoint.query_pairs_mut().append_pair("key", key);
    Ok(endpoint)
}

/// Endpoint rendered without its query string, the only form safe for logs
pub fn redacted_endpoint(endpoint: &Url) -> String {
    let mut shown = endpoint.clone();
    shown.set_query(None);
    shown.to_string()
}

/// An established streaming session, prior to splitting
#[derive(Debug)]
pub struct StreamSession {
    reader: StreamReader,
    control: StreamControl,
}

/// Read half of the session, owned by the ingestion loop
#[derive(Debug)]
pub struct StreamReader {
    inner: SplitStream<WsStream>,
}

/// Write half of the session, owned by the shutdown path
///
/// Holding the only close-capable handle here keeps close initiation in
/// one place; the reader cannot race it.
#[derive(Debug)]
pub struct StreamControl {
    inner: SplitSink<WsStream, Message>,
}

impl StreamSession {
    /// Perform the handshake against the streaming endpoint
    ///
    /// A non-upgrade HTTP answer is reported as `HandshakeRejected` with the
    /// response status and body; any other failure is a dial error.
    pub async fn connect(endpoint: &Url) -> Result<Self, ConnectError> {
        info!(endpoint = %redacted_endpoint(endpoint), "Connecting to streaming endpoint");

        let (ws_stream, response) =
            connect_async(endpoint.as_str()).await.map_err(|e| match e {
                tungstenite::Error::Http(response) => {
                    let status = response.status().as_u16();
                    let body = response
                        .body()
                        .as_deref()
                        .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
                        .unwrap_or_default();
                    ConnectError::HandshakeRejected { status, body }
                }
                other => ConnectError::Dial(other),
            })?;

        info!(
            status = response.status().as_u16(),
            "Successfully connected to streaming endpoint"
        );

        let (write, read) = ws_stream.split();
        Ok(Self {
            reader: StreamReader { inner: read },
            control: StreamControl { inner: write },
        })
    }

    /// Split the session into its independently owned halves
    pub fn split(self) -> (StreamReader, StreamControl) {
        (self.reader, self.control)
    }
}

#[async_trait]
impl FrameSource for StreamReader {
    async fn receive(&mut self) -> Result<Bytes, ReceiveError> {
        loop {
            match self.inner.next().await {
                Some(Ok(Message::Text(text))) => return Ok(Bytes::from(text)),
                Some(Ok(Message::Binary(payload))) => return Ok(Bytes::from(payload)),
                Some(Ok(Message::Close(frame))) => {
                    return Err(ReceiveError::Closed {
                        reason: frame.map(|f| format!("{} ({})", f.reason, u16::from(f.code))),
                    });
                }
                // Ping/pong are answered by the protocol layer
                Some(Ok(_)) => continue,
                Some(Err(e)) => return Err(ReceiveError::Read(e)),
                None => return Err(ReceiveError::Closed { reason: None }),
            }
        }
    }
}

impl StreamControl {
    /// Release the write half
    pub async fn close(self) {
        info!("Closing streaming connection");
        // Socket teardown happens once both halves are dropped
    }
}

#[async_trait]
impl CloseControl for StreamControl {
    async fn send_close(&mut self, reason: &str) -> Result<(), WriteError> {
        let frame = CloseFrame {
            code: CloseCode::Normal,
            reason: reason.to_owned().into(),
        };
        self.inner.send(Message::Close(Some(frame))).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_url_carries_host_path_and_key() {
        let endpoint = endpoint_url("stream.example.com", "secret-key").unwrap();

        assert_eq!(
            endpoint.as_str(),
            "wss://stream.example.com/stream/?key=secret-key"
        );
    }

    #[test]
    fn redacted_endpoint_hides_the_key() {
        let endpoint = endpoint_url("stream.example.com", "secret-key").unwrap();

        let shown = redacted_endpoint(&endpoint);

        assert_eq!(shown, "wss://stream.example.com/stream/");
        assert!(!shown.contains("secret-key"));
    }

    #[test]
    fn endpoint_url_rejects_unparseable_host() {
        assert!(endpoint_url("not a host", "key").is_err());
    }
}
