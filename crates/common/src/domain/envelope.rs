use serde::Deserialize;

use crate::domain::result::DomainResult;

/// Status code marking a frame as a deliverable data event
pub const EVENT_CODE_OK: i64 = 100;

/// Opaque event payload, forwarded to the sink exactly as received
pub type EventRecord = serde_json::Map<String, serde_json::Value>;

/// Decoded status wrapper around one raw stream frame
///
/// Every frame carries a status `code`. Frames with [`EVENT_CODE_OK`] carry
/// the event payload; anything else is a service-level rejection and may
/// carry error detail instead.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Envelope {
    pub code: i64,
    #[serde(default)]
    pub event: Option<EventRecord>,
    #[serde(default)]
    pub service_message: Option<ServiceMessage>,
}

/// Error detail the endpoint attaches to rejected frames
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ServiceMessage {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub service_code: Option<i64>,
}

impl Envelope {
    /// Decode a raw frame payload
    ///
    /// A frame that is not a JSON object or is missing its `code` field is
    /// malformed; callers decide whether to skip or abort.
    pub fn decode(frame: &[u8]) -> DomainResult<Self> {
        let envelope = serde_json::from_slice(frame)?;
        Ok(envelope)
    }

    /// Whether this envelope carries a deliverable event
    pub fn is_event(&self) -> bool {
        self.code == EVENT_CODE_OK
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;
    use serde_json::json;

    #[test]
    fn decodes_event_frame() {
        let envelope = Envelope::decode(br#"{"code":100,"event":{"id":1,"text":"hello"}}"#)
            .expect("event frame should decode");

        assert!(envelope.is_event());
        let event = envelope.event.expect("event payload should be present");
        assert_eq!(event.get("id"), Some(&json!(1)));
        assert_eq!(event.get("text"), Some(&json!("hello")));
    }

    #[test]
    fn decodes_rejection_frame() {
        let envelope = Envelope::decode(
            br#"{"code":300,"service_message":{"message":"key expired","service_code":3}}"#,
        )
        .expect("rejection frame should decode");

        assert!(!envelope.is_event());
        let detail = envelope.service_message.expect("detail should be present");
        assert_eq!(detail.message.as_deref(), Some("key expired"));
        assert_eq!(detail.service_code, Some(3));
    }

    #[test]
    fn tolerates_unknown_fields() {
        let envelope = Envelope::decode(br#"{"code":100,"event":{},"extra":"ignored"}"#)
            .expect("unknown fields should be ignored");

        assert!(envelope.is_event());
    }

    #[test]
    fn rejects_frame_without_code() {
        let result = Envelope::decode(br#"{"event":{"id":1}}"#);

        assert!(matches!(result, Err(DomainError::MalformedEnvelope(_))));
    }

    #[test]
    fn rejects_non_integer_code() {
        let result = Envelope::decode(br#"{"code":"ok","event":{}}"#);

        assert!(matches!(result, Err(DomainError::MalformedEnvelope(_))));
    }

    #[test]
    fn rejects_non_json_frame() {
        let result = Envelope::decode(b"not json");

        assert!(matches!(result, Err(DomainError::MalformedEnvelope(_))));
    }
}
