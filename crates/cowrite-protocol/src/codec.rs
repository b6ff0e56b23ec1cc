//! Frame encoding and decoding

use crate::error::{ProtocolError, ProtocolResult};
use crate::message::WireMessage;

/// Maximum frame size (1MB)
pub const MAX_FRAME_SIZE: usize = 1024 * 1024;

/// Decode one UTF-8 text frame into a wire message.
pub fn decode(frame: &str) -> ProtocolResult<WireMessage> {
    if frame.len() > MAX_FRAME_SIZE {
        return Err(ProtocolError::FrameTooLarge {
            size: frame.len(),
            max: MAX_FRAME_SIZE,
        });
    }

    serde_json::from_str(frame).map_err(|e| ProtocolError::InvalidFrame(e.to_string()))
}

/// Encode a wire message as one JSON text frame.
pub fn encode(message: &WireMessage) -> ProtocolResult<String> {
    serde_json::to_string(message).map_err(|e| ProtocolError::Encode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::{OpKind, Operation, PresenceEvent, WireMessage};

    #[test]
    fn test_decode_operation() {
        let frame = r#"{"type":"OPERATION","opType":"INSERT","position":0,
            "content":"Hello","length":0,"clientRevision":4,
            "userId":"u-1","username":"alice"}"#;

        let msg = decode(frame).unwrap();

        match msg {
            WireMessage::Operation(op) => {
                assert_eq!(op.op_type, OpKind::Insert);
                assert_eq!(op.position, 0);
                assert_eq!(op.content.as_deref(), Some("Hello"));
                assert_eq!(op.client_revision, 4);
                assert_eq!(op.username.as_deref(), Some("alice"));
            }
            other => panic!("expected operation, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_presence_with_event() {
        let frame = r#"{"type":"PRESENCE","userId":"u-2","username":"bob","event":"LEAVE"}"#;

        let msg = decode(frame).unwrap();

        match msg {
            WireMessage::Presence(p) => {
                assert_eq!(p.username.as_deref(), Some("bob"));
                assert_eq!(p.event, Some(PresenceEvent::Leave));
            }
            other => panic!("expected presence, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_presence_without_username() {
        let frame = r#"{"type":"PRESENCE","userId":"u-3"}"#;

        let msg = decode(frame).unwrap();

        match msg {
            WireMessage::Presence(p) => assert_eq!(p.username, None),
            other => panic!("expected presence, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_sync_tolerates_unknown_payload() {
        let frame = r#"{"type":"SYNC","content":"snapshot","revision":7,"users":["a","b"]}"#;

        let msg = decode(frame).unwrap();

        match msg {
            WireMessage::Sync(sync) => {
                assert_eq!(sync.content.as_deref(), Some("snapshot"));
                assert_eq!(sync.revision, Some(7));
            }
            other => panic!("expected sync, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_rejects_non_json() {
        assert!(decode("not json at all").is_err());
    }

    #[test]
    fn test_decode_rejects_unknown_type() {
        assert!(decode(r#"{"type":"NOPE","content":"x"}"#).is_err());
    }

    #[test]
    fn test_decode_rejects_oversized_frame() {
        let huge = format!(
            r#"{{"type":"OPERATION","opType":"INSERT","content":"{}"}}"#,
            "x".repeat(MAX_FRAME_SIZE + 1)
        );

        assert!(matches!(
            decode(&huge),
            Err(ProtocolError::FrameTooLarge { .. })
        ));
    }

    #[test]
    fn test_encode_insert_omits_absent_fields() {
        let msg = WireMessage::from(Operation::insert("Hello", 0));

        let frame = encode(&msg).unwrap();

        assert_eq!(
            frame,
            r#"{"type":"OPERATION","opType":"INSERT","position":0,"content":"Hello","clientRevision":0}"#
        );
    }

    #[test]
    fn test_operation_roundtrip_preserves_fields() {
        let mut op = Operation::insert("Hello", 3);
        op.user_id = Some("u-9".into());
        op.username = Some("carol".into());

        let frame = encode(&WireMessage::from(op.clone())).unwrap();
        let decoded = decode(&frame).unwrap();

        assert_eq!(decoded, WireMessage::Operation(op));
    }

    #[test]
    fn test_delete_roundtrip() {
        let op = Operation::delete(10, 5, 2);

        let frame = encode(&WireMessage::from(op.clone())).unwrap();

        match decode(&frame).unwrap() {
            WireMessage::Operation(decoded) => {
                assert_eq!(decoded, op);
                assert_eq!(decoded.length, Some(5));
            }
            other => panic!("expected operation, got {:?}", other),
        }
    }
}
