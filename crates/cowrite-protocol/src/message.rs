//! Typed operation records exchanged over the synchronization connection

use cowrite_core::LocalChange;
use serde::{Deserialize, Serialize};

/// Operation kind carried by an `OPERATION` frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OpKind {
    Insert,
    Delete,
}

/// A content operation.
///
/// `content` carries the full replacement content rather than a positional
/// delta, and `client_revision` the revision the sender believed was current
/// when producing the operation. The backend enriches relayed operations
/// with `user_id` and `username`; both must survive a decode/encode cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    pub op_type: OpKind,
    #[serde(default)]
    pub position: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<u64>,
    #[serde(default)]
    pub client_revision: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl Operation {
    /// Full-content insert, the only operation this client produces.
    pub fn insert(content: impl Into<String>, client_revision: u64) -> Self {
        Operation {
            op_type: OpKind::Insert,
            position: 0,
            content: Some(content.into()),
            length: None,
            client_revision,
            user_id: None,
            username: None,
        }
    }

    pub fn delete(position: u64, length: u64, client_revision: u64) -> Self {
        Operation {
            op_type: OpKind::Delete,
            position,
            content: None,
            length: Some(length),
            client_revision,
            user_id: None,
            username: None,
        }
    }
}

impl From<LocalChange> for Operation {
    fn from(change: LocalChange) -> Self {
        Operation::insert(change.content, change.client_revision)
    }
}

/// Collaborator join/leave notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Presence {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<PresenceEvent>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PresenceEvent {
    Join,
    Leave,
}

/// Full-state reconciliation frame.
///
/// The payload is unconstrained by this client; known fields are decoded
/// and anything else is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<u64>,
}

/// A frame of the synchronization protocol, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum WireMessage {
    #[serde(rename = "OPERATION")]
    Operation(Operation),
    #[serde(rename = "PRESENCE")]
    Presence(Presence),
    #[serde(rename = "SYNC")]
    Sync(SyncState),
}

impl From<Operation> for WireMessage {
    fn from(operation: Operation) -> Self {
        WireMessage::Operation(operation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_constructor() {
        let op = Operation::insert("Hello", 4);

        assert_eq!(op.op_type, OpKind::Insert);
        assert_eq!(op.position, 0);
        assert_eq!(op.content.as_deref(), Some("Hello"));
        assert_eq!(op.length, None);
        assert_eq!(op.client_revision, 4);
    }

    #[test]
    fn test_local_change_becomes_insert() {
        let change = LocalChange {
            content: "draft".into(),
            client_revision: 9,
        };

        let op = Operation::from(change);

        assert_eq!(op.op_type, OpKind::Insert);
        assert_eq!(op.content.as_deref(), Some("draft"));
        assert_eq!(op.client_revision, 9);
    }
}
