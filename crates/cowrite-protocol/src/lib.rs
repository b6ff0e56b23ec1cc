//! Wire protocol for the Cowrite synchronization connection
//!
//! The sync endpoint exchanges UTF-8 text frames over a persistent
//! WebSocket, one JSON object per frame, tagged by `type`:
//!
//! ```text
//! {"type":"OPERATION","opType":"INSERT","position":0,
//!  "content":"...","clientRevision":4}                 # content operation
//! {"type":"PRESENCE","userId":"...","username":"alice",
//!  "event":"JOIN"}                                     # collaborator join/leave
//! {"type":"SYNC", ...}                                 # full-state reconciliation
//! ```
//!
//! Outbound frames are always `OPERATION`; inbound frames may be any of the
//! three kinds. No batching, no binary frames, no compression.

pub mod codec;
pub mod error;
pub mod message;

pub use codec::{decode, encode, MAX_FRAME_SIZE};
pub use error::{ProtocolError, ProtocolResult};
pub use message::{OpKind, Operation, Presence, PresenceEvent, SyncState, WireMessage};
