//! Cowrite Synchronization Session
//!
//! Owns the WebSocket connection for one open document view:
//! - connect/teardown and the connection state machine
//! - inbound frame dispatch to presence and the event channel
//! - best-effort outbound sends
//!
//! There is no automatic reconnect: once a session reaches
//! `Disconnected`, the caller opens a new one (typically by reopening
//! the document view).

pub mod dispatch;
pub mod error;
pub mod session;

pub use error::{SessionError, SessionResult};
pub use session::{SessionEvent, SyncSession};
