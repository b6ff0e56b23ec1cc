//! Inbound frame classification and routing

use parking_lot::RwLock;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use cowrite_core::PresenceRoster;
use cowrite_protocol::{codec, WireMessage};

use crate::session::SessionEvent;

/// Decode one inbound frame and route it.
///
/// A frame that fails to decode is logged and discarded; one malformed
/// frame must not terminate the session. Presence updates mutate the
/// roster here, operations are forwarded verbatim on the event channel
/// with no interpretation of their fields.
pub fn handle_frame(
    frame: &str,
    roster: &RwLock<PresenceRoster>,
    events: &mpsc::UnboundedSender<SessionEvent>,
) {
    let message = match codec::decode(frame) {
        Ok(message) => message,
        Err(e) => {
            warn!(error = %e, "discarding malformed frame");
            return;
        }
    };

    match message {
        WireMessage::Presence(presence) => match presence.username {
            Some(username) => {
                if roster.write().add(username.clone()) {
                    let _ = events.send(SessionEvent::CollaboratorJoined(username));
                }
            }
            None => debug!("presence frame without username ignored"),
        },
        WireMessage::Sync(_) => {
            // Reserved for full-state reconciliation; nothing consumes it
            // yet.
            debug!("sync frame ignored");
        }
        WireMessage::Operation(operation) => {
            let _ = events.send(SessionEvent::RemoteOperation(operation));
        }
    }
}
