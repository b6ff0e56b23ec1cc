//! Synchronization session over a WebSocket connection

use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use parking_lot::RwLock;
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::{debug, info, warn};

use cowrite_core::{ConnectionState, PresenceRoster};
use cowrite_protocol::{codec, Operation, WireMessage};

use crate::dispatch;
use crate::error::{SessionError, SessionResult};

/// Events delivered to the document view, in transport order.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Connected,
    Disconnected,
    CollaboratorJoined(String),
    RemoteOperation(Operation),
}

/// Outbound queue depth; a full queue drops the operation, which the
/// best-effort send contract permits.
const OUTBOUND_QUEUE: usize = 256;

/// One live synchronization connection per open document view.
///
/// Opening spawns a connection task; everything after that is observed
/// through [`SessionEvent`]s and the shared [`ConnectionState`]. Sends are
/// best-effort: an operation sent while not connected is dropped, not
/// queued.
pub struct SyncSession {
    state: Arc<RwLock<ConnectionState>>,
    roster: Arc<RwLock<PresenceRoster>>,
    outbound: mpsc::Sender<WireMessage>,
    shutdown: mpsc::Sender<()>,
    events: Option<mpsc::UnboundedReceiver<SessionEvent>>,
}

impl SyncSession {
    /// Open a session for one document view.
    ///
    /// Both `document_id` and `token` must be non-empty; nothing is
    /// connected otherwise. Connection failures after this point surface
    /// only as a transition to `Disconnected` and the matching event.
    pub fn open(ws_base: &str, document_id: &str, token: &str) -> SessionResult<SyncSession> {
        if document_id.is_empty() {
            return Err(SessionError::MissingDocumentId);
        }
        if token.is_empty() {
            return Err(SessionError::MissingToken);
        }

        let url = endpoint_url(ws_base, document_id, token);

        let state = Arc::new(RwLock::new(ConnectionState::Connecting));
        let roster = Arc::new(RwLock::new(PresenceRoster::new()));
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (outbound_tx, outbound_rx) = mpsc::channel(OUTBOUND_QUEUE);
        let (shutdown_tx, shutdown_rx) = mpsc::channel(1);

        tokio::spawn(run(
            url,
            state.clone(),
            roster.clone(),
            event_tx,
            outbound_rx,
            shutdown_rx,
        ));

        Ok(SyncSession {
            state,
            roster,
            outbound: outbound_tx,
            shutdown: shutdown_tx,
            events: Some(event_rx),
        })
    }

    /// Take the event receiver. Can only be taken once.
    pub fn events(&mut self) -> Option<mpsc::UnboundedReceiver<SessionEvent>> {
        self.events.take()
    }

    pub fn state(&self) -> ConnectionState {
        *self.state.read()
    }

    /// Snapshot of the collaborators currently attached, in join order.
    pub fn collaborators(&self) -> Vec<String> {
        self.roster.read().names().to_vec()
    }

    /// Enqueue an operation for transmission.
    ///
    /// Dropped unless the session is connected; no queueing, no retry, no
    /// delivery confirmation.
    pub fn send(&self, operation: Operation) {
        if !self.state().is_connected() {
            debug!("not connected, dropping outbound operation");
            return;
        }
        if self.outbound.try_send(WireMessage::from(operation)).is_err() {
            debug!("outbound queue unavailable, dropping operation");
        }
    }

    /// Tear the connection down.
    ///
    /// The presence roster is emptied and the state set to `Disconnected`
    /// before this returns, regardless of how far the connection got.
    /// Idempotent.
    pub fn close(&self) {
        let _ = self.shutdown.try_send(());
        *self.state.write() = ConnectionState::Disconnected;
        self.roster.write().clear();
    }
}

/// Endpoint address: base sync URL + document path segment + query-carried
/// credential.
fn endpoint_url(ws_base: &str, document_id: &str, token: &str) -> String {
    format!(
        "{}/ws/documents/{}?token={}",
        ws_base.trim_end_matches('/'),
        document_id,
        token
    )
}

/// Connection task: establish, pump, tear down.
async fn run(
    url: String,
    state: Arc<RwLock<ConnectionState>>,
    roster: Arc<RwLock<PresenceRoster>>,
    events: mpsc::UnboundedSender<SessionEvent>,
    mut outbound: mpsc::Receiver<WireMessage>,
    mut shutdown: mpsc::Receiver<()>,
) {
    let (stream, _) = match connect_async(&url).await {
        Ok(conn) => conn,
        Err(e) => {
            warn!(error = %e, "sync connection failed");
            teardown(&state, &roster, &events);
            return;
        }
    };

    info!("sync connection established");
    *state.write() = ConnectionState::Connected;
    let _ = events.send(SessionEvent::Connected);

    let (mut write, mut read) = stream.split();

    loop {
        tokio::select! {
            frame = read.next() => {
                match frame {
                    Some(Ok(Message::Text(text))) => {
                        dispatch::handle_frame(&text, &roster, &events);
                    }
                    Some(Ok(Message::Ping(data))) => {
                        let _ = write.send(Message::Pong(data)).await;
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        info!("sync connection closed");
                        break;
                    }
                    Some(Ok(_)) => {
                        // Ignore binary and other control frames.
                    }
                    Some(Err(e)) => {
                        warn!(error = %e, "sync connection error");
                        break;
                    }
                }
            }

            message = outbound.recv() => {
                match message {
                    Some(message) => match codec::encode(&message) {
                        Ok(text) => {
                            if let Err(e) = write.send(Message::Text(text)).await {
                                warn!(error = %e, "sync connection write error");
                                break;
                            }
                        }
                        Err(e) => {
                            warn!(error = %e, "failed to encode outbound frame");
                        }
                    },
                    None => break, // session handle dropped
                }
            }

            _ = shutdown.recv() => {
                debug!("sync session closing");
                let _ = write.send(Message::Close(None)).await;
                break;
            }
        }
    }

    teardown(&state, &roster, &events);
}

/// Shared-state reset on any exit path: the roster never survives a
/// disconnect.
fn teardown(
    state: &RwLock<ConnectionState>,
    roster: &RwLock<PresenceRoster>,
    events: &mpsc::UnboundedSender<SessionEvent>,
) {
    *state.write() = ConnectionState::Disconnected;
    roster.write().clear();
    let _ = events.send(SessionEvent::Disconnected);
}
