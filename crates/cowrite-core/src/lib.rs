//! Cowrite Core - client-side state for collaborative editing
//!
//! This crate provides the pure state containers of the sync core:
//! - Collaborator presence tracking per open document
//! - Local document content and reconciliation state
//! - Connection state shared with the rendering layer

pub mod connection;
pub mod document;
pub mod presence;

pub use connection::ConnectionState;
pub use document::{ContentStore, LocalChange};
pub use presence::PresenceRoster;
