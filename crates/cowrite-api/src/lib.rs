//! Cowrite REST client
//!
//! Ordinary request/response calls against the Cowrite backend: accounts,
//! document CRUD, title updates, collaborators, and per-document chat.
//! None of this touches the synchronization session; the one point of
//! contact is that a fetched document seeds the content store.

pub mod client;
pub mod error;
pub mod types;

pub use client::ApiClient;
pub use error::{ApiError, ApiResult};
pub use types::{
    AddCollaboratorRequest, ApiEnvelope, AuthResponse, ChatRequest, ChatResponse,
    CollaboratorResponse, DocumentCreateRequest, DocumentResponse, LoginRequest, RegisterRequest,
};
