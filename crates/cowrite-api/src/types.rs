//! REST data transfer objects
//!
//! Field names are camelCase on the wire; timestamps are kept as the
//! opaque strings the backend sends.

use serde::{Deserialize, Serialize};

/// Envelope wrapping every REST response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentResponse {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub content_snapshot: Option<String>,
    pub current_revision: u64,
    pub owner_username: String,
    #[serde(default)]
    pub collaborator_count: u32,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub user_id: String,
    pub username: String,
    pub email: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollaboratorResponse {
    pub user_id: String,
    pub username: String,
    pub email: String,
    pub role: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub answer: String,
    #[serde(default)]
    pub source_snippets: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentCreateRequest {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_content: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCollaboratorRequest {
    pub email: String,
    pub role: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub question: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_envelope_deserializes() {
        let body = r#"{
            "success": true,
            "message": "Success",
            "data": {
                "id": "7c9e6679-7425-40de-944b-e07fc1f90ae7",
                "title": "Design notes",
                "contentSnapshot": "Hello",
                "currentRevision": 12,
                "ownerUsername": "alice",
                "collaboratorCount": 2,
                "createdAt": "2024-04-01T10:00:00Z",
                "updatedAt": "2024-04-02T09:30:00Z"
            },
            "timestamp": "2024-04-02T09:30:01Z"
        }"#;

        let envelope: ApiEnvelope<DocumentResponse> = serde_json::from_str(body).unwrap();
        assert!(envelope.success);

        let doc = envelope.data.unwrap();
        assert_eq!(doc.title, "Design notes");
        assert_eq!(doc.content_snapshot.as_deref(), Some("Hello"));
        assert_eq!(doc.current_revision, 12);
        assert_eq!(doc.owner_username, "alice");
        assert_eq!(doc.collaborator_count, 2);
    }

    #[test]
    fn test_error_envelope_deserializes() {
        let body = r#"{"success": false, "message": "Document not found", "data": null,
            "timestamp": "2024-04-02T09:30:01Z"}"#;

        let envelope: ApiEnvelope<DocumentResponse> = serde_json::from_str(body).unwrap();

        assert!(!envelope.success);
        assert_eq!(envelope.message.as_deref(), Some("Document not found"));
        assert!(envelope.data.is_none());
    }

    #[test]
    fn test_auth_envelope_deserializes() {
        let body = r#"{"success": true, "data": {
            "token": "jwt-token",
            "userId": "u-1",
            "username": "alice",
            "email": "alice@example.com"
        }}"#;

        let envelope: ApiEnvelope<AuthResponse> = serde_json::from_str(body).unwrap();
        let auth = envelope.data.unwrap();

        assert_eq!(auth.token, "jwt-token");
        assert_eq!(auth.username, "alice");
    }

    #[test]
    fn test_create_request_omits_absent_content() {
        let req = DocumentCreateRequest {
            title: "Untitled".into(),
            initial_content: None,
        };

        assert_eq!(
            serde_json::to_string(&req).unwrap(),
            r#"{"title":"Untitled"}"#
        );
    }
}
