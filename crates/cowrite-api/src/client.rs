//! HTTP client for the Cowrite backend

use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::{ApiError, ApiResult};
use crate::types::{
    AddCollaboratorRequest, ApiEnvelope, AuthResponse, ChatRequest, ChatResponse,
    CollaboratorResponse, DocumentCreateRequest, DocumentResponse, LoginRequest, RegisterRequest,
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the backend's request/response surface.
///
/// Holds the base URL and, once obtained, the bearer token. Cheap to clone.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    /// Attach the bearer token used on authenticated calls.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub async fn login(&self, request: &LoginRequest) -> ApiResult<AuthResponse> {
        self.post("/auth/login", request).await
    }

    pub async fn register(&self, request: &RegisterRequest) -> ApiResult<AuthResponse> {
        self.post("/auth/register", request).await
    }

    pub async fn list_documents(&self) -> ApiResult<Vec<DocumentResponse>> {
        self.get("/documents").await
    }

    pub async fn create_document(
        &self,
        request: &DocumentCreateRequest,
    ) -> ApiResult<DocumentResponse> {
        self.post("/documents", request).await
    }

    pub async fn get_document(&self, id: &str) -> ApiResult<DocumentResponse> {
        self.get(&format!("/documents/{}", id)).await
    }

    pub async fn update_title(&self, id: &str, title: &str) -> ApiResult<DocumentResponse> {
        let body = serde_json::json!({ "title": title });
        self.put(&format!("/documents/{}/title", id), &body).await
    }

    pub async fn delete_document(&self, id: &str) -> ApiResult<()> {
        let request = self.http.delete(self.url(&format!("/documents/{}", id)));
        self.execute_unit(request).await
    }

    pub async fn add_collaborator(
        &self,
        id: &str,
        request: &AddCollaboratorRequest,
    ) -> ApiResult<CollaboratorResponse> {
        self.post(&format!("/documents/{}/collaborators", id), request)
            .await
    }

    /// Ask a question about a document (RAG-backed on the server).
    pub async fn chat(&self, id: &str, question: &str) -> ApiResult<ChatResponse> {
        let request = ChatRequest {
            question: question.to_owned(),
        };
        self.post(&format!("/documents/{}/chat", id), &request).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.execute(self.http.get(self.url(path))).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        self.execute(self.http.post(self.url(path)).json(body)).await
    }

    async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        self.execute(self.http.put(self.url(path)).json(body)).await
    }

    /// Send a request and unwrap the response envelope.
    async fn execute<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> ApiResult<T> {
        let envelope: ApiEnvelope<T> = self.send(request).await?;
        envelope.data.ok_or(ApiError::MissingData)
    }

    /// Send a request whose envelope carries no data.
    async fn execute_unit(&self, request: reqwest::RequestBuilder) -> ApiResult<()> {
        let _: ApiEnvelope<serde_json::Value> = self.send(request).await?;
        Ok(())
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> ApiResult<ApiEnvelope<T>> {
        let request = match &self.token {
            Some(token) => request.header(AUTHORIZATION, format!("Bearer {}", token)),
            None => request,
        };

        let response = request.timeout(REQUEST_TIMEOUT).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiEnvelope<serde_json::Value>>(&body)
                .ok()
                .and_then(|envelope| envelope.message)
                .unwrap_or(body);
            debug!(status = status.as_u16(), %message, "backend rejected request");
            return Err(ApiError::Backend {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: ApiEnvelope<T> = response.json().await?;
        if !envelope.success {
            return Err(ApiError::Backend {
                status: status.as_u16(),
                message: envelope
                    .message
                    .clone()
                    .unwrap_or_else(|| "request failed".to_string()),
            });
        }

        Ok(envelope)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}
