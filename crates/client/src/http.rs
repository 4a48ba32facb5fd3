//! REST implementation of [`SawShopApi`] over [`reqwest`].

use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use afilado_core::models::catalog::{SawState, SawType, SharpeningType};
use afilado_core::models::client::{Branch, Client};
use afilado_core::models::saw::{NewSaw, Saw, SawUpdate};
use afilado_core::models::sharpening::{
    BulkExit, BulkExitResult, NewSharpening, Sharpening, SharpeningUpdate, SharpeningView,
};
use afilado_core::models::user::{LoginRequest, LoginResponse, User, UserPayload};
use afilado_core::types::DbId;

use crate::api::SawShopApi;
use crate::config::ClientConfig;
use crate::envelope::Envelope;
use crate::error::{ApiResult, ClientError};

/// HTTP client for the sharpening backend.
pub struct HttpApi {
    client: reqwest::Client,
    base_url: String,
    token: RwLock<Option<String>>,
}

impl HttpApi {
    /// Build a client with the configured base URL and timeout.
    pub fn new(config: &ClientConfig) -> ApiResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self::with_client(client, config.api_base_url.clone()))
    }

    /// Reuse an existing [`reqwest::Client`] (connection pooling, custom TLS).
    pub fn with_client(client: reqwest::Client, base_url: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: RwLock::new(None),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ---- private helpers ----

    /// The bearer token currently attached to requests.
    fn current_token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(|poisoned| {
                tracing::warn!("Token lock poisoned, recovering stored token");
                poisoned.into_inner()
            })
            .clone()
    }

    /// `base_url` followed by `path`, for paths built from numeric ids only.
    fn endpoint(&self, path: &str) -> ApiResult<Url> {
        let raw = format!("{}{}", self.base_url, path);
        Url::parse(&raw).map_err(|e| ClientError::Config(format!("Invalid API URL '{raw}': {e}")))
    }

    /// `base_url` followed by `segments`, each percent-encoded as exactly one
    /// path segment. Required for user-supplied values such as saw codes.
    fn endpoint_segments(&self, segments: &[&str]) -> ApiResult<Url> {
        let mut url = Url::parse(&self.base_url).map_err(|e| {
            ClientError::Config(format!("Invalid API base URL '{}': {e}", self.base_url))
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                ClientError::Config(format!("API base URL '{}' cannot take a path", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        tracing::debug!(%method, %url, "API request");
        let builder = self.client.request(method, url);
        match self.current_token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn fetch<T: DeserializeOwned>(&self, url: Url) -> ApiResult<T> {
        let response = self.request(Method::GET, url).send().await?;
        Self::parse_envelope(response).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.fetch(self.endpoint(path)?).await
    }

    async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        let response = self.request(method, url).json(body).send().await?;
        Self::parse_envelope(response).await
    }

    async fn send_empty<T: DeserializeOwned>(&self, method: Method, path: &str) -> ApiResult<T> {
        let url = self.endpoint(path)?;
        let response = self.request(method, url).send().await?;
        Self::parse_envelope(response).await
    }

    async fn ensure_success(response: reqwest::Response) -> ApiResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        let message = serde_json::from_str::<Envelope<serde_json::Value>>(&body)
            .ok()
            .and_then(|env| env.error)
            .unwrap_or(body);

        tracing::warn!(status = status.as_u16(), %message, "API returned error status");
        Err(ClientError::Http {
            status: status.as_u16(),
            message,
        })
    }

    async fn parse_envelope<T: DeserializeOwned>(response: reqwest::Response) -> ApiResult<T> {
        let response = Self::ensure_success(response).await?;
        response.json::<Envelope<T>>().await?.into_result()
    }
}

#[async_trait]
impl SawShopApi for HttpApi {
    fn authorize(&self, token: Option<String>) {
        let mut slot = self.token.write().unwrap_or_else(|poisoned| {
            tracing::warn!("Token lock poisoned, replacing stored token");
            poisoned.into_inner()
        });
        *slot = token;
    }

    async fn login(&self, credentials: &LoginRequest) -> ApiResult<LoginResponse> {
        self.send_json(Method::POST, "/auth/login", credentials).await
    }

    async fn saw(&self, id: DbId) -> ApiResult<Saw> {
        self.get(&format!("/saws/{id}")).await
    }

    async fn saw_by_code(&self, code: &str) -> ApiResult<Option<Saw>> {
        let url = self.endpoint_segments(&["saws", "code", code])?;
        match self.fetch(url).await {
            Ok(saw) => Ok(Some(saw)),
            Err(ClientError::Http { status, .. }) if status == StatusCode::NOT_FOUND.as_u16() => {
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    async fn saws_by_branch(&self, branch_id: DbId) -> ApiResult<Vec<Saw>> {
        self.get(&format!("/branches/{branch_id}/saws")).await
    }

    async fn saws_by_client(&self, client_id: DbId) -> ApiResult<Vec<Saw>> {
        self.get(&format!("/clients/{client_id}/saws")).await
    }

    async fn saws(&self) -> ApiResult<Vec<Saw>> {
        self.get("/saws").await
    }

    async fn create_saw(&self, saw: &NewSaw) -> ApiResult<Saw> {
        self.send_json(Method::POST, "/saws", saw).await
    }

    async fn update_saw(&self, id: DbId, update: &SawUpdate) -> ApiResult<Saw> {
        self.send_json(Method::PATCH, &format!("/saws/{id}"), update)
            .await
    }

    async fn sharpenings_for_saw(&self, saw_id: DbId) -> ApiResult<Vec<Sharpening>> {
        self.get(&format!("/saws/{saw_id}/sharpenings")).await
    }

    async fn sharpenings(&self) -> ApiResult<Vec<SharpeningView>> {
        self.get("/sharpenings").await
    }

    async fn create_sharpening(&self, sharpening: &NewSharpening) -> ApiResult<Sharpening> {
        self.send_json(Method::POST, "/sharpenings", sharpening).await
    }

    async fn update_sharpening(
        &self,
        id: DbId,
        update: &SharpeningUpdate,
    ) -> ApiResult<Sharpening> {
        self.send_json(Method::PATCH, &format!("/sharpenings/{id}"), update)
            .await
    }

    async fn register_exit(&self, id: DbId) -> ApiResult<Sharpening> {
        self.send_empty(Method::POST, &format!("/sharpenings/{id}/exit"))
            .await
    }

    async fn register_exit_bulk(&self, request: &BulkExit) -> ApiResult<BulkExitResult> {
        self.send_json(Method::POST, "/sharpenings/exit", request).await
    }

    async fn sharpening_types(&self) -> ApiResult<Vec<SharpeningType>> {
        self.get("/catalogs/sharpening-types").await
    }

    async fn saw_types(&self) -> ApiResult<Vec<SawType>> {
        self.get("/catalogs/saw-types").await
    }

    async fn saw_states(&self) -> ApiResult<Vec<SawState>> {
        self.get("/catalogs/saw-states").await
    }

    async fn branches(&self) -> ApiResult<Vec<Branch>> {
        self.get("/branches").await
    }

    async fn branches_by_client(&self, client_id: DbId) -> ApiResult<Vec<Branch>> {
        self.get(&format!("/clients/{client_id}/branches")).await
    }

    async fn clients(&self) -> ApiResult<Vec<Client>> {
        self.get("/clients").await
    }

    async fn create_user(&self, user: &UserPayload) -> ApiResult<User> {
        self.send_json(Method::POST, "/users", user).await
    }

    async fn update_user(&self, id: DbId, user: &UserPayload) -> ApiResult<User> {
        self.send_json(Method::PUT, &format!("/users/{id}"), user)
            .await
    }
}
