//! Typed HTTP client for the stockroom API.
//!
//! Holds an optional bearer token and attaches it to every request. Reads
//! (GET) are retried on transient failure with a small bounded backoff;
//! writes are issued exactly once and their failure propagates unchanged,
//! since a retried write could double-apply.

pub mod records;
pub mod retry;

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::json;
use std::sync::RwLock;
use thiserror::Error;

use stockroom_core::{ItemId, UserId};

pub use records::{DeletedItem, DeletedUser, ItemFields, ItemRecord, LoginResponse, UserFields, UserRecord};
pub use retry::RetryPolicy;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport-level failure (connect, timeout, decode).
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with an error status and message.
    #[error("api error ({status}): {message}")]
    Api { status: StatusCode, message: String },
}

/// API client with token state and a read-retry policy.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    retry: RetryPolicy,
    // Set by login, cleared by logout. Logout is client-local: the server
    // keeps accepting the token until it expires.
    token: RwLock<Option<String>>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_retry(base_url, RetryPolicy::default())
    }

    pub fn with_retry(base_url: impl Into<String>, retry: RetryPolicy) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            retry,
            token: RwLock::new(None),
        }
    }

    pub fn set_token(&self, token: impl Into<String>) {
        if let Ok(mut slot) = self.token.write() {
            *slot = Some(token.into());
        }
    }

    /// Forget the held token. Client-local only.
    pub fn logout(&self) {
        if let Ok(mut slot) = self.token.write() {
            *slot = None;
        }
    }

    fn token(&self) -> Option<String> {
        self.token.read().ok().and_then(|t| t.clone())
    }

    // -------------------------
    // Auth
    // -------------------------

    /// Log in and store the returned token for subsequent requests.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ClientError> {
        let res: LoginResponse = self
            .execute_once(
                Method::POST,
                "/auth/login",
                Some(json!({ "email": email, "password": password })),
            )
            .await?;

        self.set_token(res.token.clone());
        Ok(res)
    }

    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<UserRecord, ClientError> {
        #[derive(serde::Deserialize)]
        struct Registered {
            user: UserRecord,
        }

        let res: Registered = self
            .execute_once(
                Method::POST,
                "/auth/register",
                Some(json!({ "name": name, "email": email, "password": password })),
            )
            .await?;
        Ok(res.user)
    }

    // -------------------------
    // Items
    // -------------------------

    pub async fn list_items(&self) -> Result<Vec<ItemRecord>, ClientError> {
        self.execute_read("/items").await
    }

    pub async fn create_item(&self, fields: &ItemFields) -> Result<ItemRecord, ClientError> {
        self.execute_once(Method::POST, "/items", Some(serde_json::to_value(fields)?))
            .await
    }

    pub async fn update_item(
        &self,
        id: ItemId,
        fields: &ItemFields,
    ) -> Result<ItemRecord, ClientError> {
        self.execute_once(
            Method::PUT,
            &format!("/items/{id}"),
            Some(serde_json::to_value(fields)?),
        )
        .await
    }

    pub async fn delete_item(&self, id: ItemId) -> Result<DeletedItem, ClientError> {
        self.execute_once(Method::DELETE, &format!("/items/{id}"), None)
            .await
    }

    // -------------------------
    // Users (admin surface)
    // -------------------------

    pub async fn list_users(&self) -> Result<Vec<UserRecord>, ClientError> {
        self.execute_read("/users").await
    }

    pub async fn create_user(&self, fields: &UserFields) -> Result<UserRecord, ClientError> {
        self.execute_once(Method::POST, "/users", Some(serde_json::to_value(fields)?))
            .await
    }

    pub async fn update_user(
        &self,
        id: UserId,
        fields: &UserFields,
    ) -> Result<UserRecord, ClientError> {
        self.execute_once(
            Method::PUT,
            &format!("/users/{id}"),
            Some(serde_json::to_value(fields)?),
        )
        .await
    }

    pub async fn delete_user(&self, id: UserId) -> Result<DeletedUser, ClientError> {
        self.execute_once(Method::DELETE, &format!("/users/{id}"), None)
            .await
    }

    /// GET an arbitrary path under the base URL, with the retry policy and
    /// token attachment applied. Escape hatch for endpoints the typed surface
    /// does not cover.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.execute_read(path).await
    }

    // -------------------------
    // Plumbing
    // -------------------------

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let mut req = self.http.request(method, format!("{}{path}", self.base_url));
        if let Some(token) = self.token() {
            req = req.bearer_auth(token);
        }
        req
    }

    /// Issue a request exactly once. Used for all mutations.
    async fn execute_once<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<T, ClientError> {
        let mut req = self.request(method, path);
        if let Some(body) = body {
            req = req.json(&body);
        }

        decode(req.send().await?).await
    }

    /// Issue a GET with the retry policy applied. Transport errors and 5xx
    /// responses are retried; any 4xx is final.
    async fn execute_read<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let mut delay = self.retry.initial_delay;
        let mut attempt = 0;

        loop {
            let err = match self.request(Method::GET, path).send().await {
                Ok(res) if res.status().is_server_error() => api_error(res).await,
                Ok(res) => return decode(res).await,
                Err(e) => ClientError::Http(e),
            };

            if attempt >= self.retry.retries {
                return Err(err);
            }

            tracing::debug!(path, attempt, error = %err, "retrying read");
            tokio::time::sleep(delay).await;
            delay *= self.retry.backoff_factor;
            attempt += 1;
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Api {
            status: StatusCode::BAD_REQUEST,
            message: format!("failed to encode request body: {err}"),
        }
    }
}

/// Map a response to the expected type, or surface the server's error body.
async fn decode<T: DeserializeOwned>(res: reqwest::Response) -> Result<T, ClientError> {
    if res.status().is_success() {
        return Ok(res.json().await?);
    }
    Err(api_error(res).await)
}

/// Turn a non-success response into [`ClientError::Api`], reading the
/// server's `{"error": ...}` body when one is present.
async fn api_error(res: reqwest::Response) -> ClientError {
    let status = res.status();
    let message = res
        .json::<serde_json::Value>()
        .await
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
        .unwrap_or_else(|| format!("http status {status}"));

    ClientError::Api { status, message }
}
