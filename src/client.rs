//! HTTP client wrapper
//!
//! [`ApiClient`] wraps a shared `reqwest::Client` for the EventHub API. It
//! attaches the session's bearer credential to every request and watches
//! responses for HTTP 401. A 401 fires the [`AuthBridge`] invalidation hook
//! as a side effect and then propagates the original error unchanged; the
//! client never recovers or swallows an error.
//!
//! The client deliberately does not hold the session store. [`AuthBridge`] is
//! the narrow surface it needs: read the token, signal invalidation. The
//! store depends on the client, never the other way around.

use std::sync::Arc;

use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::Config;
use crate::error::ApiError;

/// What the HTTP client needs from the session: the current credential and a
/// hook to signal that the server rejected it.
pub trait AuthBridge: Send + Sync {
    /// The bearer token to attach, if a session is active
    fn bearer_token(&self) -> Option<String>;

    /// Called when any request comes back 401. Must be idempotent.
    fn on_unauthorized(&self);
}

/// Bridge for anonymous use: no token, 401 handling left to the caller
#[derive(Debug, Default)]
pub struct NoSession;

impl AuthBridge for NoSession {
    fn bearer_token(&self) -> Option<String> {
        None
    }

    fn on_unauthorized(&self) {}
}

/// HTTP client for the EventHub API
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: Config,
    bridge: Arc<dyn AuthBridge>,
}

impl ApiClient {
    pub fn new(config: Config, bridge: Arc<dyn AuthBridge>) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            bridge,
        }
    }

    /// Client with no session attached
    pub fn anonymous(config: Config) -> Self {
        Self::new(config, Arc::new(NoSession))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// GET a JSON resource
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.execute(self.http.get(self.config.api_url(path))).await
    }

    /// GET a JSON resource with query parameters
    pub async fn get_json_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        self.execute(self.http.get(self.config.api_url(path)).query(query))
            .await
    }

    /// POST a JSON body, expecting a JSON response
    pub async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.execute(self.http.post(self.config.api_url(path)).json(body))
            .await
    }

    /// PUT a JSON body, expecting a JSON response
    pub async fn put_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.execute(self.http.put(self.config.api_url(path)).json(body))
            .await
    }

    /// PUT with no body, for action endpoints like approve/reject
    pub async fn put_action<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.execute(self.http.put(self.config.api_url(path))).await
    }

    /// DELETE a resource, ignoring the response body
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.execute_empty(self.http.delete(self.config.api_url(path)))
            .await
    }

    /// DELETE a resource with query parameters
    pub async fn delete_with_query(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<(), ApiError> {
        self.execute_empty(self.http.delete(self.config.api_url(path)).query(query))
            .await
    }

    async fn execute<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let response = self.send(builder).await?;
        response.json::<T>().await.map_err(ApiError::from)
    }

    async fn execute_empty(&self, builder: RequestBuilder) -> Result<(), ApiError> {
        self.send(builder).await.map(|_| ())
    }

    /// Send the request with the bearer credential attached and map non-2xx
    /// statuses to [`ApiError`], firing the 401 hook when applicable.
    async fn send(&self, builder: RequestBuilder) -> Result<reqwest::Response, ApiError> {
        let builder = match self.bridge.bearer_token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        };
        let response = builder.send().await.map_err(ApiError::Network)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = read_server_message(response).await;
        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!("request returned 401, invalidating session");
            self.bridge.on_unauthorized();
            return Err(ApiError::unauthorized(
                message.unwrap_or_else(|| "unauthorized".to_string()),
            ));
        }
        let message = message.unwrap_or_else(|| status.to_string());
        if status.is_client_error() {
            Err(ApiError::validation(status.as_u16(), message))
        } else {
            Err(ApiError::server(status.as_u16(), message))
        }
    }
}

/// Pull the `message` field out of an error body, if there is one
async fn read_server_message(response: reqwest::Response) -> Option<String> {
    let body = response.text().await.ok()?;
    let value: serde_json::Value = serde_json::from_str(&body).ok()?;
    value
        .get("message")
        .and_then(|m| m.as_str())
        .map(|m| m.to_string())
}
