//! # API Client
//!
//! Typed wrapper over the storefront REST backend.
//!
//! ## Request Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Request Pipeline                                │
//! │                                                                         │
//! │   ApiClient::get_cart()                                                │
//! │        │                                                                │
//! │        ▼                                                                │
//! │   request(GET, "/cart") ── TokenStore::valid_token() ──► Bearer header │
//! │        │                                                                │
//! │        ▼                                                                │
//! │   send ──► 2xx ──► serde DTO ──► TryFrom ──► core type                 │
//! │        │                                                                │
//! │        ├─► non-2xx ──► RequestError::Status { server message           │
//! │        │                                      | operation fallback }   │
//! │        ├─► no response ──► RequestError::Transport                     │
//! │        └─► bad body ─────► RequestError::Malformed                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No retries and no timeouts. The underlying cause of transport and
//! decoding failures is logged; callers only ever see the user-facing
//! message.
//!
//! Endpoints are grouped per resource in the submodules, each adding an
//! `impl ApiClient` block.

use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};
use url::Url;

use storefront_core::generation::Operation;

use crate::config::ClientConfig;
use crate::error::{ClientResult, RequestError};
use crate::token::TokenStore;
use crate::wire::{self, WireError};

mod addresses;
mod auth;
mod cart;
mod categories;
mod orders;
mod products;
mod wishlist;

/// REST client for the storefront backend.
///
/// Cheap to clone: the HTTP connection pool and the token store are shared.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    tokens: TokenStore,
}

impl ApiClient {
    /// Creates a client rooted at `base_url` (including the `/api` prefix).
    pub fn new(base_url: &Url, tokens: TokenStore) -> ClientResult<Self> {
        let http = reqwest::Client::builder().build()?;
        Ok(ApiClient {
            http,
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
            tokens,
        })
    }

    pub fn from_config(config: &ClientConfig, tokens: TokenStore) -> ClientResult<Self> {
        Self::new(&config.base_url()?, tokens)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    // =========================================================================
    // Request Plumbing
    // =========================================================================

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, format!("{}{}", self.base_url, path));
        match self.tokens.valid_token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send<D: DeserializeOwned>(
        &self,
        operation: Operation,
        builder: RequestBuilder,
    ) -> Result<D, RequestError> {
        let response = builder.send().await.map_err(|e| {
            warn!(%operation, error = %e, "Request failed before a response arrived");
            RequestError::Transport {
                message: operation.failure_message().to_string(),
            }
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            warn!(%operation, error = %e, "Failed to read response body");
            RequestError::Transport {
                message: operation.failure_message().to_string(),
            }
        })?;

        if !status.is_success() {
            let message = wire::server_message(&body)
                .unwrap_or_else(|| operation.failure_message().to_string());
            debug!(%operation, status = status.as_u16(), %message, "Request rejected");
            return Err(RequestError::Status {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            warn!(%operation, error = %e, "Response body did not match the expected shape");
            RequestError::Malformed {
                message: operation.failure_message().to_string(),
            }
        })
    }

    async fn get<D: DeserializeOwned>(&self, operation: Operation, path: &str) -> Result<D, RequestError> {
        self.send(operation, self.request(Method::GET, path)).await
    }

    async fn get_query<D: DeserializeOwned>(
        &self,
        operation: Operation,
        path: &str,
        query: &[(&'static str, String)],
    ) -> Result<D, RequestError> {
        self.send(operation, self.request(Method::GET, path).query(query)).await
    }

    async fn post<B: Serialize + ?Sized, D: DeserializeOwned>(
        &self,
        operation: Operation,
        path: &str,
        body: &B,
    ) -> Result<D, RequestError> {
        self.send(operation, self.request(Method::POST, path).json(body)).await
    }

    async fn put<B: Serialize + ?Sized, D: DeserializeOwned>(
        &self,
        operation: Operation,
        path: &str,
        body: &B,
    ) -> Result<D, RequestError> {
        self.send(operation, self.request(Method::PUT, path).json(body)).await
    }

    async fn delete<D: DeserializeOwned>(&self, operation: Operation, path: &str) -> Result<D, RequestError> {
        self.send(operation, self.request(Method::DELETE, path)).await
    }
}

/// Converts a decoded DTO into its canonical shape.
fn normalize<D, T>(operation: Operation, dto: D) -> Result<T, RequestError>
where
    T: TryFrom<D, Error = WireError>,
{
    T::try_from(dto).map_err(|e| malformed(operation, e))
}

fn malformed(operation: Operation, err: WireError) -> RequestError {
    warn!(%operation, error = %err, "Rejected malformed payload");
    RequestError::Malformed {
        message: operation.failure_message().to_string(),
    }
}
