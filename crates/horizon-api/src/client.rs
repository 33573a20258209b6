//! Authenticated HTTP client
//!
//! Wraps `reqwest` with the three behaviors every call shares:
//!
//! - the stored access token rides along as `Authorization: Bearer`,
//! - a transport failure with no HTTP status becomes a network error
//!   naming the configured API URL,
//! - a 401 on a request that has not been retried triggers exactly one
//!   token refresh and one re-issue of the original request. A failed
//!   refresh clears the stored tokens and surfaces
//!   [`ApiError::SessionExpired`]; a second 401 surfaces as a plain 401.
//!
//! The login and refresh calls themselves are never retried.

use std::sync::Arc;

use reqwest::{Method, StatusCode};
use serde::{de::DeserializeOwned, Serialize};

use horizon_core::{Credentials, RefreshRequest, RefreshResponse, TokenPair};

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::tokens::TokenStore;

/// HTTP client for the Strategic Horizon API.
#[derive(Debug, Clone)]
pub struct HttpClient {
    base_url: String,
    http: reqwest::Client,
    tokens: Arc<dyn TokenStore>,
}

impl HttpClient {
    /// Create a client against the configured base URL.
    pub fn new(config: ApiConfig, tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
            tokens,
        }
    }

    /// The configured base URL (no trailing slash).
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The token store this client reads from and writes to.
    pub fn tokens(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }

    /// Whether an access token is stored. Presence only - an expired
    /// token still counts until the server rejects it.
    pub fn is_authenticated(&self) -> bool {
        self.tokens.access().is_some()
    }

    /// `POST /api/token/` - exchange credentials for a token pair and
    /// store it.
    pub async fn login(&self, credentials: &Credentials) -> Result<TokenPair, ApiError> {
        let response = self
            .send_once(&Method::POST, "/api/token/", Some(credentials), None)
            .await?;
        let response = self.check(response).await?;
        let pair: TokenPair = response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        self.tokens.store(&pair.access, Some(&pair.refresh));
        tracing::info!(user = %credentials.username, "Logged in");
        Ok(pair)
    }

    /// Drop the stored token pair.
    pub fn logout(&self) {
        self.tokens.clear();
        tracing::info!("Logged out");
    }

    /// `GET` a JSON body.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.send(Method::GET, path, None::<&()>).await?;
        Self::decode(response).await
    }

    /// `POST` a JSON body, decode a JSON reply.
    pub async fn post<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self.send(Method::POST, path, Some(body)).await?;
        Self::decode(response).await
    }

    /// `PATCH` a JSON body, decode a JSON reply.
    pub async fn patch<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self.send(Method::PATCH, path, Some(body)).await?;
        Self::decode(response).await
    }

    /// `DELETE`; the reply body (usually empty) is discarded.
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.send(Method::DELETE, path, None::<&()>).await?;
        Ok(())
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Send with bearer attach and the single refresh-and-retry recovery.
    async fn send<B: Serialize + Sync>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<reqwest::Response, ApiError> {
        let response = self
            .send_once(&method, path, body, self.tokens.access())
            .await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return self.check(response).await;
        }

        tracing::debug!(%method, path, "401 response; refreshing token");
        let access = match self.refresh_access().await {
            Ok(access) => access,
            Err(e) => {
                tracing::warn!(error = %e, "Token refresh failed; clearing session");
                self.tokens.clear();
                return Err(ApiError::SessionExpired);
            }
        };

        let retried = self.send_once(&method, path, body, Some(access)).await?;
        self.check(retried).await
    }

    /// One request, no recovery.
    async fn send_once<B: Serialize + Sync>(
        &self,
        method: &Method,
        path: &str,
        body: Option<&B>,
        token: Option<String>,
    ) -> Result<reqwest::Response, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.http.request(method.clone(), &url);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        request.send().await.map_err(|e| self.transport_error(e))
    }

    /// `POST /api/token/refresh/` - trade the stored refresh token for a
    /// new access token. A missing refresh token fails the same way a
    /// rejected one does.
    async fn refresh_access(&self) -> Result<String, ApiError> {
        let refresh = self.tokens.refresh().ok_or(ApiError::NotAuthenticated)?;
        let response = self
            .send_once(
                &Method::POST,
                "/api/token/refresh/",
                Some(&RefreshRequest { refresh }),
                None,
            )
            .await?;
        let response = self.check(response).await?;
        let body: RefreshResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        self.tokens.store(&body.access, None);
        tracing::debug!("Access token refreshed");
        Ok(body.access)
    }

    async fn check(&self, response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ApiError::Http {
            status: status.as_u16(),
            body,
        })
    }

    fn transport_error(&self, e: reqwest::Error) -> ApiError {
        match e.status() {
            Some(status) => ApiError::Http {
                status: status.as_u16(),
                body: String::new(),
            },
            None => ApiError::Network {
                url: self.base_url.clone(),
                source: Some(e),
            },
        }
    }
}
