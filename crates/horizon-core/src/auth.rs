//! Authentication payloads for the token endpoints

use serde::{Deserialize, Serialize};

/// Login request body for `POST /api/token/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Token pair returned by a successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    /// Short-lived access token, attached as `Authorization: Bearer`.
    pub access: String,
    /// Long-lived refresh token, exchanged for a new access token on 401.
    pub refresh: String,
}

/// Request body for `POST /api/token/refresh/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    pub refresh: String,
}

/// Response body of a successful refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub access: String,
}
