//! Error taxonomy for API calls
//!
//! Every failure a page-level caller can see maps to one of six display
//! cases: network (no response at all), 401, 403, 404, server (>= 500),
//! and everything else. [`ApiError::title`] and [`ApiError::message`]
//! return the fixed copy for each case so the rendering layer never
//! invents its own wording.

use thiserror::Error;

/// Errors from the Strategic Horizon API client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No HTTP response was received at all.
    #[error("Unable to reach the Strategic Horizon API at {url}. Is the server running?")]
    Network {
        /// The configured base URL, so the user knows what was dialed.
        url: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// The server answered with a non-success status.
    #[error("API request failed with status {status}")]
    Http { status: u16, body: String },

    /// The response body did not decode into the expected shape.
    #[error("Invalid response from server: {0}")]
    Decode(String),

    /// A 401 was answered with a failed token refresh; stored credentials
    /// have been cleared and the user must log in again.
    #[error("Session expired. Please log in again.")]
    SessionExpired,

    /// No access token is stored at all.
    #[error("Not logged in")]
    NotAuthenticated,
}

impl ApiError {
    /// HTTP status behind this error, when one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            ApiError::SessionExpired => Some(401),
            _ => None,
        }
    }

    /// True when no response was received (transport failure).
    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Network { .. })
    }

    /// Fixed headline for the error display block.
    pub fn title(&self) -> &'static str {
        match self {
            ApiError::Network { .. } => "Connection Error",
            ApiError::SessionExpired | ApiError::NotAuthenticated => "Authentication Error",
            ApiError::Http { status: 401, .. } => "Authentication Error",
            ApiError::Http { status: 403, .. } => "Access Denied",
            ApiError::Http { status: 404, .. } => "Not Found",
            ApiError::Http { status, .. } if *status >= 500 => "Server Error",
            _ => "Error",
        }
    }

    /// Fixed user-facing message for the error display block.
    pub fn message(&self) -> String {
        match self {
            ApiError::Network { .. } => self.to_string(),
            ApiError::SessionExpired | ApiError::NotAuthenticated => {
                "Authentication failed. Please log in to continue.".to_string()
            }
            ApiError::Http { status: 401, .. } => {
                "Authentication failed. Please log in to continue.".to_string()
            }
            ApiError::Http { status: 403, .. } => {
                "Access denied. You do not have permission to view this data.".to_string()
            }
            ApiError::Http { status: 404, .. } => {
                "The requested resource was not found.".to_string()
            }
            ApiError::Http { status, .. } if *status >= 500 => {
                "Server error. Please try again later or contact support.".to_string()
            }
            _ => "Failed to load data. Please try again or contact support.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http(status: u16) -> ApiError {
        ApiError::Http {
            status,
            body: String::new(),
        }
    }

    #[test]
    fn network_error_names_the_configured_url() {
        let err = ApiError::Network {
            url: "http://localhost:8000".into(),
            source: None,
        };
        assert!(err.is_network());
        assert_eq!(err.title(), "Connection Error");
        assert!(err.message().contains("http://localhost:8000"));
    }

    #[test]
    fn titles_are_fixed_per_status() {
        assert_eq!(http(401).title(), "Authentication Error");
        assert_eq!(http(403).title(), "Access Denied");
        assert_eq!(http(404).title(), "Not Found");
        assert_eq!(http(500).title(), "Server Error");
        assert_eq!(http(503).title(), "Server Error");
        assert_eq!(http(418).title(), "Error");
        assert_eq!(ApiError::Decode("bad json".into()).title(), "Error");
    }

    #[test]
    fn messages_are_fixed_per_status() {
        assert_eq!(
            http(401).message(),
            "Authentication failed. Please log in to continue."
        );
        assert_eq!(
            http(403).message(),
            "Access denied. You do not have permission to view this data."
        );
        assert_eq!(http(404).message(), "The requested resource was not found.");
        assert_eq!(
            http(502).message(),
            "Server error. Please try again later or contact support."
        );
        assert_eq!(
            http(400).message(),
            "Failed to load data. Please try again or contact support."
        );
    }

    #[test]
    fn session_expiry_reads_as_authentication_failure() {
        assert_eq!(ApiError::SessionExpired.title(), "Authentication Error");
        assert_eq!(ApiError::SessionExpired.status(), Some(401));
    }
}
