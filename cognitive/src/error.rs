//! Error types for the Nimbus Cognition API client.

use thiserror::Error;

/// API error status codes.
pub mod status_code {
    /// Malformed request.
    pub const PARAM_ERROR: i32 = 400;
    /// Missing or invalid credentials.
    pub const AUTH_ERROR: i32 = 401;
    /// Payment required / quota exhausted.
    pub const QUOTA_EXCEED: i32 = 402;
    /// Resource does not exist.
    pub const NOT_FOUND: i32 = 404;
    /// Request rate limit exceeded.
    pub const RATE_LIMIT: i32 = 429;
    /// Internal server error.
    pub const SERVER_ERROR: i32 = 500;
}

/// Result type alias for Nimbus Cognition operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for Nimbus Cognition API operations.
#[derive(Error, Debug)]
pub enum Error {
    /// API error returned by the service.
    #[error("nimbus: {message} (code={code}, req_id={req_id})")]
    Api {
        code: i32,
        message: String,
        req_id: String,
        http_status: u16,
    },

    /// HTTP request error.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// WebSocket error.
    #[error("websocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// WebSocket handshake did not complete within the connect timeout.
    #[error("connect timed out after {0:?}")]
    ConnectTimeout(std::time::Duration),

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Other error.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Creates a new API error.
    pub fn api(code: i32, message: impl Into<String>, http_status: u16) -> Self {
        Error::Api {
            code,
            message: message.into(),
            req_id: String::new(),
            http_status,
        }
    }

    /// Creates a new API error with request ID.
    pub fn api_with_req_id(
        code: i32,
        message: impl Into<String>,
        req_id: impl Into<String>,
        http_status: u16,
    ) -> Self {
        Error::Api {
            code,
            message: message.into(),
            req_id: req_id.into(),
            http_status,
        }
    }

    /// Returns true if this is an authentication error.
    pub fn is_auth_error(&self) -> bool {
        match self {
            Error::Api {
                code, http_status, ..
            } => *code == status_code::AUTH_ERROR || *http_status == 401 || *http_status == 403,
            _ => false,
        }
    }

    /// Returns true if this is a rate limit error.
    pub fn is_rate_limit(&self) -> bool {
        match self {
            Error::Api {
                code, http_status, ..
            } => *code == status_code::RATE_LIMIT || *http_status == 429,
            _ => false,
        }
    }

    /// Returns true if this is a quota exceeded error.
    pub fn is_quota_exceeded(&self) -> bool {
        match self {
            Error::Api {
                code, http_status, ..
            } => *code == status_code::QUOTA_EXCEED || *http_status == 402,
            _ => false,
        }
    }

    /// Returns true if this is an invalid parameter error.
    pub fn is_invalid_param(&self) -> bool {
        match self {
            Error::Api {
                code, http_status, ..
            } => *code == status_code::PARAM_ERROR || *http_status == 400,
            _ => false,
        }
    }

    /// Returns true if this is a server-side error.
    pub fn is_server_error(&self) -> bool {
        match self {
            Error::Api {
                code, http_status, ..
            } => *code >= status_code::SERVER_ERROR || *http_status >= 500,
            _ => false,
        }
    }

    /// Returns true if the request can be retried.
    pub fn is_retryable(&self) -> bool {
        self.is_rate_limit() || self.is_server_error()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        let err = Error::api(429, "slow down", 429);
        assert!(err.is_rate_limit());
        assert!(err.is_retryable());
        assert!(!err.is_auth_error());

        let err = Error::api(401, "bad key", 401);
        assert!(err.is_auth_error());
        assert!(!err.is_retryable());

        let err = Error::api(503, "unavailable", 503);
        assert!(err.is_server_error());
        assert!(err.is_retryable());

        let err = Error::Config("api_key must be non-empty".to_string());
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_display_includes_req_id() {
        let err = Error::api_with_req_id(400, "bad audio", "req-123", 400);
        let msg = err.to_string();
        assert!(msg.contains("bad audio"));
        assert!(msg.contains("req-123"));
    }
}
