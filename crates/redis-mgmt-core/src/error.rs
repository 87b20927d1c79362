//! Unified error handling for the management API clients
//!
//! Every failure in the client pipeline maps onto [`ApiError`], a closed
//! taxonomy shared by the Cloud and Enterprise surfaces and by both call
//! forms. All payloads are plain data, so outcomes from the blocking and
//! async forms of the same operation compare equal.
//!
//! # Example
//!
//! ```rust
//! use redis_mgmt_core::ApiError;
//!
//! fn describe(err: &ApiError) -> &'static str {
//!     if err.is_not_found() {
//!         "resource does not exist"
//!     } else if err.is_retryable() {
//!         "temporary, try again later"
//!     } else {
//!         "permanent"
//!     }
//! }
//!
//! let err = ApiError::HttpStatus {
//!     code: 404,
//!     detail: "subscription 42 not found".to_string(),
//! };
//! assert_eq!(describe(&err), "resource does not exist");
//! ```

use thiserror::Error;

/// Error type shared by the Cloud and Enterprise clients
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Required credentials could not be resolved from the environment
    #[error("Missing credentials: {0}")]
    MissingCredentials(String),

    /// Client construction was given unusable settings
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The request did not complete at the HTTP layer (DNS, connect, TLS, timeout)
    #[error("Transport error: {0}")]
    Transport(String),

    /// The server answered with a non-success status
    #[error("HTTP {code}: {detail}")]
    HttpStatus { code: u16, detail: String },

    /// A success response body could not be decoded
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// Anything that does not fit the categories above
    #[error("{0}")]
    Other(String),
}

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    /// Returns the status code if the server answered with an error
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::HttpStatus { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Returns true if this is a "not found" error (404)
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(404)
    }

    /// Returns true if this is an authentication/authorization error (401/403)
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status_code(), Some(401 | 403))
    }

    /// Returns true if this is a bad request error (400)
    #[must_use]
    pub fn is_bad_request(&self) -> bool {
        self.status_code() == Some(400)
    }

    /// Returns true if this is a conflict/precondition error (409/412)
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self.status_code(), Some(409 | 412))
    }

    /// Returns true if this is a rate limiting error (429)
    #[must_use]
    pub fn is_rate_limited(&self) -> bool {
        self.status_code() == Some(429)
    }

    /// Returns true if this is a server error (5xx)
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        matches!(self.status_code(), Some(code) if code >= 500)
    }

    /// Returns true if this error is potentially retryable
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, ApiError::Transport(_)) || self.is_server_error() || self.is_rate_limited()
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_predicate() {
        let err = ApiError::HttpStatus {
            code: 404,
            detail: "database not found".to_string(),
        };
        assert!(err.is_not_found());
        assert!(!err.is_unauthorized());
        assert!(!err.is_retryable());
        assert_eq!(err.status_code(), Some(404));
    }

    #[test]
    fn test_unauthorized_covers_401_and_403() {
        for code in [401, 403] {
            let err = ApiError::HttpStatus {
                code,
                detail: String::new(),
            };
            assert!(err.is_unauthorized());
            assert!(!err.is_retryable());
        }
    }

    #[test]
    fn test_retryable_classification() {
        let transport = ApiError::Transport("connection refused".to_string());
        assert!(transport.is_retryable());
        assert_eq!(transport.status_code(), None);

        let server = ApiError::HttpStatus {
            code: 503,
            detail: "maintenance".to_string(),
        };
        assert!(server.is_server_error());
        assert!(server.is_retryable());

        let rate_limited = ApiError::HttpStatus {
            code: 429,
            detail: "slow down".to_string(),
        };
        assert!(rate_limited.is_rate_limited());
        assert!(rate_limited.is_retryable());

        let missing = ApiError::MissingCredentials("API key not found".to_string());
        assert!(!missing.is_retryable());
    }

    #[test]
    fn test_conflict_covers_409_and_412() {
        for code in [409, 412] {
            let err = ApiError::HttpStatus {
                code,
                detail: String::new(),
            };
            assert!(err.is_conflict());
        }
    }

    #[test]
    fn test_decode_from_serde_error() {
        let serde_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: ApiError = serde_err.into();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn test_display_formats() {
        let err = ApiError::HttpStatus {
            code: 500,
            detail: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 500: boom");

        let err = ApiError::MissingCredentials("API key not found".to_string());
        assert!(err.to_string().contains("Missing credentials"));
        assert!(err.to_string().contains("API key"));
    }

    #[test]
    fn test_errors_compare_equal_by_content() {
        let a = ApiError::Transport("connection refused".to_string());
        let b = ApiError::Transport("connection refused".to_string());
        assert_eq!(a, b);
        assert_ne!(a, ApiError::Transport("timed out".to_string()));
    }
}
