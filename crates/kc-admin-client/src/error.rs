//! Admin client error types.

use thiserror::Error;

/// Result type alias using the admin client error type.
pub type AdminResult<T> = Result<T, AdminError>;

/// Errors returned by the admin client.
#[derive(Debug, Error)]
pub enum AdminError {
    /// The admin API answered with an HTTP error status.
    #[error("AdminAPIError: {status}: {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// Token retrieval did not yield a usable token.
    #[error("authentication error: {0}")]
    Auth(String),

    /// A successful response lacked an expected value.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Query parameters could not be encoded.
    #[error("invalid query: {0}")]
    Query(#[from] serde_urlencoded::ser::Error),

    /// Response body is not the expected JSON.
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Transport-level failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl AdminError {
    /// Returns the HTTP status for `Api` errors.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns whether the server rejected the credentials or token.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Api { status: 401 | 403, .. } | Self::Auth(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_message_includes_body() {
        let err = AdminError::Api {
            status: 409,
            body: r#"{"errorMessage":"Conflict detected"}"#.to_string(),
        };
        assert_eq!(
            err.to_string(),
            r#"AdminAPIError: 409: {"errorMessage":"Conflict detected"}"#
        );
        assert_eq!(err.status(), Some(409));
        assert!(!err.is_unauthorized());
    }

    #[test]
    fn forbidden_is_unauthorized() {
        let err = AdminError::Api {
            status: 403,
            body: String::new(),
        };
        assert!(err.is_unauthorized());
        assert!(AdminError::Auth("no token".to_string()).is_unauthorized());
    }
}
