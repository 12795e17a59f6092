//! Error types for API requests

use habitquest_types::SchemaViolation;
use thiserror::Error;

/// Errors from a single API request
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid API base url: {url}")]
    InvalidBaseUrl { url: String },

    #[error("request to {endpoint} failed")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} returned HTTP {status}{}", .message.as_deref().map(|m| format!(": {m}")).unwrap_or_default())]
    Status {
        endpoint: String,
        status: u16,
        message: Option<String>,
    },

    #[error("failed to decode response from {endpoint}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("response from {endpoint} violates schema ({violation})")]
    Schema {
        endpoint: String,
        violation: SchemaViolation,
    },
}

impl ApiError {
    /// HTTP status of the response, if one was received
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport { source, .. } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }

    /// Whether repeating the same request could succeed.
    ///
    /// Client errors (404 included) and malformed responses are final;
    /// transport failures, timeouts, throttling and server errors are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Transport { .. } => true,
            ApiError::Status { status, .. } => matches!(*status, 408 | 429 | 500..=599),
            ApiError::InvalidBaseUrl { .. } | ApiError::Decode { .. } | ApiError::Schema { .. } => {
                false
            }
        }
    }

    /// One-line message suitable for a toast or status line
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Status {
                message: Some(message),
                ..
            } => message.clone(),
            ApiError::Status { status: 404, .. } => "Not found".to_string(),
            ApiError::Status { status: 401 | 403, .. } => "Please sign in again".to_string(),
            ApiError::Transport { .. } => "Could not reach the server".to_string(),
            _ => "Something went wrong".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(code: u16) -> ApiError {
        ApiError::Status {
            endpoint: "/tasks".to_string(),
            status: code,
            message: None,
        }
    }

    #[test]
    fn not_found_is_final() {
        let err = status(404);
        assert!(err.is_not_found());
        assert!(!err.is_retryable());
    }

    #[test]
    fn server_errors_are_retryable() {
        assert!(status(500).is_retryable());
        assert!(status(503).is_retryable());
        assert!(status(429).is_retryable());
        assert!(!status(400).is_retryable());
        assert!(!status(422).is_retryable());
    }

    #[test]
    fn status_message_in_display() {
        let err = ApiError::Status {
            endpoint: "/friends/requests".to_string(),
            status: 409,
            message: Some("Already friends".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "/friends/requests returned HTTP 409: Already friends"
        );
        assert_eq!(err.user_message(), "Already friends");
        assert_eq!(status(500).to_string(), "/tasks returned HTTP 500");
    }

    #[test]
    fn schema_violation_is_final() {
        let err = ApiError::Schema {
            endpoint: "/adventures/1".to_string(),
            violation: SchemaViolation::new("monster_current_hp", "too high"),
        };
        assert!(!err.is_retryable());
        assert_eq!(err.status(), None);
    }
}
