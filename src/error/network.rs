//! Network-related error types.
//!
//! Failures around connectivity and the HTTP transport. Raw `reqwest` errors
//! are classified at the component boundary and never escape the crate.

use std::fmt;

/// Network-specific error variants.
#[derive(Debug, Clone, PartialEq)]
pub enum NetworkError {
    /// The connectivity monitor reported no usable network path, so the
    /// request was never attempted.
    Offline,

    /// Connection to the server failed.
    ConnectionFailed { url: String, message: String },

    /// Request timed out.
    Timeout { operation: String },

    /// Server answered with a non-success HTTP status.
    HttpStatus { status: u16, message: String },

    /// Response arrived but its body could not be decoded.
    InvalidResponse { message: String },
}

impl NetworkError {
    /// Whether retrying the same request might succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            NetworkError::Offline => false,
            NetworkError::ConnectionFailed { .. } => true,
            NetworkError::Timeout { .. } => true,
            NetworkError::HttpStatus { status, .. } => *status >= 500 || *status == 429,
            NetworkError::InvalidResponse { .. } => false,
        }
    }

    /// Whether the UI should offer the network-settings affordance.
    pub fn suggests_settings(&self) -> bool {
        matches!(self, NetworkError::Offline)
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            NetworkError::Offline => {
                "No internet connection. Please check your Wi-Fi or cellular data.".to_string()
            }
            NetworkError::ConnectionFailed { .. } => {
                "Unable to reach the server. Please check your connection and try again."
                    .to_string()
            }
            NetworkError::Timeout { operation } => {
                format!("The {} request timed out. Please try again.", operation)
            }
            NetworkError::HttpStatus { status, .. } => match *status {
                500..=599 => "The server is having trouble. Please try again later.".to_string(),
                _ => format!("The server returned an error (HTTP {}).", status),
            },
            NetworkError::InvalidResponse { .. } => {
                "An error occurred. Please try again or contact support.".to_string()
            }
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            NetworkError::Offline => "E_NET_OFFLINE",
            NetworkError::ConnectionFailed { .. } => "E_NET_CONN",
            NetworkError::Timeout { .. } => "E_NET_TIMEOUT",
            NetworkError::HttpStatus { .. } => "E_NET_HTTP",
            NetworkError::InvalidResponse { .. } => "E_NET_INVALID",
        }
    }
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkError::Offline => write!(f, "no network path available"),
            NetworkError::ConnectionFailed { url, message } => {
                write!(f, "connection failed to '{}': {}", url, message)
            }
            NetworkError::Timeout { operation } => write!(f, "{} timed out", operation),
            NetworkError::HttpStatus { status, message } => {
                write!(f, "HTTP {} error: {}", status, message)
            }
            NetworkError::InvalidResponse { message } => {
                write!(f, "invalid response: {}", message)
            }
        }
    }
}

impl std::error::Error for NetworkError {}

/// Classify a reqwest error into a [`NetworkError`].
pub fn classify_reqwest_error(err: &reqwest::Error, url: &str) -> NetworkError {
    if err.is_timeout() {
        NetworkError::Timeout { operation: "HTTP".to_string() }
    } else if err.is_connect() {
        NetworkError::ConnectionFailed {
            url: url.to_string(),
            message: err.to_string(),
        }
    } else if err.is_decode() {
        NetworkError::InvalidResponse { message: err.to_string() }
    } else if let Some(status) = err.status() {
        NetworkError::HttpStatus {
            status: status.as_u16(),
            message: err.to_string(),
        }
    } else {
        NetworkError::ConnectionFailed {
            url: url.to_string(),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offline_suggests_settings() {
        let err = NetworkError::Offline;
        assert!(err.suggests_settings());
        assert!(!err.is_retryable());
        assert_eq!(err.error_code(), "E_NET_OFFLINE");
        assert!(err.user_message().contains("internet"));
    }

    #[test]
    fn test_server_errors_are_retryable() {
        let err = NetworkError::HttpStatus { status: 503, message: "unavailable".to_string() };
        assert!(err.is_retryable());

        let err = NetworkError::HttpStatus { status: 404, message: "not found".to_string() };
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_invalid_response_message() {
        let err = NetworkError::InvalidResponse { message: "bad json".to_string() };
        assert!(!err.is_retryable());
        assert!(err.user_message().contains("contact support"));
        assert_eq!(err.error_code(), "E_NET_INVALID");
    }

    #[test]
    fn test_display_includes_detail() {
        let err = NetworkError::ConnectionFailed {
            url: "http://example.com".to_string(),
            message: "refused".to_string(),
        };
        let rendered = format!("{}", err);
        assert!(rendered.contains("example.com"));
        assert!(rendered.contains("refused"));
    }
}
