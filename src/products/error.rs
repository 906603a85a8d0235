//! Error types for the product catalog endpoint

use thiserror::Error;

/// Errors that can occur while fetching products
#[derive(Debug, Error)]
pub enum FetchError {
    /// The configured endpoint is not a usable URL
    #[error("Invalid product endpoint: {0}")]
    InvalidEndpoint(String),

    /// HTTP request failed before a response arrived
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status
    #[error("HTTP error! status: {status}")]
    Http {
        /// HTTP status code
        status: u16,
    },

    /// The response body is not a product list
    #[error("Failed to decode products: {0}")]
    Decode(#[from] serde_json::Error),

    /// The fetch was abandoned because its consumer went away
    #[error("Request cancelled")]
    Cancelled,
}

impl FetchError {
    /// Check if retrying by hand could succeed
    pub fn is_recoverable(&self) -> bool {
        match self {
            FetchError::Request(_) | FetchError::Cancelled => true,
            FetchError::Http { status } => *status >= 500 || *status == 429,
            FetchError::InvalidEndpoint(_) | FetchError::Decode(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_message_includes_status() {
        let err = FetchError::Http { status: 503 };
        assert_eq!(err.to_string(), "HTTP error! status: 503");
        assert!(err.is_recoverable());
    }

    #[test]
    fn client_errors_are_not_recoverable() {
        assert!(!FetchError::Http { status: 404 }.is_recoverable());
        assert!(!FetchError::InvalidEndpoint("nope".into()).is_recoverable());
    }
}
