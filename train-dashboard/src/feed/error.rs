//! Train feed error types.

/// Errors that can occur when fetching the train feed.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// HTTP request failed (connection refused, timeout, ...)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Feed returned a non-success status
    #[error("feed error {status}: {message}")]
    Api { status: u16, message: String },

    /// Response body was not a JSON array
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Mock data could not be loaded
    #[error("mock data error: {message}")]
    Mock { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = FeedError::Api {
            status: 503,
            message: "Service Unavailable".into(),
        };
        assert_eq!(err.to_string(), "feed error 503: Service Unavailable");

        let err = FeedError::Json {
            message: "expected a sequence".into(),
        };
        assert_eq!(err.to_string(), "JSON parse error: expected a sequence");

        let err = FeedError::Mock {
            message: "no such file".into(),
        };
        assert_eq!(err.to_string(), "mock data error: no such file");
    }
}
