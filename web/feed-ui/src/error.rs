//! Error types for the feed interaction layer

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeedError {
    /// The post list could not be fetched from the data layer
    #[error("Fetch rejected: {0}")]
    FetchRejected(String),

    /// A like/comment/create/remove call was refused by the data layer
    #[error("Mutation rejected: {0}")]
    MutationRejected(String),

    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Event loop closed")]
    EventLoopClosed,
}

/// Result type alias for feed operations
pub type Result<T> = std::result::Result<T, FeedError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FeedError::FetchRejected("timeout".to_string());
        assert_eq!(err.to_string(), "Fetch rejected: timeout");

        let err = FeedError::ElementNotFound("likes-7".to_string());
        assert_eq!(err.to_string(), "Element not found: likes-7");
    }
}
