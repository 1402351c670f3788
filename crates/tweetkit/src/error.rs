//! Error types for TweetKit

use thiserror::Error;

/// Faults raised while establishing a session or fetching a tweet
///
/// These never escape [`Action::handle`](crate::Action::handle); the parse
/// action folds them into a failed [`ActionResult`](crate::ActionResult).
#[derive(Debug, Error)]
pub enum TweetKitError {
    /// Base URL of the scraping service could not be parsed
    #[error("Invalid base URL: must be an absolute http:// or https:// URL")]
    InvalidBaseUrl,

    /// Failed to build HTTP client
    #[error("Failed to create HTTP client")]
    ClientBuildError(#[source] reqwest::Error),

    /// Request timed out
    #[error("Request timed out")]
    Timeout,

    /// Failed to connect to server
    #[error("Failed to connect to server")]
    ConnectError(#[source] reqwest::Error),

    /// Other request error
    #[error("Request failed: {0}")]
    RequestError(String),

    /// Credentials were rejected or the login exchange failed
    #[error("Login failed: {0}")]
    LoginFailed(String),

    /// Non-success status other than not-found
    #[error("Unexpected HTTP status {0}")]
    HttpStatus(u16),

    /// Response body could not be decoded
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Fault raised by a third-party collaborator
    #[error("{0}")]
    Other(String),
}

impl TweetKitError {
    /// Create an error from a reqwest error
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TweetKitError::Timeout
        } else if err.is_connect() {
            TweetKitError::ConnectError(err)
        } else if err.is_decode() {
            TweetKitError::InvalidResponse(err.to_string())
        } else {
            TweetKitError::RequestError(err.to_string())
        }
    }
}
