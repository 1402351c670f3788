//! Scraping collaborator boundary
//!
//! [`PostFetchClient`] is the seam between the parse action and whatever
//! actually talks to the platform. [`HttpPostClient`] is the bundled
//! implementation; tests and embedders can plug in their own.

mod http;

pub use http::{HttpPostClient, HttpPostClientBuilder};

use crate::config::{ScraperConfig, SessionStrategy};
use crate::error::TweetKitError;
use crate::types::PostDetails;
use async_trait::async_trait;

/// Session-based client that can fetch a tweet by id
///
/// Implementations keep their session internally, so every method takes
/// `&self`.
#[async_trait]
pub trait PostFetchClient: Send + Sync {
    /// Log in with account credentials
    async fn login(&self, username: &str, password: &str) -> Result<(), TweetKitError>;

    /// Install a previously serialized session verbatim
    async fn set_cookies(&self, cookies: &str) -> Result<(), TweetKitError>;

    /// Fetch a tweet, returning `Ok(None)` if it does not exist
    async fn fetch_post_by_id(&self, id: &str) -> Result<Option<PostDetails>, TweetKitError>;
}

/// Establish a session on `client` according to `config`
///
/// Stored cookies win over credentials; with neither, the client is left
/// unauthenticated. Nothing is cached, so calling this again repeats the
/// login or cookie install.
pub async fn initialize_session(
    client: &dyn PostFetchClient,
    config: &ScraperConfig,
) -> Result<(), TweetKitError> {
    let strategy = config.session_strategy();
    tracing::debug!(strategy = strategy.label(), "Initializing scraper session");

    match strategy {
        SessionStrategy::Resume { cookies } => client.set_cookies(cookies).await,
        SessionStrategy::Login { username, password } => client.login(username, password).await,
        SessionStrategy::Anonymous => Ok(()),
    }
}
