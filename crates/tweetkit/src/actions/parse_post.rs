//! Tweet parsing action
//!
//! Recognizes a tweet URL in the message, fetches the tweet through a
//! [`PostFetchClient`], and returns a normalized [`PostSummary`].

use crate::actions::Action;
use crate::client::{initialize_session, PostFetchClient};
use crate::config::{RateLimitConfig, ScraperConfig};
use crate::error::TweetKitError;
use crate::matcher::{extract_post_id, is_post_url};
use crate::rate_limit::RateLimiter;
use crate::types::{ActionExample, ActionResult, Message, PostSummary, State};
use crate::{ACTION_DESCRIPTION, ACTION_NAME};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Returned when the limiter rejects the call
pub const RATE_LIMITED_MESSAGE: &str = "Rate limit exceeded. Please try again later.";

/// Returned when no post id can be extracted
pub const INVALID_URL_MESSAGE: &str = "Invalid tweet URL format";

/// Returned when the collaborator has no such tweet
pub const NOT_FOUND_MESSAGE: &str = "Tweet not found or unavailable";

/// Prefix for collaborator faults
pub const FETCH_ERROR_PREFIX: &str = "Error fetching tweet: ";

/// Used when a fault renders as an empty string
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error occurred";

const SIMILES: &[&str] = &[
    "GET_TWEET",
    "READ_TWEET",
    "FETCH_TWEET",
    "ANALYZE_TWEET",
    "EXTRACT_TWEET",
];

const EXAMPLES: &[&[ActionExample]] = &[
    &[
        ActionExample {
            name: "{{user1}}",
            text: "Can you tell me what this tweet says? https://twitter.com/rustlang/status/1790000000000000000",
            action: None,
        },
        ActionExample {
            name: "{{agentName}}",
            text: "Let me pull up that tweet for you.",
            action: Some(ACTION_NAME),
        },
    ],
    &[
        ActionExample {
            name: "{{user1}}",
            text: "How many likes does https://x.com/tokio_rs/status/1234567890123456789 have?",
            action: None,
        },
        ActionExample {
            name: "{{agentName}}",
            text: "I'll fetch the post and check its engagement.",
            action: Some(ACTION_NAME),
        },
    ],
];

/// Builder for [`ParsePostAction`]
pub struct ParsePostActionBuilder {
    client: Arc<dyn PostFetchClient>,
    config: ScraperConfig,
    rate_limit: RateLimitConfig,
}

impl ParsePostActionBuilder {
    /// Set session configuration
    pub fn config(mut self, config: ScraperConfig) -> Self {
        self.config = config;
        self
    }

    /// Admit at most `max_requests` per `window_ms` milliseconds
    pub fn rate_limit(mut self, max_requests: u32, window_ms: u64) -> Self {
        self.rate_limit = RateLimitConfig {
            max_requests,
            window_ms,
        };
        self
    }

    /// Set rate limiter settings from a config value
    pub fn rate_limit_config(mut self, rate_limit: RateLimitConfig) -> Self {
        self.rate_limit = rate_limit;
        self
    }

    /// Build the action
    pub fn build(self) -> ParsePostAction {
        ParsePostAction {
            client: self.client,
            config: self.config,
            limiter: RateLimiter::with_window(
                self.rate_limit.max_requests,
                self.rate_limit.window(),
            ),
        }
    }
}

/// `PARSE_TWEET` action
///
/// One instance owns one [`RateLimiter`]; share the instance (e.g. in an
/// [`ActionRegistry`](crate::ActionRegistry)) so all callers draw from the
/// same budget.
pub struct ParsePostAction {
    client: Arc<dyn PostFetchClient>,
    config: ScraperConfig,
    limiter: RateLimiter,
}

impl ParsePostAction {
    /// Start building an action around `client`
    pub fn builder(client: Arc<dyn PostFetchClient>) -> ParsePostActionBuilder {
        ParsePostActionBuilder {
            client,
            config: ScraperConfig::default(),
            rate_limit: RateLimitConfig::default(),
        }
    }

    /// Create an action with default rate limits
    pub fn new(client: Arc<dyn PostFetchClient>, config: ScraperConfig) -> Self {
        Self::builder(client).config(config).build()
    }

    /// The limiter gating this action
    pub fn limiter(&self) -> &RateLimiter {
        &self.limiter
    }

    async fn fetch_summary(&self, post_id: &str) -> Result<ActionResult, TweetKitError> {
        initialize_session(self.client.as_ref(), &self.config).await?;

        match self.client.fetch_post_by_id(post_id).await? {
            Some(post) => {
                info!(post_id, "Parsed tweet");
                Ok(ActionResult::Success(PostSummary::from(post)))
            }
            None => Ok(ActionResult::failure(NOT_FOUND_MESSAGE)),
        }
    }
}

/// Render a fault into the user-facing failure text
fn fault_message(err: &TweetKitError) -> String {
    let detail = err.to_string();
    if detail.is_empty() {
        format!("{}{}", FETCH_ERROR_PREFIX, UNKNOWN_ERROR_MESSAGE)
    } else {
        format!("{}{}", FETCH_ERROR_PREFIX, detail)
    }
}

#[async_trait]
impl Action for ParsePostAction {
    fn name(&self) -> &'static str {
        ACTION_NAME
    }

    fn description(&self) -> &'static str {
        ACTION_DESCRIPTION
    }

    fn similes(&self) -> &'static [&'static str] {
        SIMILES
    }

    fn examples(&self) -> &'static [&'static [ActionExample]] {
        EXAMPLES
    }

    fn validate(&self, message: &Message) -> bool {
        message.text_content().map(is_post_url).unwrap_or(false)
    }

    async fn handle(&self, message: &Message, _state: Option<&State>) -> ActionResult {
        // Unparseable input is rejected without spending a slot
        let Some(post_id) = message.text_content().and_then(extract_post_id) else {
            return ActionResult::failure(INVALID_URL_MESSAGE);
        };

        if !self.limiter.check_limit() {
            warn!(action = ACTION_NAME, "Rate limit exceeded");
            return ActionResult::failure(RATE_LIMITED_MESSAGE);
        }

        match self.fetch_summary(post_id).await {
            Ok(result) => result,
            Err(err) => {
                error!(action = ACTION_NAME, error = %err, "Tweet fetch failed");
                ActionResult::Failure(fault_message(&err))
            }
        }
    }
}
