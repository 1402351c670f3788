//! TweetKit - tweet URL parsing action for conversational agents
//!
//! This crate recognizes twitter.com / x.com status URLs in free-form
//! message text, fetches the referenced tweet through a pluggable scraping
//! client, and returns a normalized summary or a user-facing failure.
//!
//! ## Action System
//!
//! Agent capabilities implement [`Action`] (`validate` + `handle`). The
//! [`ActionRegistry`] dispatches a message to the first action that
//! validates it.
//!
//! Built-in actions:
//! - [`ParsePostAction`] - `PARSE_TWEET`, rate limited, backed by a
//!   [`PostFetchClient`] such as [`HttpPostClient`]

pub mod actions;
pub mod client;
mod config;
mod error;
pub mod matcher;
mod rate_limit;
mod types;

pub use actions::{Action, ActionRegistry, ParsePostAction, ParsePostActionBuilder};
pub use client::{initialize_session, HttpPostClient, HttpPostClientBuilder, PostFetchClient};
pub use config::{
    RateLimitConfig, ScraperConfig, SessionStrategy, DEFAULT_MAX_REQUESTS, DEFAULT_WINDOW_MS,
};
pub use error::TweetKitError;
pub use matcher::{extract_post_id, find_post_url, is_post_url};
pub use rate_limit::RateLimiter;
pub use types::{
    ActionExample, ActionInput, ActionResult, Content, Media, MediaKind, Message, Poll,
    PollOption, PostDetails, PostMetrics, PostSummary, State, StructuredContent,
};

/// Default User-Agent string
pub const DEFAULT_USER_AGENT: &str = "Everruns TweetKit/1.0";

/// Name the runtime uses to refer to the parse action
pub const ACTION_NAME: &str = "PARSE_TWEET";

/// Action description for LLM consumption
pub const ACTION_DESCRIPTION: &str = "Parses a tweet from a twitter.com or x.com status URL and returns its text, author, timestamp, engagement metrics, quoted tweet, media, and poll.";

/// Extended documentation for LLM consumption (llmtxt)
pub const ACTION_LLMTXT: &str = r#"# PARSE_TWEET

Fetches a tweet referenced by a status URL in the message text.

## Recognized URLs
- `https://twitter.com/<handle>/status/<id>`
- `https://x.com/<handle>/status/<id>`
- `http://` and a `www.` prefix are accepted; matching is case-insensitive
- Handles are letters, digits, and underscores only
- Anything after the numeric id (query, fragment, `/photo/1`) is ignored

## Input Parameters
- `text` (required): Message text containing the URL

## Output
`{"success": true, "response": {...}}` with:
- `id`, `text`, `author`, `timestamp`
- `metrics`: `likes`, `retweets`, `replies`
- `quotedTweetId`, `quotedTweet`, `media`, `poll` when present

or `{"success": false, "response": "<message>"}` where message is one of:
- `Rate limit exceeded. Please try again later.`
- `Invalid tweet URL format`
- `Tweet not found or unavailable`
- `Error fetching tweet: <detail>`

## Examples

### Parse a tweet
```json
{"text": "What does https://x.com/rustlang/status/1790000000000000000 say?"}
```

## Rate Limiting
A fixed window (default 5 requests per 60 seconds) is shared by every
caller. Rejected calls do not reach the scraping service. Text without a
tweet URL is rejected before the limiter and uses no slot.
"#;
