//! Core types for TweetKit

use schemars::JsonSchema;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

/// Opaque runtime state handed through to actions
pub type State = serde_json::Value;

/// Message content: either a bare string or an object carrying `text`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Content {
    /// Plain text message
    Text(String),
    /// Structured content with an optional `text` field
    Structured(StructuredContent),
}

/// Object-shaped message content
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuredContent {
    /// Message text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Any other fields the runtime attached
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Message received from the agent runtime
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Runtime-assigned message id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Message body
    pub content: Content,
}

impl Message {
    /// Create a message with plain text content
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            id: None,
            content: Content::Text(text.into()),
        }
    }

    /// Create a message with structured content
    pub fn structured(content: StructuredContent) -> Self {
        Self {
            id: None,
            content: Content::Structured(content),
        }
    }

    /// Set the message id
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// The message text, if present and non-empty
    pub fn text_content(&self) -> Option<&str> {
        let text = match &self.content {
            Content::Text(text) => Some(text.as_str()),
            Content::Structured(content) => content.text.as_deref(),
        };
        text.filter(|t| !t.is_empty())
    }
}

/// Kind of attached media
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    /// Still image
    Photo,
    /// Video clip
    Video,
    /// Looping GIF
    AnimatedGif,
}

/// Media attached to a tweet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    /// Media id
    pub id: String,
    /// Media URL
    pub url: String,
    /// Media type
    #[serde(rename = "type")]
    pub kind: MediaKind,
    /// Preview image URL (videos)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
    /// Alt text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
}

/// Single poll choice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PollOption {
    /// Choice position, starting at 1
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<u32>,
    /// Choice label
    pub label: String,
    /// Votes counted so far
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub votes: Option<u64>,
}

/// Poll attached to a tweet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Poll {
    /// Poll id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Choices in display order
    pub options: Vec<PollOption>,
    /// Closing time (ISO 8601)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_datetime: Option<String>,
    /// Poll duration in minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
    /// "open" or "closed"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voting_status: Option<String>,
}

/// Tweet as returned by the scraping collaborator
///
/// Fields are passed through untouched; none are validated here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDetails {
    /// Tweet id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Tweet text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Author handle
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Author display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Creation time, seconds since the Unix epoch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    /// Like count
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub likes: Option<u64>,
    /// Retweet count
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retweets: Option<u64>,
    /// Reply count
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replies: Option<u64>,
    /// Id of the quoted tweet
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quoted_status_id: Option<String>,
    /// The quoted tweet itself
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quoted_status: Option<Box<PostDetails>>,
    /// Attached media
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<Vec<Media>>,
    /// Attached poll
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poll: Option<Poll>,
}

/// Engagement counts copied from [`PostDetails`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostMetrics {
    /// Like count
    #[serde(skip_serializing_if = "Option::is_none")]
    pub likes: Option<u64>,
    /// Retweet count
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retweets: Option<u64>,
    /// Reply count
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replies: Option<u64>,
}

/// Normalized tweet returned on a successful parse
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSummary {
    /// Tweet id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Tweet text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Author handle
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Creation time, seconds since the Unix epoch
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    /// Engagement counts
    pub metrics: PostMetrics,
    /// Id of the quoted tweet
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quoted_tweet_id: Option<String>,
    /// The quoted tweet
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quoted_tweet: Option<Box<PostDetails>>,
    /// Attached media
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<Vec<Media>>,
    /// Attached poll
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poll: Option<Poll>,
}

impl From<PostDetails> for PostSummary {
    fn from(post: PostDetails) -> Self {
        Self {
            id: post.id,
            text: post.text,
            author: post.username,
            timestamp: post.timestamp,
            metrics: PostMetrics {
                likes: post.likes,
                retweets: post.retweets,
                replies: post.replies,
            },
            quoted_tweet_id: post.quoted_status_id,
            quoted_tweet: post.quoted_status,
            media: post.media,
            poll: post.poll,
        }
    }
}

/// Outcome of [`Action::handle`](crate::Action::handle)
///
/// Serializes as `{"success": bool, "response": ...}` where `response` is the
/// summary on success and a human-readable message on failure.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionResult {
    /// Tweet fetched and normalized
    Success(PostSummary),
    /// Any failure, already rendered for the user
    Failure(String),
}

impl ActionResult {
    /// Build a failure result
    pub fn failure(message: impl Into<String>) -> Self {
        ActionResult::Failure(message.into())
    }

    /// True for [`ActionResult::Success`]
    pub fn is_success(&self) -> bool {
        matches!(self, ActionResult::Success(_))
    }

    /// The summary, if successful
    pub fn summary(&self) -> Option<&PostSummary> {
        match self {
            ActionResult::Success(summary) => Some(summary),
            ActionResult::Failure(_) => None,
        }
    }

    /// The failure message, if any
    pub fn error_message(&self) -> Option<&str> {
        match self {
            ActionResult::Success(_) => None,
            ActionResult::Failure(message) => Some(message),
        }
    }
}

impl Serialize for ActionResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ActionResult", 2)?;
        match self {
            ActionResult::Success(summary) => {
                state.serialize_field("success", &true)?;
                state.serialize_field("response", summary)?;
            }
            ActionResult::Failure(message) => {
                state.serialize_field("success", &false)?;
                state.serialize_field("response", message)?;
            }
        }
        state.end()
    }
}

/// One turn of an example conversation used for few-shot action matching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActionExample {
    /// Speaker placeholder, e.g. `{{user1}}` or `{{agentName}}`
    pub name: &'static str,
    /// What was said
    pub text: &'static str,
    /// Action the agent invoked on this turn
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<&'static str>,
}

/// Tool input shared by text-driven actions
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ActionInput {
    /// Message text containing a twitter.com or x.com status URL
    pub text: String,
}
