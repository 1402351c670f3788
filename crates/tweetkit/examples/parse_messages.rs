//! Example: Run messages through the action registry
//!
//! Run with: cargo run -p tweetkit --example parse_messages
//!
//! Uses an in-memory client so no scraping service is needed.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tweetkit::{
    ActionRegistry, Message, ParsePostAction, PostDetails, PostFetchClient, ScraperConfig,
    TweetKitError,
};

/// Client serving a fixed set of tweets
struct InMemoryClient {
    posts: HashMap<String, PostDetails>,
}

#[async_trait]
impl PostFetchClient for InMemoryClient {
    async fn login(&self, _username: &str, _password: &str) -> Result<(), TweetKitError> {
        Ok(())
    }

    async fn set_cookies(&self, _cookies: &str) -> Result<(), TweetKitError> {
        Ok(())
    }

    async fn fetch_post_by_id(&self, id: &str) -> Result<Option<PostDetails>, TweetKitError> {
        Ok(self.posts.get(id).cloned())
    }
}

/// Messages to run, in order
const MESSAGES: &[&str] = &[
    "What does https://x.com/rustlang/status/1790000000000000000 say?",
    "https://twitter.com/someone/status/1",
    "Just chatting, no links here",
    "https://twitter.com/rustlang",
    "https://x.com/rustlang/status/1790000000000000000?s=20",
    "https://x.com/rustlang/status/1790000000000000000",
];

#[tokio::main]
async fn main() {
    let mut posts = HashMap::new();
    posts.insert(
        "1790000000000000000".to_string(),
        PostDetails {
            id: Some("1790000000000000000".to_string()),
            text: Some("Rust 1.78 is out!".to_string()),
            username: Some("rustlang".to_string()),
            timestamp: Some(1_714_665_600),
            likes: Some(1200),
            retweets: Some(310),
            replies: Some(45),
            ..Default::default()
        },
    );

    let action = ParsePostAction::builder(Arc::new(InMemoryClient { posts }))
        .config(ScraperConfig::new())
        .rate_limit(3, 60_000)
        .build();

    let mut registry = ActionRegistry::new();
    registry.register(Arc::new(action));

    println!("TweetKit Message Examples");
    println!("=========================\n");

    for (i, text) in MESSAGES.iter().enumerate() {
        println!("{}. {}", i + 1, text);

        match registry.dispatch(&Message::text(*text), None).await {
            Some(result) => {
                let json = serde_json::to_string_pretty(&result).unwrap_or_default();
                println!("{}\n", json);
            }
            None => println!("   (no action matched)\n"),
        }
    }
}
