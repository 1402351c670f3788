//! Integration tests for TweetKit using wiremock

use async_trait::async_trait;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tweetkit::{
    Action, ActionRegistry, ActionResult, HttpPostClient, Message, ParsePostAction, PostDetails,
    PostFetchClient, ScraperConfig, StructuredContent, TweetKitError,
};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TWEET_URL: &str = "https://x.com/rustlang/status/1790000000000000000";

fn tweet_json() -> serde_json::Value {
    json!({
        "id": "1790000000000000000",
        "text": "Rust 1.78 is out!",
        "username": "rustlang",
        "name": "Rust Language",
        "timestamp": 1714665600,
        "likes": 1200,
        "retweets": 310,
        "replies": 45,
        "quotedStatusId": "1789999999999999999",
        "quotedStatus": {
            "id": "1789999999999999999",
            "text": "Release notes coming soon",
            "username": "rustlang"
        },
        "media": [{
            "id": "m1",
            "url": "https://pbs.twimg.com/media/m1.jpg",
            "type": "photo",
            "altText": "Ferris"
        }],
        "poll": {
            "id": "p1",
            "options": [
                {"position": 1, "label": "Yes", "votes": 10},
                {"position": 2, "label": "No", "votes": 2}
            ],
            "votingStatus": "closed"
        }
    })
}

fn http_client(server: &MockServer) -> Arc<HttpPostClient> {
    Arc::new(HttpPostClient::builder(server.uri()).build().unwrap())
}

#[tokio::test]
async fn test_parse_success_copies_fields() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/posts/1790000000000000000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(tweet_json()))
        .mount(&mock_server)
        .await;

    let action = ParsePostAction::new(http_client(&mock_server), ScraperConfig::new());
    let result = action.handle(&Message::text(TWEET_URL), None).await;

    let details: PostDetails = serde_json::from_value(tweet_json()).unwrap();
    let summary = result.summary().expect("expected success").clone();

    assert_eq!(summary.id, details.id);
    assert_eq!(summary.text, details.text);
    assert_eq!(summary.author.as_deref(), Some("rustlang"));
    assert_eq!(summary.timestamp, Some(1714665600));
    assert_eq!(summary.metrics.likes, Some(1200));
    assert_eq!(summary.metrics.retweets, Some(310));
    assert_eq!(summary.metrics.replies, Some(45));
    assert_eq!(summary.quoted_tweet_id, details.quoted_status_id);
    assert_eq!(summary.quoted_tweet, details.quoted_status);
    assert_eq!(summary.media, details.media);
    assert_eq!(summary.poll, details.poll);

    let value = serde_json::to_value(&result).unwrap();
    assert_eq!(value["success"], true);
    assert_eq!(value["response"]["quotedTweetId"], "1789999999999999999");
    assert_eq!(value["response"]["quotedTweet"]["text"], "Release notes coming soon");
    assert_eq!(value["response"]["media"][0]["altText"], "Ferris");
}

#[tokio::test]
async fn test_parse_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/posts/1790000000000000000"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let action = ParsePostAction::new(http_client(&mock_server), ScraperConfig::new());
    let result = action.handle(&Message::text(TWEET_URL), None).await;

    assert_eq!(
        result,
        ActionResult::failure("Tweet not found or unavailable")
    );
}

#[tokio::test]
async fn test_parse_null_body_is_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/posts/1790000000000000000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(null)))
        .mount(&mock_server)
        .await;

    let action = ParsePostAction::new(http_client(&mock_server), ScraperConfig::new());
    let result = action.handle(&Message::text(TWEET_URL), None).await;

    assert_eq!(result.error_message(), Some("Tweet not found or unavailable"));
}

#[tokio::test]
async fn test_parse_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/posts/1790000000000000000"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let action = ParsePostAction::new(http_client(&mock_server), ScraperConfig::new());
    let result = action.handle(&Message::text(TWEET_URL), None).await;

    assert_eq!(
        result.error_message(),
        Some("Error fetching tweet: Unexpected HTTP status 503")
    );
}

#[tokio::test]
async fn test_parse_invalid_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/posts/1790000000000000000"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html>blocked</html>")
                .insert_header("content-type", "text/html"),
        )
        .mount(&mock_server)
        .await;

    let action = ParsePostAction::new(http_client(&mock_server), ScraperConfig::new());
    let result = action.handle(&Message::text(TWEET_URL), None).await;

    let message = result.error_message().unwrap();
    assert!(message.starts_with("Error fetching tweet: Invalid response:"));
}

#[tokio::test]
async fn test_login_then_fetch_with_session_cookie() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({"username": "bot", "password": "hunter2"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"cookies": "auth_token=abc; ct0=def"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/posts/1790000000000000000"))
        .and(header("cookie", "auth_token=abc; ct0=def"))
        .respond_with(ResponseTemplate::new(200).set_body_json(tweet_json()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = ScraperConfig::new()
        .credentials("bot", "hunter2")
        .email("bot@example.com");
    let action = ParsePostAction::new(http_client(&mock_server), config);

    let result = action.handle(&Message::text(TWEET_URL), None).await;
    assert!(result.is_success());
}

#[tokio::test]
async fn test_login_rejected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(tweet_json()))
        .expect(0)
        .mount(&mock_server)
        .await;

    let action = ParsePostAction::new(
        http_client(&mock_server),
        ScraperConfig::new().credentials("bot", "wrong"),
    );
    let result = action.handle(&Message::text(TWEET_URL), None).await;

    assert_eq!(
        result.error_message(),
        Some("Error fetching tweet: Login failed: HTTP 401")
    );
}

#[tokio::test]
async fn test_cookies_sent_without_login() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/posts/1790000000000000000"))
        .and(header("cookie", "auth_token=stored"))
        .respond_with(ResponseTemplate::new(200).set_body_json(tweet_json()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = ScraperConfig::new()
        .credentials("bot", "hunter2")
        .cookies("auth_token=stored");
    let action = ParsePostAction::new(http_client(&mock_server), config);

    assert!(action.handle(&Message::text(TWEET_URL), None).await.is_success());
}

/// Client that counts every call and never talks to the network
#[derive(Default)]
struct CountingClient {
    calls: AtomicUsize,
}

#[async_trait]
impl PostFetchClient for CountingClient {
    async fn login(&self, _username: &str, _password: &str) -> Result<(), TweetKitError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn set_cookies(&self, _cookies: &str) -> Result<(), TweetKitError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn fetch_post_by_id(&self, id: &str) -> Result<Option<PostDetails>, TweetKitError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Some(PostDetails {
            id: Some(id.to_string()),
            ..Default::default()
        }))
    }
}

#[tokio::test]
async fn test_rate_limited_never_reaches_client() {
    let client = Arc::new(CountingClient::default());
    let action = ParsePostAction::builder(client.clone())
        .config(ScraperConfig::new().cookies("auth_token=abc"))
        .rate_limit(0, 60_000)
        .build();

    let result = action.handle(&Message::text(TWEET_URL), None).await;

    assert_eq!(
        result,
        ActionResult::failure("Rate limit exceeded. Please try again later.")
    );
    assert_eq!(client.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_limiter_shared_across_concurrent_handles() {
    let client = Arc::new(CountingClient::default());
    let action = Arc::new(
        ParsePostAction::builder(client.clone())
            .rate_limit(3, 60_000)
            .build(),
    );

    let tasks: Vec<_> = (0..10)
        .map(|_| {
            let action = Arc::clone(&action);
            tokio::spawn(async move { action.handle(&Message::text(TWEET_URL), None).await })
        })
        .collect();

    let mut admitted = 0;
    for task in tasks {
        if task.await.unwrap().is_success() {
            admitted += 1;
        }
    }

    assert_eq!(admitted, 3);
    assert_eq!(client.calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_registry_dispatch_structured_message() {
    let mut registry = ActionRegistry::new();
    registry.register(Arc::new(ParsePostAction::new(
        Arc::new(CountingClient::default()),
        ScraperConfig::new(),
    )));

    let message = Message::structured(StructuredContent {
        text: Some(format!("look at this {}", TWEET_URL)),
        ..Default::default()
    });
    let result = registry.dispatch(&message, None).await.unwrap();
    assert_eq!(
        result.summary().unwrap().id.as_deref(),
        Some("1790000000000000000")
    );

    assert!(registry
        .dispatch(&Message::text("https://twitter.com/user"), None)
        .await
        .is_none());
}

#[tokio::test]
async fn test_handle_without_url_is_invalid_format() {
    let client = Arc::new(CountingClient::default());
    let action = ParsePostAction::new(client.clone(), ScraperConfig::new());

    assert!(!action.validate(&Message::text("not a url")));
    let result = action.handle(&Message::text("not a url"), None).await;

    assert_eq!(result, ActionResult::failure("Invalid tweet URL format"));
    assert_eq!(client.calls.load(Ordering::SeqCst), 0);
}
