//! HTTP scraping-service client
//!
//! Talks to a scraping service that fronts the platform:
//! - `POST {base}/auth/login` exchanges credentials for serialized cookies
//! - `GET {base}/posts/{id}` returns a tweet as JSON, 404 when missing
//!
//! The session is a cookie string sent on every fetch.

use crate::client::PostFetchClient;
use crate::error::TweetKitError;
use crate::types::PostDetails;
use crate::DEFAULT_USER_AGENT;
use async_trait::async_trait;
use parking_lot::RwLock;
use reqwest::header::{HeaderValue, ACCEPT, COOKIE};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    cookies: String,
}

/// Builder for [`HttpPostClient`]
#[derive(Debug, Clone)]
pub struct HttpPostClientBuilder {
    base_url: String,
    user_agent: Option<String>,
    timeout: Duration,
}

impl HttpPostClientBuilder {
    /// Set custom User-Agent
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Set connect and request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the client
    pub fn build(self) -> Result<HttpPostClient, TweetKitError> {
        let base_url = Url::parse(&self.base_url).map_err(|_| TweetKitError::InvalidBaseUrl)?;
        if !matches!(base_url.scheme(), "http" | "https") || base_url.cannot_be_a_base() {
            return Err(TweetKitError::InvalidBaseUrl);
        }

        let user_agent = self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT);
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .connect_timeout(self.timeout)
            .timeout(self.timeout)
            .build()
            .map_err(TweetKitError::ClientBuildError)?;

        Ok(HttpPostClient {
            client,
            base_url,
            session: RwLock::new(None),
        })
    }
}

/// [`PostFetchClient`] backed by a scraping service over HTTP
pub struct HttpPostClient {
    client: reqwest::Client,
    base_url: Url,
    session: RwLock<Option<String>>,
}

impl fmt::Debug for HttpPostClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpPostClient")
            .field("base_url", &self.base_url.as_str())
            .field("session", &self.session.read().as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl HttpPostClient {
    /// Start building a client for the service at `base_url`
    pub fn builder(base_url: impl Into<String>) -> HttpPostClientBuilder {
        HttpPostClientBuilder {
            base_url: base_url.into(),
            user_agent: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Currently installed session cookies
    pub fn session_cookies(&self) -> Option<String> {
        self.session.read().clone()
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, TweetKitError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| TweetKitError::InvalidBaseUrl)?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

#[async_trait]
impl PostFetchClient for HttpPostClient {
    async fn login(&self, username: &str, password: &str) -> Result<(), TweetKitError> {
        let url = self.endpoint(&["auth", "login"])?;
        debug!(url = %url, "Logging in to scraping service");

        let response = self
            .client
            .post(url)
            .json(&LoginRequest { username, password })
            .send()
            .await
            .map_err(TweetKitError::from_reqwest)?;

        if !response.status().is_success() {
            return Err(TweetKitError::LoginFailed(format!(
                "HTTP {}",
                response.status().as_u16()
            )));
        }

        let body: LoginResponse = response
            .json()
            .await
            .map_err(|e| TweetKitError::LoginFailed(format!("invalid login response: {}", e)))?;

        *self.session.write() = Some(body.cookies);
        Ok(())
    }

    async fn set_cookies(&self, cookies: &str) -> Result<(), TweetKitError> {
        *self.session.write() = Some(cookies.to_string());
        Ok(())
    }

    async fn fetch_post_by_id(&self, id: &str) -> Result<Option<PostDetails>, TweetKitError> {
        let url = self.endpoint(&["posts", id])?;
        debug!(url = %url, "Fetching tweet");

        let mut request = self
            .client
            .get(url)
            .header(ACCEPT, HeaderValue::from_static("application/json"));

        // Clone out so the lock is not held across the await
        let cookies = self.session_cookies();
        if let Some(cookies) = cookies {
            let value = HeaderValue::from_str(&cookies)
                .map_err(|_| TweetKitError::RequestError("invalid session cookies".to_string()))?;
            request = request.header(COOKIE, value);
        }

        let response = request.send().await.map_err(TweetKitError::from_reqwest)?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(TweetKitError::HttpStatus(status.as_u16()));
        }

        // A `null` body is the service's other way of saying not found
        response
            .json::<Option<PostDetails>>()
            .await
            .map_err(|e| TweetKitError::InvalidResponse(e.to_string()))
    }
}
