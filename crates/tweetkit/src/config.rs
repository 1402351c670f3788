//! Session and rate-limit configuration
//!
//! Values are supplied by the embedding application; nothing here reads the
//! environment.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Default requests admitted per window
pub const DEFAULT_MAX_REQUESTS: u32 = 5;

/// Default window length in milliseconds
pub const DEFAULT_WINDOW_MS: u64 = 60_000;

/// Credentials for the scraping session
///
/// `cookies` takes precedence over `username`/`password`. `email` is accepted
/// for compatibility but not used when logging in.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScraperConfig {
    /// Account handle
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Account password
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Account email
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Serialized session cookies
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cookies: Option<String>,
}

impl ScraperConfig {
    /// Empty config (unauthenticated session)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set login credentials
    pub fn credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Set account email
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Set serialized session cookies
    pub fn cookies(mut self, cookies: impl Into<String>) -> Self {
        self.cookies = Some(cookies.into());
        self
    }

    /// How a session will be established with this config
    pub fn session_strategy(&self) -> SessionStrategy<'_> {
        if let Some(cookies) = non_empty(&self.cookies) {
            return SessionStrategy::Resume { cookies };
        }
        match (non_empty(&self.username), non_empty(&self.password)) {
            (Some(username), Some(password)) => SessionStrategy::Login { username, password },
            _ => SessionStrategy::Anonymous,
        }
    }
}

/// Empty strings count as unset
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

impl fmt::Debug for ScraperConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScraperConfig")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("email", &self.email)
            .field("cookies", &self.cookies.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Session initialization path chosen from a [`ScraperConfig`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStrategy<'a> {
    /// Install stored cookies verbatim
    Resume {
        /// Serialized cookies
        cookies: &'a str,
    },
    /// Interactive login
    Login {
        /// Account handle
        username: &'a str,
        /// Account password
        password: &'a str,
    },
    /// No credentials configured
    Anonymous,
}

impl SessionStrategy<'_> {
    /// Short label for logging
    pub fn label(&self) -> &'static str {
        match self {
            SessionStrategy::Resume { .. } => "cookies",
            SessionStrategy::Login { .. } => "login",
            SessionStrategy::Anonymous => "anonymous",
        }
    }
}

/// Rate limiter settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Requests admitted per window
    #[serde(default = "default_max_requests")]
    pub max_requests: u32,

    /// Window length in milliseconds
    #[serde(default = "default_window_ms")]
    pub window_ms: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: DEFAULT_MAX_REQUESTS,
            window_ms: DEFAULT_WINDOW_MS,
        }
    }
}

impl RateLimitConfig {
    /// Window length as a [`Duration`]
    pub fn window(&self) -> Duration {
        Duration::from_millis(self.window_ms)
    }
}

fn default_max_requests() -> u32 {
    DEFAULT_MAX_REQUESTS
}

fn default_window_ms() -> u64 {
    DEFAULT_WINDOW_MS
}
