//! Tweet URL recognition
//!
//! Matches `http(s)://[www.]twitter.com/<handle>/status/<digits>` and the
//! same shape on `x.com`, anywhere inside free-form text. The handle must be
//! ASCII word characters only; anything after the digits is ignored.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Group 1 is always the post id. Explicit ASCII classes because `\w` and
    // `\d` are Unicode-aware in the regex crate.
    static ref POST_URL_REGEX: Regex = Regex::new(
        r"(?i)https?://(?:www\.)?(?:twitter\.com|x\.com)/[A-Za-z0-9_]+/status/([0-9]+)"
    )
    .expect("post URL regex is valid");
}

/// Returns true if `text` contains a tweet URL
pub fn is_post_url(text: &str) -> bool {
    POST_URL_REGEX.is_match(text)
}

/// Extract the numeric post id from the first tweet URL in `text`
pub fn extract_post_id(text: &str) -> Option<&str> {
    POST_URL_REGEX
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Return the matched URL slice (scheme through post id)
pub fn find_post_url(text: &str) -> Option<&str> {
    POST_URL_REGEX.find(text).map(|m| m.as_str())
}
