use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::platform::PostIdentifier;

use super::InstagramError;

const INSTAGRAM_HOSTS: [&str; 3] = ["instagram.com", "www.instagram.com", "m.instagram.com"];

/// Path segments that precede a shortcode.
const POST_MARKERS: [&str; 3] = ["p", "reel", "tv"];

static INSTAGRAM_URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"https?://(?:www\.|m\.)?instagram\.com/[^\s]+").expect("Failed to create Instagram URL regex")
});

static SCHEMELESS_INSTAGRAM_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:www\.|m\.)?instagram\.com/[^\s]+$").expect("Failed to create scheme-less Instagram regex")
});

/// First Instagram URL inside free text, if any.
pub fn extract_instagram_url(text: &str) -> Option<String> {
    INSTAGRAM_URL_REGEX.find(text).map(|m| m.as_str().to_string())
}

pub fn is_instagram_url(url: &str) -> bool {
    let url = url.trim();
    match Url::parse(url) {
        Ok(parsed) => parsed
            .host_str()
            .map(|host| INSTAGRAM_HOSTS.contains(&host))
            .unwrap_or(false),
        Err(_) => SCHEMELESS_INSTAGRAM_REGEX.is_match(url),
    }
}

/// Returns the segment right after the first `p`, `reel` or `tv` segment.
pub fn extract_shortcode(url: &str) -> Result<PostIdentifier, InstagramError> {
    let url = url.trim();

    let segments: Vec<String> = match Url::parse(url) {
        Ok(parsed) => parsed
            .path_segments()
            .map(|segments| segments.map(str::to_string).collect())
            .unwrap_or_default(),
        Err(_) => {
            let without_query = url.split(['?', '#']).next().unwrap_or_default();
            without_query.split('/').map(str::to_string).collect()
        }
    };

    let marker_index = segments
        .iter()
        .position(|segment| POST_MARKERS.contains(&segment.as_str()))
        .ok_or_else(|| InstagramError::InvalidUrl(format!("no post marker in {}", url)))?;

    segments
        .get(marker_index + 1)
        .and_then(|token| PostIdentifier::new(token))
        .ok_or_else(|| InstagramError::InvalidUrl(format!("no shortcode after marker in {}", url)))
}
