mod backend;
mod error;
pub mod model;
mod util;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

pub use backend::{GraphqlBackend, InstagramBackend};
pub use error::*;
pub use util::*;

use crate::{config::InstagramConfig, http::HttpClient};

use super::{Platform, PlatformCapability, PlatformError, PostIdentifier, PostMedia};

pub struct PlatformInstagram {
    backend: Arc<dyn InstagramBackend>,
}

impl PlatformInstagram {
    pub fn new(backend: Arc<dyn InstagramBackend>) -> Self {
        Self { backend }
    }

    pub fn from_config(config: &InstagramConfig, http: Arc<dyn HttpClient>) -> Self {
        Self::new(Arc::new(GraphqlBackend::from_config(config, http)))
    }

    /// Pulls `data.xdt_shortcode_media` out of a query response; a missing or
    /// null node means the link is not a post or reel.
    fn shortcode_media<'a>(response: &'a Value, shortcode: &PostIdentifier) -> Result<&'a Value, InstagramError> {
        response
            .get("data")
            .and_then(|data| data.get("xdt_shortcode_media"))
            .filter(|media| !media.is_null())
            .ok_or_else(|| InstagramError::UnsupportedPost(shortcode.to_string()))
    }

    pub async fn resolve_shortcode(&self, shortcode: PostIdentifier) -> Result<PostMedia, InstagramError> {
        let response = self.backend.fetch_shortcode_media(&shortcode).await?;
        let media = Self::shortcode_media(&response, &shortcode)?;
        let post = model::decode_shortcode_media(shortcode, media)?;

        info!(
            "Resolved {} with {} media item(s) by {}",
            post.identifier,
            post.items().len(),
            post.owner.username
        );

        Ok(post)
    }
}

#[async_trait]
impl PlatformCapability for PlatformInstagram {
    fn platform_id(&self) -> Platform {
        Platform::Instagram
    }

    fn platform_name(&self) -> &str {
        "Instagram"
    }

    fn matches_url(&self, url: &str) -> bool {
        is_instagram_url(url)
    }

    fn parse_url(&self, url: &str) -> Result<PostIdentifier, PlatformError> {
        Ok(extract_shortcode(url)?)
    }

    async fn resolve(&self, url: &str) -> Result<PostMedia, PlatformError> {
        let shortcode = self.parse_url(url)?;
        Ok(self.resolve_shortcode(shortcode).await?)
    }
}
