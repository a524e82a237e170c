use async_trait::async_trait;

use super::{Platform, PlatformError, PostIdentifier, PostMedia};

#[async_trait]
pub trait PlatformCapability: Send + Sync {
    fn platform_id(&self) -> Platform;

    fn platform_name(&self) -> &str;

    /// Cheap host check; decides which platform handles a URL.
    fn matches_url(&self, url: &str) -> bool;

    fn parse_url(&self, url: &str) -> Result<PostIdentifier, PlatformError>;

    /// Resolves a post URL with a single backend round-trip.
    async fn resolve(&self, url: &str) -> Result<PostMedia, PlatformError>;
}
