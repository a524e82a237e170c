mod error;
mod model;
pub mod traits;

use std::sync::Arc;

use dashmap::DashMap;

pub use error::*;
pub use model::*;
pub use traits::PlatformCapability;

pub use instagram::{InstagramError, PlatformInstagram};

pub mod instagram;

use crate::{config::InstagramConfig, http::HttpClient};

#[derive(Clone, Default)]
pub struct PlatformRegistry {
    platforms: Arc<DashMap<Platform, Arc<dyn PlatformCapability>>>,
}

impl PlatformRegistry {
    /// Registry with every built-in platform.
    pub fn new(config: &InstagramConfig, http: Arc<dyn HttpClient>) -> Self {
        info!("Initializing platform registry");
        let registry = Self::default();

        info!("Registering Instagram platform");
        registry.register(Arc::new(PlatformInstagram::from_config(config, http)));

        info!("Platform registry initialized");
        registry
    }

    pub fn register(&self, platform: Arc<dyn PlatformCapability>) {
        self.platforms.insert(platform.platform_id(), platform);
    }

    pub fn get_platform(&self, platform: &Platform) -> Option<Arc<dyn PlatformCapability>> {
        self.platforms.get(platform).map(|p| Arc::clone(p.value()))
    }

    /// Finds the platform that handles `url`.
    pub fn platform_for_url(&self, url: &str) -> Result<Arc<dyn PlatformCapability>, PlatformError> {
        self.platforms
            .iter()
            .find(|entry| entry.value().matches_url(url))
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| PlatformError::UnsupportedPlatform(url.to_string()))
    }

    pub fn get_supported_platforms(&self) -> Vec<Platform> {
        let mut platforms = self.platforms.iter().map(|p| *p.key()).collect::<Vec<_>>();
        platforms.sort();
        platforms
    }
}
