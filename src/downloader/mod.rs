mod paths;
mod result;

use std::sync::Arc;

pub use paths::CachePaths;
pub use result::{FetchFailure, FetchResult, FetchedPost};

use crate::{
    error::Result,
    http::{HttpClient, HttpError},
    platform::PlatformRegistry,
    storage::MediaStore,
};

/// Resolves post URLs and keeps their media in a [`MediaStore`].
#[derive(Clone)]
pub struct Downloader {
    registry: Arc<PlatformRegistry>,
    http: Arc<dyn HttpClient>,
    store: Arc<dyn MediaStore>,
}

impl Downloader {
    pub fn new(registry: Arc<PlatformRegistry>, http: Arc<dyn HttpClient>, store: Arc<dyn MediaStore>) -> Self {
        Self { registry, http, store }
    }

    pub fn store(&self) -> &Arc<dyn MediaStore> {
        &self.store
    }

    /// Resolves `url`, then downloads the primary asset and its thumbnail
    /// into `target_dir` unless they are already there.
    ///
    /// Metadata is resolved on every call, so a fully cached post still costs
    /// one resolution request. Only the first item of a carousel is cached.
    pub async fn fetch_and_cache(&self, url: &str, target_dir: &str, force_overwrite: bool) -> FetchResult {
        match self.try_fetch_and_cache(url, target_dir, force_overwrite).await {
            Ok(post) => FetchResult::Success(post),
            Err(e) => {
                error!("Failed to fetch {}: {}", url, e);
                FetchResult::Failure(e.into())
            }
        }
    }

    async fn try_fetch_and_cache(&self, url: &str, target_dir: &str, force_overwrite: bool) -> Result<FetchedPost> {
        let platform = self.registry.platform_for_url(url)?;
        debug!("{} handles {}", platform.platform_name(), url);

        let post = platform.resolve(url).await?;
        if post.is_carousel() {
            warn!(
                "{} is a carousel, caching the first of {} items only",
                post.identifier,
                post.items().len()
            );
        }

        let primary = post.primary();
        let paths = CachePaths::new(target_dir, &post.identifier, primary.kind);

        let primary_cached = self.probe(&paths.primary).await;
        let thumbnail_cached = self.probe(&paths.thumbnail).await;

        if primary_cached && !force_overwrite {
            debug!("Cache hit for {}", paths.primary);
        } else {
            self.save(&primary.source_url, &paths.primary).await?;
            info!("Saved {}", paths.primary);
        }

        let thumbnail_path = match &primary.thumbnail_url {
            Some(thumbnail_url) => {
                self.cache_thumbnail(thumbnail_url, &paths.thumbnail, thumbnail_cached, force_overwrite)
                    .await
            }
            None => None,
        };

        Ok(FetchedPost {
            url: url.to_string(),
            identifier: post.identifier.clone(),
            primary_kind: primary.kind,
            primary_path: paths.primary,
            thumbnail_path,
            owner: post.owner.clone(),
            caption: post.caption.clone(),
            media_items: post.items().to_vec(),
        })
    }

    /// Existence check that never fails; a broken probe reads as absent.
    async fn probe(&self, path: &str) -> bool {
        match self.store.exists(path).await {
            Ok(exists) => exists,
            Err(e) => {
                warn!("Existence check for {} failed, treating as absent: {}", path, e);
                false
            }
        }
    }

    async fn download(&self, url: &str) -> std::result::Result<Vec<u8>, HttpError> {
        let response = self.http.get_bytes(url).await?;
        if response.status != 200 {
            return Err(HttpError::Status {
                url: url.to_string(),
                status: response.status,
            });
        }
        Ok(response.body)
    }

    async fn save(&self, url: &str, path: &str) -> Result<()> {
        let bytes = self.download(url).await?;
        self.store.write_binary(path, &bytes).await?;
        Ok(())
    }

    /// A failed thumbnail never fails the fetch.
    async fn cache_thumbnail(&self, url: &str, path: &str, cached: bool, force_overwrite: bool) -> Option<String> {
        if cached && !force_overwrite {
            debug!("Cache hit for {}", path);
            return Some(path.to_string());
        }

        match self.save(url, path).await {
            Ok(()) => {
                info!("Saved thumbnail {}", path);
                Some(path.to_string())
            }
            Err(e) => {
                warn!("Failed to save thumbnail {}: {}", path, e);
                cached.then(|| path.to_string())
            }
        }
    }
}
