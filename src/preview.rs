use std::sync::{Arc, LazyLock};

use regex::Regex;

use crate::{
    config::StorageConfig,
    downloader::{Downloader, FetchResult},
    entry::{is_local_path, CacheEntry},
    error::ErrorKind,
    storage::MediaStore,
};

static URL_LINE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^((https*://)|(www\.))+\S*$").expect("Failed to create url line regex"));

/// Flags describing what a block already had on disk.
///
/// [`PreviewService::load`] only branches on `video_saved`; the other flags
/// are for hosts deciding what to render or write back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PreviewStatus {
    /// The block holds a complete entry.
    pub vid_found: bool,
    /// The entry's video is a local file that exists.
    pub video_saved: bool,
    /// The entry's thumbnail is a local file that exists.
    pub image_saved: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preview {
    /// Something to show. `needs_store` is set when the entry is new and
    /// should be written back into the block.
    Card { entry: CacheEntry, needs_store: bool },
    /// Resolution failed on the network; show the bare link.
    LinkOnly(String),
    NotFound(String),
    MultipleUrls(Vec<String>),
}

/// Turns the text of a `reel` block into something to render.
pub struct PreviewService {
    downloader: Downloader,
    store: Arc<dyn MediaStore>,
    storage: StorageConfig,
}

impl PreviewService {
    pub fn new(downloader: Downloader, storage: StorageConfig) -> Self {
        let store = Arc::clone(downloader.store());
        Self {
            downloader,
            store,
            storage,
        }
    }

    /// Checks which of the entry's local files are present.
    pub async fn status(&self, entry: Option<&CacheEntry>) -> PreviewStatus {
        let Some(entry) = entry else {
            return PreviewStatus::default();
        };

        PreviewStatus {
            vid_found: true,
            video_saved: self.local_exists(&entry.video).await,
            image_saved: self.local_exists(&entry.thumbnail).await,
        }
    }

    async fn local_exists(&self, path: &str) -> bool {
        if !is_local_path(path) {
            return false;
        }
        match self.store.exists(path).await {
            Ok(exists) => exists,
            Err(e) => {
                warn!("Existence check for {} failed: {}", path, e);
                false
            }
        }
    }

    pub async fn load(&self, source: &str) -> Preview {
        let lines: Vec<&str> = source.trim().lines().map(str::trim).collect();
        let url = lines.first().copied().unwrap_or_default().to_string();

        if has_many_urls(&lines) {
            return Preview::MultipleUrls(lines.iter().map(|l| l.to_string()).collect());
        }

        let stored = CacheEntry::parse(source);
        let status = self.status(stored.as_ref()).await;
        debug!("Block for {}: {:?}", url, status);

        if let Some(entry) = stored.filter(|_| status.video_saved) {
            return Preview::Card {
                entry,
                needs_store: false,
            };
        }

        match self
            .downloader
            .fetch_and_cache(&url, &self.storage.media_folder(), false)
            .await
        {
            FetchResult::Success(post) => Preview::Card {
                entry: CacheEntry::from_fetched(&url, &post),
                needs_store: true,
            },
            FetchResult::Failure(failure) if failure.kind == ErrorKind::Network => {
                info!("Network failure for {}, showing link only", url);
                Preview::LinkOnly(url)
            }
            FetchResult::Failure(failure) => {
                info!("Cannot find {}: {}", url, failure.message);
                Preview::NotFound(url)
            }
        }
    }
}

/// More than one line, every one of them a URL.
pub fn has_many_urls(lines: &[&str]) -> bool {
    lines.len() > 1 && lines.iter().all(|line| URL_LINE_REGEX.is_match(line.trim()))
}
