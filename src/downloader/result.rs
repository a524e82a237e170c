use serde::Serialize;

use crate::{
    error::{Error, ErrorKind},
    platform::{MediaItem, MediaKind, Owner, PostIdentifier},
};

/// A resolved post whose primary asset is present in the store.
#[derive(Debug, Clone, Serialize)]
pub struct FetchedPost {
    pub url: String,
    pub identifier: PostIdentifier,
    pub primary_kind: MediaKind,
    pub primary_path: String,
    pub thumbnail_path: Option<String>,
    pub owner: Owner,
    pub caption: Option<String>,
    pub media_items: Vec<MediaItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FetchFailure {
    pub kind: ErrorKind,
    pub message: String,
}

impl From<Error> for FetchFailure {
    fn from(error: Error) -> Self {
        Self {
            kind: error.kind(),
            message: error.to_string(),
        }
    }
}

/// Outcome of [`super::Downloader::fetch_and_cache`]. Failures are values,
/// the presenting layer picks the fallback from [`FetchFailure::kind`].
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum FetchResult {
    Success(FetchedPost),
    Failure(FetchFailure),
}

impl FetchResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn post(&self) -> Option<&FetchedPost> {
        match self {
            Self::Success(post) => Some(post),
            Self::Failure(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&FetchFailure> {
        match self {
            Self::Success(_) => None,
            Self::Failure(failure) => Some(failure),
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        self.failure().map(|f| f.message.as_str())
    }

    /// Local path of the primary asset; an image for image posts.
    pub fn local_video_path(&self) -> Option<&str> {
        self.post().map(|p| p.primary_path.as_str())
    }

    pub fn local_thumbnail_path(&self) -> Option<&str> {
        self.post().and_then(|p| p.thumbnail_path.as_deref())
    }
}
