use crate::{
    platform::{MediaKind, PostIdentifier},
    utils::join_path,
};

/// Deterministic vault paths of a post's cached assets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachePaths {
    pub primary: String,
    pub thumbnail: String,
}

impl CachePaths {
    /// `{dir}/{kind}_{id}.{ext}` and `{dir}/{kind}_{id}_thumb.jpg`, normalized.
    pub fn new(target_dir: &str, identifier: &PostIdentifier, kind: MediaKind) -> Self {
        Self {
            primary: join_path(target_dir, &format!("{}_{}.{}", kind, identifier, kind.extension())),
            thumbnail: join_path(target_dir, &format!("{}_{}_thumb.jpg", kind, identifier)),
        }
    }
}
