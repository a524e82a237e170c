use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub enum Platform {
    Instagram,
}

impl Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Instagram => write!(f, "Instagram"),
        }
    }
}

/// Short token naming a post on its platform, e.g. the `C3xYz` in
/// `instagram.com/reel/C3xYz/`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PostIdentifier(String);

impl PostIdentifier {
    /// Returns `None` for tokens that are empty or not URL safe.
    pub fn new(token: &str) -> Option<Self> {
        let is_url_safe = token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '~'));

        if token.is_empty() || !is_url_safe {
            return None;
        }
        Some(Self(token.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for PostIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Image => "jpg",
            Self::Video => "mp4",
        }
    }
}

impl Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub username: String,
    pub display_name: String,
    pub verified: bool,
    pub private: bool,
}

/// One slide of a post. `thumbnail_url` and `view_count` only ever appear on
/// videos; build items through [`MediaItem::image`] and [`MediaItem::video`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaItem {
    pub kind: MediaKind,
    pub dimensions: Dimensions,
    pub source_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_count: Option<u64>,
}

impl MediaItem {
    pub fn image(dimensions: Dimensions, source_url: String) -> Self {
        Self {
            kind: MediaKind::Image,
            dimensions,
            source_url,
            thumbnail_url: None,
            view_count: None,
        }
    }

    pub fn video(dimensions: Dimensions, source_url: String, thumbnail_url: String, view_count: Option<u64>) -> Self {
        Self {
            kind: MediaKind::Video,
            dimensions,
            source_url,
            thumbnail_url: Some(thumbnail_url),
            view_count,
        }
    }
}

/// Normalized result of resolving a post. Always holds at least one item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPostMedia")]
pub struct PostMedia {
    pub identifier: PostIdentifier,
    items: Vec<MediaItem>,
    pub owner: Owner,
    pub like_count: u64,
    pub is_advertisement: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

#[derive(Deserialize)]
struct RawPostMedia {
    identifier: PostIdentifier,
    items: Vec<MediaItem>,
    owner: Owner,
    like_count: u64,
    is_advertisement: bool,
    #[serde(default)]
    caption: Option<String>,
}

impl TryFrom<RawPostMedia> for PostMedia {
    type Error = String;

    fn try_from(raw: RawPostMedia) -> Result<Self, Self::Error> {
        PostMedia::new(
            raw.identifier,
            raw.items,
            raw.owner,
            raw.like_count,
            raw.is_advertisement,
            raw.caption,
        )
        .ok_or_else(|| "post without media items".to_string())
    }
}

impl PostMedia {
    /// Returns `None` when `items` is empty.
    pub fn new(
        identifier: PostIdentifier,
        items: Vec<MediaItem>,
        owner: Owner,
        like_count: u64,
        is_advertisement: bool,
        caption: Option<String>,
    ) -> Option<Self> {
        if items.is_empty() {
            return None;
        }
        Some(Self {
            identifier,
            items,
            owner,
            like_count,
            is_advertisement,
            caption,
        })
    }

    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    pub fn primary(&self) -> &MediaItem {
        &self.items[0]
    }

    pub fn is_carousel(&self) -> bool {
        self.items.len() > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owner() -> Owner {
        Owner {
            username: "someone".into(),
            display_name: "Some One".into(),
            verified: false,
            private: false,
        }
    }

    #[test]
    fn test_post_identifier_rejects_unsafe_tokens() {
        assert!(PostIdentifier::new("C3xYz_-9").is_some());
        assert!(PostIdentifier::new("").is_none());
        assert!(PostIdentifier::new("abc?x=1").is_none());
        assert!(PostIdentifier::new("a b").is_none());
    }

    #[test]
    fn test_post_media_requires_items() {
        let identifier = PostIdentifier::new("abc").unwrap();
        assert!(PostMedia::new(identifier.clone(), vec![], owner(), 0, false, None).is_none());

        let item = MediaItem::image(Dimensions { width: 1, height: 1 }, "https://cdn/x.jpg".into());
        let media = PostMedia::new(identifier, vec![item.clone()], owner(), 3, false, None).unwrap();
        assert_eq!(media.primary(), &item);
        assert!(!media.is_carousel());
    }

    #[test]
    fn test_deserialize_rejects_empty_items() {
        let item = MediaItem::image(Dimensions { width: 1, height: 1 }, "https://cdn/x.jpg".into());
        let media = PostMedia::new(PostIdentifier::new("abc").unwrap(), vec![item], owner(), 3, false, None).unwrap();

        let mut json = serde_json::to_value(&media).unwrap();
        assert_eq!(serde_json::from_value::<PostMedia>(json.clone()).unwrap(), media);

        json["items"] = serde_json::json!([]);
        let err = serde_json::from_value::<PostMedia>(json).unwrap_err();
        assert!(err.to_string().contains("post without media items"));
    }

    #[test]
    fn test_media_kind_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&MediaKind::Video).unwrap(), "\"video\"");
        assert_eq!(MediaKind::Image.extension(), "jpg");
        assert_eq!(MediaKind::Video.extension(), "mp4");
    }
}
