use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{downloader::FetchedPost, platform::MediaKind};

/// Info name of the fenced block holding a cache entry.
pub const BLOCK_LANGUAGE: &str = "reel";

static KEY_VALUE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\w+): (.+)").expect("Failed to create key value regex"));

/// What a note remembers about a cached post, stored as six lines:
///
/// ```text
/// https://www.instagram.com/reel/C3xYz/
/// Video: attachments/video_C3xYz.mp4
/// Thumbnail: attachments/video_C3xYz_thumb.jpg
/// Author: Some One
/// AuthorUrl: https://instagram.com/someone
/// Caption: first line\nsecond line
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub url: String,
    pub video: String,
    pub thumbnail: String,
    pub author: String,
    pub author_url: String,
    /// Unescaped; real newlines.
    pub caption: String,
}

impl CacheEntry {
    /// Parses a stored block. Anything that is not exactly six filled-in
    /// lines is treated as "nothing cached".
    pub fn parse(source: &str) -> Option<Self> {
        let lines: Vec<&str> = source.trim().lines().collect();
        if lines.len() != 6 {
            return None;
        }

        let url = lines[0].trim().to_string();
        let mut video = None;
        let mut thumbnail = None;
        let mut author = None;
        let mut author_url = None;
        let mut caption = None;

        for line in &lines[1..] {
            let captures = KEY_VALUE_REGEX.captures(line)?;
            let value = captures[2].trim_end().to_string();
            match &captures[1] {
                "Video" => video = Some(value),
                "Thumbnail" => thumbnail = Some(value),
                "Author" => author = Some(value),
                "AuthorUrl" => author_url = Some(value),
                "Caption" => caption = Some(value),
                other => debug!("Ignoring unknown key {} in cache entry", other),
            }
        }

        let entry = Self {
            url,
            video: video?,
            thumbnail: thumbnail?,
            author: author?,
            author_url: author_url?,
            caption: unescape_caption(&caption?),
        };

        let filled = [
            &entry.url,
            &entry.video,
            &entry.thumbnail,
            &entry.author,
            &entry.author_url,
            &entry.caption,
        ]
        .iter()
        .all(|value| !value.trim().is_empty());

        filled.then_some(entry)
    }

    pub fn from_fetched(url: &str, post: &FetchedPost) -> Self {
        let primary = post.media_items.first();

        let thumbnail = post
            .thumbnail_path
            .clone()
            .or_else(|| (post.primary_kind == MediaKind::Image).then(|| post.primary_path.clone()))
            .or_else(|| primary.and_then(|item| item.thumbnail_url.clone()))
            .or_else(|| primary.map(|item| item.source_url.clone()))
            .unwrap_or_default();

        let author = if post.owner.display_name.trim().is_empty() {
            "Unknown".to_string()
        } else {
            post.owner.display_name.clone()
        };

        Self {
            url: url.to_string(),
            video: post.primary_path.clone(),
            thumbnail,
            author,
            author_url: format!("https://instagram.com/{}", post.owner.username),
            caption: post.caption.as_deref().map(unescape_caption).unwrap_or_default(),
        }
    }

    pub fn to_block(&self) -> String {
        format!(
            "{}\nVideo: {}\nThumbnail: {}\nAuthor: {}\nAuthorUrl: {}\nCaption: {}",
            self.url,
            self.video,
            self.thumbnail,
            self.author,
            self.author_url,
            escape_caption(&self.caption)
        )
    }

    pub fn to_fenced(&self) -> String {
        format!("```{}\n{}\n```", BLOCK_LANGUAGE, self.to_block())
    }
}

/// Newlines become the two characters `\n` so a caption fits on one line.
pub fn escape_caption(caption: &str) -> String {
    caption.replace("\r\n", "\n").replace('\n', "\\n")
}

pub fn unescape_caption(caption: &str) -> String {
    caption.replace("\\n", "\n")
}

/// Vault paths are local, anything with an http(s) scheme is remote.
pub fn is_local_path(path: &str) -> bool {
    !(path.starts_with("http://") || path.starts_with("https://"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{Dimensions, MediaItem, Owner, PostIdentifier};

    const BLOCK: &str = "https://www.instagram.com/reel/C3xYz/
Video: attachments/video_C3xYz.mp4
Thumbnail: attachments/video_C3xYz_thumb.jpg
Author: Some One
AuthorUrl: https://instagram.com/someone
Caption: first line\\nsecond line";

    fn fetched(kind: MediaKind, thumbnail_path: Option<&str>, display_name: &str) -> FetchedPost {
        let dimensions = Dimensions { width: 1, height: 1 };
        let item = match kind {
            MediaKind::Video => MediaItem::video(
                dimensions,
                "https://cdn/clip.mp4".into(),
                "https://cdn/poster.jpg".into(),
                None,
            ),
            MediaKind::Image => MediaItem::image(dimensions, "https://cdn/photo.jpg".into()),
        };
        FetchedPost {
            url: "https://www.instagram.com/reel/C3xYz/".into(),
            identifier: PostIdentifier::new("C3xYz").unwrap(),
            primary_kind: kind,
            primary_path: format!("attachments/{}_C3xYz.{}", kind, kind.extension()),
            thumbnail_path: thumbnail_path.map(String::from),
            owner: Owner {
                username: "someone".into(),
                display_name: display_name.into(),
                verified: false,
                private: false,
            },
            caption: Some("first line\nsecond line".into()),
            media_items: vec![item],
        }
    }

    #[test]
    fn test_parse_valid_block() {
        let entry = CacheEntry::parse(BLOCK).unwrap();

        assert_eq!(entry.url, "https://www.instagram.com/reel/C3xYz/");
        assert_eq!(entry.video, "attachments/video_C3xYz.mp4");
        assert_eq!(entry.thumbnail, "attachments/video_C3xYz_thumb.jpg");
        assert_eq!(entry.author, "Some One");
        assert_eq!(entry.author_url, "https://instagram.com/someone");
        assert_eq!(entry.caption, "first line\nsecond line");
    }

    #[test]
    fn test_parse_tolerates_surrounding_whitespace() {
        let source = format!("\n  {}\n\n", BLOCK);
        assert!(CacheEntry::parse(&source).is_some());
        assert!(CacheEntry::parse(&BLOCK.replace('\n', "\r\n")).is_some());
    }

    #[test]
    fn test_parse_rejects_wrong_line_count() {
        let five = BLOCK.lines().take(5).collect::<Vec<_>>().join("\n");
        assert!(CacheEntry::parse(&five).is_none());
        assert!(CacheEntry::parse(&format!("{}\nExtra: line", BLOCK)).is_none());
        assert!(CacheEntry::parse("https://www.instagram.com/reel/C3xYz/").is_none());
        assert!(CacheEntry::parse("").is_none());
    }

    #[test]
    fn test_parse_rejects_lines_without_key_value() {
        let broken = BLOCK.replace("Author: Some One", "Author Some One");
        assert!(CacheEntry::parse(&broken).is_none());
    }

    #[test]
    fn test_parse_rejects_empty_values() {
        let empty_caption = BLOCK.replace("Caption: first line\\nsecond line", "Caption: ");
        assert!(CacheEntry::parse(&empty_caption).is_none());

        let missing_key = BLOCK.replace("AuthorUrl:", "Profile:");
        assert!(CacheEntry::parse(&missing_key).is_none());
    }

    #[test]
    fn test_caption_newline_round_trip() {
        let entry = CacheEntry::parse(BLOCK).unwrap();
        assert_eq!(entry.to_block(), BLOCK);
        assert_eq!(CacheEntry::parse(&entry.to_block()).unwrap(), entry);

        assert_eq!(escape_caption("a\r\nb\nc"), "a\\nb\\nc");
        assert_eq!(unescape_caption("a\\nb"), "a\nb");
    }

    #[test]
    fn test_to_fenced() {
        let fenced = CacheEntry::parse(BLOCK).unwrap().to_fenced();
        assert!(fenced.starts_with("```reel\nhttps://www.instagram.com/reel/C3xYz/\n"));
        assert!(fenced.ends_with("\n```"));
        assert_eq!(fenced.lines().count(), 8);
    }

    #[test]
    fn test_is_local_path() {
        assert!(is_local_path("attachments/video_abc.mp4"));
        assert!(!is_local_path("https://cdn/clip.mp4"));
        assert!(!is_local_path("http://cdn/clip.mp4"));
    }

    #[test]
    fn test_from_fetched_video() {
        let post = fetched(MediaKind::Video, Some("attachments/video_C3xYz_thumb.jpg"), "Some One");
        let entry = CacheEntry::from_fetched(&post.url, &post);

        assert_eq!(entry.video, "attachments/video_C3xYz.mp4");
        assert_eq!(entry.thumbnail, "attachments/video_C3xYz_thumb.jpg");
        assert_eq!(entry.author, "Some One");
        assert_eq!(entry.author_url, "https://instagram.com/someone");
        assert_eq!(entry.caption, "first line\nsecond line");
    }

    #[test]
    fn test_from_fetched_thumbnail_fallbacks() {
        let video = fetched(MediaKind::Video, None, "Some One");
        assert_eq!(CacheEntry::from_fetched(&video.url, &video).thumbnail, "https://cdn/poster.jpg");

        let image = fetched(MediaKind::Image, None, "Some One");
        assert_eq!(
            CacheEntry::from_fetched(&image.url, &image).thumbnail,
            "attachments/image_C3xYz.jpg"
        );
    }

    #[test]
    fn test_from_fetched_unescapes_caption() {
        let mut post = fetched(MediaKind::Video, Some("attachments/video_C3xYz_thumb.jpg"), "Some One");
        post.caption = Some("line one\\nline two".into());

        let fresh = CacheEntry::from_fetched(&post.url, &post);
        assert_eq!(fresh.caption, "line one\nline two");
        assert_eq!(CacheEntry::parse(&fresh.to_block()).unwrap(), fresh);
    }

    #[test]
    fn test_from_fetched_unknown_author() {
        let post = fetched(MediaKind::Video, None, "");
        assert_eq!(CacheEntry::from_fetched(&post.url, &post).author, "Unknown");
    }
}
