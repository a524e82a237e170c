use serde::Deserialize;
use serde_json::Value;

use crate::platform::{Dimensions, MediaItem, Owner, PostIdentifier, PostMedia};

use super::InstagramError;

// --- XDTShortcodeMedia ---

/// `__typename` of a shortcode media node. The pre-XDT names are still
/// served for some posts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum XDTTypename {
    #[serde(rename = "XDTGraphImage", alias = "GraphImage")]
    Image,
    #[serde(rename = "XDTGraphVideo", alias = "GraphVideo")]
    Video,
    #[serde(rename = "XDTGraphSidecar", alias = "GraphSidecar")]
    Sidecar,
}

/// Post level fields shared by single media and sidecar posts.
#[derive(Debug, Clone, Deserialize)]
pub struct XDTShortcodeMedia {
    #[serde(rename = "__typename", default)]
    pub typename: Option<XDTTypename>,
    pub owner: GraphOwner,
    pub edge_media_preview_like: EdgeCount,
    pub is_ad: bool,
    #[serde(default)]
    pub edge_media_to_caption: Option<EdgeMediaToCaption>,
    #[serde(default)]
    pub edge_sidecar_to_children: Option<EdgeSidecarToChildren>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphOwner {
    pub username: String,
    pub full_name: String,
    pub is_verified: bool,
    pub is_private: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EdgeCount {
    pub count: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EdgeMediaToCaption {
    pub edges: Vec<EdgeMediaToCaptionEdge>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EdgeMediaToCaptionEdge {
    pub node: EdgeMediaToCaptionNode,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EdgeMediaToCaptionNode {
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EdgeSidecarToChildren {
    pub edges: Vec<SidecarEdge>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SidecarEdge {
    pub node: GraphMediaNode,
}

// --- Media nodes ---

#[derive(Debug, Clone, Deserialize)]
struct RawMediaNode {
    #[serde(default)]
    is_video: bool,
    dimensions: GraphDimensions,
    display_url: String,
    #[serde(default)]
    video_url: Option<String>,
    #[serde(default)]
    video_view_count: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct GraphDimensions {
    pub width: u32,
    pub height: u32,
}

/// A single image or video, classified by its `is_video` flag.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawMediaNode")]
pub enum GraphMediaNode {
    Image {
        dimensions: GraphDimensions,
        display_url: String,
    },
    Video {
        dimensions: GraphDimensions,
        display_url: String,
        video_url: String,
        video_view_count: Option<u64>,
    },
}

impl TryFrom<RawMediaNode> for GraphMediaNode {
    type Error = String;

    fn try_from(raw: RawMediaNode) -> Result<Self, Self::Error> {
        if raw.is_video {
            let video_url = raw
                .video_url
                .ok_or_else(|| "video node without video_url".to_string())?;
            Ok(Self::Video {
                dimensions: raw.dimensions,
                display_url: raw.display_url,
                video_url,
                video_view_count: raw.video_view_count,
            })
        } else {
            Ok(Self::Image {
                dimensions: raw.dimensions,
                display_url: raw.display_url,
            })
        }
    }
}

impl From<GraphDimensions> for Dimensions {
    fn from(d: GraphDimensions) -> Self {
        Dimensions {
            width: d.width,
            height: d.height,
        }
    }
}

impl From<GraphMediaNode> for MediaItem {
    fn from(node: GraphMediaNode) -> Self {
        match node {
            GraphMediaNode::Image {
                dimensions,
                display_url,
            } => MediaItem::image(dimensions.into(), display_url),
            GraphMediaNode::Video {
                dimensions,
                display_url,
                video_url,
                video_view_count,
            } => MediaItem::video(dimensions.into(), video_url, display_url, video_view_count),
        }
    }
}

impl From<GraphOwner> for Owner {
    fn from(owner: GraphOwner) -> Self {
        Owner {
            username: owner.username,
            display_name: owner.full_name,
            verified: owner.is_verified,
            private: owner.is_private,
        }
    }
}

// --- Decoding ---

/// Shape of a post once the typename has been looked at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XDTGraphPost {
    Single(GraphMediaNode),
    Sidecar(Vec<GraphMediaNode>),
}

/// Decodes the `xdt_shortcode_media` node into a [`PostMedia`].
pub fn decode_shortcode_media(identifier: PostIdentifier, media: &Value) -> Result<PostMedia, InstagramError> {
    let post = XDTShortcodeMedia::deserialize(media)
        .map_err(|e| InstagramError::malformed("failed to format post info", e))?;

    let content = match (post.typename, post.edge_sidecar_to_children) {
        (Some(XDTTypename::Sidecar), Some(children)) => {
            XDTGraphPost::Sidecar(children.edges.into_iter().map(|edge| edge.node).collect())
        }
        (Some(XDTTypename::Sidecar), None) => {
            return Err(InstagramError::malformed(
                "sidecar without children",
                serde::de::Error::missing_field("edge_sidecar_to_children"),
            ))
        }
        (Some(XDTTypename::Image) | Some(XDTTypename::Video) | None, _) => XDTGraphPost::Single(
            GraphMediaNode::deserialize(media)
                .map_err(|e| InstagramError::malformed("failed to format media details", e))?,
        ),
    };

    let items: Vec<MediaItem> = match content {
        XDTGraphPost::Single(node) => vec![node.into()],
        XDTGraphPost::Sidecar(nodes) => nodes.into_iter().map(MediaItem::from).collect(),
    };

    let caption = post
        .edge_media_to_caption
        .and_then(|caption| caption.edges.into_iter().next())
        .map(|edge| edge.node.text);

    PostMedia::new(
        identifier,
        items,
        post.owner.into(),
        post.edge_media_preview_like.count,
        post.is_ad,
        caption,
    )
    .ok_or_else(|| {
        InstagramError::malformed(
            "post without media",
            serde::de::Error::invalid_length(0, &"at least one media item"),
        )
    })
}
