use crate::{error::ErrorKind, http::HttpError};

#[derive(Debug, thiserror::Error)]
pub enum InstagramError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    #[error("Only posts/reels supported, check if your link is valid: {0}")]
    UnsupportedPost(String),
    #[error("Malformed response: {context}: {source}")]
    MalformedResponse {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("Network error: {0}")]
    Network(#[from] HttpError),
}

impl InstagramError {
    pub fn malformed(context: &'static str, source: serde_json::Error) -> Self {
        Self::MalformedResponse { context, source }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidUrl(_) => ErrorKind::InvalidUrl,
            Self::UnsupportedPost(_) => ErrorKind::UnsupportedPost,
            Self::MalformedResponse { .. } => ErrorKind::MalformedResponse,
            Self::Network(_) => ErrorKind::Network,
        }
    }
}
