use crate::error::ErrorKind;

use super::instagram::InstagramError;

#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("Unsupported platform: {0}")]
    UnsupportedPlatform(String),
    #[error("Instagram error: {0}")]
    Instagram(#[from] InstagramError),
}

impl PlatformError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnsupportedPlatform(_) => ErrorKind::UnsupportedPlatform,
            Self::Instagram(e) => e.kind(),
        }
    }
}
