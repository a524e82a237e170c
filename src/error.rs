use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::{
    config::ConfigError,
    http::HttpError,
    platform::{InstagramError, PlatformError},
    storage::StorageError,
};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Platform error: {0}")]
    Platform(#[from] PlatformError),

    #[error("Network error: {0}")]
    Network(#[from] HttpError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Other(anyhow::Error),
}

impl From<anyhow::Error> for Error {
    fn from(error: anyhow::Error) -> Self {
        Error::Other(error)
    }
}

impl From<InstagramError> for Error {
    fn from(error: InstagramError) -> Self {
        Error::Platform(PlatformError::Instagram(error))
    }
}

/// Coarse classification handed to presenting layers, which pick a fallback
/// (link only, warning) from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    InvalidUrl,
    UnsupportedPost,
    MalformedResponse,
    UnsupportedPlatform,
    Network,
    Storage,
    Config,
    Other,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Platform(e) => e.kind(),
            Error::Network(_) => ErrorKind::Network,
            Error::Storage(_) => ErrorKind::Storage,
            Error::Config(_) => ErrorKind::Config,
            Error::Other(_) => ErrorKind::Other,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_follows_nested_errors() {
        let err: Error = InstagramError::InvalidUrl("https://instagram.com/".into()).into();
        assert_eq!(err.kind(), ErrorKind::InvalidUrl);

        let err: Error = PlatformError::UnsupportedPlatform("https://example.com".into()).into();
        assert_eq!(err.kind(), ErrorKind::UnsupportedPlatform);

        let err: Error = HttpError::Status {
            url: "https://cdn.example/x.mp4".into(),
            status: 404,
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::Network);

        let err: Error = anyhow::anyhow!("boom").into();
        assert_eq!(err.kind(), ErrorKind::Other);
    }

    #[test]
    fn test_network_error_inside_resolver_is_network_kind() {
        let err: Error = InstagramError::Network(HttpError::Status {
            url: "https://www.instagram.com/graphql/query".into(),
            status: 500,
        })
        .into();
        assert_eq!(err.kind(), ErrorKind::Network);
    }
}
