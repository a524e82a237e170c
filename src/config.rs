use std::{collections::HashMap, path::PathBuf, str::FromStr};

use crate::utils::normalize_path;

pub const DEFAULT_INSTAGRAM_API_ENDPOINT: &str = "https://www.instagram.com/graphql/query";
/// Document id of the shortcode media query. Instagram rotates it, override
/// with `INSTAGRAM_DOC_ID` when resolution starts failing.
pub const DEFAULT_INSTAGRAM_DOC_ID: &str = "8845758582119845";
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing config value: {0}")]
    Missing(String),
    #[error("Invalid value for {key}: {value}")]
    Invalid { key: String, value: String },
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub instagram: InstagramConfig,
    pub http: HttpConfig,
    pub storage: StorageConfig,
}

#[derive(Clone, Debug)]
pub struct InstagramConfig {
    pub api_endpoint: String,
    pub doc_id: String,
}

impl Default for InstagramConfig {
    fn default() -> Self {
        Self {
            api_endpoint: DEFAULT_INSTAGRAM_API_ENDPOINT.to_string(),
            doc_id: DEFAULT_INSTAGRAM_DOC_ID.to_string(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct HttpConfig {
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
    pub proxy: Option<String>,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            connect_timeout_secs: 30,
            proxy: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Where downloaded media lands inside the vault.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VideoLocation {
    DefaultAttachment,
    SpecifiedFolder(String),
}

#[derive(Clone, Debug)]
pub struct StorageConfig {
    pub vault_root: PathBuf,
    pub location: VideoLocation,
    pub attachment_folder: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            vault_root: PathBuf::from("."),
            location: VideoLocation::DefaultAttachment,
            attachment_folder: "attachments".to_string(),
        }
    }
}

impl StorageConfig {
    /// Vault-relative folder the downloader writes into.
    pub fn media_folder(&self) -> String {
        match &self.location {
            VideoLocation::DefaultAttachment => normalize_path(&self.attachment_folder),
            VideoLocation::SpecifiedFolder(folder) => normalize_path(folder),
        }
    }
}

/// Anything that can hand out raw configuration values by key.
pub trait ConfigSource {
    fn get(&self, key: &str) -> Option<String>;
}

/// Reads configuration from the process environment.
pub struct EnvSource;

impl ConfigSource for EnvSource {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok().filter(|v| !v.trim().is_empty())
    }
}

impl ConfigSource for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

fn parse_or<T: FromStr>(source: &impl ConfigSource, key: &str, default: T) -> Result<T, ConfigError> {
    match source.get(key) {
        Some(value) => value.trim().parse::<T>().map_err(|_| ConfigError::Invalid {
            key: key.to_string(),
            value,
        }),
        None => Ok(default),
    }
}

pub fn build_config(source: &impl ConfigSource) -> Result<AppConfig, ConfigError> {
    info!("Building AppConfig...");

    let instagram = InstagramConfig {
        api_endpoint: source
            .get("INSTAGRAM_API_ENDPOINT")
            .unwrap_or_else(|| DEFAULT_INSTAGRAM_API_ENDPOINT.to_string()),
        doc_id: source
            .get("INSTAGRAM_DOC_ID")
            .unwrap_or_else(|| DEFAULT_INSTAGRAM_DOC_ID.to_string()),
    };

    if instagram.doc_id.trim().is_empty() {
        return Err(ConfigError::Missing("INSTAGRAM_DOC_ID".to_string()));
    }

    let http = HttpConfig {
        timeout_secs: parse_or(source, "HTTP_TIMEOUT_SECS", 30)?,
        connect_timeout_secs: parse_or(source, "HTTP_CONNECT_TIMEOUT_SECS", 30)?,
        proxy: source.get("HTTP_PROXY"),
        user_agent: source
            .get("HTTP_USER_AGENT")
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
    };

    let location = match source.get("REELS_LOCATION_MODE").as_deref() {
        None | Some("defaultAttachment") => VideoLocation::DefaultAttachment,
        Some("specifiedFolder") => VideoLocation::SpecifiedFolder(
            source
                .get("REELS_CUSTOM_FOLDER")
                .unwrap_or_else(|| "Files/Reels".to_string()),
        ),
        Some(other) => {
            return Err(ConfigError::Invalid {
                key: "REELS_LOCATION_MODE".to_string(),
                value: other.to_string(),
            })
        }
    };

    let storage = StorageConfig {
        vault_root: source
            .get("REELS_VAULT_ROOT")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(".")),
        location,
        attachment_folder: source
            .get("REELS_ATTACHMENT_FOLDER")
            .unwrap_or_else(|| "attachments".to_string()),
    };

    info!("AppConfig built");

    Ok(AppConfig {
        instagram,
        http,
        storage,
    })
}
