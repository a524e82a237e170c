use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::{
    config::InstagramConfig,
    http::{HttpClient, HttpError},
    platform::PostIdentifier,
};

use super::InstagramError;

/// Source of raw shortcode query responses. Keeps the undocumented endpoint
/// swappable so decoding can run against frozen payloads.
#[async_trait]
pub trait InstagramBackend: Send + Sync {
    /// Returns the full JSON response body of the shortcode media query.
    async fn fetch_shortcode_media(&self, shortcode: &PostIdentifier) -> Result<Value, InstagramError>;
}

/// The public web GraphQL endpoint, queried by document id.
pub struct GraphqlBackend {
    http: Arc<dyn HttpClient>,
    api_endpoint: String,
    doc_id: String,
}

impl GraphqlBackend {
    pub fn new(http: Arc<dyn HttpClient>, api_endpoint: String, doc_id: String) -> Self {
        Self {
            http,
            api_endpoint,
            doc_id,
        }
    }

    pub fn from_config(config: &InstagramConfig, http: Arc<dyn HttpClient>) -> Self {
        Self::new(http, config.api_endpoint.clone(), config.doc_id.clone())
    }

    fn form(&self, shortcode: &PostIdentifier) -> Vec<(&'static str, String)> {
        let variables = serde_json::json!({
            "shortcode": shortcode.as_str(),
            "fetch_tagged_user_count": null,
            "hoisted_comment_id": null,
            "hoisted_reply_id": null,
        });

        vec![("variables", variables.to_string()), ("doc_id", self.doc_id.clone())]
    }
}

#[async_trait]
impl InstagramBackend for GraphqlBackend {
    async fn fetch_shortcode_media(&self, shortcode: &PostIdentifier) -> Result<Value, InstagramError> {
        info!("Querying shortcode media for {} (doc_id {})", shortcode, self.doc_id);

        let response = self.http.post_form(&self.api_endpoint, &self.form(shortcode)).await?;

        if !response.is_success() {
            return Err(HttpError::Status {
                url: self.api_endpoint.clone(),
                status: response.status,
            }
            .into());
        }

        serde_json::from_slice(&response.body).map_err(|e| InstagramError::malformed("failed to parse response", e))
    }
}
