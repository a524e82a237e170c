mod client;

use async_trait::async_trait;
use reqwest::Client;

pub use client::create_instagram_client;

use crate::config::HttpConfig;

#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("failed to get '{url}' ({status})")]
    Status { url: String, status: u16 },
}

/// Status code plus the fully buffered body.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get_bytes(&self, url: &str) -> Result<HttpResponse, HttpError>;
    async fn post_form(&self, url: &str, form: &[(&str, String)]) -> Result<HttpResponse, HttpError>;
}

#[derive(Clone)]
pub struct HttpService {
    client: Client,
}

impl HttpService {
    pub fn new(config: &HttpConfig) -> Result<Self, HttpError> {
        let client = create_instagram_client(config)?;
        Ok(Self { client })
    }

    async fn read(response: reqwest::Response) -> Result<HttpResponse, HttpError> {
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();
        Ok(HttpResponse { status, body })
    }
}

#[async_trait]
impl HttpClient for HttpService {
    async fn get_bytes(&self, url: &str) -> Result<HttpResponse, HttpError> {
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        Self::read(response).await
    }

    async fn post_form(&self, url: &str, form: &[(&str, String)]) -> Result<HttpResponse, HttpError> {
        debug!("POST {}", url);
        let response = self.client.post(url).form(form).send().await?;
        Self::read(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn service() -> HttpService {
        HttpService::new(&HttpConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn test_get_bytes_returns_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/clip.mp4"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0u8, 1, 2, 3]))
            .mount(&server)
            .await;

        let response = service()
            .get_bytes(&format!("{}/clip.mp4", server.uri()))
            .await
            .unwrap();

        assert!(response.is_success());
        assert_eq!(response.body, vec![0u8, 1, 2, 3]);
    }

    #[tokio::test]
    async fn test_get_bytes_keeps_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let response = service()
            .get_bytes(&format!("{}/gone.jpg", server.uri()))
            .await
            .unwrap();

        assert_eq!(response.status, 404);
        assert!(!response.is_success());
    }

    #[tokio::test]
    async fn test_post_form_is_urlencoded() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/graphql/query"))
            .and(header("content-type", "application/x-www-form-urlencoded"))
            .and(body_string_contains("doc_id=42"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{\"ok\":true}"))
            .expect(1)
            .mount(&server)
            .await;

        let response = service()
            .post_form(
                &format!("{}/graphql/query", server.uri()),
                &[("doc_id", "42".to_string())],
            )
            .await
            .unwrap();

        assert_eq!(response.text(), "{\"ok\":true}");
    }

    #[tokio::test]
    async fn test_transport_failure_is_request_error() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };

        let result = service()
            .get_bytes(&format!("http://127.0.0.1:{}/clip.mp4", port))
            .await;
        assert!(matches!(result, Err(HttpError::Request(_))));
    }
}
