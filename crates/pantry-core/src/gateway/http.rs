//! Transport backed by `reqwest`.

use async_trait::async_trait;
use log::debug;
use reqwest::Url;

use super::transport::{ApiRequest, ApiResponse, Transport};
use crate::error::{ConfigResultExt, PantryError, Result};

/// HTTP transport joining request paths onto a base URL.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    base_url: String,
}

impl ReqwestTransport {
    /// Create a transport for `base_url`.
    ///
    /// # Errors
    ///
    /// Returns `PantryError::Configuration` if the URL does not parse, is not
    /// http(s), or the HTTP client cannot be constructed.
    pub fn new(base_url: &str) -> Result<Self> {
        let parsed = Url::parse(base_url).config_context("Invalid API base URL")?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(PantryError::Configuration {
                message: format!("API base URL must use http or https, got '{base_url}'"),
            });
        }

        let client = reqwest::Client::builder()
            .build()
            .config_context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let url = self.url_for(&request.path);
        let network = |e: reqwest::Error| PantryError::Network {
            url: url.clone(),
            reason: e.to_string(),
        };

        let mut builder = self.client.request(request.method.clone(), &url);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(network)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(network)?;
        debug!("{} {} -> {}", request.method, url, status);

        Ok(ApiResponse { status, body })
    }
}
