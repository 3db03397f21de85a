//! Thin JSON request wrappers over a [`Transport`].
//!
//! The gateway adds JSON encoding and decoding and turns responses into
//! results: a 2xx status yields the decoded body, any other status yields
//! `PantryError::Http` carrying the status and, when non-empty, the response
//! text. A request that never got a response surfaces as
//! `PantryError::Network` from the transport. Nothing here retries.

use std::sync::Arc;

use log::warn;
use reqwest::Method;
use serde::{de::DeserializeOwned, Serialize};

use crate::error::{PantryError, Result};

mod http;
mod transport;


pub use http::ReqwestTransport;
pub use transport::{ApiRequest, ApiResponse, Transport};

/// JSON request wrapper shared by the store operations.
#[derive(Clone)]
pub struct ApiGateway {
    transport: Arc<dyn Transport>,
}

impl ApiGateway {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// `GET path`, decoding the JSON response.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.send(ApiRequest::new(Method::GET, path)).await?;
        decode(&response)
    }

    /// `POST path` with a JSON body, decoding the JSON response.
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = ApiRequest::new(Method::POST, path).with_body(serde_json::to_value(body)?);
        let response = self.send(request).await?;
        decode(&response)
    }

    /// `PATCH path` with a JSON body, decoding the JSON response.
    pub async fn patch<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = ApiRequest::new(Method::PATCH, path).with_body(serde_json::to_value(body)?);
        let response = self.send(request).await?;
        decode(&response)
    }

    /// `DELETE path`; any response body is ignored.
    pub async fn delete(&self, path: &str) -> Result<()> {
        self.send(ApiRequest::new(Method::DELETE, path)).await?;
        Ok(())
    }

    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let method = request.method.clone();
        let path = request.path.clone();
        let response = self.transport.send(request).await?;
        if response.is_success() {
            return Ok(response);
        }

        warn!("{method} {path} failed with status {}", response.status);
        let error = PantryError::http(response.status);
        Err(if response.body.trim().is_empty() {
            error.without_body()
        } else {
            error.with_body(response.body)
        })
    }
}

fn decode<T: DeserializeOwned>(response: &ApiResponse) -> Result<T> {
    Ok(serde_json::from_str(&response.body)?)
}
