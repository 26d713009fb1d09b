//! The wire seam: one request in, one response body out.
use crate::api::error::TransportError;
use crate::config::AppConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::fmt::Display;
use std::time::Duration;
use tracing::trace;

/// Header carrying the host's raw init-data string.
pub const INIT_DATA_HEADER: &str = "telegram-init-data";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
}

impl Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Method::Get => f.write_str("GET"),
            Method::Post => f.write_str("POST"),
        }
    }
}

/// A request relative to the API base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path plus query string, e.g. `/products?categoryId=c1`.
    pub path: String,
    pub body: Option<Value>,
    /// Value for [`INIT_DATA_HEADER`], when a host session exists.
    pub init_data: Option<String>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            body: None,
            init_data: None,
        }
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            body: Some(body),
            init_data: None,
        }
    }

    pub fn with_init_data(mut self, init_data: Option<String>) -> Self {
        self.init_data = init_data;
        self
    }

    /// Path without its query string.
    pub fn route(&self) -> &str {
        self.path.split('?').next().unwrap_or(&self.path)
    }
}

/// Sends a request and returns the raw body of a 2xx response.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<String, TransportError>;
}

/// [`Transport`] over HTTPS with `reqwest`.
pub struct HttpTransport {
    http: Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(config: &AppConfig) -> Result<Self, TransportError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()
            .map_err(|e| TransportError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<String, TransportError> {
        let url = format!("{}{}", self.base_url, request.path);
        trace!(method = %request.method, %url, "HTTP request");

        let mut builder = match request.method {
            Method::Get => self.http.get(&url),
            Method::Post => self.http.post(&url),
        }
        .header("Accept", "application/json");
        if let Some(init_data) = &request.init_data {
            builder = builder.header(INIT_DATA_HEADER, init_data);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_strips_query() {
        let request = ApiRequest::get("/products/search?query=cake");
        assert_eq!(request.route(), "/products/search");
        assert_eq!(ApiRequest::get("/categories").route(), "/categories");
    }

    #[test]
    fn test_http_transport_builds_from_config() {
        let config = AppConfig::new().with_api_base_url("http://localhost:3000/api/");
        let transport = HttpTransport::new(&config).unwrap();
        assert_eq!(transport.base_url, "http://localhost:3000/api");
    }
}
