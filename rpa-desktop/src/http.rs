//! HTTP Client Implementation using Reqwest

use async_trait::async_trait;
use futures_util::TryStreamExt;
use reqwest::Client;
use rpa_traits::{
    error::{CapabilityError, Result},
    http::{ByteStream, HttpClient, HttpMethod, HttpRequest, HttpResponse, HttpStreamResponse},
};
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

/// Reqwest-based HTTP client implementation
///
/// Provides HTTP operations with:
/// - Connection pooling via reqwest
/// - TLS support by default
/// - Streaming request and response bodies
///
/// One `execute` call is one attempt; recovery is the caller's retry
/// combinator, never this client.
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    /// Create a new HTTP client with default configuration
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(30))
    }

    /// Create a new HTTP client with custom timeout
    pub fn with_timeout(timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .pool_max_idle_per_host(10)
            .user_agent("rpa-toolkit/0.1.0")
            .build()
            .expect("Failed to build HTTP client");

        Self { client }
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Convert capability HttpMethod to reqwest Method
    fn convert_method(method: HttpMethod) -> reqwest::Method {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
            HttpMethod::Head => reqwest::Method::HEAD,
        }
    }

    /// Build a reqwest request from a capability request
    fn build_request(&self, request: HttpRequest) -> reqwest::RequestBuilder {
        let method = Self::convert_method(request.method);
        let mut req = self.client.request(method, &request.url);

        for (key, value) in request.headers {
            req = req.header(key, value);
        }

        if let Some(body) = request.body {
            req = req.body(body);
        }

        if let Some(timeout) = request.timeout {
            req = req.timeout(timeout);
        }

        req
    }

    fn map_send_error(e: reqwest::Error) -> CapabilityError {
        if e.is_timeout() {
            CapabilityError::OperationFailed("Request timed out".to_string())
        } else if e.is_connect() {
            CapabilityError::OperationFailed(format!("Connection failed: {}", e))
        } else {
            CapabilityError::OperationFailed(e.to_string())
        }
    }

    async fn collect_response(response: reqwest::Response) -> Result<HttpResponse> {
        let status = response.status().as_u16();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .filter_map(|(k, v)| v.to_str().ok().map(|s| (k.to_string(), s.to_string())))
            .collect();

        let body = response
            .bytes()
            .await
            .map_err(|e| CapabilityError::OperationFailed(e.to_string()))?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

impl Default for ReqwestHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        debug!(url = %request.url, method = ?request.method, "Executing HTTP request");

        let response = self
            .build_request(request)
            .send()
            .await
            .map_err(Self::map_send_error)?;

        Self::collect_response(response).await
    }

    async fn open_stream(&self, request: HttpRequest) -> Result<HttpStreamResponse> {
        debug!(url = %request.url, "Opening HTTP response stream");

        let response = self
            .build_request(request)
            .send()
            .await
            .map_err(Self::map_send_error)?;

        let status = response.status().as_u16();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .filter_map(|(k, v)| v.to_str().ok().map(|s| (k.to_string(), s.to_string())))
            .collect();

        let stream = response.bytes_stream().map_err(std::io::Error::other);
        let reader: ByteStream = Box::new(tokio_util::io::StreamReader::new(stream));

        Ok(HttpStreamResponse {
            status,
            headers,
            stream: reader,
        })
    }

    async fn send_stream(&self, request: HttpRequest, body: ByteStream) -> Result<HttpResponse> {
        debug!(url = %request.url, method = ?request.method, "Sending streamed HTTP body");

        let stream = tokio_util::io::ReaderStream::new(body);
        let response = self
            .build_request(request)
            .body(reqwest::Body::wrap_stream(stream))
            .send()
            .await
            .map_err(Self::map_send_error)?;

        Self::collect_response(response).await
    }
}
