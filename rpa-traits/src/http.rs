//! HTTP Client Abstraction
//!
//! Provides async HTTP operations with bearer authorization and streaming
//! request/response bodies.

use async_trait::async_trait;
use bytes::Bytes;
use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;
use std::time::Duration;

use crate::error::{CapabilityError, Result};

/// A streaming body: an ordered, finite sequence of bytes delivered
/// incrementally. End of stream is a zero-length read, errors surface as
/// `io::Error` from the reader.
pub type ByteStream = Box<dyn tokio::io::AsyncRead + Send + Unpin>;

/// HTTP method types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
}

/// HTTP request builder
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: HashMap<String, String>,
    pub body: Option<Bytes>,
    pub timeout: Option<Duration>,
}

impl HttpRequest {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HashMap::new(),
            body: None,
            timeout: None,
        }
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    pub fn bearer_token(self, token: impl Into<String>) -> Self {
        self.header("Authorization", format!("Bearer {}", token.into()))
    }

    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self> {
        let json = serde_json::to_vec(body).map_err(|e| {
            CapabilityError::OperationFailed(format!("JSON serialization failed: {}", e))
        })?;
        self.body = Some(Bytes::from(json));
        self.headers
            .insert("Content-Type".to_string(), "application/json".to_string());
        Ok(self)
    }

    pub fn body(mut self, body: Bytes) -> Self {
        self.body = Some(body);
        self
    }

    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }
}

/// HTTP response
#[derive(Debug)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: Bytes,
}

impl HttpResponse {
    /// Parse response body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(|e| {
            CapabilityError::OperationFailed(format!("JSON deserialization failed: {}", e))
        })
    }

    /// Get response body as UTF-8 string
    pub fn text(&self) -> Result<String> {
        String::from_utf8(self.body.to_vec())
            .map_err(|e| CapabilityError::OperationFailed(format!("Invalid UTF-8: {}", e)))
    }

    /// Check if response status is successful (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Check if response status indicates a client error (4xx)
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status)
    }

    /// Check if response status indicates a server error (5xx)
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status)
    }
}

/// Response whose body is exposed as a stream rather than buffered.
///
/// Non-2xx statuses are returned as values so callers can classify remote
/// failures (the error body, if any, is small and can be drained from the
/// stream).
pub struct HttpStreamResponse {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub stream: ByteStream,
}

impl HttpStreamResponse {
    /// Check if response status is successful (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Async HTTP client trait
///
/// A single `execute` call is one attempt; retry, when wanted, is layered on
/// by the caller so the same policy applies to any operation, not just HTTP.
///
/// # Example
///
/// ```ignore
/// use rpa_traits::http::{HttpClient, HttpRequest, HttpMethod};
///
/// async fn fetch_data(client: &dyn HttpClient) -> Result<String> {
///     let request = HttpRequest::new(HttpMethod::Get, "https://api.example.com/data")
///         .bearer_token("token");
///
///     let response = client.execute(request).await?;
///     response.text()
/// }
/// ```
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Execute an HTTP request, buffering the full response body.
    ///
    /// # Errors
    ///
    /// Returns error if the network connection fails, TLS validation fails,
    /// or the request times out. Non-2xx statuses are returned as responses,
    /// not errors; status interpretation belongs to the caller.
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse>;

    /// Open the response body as a byte stream.
    ///
    /// Headers on the request (including `Authorization`) are applied to the
    /// streaming fetch. Useful for large downloads that should not be
    /// buffered in memory. Transport failures are errors; HTTP-level
    /// failures come back as a stream response carrying the status.
    async fn open_stream(&self, request: HttpRequest) -> Result<HttpStreamResponse>;

    /// Execute an HTTP request whose body is streamed from a reader.
    ///
    /// Used for uploads where the payload is piped from disk rather than
    /// materialized up front.
    async fn send_stream(&self, request: HttpRequest, body: ByteStream) -> Result<HttpResponse>;
}
