//! Remote collaborator seam for the transfer pipeline.
//!
//! Providers implement [`RemoteStore`] for their service; the pipeline only
//! ever speaks this interface. Request shaping, endpoints, and authorization
//! header propagation are the store's concern.

use async_trait::async_trait;

use crate::error::Result;
use rpa_traits::http::ByteStream;

/// Where a remote object lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteLocator {
    /// Service-assigned object identifier
    FileId(String),
    /// Direct content URL (authorization still required)
    Url(String),
}

/// Parameters for creating a remote object.
#[derive(Debug, Clone)]
pub struct CreateRequest {
    /// Name the object is stored under
    pub name: String,
    /// Content type of the uploaded bytes (declared or sniffed)
    pub source_mime_type: String,
    /// Optional server-side conversion target for the stored object
    pub dest_mime_type: Option<String>,
}

/// A resolved remote read stream plus the remote-side object name, when the
/// locator allows the store to know it.
pub struct RemoteDownload {
    pub name: Option<String>,
    pub stream: ByteStream,
}

/// Remote side of a transfer.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Create a remote object, piping `body` as its content.
    ///
    /// Returns the remote-assigned identifier. On failure no identifier is
    /// returned and at most one partial object exists remotely (its cleanup
    /// is the service's concern).
    async fn create(&self, request: CreateRequest, body: ByteStream) -> Result<String>;

    /// Resolve a readable stream for an existing object.
    async fn open_download(&self, locator: &RemoteLocator) -> Result<RemoteDownload>;

    /// Open a server-side format conversion stream for an object.
    ///
    /// Conversions are size-bounded by the service; exceeding the bound
    /// surfaces as `TransferError::ExportTooLarge`.
    async fn open_export(&self, file_id: &str, target_mime_type: &str) -> Result<ByteStream>;
}
