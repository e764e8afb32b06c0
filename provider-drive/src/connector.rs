//! Google Drive API connector
//!
//! Implements the transfer pipeline's `RemoteStore` seam for Google Drive
//! API v3, plus the listing/metadata/delete operations automation scripts
//! use directly.

use async_trait::async_trait;
use std::io::Cursor;
use std::sync::Arc;
use tokio::io::AsyncReadExt;
use tracing::{debug, info, instrument};

use rpa_traits::credentials::CredentialProvider;
use rpa_traits::http::{ByteStream, HttpClient, HttpMethod, HttpRequest, HttpResponse};
use rpa_transfer::remote::{CreateRequest, RemoteDownload, RemoteLocator, RemoteStore};
use rpa_transfer::TransferError;

use crate::error::{DriveError, Result};
use crate::types::{CreatedFile, DriveFile, FilesListResponse};

/// Google Drive API base URL
const DRIVE_API_BASE: &str = "https://www.googleapis.com/drive/v3";

/// Google Drive upload endpoint base URL
const DRIVE_UPLOAD_BASE: &str = "https://www.googleapis.com/upload/drive/v3";

/// Fields to request for file resources
const FILE_FIELDS: &str = "id,name,mimeType,size,parents,trashed";

/// Boundary for multipart upload bodies
const MULTIPART_BOUNDARY: &str = "rpa_toolkit_upload";

/// Reason string Drive reports when an export exceeds its size limit
const EXPORT_LIMIT_REASON: &str = "exportSizeLimitExceeded";

/// Largest error body worth draining for a message
const MAX_ERROR_BODY: usize = 16 * 1024;

/// Parameters for [`DriveConnector::list_files`].
#[derive(Debug, Clone)]
pub struct ListFilesParams {
    /// Parent folder IDs to search under; empty lists everywhere
    pub parents: Vec<String>,
    /// Whether to include trashed files
    pub includes_trash: bool,
    /// Comma-separated sort keys, e.g. "folder,modifiedTime desc,name"
    pub order_by: Option<String>,
    /// Results per page, 1..=1000
    pub page_size: u32,
}

impl Default for ListFilesParams {
    fn default() -> Self {
        Self {
            parents: Vec::new(),
            includes_trash: false,
            order_by: None,
            page_size: 100,
        }
    }
}

/// Google Drive API connector
///
/// One instance per authorized account, typically bound into the resource
/// registry. Streaming transfers flow through the `RemoteStore` impl; the
/// remaining methods are direct API operations.
///
/// # Example
///
/// ```ignore
/// use provider_drive::DriveConnector;
///
/// let drive = DriveConnector::new(http_client, credentials)
///     .with_parents(vec!["folder-id".to_string()]);
/// let files = drive.list_files(Default::default()).await?;
/// ```
pub struct DriveConnector {
    http_client: Arc<dyn HttpClient>,
    credentials: Arc<dyn CredentialProvider>,
    /// Default parent folders for created objects
    parents: Vec<String>,
}

impl DriveConnector {
    pub fn new(http_client: Arc<dyn HttpClient>, credentials: Arc<dyn CredentialProvider>) -> Self {
        Self {
            http_client,
            credentials,
            parents: Vec::new(),
        }
    }

    /// Set the parent folders newly created objects are placed under.
    pub fn with_parents(mut self, parents: Vec<String>) -> Self {
        self.parents = parents;
        self
    }

    async fn bearer(&self) -> Result<String> {
        Ok(self.credentials.access_token().await?)
    }

    /// Execute a request and reject non-2xx statuses.
    async fn execute_checked(&self, request: HttpRequest) -> Result<HttpResponse> {
        let response = self.http_client.execute(request).await?;
        if !response.is_success() {
            return Err(DriveError::Api {
                status: response.status,
                message: String::from_utf8_lossy(&response.body).to_string(),
            });
        }
        Ok(response)
    }

    /// List files, excluding trash unless asked otherwise.
    #[instrument(skip(self))]
    pub async fn list_files(&self, params: ListFilesParams) -> Result<Vec<DriveFile>> {
        let order_by = params.order_by.unwrap_or_default();
        if !order_by
            .chars()
            .all(|c| c.is_ascii_alphabetic() || c == ',' || c == ' ')
        {
            return Err(DriveError::InvalidParameter(format!(
                "Invalid orderBy parameter: {}",
                order_by
            )));
        }

        // https://developers.google.com/drive/api/v3/search-files
        let mut queries = Vec::new();
        if !params.parents.is_empty() {
            let clauses: Vec<String> = params
                .parents
                .iter()
                .map(|parent| format!("\"{}\" in parents", parent))
                .collect();
            queries.push(format!("({})", clauses.join(" or ")));
        }
        if !params.includes_trash {
            queries.push("(trashed = false)".to_string());
        }

        let mut url = format!(
            "{}/files?q={}&pageSize={}&fields=nextPageToken,files({})",
            DRIVE_API_BASE,
            urlencoding::encode(&queries.join(" and ")),
            params.page_size,
            FILE_FIELDS
        );
        if !order_by.is_empty() {
            url.push_str(&format!("&orderBy={}", urlencoding::encode(&order_by)));
        }

        let request = HttpRequest::new(HttpMethod::Get, url).bearer_token(self.bearer().await?);
        let response = self.execute_checked(request).await?;

        let list: FilesListResponse = serde_json::from_slice(&response.body)
            .map_err(|e| DriveError::Parse(format!("Failed to parse files list: {}", e)))?;

        info!(count = list.files.len(), "Listed files from Google Drive");
        Ok(list.files)
    }

    /// Fetch metadata for a single file.
    #[instrument(skip(self), fields(file_id = %file_id))]
    pub async fn get_metadata(&self, file_id: &str) -> Result<DriveFile> {
        let url = format!("{}/files/{}?fields={}", DRIVE_API_BASE, file_id, FILE_FIELDS);
        let request = HttpRequest::new(HttpMethod::Get, url).bearer_token(self.bearer().await?);

        let response = self.http_client.execute(request).await?;
        if response.status == 404 {
            return Err(DriveError::FileNotFound {
                file_id: file_id.to_string(),
            });
        }
        if !response.is_success() {
            return Err(DriveError::Api {
                status: response.status,
                message: String::from_utf8_lossy(&response.body).to_string(),
            });
        }

        serde_json::from_slice(&response.body)
            .map_err(|e| DriveError::Parse(format!("Failed to parse file metadata: {}", e)))
    }

    /// Delete a file.
    #[instrument(skip(self), fields(file_id = %file_id))]
    pub async fn delete(&self, file_id: &str) -> Result<()> {
        let url = format!("{}/files/{}", DRIVE_API_BASE, file_id);
        let request = HttpRequest::new(HttpMethod::Delete, url).bearer_token(self.bearer().await?);
        self.execute_checked(request).await?;
        info!("Deleted file from Google Drive");
        Ok(())
    }

    /// Serialize create metadata for the multipart preamble.
    fn create_metadata(&self, request: &CreateRequest) -> String {
        let mut metadata = serde_json::Map::new();
        metadata.insert("name".to_string(), serde_json::json!(request.name));
        if let Some(mime) = &request.dest_mime_type {
            metadata.insert("mimeType".to_string(), serde_json::json!(mime));
        }
        if !self.parents.is_empty() {
            metadata.insert("parents".to_string(), serde_json::json!(self.parents));
        }
        serde_json::Value::Object(metadata).to_string()
    }

    /// Drain a failed response stream into an API error.
    async fn drain_stream_error(status: u16, mut stream: ByteStream) -> DriveError {
        let mut body = vec![0u8; MAX_ERROR_BODY];
        let mut filled = 0usize;
        while filled < MAX_ERROR_BODY {
            match stream.read(&mut body[filled..]).await {
                Ok(0) | Err(_) => break,
                Ok(n) => filled += n,
            }
        }
        body.truncate(filled);
        let message = String::from_utf8_lossy(&body).to_string();

        if status == 403 && message.contains(EXPORT_LIMIT_REASON) {
            DriveError::ExportSizeLimit(message)
        } else {
            DriveError::Api { status, message }
        }
    }
}

#[async_trait]
impl RemoteStore for DriveConnector {
    async fn create(
        &self,
        request: CreateRequest,
        body: ByteStream,
    ) -> std::result::Result<String, TransferError> {
        debug!(name = %request.name, mime = %request.source_mime_type, "Drive create");

        let metadata = self.create_metadata(&request);
        let head = format!(
            "--{boundary}\r\nContent-Type: application/json; charset=UTF-8\r\n\r\n\
             {metadata}\r\n--{boundary}\r\nContent-Type: {mime}\r\n\r\n",
            boundary = MULTIPART_BOUNDARY,
            metadata = metadata,
            mime = request.source_mime_type,
        );
        let tail = format!("\r\n--{}--\r\n", MULTIPART_BOUNDARY);

        let multipart: ByteStream = Box::new(
            Cursor::new(head.into_bytes())
                .chain(body)
                .chain(Cursor::new(tail.into_bytes())),
        );

        let url = format!(
            "{}/files?uploadType=multipart&supportsAllDrives=true&fields=id",
            DRIVE_UPLOAD_BASE
        );
        let http_request = HttpRequest::new(HttpMethod::Post, url)
            .bearer_token(self.bearer().await?)
            .header(
                "Content-Type",
                format!("multipart/related; boundary={}", MULTIPART_BOUNDARY),
            );

        let response = self.http_client.send_stream(http_request, multipart).await?;
        if !response.is_success() {
            return Err(TransferError::Api {
                status: response.status,
                message: String::from_utf8_lossy(&response.body).to_string(),
            });
        }

        let created: CreatedFile = serde_json::from_slice(&response.body)
            .map_err(|e| DriveError::Parse(format!("Failed to parse create response: {}", e)))?;
        info!(id = %created.id, "Created file on Google Drive");
        Ok(created.id)
    }

    async fn open_download(
        &self,
        locator: &RemoteLocator,
    ) -> std::result::Result<RemoteDownload, TransferError> {
        let (name, url) = match locator {
            RemoteLocator::FileId(file_id) => {
                let meta = self.get_metadata(file_id).await?;
                let url = format!("{}/files/{}?alt=media", DRIVE_API_BASE, file_id);
                (Some(meta.name), url)
            }
            RemoteLocator::Url(url) => {
                let separator = if url.contains('?') { '&' } else { '?' };
                (None, format!("{}{}alt=media", url, separator))
            }
        };
        debug!(url = %url, "Drive download");

        let request = HttpRequest::new(HttpMethod::Get, url).bearer_token(self.bearer().await?);
        let response = self.http_client.open_stream(request).await?;
        if !response.is_success() {
            return Err(Self::drain_stream_error(response.status, response.stream)
                .await
                .into());
        }

        Ok(RemoteDownload {
            name,
            stream: response.stream,
        })
    }

    async fn open_export(
        &self,
        file_id: &str,
        target_mime_type: &str,
    ) -> std::result::Result<ByteStream, TransferError> {
        let url = format!(
            "{}/files/{}/export?mimeType={}",
            DRIVE_API_BASE,
            file_id,
            urlencoding::encode(target_mime_type)
        );
        debug!(url = %url, "Drive export");

        let request = HttpRequest::new(HttpMethod::Get, url).bearer_token(self.bearer().await?);
        let response = self.http_client.open_stream(request).await?;
        if !response.is_success() {
            return Err(Self::drain_stream_error(response.status, response.stream)
                .await
                .into());
        }

        Ok(response.stream)
    }
}
