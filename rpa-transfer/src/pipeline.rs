//! Streaming file-transfer pipeline.
//!
//! Upload, download, and export are all byte-stream copies between a local
//! file and a [`RemoteStore`], driven through an explicit per-transfer state
//! machine: `Idle -> Sniffing (upload only, when no type is declared) ->
//! Streaming -> Completed | Failed`. Terminal states are final; the pipeline
//! never retries on its own.

use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tracing::{debug, info, warn};

use crate::error::{Result, TransferError};
use crate::remote::{CreateRequest, RemoteLocator, RemoteStore};
use crate::sniff::sniff;
use rpa_traits::fs::{ByteSink, FileSystemAccess};
use rpa_traits::http::ByteStream;

/// Copy buffer size for stream piping.
const PIPE_BUF: usize = 8 * 1024;

/// Lifecycle of a single transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferState {
    Idle,
    Sniffing,
    Streaming,
    Completed,
    Failed,
}

/// Tracks and logs state transitions for one transfer operation.
struct StateTrace {
    op: &'static str,
    state: TransferState,
}

impl StateTrace {
    fn new(op: &'static str) -> Self {
        Self {
            op,
            state: TransferState::Idle,
        }
    }

    fn advance(&mut self, next: TransferState) {
        debug!(op = self.op, from = ?self.state, to = ?next, "transfer state");
        self.state = next;
    }
}

/// Upload parameters.
///
/// `filename` is resolved against the workspace directory. When `mime_type`
/// is absent the source stream is sniffed; a declared type always wins.
#[derive(Debug, Clone, Default)]
pub struct UploadSpec {
    /// Name of the local file to upload
    pub filename: String,
    /// Remote object name; defaults to `filename`
    pub dest_filename: Option<String>,
    /// Declared content type of the source bytes
    pub mime_type: Option<String>,
    /// Server-side conversion target for the stored object
    pub dest_mime_type: Option<String>,
}

/// Download parameters.
///
/// Exactly one of `file_id` or `url` selects the source. Downloading by
/// `url` requires an explicit `filename`; by `file_id` the remote metadata
/// name is used when none is given.
#[derive(Debug, Clone, Default)]
pub struct DownloadSpec {
    pub file_id: Option<String>,
    pub url: Option<String>,
    pub filename: Option<String>,
}

/// Orchestrates streaming transfers between the workspace and a remote
/// store.
///
/// # Example
///
/// ```ignore
/// use rpa_transfer::{TransferPipeline, UploadSpec};
///
/// let pipeline = TransferPipeline::new(drive.clone(), fs.clone());
/// let id = pipeline
///     .upload(UploadSpec {
///         filename: "report.csv".into(),
///         ..Default::default()
///     })
///     .await?;
/// ```
pub struct TransferPipeline {
    remote: Arc<dyn RemoteStore>,
    fs: Arc<dyn FileSystemAccess>,
}

impl TransferPipeline {
    pub fn new(remote: Arc<dyn RemoteStore>, fs: Arc<dyn FileSystemAccess>) -> Self {
        Self { remote, fs }
    }

    /// Upload a workspace file, sniffing its content type when none is
    /// declared. Resolves with the remote-assigned identifier.
    pub async fn upload(&self, spec: UploadSpec) -> Result<String> {
        let mut trace = StateTrace::new("upload");
        let result = self.upload_inner(&spec, &mut trace).await;
        finish(&mut trace, &result);
        result
    }

    async fn upload_inner(&self, spec: &UploadSpec, trace: &mut StateTrace) -> Result<String> {
        let path = self.fs.workspace_dir().join(&spec.filename);
        debug!(path = %path.display(), "upload");
        let source = self.fs.open_read_stream(&path).await?;

        let (source_mime_type, body) = match &spec.mime_type {
            Some(declared) => (declared.clone(), source),
            None => {
                trace.advance(TransferState::Sniffing);
                let sniffed = sniff(source).await?;
                debug!(mime_type = %sniffed.mime_type, "sniffed content type");
                (sniffed.mime_type, sniffed.stream)
            }
        };

        trace.advance(TransferState::Streaming);
        let request = CreateRequest {
            name: spec
                .dest_filename
                .clone()
                .unwrap_or_else(|| spec.filename.clone()),
            source_mime_type,
            dest_mime_type: spec.dest_mime_type.clone(),
        };
        let id = self.remote.create(request, body).await?;
        info!(id = %id, "upload complete");
        Ok(id)
    }

    /// Download a remote object into the workspace directory.
    ///
    /// Resolves with the local filename only after the sink reports
    /// successful completion; a partial file never yields a success return.
    pub async fn download(&self, spec: DownloadSpec) -> Result<String> {
        let mut trace = StateTrace::new("download");
        let result = self.download_inner(&spec, &mut trace).await;
        finish(&mut trace, &result);
        result
    }

    async fn download_inner(&self, spec: &DownloadSpec, trace: &mut StateTrace) -> Result<String> {
        // Validate before any I/O.
        let locator = match (&spec.file_id, &spec.url) {
            (Some(id), _) => RemoteLocator::FileId(id.clone()),
            (None, Some(url)) => {
                if spec.filename.is_none() {
                    return Err(TransferError::InvalidParameter(
                        "filename is required when downloading by url".to_string(),
                    ));
                }
                RemoteLocator::Url(url.clone())
            }
            (None, None) => {
                return Err(TransferError::InvalidParameter(
                    "either file_id or url is required".to_string(),
                ));
            }
        };
        debug!(locator = ?locator, "download");

        let remote = self.remote.open_download(&locator).await?;
        let filename = spec
            .filename
            .clone()
            .or(remote.name)
            .ok_or_else(|| {
                TransferError::InvalidParameter(
                    "remote metadata reported no name and no filename was given".to_string(),
                )
            })?;

        trace.advance(TransferState::Streaming);
        let path = self.fs.workspace_dir().join(&filename);
        let mut sink = self.fs.open_write_stream(&path).await?;
        let bytes = pipe(remote.stream, &mut sink).await?;
        info!(filename = %filename, bytes, "download complete");
        Ok(filename)
    }

    /// Export a remote document through a server-side format conversion and
    /// save it under `filename` in the workspace directory.
    pub async fn export(
        &self,
        file_id: &str,
        target_mime_type: &str,
        filename: &str,
    ) -> Result<()> {
        let mut trace = StateTrace::new("export");
        let result = self
            .export_inner(file_id, target_mime_type, filename, &mut trace)
            .await;
        finish(&mut trace, &result);
        result
    }

    async fn export_inner(
        &self,
        file_id: &str,
        target_mime_type: &str,
        filename: &str,
        trace: &mut StateTrace,
    ) -> Result<()> {
        debug!(file_id, target_mime_type, filename, "export");
        let stream = self.remote.open_export(file_id, target_mime_type).await?;

        trace.advance(TransferState::Streaming);
        let path = self.fs.workspace_dir().join(filename);
        let mut sink = self.fs.open_write_stream(&path).await?;
        let bytes = pipe(stream, &mut sink).await?;
        info!(filename, bytes, "export complete");
        Ok(())
    }
}

/// Copy `source` into `sink`, classifying failures by side.
///
/// The sink is flushed and shut down before returning, so a success return
/// means the full byte count reached stable storage as far as the sink can
/// guarantee.
async fn pipe(mut source: ByteStream, sink: &mut ByteSink) -> Result<u64> {
    let mut buf = [0u8; PIPE_BUF];
    let mut total = 0u64;

    loop {
        let n = source
            .read(&mut buf)
            .await
            .map_err(TransferError::StreamRead)?;
        if n == 0 {
            break;
        }
        sink.write_all(&buf[..n])
            .await
            .map_err(TransferError::StreamWrite)?;
        total += n as u64;
    }

    sink.flush().await.map_err(TransferError::StreamWrite)?;
    sink.shutdown().await.map_err(TransferError::StreamWrite)?;
    Ok(total)
}

fn finish<T>(trace: &mut StateTrace, result: &Result<T>) {
    match result {
        Ok(_) => trace.advance(TransferState::Completed),
        Err(err) => {
            warn!(op = trace.op, error = %err, "transfer failed");
            trace.advance(TransferState::Failed);
        }
    }
}
