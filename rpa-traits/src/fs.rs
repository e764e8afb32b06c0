//! File System Abstraction
//!
//! Workspace-relative file I/O for automation scripts. Downloaded and
//! exported files land in the workspace directory; uploads read from it.

use async_trait::async_trait;
use bytes::Bytes;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::http::ByteStream;

/// File metadata information
#[derive(Debug, Clone)]
pub struct FileMetadata {
    pub size: u64,
    pub modified_at: Option<i64>,
    pub is_directory: bool,
}

/// A writable byte sink, flushed and shut down by the consumer once the
/// source is exhausted.
pub type ByteSink = Box<dyn tokio::io::AsyncWrite + Send + Unpin>;

/// File system access trait
///
/// Abstracts file I/O so the transfer pipeline can be exercised against an
/// in-memory implementation in tests.
///
/// # Example
///
/// ```ignore
/// use rpa_traits::fs::FileSystemAccess;
///
/// async fn stash(fs: &dyn FileSystemAccess, data: &[u8]) -> Result<()> {
///     let dir = fs.workspace_dir();
///     fs.write_file(&dir.join("data.bin"), data.into()).await?;
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait FileSystemAccess: Send + Sync {
    /// The directory automation scripts treat as their working area.
    fn workspace_dir(&self) -> PathBuf;

    /// Check if a file or directory exists
    async fn exists(&self, path: &Path) -> Result<bool>;

    /// Get metadata for a file or directory
    async fn metadata(&self, path: &Path) -> Result<FileMetadata>;

    /// Create a directory and all parent directories if they don't exist
    async fn create_dir_all(&self, path: &Path) -> Result<()>;

    /// Read entire file contents into memory
    ///
    /// For large files, use `open_read_stream` instead.
    async fn read_file(&self, path: &Path) -> Result<Bytes>;

    /// Write data to a file, creating it if it doesn't exist
    async fn write_file(&self, path: &Path, data: Bytes) -> Result<()>;

    /// Delete a file
    async fn delete_file(&self, path: &Path) -> Result<()>;

    /// Open a file for streaming reads
    async fn open_read_stream(&self, path: &Path) -> Result<ByteStream>;

    /// Open a file for streaming writes, truncating any existing content
    async fn open_write_stream(&self, path: &Path) -> Result<ByteSink>;
}
