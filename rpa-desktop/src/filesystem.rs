//! File System Access Implementation using Tokio
//!
//! All script-facing file I/O is rooted at the workspace directory, the
//! same place transfers read from and write to.

use async_trait::async_trait;
use bytes::Bytes;
use rpa_traits::{
    error::{CapabilityError, Result},
    fs::{ByteSink, FileMetadata, FileSystemAccess},
    http::ByteStream,
};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Environment variable overriding the workspace directory.
const WORKSPACE_DIR_ENV: &str = "WORKSPACE_DIR";

/// Tokio-based file system implementation rooted at a workspace directory.
pub struct WorkspaceFileSystem {
    workspace: PathBuf,
}

impl WorkspaceFileSystem {
    /// Root the workspace at `WORKSPACE_DIR`, falling back to the current
    /// directory when unset.
    pub fn from_env() -> Self {
        let workspace = std::env::var(WORKSPACE_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."));
        Self { workspace }
    }

    /// Root the workspace at an explicit directory.
    pub fn with_workspace(workspace: PathBuf) -> Self {
        Self { workspace }
    }

    fn map_io_error(e: std::io::Error) -> CapabilityError {
        CapabilityError::Io(e)
    }
}

impl Default for WorkspaceFileSystem {
    fn default() -> Self {
        Self::from_env()
    }
}

#[async_trait]
impl FileSystemAccess for WorkspaceFileSystem {
    fn workspace_dir(&self) -> PathBuf {
        self.workspace.clone()
    }

    async fn exists(&self, path: &Path) -> Result<bool> {
        Ok(fs::try_exists(path).await.map_err(Self::map_io_error)?)
    }

    async fn metadata(&self, path: &Path) -> Result<FileMetadata> {
        let metadata = fs::metadata(path).await.map_err(Self::map_io_error)?;

        Ok(FileMetadata {
            size: metadata.len(),
            modified_at: metadata
                .modified()
                .ok()
                .and_then(|t| t.duration_since(std::time::UNIX_EPOCH).ok())
                .map(|d| d.as_secs() as i64),
            is_directory: metadata.is_dir(),
        })
    }

    async fn create_dir_all(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path).await.map_err(Self::map_io_error)?;
        debug!(path = ?path, "Created directory");
        Ok(())
    }

    async fn read_file(&self, path: &Path) -> Result<Bytes> {
        let data = fs::read(path).await.map_err(Self::map_io_error)?;
        debug!(path = ?path, size = data.len(), "Read file");
        Ok(Bytes::from(data))
    }

    async fn write_file(&self, path: &Path, data: Bytes) -> Result<()> {
        fs::write(path, &data).await.map_err(Self::map_io_error)?;
        debug!(path = ?path, size = data.len(), "Wrote file");
        Ok(())
    }

    async fn delete_file(&self, path: &Path) -> Result<()> {
        fs::remove_file(path).await.map_err(Self::map_io_error)?;
        debug!(path = ?path, "Deleted file");
        Ok(())
    }

    async fn open_read_stream(&self, path: &Path) -> Result<ByteStream> {
        let file = fs::File::open(path).await.map_err(Self::map_io_error)?;
        debug!(path = ?path, "Opened read stream");
        Ok(Box::new(file))
    }

    async fn open_write_stream(&self, path: &Path) -> Result<ByteSink> {
        let file = fs::File::create(path).await.map_err(Self::map_io_error)?;
        debug!(path = ?path, "Opened write stream");
        Ok(Box::new(file))
    }
}
