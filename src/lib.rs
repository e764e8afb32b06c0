//! RPA toolkit facade.
//!
//! Re-exports the surface automation scripts actually touch so they can
//! depend on `rpa-toolkit` alone instead of wiring each workspace crate
//! individually.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use rpa_toolkit::{
//!     DriveConnector, ReqwestHttpClient, TransferPipeline, UploadSpec,
//!     WorkspaceFileSystem,
//! };
//! use rpa_toolkit::traits::StaticToken;
//!
//! let http = Arc::new(ReqwestHttpClient::new()?);
//! let drive = Arc::new(
//!     DriveConnector::new(http, Arc::new(StaticToken::new(token))),
//! );
//! let fs = Arc::new(WorkspaceFileSystem::from_env());
//! let pipeline = TransferPipeline::new(drive, fs);
//!
//! let id = pipeline
//!     .upload(UploadSpec {
//!         filename: "report.csv".to_string(),
//!         ..Default::default()
//!     })
//!     .await?;
//! ```

pub use rpa_desktop as desktop;
pub use rpa_runtime as runtime;
pub use rpa_traits as traits;
pub use rpa_transfer as transfer;

pub use provider_chat as chat;
pub use provider_drive as drive;

pub use rpa_desktop::{ReqwestHttpClient, WorkspaceFileSystem};
pub use rpa_runtime::{init_logging, LoggingConfig, ResourceHandle, ResourceRegistry};
pub use rpa_transfer::{
    retry, DownloadSpec, RetryPolicy, TransferError, TransferPipeline, UploadSpec,
};

pub use provider_chat::ChatClient;
pub use provider_drive::{DriveConnector, ListFilesParams};
