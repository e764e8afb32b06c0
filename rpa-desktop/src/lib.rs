//! # Desktop Capability Implementations
//!
//! Default implementations of the toolkit capability traits for desktop and
//! server environments:
//! - `HttpClient` using `reqwest`
//! - `FileSystemAccess` using `tokio::fs` rooted at the workspace directory
//!
//! ## Usage
//!
//! ```ignore
//! use rpa_desktop::{ReqwestHttpClient, WorkspaceFileSystem};
//! use std::sync::Arc;
//!
//! let http = Arc::new(ReqwestHttpClient::new());
//! let fs = Arc::new(WorkspaceFileSystem::from_env());
//! ```

mod filesystem;
mod http;

pub use filesystem::WorkspaceFileSystem;
pub use http::ReqwestHttpClient;
