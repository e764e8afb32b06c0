//! # Google Drive Provider
//!
//! Drive API v3 connector for the transfer pipeline.
//!
//! ## Overview
//!
//! This crate provides:
//! - The [`RemoteStore`](rpa_transfer::RemoteStore) implementation backing
//!   upload (multipart create), download (`alt=media` with bearer
//!   authorization), and export (server-side conversion with size-limit
//!   mapping)
//! - File listing with parent/trash query shaping
//! - Metadata lookup and deletion

pub mod connector;
pub mod error;
pub mod types;

pub use connector::{DriveConnector, ListFilesParams};
pub use error::{DriveError, Result};
pub use types::{DriveFile, FilesListResponse};
