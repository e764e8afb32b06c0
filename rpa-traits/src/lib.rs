//! # Capability Traits
//!
//! Traits that describe the external collaborators the RPA toolkit core
//! depends on, implemented separately per environment.
//!
//! ## Overview
//!
//! This crate defines the contract between the transfer/retry core and the
//! outside world. Each trait represents a capability the core consumes but
//! does not implement:
//!
//! - [`HttpClient`](http::HttpClient) - Buffered and streaming HTTP operations
//! - [`FileSystemAccess`](fs::FileSystemAccess) - Workspace-relative file I/O
//! - [`CredentialProvider`](credentials::CredentialProvider) - Opaque bearer
//!   tokens for `Authorization` headers
//!
//! ## Error Handling
//!
//! All capability traits use [`CapabilityError`](error::CapabilityError) so
//! that implementations stay interchangeable. Implementations should convert
//! library-specific errors into `CapabilityError` with actionable messages.
//!
//! ## Thread Safety
//!
//! All traits require `Send + Sync` bounds so handles can be shared across
//! async tasks behind `Arc`.

pub mod credentials;
pub mod error;
pub mod fs;
pub mod http;

pub use error::CapabilityError;

// Re-export commonly used types
pub use credentials::{CredentialProvider, StaticToken};
pub use fs::{FileMetadata, FileSystemAccess};
pub use http::{
    ByteStream, HttpClient, HttpMethod, HttpRequest, HttpResponse, HttpStreamResponse,
};
