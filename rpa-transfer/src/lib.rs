//! Retry and streaming-transfer core of the RPA toolkit.
//!
//! This crate holds the pieces with real design content:
//!
//! - [`retry`](retry::retry): a generic async retry combinator with linear
//!   backoff, parameterized by [`RetryPolicy`](retry::RetryPolicy)
//! - [`delay`]: the cancellable suspension primitive backing the backoff
//! - [`sniff`](sniff::sniff): content-type inference over the leading bytes
//!   of a stream, with loss-free replay of the inspected prefix
//! - [`TransferPipeline`](pipeline::TransferPipeline): upload / download /
//!   export as push-through byte-stream copies with deterministic
//!   completion and failure signaling
//!
//! Remote services participate through the [`RemoteStore`](remote::RemoteStore)
//! seam; providers implement it, the pipeline consumes it. No retries happen
//! inside the pipeline — callers wrap whole operations in `retry` when they
//! want recovery.

pub mod delay;
pub mod error;
pub mod pipeline;
pub mod remote;
pub mod retry;
pub mod sniff;

pub use error::TransferError;
pub use pipeline::{DownloadSpec, TransferPipeline, UploadSpec};
pub use remote::{CreateRequest, RemoteDownload, RemoteLocator, RemoteStore};
pub use retry::{retry, RetryPolicy};
pub use sniff::{sniff, Sniffed};
