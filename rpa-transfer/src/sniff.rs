//! Content-type sniffing over stream prefixes.
//!
//! Uploads without a declared MIME type run their source stream through
//! [`sniff`], which classifies the leading bytes against the `infer`
//! magic-number database and hands back a stream that replays the inspected
//! prefix before the remainder. No byte is dropped or reordered.

use std::io::Cursor;
use tokio::io::AsyncReadExt;

use crate::error::{Result, TransferError};
use rpa_traits::http::ByteStream;

/// Leading bytes inspected for classification.
pub const SNIFF_LEN: usize = 512;

/// Type reported when classification is inconclusive.
pub const FALLBACK_MIME: &str = "text/plain";

/// Result of sniffing: the inferred type plus a replay-safe stream.
pub struct Sniffed {
    pub mime_type: String,
    pub stream: ByteStream,
}

/// Classify the content type of `stream` from its leading bytes.
///
/// Reads at most [`SNIFF_LEN`] bytes. The returned stream yields the
/// sniffed prefix followed by the untouched remainder, in original order,
/// exactly once. Unrecognized content (including an empty stream) falls
/// back to [`FALLBACK_MIME`] rather than failing.
///
/// # Errors
///
/// `TransferError::StreamRead` if the underlying stream fails before
/// classification completes; callers must not proceed to transfer.
pub async fn sniff(mut stream: ByteStream) -> Result<Sniffed> {
    let mut prefix = vec![0u8; SNIFF_LEN];
    let mut filled = 0usize;

    while filled < SNIFF_LEN {
        let n = stream
            .read(&mut prefix[filled..])
            .await
            .map_err(TransferError::StreamRead)?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    prefix.truncate(filled);

    let mime_type = infer::get(&prefix)
        .map(|kind| kind.mime_type().to_string())
        .unwrap_or_else(|| FALLBACK_MIME.to_string());

    let stream: ByteStream = Box::new(Cursor::new(prefix).chain(stream));
    Ok(Sniffed { mime_type, stream })
}
