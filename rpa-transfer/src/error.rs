//! Error types for transfer operations

use rpa_traits::CapabilityError;
use thiserror::Error;

/// Transfer pipeline errors
#[derive(Error, Debug)]
pub enum TransferError {
    /// Source stream failed mid-transfer; no partial result is returned
    #[error("Stream read failed: {0}")]
    StreamRead(#[source] std::io::Error),

    /// Sink failed mid-transfer; no partial result is returned
    #[error("Stream write failed: {0}")]
    StreamWrite(#[source] std::io::Error),

    /// Malformed caller input, rejected before any I/O
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Server-side conversion exceeds the remote size limit; not retriable
    #[error("Export exceeds the remote conversion size limit: {0}")]
    ExportTooLarge(String),

    /// Remote API rejected the request
    #[error("Remote API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Collaborator capability failure
    #[error(transparent)]
    Capability(#[from] CapabilityError),
}

/// Result type for transfer operations
pub type Result<T> = std::result::Result<T, TransferError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let error = TransferError::Api {
            status: 403,
            message: "export size limit exceeded".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Remote API error (status 403): export size limit exceeded"
        );
    }

    #[test]
    fn capability_errors_convert() {
        let capability = CapabilityError::OperationFailed("connection reset".to_string());
        let error: TransferError = capability.into();
        assert!(matches!(error, TransferError::Capability(_)));
    }
}
