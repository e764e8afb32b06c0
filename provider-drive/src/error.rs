//! Error types for the Google Drive provider

use rpa_traits::CapabilityError;
use rpa_transfer::TransferError;
use thiserror::Error;

/// Google Drive provider errors
#[derive(Error, Debug)]
pub enum DriveError {
    /// API request returned an error
    #[error("Google Drive API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Server-side conversion output exceeds the Drive export limit
    #[error("Export size limit exceeded: {0}")]
    ExportSizeLimit(String),

    /// File not found
    #[error("File not found: {file_id}")]
    FileNotFound { file_id: String },

    /// Malformed request parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Failed to parse API response
    #[error("Failed to parse API response: {0}")]
    Parse(String),

    /// Capability failure
    #[error(transparent)]
    Capability(#[from] CapabilityError),
}

/// Result type for Google Drive operations
pub type Result<T> = std::result::Result<T, DriveError>;

impl From<DriveError> for TransferError {
    fn from(error: DriveError) -> Self {
        match error {
            DriveError::Api { status, message } => TransferError::Api { status, message },
            DriveError::ExportSizeLimit(msg) => TransferError::ExportTooLarge(msg),
            DriveError::FileNotFound { file_id } => TransferError::Api {
                status: 404,
                message: format!("File not found: {}", file_id),
            },
            DriveError::InvalidParameter(msg) => TransferError::InvalidParameter(msg),
            DriveError::Parse(msg) => {
                TransferError::Capability(CapabilityError::OperationFailed(msg))
            }
            DriveError::Capability(e) => TransferError::Capability(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let error = DriveError::Api {
            status: 404,
            message: "File not found".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Google Drive API error (status 404): File not found"
        );
    }

    #[test]
    fn export_limit_maps_to_transfer_error() {
        let error = DriveError::ExportSizeLimit("over 10MB".to_string());
        let transfer: TransferError = error.into();
        assert!(matches!(transfer, TransferError::ExportTooLarge(_)));
    }

    #[test]
    fn api_error_maps_with_status() {
        let error = DriveError::Api {
            status: 500,
            message: "boom".to_string(),
        };
        let transfer: TransferError = error.into();
        assert!(matches!(transfer, TransferError::Api { status: 500, .. }));
    }
}
