//! Chat provider error types

use rpa_traits::error::CapabilityError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChatError {
    /// Chatwork API returned a non-success status
    #[error("Chatwork API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Underlying capability failed
    #[error("Capability error: {0}")]
    Capability(#[from] CapabilityError),
}

pub type Result<T> = std::result::Result<T, ChatError>;
