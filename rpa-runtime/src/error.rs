use thiserror::Error;

#[derive(Error, Debug)]
pub enum RuntimeError {
    /// Capability invoked before `initialise` bound a client
    #[error("Resource '{resource}' has not been initialised")]
    Uninitialised { resource: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
