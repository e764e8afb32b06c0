//! Chatwork messaging provider
//!
//! Small client for posting notification messages to Chatwork rooms,
//! typically used by automation scripts to report job outcomes.

pub mod client;
pub mod error;

pub use client::ChatClient;
pub use error::{ChatError, Result};
