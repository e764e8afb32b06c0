//! Credential Provider Abstraction
//!
//! Supplies opaque bearer tokens for `Authorization` headers. Token
//! acquisition and refresh are owned by the host; the toolkit core only
//! consumes the resulting token.

use async_trait::async_trait;

use crate::error::Result;

/// Source of opaque access tokens.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Return a currently valid access token.
    ///
    /// Implementations are responsible for refreshing expired tokens before
    /// returning; callers treat the value as opaque.
    async fn access_token(&self) -> Result<String>;
}

/// Fixed-token provider for tests and short-lived scripts.
pub struct StaticToken {
    token: String,
}

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait]
impl CredentialProvider for StaticToken {
    async fn access_token(&self) -> Result<String> {
        Ok(self.token.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn static_token_round_trips() {
        let provider = StaticToken::new("abc");
        assert_eq!(provider.access_token().await.unwrap(), "abc");
    }
}
