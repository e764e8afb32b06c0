//! Chatwork room message client
//!
//! https://developer.chatwork.com/reference

use bytes::Bytes;
use std::sync::Arc;
use tracing::{debug, info, instrument};

use rpa_traits::http::{HttpClient, HttpMethod, HttpRequest};

use crate::error::{ChatError, Result};

/// Chatwork API base URL
const CHATWORK_API_BASE: &str = "https://api.chatwork.com/v2";

/// Chatwork messaging client
///
/// One instance per API token, typically bound into the resource registry.
pub struct ChatClient {
    http_client: Arc<dyn HttpClient>,
    api_token: String,
}

impl ChatClient {
    pub fn new(http_client: Arc<dyn HttpClient>, api_token: impl Into<String>) -> Self {
        Self {
            http_client,
            api_token: api_token.into(),
        }
    }

    /// Post a message to a room.
    #[instrument(skip(self, message), fields(room_id = %room_id))]
    pub async fn post_message(&self, room_id: &str, message: &str) -> Result<()> {
        let url = format!("{}/rooms/{}/messages", CHATWORK_API_BASE, room_id);
        let form = format!("body={}", urlencoding::encode(message));
        debug!(bytes = form.len(), "Posting message to Chatwork");

        let request = HttpRequest::new(HttpMethod::Post, url)
            .header("X-ChatWorkToken", self.api_token.clone())
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(Bytes::from(form));

        let response = self.http_client.execute(request).await?;
        if !response.is_success() {
            return Err(ChatError::Api {
                status: response.status,
                message: String::from_utf8_lossy(&response.body).to_string(),
            });
        }

        info!("Posted message to Chatwork room");
        Ok(())
    }
}
