//! Chat backend: one JSON request/response call to `{base}/chat`.

mod error;

use serde::{Deserialize, Serialize};

use crate::core::config::Config;

pub use error::ChatError;

/// Request body: `{"message": "..."}`.
#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
}

/// Success body. `reply` may be absent or null.
#[derive(Debug, Default, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub reply: Option<String>,
}

/// Something that answers a user message with optional reply text.
///
/// `Ok(None)` means the call succeeded but carried no usable text.
#[async_trait::async_trait]
pub trait ChatBackend: Send + Sync {
    async fn send(&self, message: &str) -> Result<Option<String>, ChatError>;
}

/// reqwest client for the chat endpoint.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    http: reqwest::Client,
    chat_url: String,
}

impl HttpBackend {
    pub fn new(config: &Config) -> Self {
        Self::with_client(config, reqwest::Client::new())
    }

    pub fn with_client(config: &Config, http: reqwest::Client) -> Self {
        Self {
            http,
            chat_url: config.chat_url(),
        }
    }

    pub fn chat_url(&self) -> &str {
        &self.chat_url
    }
}

#[async_trait::async_trait]
impl ChatBackend for HttpBackend {
    async fn send(&self, message: &str) -> Result<Option<String>, ChatError> {
        log::debug!("POST {} ({} chars)", self.chat_url, message.chars().count());
        let response = self
            .http
            .post(&self.chat_url)
            .json(&ChatRequest { message })
            .send()
            .await
            .map_err(ChatError::Network)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ChatError::BadStatus {
                status: status.as_u16(),
                body,
            });
        }

        let body: ChatResponse = response.json().await.map_err(ChatError::Decode)?;
        Ok(body.reply)
    }
}
