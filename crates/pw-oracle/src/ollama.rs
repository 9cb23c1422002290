//! Ollama local oracle client.
//!
//! Calls the Ollama HTTP API (`/api/chat`) with the prompt as a single user
//! turn. Runs at zero API cost, which makes it the usual choice for local
//! batch experiments.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::OracleConfig;
use crate::error::{OracleError, OracleResult};
use crate::oracle::Oracle;

/// Ollama chat API request body.
#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    format: &'a str,
    stream: bool,
}

/// A single message in the chat request.
#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Ollama chat API response (only fields we need).
#[derive(Deserialize)]
struct ChatResponse {
    message: Option<ResponseMessage>,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: String,
}

/// Client for a local Ollama server.
pub struct OllamaClient {
    client: reqwest::Client,
    url: String,
    model: String,
}

impl OllamaClient {
    pub fn new(config: &OracleConfig) -> OracleResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;
        Ok(Self {
            client,
            url: format!("{}/api/chat", config.host()),
            model: config.model().to_string(),
        })
    }
}

#[async_trait]
impl Oracle for OllamaClient {
    async fn generate(&self, prompt: &str) -> OracleResult<String> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            // Both pipeline prompts ask for a JSON object.
            format: "json",
            stream: false,
        };

        let response = self.client.post(&self.url).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, "ollama returned non-200");
            return Err(OracleError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let chat_resp: ChatResponse = response
            .json()
            .await
            .map_err(|e| OracleError::Body(e.to_string()))?;

        match chat_resp.message {
            Some(msg) if !msg.content.trim().is_empty() => Ok(msg.content),
            _ => Err(OracleError::EmptyResponse),
        }
    }

    fn name(&self) -> &str {
        "ollama"
    }
}
