//! Inference client for a local Ollama server.
//!
//! One synchronous request/response exchange per call: the caller hands over
//! the full message list and gets back the textual completion or an
//! `Inference` error. No streaming, no retries.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};
use crate::models::domain::conversation::ChatMessage;

const REQUEST_TIMEOUT_SECS: u64 = 120;

/// Fixed sampling configuration for one purpose. Held constant across calls;
/// chat and quiz generation use slightly different presets.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SamplingOptions {
    pub temperature: f32,
    pub num_ctx: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
}

impl SamplingOptions {
    pub fn chat() -> Self {
        Self {
            temperature: 0.7,
            num_ctx: 2048,
            top_p: Some(0.9),
            top_k: Some(40),
        }
    }

    pub fn quiz_generation() -> Self {
        Self {
            temperature: 0.7,
            num_ctx: 2048,
            top_p: None,
            top_k: None,
        }
    }
}

#[async_trait]
pub trait InferenceClient: Send + Sync {
    async fn complete(
        &self,
        model: &str,
        messages: &[ChatMessage],
        options: &SamplingOptions,
    ) -> AppResult<String>;
}

/// Talks to Ollama's native `/api/chat` endpoint.
pub struct OllamaClient {
    base_url: String,
    client: reqwest::Client,
}

impl OllamaClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[derive(Debug, Deserialize)]
struct OllamaChatResponse {
    message: ChatMessage,
}

#[async_trait]
impl InferenceClient for OllamaClient {
    async fn complete(
        &self,
        model: &str,
        messages: &[ChatMessage],
        options: &SamplingOptions,
    ) -> AppResult<String> {
        let url = format!("{}/api/chat", self.base_url);
        let body = serde_json::json!({
            "model": model,
            "messages": messages,
            "stream": false,
            "options": options,
        });

        log::debug!("Sending completion request to {} (model {})", url, model);

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await?
            .error_for_status()
            .map_err(|e| AppError::Inference(e.to_string()))?;

        let parsed: OllamaChatResponse = response
            .json()
            .await
            .map_err(|e| AppError::Inference(format!("Malformed completion response: {}", e)))?;

        Ok(parsed.message.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::conversation::Role;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = OllamaClient::new("http://localhost:11434/");
        assert_eq!(client.base_url(), "http://localhost:11434");
    }

    #[test]
    fn test_chat_options_serialize_all_fields() {
        let json = serde_json::to_value(SamplingOptions::chat()).unwrap();

        assert_eq!(json["num_ctx"], 2048);
        assert_eq!(json["top_k"], 40);
        assert!((json["top_p"].as_f64().unwrap() - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_quiz_options_omit_nucleus_sampling_fields() {
        let json = serde_json::to_value(SamplingOptions::quiz_generation()).unwrap();

        assert_eq!(json["num_ctx"], 2048);
        assert!(json.get("top_p").is_none());
        assert!(json.get("top_k").is_none());
    }

    #[test]
    fn test_completion_response_parses_message_content() {
        let raw = r#"{"model":"llama3.2","message":{"role":"assistant","content":"Hello!"},"done":true}"#;
        let parsed: OllamaChatResponse = serde_json::from_str(raw).unwrap();

        assert_eq!(parsed.message.role, Role::Assistant);
        assert_eq!(parsed.message.content, "Hello!");
    }
}
