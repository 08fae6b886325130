use futures::future::BoxFuture;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use deskflow_core::config::ModelConfig;
use deskflow_core::error::{DeskflowError, Result};
use deskflow_core::traits::CompletionClient;

const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// OpenAI-compatible completion client. Works with OpenAI, Ollama, vLLM,
/// Groq, OpenRouter, etc.
pub struct OpenAiClient {
    http: Client,
    config: ModelConfig,
}

impl OpenAiClient {
    pub fn new(config: ModelConfig) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }
}

// Request types
#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<OaiMessage>,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Serialize)]
struct OaiMessage {
    role: String,
    content: String,
}

// Response types
#[derive(Deserialize, Debug)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize, Debug)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize, Debug)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl CompletionClient for OpenAiClient {
    fn complete<'a>(&'a self, prompt: &'a str) -> BoxFuture<'a, Result<String>> {
        Box::pin(async move {
            let base_url = self.config.base_url.as_deref().unwrap_or(OPENAI_API_URL);

            let body = ChatRequest {
                model: self.config.model_id.clone(),
                messages: vec![OaiMessage {
                    role: "user".to_string(),
                    content: prompt.to_string(),
                }],
                max_tokens: self.config.max_tokens,
                temperature: if self.config.temperature > 0.0 {
                    Some(self.config.temperature)
                } else {
                    None
                },
            };

            let mut req = self.http.post(base_url).json(&body);

            if let Some(api_key) = &self.config.api_key {
                req = req.header("Authorization", format!("Bearer {}", api_key));
            }

            let response = req
                .send()
                .await
                .map_err(|e| DeskflowError::CompletionRequest(e.to_string()))?;

            if !response.status().is_success() {
                let status = response.status();
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "unknown".to_string());
                return Err(DeskflowError::CompletionRequest(format!(
                    "HTTP {}: {}",
                    status, body
                )));
            }

            let parsed: ChatResponse = response
                .json()
                .await
                .map_err(|e| DeskflowError::CompletionParse(e.to_string()))?;

            parsed
                .choices
                .into_iter()
                .next()
                .and_then(|c| c.message.content)
                .ok_or_else(|| {
                    DeskflowError::CompletionParse("response contained no completion text".into())
                })
        })
    }
}
