//! OpenAI API Provider
//!
//! LLM provider using the Chat Completions API. Works with any
//! OpenAI-compatible endpoint via `api_base`.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use super::{
    GenerationOutput, GenerationRequest, LlmProvider, ProviderConfig, ResponseMetadata,
    ResponseTiming, TokenUsage,
};
use crate::constants::network::CONNECTION_TIMEOUT_SECS;
use crate::types::{ErrorClassifier, Result, StudyError};

const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const PROVIDER_NAME: &str = "openai";

/// OpenAI API Provider with secure API key handling
pub struct OpenAiProvider {
    /// API key stored securely - never exposed in logs or debug output
    api_key: SecretString,
    api_base: String,
    model: String,
    temperature: f32,
    client: reqwest::Client,
}

impl std::fmt::Debug for OpenAiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiProvider")
            .field("api_key", &"[REDACTED]")
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .finish()
    }
}

impl OpenAiProvider {
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let api_key_str = config
            .api_key
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
            .ok_or_else(|| {
                StudyError::Config(
                    "OpenAI API key not found. Set OPENAI_API_KEY env var or llm.api_key in config"
                        .to_string(),
                )
            })?;

        let api_base = config
            .api_base
            .map(|base| base.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        let model = config.model.unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(CONNECTION_TIMEOUT_SECS))
            .build()
            .map_err(|e| StudyError::LlmApi(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            api_key: SecretString::from(api_key_str),
            api_base,
            model,
            temperature: config.temperature,
            client,
        })
    }

    fn build_request(&self, request: &GenerationRequest) -> ChatCompletionRequest {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = &request.system {
            messages.push(ChatMessage {
                role: "system".to_string(),
                content: system.clone(),
            });
        }
        messages.push(ChatMessage {
            role: "user".to_string(),
            content: request.prompt.clone(),
        });

        ChatCompletionRequest {
            model: self.model.clone(),
            messages,
            temperature: self.temperature,
            max_tokens: Some(request.max_tokens),
            n: 1,
        }
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationOutput> {
        info!(
            "Generating with OpenAI (model: {}, max_tokens: {})",
            self.model, request.max_tokens
        );

        let start_time = Instant::now();
        let body = self.build_request(request);
        let url = format!("{}/chat/completions", self.api_base);

        debug!("Sending request to OpenAI API");

        let response = self
            .client
            .post(&url)
            .header(
                "Authorization",
                format!("Bearer {}", self.api_key.expose_secret()),
            )
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| ErrorClassifier::classify(&e.to_string(), PROVIDER_NAME))?;

        let elapsed = start_time.elapsed();

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ErrorClassifier::classify_http_status(
                status.as_u16(),
                &format!("OpenAI API error ({}): {}", status, body),
                PROVIDER_NAME,
            )
            .into());
        }

        let response_body: ChatCompletionResponse = response.json().await.map_err(|e| {
            ErrorClassifier::classify(
                &format!("Failed to parse OpenAI response: {}", e),
                PROVIDER_NAME,
            )
        })?;

        let usage = response_body
            .usage
            .as_ref()
            .map(|u| TokenUsage::from_openai(u.prompt_tokens, u.completion_tokens))
            .unwrap_or_default();

        let candidates = response_body.into_candidates();

        debug!(
            "Received {} candidate(s) from OpenAI in {}ms",
            candidates.len(),
            elapsed.as_millis()
        );

        Ok(GenerationOutput::with_metrics(
            candidates,
            usage,
            ResponseTiming::from_duration(elapsed),
            ResponseMetadata {
                model: self.model.clone(),
                provider: PROVIDER_NAME.to_string(),
            },
        ))
    }

    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn health_check(&self) -> Result<bool> {
        let url = format!("{}/models", self.api_base);

        let response = self
            .client
            .get(&url)
            .header(
                "Authorization",
                format!("Bearer {}", self.api_key.expose_secret()),
            )
            .send()
            .await;

        match response {
            Ok(resp) if resp.status().is_success() => {
                info!("OpenAI API is available");
                Ok(true)
            }
            Ok(resp) => {
                warn!("OpenAI API check failed: {}", resp.status());
                Ok(false)
            }
            Err(e) => {
                warn!("OpenAI API check failed: {}", e);
                Ok(false)
            }
        }
    }
}

// Request/Response types

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<usize>,
    n: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    usage: Option<UsageInfo>,
}

impl ChatCompletionResponse {
    /// Choice contents in order; a null content stays as an empty candidate
    fn into_candidates(self) -> Vec<String> {
        self.choices
            .into_iter()
            .map(|c| c.message.content.unwrap_or_default())
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UsageInfo {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> OpenAiProvider {
        OpenAiProvider::new(ProviderConfig {
            provider: "openai".to_string(),
            api_key: Some("sk-test".to_string()),
            api_base: Some("http://localhost:8080/v1/".to_string()),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_token_usage_from_openai() {
        let usage = TokenUsage::from_openai(100, 50);
        assert_eq!(usage.input_tokens, 100);
        assert_eq!(usage.output_tokens, 50);
        assert_eq!(usage.total(), 150);
    }

    #[test]
    fn test_debug_hides_api_key() {
        let debug = format!("{:?}", provider());
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("sk-test"));
    }

    #[test]
    fn test_api_base_trailing_slash_trimmed() {
        assert_eq!(provider().api_base, "http://localhost:8080/v1");
        assert_eq!(provider().model(), DEFAULT_MODEL);
    }

    #[test]
    fn test_build_request_with_system() {
        let request = GenerationRequest::new("simplify: text", 512).with_system("Rewrite simply.");
        let body = provider().build_request(&request);

        assert_eq!(body.messages.len(), 2);
        assert_eq!(body.messages[0].role, "system");
        assert_eq!(body.messages[1].content, "simplify: text");
        assert_eq!(body.max_tokens, Some(512));

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["n"], 1);
    }

    #[test]
    fn test_build_request_without_system() {
        let body = provider().build_request(&GenerationRequest::new("text", 10));
        assert_eq!(body.messages.len(), 1);
        assert_eq!(body.messages[0].role, "user");
    }

    #[test]
    fn test_response_candidates_keep_position_of_null_content() {
        let raw = r#"{
            "choices": [
                {"message": {"content": null}},
                {"message": {"content": "second"}}
            ],
            "usage": {"prompt_tokens": 3, "completion_tokens": 1}
        }"#;
        let parsed: ChatCompletionResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.into_candidates(), vec!["", "second"]);
    }
}
