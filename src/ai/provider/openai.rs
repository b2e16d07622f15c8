//! OpenAI Vision Provider
//!
//! Vision provider using the Chat Completions API with `image_url` content
//! parts. Works against OpenAI and OpenAI-compatible gateways via `api_base`.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::debug;
use url::Url;

use super::{ResponseMetadata, ResponseTiming, TokenUsage, VisionProvider, VisionResponse};
use crate::config::{ImageDetail, ProviderSettings};
use crate::constants::network;
use crate::types::{ErrorCategory, ErrorClassifier, LensError, ProviderError, Result};

const PROVIDER_NAME: &str = "openai";
const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
const SYSTEM_PROMPT: &str = "You are a real estate photo analyst. Always respond with a single valid JSON object and nothing else.";

/// OpenAI vision provider with secure API key handling
pub struct OpenAiVisionProvider {
    /// API key stored securely - never exposed in logs or debug output
    api_key: SecretString,
    endpoint: Url,
    model: String,
    temperature: f32,
    max_tokens: usize,
    image_detail: ImageDetail,
    client: reqwest::Client,
}

impl std::fmt::Debug for OpenAiVisionProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiVisionProvider")
            .field("api_key", &"[REDACTED]")
            .field("endpoint", &self.endpoint.as_str())
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("image_detail", &self.image_detail)
            .finish()
    }
}

impl OpenAiVisionProvider {
    pub fn new(settings: ProviderSettings) -> Result<Self> {
        let api_key_str = settings
            .api_key
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
            .ok_or_else(|| {
                LensError::Config(
                    "OpenAI API key not found. Set OPENAI_API_KEY env var or provide in config"
                        .to_string(),
                )
            })?;

        let endpoint = chat_completions_url(settings.api_base.as_deref())?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .connect_timeout(Duration::from_secs(network::CONNECTION_TIMEOUT_SECS))
            .build()
            .map_err(|e| {
                LensError::Provider(ProviderError::with_provider(
                    ErrorCategory::Unknown,
                    format!("Failed to create HTTP client: {}", e),
                    PROVIDER_NAME,
                ))
            })?;

        Ok(Self {
            api_key: SecretString::from(api_key_str),
            endpoint,
            model: settings.model,
            temperature: settings.temperature,
            max_tokens: settings.max_tokens,
            image_detail: settings.image_detail,
            client,
        })
    }

    fn build_request(&self, prompt: &str, image_url: &str) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: vec![ContentPart::Text {
                        text: SYSTEM_PROMPT.to_string(),
                    }],
                },
                ChatMessage {
                    role: "user",
                    content: vec![
                        ContentPart::Text {
                            text: prompt.to_string(),
                        },
                        ContentPart::ImageUrl {
                            image_url: ImageUrl {
                                url: image_url.to_string(),
                                detail: self.image_detail.as_str(),
                            },
                        },
                    ],
                },
            ],
            temperature: self.temperature,
            max_tokens: Some(self.max_tokens),
            response_format: Some(ResponseFormat {
                format_type: "json_object",
            }),
        }
    }
}

/// Resolve `{api_base}/chat/completions`, tolerating a trailing slash
fn chat_completions_url(api_base: Option<&str>) -> Result<Url> {
    let base = api_base.unwrap_or(DEFAULT_API_BASE).trim_end_matches('/');
    let base = Url::parse(&format!("{}/", base))
        .map_err(|e| LensError::Config(format!("Invalid provider api_base '{}': {}", base, e)))?;
    base.join("chat/completions")
        .map_err(|e| LensError::Config(format!("Invalid provider api_base: {}", e)))
}

#[async_trait]
impl VisionProvider for OpenAiVisionProvider {
    async fn analyze_image(
        &self,
        prompt: &str,
        image_url: &str,
    ) -> std::result::Result<VisionResponse, ProviderError> {
        let start_time = Instant::now();
        let request = self.build_request(prompt, image_url);

        debug!(model = %self.model, "Sending vision request to OpenAI");

        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(self.api_key.expose_secret())
            .json(&request)
            .send()
            .await
            .map_err(|e| ErrorClassifier::classify_transport(&e, PROVIDER_NAME))?;

        let elapsed = start_time.elapsed();

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ErrorClassifier::classify_http_status(
                status.as_u16(),
                &format!("OpenAI API error ({}): {}", status, body),
                PROVIDER_NAME,
            ));
        }

        let response_body: ChatCompletionResponse = response.json().await.map_err(|e| {
            ProviderError::with_provider(
                ErrorCategory::ParseError,
                format!("Failed to decode OpenAI response: {}", e),
                PROVIDER_NAME,
            )
        })?;

        let usage = response_body
            .usage
            .map(|u| TokenUsage::from_openai(u.prompt_tokens, u.completion_tokens))
            .unwrap_or_default();

        let content = response_body
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| {
                ProviderError::with_provider(
                    ErrorCategory::ParseError,
                    "No content in OpenAI response",
                    PROVIDER_NAME,
                )
            })?;

        Ok(VisionResponse {
            content,
            usage,
            timing: ResponseTiming::from_duration(elapsed),
            metadata: ResponseMetadata {
                model: self.model.clone(),
                provider: PROVIDER_NAME.to_string(),
            },
        })
    }

    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn model(&self) -> &str {
        &self.model
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
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: Vec<ContentPart>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
struct ImageUrl {
    url: String,
    detail: &'static str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
    usage: Option<UsageInfo>,
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
