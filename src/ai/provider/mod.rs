//! Vision Provider Abstraction
//!
//! Defines the [`VisionProvider`] trait: one multimodal request per photo,
//! returning the provider's raw text answer plus usage metrics. Parsing the
//! answer is the vision client's job, not the provider's.

mod openai;

pub use openai::OpenAiVisionProvider;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::ProviderSettings;
use crate::types::{LensError, ProviderError, Result};

// =============================================================================
// Vision Response with Usage Metrics
// =============================================================================

/// Raw provider answer for one image
#[derive(Debug, Clone)]
pub struct VisionResponse {
    /// Text returned by the model (expected to hold a JSON object)
    pub content: String,
    /// Token usage metrics
    pub usage: TokenUsage,
    /// Response timing
    pub timing: ResponseTiming,
    /// Provider and model info
    pub metadata: ResponseMetadata,
}

impl VisionResponse {
    /// Create response with content only (usage unknown)
    pub fn content_only(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            usage: TokenUsage::default(),
            timing: ResponseTiming::default(),
            metadata: ResponseMetadata::default(),
        }
    }
}

/// Token usage metrics for cost tracking
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Input tokens (prompt + image)
    pub input_tokens: u32,
    /// Output tokens (response)
    pub output_tokens: u32,
}

impl TokenUsage {
    /// Total tokens used (input + output)
    pub fn total(&self) -> u32 {
        self.input_tokens + self.output_tokens
    }

    /// Create from OpenAI-style usage response
    pub fn from_openai(prompt_tokens: u32, completion_tokens: u32) -> Self {
        Self {
            input_tokens: prompt_tokens,
            output_tokens: completion_tokens,
        }
    }
}

/// Response timing metrics
#[derive(Debug, Clone, Default)]
pub struct ResponseTiming {
    /// Total response time in milliseconds (wall clock)
    pub total_ms: u64,
}

impl ResponseTiming {
    pub fn from_duration(duration: std::time::Duration) -> Self {
        Self {
            total_ms: duration.as_millis() as u64,
        }
    }
}

/// Response metadata
#[derive(Debug, Clone, Default)]
pub struct ResponseMetadata {
    /// Model used
    pub model: String,
    /// Provider name
    pub provider: String,
}

// =============================================================================
// Vision Provider Trait
// =============================================================================

/// Multimodal provider able to look at one image and answer a prompt about it
#[async_trait]
pub trait VisionProvider: Send + Sync {
    /// Send `prompt` together with the image at `image_url`
    async fn analyze_image(
        &self,
        prompt: &str,
        image_url: &str,
    ) -> std::result::Result<VisionResponse, ProviderError>;

    /// Provider name for logging
    fn name(&self) -> &str;

    /// Model name currently in use
    fn model(&self) -> &str;
}

/// Shared provider type for concurrent access across photo analyses
pub type SharedProvider = Arc<dyn VisionProvider + Send + Sync>;

/// Create a shared provider from configuration
pub fn create_provider(settings: &ProviderSettings) -> Result<SharedProvider> {
    match settings.kind.as_str() {
        "openai" => Ok(Arc::new(OpenAiVisionProvider::new(settings.clone())?)),
        other => Err(LensError::Config(format!(
            "Unknown provider: {}. Supported: openai",
            other
        ))),
    }
}

#[cfg(test)]
pub(crate) mod testing;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_usage_from_openai() {
        let usage = TokenUsage::from_openai(1200, 300);
        assert_eq!(usage.input_tokens, 1200);
        assert_eq!(usage.output_tokens, 300);
        assert_eq!(usage.total(), 1500);
    }

    #[test]
    fn test_create_provider_rejects_unknown_kind() {
        let settings = ProviderSettings {
            kind: "carrier-pigeon".to_string(),
            ..Default::default()
        };
        let err = create_provider(&settings).err().unwrap();
        assert!(matches!(err, LensError::Config(msg) if msg.contains("carrier-pigeon")));
    }

    #[test]
    fn test_create_provider_openai_with_key() {
        let settings = ProviderSettings {
            api_key: Some("sk-test".to_string()),
            ..Default::default()
        };
        let provider = create_provider(&settings).unwrap();
        assert_eq!(provider.name(), "openai");
        assert_eq!(provider.model(), "gpt-4o");
    }
}
