//! Configuration Types
//!
//! All configuration structures with sensible defaults.
//! Supports global (~/.config/listinglens/) and project (.listinglens/) level configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::constants::{dispatch, network};
use crate::types::{LensError, Result};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Configuration version
    pub version: String,

    /// Vision provider settings
    pub provider: ProviderSettings,

    /// Batch dispatch settings
    pub dispatch: DispatchConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            provider: ProviderSettings::default(),
            dispatch: DispatchConfig::default(),
        }
    }
}

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=2.0).contains(&self.provider.temperature) {
            return Err(LensError::Config(format!(
                "Provider temperature must be between 0.0 and 2.0, got {}",
                self.provider.temperature
            )));
        }

        if self.provider.timeout_secs == 0 {
            return Err(LensError::Config(
                "Provider timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.dispatch.concurrency == 0 {
            return Err(LensError::Config(
                "Dispatch concurrency must be greater than 0".to_string(),
            ));
        }

        if self.dispatch.photo_timeout_secs == 0 {
            return Err(LensError::Config(
                "Dispatch photo_timeout_secs must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

// =============================================================================
// Provider Configuration
// =============================================================================

/// Image fidelity requested from the provider
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ImageDetail {
    Low,
    #[default]
    High,
    Auto,
}

impl ImageDetail {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageDetail::Low => "low",
            ImageDetail::High => "high",
            ImageDetail::Auto => "auto",
        }
    }
}

/// Vision provider settings
///
/// The API key is never serialized and is redacted in debug output.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    /// Provider kind: "openai"
    pub kind: String,

    /// Model name
    pub model: String,

    /// API base URL (for OpenAI-compatible gateways)
    pub api_base: Option<String>,

    /// HTTP request timeout in seconds
    pub timeout_secs: u64,

    /// Sampling temperature (0.0 = deterministic)
    pub temperature: f32,

    /// Maximum tokens to generate per photo
    pub max_tokens: usize,

    /// Image fidelity
    pub image_detail: ImageDetail,

    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
}

impl std::fmt::Debug for ProviderSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderSettings")
            .field("kind", &self.kind)
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .field("timeout_secs", &self.timeout_secs)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("image_detail", &self.image_detail)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            kind: "openai".to_string(),
            model: "gpt-4o".to_string(),
            api_base: None,
            timeout_secs: network::DEFAULT_TIMEOUT_SECS,
            temperature: 0.0,
            max_tokens: 1500,
            image_detail: ImageDetail::High,
            api_key: None,
        }
    }
}

// =============================================================================
// Dispatch Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Photos analyzed concurrently per wave
    pub concurrency: usize,

    /// Pause between waves in milliseconds
    pub batch_delay_ms: u64,

    /// Deadline for one photo's provider call, in seconds
    pub photo_timeout_secs: u64,

    /// Extra attempts for retryable provider failures
    pub max_retries: usize,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            concurrency: dispatch::DEFAULT_CONCURRENCY,
            batch_delay_ms: dispatch::DEFAULT_BATCH_DELAY_MS,
            photo_timeout_secs: dispatch::DEFAULT_PHOTO_TIMEOUT_SECS,
            max_retries: dispatch::DEFAULT_MAX_RETRIES,
        }
    }
}

impl DispatchConfig {
    pub fn batch_delay(&self) -> Duration {
        Duration::from_millis(self.batch_delay_ms)
    }

    pub fn photo_timeout(&self) -> Duration {
        Duration::from_secs(self.photo_timeout_secs)
    }
}

// =============================================================================
// Tests
// =============================================================================
