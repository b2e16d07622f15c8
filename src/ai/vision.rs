//! Vision Analysis Client
//!
//! Scores one listing photo: sends the fixed analysis prompt with the photo to
//! the vision provider, then parses and normalizes the answer.
//!
//! ## Failure handling
//!
//! [`VisionAnalysisClient::analyze_photo`] reports every failure as an
//! [`AnalysisError`]. Retryable failures (rate limit, network, transient 5xx,
//! per-attempt timeout) are retried with exponential backoff before giving up.
//! The batch dispatcher substitutes the default record for a failed photo.

use backon::{ExponentialBuilder, Retryable};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::prompt::PHOTO_ANALYSIS_PROMPT;
use super::provider::{SharedProvider, create_provider};
use super::timeout::with_timeout;
use super::validation::{ParsedAssessment, parse_assessment};
use crate::config::{Config, DispatchConfig};
use crate::constants::dispatch;
use crate::types::{AnalysisError, PhotoAnalysis, Result};

/// Per-photo analysis against a shared vision provider
#[derive(Clone)]
pub struct VisionAnalysisClient {
    provider: SharedProvider,
    photo_timeout: Duration,
    max_retries: usize,
}

impl std::fmt::Debug for VisionAnalysisClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VisionAnalysisClient")
            .field("provider", &self.provider.name())
            .field("model", &self.provider.model())
            .field("photo_timeout", &self.photo_timeout)
            .field("max_retries", &self.max_retries)
            .finish()
    }
}

impl VisionAnalysisClient {
    pub fn new(provider: SharedProvider, dispatch: &DispatchConfig) -> Self {
        Self {
            provider,
            photo_timeout: dispatch.photo_timeout(),
            max_retries: dispatch.max_retries,
        }
    }

    /// Build the configured provider and wrap it
    pub fn from_config(config: &Config) -> Result<Self> {
        let provider = create_provider(&config.provider)?;
        Ok(Self::new(provider, &config.dispatch))
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub fn model(&self) -> &str {
        self.provider.model()
    }

    /// Analyze one photo, retrying retryable failures
    ///
    /// Resolves to [`AnalysisError::Cancelled`] as soon as `cancel` fires.
    pub async fn analyze_photo(
        &self,
        photo_url: &str,
        photo_index: usize,
        cancel: &CancellationToken,
    ) -> std::result::Result<PhotoAnalysis, AnalysisError> {
        if cancel.is_cancelled() {
            return Err(AnalysisError::Cancelled);
        }

        let backoff = ExponentialBuilder::default()
            .with_min_delay(Duration::from_millis(dispatch::RETRY_BASE_DELAY_MS))
            .with_max_delay(Duration::from_secs(dispatch::RETRY_MAX_DELAY_SECS))
            .with_max_times(self.max_retries);

        let attempts = (|| self.attempt(photo_url, photo_index))
            .retry(backoff)
            .sleep(tokio::time::sleep)
            .when(AnalysisError::is_retryable)
            .notify(|err: &AnalysisError, delay: Duration| {
                warn!(
                    photo_index,
                    "Photo analysis attempt failed, retrying in {:?}: {}", delay, err
                );
            });

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(AnalysisError::Cancelled),
            result = attempts => result,
        }
    }

    async fn attempt(
        &self,
        photo_url: &str,
        photo_index: usize,
    ) -> std::result::Result<PhotoAnalysis, AnalysisError> {
        let response = with_timeout(
            self.photo_timeout,
            async {
                self.provider
                    .analyze_image(PHOTO_ANALYSIS_PROMPT.as_str(), photo_url)
                    .await
                    .map_err(AnalysisError::from)
            },
            "photo analysis",
        )
        .await?;

        debug!(
            photo_index,
            tokens = response.usage.total(),
            elapsed_ms = response.timing.total_ms,
            "Vision response received"
        );

        match parse_assessment(&response.content) {
            ParsedAssessment::Valid(parsed) => Ok(parsed.into_analysis(photo_url, photo_index)),
            ParsedAssessment::NeedsDefault(reason) => Err(AnalysisError::Malformed(reason)),
        }
    }
}
