//! Listing Photo Engine
//!
//! Orchestrates one listing analysis:
//!
//! ```text
//! URLs → BatchDispatcher (waves of VisionAnalysisClient calls)
//!      → aggregator (overall score, hero, ranked recommendations)
//!      → marketability (DOM estimate, tier, summary)
//!      → ListingAnalysis
//! ```
//!
//! A run always yields a complete `ListingAnalysis` for non-empty input;
//! failed photos carry the default record and are listed in `fallback_photos`.

pub mod aggregator;
pub mod cost;
pub mod dispatcher;
pub mod marketability;

pub use cost::calculate_analysis_cost;
pub use dispatcher::{BatchDispatcher, BatchReport};
pub use marketability::DomEstimate;

use chrono::Utc;
use tokio_util::sync::CancellationToken;
use tracing::info;
use uuid::Uuid;

use crate::ai::VisionAnalysisClient;
use crate::config::{Config, DispatchConfig};
use crate::types::{LensError, ListingAnalysis, Result};

/// Entry point for listing photo analysis
#[derive(Debug, Clone)]
pub struct ListingPhotoEngine {
    client: VisionAnalysisClient,
    dispatch: DispatchConfig,
}

impl ListingPhotoEngine {
    pub fn new(client: VisionAnalysisClient, dispatch: DispatchConfig) -> Self {
        Self { client, dispatch }
    }

    /// Build the engine, including its vision provider, from configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = VisionAnalysisClient::from_config(config)?;
        Ok(Self::new(client, config.dispatch.clone()))
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.dispatch.concurrency = concurrency;
        self
    }

    pub fn client(&self) -> &VisionAnalysisClient {
        &self.client
    }

    /// Analyze every photo of a listing
    pub async fn analyze_listing_photos(&self, photo_urls: &[String]) -> Result<ListingAnalysis> {
        self.analyze_listing_photos_with_cancel(photo_urls, &CancellationToken::new())
            .await
    }

    /// Analyze every photo of a listing, stopping early when `cancel` fires
    pub async fn analyze_listing_photos_with_cancel(
        &self,
        photo_urls: &[String],
        cancel: &CancellationToken,
    ) -> Result<ListingAnalysis> {
        if photo_urls.is_empty() {
            return Err(LensError::NoPhotos);
        }

        info!(
            "Analysis: Starting ({} photos, provider={}, model={})",
            photo_urls.len(),
            self.client.provider_name(),
            self.client.model()
        );

        let report = BatchDispatcher::new(&self.client, &self.dispatch)
            .analyze_batch(photo_urls, cancel)
            .await?;

        let analysis = build_listing_analysis(report);

        info!(
            "Analysis: Complete (overall={}, hero=#{}, tier={}, dom={}→{})",
            analysis.overall_score,
            analysis.hero_image_index + 1,
            analysis.competitive_tier,
            analysis.estimated_dom_current,
            analysis.estimated_dom_optimized
        );

        Ok(analysis)
    }
}

/// Reduce a dispatched batch into the listing-level result
fn build_listing_analysis(report: BatchReport) -> ListingAnalysis {
    let photos = report.photos;

    let overall_score = aggregator::overall_score(&photos);
    let (hero_image_index, hero_image_url) = aggregator::select_hero(&photos)
        .map(|hero| (hero.photo_index, hero.photo_url.clone()))
        .unwrap_or_default();
    let top_recommendations = aggregator::top_recommendations(&photos);

    let dom = marketability::estimate_dom(
        overall_score,
        aggregator::average_enhancement_potential(&photos),
    );
    let competitive_tier = marketability::competitive_tier(overall_score);

    ListingAnalysis {
        analysis_id: Uuid::new_v4(),
        analyzed_at: Utc::now(),
        overall_score,
        hero_image_index,
        hero_image_url,
        total_photos: photos.len(),
        analysis_summary: marketability::analysis_summary(
            overall_score,
            photos.len(),
            top_recommendations.first(),
        ),
        competitive_tier,
        competitive_benchmark: marketability::competitive_benchmark(competitive_tier),
        estimated_dom_current: dom.current,
        estimated_dom_optimized: dom.optimized,
        photo_scores: photos,
        top_recommendations,
        fallback_photos: report.fallback_indices,
    }
}
