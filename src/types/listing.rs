//! Listing-level Analysis Types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::photo::{EnhancementRecommendation, PhotoAnalysis};

/// A recommendation attributed to the photo it came from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedRecommendation {
    pub photo_index: usize,
    pub photo_url: String,
    #[serde(flatten)]
    pub recommendation: EnhancementRecommendation,
}

impl RankedRecommendation {
    pub fn impact_estimate(&self) -> f64 {
        self.recommendation.impact_estimate
    }
}

/// Benchmark bucket against comparable listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompetitiveTier {
    #[serde(rename = "top-5")]
    Top5,
    #[serde(rename = "top-15")]
    Top15,
    #[serde(rename = "top-30")]
    Top30,
    Average,
    BelowAverage,
}

impl CompetitiveTier {
    pub fn label(&self) -> &'static str {
        match self {
            CompetitiveTier::Top5 => "Top 5%",
            CompetitiveTier::Top15 => "Top 15%",
            CompetitiveTier::Top30 => "Top 30%",
            CompetitiveTier::Average => "Average",
            CompetitiveTier::BelowAverage => "Below Average",
        }
    }
}

impl fmt::Display for CompetitiveTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Aggregate result for one listing's photo set
///
/// Built once per analysis run and never mutated afterwards. Persisting it is
/// the caller's job.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingAnalysis {
    pub analysis_id: Uuid,
    pub analyzed_at: DateTime<Utc>,
    pub overall_score: u8,
    pub hero_image_index: usize,
    pub hero_image_url: String,
    pub total_photos: usize,
    pub analysis_summary: String,
    pub competitive_tier: CompetitiveTier,
    pub competitive_benchmark: String,
    pub estimated_dom_current: u32,
    pub estimated_dom_optimized: u32,
    pub photo_scores: Vec<PhotoAnalysis>,
    pub top_recommendations: Vec<RankedRecommendation>,
    /// Indices whose record is the default record
    pub fallback_photos: Vec<usize>,
}

impl ListingAnalysis {
    pub fn hero_photo(&self) -> Option<&PhotoAnalysis> {
        self.photo_scores.get(self.hero_image_index)
    }

    pub fn analyzed_photos(&self) -> usize {
        self.total_photos - self.fallback_photos.len()
    }
}
