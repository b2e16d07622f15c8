//! Score Aggregation
//!
//! Listing-level reductions over the per-photo records: mean overall score,
//! hero photo selection and the listing-wide recommendation ranking.

use std::cmp::Ordering;

use crate::constants::scoring;
use crate::types::{PhotoAnalysis, RankedRecommendation, clamp_score};

/// Rounded mean of the per-photo overall scores (0 for no photos)
pub fn overall_score(photos: &[PhotoAnalysis]) -> u8 {
    if photos.is_empty() {
        return 0;
    }
    let total: f64 = photos.iter().map(|p| f64::from(p.overall_score)).sum();
    clamp_score(total / photos.len() as f64)
}

/// Photo with the highest hero potential; ties go to the earliest photo
pub fn select_hero(photos: &[PhotoAnalysis]) -> Option<&PhotoAnalysis> {
    // `max_by_key` keeps the last maximum, so compare reversed indices
    photos
        .iter()
        .enumerate()
        .max_by_key(|(i, p)| (p.hero_potential, std::cmp::Reverse(*i)))
        .map(|(_, p)| p)
}

/// Mean enhancement potential across photos (0.0 for no photos)
pub fn average_enhancement_potential(photos: &[PhotoAnalysis]) -> f64 {
    if photos.is_empty() {
        return 0.0;
    }
    let total: f64 = photos
        .iter()
        .map(|p| f64::from(p.enhancement_potential))
        .sum();
    total / photos.len() as f64
}

/// Every recommendation of every photo, ranked by impact
///
/// The sort is stable: equal impacts keep photo order, then photo-local order.
/// Non-finite impacts rank last.
pub fn rank_recommendations(photos: &[PhotoAnalysis]) -> Vec<RankedRecommendation> {
    let mut ranked: Vec<RankedRecommendation> = photos
        .iter()
        .flat_map(|photo| {
            photo
                .recommendations
                .iter()
                .map(|rec| RankedRecommendation {
                    photo_index: photo.photo_index,
                    photo_url: photo.photo_url.clone(),
                    recommendation: rec.clone(),
                })
        })
        .collect();

    ranked.sort_by(|a, b| compare_impact_desc(a.impact_estimate(), b.impact_estimate()));
    ranked
}

/// Ranked recommendations truncated to the listing-wide limit
pub fn top_recommendations(photos: &[PhotoAnalysis]) -> Vec<RankedRecommendation> {
    let mut ranked = rank_recommendations(photos);
    ranked.truncate(scoring::MAX_TOP_RECOMMENDATIONS);
    ranked
}

fn compare_impact_desc(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}
