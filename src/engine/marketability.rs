//! Marketability Estimation
//!
//! Heuristic days-on-market model plus the benchmark tier and the
//! human-readable summary shown to listing agents.

use crate::constants::marketability::{
    BASE_DOM_DAYS, MAX_ENHANCEMENT_REDUCTION, MIN_DOM_DAYS, QUALITY_PENALTY_FACTOR,
};
use crate::types::{CompetitiveTier, RankedRecommendation};

/// Estimated days on market before and after enhancement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DomEstimate {
    pub current: u32,
    pub optimized: u32,
}

/// Days-on-market estimate from the listing score and mean enhancement potential
///
/// `optimized <= current` and both are at least one day.
pub fn estimate_dom(overall_score: u8, avg_enhancement_potential: f64) -> DomEstimate {
    let quality_factor = f64::from(100 - overall_score.min(100)) / 100.0;
    let current = round_days(BASE_DOM_DAYS * (1.0 + quality_factor * QUALITY_PENALTY_FACTOR));

    let enhancement = if avg_enhancement_potential.is_finite() {
        avg_enhancement_potential.clamp(0.0, 100.0)
    } else {
        0.0
    };
    let improvement = (enhancement / 100.0) * MAX_ENHANCEMENT_REDUCTION;
    let optimized = round_days(f64::from(current) * (1.0 - improvement)).min(current);

    DomEstimate { current, optimized }
}

fn round_days(days: f64) -> u32 {
    (days.round() as u32).max(MIN_DOM_DAYS)
}

pub fn competitive_tier(overall_score: u8) -> CompetitiveTier {
    match overall_score {
        90.. => CompetitiveTier::Top5,
        80..=89 => CompetitiveTier::Top15,
        70..=79 => CompetitiveTier::Top30,
        60..=69 => CompetitiveTier::Average,
        _ => CompetitiveTier::BelowAverage,
    }
}

/// Benchmark sentence for a tier, e.g. `Top 15% - Strong presentation...`
pub fn competitive_benchmark(tier: CompetitiveTier) -> String {
    let description = match tier {
        CompetitiveTier::Top5 => "Exceptional photo quality that stands out in any market",
        CompetitiveTier::Top15 => "Strong presentation that outperforms most comparable listings",
        CompetitiveTier::Top30 => "Above-average photos with room for targeted improvements",
        CompetitiveTier::Average => {
            "Typical photo quality; enhancements could set this listing apart"
        }
        CompetitiveTier::BelowAverage => {
            "Photos are likely costing buyer interest; enhancement is strongly recommended"
        }
    };
    format!("{} - {}", tier.label(), description)
}

/// Agent-facing summary: a verdict by score band plus the single best fix
pub fn analysis_summary(
    overall_score: u8,
    total_photos: usize,
    top_recommendation: Option<&RankedRecommendation>,
) -> String {
    let verdict = match overall_score {
        85.. => "Excellent photo quality",
        70..=84 => "Good photo quality",
        55..=69 => "Average photo quality",
        _ => "Below-average photo quality",
    };

    let mut summary = format!(
        "{} across {} {} (overall score {}/100).",
        verdict,
        total_photos,
        if total_photos == 1 { "photo" } else { "photos" },
        overall_score
    );

    if let Some(top) = top_recommendation {
        summary.push_str(&format!(
            " Top recommendation: apply {} to photo {} for an estimated {} improvement.",
            top.recommendation.tool_name,
            top.photo_index + 1,
            top.recommendation.impact_description
        ));
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EnhancementRecommendation, ToolId};
    use proptest::prelude::*;

    #[test]
    fn test_dom_formula() {
        // 45 * (1 + 0.30 * 0.5) = 51.75
        let estimate = estimate_dom(70, 0.0);
        assert_eq!(estimate.current, 52);
        assert_eq!(estimate.optimized, 52);

        // 52 * (1 - 0.5 * 0.32) = 43.68
        let estimate = estimate_dom(70, 50.0);
        assert_eq!(estimate.optimized, 44);

        assert_eq!(estimate_dom(100, 0.0).current, 45);
        // 45 * 1.5 = 67.5
        assert_eq!(estimate_dom(0, 0.0).current, 68);
    }

    #[test]
    fn test_dom_ignores_bad_enhancement_input() {
        assert_eq!(estimate_dom(80, f64::NAN), estimate_dom(80, 0.0));
        assert_eq!(estimate_dom(80, 250.0), estimate_dom(80, 100.0));
        assert_eq!(estimate_dom(80, -10.0), estimate_dom(80, 0.0));
    }

    proptest! {
        #[test]
        fn prop_optimized_never_exceeds_current(
            overall in 0u8..=100,
            enhancement in 0.0f64..=100.0,
        ) {
            let estimate = estimate_dom(overall, enhancement);
            prop_assert!(estimate.optimized <= estimate.current);
            prop_assert!(estimate.optimized >= 1);
            prop_assert!(estimate.current >= 1);
        }

        #[test]
        fn prop_better_photos_sell_faster(a in 0u8..=100, b in 0u8..=100) {
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(estimate_dom(high, 0.0).current <= estimate_dom(low, 0.0).current);
        }
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(competitive_tier(100), CompetitiveTier::Top5);
        assert_eq!(competitive_tier(90), CompetitiveTier::Top5);
        assert_eq!(competitive_tier(89), CompetitiveTier::Top15);
        assert_eq!(competitive_tier(80), CompetitiveTier::Top15);
        assert_eq!(competitive_tier(70), CompetitiveTier::Top30);
        assert_eq!(competitive_tier(60), CompetitiveTier::Average);
        assert_eq!(competitive_tier(59), CompetitiveTier::BelowAverage);
        assert_eq!(competitive_tier(0), CompetitiveTier::BelowAverage);
    }

    #[test]
    fn test_benchmark_starts_with_label() {
        assert!(competitive_benchmark(CompetitiveTier::Top30).starts_with("Top 30% - "));
        assert!(
            competitive_benchmark(CompetitiveTier::BelowAverage).starts_with("Below Average - ")
        );
    }

    #[test]
    fn test_summary_bands() {
        assert!(analysis_summary(85, 3, None).starts_with("Excellent"));
        assert!(analysis_summary(84, 3, None).starts_with("Good"));
        assert!(analysis_summary(70, 3, None).starts_with("Good"));
        assert!(analysis_summary(55, 3, None).starts_with("Average"));
        assert!(analysis_summary(54, 1, None).starts_with("Below-average"));
        assert!(analysis_summary(54, 1, None).contains("1 photo "));
    }

    #[test]
    fn test_summary_names_top_recommendation() {
        let top = RankedRecommendation {
            photo_index: 1,
            photo_url: "https://cdn.example.com/1.jpg".to_string(),
            recommendation: EnhancementRecommendation::new(ToolId::SkyReplacement, 50.0),
        };
        let summary = analysis_summary(70, 3, Some(&top));

        assert!(summary.contains("Sky Replacement"));
        assert!(summary.contains("photo 2"));
        assert!(summary.contains("+50%"));
    }
}
