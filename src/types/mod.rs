pub mod error;
pub mod listing;
pub mod photo;

pub use error::{
    AnalysisError, ErrorCategory, ErrorClassifier, LensError, ProviderError, Result,
};
pub use listing::{CompetitiveTier, ListingAnalysis, RankedRecommendation};
pub use photo::{
    EnhancementRecommendation, PhotoAnalysis, RoomType, ToolId, clamp_hero_potential,
    clamp_score, format_impact, is_hero_candidate, weighted_overall_score,
};
