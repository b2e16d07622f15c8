//! Per-photo Analysis Types
//!
//! The scored result for one listing photo, the closed room-type set and the
//! enhancement tool vocabulary the provider is allowed to recommend from.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::{fallback, scoring};

// =============================================================================
// Room Type
// =============================================================================

/// Room or view depicted in a photo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum RoomType {
    ExteriorFront,
    ExteriorBack,
    ExteriorAerial,
    ExteriorPool,
    ExteriorYard,
    LivingRoom,
    FamilyRoom,
    Kitchen,
    DiningRoom,
    MasterBedroom,
    Bedroom,
    MasterBathroom,
    Bathroom,
    Office,
    Garage,
    Patio,
    Deck,
    Other,
    #[default]
    Unknown,
}

impl RoomType {
    /// Every room type, in prompt order
    pub const ALL: [RoomType; 19] = [
        RoomType::ExteriorFront,
        RoomType::ExteriorBack,
        RoomType::ExteriorAerial,
        RoomType::ExteriorPool,
        RoomType::ExteriorYard,
        RoomType::LivingRoom,
        RoomType::FamilyRoom,
        RoomType::Kitchen,
        RoomType::DiningRoom,
        RoomType::MasterBedroom,
        RoomType::Bedroom,
        RoomType::MasterBathroom,
        RoomType::Bathroom,
        RoomType::Office,
        RoomType::Garage,
        RoomType::Patio,
        RoomType::Deck,
        RoomType::Other,
        RoomType::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RoomType::ExteriorFront => "exterior-front",
            RoomType::ExteriorBack => "exterior-back",
            RoomType::ExteriorAerial => "exterior-aerial",
            RoomType::ExteriorPool => "exterior-pool",
            RoomType::ExteriorYard => "exterior-yard",
            RoomType::LivingRoom => "living-room",
            RoomType::FamilyRoom => "family-room",
            RoomType::Kitchen => "kitchen",
            RoomType::DiningRoom => "dining-room",
            RoomType::MasterBedroom => "master-bedroom",
            RoomType::Bedroom => "bedroom",
            RoomType::MasterBathroom => "master-bathroom",
            RoomType::Bathroom => "bathroom",
            RoomType::Office => "office",
            RoomType::Garage => "garage",
            RoomType::Patio => "patio",
            RoomType::Deck => "deck",
            RoomType::Other => "other",
            RoomType::Unknown => "unknown",
        }
    }

    pub fn is_exterior(&self) -> bool {
        self.as_str().starts_with("exterior-")
    }

    /// Lenient parse for provider output; anything outside the set is `Unknown`
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or(RoomType::Unknown)
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl std::str::FromStr for RoomType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['_', ' '], "-");
        RoomType::ALL
            .into_iter()
            .find(|room| room.as_str() == normalized)
            .ok_or_else(|| format!("Unknown room type: {}", s))
    }
}

// =============================================================================
// Enhancement Tool
// =============================================================================

/// Enhancement tool identifier
///
/// Identifiers outside [`ToolId::KNOWN`] are carried through verbatim as
/// [`ToolId::Other`] so newer provider vocabularies do not break parsing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ToolId {
    SkyReplacement,
    HdrEnhancement,
    Declutter,
    VirtualStaging,
    TwilightConversion,
    LawnEnhancement,
    PerspectiveCorrection,
    ColorCorrection,
    ObjectRemoval,
    WindowBalance,
    VirtualRenovation,
    Other(String),
}

impl ToolId {
    /// Tool vocabulary offered to the provider
    pub const KNOWN: [ToolId; 11] = [
        ToolId::SkyReplacement,
        ToolId::HdrEnhancement,
        ToolId::Declutter,
        ToolId::VirtualStaging,
        ToolId::TwilightConversion,
        ToolId::LawnEnhancement,
        ToolId::PerspectiveCorrection,
        ToolId::ColorCorrection,
        ToolId::ObjectRemoval,
        ToolId::WindowBalance,
        ToolId::VirtualRenovation,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            ToolId::SkyReplacement => "sky-replacement",
            ToolId::HdrEnhancement => "hdr-enhancement",
            ToolId::Declutter => "declutter",
            ToolId::VirtualStaging => "virtual-staging",
            ToolId::TwilightConversion => "twilight-conversion",
            ToolId::LawnEnhancement => "lawn-enhancement",
            ToolId::PerspectiveCorrection => "perspective-correction",
            ToolId::ColorCorrection => "color-correction",
            ToolId::ObjectRemoval => "object-removal",
            ToolId::WindowBalance => "window-balance",
            ToolId::VirtualRenovation => "virtual-renovation",
            ToolId::Other(id) => id,
        }
    }

    /// Human-readable tool name used when the provider omits one
    pub fn display_name(&self) -> &str {
        match self {
            ToolId::SkyReplacement => "Sky Replacement",
            ToolId::HdrEnhancement => "HDR Enhancement",
            ToolId::Declutter => "Declutter",
            ToolId::VirtualStaging => "Virtual Staging",
            ToolId::TwilightConversion => "Twilight Conversion",
            ToolId::LawnEnhancement => "Lawn Enhancement",
            ToolId::PerspectiveCorrection => "Perspective Correction",
            ToolId::ColorCorrection => "Color Correction",
            ToolId::ObjectRemoval => "Object Removal",
            ToolId::WindowBalance => "Window Balance",
            ToolId::VirtualRenovation => "Virtual Renovation",
            ToolId::Other(id) => id,
        }
    }
}

/// Known ids match after trimming, lowercasing and folding `_` or spaces to `-`.
/// Anything else is kept verbatim.
impl From<String> for ToolId {
    fn from(s: String) -> Self {
        let normalized = s.trim().to_lowercase().replace(['_', ' '], "-");
        ToolId::KNOWN
            .into_iter()
            .find(|tool| tool.as_str() == normalized)
            .unwrap_or(ToolId::Other(s))
    }
}

impl From<&str> for ToolId {
    fn from(s: &str) -> Self {
        ToolId::from(s.to_string())
    }
}

impl From<ToolId> for String {
    fn from(tool: ToolId) -> Self {
        match tool {
            ToolId::Other(id) => id,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ToolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

// =============================================================================
// Enhancement Recommendation
// =============================================================================

/// One suggested fix for a single photo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhancementRecommendation {
    pub tool_id: ToolId,
    pub tool_name: String,
    /// Photo-local urgency, lower is more urgent
    pub priority: u32,
    /// Estimated quality lift in percent; the global ranking key
    pub impact_estimate: f64,
    pub impact_description: String,
    pub reason: String,
}

impl EnhancementRecommendation {
    pub fn new(tool_id: ToolId, impact_estimate: f64) -> Self {
        Self {
            tool_name: tool_id.display_name().to_string(),
            tool_id,
            priority: 1,
            impact_estimate,
            impact_description: format_impact(impact_estimate),
            reason: String::new(),
        }
    }

    pub fn with_priority(mut self, priority: u32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = reason.into();
        self
    }
}

/// Display string for an impact estimate, e.g. `+30%`
pub fn format_impact(impact_estimate: f64) -> String {
    format!("+{}%", impact_estimate.round() as i64)
}

// =============================================================================
// Photo Analysis
// =============================================================================

/// Scored result for one photo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoAnalysis {
    /// Position in the caller's input; the photo's identity downstream
    pub photo_index: usize,
    pub photo_url: String,
    pub lighting_score: u8,
    pub composition_score: u8,
    pub clarity_score: u8,
    pub appeal_score: u8,
    pub overall_score: u8,
    pub room_type: RoomType,
    pub is_exterior: bool,
    /// 1-10 suitability as the listing's first image
    pub hero_potential: u8,
    pub is_hero_candidate: bool,
    pub recommendations: Vec<EnhancementRecommendation>,
    pub enhancement_potential: u8,
    pub ai_feedback: String,
}

impl PhotoAnalysis {
    /// The complete neutral record used when a photo cannot be analyzed
    pub fn fallback(photo_url: impl Into<String>, photo_index: usize) -> Self {
        Self {
            photo_index,
            photo_url: photo_url.into(),
            lighting_score: fallback::SCORE,
            composition_score: fallback::SCORE,
            clarity_score: fallback::SCORE,
            appeal_score: fallback::SCORE,
            overall_score: fallback::SCORE,
            room_type: RoomType::Unknown,
            is_exterior: false,
            hero_potential: fallback::HERO_POTENTIAL,
            is_hero_candidate: false,
            recommendations: Vec::new(),
            enhancement_potential: fallback::ENHANCEMENT_POTENTIAL,
            ai_feedback: fallback::FEEDBACK.to_string(),
        }
    }
}

/// Derived overall score from the four quality axes
pub fn weighted_overall_score(lighting: u8, composition: u8, clarity: u8, appeal: u8) -> u8 {
    let weighted = f64::from(lighting) * scoring::LIGHTING_WEIGHT
        + f64::from(composition) * scoring::COMPOSITION_WEIGHT
        + f64::from(clarity) * scoring::CLARITY_WEIGHT
        + f64::from(appeal) * scoring::APPEAL_WEIGHT;
    clamp_score(weighted)
}

/// Round and clamp a provider value into the 0-100 score range
pub fn clamp_score(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, f64::from(scoring::MAX_SCORE)) as u8
}

/// Round and clamp a provider value into the 1-10 hero potential range
pub fn clamp_hero_potential(value: f64) -> u8 {
    if value.is_nan() {
        return scoring::MIN_HERO_POTENTIAL;
    }
    value.round().clamp(
        f64::from(scoring::MIN_HERO_POTENTIAL),
        f64::from(scoring::MAX_HERO_POTENTIAL),
    ) as u8
}

pub fn is_hero_candidate(hero_potential: u8) -> bool {
    hero_potential >= scoring::HERO_CANDIDATE_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weighted_overall_score() {
        // 80*0.25 + 60*0.25 + 70*0.20 + 90*0.30 = 20 + 15 + 14 + 27
        assert_eq!(weighted_overall_score(80, 60, 70, 90), 76);
        assert_eq!(weighted_overall_score(100, 100, 100, 100), 100);
        assert_eq!(weighted_overall_score(0, 0, 0, 0), 0);
        // 51*0.25 + 50*0.25 + 50*0.20 + 50*0.30 = 50.25
        assert_eq!(weighted_overall_score(51, 50, 50, 50), 50);
    }

    #[test]
    fn test_fallback_record() {
        let record = PhotoAnalysis::fallback("https://cdn.example.com/1.jpg", 4);
        assert_eq!(record.photo_index, 4);
        assert_eq!(record.lighting_score, 50);
        assert_eq!(record.composition_score, 50);
        assert_eq!(record.clarity_score, 50);
        assert_eq!(record.appeal_score, 50);
        assert_eq!(record.overall_score, 50);
        assert_eq!(record.room_type, RoomType::Unknown);
        assert!(!record.is_exterior);
        assert!(!record.is_hero_candidate);
        assert_eq!(record.hero_potential, 5);
        assert!(record.recommendations.is_empty());
        assert_eq!(record.enhancement_potential, 30);
        assert_eq!(record.ai_feedback, "Analysis failed - using default scores");
    }

    #[test]
    fn test_room_type_parse() {
        assert_eq!("kitchen".parse::<RoomType>().unwrap(), RoomType::Kitchen);
        assert_eq!(
            "Exterior_Front".parse::<RoomType>().unwrap(),
            RoomType::ExteriorFront
        );
        assert_eq!(
            "master bedroom".parse::<RoomType>().unwrap(),
            RoomType::MasterBedroom
        );
        assert!("wine-cellar".parse::<RoomType>().is_err());
        assert_eq!(RoomType::parse_lenient("wine-cellar"), RoomType::Unknown);
    }

    #[test]
    fn test_room_type_exterior() {
        assert!(RoomType::ExteriorPool.is_exterior());
        assert!(RoomType::ExteriorAerial.is_exterior());
        assert!(!RoomType::Patio.is_exterior());
        assert!(!RoomType::Unknown.is_exterior());
    }

    #[test]
    fn test_room_type_serde_matches_as_str() {
        for room in RoomType::ALL {
            let json = serde_json::to_string(&room).unwrap();
            assert_eq!(json, format!("\"{}\"", room.as_str()));
        }
    }

    #[test]
    fn test_tool_id_known_and_passthrough() {
        assert_eq!(ToolId::from("sky-replacement"), ToolId::SkyReplacement);
        assert_eq!(ToolId::from("declutter"), ToolId::Declutter);

        let custom = ToolId::from("drone-relight");
        assert_eq!(custom, ToolId::Other("drone-relight".to_string()));
        assert_eq!(custom.as_str(), "drone-relight");

        let json = serde_json::to_string(&custom).unwrap();
        assert_eq!(json, "\"drone-relight\"");
        let back: ToolId = serde_json::from_str("\"hdr-enhancement\"").unwrap();
        assert_eq!(back, ToolId::HdrEnhancement);
    }

    #[test]
    fn test_tool_id_matching_ignores_case_and_separators() {
        assert_eq!(ToolId::from("HDR-Enhancement"), ToolId::HdrEnhancement);
        assert_eq!(ToolId::from(" sky_replacement "), ToolId::SkyReplacement);
        assert_eq!(ToolId::from("Virtual Staging"), ToolId::VirtualStaging);

        let back: ToolId = serde_json::from_str("\"WINDOW_BALANCE\"").unwrap();
        assert_eq!(back, ToolId::WindowBalance);

        let custom = ToolId::from("Drone Relight");
        assert_eq!(custom, ToolId::Other("Drone Relight".to_string()));
    }

    #[test]
    fn test_recommendation_defaults() {
        let rec = EnhancementRecommendation::new(ToolId::VirtualStaging, 29.6);
        assert_eq!(rec.tool_name, "Virtual Staging");
        assert_eq!(rec.impact_description, "+30%");
        assert_eq!(rec.priority, 1);
    }

    #[test]
    fn test_clamping() {
        assert_eq!(clamp_score(120.0), 100);
        assert_eq!(clamp_score(-5.0), 0);
        assert_eq!(clamp_score(72.5), 73);
        assert_eq!(clamp_hero_potential(0.0), 1);
        assert_eq!(clamp_hero_potential(11.0), 10);
        assert!(is_hero_candidate(7));
        assert!(!is_hero_candidate(6));
    }
}
