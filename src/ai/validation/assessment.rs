//! Photo Assessment Parsing
//!
//! Typed deserialization of the provider's JSON answer. Numeric fields are read
//! as `f64` so out-of-range or fractional values are clamped rather than
//! rejected; only missing or mistyped required fields send a photo to the
//! default record. Optional fields are `Option`s so an explicit `null` reads
//! the same as an absent key.

use serde::Deserialize;
use serde_json::{Map, Value};

use super::extract::extract_json_object;
use crate::constants::fallback;
use crate::types::{
    EnhancementRecommendation, PhotoAnalysis, RoomType, ToolId, clamp_hero_potential,
    clamp_score, format_impact, is_hero_candidate, weighted_overall_score,
};

/// Outcome of parsing one provider answer
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedAssessment {
    Valid(PhotoAssessment),
    /// The answer cannot be used; the reason is logged by the caller
    NeedsDefault(String),
}

/// Provider answer as sent, before clamping and derivation
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoAssessment {
    #[serde(alias = "lighting_score")]
    pub lighting_score: f64,
    #[serde(alias = "composition_score")]
    pub composition_score: f64,
    #[serde(alias = "clarity_score")]
    pub clarity_score: f64,
    #[serde(alias = "appeal_score")]
    pub appeal_score: f64,
    #[serde(default, alias = "overall_score")]
    pub overall_score: Option<f64>,
    #[serde(alias = "room_type")]
    pub room_type: String,
    #[serde(default, alias = "is_exterior")]
    pub is_exterior: Option<bool>,
    #[serde(alias = "hero_potential")]
    pub hero_potential: f64,
    #[serde(default)]
    pub recommendations: Option<Vec<RawRecommendation>>,
    #[serde(default, alias = "enhancement_potential")]
    pub enhancement_potential: Option<f64>,
    #[serde(default, alias = "ai_feedback")]
    pub ai_feedback: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRecommendation {
    #[serde(alias = "tool_id")]
    pub tool_id: String,
    #[serde(default, alias = "tool_name")]
    pub tool_name: Option<String>,
    #[serde(default)]
    pub priority: Option<f64>,
    #[serde(default, alias = "impact_estimate")]
    pub impact_estimate: Option<f64>,
    #[serde(default, alias = "impact_description")]
    pub impact_description: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
}

/// Parse a raw provider answer into a typed assessment
pub fn parse_assessment(raw: &str) -> ParsedAssessment {
    let Some(object) = extract_json_object(raw) else {
        return ParsedAssessment::NeedsDefault("no JSON object in response".to_string());
    };
    parse_assessment_object(object)
}

fn parse_assessment_object(object: Map<String, Value>) -> ParsedAssessment {
    match serde_json::from_value::<PhotoAssessment>(Value::Object(object)) {
        Ok(assessment) => ParsedAssessment::Valid(assessment),
        Err(e) => ParsedAssessment::NeedsDefault(format!("invalid assessment: {}", e)),
    }
}

impl PhotoAssessment {
    /// Clamp, derive and attach identity, producing the stored record
    pub fn into_analysis(self, photo_url: impl Into<String>, photo_index: usize) -> PhotoAnalysis {
        let lighting_score = clamp_score(self.lighting_score);
        let composition_score = clamp_score(self.composition_score);
        let clarity_score = clamp_score(self.clarity_score);
        let appeal_score = clamp_score(self.appeal_score);

        let overall_score = match self.overall_score {
            Some(provided) => clamp_score(provided),
            None => weighted_overall_score(
                lighting_score,
                composition_score,
                clarity_score,
                appeal_score,
            ),
        };

        let room_type = RoomType::parse_lenient(&self.room_type);
        let hero_potential = clamp_hero_potential(self.hero_potential);

        let recommendations = self
            .recommendations
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .map(|(i, raw)| raw.into_recommendation(i))
            .collect();

        PhotoAnalysis {
            photo_index,
            photo_url: photo_url.into(),
            lighting_score,
            composition_score,
            clarity_score,
            appeal_score,
            overall_score,
            is_exterior: room_type.is_exterior() || self.is_exterior.unwrap_or_default(),
            room_type,
            hero_potential,
            is_hero_candidate: is_hero_candidate(hero_potential),
            recommendations,
            enhancement_potential: self
                .enhancement_potential
                .map(clamp_score)
                .unwrap_or(fallback::ENHANCEMENT_POTENTIAL),
            ai_feedback: self.ai_feedback.unwrap_or_default(),
        }
    }
}

impl RawRecommendation {
    fn into_recommendation(self, position: usize) -> EnhancementRecommendation {
        let tool_id = ToolId::from(self.tool_id);
        let impact_estimate = self
            .impact_estimate
            .filter(|impact| impact.is_finite())
            .unwrap_or(0.0);
        let priority = self
            .priority
            .filter(|p| p.is_finite() && *p >= 1.0)
            .map(|p| p.round() as u32)
            .unwrap_or(position as u32 + 1);

        EnhancementRecommendation {
            tool_name: self
                .tool_name
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| tool_id.display_name().to_string()),
            tool_id,
            priority,
            impact_estimate,
            impact_description: self
                .impact_description
                .filter(|desc| !desc.trim().is_empty())
                .unwrap_or_else(|| format_impact(impact_estimate)),
            reason: self.reason.unwrap_or_default(),
        }
    }
}
