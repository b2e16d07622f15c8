//! Prompt Builder System
//!
//! Standardized prompt construction for vision provider requests.
//!
//! The photo analysis prompt is assembled once from the scoring rubric and the
//! closed vocabularies ([`RoomType::ALL`], [`ToolId::KNOWN`]) so the prompt can
//! never drift from the values the response parser accepts.

use std::sync::LazyLock;

use crate::constants::scoring;
use crate::types::{RoomType, ToolId};

/// Prompt section types
#[derive(Debug, Clone)]
pub enum PromptSection {
    /// Role definition with expertise area
    Role { expertise: String, task: String },
    /// Numbered objectives
    Objectives(Vec<String>),
    /// Raw text section with optional header
    Text {
        header: Option<String>,
        content: String,
    },
    /// Code block with language
    Code { language: String, content: String },
    /// Focus enforcement with restrictions
    Focus {
        target: String,
        restrictions: Vec<String>,
    },
}

/// Prompt builder for consistent prompt construction
#[derive(Debug, Clone, Default)]
pub struct PromptBuilder {
    sections: Vec<PromptSection>,
}

impl PromptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a role definition section
    pub fn role(mut self, expertise: &str, task: &str) -> Self {
        self.sections.push(PromptSection::Role {
            expertise: expertise.to_string(),
            task: task.to_string(),
        });
        self
    }

    /// Add objectives section
    pub fn objectives(mut self, objectives: Vec<&str>) -> Self {
        self.sections.push(PromptSection::Objectives(
            objectives.into_iter().map(String::from).collect(),
        ));
        self
    }

    /// Add text section with header
    pub fn section(mut self, header: &str, content: &str) -> Self {
        self.sections.push(PromptSection::Text {
            header: Some(header.to_string()),
            content: content.to_string(),
        });
        self
    }

    /// Add code block
    pub fn code(mut self, language: &str, content: &str) -> Self {
        self.sections.push(PromptSection::Code {
            language: language.to_string(),
            content: content.to_string(),
        });
        self
    }

    /// Add focus enforcement section
    pub fn focus(mut self, target: &str, restrictions: Vec<&str>) -> Self {
        self.sections.push(PromptSection::Focus {
            target: target.to_string(),
            restrictions: restrictions.into_iter().map(String::from).collect(),
        });
        self
    }

    /// Build the final prompt string
    pub fn build(self) -> String {
        let mut prompt = String::new();

        for section in self.sections {
            match section {
                PromptSection::Role { expertise, task } => {
                    prompt.push_str("<ROLE>\n");
                    prompt.push_str(&format!(
                        "You are an expert {} specializing in {}.\n",
                        expertise, task
                    ));
                    prompt.push_str("</ROLE>\n\n");
                }
                PromptSection::Objectives(objectives) => {
                    prompt.push_str("<OBJECTIVES>\n");
                    for (i, obj) in objectives.iter().enumerate() {
                        prompt.push_str(&format!("{}. {}\n", i + 1, obj));
                    }
                    prompt.push_str("</OBJECTIVES>\n\n");
                }
                PromptSection::Text { header, content } => {
                    if let Some(h) = header {
                        prompt.push_str(&format!("# {}\n\n", h));
                    }
                    prompt.push_str(&content);
                    prompt.push_str("\n\n");
                }
                PromptSection::Code { language, content } => {
                    prompt.push_str(&format!("```{}\n", language));
                    prompt.push_str(&content);
                    prompt.push_str("\n```\n\n");
                }
                PromptSection::Focus {
                    target,
                    restrictions,
                } => {
                    prompt.push_str("<FOCUS>\n");
                    prompt.push_str(&format!("IMPORTANT: Focus EXCLUSIVELY on: {}\n", target));
                    for restriction in restrictions {
                        prompt.push_str(&format!("- {}\n", restriction));
                    }
                    prompt.push_str("</FOCUS>\n\n");
                }
            }
        }

        prompt.trim_end().to_string()
    }
}

/// Preset prompt templates
pub struct PromptTemplates;

impl PromptTemplates {
    /// Template for scoring a single listing photo
    pub fn photo_analysis() -> PromptBuilder {
        let room_types = RoomType::ALL
            .iter()
            .map(RoomType::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        let tool_ids = ToolId::KNOWN
            .iter()
            .map(|tool| format!("{} ({})", tool.as_str(), tool.display_name()))
            .collect::<Vec<_>>()
            .join("\n- ");

        PromptBuilder::new()
            .role(
                "real estate photographer and listing marketer",
                "judging how well property photos sell a home",
            )
            .objectives(vec![
                "Score the photo on lighting, composition, clarity and buyer appeal",
                "Identify the room or view shown",
                "Rate how well the photo would work as the listing's first image",
                "Recommend the enhancements that would lift this photo the most",
            ])
            .section(
                "Scoring Rubric",
                &format!(
                    "- lightingScore (0-100): exposure, natural light, shadows, color temperature\n\
                     - compositionScore (0-100): framing, angles, straight verticals, visual balance\n\
                     - clarityScore (0-100): sharpness, focus, noise, resolution\n\
                     - appealScore (0-100): staging, cleanliness, emotional pull for buyers\n\
                     - overallScore (0-100): holistic quality of the photo\n\
                     - heroPotential ({}-{}): suitability as the first photo buyers see\n\
                     - enhancementPotential (0-100): how much quality enhancement could add",
                    scoring::MIN_HERO_POTENTIAL,
                    scoring::MAX_HERO_POTENTIAL
                ),
            )
            .section(
                "Room Types",
                &format!("roomType MUST be one of: {}", room_types),
            )
            .section(
                "Enhancement Tools",
                &format!(
                    "toolId MUST be one of:\n- {}\n\n\
                     impactEstimate is the expected quality lift in percent. \
                     priority ranks recommendations for this photo, 1 is most urgent.",
                    tool_ids
                ),
            )
            .section("Output Format", "Respond with a JSON object of this shape:")
            .code(
                "json",
                r#"{
  "lightingScore": 0,
  "compositionScore": 0,
  "clarityScore": 0,
  "appealScore": 0,
  "overallScore": 0,
  "roomType": "kitchen",
  "isExterior": false,
  "heroPotential": 1,
  "recommendations": [
    {
      "toolId": "hdr-enhancement",
      "toolName": "HDR Enhancement",
      "priority": 1,
      "impactEstimate": 25,
      "impactDescription": "+25%",
      "reason": "Windows are blown out"
    }
  ],
  "enhancementPotential": 0,
  "aiFeedback": "One or two sentences for the listing agent"
}"#,
            )
            .focus(
                "the attached photo",
                vec![
                    "Respond ONLY with the JSON object, no explanation or markdown",
                    "Do NOT invent room types or tool IDs outside the lists above",
                    "Return an empty recommendations array if the photo needs no work",
                ],
            )
    }
}

/// Fixed instruction prompt sent with every photo
pub static PHOTO_ANALYSIS_PROMPT: LazyLock<String> =
    LazyLock::new(|| PromptTemplates::photo_analysis().build());

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_prompt() {
        let prompt = PromptBuilder::new()
            .role("photo analyst", "listing photography")
            .objectives(vec!["Score photo", "Recommend fixes"])
            .build();

        assert!(prompt.contains("<ROLE>"));
        assert!(prompt.contains("photo analyst"));
        assert!(prompt.contains("1. Score photo"));
        assert!(prompt.contains("2. Recommend fixes"));
    }

    #[test]
    fn test_focus_section() {
        let prompt = PromptBuilder::new()
            .focus("the photo", vec!["Do NOT speculate"])
            .build();

        assert!(prompt.contains("<FOCUS>"));
        assert!(prompt.contains("Do NOT speculate"));
    }

    #[test]
    fn test_photo_prompt_lists_vocabularies() {
        let prompt = PHOTO_ANALYSIS_PROMPT.as_str();

        for room in RoomType::ALL {
            assert!(prompt.contains(room.as_str()), "missing {}", room);
        }
        for tool in ToolId::KNOWN {
            assert!(prompt.contains(tool.as_str()), "missing {}", tool);
        }
        assert!(prompt.contains("heroPotential (1-10)"));
        assert!(prompt.contains("```json"));
        assert!(prompt.contains("Respond ONLY with the JSON object"));
    }
}
