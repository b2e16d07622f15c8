//! AI Integration Layer
//!
//! Vision provider abstraction, the photo analysis prompt, response
//! validation and the per-photo analysis client built on top of them.

pub mod prompt;
pub mod provider;
pub mod timeout;
pub mod validation;
pub mod vision;

pub use prompt::{PHOTO_ANALYSIS_PROMPT, PromptBuilder, PromptSection, PromptTemplates};
pub use provider::{
    OpenAiVisionProvider, ResponseMetadata, ResponseTiming, SharedProvider, TokenUsage,
    VisionProvider, VisionResponse, create_provider,
};
pub use timeout::with_timeout;
pub use validation::{ParsedAssessment, PhotoAssessment, extract_json_object, parse_assessment};
pub use vision::VisionAnalysisClient;
