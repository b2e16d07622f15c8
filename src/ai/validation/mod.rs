//! AI Response Validation
//!
//! Turns a vision model's raw text into a typed assessment:
//! - JSON extraction tolerant of code fences and surrounding prose
//! - Schema-checked deserialization with an explicit default outcome
//!
//! ## Design Philosophy
//! - Reject on structural errors (missing or mistyped required fields)
//! - Clamp on range errors (scores outside 0-100, hero potential outside 1-10)

mod assessment;
mod extract;

pub use assessment::{ParsedAssessment, PhotoAssessment, RawRecommendation, parse_assessment};
pub use extract::extract_json_object;
