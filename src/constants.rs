//! Global Constants
//!
//! Centralized constants for scoring, dispatch pacing and pricing.
//! All magic numbers should be defined here with documentation.

/// Per-photo scoring constants
pub mod scoring {
    /// Weight of the lighting axis in the derived overall score
    pub const LIGHTING_WEIGHT: f64 = 0.25;

    /// Weight of the composition axis in the derived overall score
    pub const COMPOSITION_WEIGHT: f64 = 0.25;

    /// Weight of the clarity axis in the derived overall score
    pub const CLARITY_WEIGHT: f64 = 0.20;

    /// Weight of the appeal axis in the derived overall score
    pub const APPEAL_WEIGHT: f64 = 0.30;

    /// Upper bound of every 0-100 score
    pub const MAX_SCORE: u8 = 100;

    /// Hero potential range (inclusive)
    pub const MIN_HERO_POTENTIAL: u8 = 1;
    pub const MAX_HERO_POTENTIAL: u8 = 10;

    /// Photos at or above this hero potential are hero candidates
    pub const HERO_CANDIDATE_THRESHOLD: u8 = 7;

    /// Maximum entries in the listing-wide recommendation ranking
    pub const MAX_TOP_RECOMMENDATIONS: usize = 10;
}

/// Default record substituted when a photo cannot be analyzed
pub mod fallback {
    pub const SCORE: u8 = 50;
    pub const HERO_POTENTIAL: u8 = 5;
    pub const ENHANCEMENT_POTENTIAL: u8 = 30;
    pub const FEEDBACK: &str = "Analysis failed - using default scores";
}

/// Days-on-market model constants
pub mod marketability {
    /// Baseline days on market for an average listing
    pub const BASE_DOM_DAYS: f64 = 45.0;

    /// Poor photo quality can stretch DOM by at most this fraction of baseline
    pub const QUALITY_PENALTY_FACTOR: f64 = 0.5;

    /// Enhancement can cut DOM by at most this fraction
    pub const MAX_ENHANCEMENT_REDUCTION: f64 = 0.32;

    /// DOM estimates never drop below one day
    pub const MIN_DOM_DAYS: u32 = 1;
}

/// Batch dispatcher constants
pub mod dispatch {
    /// Photos analyzed concurrently per wave
    pub const DEFAULT_CONCURRENCY: usize = 3;

    /// Pause between waves (milliseconds)
    pub const DEFAULT_BATCH_DELAY_MS: u64 = 500;

    /// Per-photo analysis timeout (seconds)
    pub const DEFAULT_PHOTO_TIMEOUT_SECS: u64 = 60;

    /// Retries for retryable provider failures, per photo
    pub const DEFAULT_MAX_RETRIES: usize = 1;

    /// Base delay for exponential backoff between retries (milliseconds)
    pub const RETRY_BASE_DELAY_MS: u64 = 500;

    /// Maximum delay between retries (seconds)
    pub const RETRY_MAX_DELAY_SECS: u64 = 10;
}

/// Pricing constants
pub mod pricing {
    /// Flat cost of analyzing one photo (currency-agnostic)
    pub const COST_PER_PHOTO: f64 = 0.025;
}

/// HTTP/Network constants
pub mod network {
    /// Default provider request timeout (seconds)
    pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

    /// Connection timeout (seconds)
    pub const CONNECTION_TIMEOUT_SECS: u64 = 30;
}
