//! listinglens - Listing Photo Intelligence Engine
//!
//! Scores every photo of a real-estate listing with a vision model and rolls
//! the results up into a listing-level report.
//!
//! ## Core Features
//!
//! - **Per-photo scoring**: lighting, composition, clarity and appeal, room
//!   type, hero potential and enhancement recommendations
//! - **Bounded dispatch**: fixed-size concurrent waves with pacing, per-photo
//!   timeout, bounded retry and cancellation
//! - **Graceful degradation**: a failed photo gets a neutral default record,
//!   never a failed run
//! - **Marketability**: hero selection, ranked recommendations, days-on-market
//!   estimate and competitive tier
//!
//! ## Quick Start
//!
//! ```ignore
//! use listinglens::{ConfigLoader, ListingPhotoEngine};
//!
//! let config = ConfigLoader::load()?;
//! let engine = ListingPhotoEngine::from_config(&config)?;
//! let analysis = engine.analyze_listing_photos(&photo_urls).await?;
//! println!("{} ({})", analysis.overall_score, analysis.competitive_tier);
//! ```
//!
//! ## Modules
//!
//! - [`ai`]: vision provider abstraction, prompt, response validation
//! - [`engine`]: batch dispatch, aggregation, marketability, cost
//! - [`types`]: photo and listing records, error types
//! - [`config`]: layered configuration

pub mod ai;
pub mod cli;
pub mod config;
pub mod constants;
pub mod engine;
pub mod types;

// =============================================================================
// Core Re-exports
// =============================================================================

// Configuration
pub use config::{Config, ConfigLoader, DispatchConfig, ProviderSettings};

// Error Types
pub use types::error::{AnalysisError, ErrorCategory, LensError, ProviderError, Result};

// Records
pub use types::{
    CompetitiveTier, EnhancementRecommendation, ListingAnalysis, PhotoAnalysis,
    RankedRecommendation, RoomType, ToolId,
};

// =============================================================================
// Engine Re-exports
// =============================================================================

pub use engine::{BatchDispatcher, BatchReport, ListingPhotoEngine, calculate_analysis_cost};

// =============================================================================
// AI Re-exports
// =============================================================================

pub use ai::{
    OpenAiVisionProvider, SharedProvider, VisionAnalysisClient, VisionProvider, VisionResponse,
    create_provider,
};

pub use tokio_util::sync::CancellationToken;
