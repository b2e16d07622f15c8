//! Analysis Cost

use crate::constants::pricing::COST_PER_PHOTO;

/// Flat price of analyzing `photo_count` photos
pub fn calculate_analysis_cost(photo_count: usize) -> f64 {
    photo_count as f64 * COST_PER_PHOTO
}
