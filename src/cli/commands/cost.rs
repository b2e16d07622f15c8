//! Cost Command
//!
//! Usage:
//!   listinglens cost <COUNT> [-f json]

use crate::engine::calculate_analysis_cost;
use crate::types::Result;

pub fn run(photo_count: usize, format: &str) -> Result<()> {
    let cost = calculate_analysis_cost(photo_count);

    if format == "json" {
        let report = serde_json::json!({ "photoCount": photo_count, "cost": cost });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Analyzing {} photos costs {:.3}", photo_count, cost);
    }

    Ok(())
}
