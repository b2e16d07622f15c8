//! Analyze Command
//!
//! Scores a listing's photos and prints the listing analysis.
//!
//! Usage:
//!   listinglens analyze <URL>... [--urls-file FILE] [--concurrency N] [-f json]
//!
//! Ctrl-C cancels the run; no partial analysis is printed.

use std::fs;
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::cli::ui::Output;
use crate::config::ConfigLoader;
use crate::engine::{ListingPhotoEngine, calculate_analysis_cost};
use crate::types::{LensError, ListingAnalysis, Result};

pub struct AnalyzeOptions {
    pub urls: Vec<String>,
    pub urls_file: Option<PathBuf>,
    pub concurrency: Option<usize>,
    pub format: String,
}

pub async fn run(options: AnalyzeOptions) -> Result<()> {
    let urls = collect_urls(options.urls, options.urls_file.as_deref())?;

    let config = ConfigLoader::load()?;
    let mut engine = ListingPhotoEngine::from_config(&config)?;
    if let Some(concurrency) = options.concurrency {
        engine = engine.with_concurrency(concurrency);
    }

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling analysis");
            on_interrupt.cancel();
        }
    });

    let analysis = engine
        .analyze_listing_photos_with_cancel(&urls, &cancel)
        .await?;
    let cost = calculate_analysis_cost(analysis.total_photos);

    if options.format == "json" {
        let report = serde_json::json!({
            "analysis": analysis,
            "cost": cost,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_text(&analysis, cost);
    }

    Ok(())
}

/// Positional URLs followed by the URLs listed in `urls_file`
///
/// The file holds one URL per line; blank lines and `#` comments are skipped.
fn collect_urls(mut urls: Vec<String>, urls_file: Option<&Path>) -> Result<Vec<String>> {
    if let Some(path) = urls_file {
        let content = fs::read_to_string(path).map_err(|e| {
            LensError::Config(format!("Cannot read URL file {}: {}", path.display(), e))
        })?;
        urls.extend(
            content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#'))
                .map(String::from),
        );
    }
    Ok(urls)
}

fn print_text(analysis: &ListingAnalysis, cost: f64) {
    let out = Output::new();

    out.header("Listing Photo Analysis");
    out.score("Overall score", analysis.overall_score);
    out.field("Benchmark", &analysis.competitive_benchmark);
    out.field(
        "Hero photo",
        format!(
            "#{} {}",
            analysis.hero_image_index + 1,
            analysis.hero_image_url
        ),
    );
    out.field(
        "Days on market",
        format!(
            "{} → {} after enhancement",
            analysis.estimated_dom_current, analysis.estimated_dom_optimized
        ),
    );
    println!();
    println!("  {}", analysis.analysis_summary);

    out.section("Photos");
    for photo in &analysis.photo_scores {
        println!(
            "  #{:<3} {}  {:<16} hero {:>2}/10  {}",
            photo.photo_index + 1,
            Output::styled_score(photo.overall_score),
            photo.room_type,
            photo.hero_potential,
            photo.photo_url
        );
    }

    if !analysis.top_recommendations.is_empty() {
        out.section("Top Recommendations");
        for (rank, ranked) in analysis.top_recommendations.iter().enumerate() {
            let rec = &ranked.recommendation;
            println!(
                "  {:>2}. {:<24} photo #{:<3} {:>5}  {}",
                rank + 1,
                rec.tool_name,
                ranked.photo_index + 1,
                rec.impact_description,
                rec.reason
            );
        }
    }

    println!();
    if !analysis.fallback_photos.is_empty() {
        let numbers: Vec<String> = analysis
            .fallback_photos
            .iter()
            .map(|i| format!("#{}", i + 1))
            .collect();
        out.warning(&format!(
            "{} photo(s) could not be analyzed and use default scores: {}",
            numbers.len(),
            numbers.join(", ")
        ));
    }
    out.success(&format!(
        "Analyzed {} photos (cost {:.3})",
        analysis.total_photos, cost
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_collect_urls_from_args_and_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("urls.txt");
        fs::write(
            &path,
            "# listing 42\nhttps://cdn.example.com/b.jpg\n\n  https://cdn.example.com/c.jpg  \n",
        )
        .unwrap();

        let urls = collect_urls(
            vec!["https://cdn.example.com/a.jpg".to_string()],
            Some(path.as_path()),
        )
        .unwrap();

        assert_eq!(
            urls,
            vec![
                "https://cdn.example.com/a.jpg",
                "https://cdn.example.com/b.jpg",
                "https://cdn.example.com/c.jpg",
            ]
        );
    }

    #[test]
    fn test_collect_urls_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("absent.txt");
        let err = collect_urls(Vec::new(), Some(missing.as_path())).unwrap_err();
        assert!(matches!(err, LensError::Config(msg) if msg.contains("absent.txt")));
    }
}
