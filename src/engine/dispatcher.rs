//! Bounded Batch Dispatcher
//!
//! Fans photo analyses out in fixed-size waves:
//! - Consecutive chunks of `concurrency` photos run concurrently
//! - Every call in a wave completes before the next wave starts
//! - A pacing delay separates waves (not after the last one)
//!
//! Results are collected in submission order, so `photos[i].photo_index == i`
//! regardless of which call finished first.

use futures::future::join_all;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use crate::ai::VisionAnalysisClient;
use crate::config::DispatchConfig;
use crate::types::{LensError, PhotoAnalysis, Result};

/// Outcome of one dispatched batch
#[derive(Debug, Clone)]
pub struct BatchReport {
    /// One record per input URL, in input order
    pub photos: Vec<PhotoAnalysis>,
    /// Positions that received the default record
    pub fallback_indices: Vec<usize>,
    /// Number of waves dispatched
    pub waves: usize,
}

pub struct BatchDispatcher<'a> {
    client: &'a VisionAnalysisClient,
    concurrency: usize,
    batch_delay: Duration,
}

impl<'a> BatchDispatcher<'a> {
    pub fn new(client: &'a VisionAnalysisClient, config: &DispatchConfig) -> Self {
        Self {
            client,
            concurrency: config.concurrency.max(1),
            batch_delay: config.batch_delay(),
        }
    }

    /// Analyze every URL, substituting the default record for failed photos
    #[instrument(
        skip(self, photo_urls, cancel),
        fields(photos = photo_urls.len(), concurrency = self.concurrency)
    )]
    pub async fn analyze_batch(
        &self,
        photo_urls: &[String],
        cancel: &CancellationToken,
    ) -> Result<BatchReport> {
        let mut photos = Vec::with_capacity(photo_urls.len());
        let mut fallback_indices = Vec::new();
        let mut waves = 0;

        for (chunk_number, chunk) in photo_urls.chunks(self.concurrency).enumerate() {
            if cancel.is_cancelled() {
                return Err(LensError::Cancelled);
            }

            if chunk_number > 0 && !self.batch_delay.is_zero() {
                tokio::select! {
                    _ = cancel.cancelled() => return Err(LensError::Cancelled),
                    _ = tokio::time::sleep(self.batch_delay) => {}
                }
            }

            let chunk_start = chunk_number * self.concurrency;
            debug!(
                wave = chunk_number + 1,
                start = chunk_start,
                size = chunk.len(),
                "Dispatching wave"
            );

            let results = join_all(chunk.iter().enumerate().map(|(offset, url)| {
                self.client.analyze_photo(url, chunk_start + offset, cancel)
            }))
            .await;
            waves += 1;

            if cancel.is_cancelled() {
                return Err(LensError::Cancelled);
            }

            for (offset, result) in results.into_iter().enumerate() {
                let index = chunk_start + offset;
                let analysis = result.unwrap_or_else(|err| {
                    warn!(photo_index = index, "Photo analysis failed, using defaults: {}", err);
                    fallback_indices.push(index);
                    PhotoAnalysis::fallback(&photo_urls[index], index)
                });
                photos.push(analysis);
            }
        }

        info!(
            "Dispatch: Complete ({} photos, {} waves, {} defaulted)",
            photos.len(),
            waves,
            fallback_indices.len()
        );

        Ok(BatchReport {
            photos,
            fallback_indices,
            waves,
        })
    }
}
