//! Timeout Helpers
//!
//! Wraps async operations in a deadline and converts expiry into
//! [`AnalysisError::Timeout`], so a hung provider call resolves like any other
//! failure.
//!
//! ## Usage
//!
//! ```ignore
//! use crate::ai::timeout::with_timeout;
//!
//! let response = with_timeout(
//!     Duration::from_secs(60),
//!     async { provider.analyze_image(prompt, url).await.map_err(AnalysisError::from) },
//!     "photo analysis",
//! ).await?;
//! ```

use std::future::Future;
use std::time::Duration;

use crate::types::AnalysisError;

/// Execute an async operation with a timeout
///
/// Returns [`AnalysisError::Timeout`] if the operation doesn't complete within
/// the specified duration.
pub async fn with_timeout<T, F>(
    timeout: Duration,
    future: F,
    operation_name: &str,
) -> Result<T, AnalysisError>
where
    F: Future<Output = Result<T, AnalysisError>>,
{
    match tokio::time::timeout(timeout, future).await {
        Ok(result) => result,
        Err(_) => {
            tracing::debug!("{} exceeded {:?}", operation_name, timeout);
            Err(AnalysisError::Timeout(timeout))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_with_timeout_passes_inner_error_through() {
        let result = with_timeout(
            Duration::from_secs(1),
            async { Err::<(), _>(AnalysisError::Malformed("no json".into())) },
            "photo analysis",
        )
        .await;
        assert!(matches!(result.unwrap_err(), AnalysisError::Malformed(_)));
    }

    #[tokio::test]
    async fn test_with_timeout_success() {
        let result = with_timeout(
            Duration::from_secs(1),
            async { Ok::<_, AnalysisError>(42) },
            "test operation",
        )
        .await;
        assert_eq!(result.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_with_timeout_expires_as_timeout_error() {
        let result = with_timeout(
            Duration::from_millis(10),
            async {
                tokio::time::sleep(Duration::from_secs(1)).await;
                Ok::<_, AnalysisError>(())
            },
            "photo analysis",
        )
        .await;
        assert!(matches!(
            result.unwrap_err(),
            AnalysisError::Timeout(d) if d == Duration::from_millis(10)
        ));
    }
}
