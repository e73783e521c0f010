//! Page-fetch contract for URL input.

use async_trait::async_trait;

use super::DomainError;

/// Fetches raw HTML for a URL. Failures are expected and recoverable; the
/// claim extractor downgrades them to an empty claim list.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, DomainError>;
}
