//! Page fetching and article-text extraction for URL input.

use std::time::Duration;

use async_trait::async_trait;
use scraper::{Html, Selector};

use crate::domain::{DomainError, PageFetcher};

/// Hard timeout on the outbound page fetch. Expiry is a recoverable
/// empty-result outcome for the extractor, not a crash.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(15);

/// Real page fetcher using reqwest
#[derive(Debug, Clone)]
pub struct HttpPageFetcher {
    client: reqwest::Client,
}

impl HttpPageFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(FETCH_TIMEOUT)
                .build()
                .expect("Failed to build HTTP client"),
        }
    }
}

impl Default for HttpPageFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, url: &str) -> Result<String, DomainError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DomainError::fetch(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(DomainError::fetch(format!("HTTP {}", response.status())));
        }

        response
            .text()
            .await
            .map_err(|e| DomainError::fetch(format!("Failed to read body: {}", e)))
    }
}

/// Pull readable body text out of an HTML page.
///
/// Prefers paragraph text inside a semantic `<article>` or `<main>` region;
/// falls back to all paragraph and heading text.
pub fn extract_article_text(html: &str) -> String {
    let document = Html::parse_document(html);

    if let Some(text) = region_paragraph_text(&document) {
        return text;
    }

    fallback_text(&document).unwrap_or_default()
}

fn region_paragraph_text(document: &Html) -> Option<String> {
    let paragraph = Selector::parse("p").ok()?;

    for region in ["article", "main"] {
        let selector = Selector::parse(region).ok()?;
        if let Some(root) = document.select(&selector).next() {
            let text: Vec<String> = root
                .select(&paragraph)
                .map(|el| el.text().collect::<String>())
                .collect();
            return Some(text.join(" "));
        }
    }

    None
}

fn fallback_text(document: &Html) -> Option<String> {
    let selector = Selector::parse("p, h1, h2, h3").ok()?;

    let text: Vec<String> = document
        .select(&selector)
        .map(|el| el.text().collect::<String>())
        .collect();
    Some(text.join(" "))
}
