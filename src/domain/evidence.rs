//! Evidence records and the digest rendered into verification prompts.

use serde::{Deserialize, Serialize};

/// Appended whenever the rendered digest is cut at the character budget, so a
/// downstream judge never sees silently truncated evidence.
pub const DIGEST_TRUNCATION_MARKER: &str = "\n\n[Context truncated for length]";

/// Default character budget for a rendered digest.
pub const DEFAULT_DIGEST_MAX_CHARS: usize = 8000;

/// How many excerpts of a record make it into the digest.
const EXCERPTS_PER_RECORD: usize = 2;

/// One normalized web-search result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvidenceRecord {
    pub url: String,
    pub title: Option<String>,
    pub publish_date: Option<String>,
    pub excerpts: Vec<String>,
}

impl EvidenceRecord {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: None,
            publish_date: None,
            excerpts: Vec::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_publish_date(mut self, publish_date: impl Into<String>) -> Self {
        self.publish_date = Some(publish_date.into());
        self
    }

    pub fn with_excerpts(mut self, excerpts: Vec<String>) -> Self {
        self.excerpts = excerpts;
        self
    }
}

/// Render evidence records into a bounded, model-readable block.
///
/// Each record becomes a `[Source N]` block with title (falling back to the
/// URL), URL, publish date (or `unknown`), and its first two excerpts joined
/// by a blank line. Blocks are separated by blank lines. When the rendering
/// exceeds `max_chars` it is cut at that character boundary and
/// [`DIGEST_TRUNCATION_MARKER`] is appended.
pub fn render_digest(records: &[EvidenceRecord], max_chars: usize) -> String {
    let blocks: Vec<String> = records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let title = record
                .title
                .as_deref()
                .filter(|t| !t.is_empty())
                .unwrap_or(&record.url);
            let publish_date = record.publish_date.as_deref().unwrap_or("unknown");
            let excerpts = record
                .excerpts
                .iter()
                .take(EXCERPTS_PER_RECORD)
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join("\n\n");

            format!(
                "[Source {}]\nTitle: {}\nURL: {}\nPublish date: {}\n\nExcerpts:\n{}",
                index + 1,
                title,
                record.url,
                publish_date,
                excerpts
            )
        })
        .collect();

    let digest = blocks.join("\n\n");
    if digest.chars().count() > max_chars {
        let truncated: String = digest.chars().take(max_chars).collect();
        format!("{truncated}{DIGEST_TRUNCATION_MARKER}")
    } else {
        digest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(url: &str) -> EvidenceRecord {
        EvidenceRecord::new(url)
            .with_title(format!("Title for {url}"))
            .with_publish_date("2024-01-15")
            .with_excerpts(vec!["first excerpt".into(), "second excerpt".into()])
    }

    #[test]
    fn test_digest_block_shape() {
        let digest = render_digest(&[record("http://example.com")], DEFAULT_DIGEST_MAX_CHARS);

        assert!(digest.starts_with("[Source 1]"));
        assert!(digest.contains("Title: Title for http://example.com"));
        assert!(digest.contains("URL: http://example.com"));
        assert!(digest.contains("Publish date: 2024-01-15"));
        assert!(digest.contains("Excerpts:\nfirst excerpt\n\nsecond excerpt"));
    }

    #[test]
    fn test_digest_indexes_are_one_based() {
        let digest = render_digest(
            &[record("http://a"), record("http://b")],
            DEFAULT_DIGEST_MAX_CHARS,
        );

        assert!(digest.contains("[Source 1]"));
        assert!(digest.contains("[Source 2]"));
    }

    #[test]
    fn test_digest_falls_back_to_url_for_missing_title() {
        let digest = render_digest(
            &[EvidenceRecord::new("http://no-title.example")],
            DEFAULT_DIGEST_MAX_CHARS,
        );

        assert!(digest.contains("Title: http://no-title.example"));
        assert!(digest.contains("Publish date: unknown"));
    }

    #[test]
    fn test_digest_uses_first_two_excerpts_only() {
        let record = EvidenceRecord::new("http://a").with_excerpts(vec![
            "one".into(),
            "two".into(),
            "three".into(),
        ]);
        let digest = render_digest(&[record], DEFAULT_DIGEST_MAX_CHARS);

        assert!(digest.contains("one\n\ntwo"));
        assert!(!digest.contains("three"));
    }

    #[test]
    fn test_digest_truncation_appends_marker() {
        let long = "x".repeat(500);
        let records: Vec<EvidenceRecord> = (0..5)
            .map(|i| EvidenceRecord::new(format!("http://s{i}")).with_excerpts(vec![long.clone()]))
            .collect();

        let max_chars = 300;
        let digest = render_digest(&records, max_chars);

        assert!(digest.ends_with(DIGEST_TRUNCATION_MARKER));
        assert_eq!(
            digest.chars().count(),
            max_chars + DIGEST_TRUNCATION_MARKER.chars().count()
        );
    }

    #[test]
    fn test_digest_under_budget_is_untouched() {
        let digest = render_digest(&[record("http://a")], DEFAULT_DIGEST_MAX_CHARS);
        assert!(!digest.contains("[Context truncated for length]"));
    }

    #[test]
    fn test_digest_of_no_records_is_empty() {
        assert_eq!(render_digest(&[], DEFAULT_DIGEST_MAX_CHARS), "");
    }
}
