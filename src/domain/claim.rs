//! Claims, verdicts, and per-claim verification results.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Judgment of a claim against retrieved evidence.
///
/// The vocabulary is closed: every value a model produces is normalized into
/// one of these three, with anything unrecognized collapsing to `Uncertain`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    True,
    False,
    #[default]
    Uncertain,
}

impl Verdict {
    /// Normalize a raw verdict string. Case-insensitive; unrecognized values
    /// collapse to `Uncertain`.
    pub fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "true" => Self::True,
            "false" => Self::False,
            _ => Self::Uncertain,
        }
    }

    /// Normalize an arbitrary JSON value. Non-string values collapse to
    /// `Uncertain`.
    pub fn from_value(value: &Value) -> Self {
        value.as_str().map(Self::parse).unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::True => "true",
            Self::False => "false",
            Self::Uncertain => "uncertain",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The outcome of verifying a single claim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimResult {
    pub claim: String,
    pub verdict: Verdict,
    pub reason: String,
    pub sources: Vec<String>,
}

impl ClaimResult {
    /// Upper bound on cited sources per claim.
    pub const MAX_SOURCES: usize = 5;

    pub fn new(claim: impl Into<String>, verdict: Verdict) -> Self {
        Self {
            claim: claim.into(),
            verdict,
            reason: String::new(),
            sources: Vec::new(),
        }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = reason.into();
        self
    }

    pub fn with_sources(mut self, mut sources: Vec<String>) -> Self {
        sources.truncate(Self::MAX_SOURCES);
        self.sources = sources;
        self
    }
}

/// Normalize a model-provided source list.
///
/// Absent or null becomes empty, a bare value is coerced into a one-element
/// list, every element is stringified, and the list is capped at
/// [`ClaimResult::MAX_SOURCES`].
pub fn sources_from_value(value: Value) -> Vec<String> {
    let items = match value {
        Value::Null => return Vec::new(),
        Value::Array(items) => items,
        other => vec![other],
    };

    items
        .into_iter()
        .map(|item| match item {
            Value::String(s) => s,
            other => other.to_string(),
        })
        .take(ClaimResult::MAX_SOURCES)
        .collect()
}
