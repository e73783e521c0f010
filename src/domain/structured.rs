//! Best-effort decoding of structured JSON embedded in model output.
//!
//! Models asked for strict JSON still wrap payloads in markdown code fences or
//! emit something unparseable. Both the claim extractor and the claim verifier
//! decode through here so the tolerance rules stay identical.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;
use thiserror::Error;

static LEADING_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*```(?:json)?\s*").expect("valid fence regex"));

static TRAILING_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*```\s*$").expect("valid fence regex"));

/// Why a payload could not be decoded. Callers map this to their local
/// fallback value; it never crosses a component boundary.
#[derive(Debug, Error)]
#[error("model output is not a valid payload: {0}")]
pub struct PayloadError(#[from] serde_json::Error);

/// Strip a leading ``` (optionally tagged `json`) and a trailing ``` fence.
pub fn strip_code_fences(raw: &str) -> String {
    let stripped = LEADING_FENCE.replace(raw.trim(), "");
    TRAILING_FENCE.replace(&stripped, "").into_owned()
}

/// Decode a JSON payload from raw model output, tolerating code fences.
pub fn decode_payload<T: DeserializeOwned>(raw: &str) -> Result<T, PayloadError> {
    let cleaned = strip_code_fences(raw);
    Ok(serde_json::from_str(&cleaned)?)
}
