//! Decode structured records from free-form oracle replies.
//!
//! Models are told to answer with bare JSON but frequently wrap it in a
//! markdown code fence anyway. A leading fence (and its language tag) is
//! removed before decoding; nothing else is repaired.

use serde::de::DeserializeOwned;

/// Strip surrounding whitespace and, if present, a leading code fence.
///
/// Returns the text between the opening fence and the next closing fence
/// (or the end of input), minus a language tag such as `json`.
pub fn strip_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    let body = match rest.find("```") {
        Some(end) => &rest[..end],
        None => rest,
    };

    // Language tag: a word starting with a letter, directly after the fence.
    let tag_len = if body.starts_with(|c: char| c.is_ascii_alphabetic()) {
        body.find(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '+')))
            .unwrap_or(body.len())
    } else {
        0
    };

    body[tag_len..].trim()
}

/// Decode a reply into `T`, keeping the decode error for logging.
pub fn decode<T: DeserializeOwned>(text: &str) -> Result<T, serde_json::Error> {
    serde_json::from_str(strip_fence(text))
}

/// Decode a reply into an untyped JSON value. `None` on any failure.
pub fn parse_record(text: &str) -> Option<serde_json::Value> {
    decode(text).ok()
}

/// Decode a reply straight into a record type. `None` on any failure.
pub fn parse_as<T: DeserializeOwned>(text: &str) -> Option<T> {
    decode(text).ok()
}
