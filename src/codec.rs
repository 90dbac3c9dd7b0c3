//! # Design Codec
//!
//! Pure transforms between [`Design`] and its two textual forms:
//!
//! - **Sharing token**: `{layers, furnishings}` as JSON, then URL-safe base64
//!   without padding. Map keys are ordered, so equal designs give equal tokens.
//!   Decoding also accepts standard base64 (`+`, `/`, `=`) from older links,
//!   including the `+` → space damage of query-string decoding.
//! - **Saved history**: a JSON array of full designs (with positions and
//!   timestamp). Appending never rewrites earlier entries: they are carried as
//!   raw JSON. Missing or corrupt history text counts as an empty array.
//!
//! Vocabulary checks are not done here; unknown keys survive decoding and are
//! filtered when a design is applied.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use log::warn;
use serde_json::value::RawValue;

use crate::design::Design;
use crate::errors::DecodeError;
use crate::logutil::preview;

/// Upper bound on accepted token length.
pub const MAX_TOKEN_BYTES: usize = 16 * 1024;

/// Serialize the sharing form of `design` into a URL-safe token.
pub fn encode_for_sharing(design: &Design) -> String {
    let json = serde_json::to_vec(&design.for_sharing()).unwrap_or_else(|_| b"{}".to_vec());
    URL_SAFE_NO_PAD.encode(json)
}

/// Inverse of [`encode_for_sharing`]. Save-time fields in the payload are dropped.
pub fn decode_from_sharing(token: &str) -> Result<Design, DecodeError> {
    let trimmed = token.trim();
    if trimmed.is_empty() {
        return Err(DecodeError::Empty);
    }
    if trimmed.len() > MAX_TOKEN_BYTES {
        return Err(DecodeError::TooLarge {
            limit: MAX_TOKEN_BYTES,
        });
    }
    let normalized: String = trimmed
        .chars()
        .filter_map(|c| match c {
            '+' | ' ' => Some('-'),
            '/' => Some('_'),
            '=' => None,
            c if c.is_whitespace() => None,
            c => Some(c),
        })
        .collect();
    let bytes = URL_SAFE_NO_PAD.decode(normalized)?;
    let design: Design = serde_json::from_slice(&bytes)?;
    Ok(design.for_sharing())
}

/// Share link for `token`: `<base_url>?<param>=<token>`.
pub fn share_url(base_url: &str, param: &str, token: &str) -> String {
    format!("{}?{}={}", base_url, param, urlencoding::encode(token))
}

/// Pull the token for `param` out of a query string or full URL.
pub fn token_from_query(query_or_url: &str, param: &str) -> Option<String> {
    let query = match query_or_url.split_once('?') {
        Some((_, q)) => q,
        None => query_or_url,
    };
    let query = query.split('#').next().unwrap_or_default();
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == param)
        .and_then(|(_, value)| urlencoding::decode(value).ok())
        .map(|value| value.into_owned())
        .filter(|value| !value.is_empty())
}

fn history_entries(existing: Option<&str>) -> Vec<Box<RawValue>> {
    let Some(text) = existing else {
        return Vec::new();
    };
    let cleaned = text.trim_start_matches('\0').trim();
    if cleaned.is_empty() {
        return Vec::new();
    }
    match serde_json::from_str::<Vec<Box<RawValue>>>(cleaned) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(
                "Saved history is corrupt ({}); starting a new one. Was: {}",
                e,
                preview(cleaned)
            );
            Vec::new()
        }
    }
}

/// Append a full design to the saved-history text, returning the new text.
pub fn append_to_saved_history(existing: Option<&str>, design: &Design) -> String {
    let mut entries = history_entries(existing);
    match serde_json::value::to_raw_value(design) {
        Ok(raw) => entries.push(raw),
        Err(e) => warn!("Could not serialize design for history: {}", e),
    }
    serde_json::to_string(&entries).unwrap_or_else(|_| "[]".to_string())
}

/// Designs in the saved history, oldest first. Entries that are not designs are skipped.
pub fn read_saved_history(existing: Option<&str>) -> Vec<Design> {
    history_entries(existing)
        .iter()
        .enumerate()
        .filter_map(|(i, raw)| match serde_json::from_str::<Design>(raw.get()) {
            Ok(design) => Some(design),
            Err(e) => {
                warn!("Skipping saved design #{}: {}", i, e);
                None
            }
        })
        .collect()
}
