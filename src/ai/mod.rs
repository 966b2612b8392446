//! AI gateway: competitor analysis, copywriting, and product images.
//!
//! Every call resolves to a value. When the key is missing, the request
//! fails, or the response cannot be parsed, the caller gets fixed fallback
//! content wrapped in [`Generated::Fallback`] together with the reason, so the
//! pipeline can report what was substituted without ever failing on it.
//!
//! ## Module Structure
//!
//! - [`client`]: HTTP client for the `generateContent` API
//! - [`prompts`]: Prompt text for each call
//! - [`fallback`]: Content used when a call does not produce a result

pub mod client;
pub mod fallback;
pub mod prompts;

pub use client::GeminiClient;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Why an AI call was replaced by fallback content.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    #[error("no API key configured")]
    MissingApiKey,
    #[error("request failed: {0}")]
    Transport(String),
    #[error("API returned HTTP {0}")]
    Status(u16),
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

/// The outcome of an AI call: the model's answer or substituted content.
#[derive(Debug, Clone, PartialEq)]
pub enum Generated<T> {
    Ai(T),
    Fallback { value: T, reason: FallbackReason },
}

impl<T> Generated<T> {
    pub fn value(&self) -> &T {
        match self {
            Generated::Ai(value) | Generated::Fallback { value, .. } => value,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Generated::Ai(value) | Generated::Fallback { value, .. } => value,
        }
    }

    pub fn fallback_reason(&self) -> Option<&FallbackReason> {
        match self {
            Generated::Ai(_) => None,
            Generated::Fallback { reason, .. } => Some(reason),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.fallback_reason().is_some()
    }
}

/// Where a generated image is placed on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageSlot {
    Hero,
    Detail,
}

impl ImageSlot {
    pub const ALL: [ImageSlot; 2] = [ImageSlot::Hero, ImageSlot::Detail];
}

impl fmt::Display for ImageSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageSlot::Hero => f.write_str("hero"),
            ImageSlot::Detail => f.write_str("detail"),
        }
    }
}

/// Generated images as `data:` URIs. Slots whose request failed are absent.
pub type ImageSet = BTreeMap<ImageSlot, String>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_exposes_value_either_way() {
        let ai = Generated::Ai(3);
        assert_eq!(*ai.value(), 3);
        assert!(!ai.is_fallback());

        let fb = Generated::Fallback {
            value: 4,
            reason: FallbackReason::Status(503),
        };
        assert_eq!(fb.fallback_reason(), Some(&FallbackReason::Status(503)));
        assert_eq!(fb.into_value(), 4);
    }

    #[test]
    fn fallback_reason_messages() {
        assert_eq!(FallbackReason::Status(500).to_string(), "API returned HTTP 500");
        assert_eq!(
            FallbackReason::MissingApiKey.to_string(),
            "no API key configured"
        );
    }
}
