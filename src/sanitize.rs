//! Gibberish/typo pre-pass applied to text-only submissions.
//!
//! The policy is fail-open: if classification itself fails, the input is
//! treated as valid and dispatch continues with the original text.
//! Sanitization must never block a user who has a working backend.

use crate::capability::CapabilityClient;
use serde::Deserialize;
use tracing::{debug, warn};

/// Classification of raw user input, as reported by the backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputClassification {
    /// Meaningless noise; short-circuits the whole pipeline
    Gibberish,
    /// Comprehensible but mistyped; carries a correction when available
    Typo { corrected: Option<String> },
    Valid,
}

/// Wire shape providers return for the classification call
#[derive(Debug, Deserialize)]
struct RawClassification {
    classification: String,
    #[serde(default)]
    corrected_text: Option<String>,
}

impl InputClassification {
    /// Parse the provider's JSON payload.
    ///
    /// Unknown classification labels are treated as valid, consistent with
    /// the fail-open policy.
    pub fn from_json(payload: &str) -> Self {
        let raw: RawClassification = match serde_json::from_str(payload) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("malformed classification payload, treating as valid: {}", e);
                return InputClassification::Valid;
            }
        };

        match raw.classification.as_str() {
            "GIBBERISH" => InputClassification::Gibberish,
            "TYPO" => InputClassification::Typo {
                corrected: raw.corrected_text.filter(|c| !c.is_empty()),
            },
            "VALID" => InputClassification::Valid,
            other => {
                warn!("unknown classification '{}', treating as valid", other);
                InputClassification::Valid
            }
        }
    }
}

/// Outcome of the sanitization pre-pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SanitizedInput {
    /// Dispatch must not occur; respond with the fixed not-understood text
    Gibberish,
    /// Continue with this (possibly corrected) text
    Text(String),
}

/// Run the pre-pass on trimmed user text.
///
/// Only invoked when no attachment is present.
pub fn sanitize(client: &dyn CapabilityClient, text: &str) -> SanitizedInput {
    match client.classify_input(text) {
        Ok(InputClassification::Gibberish) => {
            debug!("input classified as gibberish");
            SanitizedInput::Gibberish
        }
        Ok(InputClassification::Typo {
            corrected: Some(corrected),
        }) => {
            debug!("typo corrected: {:?} -> {:?}", text, corrected);
            SanitizedInput::Text(corrected)
        }
        Ok(_) => SanitizedInput::Text(text.to_string()),
        Err(e) => {
            warn!("input classification failed, continuing with original: {}", e);
            SanitizedInput::Text(text.to_string())
        }
    }
}
