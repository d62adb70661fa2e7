//! Ordered rule cascade mapping user input to a capability intent.
//!
//! This is deliberately a deterministic, auditable set of keyword rules,
//! not a learned classifier. Rules are evaluated in strict precedence
//! order; each predicate is reached only if all prior ones are false, so
//! the categories are mutually exclusive by construction.

use super::triggers::{
    contains_any, starts_with_any, word_count, EDIT_TRIGGERS, GENERATION_TRIGGERS,
    INFORMATION_TRIGGERS, REWRITE_TRIGGERS, SPEECH_TRIGGERS, VIDEO_TRIGGERS,
};

/// Maximum word count for the implicit image-description fallback
const IMPLICIT_IMAGE_MAX_WORDS: usize = 14;

/// The single capability category chosen for a submission.
///
/// Derived per submission and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Rewrite the last eligible model answer in a different style
    Rewrite,
    /// Edit the attached image per the text instruction
    Edit,
    /// Generate a video, optionally animating the attached image
    Video,
    /// Generate an image from the text description
    ImageGen,
    /// Synthesize speech for the text payload
    Tts,
    /// Analyze the attached image, using the text as the question
    Analyze,
    /// Grounded web search / general chat (default)
    SearchOrChat,
}

/// Classify lowercased input into exactly one intent.
///
/// `has_attachment` reflects the pending file slot; `has_rewrite_target`
/// whether a prior settled, non-API-key-prompt model message with text
/// exists.
pub fn classify(lowered: &str, has_attachment: bool, has_rewrite_target: bool) -> Intent {
    // Rewrite outranks everything, including moderation, but only with an
    // eligible target; otherwise the phrase falls through to normal rules.
    if has_rewrite_target && contains_any(lowered, REWRITE_TRIGGERS) {
        return Intent::Rewrite;
    }

    if has_attachment && contains_any(lowered, EDIT_TRIGGERS) {
        return Intent::Edit;
    }

    if contains_any(lowered, VIDEO_TRIGGERS) || (has_attachment && lowered.contains("animate")) {
        return Intent::Video;
    }

    if contains_any(lowered, GENERATION_TRIGGERS) {
        return Intent::ImageGen;
    }

    // Short, keyword-free text with no attachment is assumed to be a terse
    // image description. This is the most failure-prone rule: "hello" lands
    // here by policy.
    let words = word_count(lowered);
    if !has_attachment
        && !contains_any(lowered, SPEECH_TRIGGERS)
        && !starts_with_any(lowered, INFORMATION_TRIGGERS)
        && (1..=IMPLICIT_IMAGE_MAX_WORDS).contains(&words)
    {
        return Intent::ImageGen;
    }

    if contains_any(lowered, SPEECH_TRIGGERS) {
        return Intent::Tts;
    }

    if has_attachment {
        return Intent::Analyze;
    }

    Intent::SearchOrChat
}
