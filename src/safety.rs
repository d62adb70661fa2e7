//! Keyword block list applied to generation and search requests.
//!
//! Deliberate policy notes: the filter runs only for image-generation and
//! search/chat intents (not edit, TTS, or video), and matching is plain
//! case-insensitive substring containment, so "explicitly" matches
//! "explicit". Both are documented behavior, not oversights.

/// Fixed multilingual block list (English and Arabic)
const BLOCKED_TERMS: &[&str] = &[
    "nude", "naked", "explicit", "porn", "sex", "sexy", "erotic", "hentai", "lust", "seductive",
    "عريان", "عاري", "عارية", "إباحي", "جنس", "مثير", "فاضح",
];

/// Whether the lowercased text contains any blocked term
pub fn violates_policy(lowered: &str) -> bool {
    BLOCKED_TERMS.iter().any(|term| lowered.contains(term))
}
