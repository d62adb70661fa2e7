//! Fixed trigger-phrase tables for intent classification.
//!
//! Matching is substring containment on lowercased text, order-independent
//! within a category. Each table carries English and Arabic literals.

/// Phrases that request an image to be generated
pub const GENERATION_TRIGGERS: &[&str] = &[
    "generate",
    "create",
    "draw",
    "imagine",
    "show me",
    "ارسم",
    "صمم",
    "أنشئ صورة",
    "تخيل",
    "صور لي",
    "توليد صورة",
];

/// Phrases that request speech synthesis
pub const SPEECH_TRIGGERS: &[&str] = &[
    "say",
    "speak",
    "read this",
    "read aloud",
    "قل",
    "تكلم",
    "اقرأ هذا",
    "اقرأ بصوت عال",
];

/// Phrases stripped from a speech request to obtain the payload to
/// synthesize. Slightly wider than the detection list.
const SPEECH_STRIP_TRIGGERS: &[&str] = &[
    "say",
    "speak",
    "read this out",
    "read this",
    "read aloud",
    "قل",
    "تكلم",
    "اقرأ هذا",
    "اقرأ بصوت عال",
];

/// Interrogative/request-verb openers marking an information-seeking query.
/// Matched as a prefix with a trailing space appended.
pub const INFORMATION_TRIGGERS: &[&str] = &[
    "who", "what", "where", "when", "why", "how", "is", "are", "do", "does", "can", "could",
    "should", "would", "list", "explain", "tell me", "summarize", "define", "search for", "find",
    "ما", "ماذا", "أين", "متى", "لماذا", "كيف", "هل", "اشرح", "أخبرني", "لخص", "عرف", "ابحث عن",
];

/// Phrases that request an attached image to be edited
pub const EDIT_TRIGGERS: &[&str] = &[
    "edit", "change", "add", "remove", "filter", "modify", "عدل", "غير", "أضف", "احذف", "فلتر",
    "تعديل",
];

/// Phrases that request video generation
pub const VIDEO_TRIGGERS: &[&str] = &[
    "generate a video",
    "create a video",
    "make a video",
    "animate",
    "فيديو",
    "حرك",
    "أنشئ فيديو",
    "صمم فيديو",
];

/// Phrases that request a rewrite of the previous answer
pub const REWRITE_TRIGGERS: &[&str] = &[
    "rewrite",
    "different style",
    "another way",
    "change the style",
    "rephrase",
    "أعد الكتابة",
    "بطريقة مختلفة",
    "غير الأسلوب",
    "بأسلوب آخر",
];

/// Whether the lowercased text contains any trigger from the table
pub fn contains_any(lowered: &str, triggers: &[&str]) -> bool {
    triggers.iter().any(|t| lowered.contains(t))
}

/// Whether the lowercased text opens with any trigger followed by a space
pub fn starts_with_any(lowered: &str, triggers: &[&str]) -> bool {
    triggers
        .iter()
        .any(|t| lowered.starts_with(&format!("{} ", t)))
}

/// Whitespace word count with empty tokens discarded
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Remove the earliest speech-trigger occurrence from the text and trim.
///
/// Matching is case-insensitive on ASCII; only the first occurrence is
/// removed, mirroring a single non-global replace.
pub fn strip_speech_trigger(text: &str) -> String {
    let lowered = text.to_ascii_lowercase();

    let mut earliest: Option<(usize, usize)> = None;
    for trigger in SPEECH_STRIP_TRIGGERS {
        if let Some(pos) = lowered.find(trigger) {
            let candidate = (pos, trigger.len());
            match earliest {
                // Prefer the earliest match; on ties, the longer trigger
                Some((best_pos, best_len))
                    if pos > best_pos || (pos == best_pos && trigger.len() <= best_len) => {}
                _ => earliest = Some(candidate),
            }
        }
    }

    match earliest {
        Some((pos, len)) => {
            let mut stripped = String::with_capacity(text.len() - len);
            stripped.push_str(&text[..pos]);
            stripped.push_str(&text[pos + len..]);
            stripped.trim().to_string()
        }
        None => text.trim().to_string(),
    }
}
