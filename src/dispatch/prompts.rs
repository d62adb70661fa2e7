//! Fixed response texts and prompt construction.
//!
//! Wording is load-bearing: several strings are terminal user-visible
//! responses (policy, gibberish, apologies) and tests pin them.

/// Default transient text for an in-flight request
pub const THINKING: &str = "Thinking...";

/// Rotating transient texts for an in-flight video request
pub const VIDEO_LOADING_MESSAGES: &[&str] = &[
    "Contacting the video director...",
    "Warming up the digital cameras...",
    "Rendering the first few frames...",
    "This can take a minute or two...",
    "Adding special effects...",
    "Finalizing the video render...",
];

/// Fixed response when input is classified as gibberish
pub const GIBBERISH_RESPONSE: &str = "عفوا لم افهم قصدك";

/// Fixed response when the block list matches
pub const POLICY_VIOLATION: &str =
    "This request violates our safety policy and cannot be processed.";

/// Generic settlement for any otherwise-unhandled failure
pub const GENERIC_APOLOGY: &str = "Sorry, an error occurred. Please try again.";

pub const EDIT_CAPTION: &str = "Here is the edited image:";
pub const EDIT_APOLOGY: &str = "Sorry, I could not edit the image.";

pub const IMAGE_CAPTION: &str = "Here's the image you described:";
pub const IMAGE_APOLOGY: &str = "Sorry, I could not generate the image.";

pub const VIDEO_CAPTION: &str = "Here is your generated video:";
pub const VIDEO_APOLOGY: &str = "Failed to generate video.";
pub const VIDEO_TIMEOUT_APOLOGY: &str = "Sorry, video generation timed out. Please try again.";
pub const VIDEO_NEEDS_KEY: &str =
    "Video generation requires an API key. Please select one to continue.";
pub const KEY_SELECTED: &str = "API Key selected. You can now try your video prompt again.";

/// Fallback video prompt when the instruction is empty
pub const DEFAULT_VIDEO_PROMPT: &str = "An interesting and dynamic video.";

/// Spoken when a speech request carries no payload after trigger stripping
pub const TTS_DEFAULT_PHRASE: &str = "You didn't provide anything for me to say!";

/// Style instruction appended to analysis and search prompts
pub const STYLE_INSTRUCTION: &str = "Adopt a creative, deeply insightful, and human-like writing \
style. Draw upon a wide base of knowledge, as if you have digested countless books in Arabic, \
French, and English, to provide nuanced and well-structured answers with rich, human expressions.";

/// Strict plain-text formatting instruction
pub const FORMATTING_INSTRUCTION: &str = "\n\nIMPORTANT: Format the entire response as clean, \
well-structured paragraphs. Do not use any markdown formatting, especially asterisks for lists \
or emphasis. The output should be plain text only.";

/// Safety/style suffix appended to every image generation prompt
pub const IMAGE_SAFETY_SUFFIX: &str =
    "All people in the image must be wearing modest, full-body clothing.";

/// The loading text shown for the given video poll attempt
pub fn video_loading_text(attempt: u32) -> &'static str {
    VIDEO_LOADING_MESSAGES[attempt as usize % VIDEO_LOADING_MESSAGES.len()]
}

/// Prompt for rewriting the last model answer.
///
/// The structural constraints (approximate length preserved, ideas
/// reordered, no verbatim phrase reuse) are encoded in the prompt; they are
/// not checked locally.
pub fn rewrite_prompt(original: &str) -> String {
    format!(
        "Please perform a comprehensive rewrite of the following text. Your goal is to \
completely transform its presentation while preserving the core message. Adhere to these \
strict rules:
1.  **Maintain Length:** The rewritten text must be approximately the same length as the original.
2.  **Reorder Ideas:** Fundamentally change the sequence and flow of the ideas. Do not follow the original structure.
3.  **Unique Phrasing:** Do not copy any expressions or sentence starters from the original text. All phrasing must be new.
4.  **Natural Tone:** Use a natural, blended Arabic vocabulary. Avoid overly formal or exaggerated expressions. The goal is a text that feels authentic and human-written.

Original Text:
\"{}\"",
        original
    )
}

/// Prompt for image generation with the fixed safety suffix
pub fn image_prompt(text: &str) -> String {
    format!("{}. {}", text, IMAGE_SAFETY_SUFFIX)
}

/// Prompt for image analysis with style and formatting instructions
pub fn analysis_prompt(text: &str) -> String {
    format!("{} {} {}", text, STYLE_INSTRUCTION, FORMATTING_INSTRUCTION)
}

/// Prompt for grounded search, anchored to the current timestamp
pub fn search_prompt(text: &str, now: &str) -> String {
    format!(
        "Current date and time is {}. Please provide an up-to-date answer for the following \
user query: \"{}\". {} {}",
        now, text, STYLE_INSTRUCTION, FORMATTING_INSTRUCTION
    )
}

/// Caption for a synthesized speech payload
pub fn tts_caption(payload: &str) -> String {
    format!("Here is the audio for: \"{}\"", payload)
}
