//! Engine configuration.
//!
//! Centralizes the tunables for dispatch and the live session.

use std::time::Duration;

/// Aspect ratios accepted by the image generation capability
pub const ASPECT_RATIOS: &[&str] = &["1:1", "16:9", "9:16", "4:3", "3:4"];

/// Prebuilt voices accepted by the speech capabilities
pub const VOICES: &[&str] = &["Kore", "Puck", "Charon", "Fenrir", "Zephyr"];

/// Configuration for the chat engine
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Voice used for speech synthesis and the live session
    pub voice: String,

    /// Aspect ratio for generated images
    pub aspect_ratio: String,

    /// Whether the gibberish/typo pre-pass runs on text-only input
    pub enable_sanitizer: bool,

    /// Fixed interval between video operation polls
    pub video_poll_interval: Duration,

    /// Upper bound on video polls before giving up
    pub video_poll_max_attempts: u32,

    /// Sample rate for captured live audio
    pub live_input_sample_rate: u32,

    /// Sample rate for live playback audio
    pub live_output_sample_rate: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            voice: "Zephyr".to_string(),
            aspect_ratio: "1:1".to_string(),
            enable_sanitizer: true,
            video_poll_interval: Duration::from_secs(10),
            video_poll_max_attempts: 90,
            live_input_sample_rate: 16000,
            live_output_sample_rate: 24000,
        }
    }
}

impl EngineConfig {
    /// Set the synthesis voice
    pub fn with_voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = voice.into();
        self
    }

    /// Set the image aspect ratio
    pub fn with_aspect_ratio(mut self, aspect_ratio: impl Into<String>) -> Self {
        self.aspect_ratio = aspect_ratio.into();
        self
    }

    /// Set the video polling interval and attempt bound
    pub fn with_video_polling(mut self, interval: Duration, max_attempts: u32) -> Self {
        self.video_poll_interval = interval;
        self.video_poll_max_attempts = max_attempts;
        self
    }

    /// Disable the gibberish/typo pre-pass
    pub fn without_sanitizer(mut self) -> Self {
        self.enable_sanitizer = false;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if !VOICES.contains(&self.voice.as_str()) {
            return Err(format!("Unknown voice: {}", self.voice));
        }
        if !ASPECT_RATIOS.contains(&self.aspect_ratio.as_str()) {
            return Err(format!("Unsupported aspect ratio: {}", self.aspect_ratio));
        }
        if self.video_poll_max_attempts == 0 {
            return Err("video_poll_max_attempts must be at least 1".to_string());
        }
        if self.live_input_sample_rate == 0 || self.live_output_sample_rate == 0 {
            return Err("Sample rates must be non-zero".to_string());
        }
        Ok(())
    }
}
