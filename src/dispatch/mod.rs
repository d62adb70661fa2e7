//! Capability dispatch orchestration.
//!
//! One submission becomes exactly one external request; every path funnels
//! into a single terminal settle of the placeholder message, and no message
//! may remain loading once control returns.

pub mod prompts;

use crate::attachment::Attachment;
use crate::capability::{
    CapabilityClient, CredentialProvider, ModelTier, VideoErrorKind, VideoPoll,
};
use crate::config::EngineConfig;
use crate::intent::{classify, strip_speech_trigger, Intent};
use crate::messages::{ConversationStore, Message, SettledContent};
use crate::safety::violates_policy;
use crate::sanitize::{sanitize, SanitizedInput};
use crate::{PrismError, Result};
use chrono::Local;
use std::sync::Arc;
use std::thread;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Routes a single submission through sanitization, moderation, and
/// classification, then invokes the chosen capability and settles the
/// placeholder.
pub struct Dispatcher {
    client: Arc<dyn CapabilityClient>,
    credentials: Arc<dyn CredentialProvider>,
    store: ConversationStore,
    config: EngineConfig,
}

impl Dispatcher {
    pub fn new(
        client: Arc<dyn CapabilityClient>,
        credentials: Arc<dyn CredentialProvider>,
        store: ConversationStore,
        config: EngineConfig,
    ) -> Self {
        Self {
            client,
            credentials,
            store,
            config,
        }
    }

    pub fn store(&self) -> &ConversationStore {
        &self.store
    }

    /// Process one user submission end to end.
    ///
    /// Appends the user message and a model placeholder, then settles the
    /// placeholder exactly once. Returns the placeholder id, or None for an
    /// empty submission.
    pub fn handle_submission(&self, text: &str, attachment: Option<Attachment>) -> Option<Uuid> {
        let trimmed = text.trim();
        if trimmed.is_empty() && attachment.is_none() {
            return None;
        }

        let user_image = attachment.as_ref().map(|a| a.as_image());
        self.store.add(Message::user(trimmed, user_image));

        // Pre-pass runs only on text-only input
        let (processed, is_gibberish) =
            if self.config.enable_sanitizer && !trimmed.is_empty() && attachment.is_none() {
                match sanitize(self.client.as_ref(), trimmed) {
                    SanitizedInput::Gibberish => (trimmed.to_string(), true),
                    SanitizedInput::Text(text) => (text, false),
                }
            } else {
                (trimmed.to_string(), false)
            };

        let lowered = processed.to_lowercase();
        let has_rewrite_target = self.store.last_rewrite_target().is_some();
        let intent = classify(&lowered, attachment.is_some(), has_rewrite_target);
        debug!(?intent, "classified submission");

        let is_video = intent == Intent::Video;
        let loading_text = if is_video {
            prompts::VIDEO_LOADING_MESSAGES[0]
        } else {
            prompts::THINKING
        };
        let id = self.store.add(Message::placeholder(is_video, loading_text));

        if is_gibberish {
            self.store
                .settle(id, SettledContent::text(prompts::GIBBERISH_RESPONSE));
            return Some(id);
        }

        // Moderation gate: image generation and search/chat only; the
        // edit/TTS/video asymmetry is intentional policy.
        if matches!(intent, Intent::ImageGen | Intent::SearchOrChat) && violates_policy(&lowered) {
            info!("submission blocked by safety policy");
            self.store
                .settle(id, SettledContent::text(prompts::POLICY_VIOLATION));
            return Some(id);
        }

        if let Err(e) = self.dispatch(intent, &processed, attachment.as_ref(), id) {
            error!("dispatch failed: {}", e);
            self.store
                .settle(id, SettledContent::text(prompts::GENERIC_APOLOGY));
        }

        Some(id)
    }

    /// Record that the user selected a credential
    pub fn credential_selected(&self) {
        self.store.add(Message::model_text(prompts::KEY_SELECTED));
    }

    fn dispatch(
        &self,
        intent: Intent,
        text: &str,
        attachment: Option<&Attachment>,
        id: Uuid,
    ) -> Result<()> {
        match intent {
            Intent::Rewrite => self.dispatch_rewrite(id),
            Intent::Video => self.dispatch_video(text, attachment, id),
            Intent::Edit => self.dispatch_edit(text, attachment, id),
            Intent::ImageGen => self.dispatch_image_gen(text, id),
            Intent::Tts => self.dispatch_tts(text, id),
            Intent::Analyze => self.dispatch_analyze(text, attachment, id),
            Intent::SearchOrChat => self.dispatch_search(text, id),
        }
    }

    fn dispatch_rewrite(&self, id: Uuid) -> Result<()> {
        let target = self.store.last_rewrite_target().ok_or_else(|| {
            PrismError::DispatchError("rewrite classified without a target".to_string())
        })?;
        let response = self.client.generate_text(
            &prompts::rewrite_prompt(&target),
            ModelTier::Advanced,
            true,
        )?;
        self.store.settle(id, SettledContent::text(response));
        Ok(())
    }

    fn dispatch_video(&self, text: &str, attachment: Option<&Attachment>, id: Uuid) -> Result<()> {
        if !self.credentials.has_usable_credential() {
            info!("video request without a usable credential");
            self.store
                .settle(id, SettledContent::needs_api_key(prompts::VIDEO_NEEDS_KEY));
            return Ok(());
        }

        let prompt = if text.is_empty() {
            prompts::DEFAULT_VIDEO_PROMPT
        } else {
            text
        };
        let image = attachment.map(|a| a.as_image());
        let operation = self.client.begin_video_generation(prompt, image.as_ref())?;
        info!("video operation started: {}", operation.id);

        for attempt in 1..=self.config.video_poll_max_attempts {
            thread::sleep(self.config.video_poll_interval);
            self.store
                .set_loading_text(id, prompts::video_loading_text(attempt));

            match self.client.poll_video_generation(&operation)? {
                VideoPoll::Pending => continue,
                VideoPoll::Complete { uri } => {
                    let video = self.client.fetch_video(&uri)?;
                    self.store.settle(
                        id,
                        SettledContent::text(prompts::VIDEO_CAPTION).with_video(video),
                    );
                    return Ok(());
                }
                VideoPoll::Failed { error, kind } => {
                    warn!("video generation failed: {}", error);
                    let text = if error.is_empty() {
                        prompts::VIDEO_APOLOGY.to_string()
                    } else {
                        error
                    };
                    let content = if kind == VideoErrorKind::ApiKey {
                        SettledContent::needs_api_key(text)
                    } else {
                        SettledContent::text(text)
                    };
                    self.store.settle(id, content);
                    return Ok(());
                }
            }
        }

        warn!(
            "video operation {} still pending after {} polls, giving up",
            operation.id, self.config.video_poll_max_attempts
        );
        self.store
            .settle(id, SettledContent::text(prompts::VIDEO_TIMEOUT_APOLOGY));
        Ok(())
    }

    fn dispatch_edit(&self, text: &str, attachment: Option<&Attachment>, id: Uuid) -> Result<()> {
        let image = attachment
            .map(|a| a.as_image())
            .ok_or_else(|| PrismError::DispatchError("edit without attachment".to_string()))?;

        let content = match self.client.edit_image(text, &image)? {
            Some(edited) => SettledContent::text(prompts::EDIT_CAPTION).with_image(edited),
            None => SettledContent::text(prompts::EDIT_APOLOGY),
        };
        self.store.settle(id, content);
        Ok(())
    }

    fn dispatch_image_gen(&self, text: &str, id: Uuid) -> Result<()> {
        let prompt = prompts::image_prompt(text);
        let content = match self
            .client
            .generate_image(&prompt, &self.config.aspect_ratio)?
        {
            Some(image) => SettledContent::text(prompts::IMAGE_CAPTION).with_image(image),
            None => SettledContent::text(prompts::IMAGE_APOLOGY),
        };
        self.store.settle(id, content);
        Ok(())
    }

    fn dispatch_tts(&self, text: &str, id: Uuid) -> Result<()> {
        let payload = strip_speech_trigger(text);
        let to_speak = if payload.is_empty() {
            prompts::TTS_DEFAULT_PHRASE
        } else {
            payload.as_str()
        };

        let caption = prompts::tts_caption(&payload);
        let content = match self.client.generate_speech(to_speak, &self.config.voice)? {
            Some(audio) => SettledContent::text(caption).with_audio(audio),
            None => SettledContent::text(caption),
        };
        self.store.settle(id, content);
        Ok(())
    }

    fn dispatch_analyze(&self, text: &str, attachment: Option<&Attachment>, id: Uuid) -> Result<()> {
        let image = attachment
            .map(|a| a.as_image())
            .ok_or_else(|| PrismError::DispatchError("analyze without attachment".to_string()))?;

        let response = self
            .client
            .analyze_image(&prompts::analysis_prompt(text), &image)?;
        self.store.settle(id, SettledContent::text(response));
        Ok(())
    }

    fn dispatch_search(&self, text: &str, id: Uuid) -> Result<()> {
        let now = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        let response = self.client.search_web(&prompts::search_prompt(text, &now))?;
        self.store.settle(
            id,
            SettledContent::text(response.text).with_sources(response.sources),
        );
        Ok(())
    }
}
