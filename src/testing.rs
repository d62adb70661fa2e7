//! Counting mock implementations of the capability, credential, and live
//! transport contracts, shared by the unit tests.

use crate::capability::{
    CapabilityClient, CredentialProvider, ModelTier, SearchResponse, VideoOperation, VideoPoll,
};
use crate::live::transport::{AudioFrame, LiveEvent, LiveSessionHandle, LiveTransport};
use crate::messages::{AudioData, ImageData, Source, VideoData};
use crate::sanitize::InputClassification;
use crate::{PrismError, Result};
use crossbeam_channel::Sender;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Per-capability invocation counters, shared across clones
#[derive(Clone, Default)]
pub struct MockCounters {
    classify: Arc<AtomicUsize>,
    text: Arc<AtomicUsize>,
    analyze: Arc<AtomicUsize>,
    image: Arc<AtomicUsize>,
    edit: Arc<AtomicUsize>,
    search: Arc<AtomicUsize>,
    speech: Arc<AtomicUsize>,
    video_begin: Arc<AtomicUsize>,
    video_poll: Arc<AtomicUsize>,
    video_fetch: Arc<AtomicUsize>,
}

impl MockCounters {
    pub fn classify_calls(&self) -> usize {
        self.classify.load(Ordering::SeqCst)
    }

    pub fn text_calls(&self) -> usize {
        self.text.load(Ordering::SeqCst)
    }

    pub fn analyze_calls(&self) -> usize {
        self.analyze.load(Ordering::SeqCst)
    }

    pub fn image_calls(&self) -> usize {
        self.image.load(Ordering::SeqCst)
    }

    pub fn edit_calls(&self) -> usize {
        self.edit.load(Ordering::SeqCst)
    }

    pub fn search_calls(&self) -> usize {
        self.search.load(Ordering::SeqCst)
    }

    pub fn speech_calls(&self) -> usize {
        self.speech.load(Ordering::SeqCst)
    }

    pub fn video_begin_calls(&self) -> usize {
        self.video_begin.load(Ordering::SeqCst)
    }

    pub fn video_poll_calls(&self) -> usize {
        self.video_poll.load(Ordering::SeqCst)
    }

    pub fn video_fetch_calls(&self) -> usize {
        self.video_fetch.load(Ordering::SeqCst)
    }

    /// Total generation-side calls, excluding the classification pre-pass
    pub fn generation_calls(&self) -> usize {
        self.text_calls()
            + self.analyze_calls()
            + self.image_calls()
            + self.edit_calls()
            + self.search_calls()
            + self.speech_calls()
            + self.video_begin_calls()
    }
}

#[derive(Clone)]
enum ClassifyMode {
    Valid,
    Gibberish,
    Typo(String),
    Fail,
}

/// Scripted backend double.
///
/// Every call is counted and its prompt captured; canned responses can be
/// reshaped with the builder methods.
#[derive(Clone)]
pub struct MockClient {
    pub counters: MockCounters,
    classify_mode: ClassifyMode,
    empty_image_results: bool,
    search_fail: bool,
    video_polls: Arc<Mutex<VecDeque<VideoPoll>>>,
    last_text: Arc<Mutex<Option<(String, ModelTier, bool)>>>,
    last_analyze: Arc<Mutex<Option<String>>>,
    last_image: Arc<Mutex<Option<String>>>,
    last_edit: Arc<Mutex<Option<String>>>,
    last_search: Arc<Mutex<Option<String>>>,
    last_speech: Arc<Mutex<Option<String>>>,
    last_video: Arc<Mutex<Option<String>>>,
}

impl MockClient {
    pub fn new() -> Self {
        Self {
            counters: MockCounters::default(),
            classify_mode: ClassifyMode::Valid,
            empty_image_results: false,
            search_fail: false,
            video_polls: Arc::new(Mutex::new(VecDeque::new())),
            last_text: Arc::new(Mutex::new(None)),
            last_analyze: Arc::new(Mutex::new(None)),
            last_image: Arc::new(Mutex::new(None)),
            last_edit: Arc::new(Mutex::new(None)),
            last_search: Arc::new(Mutex::new(None)),
            last_speech: Arc::new(Mutex::new(None)),
            last_video: Arc::new(Mutex::new(None)),
        }
    }

    /// Classify every submission as gibberish
    pub fn with_gibberish_input(mut self) -> Self {
        self.classify_mode = ClassifyMode::Gibberish;
        self
    }

    /// Classify every submission as a typo with the given correction
    pub fn with_typo_correction(mut self, corrected: &str) -> Self {
        self.classify_mode = ClassifyMode::Typo(corrected.to_string());
        self
    }

    /// Make the classification call itself fail
    pub fn with_classify_failure(mut self) -> Self {
        self.classify_mode = ClassifyMode::Fail;
        self
    }

    /// Make image generation and editing return no result
    pub fn with_empty_image_results(mut self) -> Self {
        self.empty_image_results = true;
        self
    }

    /// Make web search return an error
    pub fn with_search_failure(mut self) -> Self {
        self.search_fail = true;
        self
    }

    /// Script the video poll outcomes in order; once the script is
    /// exhausted further polls report pending
    pub fn with_video_polls(self, polls: Vec<VideoPoll>) -> Self {
        *self.video_polls.lock() = polls.into();
        self
    }

    pub fn last_text_request(&self) -> Option<(String, ModelTier, bool)> {
        self.last_text.lock().clone()
    }

    pub fn last_analyze_prompt(&self) -> Option<String> {
        self.last_analyze.lock().clone()
    }

    pub fn last_image_prompt(&self) -> Option<String> {
        self.last_image.lock().clone()
    }

    pub fn last_edit_prompt(&self) -> Option<String> {
        self.last_edit.lock().clone()
    }

    pub fn last_search_prompt(&self) -> Option<String> {
        self.last_search.lock().clone()
    }

    pub fn last_speech_text(&self) -> Option<String> {
        self.last_speech.lock().clone()
    }

    pub fn last_video_prompt(&self) -> Option<String> {
        self.last_video.lock().clone()
    }
}

impl Default for MockClient {
    fn default() -> Self {
        Self::new()
    }
}

impl CapabilityClient for MockClient {
    fn classify_input(&self, _text: &str) -> Result<InputClassification> {
        self.counters.classify.fetch_add(1, Ordering::SeqCst);
        match &self.classify_mode {
            ClassifyMode::Valid => Ok(InputClassification::Valid),
            ClassifyMode::Gibberish => Ok(InputClassification::Gibberish),
            ClassifyMode::Typo(corrected) => Ok(InputClassification::Typo {
                corrected: Some(corrected.clone()),
            }),
            ClassifyMode::Fail => Err(PrismError::CapabilityError(
                "classification unavailable".to_string(),
            )),
        }
    }

    fn generate_text(
        &self,
        prompt: &str,
        tier: ModelTier,
        extended_reasoning: bool,
    ) -> Result<String> {
        self.counters.text.fetch_add(1, Ordering::SeqCst);
        *self.last_text.lock() = Some((prompt.to_string(), tier, extended_reasoning));
        Ok("generated text".to_string())
    }

    fn analyze_image(&self, prompt: &str, _image: &ImageData) -> Result<String> {
        self.counters.analyze.fetch_add(1, Ordering::SeqCst);
        *self.last_analyze.lock() = Some(prompt.to_string());
        Ok("analysis".to_string())
    }

    fn generate_image(&self, prompt: &str, _aspect_ratio: &str) -> Result<Option<ImageData>> {
        self.counters.image.fetch_add(1, Ordering::SeqCst);
        *self.last_image.lock() = Some(prompt.to_string());
        if self.empty_image_results {
            Ok(None)
        } else {
            Ok(Some(ImageData::new(vec![1, 2, 3], "image/png")))
        }
    }

    fn edit_image(&self, prompt: &str, _image: &ImageData) -> Result<Option<ImageData>> {
        self.counters.edit.fetch_add(1, Ordering::SeqCst);
        *self.last_edit.lock() = Some(prompt.to_string());
        if self.empty_image_results {
            Ok(None)
        } else {
            Ok(Some(ImageData::new(vec![4, 5, 6], "image/png")))
        }
    }

    fn search_web(&self, prompt: &str) -> Result<SearchResponse> {
        self.counters.search.fetch_add(1, Ordering::SeqCst);
        *self.last_search.lock() = Some(prompt.to_string());
        if self.search_fail {
            return Err(PrismError::CapabilityError(
                "search backend unavailable".to_string(),
            ));
        }
        Ok(SearchResponse {
            text: "search result".to_string(),
            sources: vec![Source::new("https://example.com/answer", "Example")],
        })
    }

    fn generate_speech(&self, text: &str, _voice: &str) -> Result<Option<AudioData>> {
        self.counters.speech.fetch_add(1, Ordering::SeqCst);
        *self.last_speech.lock() = Some(text.to_string());
        Ok(Some(AudioData::new(vec![9, 9], "audio/pcm")))
    }

    fn begin_video_generation(
        &self,
        prompt: &str,
        _image: Option<&ImageData>,
    ) -> Result<VideoOperation> {
        self.counters.video_begin.fetch_add(1, Ordering::SeqCst);
        *self.last_video.lock() = Some(prompt.to_string());
        Ok(VideoOperation {
            id: "op-1".to_string(),
        })
    }

    fn poll_video_generation(&self, _operation: &VideoOperation) -> Result<VideoPoll> {
        self.counters.video_poll.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .video_polls
            .lock()
            .pop_front()
            .unwrap_or(VideoPoll::Pending))
    }

    fn fetch_video(&self, _uri: &str) -> Result<VideoData> {
        self.counters.video_fetch.fetch_add(1, Ordering::SeqCst);
        Ok(VideoData::new(vec![0xDE, 0xAD]))
    }
}

/// Credential double with a fixed availability answer
#[derive(Clone)]
pub struct MockCredentials {
    usable: bool,
    prompts: Arc<AtomicUsize>,
}

impl MockCredentials {
    pub fn usable() -> Self {
        Self {
            usable: true,
            prompts: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn missing() -> Self {
        Self {
            usable: false,
            prompts: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn prompt_calls(&self) -> usize {
        self.prompts.load(Ordering::SeqCst)
    }
}

impl CredentialProvider for MockCredentials {
    fn has_usable_credential(&self) -> bool {
        self.usable
    }

    fn prompt_for_credential(&self) -> Result<()> {
        self.prompts.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Live transport double; sessions count forwarded frames and closes
#[derive(Clone, Default)]
pub struct MockTransport {
    opens: Arc<AtomicUsize>,
    closes: Arc<AtomicUsize>,
    frames: Arc<AtomicUsize>,
    fail_open: bool,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail_open: true,
            ..Self::default()
        }
    }

    pub fn open_count(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }

    pub fn close_count(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }

    pub fn sent_frames(&self) -> usize {
        self.frames.load(Ordering::SeqCst)
    }
}

impl LiveTransport for MockTransport {
    fn open(&self, _events: Sender<LiveEvent>) -> Result<Box<dyn LiveSessionHandle>> {
        if self.fail_open {
            return Err(PrismError::SessionError(
                "transport refused connection".to_string(),
            ));
        }
        self.opens.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MockSessionHandle {
            closes: Arc::clone(&self.closes),
            frames: Arc::clone(&self.frames),
        }))
    }
}

struct MockSessionHandle {
    closes: Arc<AtomicUsize>,
    frames: Arc<AtomicUsize>,
}

impl LiveSessionHandle for MockSessionHandle {
    fn send_audio(&self, _frame: &AudioFrame) -> Result<()> {
        self.frames.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn close(&self) {
        self.closes.fetch_add(1, Ordering::SeqCst);
    }
}
