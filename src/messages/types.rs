use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sender {
    User,
    Model,
}

/// Encoded image bytes plus the mime type they were produced with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageData {
    pub data: Vec<u8>,
    pub mime_type: String,
}

impl ImageData {
    pub fn new(data: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            data,
            mime_type: mime_type.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Encoded audio returned by speech synthesis. Decoding and playback are
/// the renderer's concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioData {
    pub data: Vec<u8>,
    pub mime_type: String,
}

impl AudioData {
    pub fn new(data: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            data,
            mime_type: mime_type.into(),
        }
    }
}

/// Fetched video media bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoData {
    pub data: Vec<u8>,
}

impl VideoData {
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }
}

/// A grounding citation attached to a search-derived answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub uri: String,
    pub title: String,
}

impl Source {
    pub fn new(uri: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            title: title.into(),
        }
    }
}

/// A single conversation entry, possibly multi-modal and possibly still
/// in flight.
///
/// A message is either in flight (`loading` set, content fields empty) or
/// settled (`loading` cleared, at least one content field populated or the
/// text explains the failure). Placeholders are settled in place by id and
/// never deleted except by conversation reset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
    pub text: Option<String>,
    pub image: Option<ImageData>,
    pub audio: Option<AudioData>,
    pub video: Option<VideoData>,
    pub sources: Vec<Source>,
    pub loading: bool,
    /// Transient text shown while loading (rotated for video requests)
    pub loading_text: Option<String>,
    /// Selects the rotating video loading strings
    pub is_video: bool,
    /// Flags a message that prompts the user to select an API key
    pub needs_api_key: bool,
}

impl Message {
    /// Create a settled user message with optional attached image
    pub fn user(text: impl Into<String>, image: Option<ImageData>) -> Self {
        let text = text.into();
        Self {
            id: Uuid::new_v4(),
            sender: Sender::User,
            timestamp: Utc::now(),
            text: if text.is_empty() { None } else { Some(text) },
            image,
            audio: None,
            video: None,
            sources: Vec::new(),
            loading: false,
            loading_text: None,
            is_video: false,
            needs_api_key: false,
        }
    }

    /// Create a settled model message containing only text
    pub fn model_text(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            sender: Sender::Model,
            timestamp: Utc::now(),
            text: Some(text.into()),
            image: None,
            audio: None,
            video: None,
            sources: Vec::new(),
            loading: false,
            loading_text: None,
            is_video: false,
            needs_api_key: false,
        }
    }

    /// Create an in-flight model placeholder to be settled later by id
    pub fn placeholder(is_video: bool, loading_text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            sender: Sender::Model,
            timestamp: Utc::now(),
            text: None,
            image: None,
            audio: None,
            video: None,
            sources: Vec::new(),
            loading: true,
            loading_text: Some(loading_text.into()),
            is_video,
            needs_api_key: false,
        }
    }

    /// Whether this message is a valid rewrite target: a settled model
    /// message with non-empty text that is not an API-key prompt.
    pub fn is_rewrite_target(&self) -> bool {
        self.sender == Sender::Model
            && !self.loading
            && !self.needs_api_key
            && self.text.as_deref().is_some_and(|t| !t.is_empty())
    }
}

/// The final content merged into a placeholder when a request settles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettledContent {
    pub text: Option<String>,
    pub image: Option<ImageData>,
    pub audio: Option<AudioData>,
    pub video: Option<VideoData>,
    pub sources: Vec<Source>,
    pub needs_api_key: bool,
}

impl SettledContent {
    /// Text-only settlement
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// Text settlement that also prompts for an API key
    pub fn needs_api_key(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            needs_api_key: true,
            ..Self::default()
        }
    }

    pub fn with_image(mut self, image: ImageData) -> Self {
        self.image = Some(image);
        self
    }

    pub fn with_audio(mut self, audio: AudioData) -> Self {
        self.audio = Some(audio);
        self
    }

    pub fn with_video(mut self, video: VideoData) -> Self {
        self.video = Some(video);
        self
    }

    pub fn with_sources(mut self, sources: Vec<Source>) -> Self {
        self.sources = sources;
        self
    }
}
