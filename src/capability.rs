//! Abstract contracts for the external generation capabilities.
//!
//! Transport, encoding, and provider SDK details live behind these traits;
//! the engine only sees blocking calls with structured results. Implementors
//! wrap whatever backend is in use; tests use counting mocks.

use crate::messages::{AudioData, ImageData, Source, VideoData};
use crate::sanitize::InputClassification;
use crate::Result;

/// Model tier requested for plain text generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelTier {
    /// Fast default tier
    Standard,
    /// Higher-quality tier used for rewrites
    Advanced,
}

/// Result of a grounded web search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResponse {
    pub text: String,
    pub sources: Vec<Source>,
}

/// Handle to an asynchronous long-running video generation operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoOperation {
    pub id: String,
}

/// Classifies a reported video-generation failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoErrorKind {
    /// Authorization / entity-not-found failure, actionable by selecting a key
    ApiKey,
    General,
}

/// Poll outcome for a pending video operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoPoll {
    Pending,
    Complete { uri: String },
    Failed { error: String, kind: VideoErrorKind },
}

/// Blocking interface to the generation backend.
///
/// Calls are made from the pipeline worker thread; at most one text
/// dispatch is in flight at a time.
pub trait CapabilityClient: Send + Sync {
    /// Classify raw input as gibberish, a typo (with correction), or valid
    fn classify_input(&self, text: &str) -> Result<InputClassification>;

    /// Generate plain text for a prompt
    fn generate_text(&self, prompt: &str, tier: ModelTier, extended_reasoning: bool)
        -> Result<String>;

    /// Answer a question about an image
    fn analyze_image(&self, prompt: &str, image: &ImageData) -> Result<String>;

    /// Generate an image; `None` means the backend produced no result
    fn generate_image(&self, prompt: &str, aspect_ratio: &str) -> Result<Option<ImageData>>;

    /// Edit an image per the instruction; `None` means no result
    fn edit_image(&self, prompt: &str, image: &ImageData) -> Result<Option<ImageData>>;

    /// Grounded web search returning text plus citations
    fn search_web(&self, prompt: &str) -> Result<SearchResponse>;

    /// Synthesize speech; `None` means no result
    fn generate_speech(&self, text: &str, voice: &str) -> Result<Option<AudioData>>;

    /// Start a long-running video generation operation
    fn begin_video_generation(
        &self,
        prompt: &str,
        image: Option<&ImageData>,
    ) -> Result<VideoOperation>;

    /// Poll a pending video operation for completion
    fn poll_video_generation(&self, operation: &VideoOperation) -> Result<VideoPoll>;

    /// Fetch generated video media by uri
    fn fetch_video(&self, uri: &str) -> Result<VideoData>;
}

/// Access to the out-of-band credential used to gate video generation
pub trait CredentialProvider: Send + Sync {
    /// Whether a usable credential is currently selected
    fn has_usable_credential(&self) -> bool;

    /// Block until the user has selected a credential
    fn prompt_for_credential(&self) -> Result<()>;
}
