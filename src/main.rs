//! Console demo driving the chat pipeline with a canned backend.
//!
//! Runs a few representative submissions through classification and
//! dispatch, then prints the settled conversation.

use anyhow::Result;
use prism::capability::{
    CapabilityClient, CredentialProvider, ModelTier, SearchResponse, VideoOperation, VideoPoll,
};
use prism::config::EngineConfig;
use prism::messages::{
    AudioData, ConversationStore, ImageData, Sender, Source, VideoData,
};
use prism::pipeline::{ChatEvent, ChatPipeline};
use prism::sanitize::InputClassification;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Offline stand-in for the generation backend
struct DemoClient;

impl CapabilityClient for DemoClient {
    fn classify_input(&self, _text: &str) -> prism::Result<InputClassification> {
        Ok(InputClassification::Valid)
    }

    fn generate_text(
        &self,
        _prompt: &str,
        _tier: ModelTier,
        _extended_reasoning: bool,
    ) -> prism::Result<String> {
        Ok("Here is a rewritten version of that answer.".to_string())
    }

    fn analyze_image(&self, _prompt: &str, _image: &ImageData) -> prism::Result<String> {
        Ok("The image shows a demo scene.".to_string())
    }

    fn generate_image(
        &self,
        _prompt: &str,
        _aspect_ratio: &str,
    ) -> prism::Result<Option<ImageData>> {
        Ok(Some(ImageData::new(vec![0x89, 0x50, 0x4E, 0x47], "image/png")))
    }

    fn edit_image(&self, _prompt: &str, _image: &ImageData) -> prism::Result<Option<ImageData>> {
        Ok(Some(ImageData::new(vec![0x89, 0x50, 0x4E, 0x47], "image/png")))
    }

    fn search_web(&self, _prompt: &str) -> prism::Result<SearchResponse> {
        Ok(SearchResponse {
            text: "The capital of France is Paris.".to_string(),
            sources: vec![Source::new("https://example.com/paris", "Paris")],
        })
    }

    fn generate_speech(&self, _text: &str, _voice: &str) -> prism::Result<Option<AudioData>> {
        Ok(Some(AudioData::new(vec![0, 0, 0, 0], "audio/pcm")))
    }

    fn begin_video_generation(
        &self,
        _prompt: &str,
        _image: Option<&ImageData>,
    ) -> prism::Result<VideoOperation> {
        Ok(VideoOperation {
            id: "demo-op".to_string(),
        })
    }

    fn poll_video_generation(&self, _operation: &VideoOperation) -> prism::Result<VideoPoll> {
        Ok(VideoPoll::Complete {
            uri: "https://example.com/demo.mp4".to_string(),
        })
    }

    fn fetch_video(&self, _uri: &str) -> prism::Result<VideoData> {
        Ok(VideoData::new(vec![0, 0, 0, 0x18]))
    }
}

struct DemoCredentials;

impl CredentialProvider for DemoCredentials {
    fn has_usable_credential(&self) -> bool {
        true
    }

    fn prompt_for_credential(&self) -> prism::Result<()> {
        Ok(())
    }
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "prism=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting prism demo");

    let store = ConversationStore::new();
    let config = EngineConfig::default().with_video_polling(Duration::from_millis(10), 3);
    config.validate().map_err(anyhow::Error::msg)?;

    let (pipeline, handle) = ChatPipeline::new(
        Arc::new(DemoClient),
        Arc::new(DemoCredentials),
        store.clone(),
        config,
    );
    let worker = pipeline.start_worker()?;
    let events = handle.event_receiver();

    let submissions = [
        "a red fox in snow",
        "what is the capital of France",
        "read aloud the weather report",
        "generate a video of a sunrise over mountains",
        "rewrite",
    ];

    for text in submissions {
        handle.submit(text, None)?;
        match events.recv_timeout(Duration::from_secs(10))? {
            ChatEvent::SubmissionComplete { id } => {
                info!("submission complete: {:?}", id);
            }
            other => info!("unexpected event: {:?}", other),
        }
    }

    handle.shutdown()?;
    worker.join().ok();

    println!("--- conversation ---");
    for msg in store.get_all() {
        let who = match msg.sender {
            Sender::User => "user",
            Sender::Model => "model",
        };
        let mut extras = Vec::new();
        if msg.image.is_some() {
            extras.push("image");
        }
        if msg.audio.is_some() {
            extras.push("audio");
        }
        if msg.video.is_some() {
            extras.push("video");
        }
        if !msg.sources.is_empty() {
            extras.push("sources");
        }
        let suffix = if extras.is_empty() {
            String::new()
        } else {
            format!(" [{}]", extras.join(", "))
        };
        println!("{:>5}: {}{}", who, msg.text.as_deref().unwrap_or(""), suffix);
    }

    Ok(())
}
