//! Transport contracts for the duplex live voice session.
//!
//! The session is driven by a message channel of [`LiveEvent`]s rather
//! than nested callbacks; capture, encoding, and socket mechanics live
//! behind the traits.

use crate::Result;
use crossbeam_channel::Sender;

/// A mono audio buffer exchanged with the live session
#[derive(Debug, Clone, PartialEq)]
pub struct AudioFrame {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl AudioFrame {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    pub fn duration_seconds(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Events delivered by an open live session
#[derive(Debug, Clone, PartialEq)]
pub enum LiveEvent {
    /// The duplex stream is open and ready
    Opened,

    /// An incoming model audio buffer to schedule for playback
    Audio(AudioFrame),

    /// Incremental transcription of either side of the conversation
    Transcript {
        input: Option<String>,
        output: Option<String>,
    },

    /// An utterance boundary; accumulated transcripts become messages
    TurnComplete,

    /// The session failed; the controller tears down
    Error(String),

    /// The remote side closed the session
    Closed,
}

/// Handle to an open duplex session
pub trait LiveSessionHandle: Send {
    /// Forward a captured audio frame to the remote side
    fn send_audio(&self, frame: &AudioFrame) -> Result<()>;

    /// Close the session; further events may still arrive until `Closed`
    fn close(&self);
}

/// Factory for duplex live sessions
pub trait LiveTransport: Send + Sync {
    /// Open a session, delivering its events on the given channel
    fn open(&self, events: Sender<LiveEvent>) -> Result<Box<dyn LiveSessionHandle>>;
}
