//! Live voice session controller.
//!
//! A parallel, independent subsystem: entered only by explicit user
//! action and mutually exclusive with text dispatch (enforced through a
//! shared gate flag). The session is an explicit state machine driven by
//! a [`LiveEvent`] channel; every exit path runs the same teardown.

use super::playback::PlaybackScheduler;
use super::transport::{AudioFrame, LiveEvent, LiveSessionHandle, LiveTransport};
use crate::messages::{ConversationStore, Message};
use crate::Result;
use crossbeam_channel::{bounded, Receiver, Sender, TryRecvError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const STATUS_IDLE: &str = "Idle. Press the microphone to start a live conversation.";
pub const STATUS_CONNECTING: &str = "Connecting...";
pub const STATUS_ACTIVE: &str = "Connected. Speak now.";
pub const STATUS_ERROR: &str = "Error. Please try again.";

const LIVE_STARTED_MESSAGE: &str = "Live conversation started. I'm listening...";

/// Live session lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiveState {
    Idle,
    Connecting,
    Active,
}

/// Owns the session handle, playback scheduling, and transcript buffers
/// for one live conversation at a time.
pub struct LiveSessionController {
    transport: Arc<dyn LiveTransport>,
    store: ConversationStore,
    state: LiveState,
    status: String,
    session: Option<Box<dyn LiveSessionHandle>>,
    scheduler: PlaybackScheduler,
    input_transcript: String,
    output_transcript: String,
    event_tx: Sender<LiveEvent>,
    event_rx: Receiver<LiveEvent>,
    /// Shared with the dispatch pipeline to disable text sending
    gate: Arc<AtomicBool>,
}

impl LiveSessionController {
    pub fn new(
        transport: Arc<dyn LiveTransport>,
        store: ConversationStore,
        gate: Arc<AtomicBool>,
    ) -> Self {
        let (event_tx, event_rx) = bounded(256);
        Self {
            transport,
            store,
            state: LiveState::Idle,
            status: STATUS_IDLE.to_string(),
            session: None,
            scheduler: PlaybackScheduler::new(),
            input_transcript: String::new(),
            output_transcript: String::new(),
            event_tx,
            event_rx,
            gate,
        }
    }

    pub fn state(&self) -> LiveState {
        self.state
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn is_active(&self) -> bool {
        self.state != LiveState::Idle
    }

    /// Start a live conversation.
    ///
    /// No-op when already connecting or active.
    pub fn start(&mut self) -> Result<()> {
        if self.is_active() {
            warn!("live session already active");
            return Ok(());
        }

        self.store.add(Message::model_text(LIVE_STARTED_MESSAGE));
        self.state = LiveState::Connecting;
        self.status = STATUS_CONNECTING.to_string();
        self.gate.store(true, Ordering::SeqCst);

        match self.transport.open(self.event_tx.clone()) {
            Ok(session) => {
                self.session = Some(session);
                info!("live session opening");
                Ok(())
            }
            Err(e) => {
                warn!("failed to open live session: {}", e);
                self.teardown(STATUS_ERROR);
                Err(e)
            }
        }
    }

    /// Explicitly stop the conversation
    pub fn stop(&mut self) {
        if self.is_active() {
            info!("live session stopped by user");
        }
        self.teardown(STATUS_IDLE);
    }

    /// Forward a captured audio frame to the session.
    ///
    /// Frames arriving outside an active session are dropped.
    pub fn send_audio(&self, frame: &AudioFrame) -> Result<()> {
        match (&self.session, self.state) {
            (Some(session), LiveState::Active) => session.send_audio(frame),
            _ => {
                debug!("dropping captured frame outside active session");
                Ok(())
            }
        }
    }

    /// Drain pending session events against the given playback clock
    pub fn pump(&mut self, clock: f64) {
        loop {
            match self.event_rx.try_recv() {
                Ok(event) => self.process_event(event, clock),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    warn!("live event channel disconnected");
                    self.teardown(STATUS_ERROR);
                    break;
                }
            }
        }
    }

    fn process_event(&mut self, event: LiveEvent, clock: f64) {
        match event {
            LiveEvent::Opened => {
                info!("live session connected");
                self.state = LiveState::Active;
                self.status = STATUS_ACTIVE.to_string();
            }
            LiveEvent::Audio(frame) => {
                let start = self.scheduler.schedule(frame.duration_seconds(), clock);
                debug!(
                    "scheduled {:.3}s of audio at t={:.3}",
                    frame.duration_seconds(),
                    start
                );
            }
            LiveEvent::Transcript { input, output } => {
                if let Some(text) = input {
                    self.input_transcript.push_str(&text);
                }
                if let Some(text) = output {
                    self.output_transcript.push_str(&text);
                }
            }
            LiveEvent::TurnComplete => self.flush_transcripts(),
            LiveEvent::Error(e) => {
                warn!("live session error: {}", e);
                self.teardown(STATUS_ERROR);
            }
            LiveEvent::Closed => {
                info!("live session closed by remote");
                self.teardown(STATUS_IDLE);
            }
        }
    }

    /// Flush accumulated transcripts into settled conversation messages
    fn flush_transcripts(&mut self) {
        let input = self.input_transcript.trim().to_string();
        if !input.is_empty() {
            self.store.add(Message::user(input, None));
        }
        let output = self.output_transcript.trim().to_string();
        if !output.is_empty() {
            self.store.add(Message::model_text(output));
        }
        self.input_transcript.clear();
        self.output_transcript.clear();
    }

    /// Full teardown, run on every exit path: close the session, stop and
    /// clear scheduled playback, reset the cursor, release the gate.
    fn teardown(&mut self, status: &str) {
        if let Some(session) = self.session.take() {
            session.close();
        }
        self.scheduler.clear();
        self.input_transcript.clear();
        self.output_transcript.clear();
        self.state = LiveState::Idle;
        self.status = status.to_string();
        self.gate.store(false, Ordering::SeqCst);
    }

    #[cfg(test)]
    fn scheduler(&self) -> &PlaybackScheduler {
        &self.scheduler
    }
}

impl Drop for LiveSessionController {
    fn drop(&mut self) {
        self.teardown(STATUS_IDLE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::Sender as MessageSender;
    use crate::testing::MockTransport;

    fn controller(transport: MockTransport) -> LiveSessionController {
        LiveSessionController::new(
            Arc::new(transport),
            ConversationStore::new(),
            Arc::new(AtomicBool::new(false)),
        )
    }

    #[test]
    fn test_start_appends_listening_message_and_connects() {
        let transport = MockTransport::new();
        let mut controller = controller(transport);

        controller.start().unwrap();
        assert_eq!(controller.state(), LiveState::Connecting);
        assert_eq!(controller.status(), STATUS_CONNECTING);

        let all = controller.store.get_all();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].text.as_deref(), Some(LIVE_STARTED_MESSAGE));

        controller.process_event(LiveEvent::Opened, 0.0);
        assert_eq!(controller.state(), LiveState::Active);
        assert_eq!(controller.status(), STATUS_ACTIVE);
    }

    #[test]
    fn test_start_twice_is_noop() {
        let transport = MockTransport::new();
        let mut controller = controller(transport.clone());

        controller.start().unwrap();
        controller.start().unwrap();
        assert_eq!(transport.open_count(), 1);
        assert_eq!(controller.store.len(), 1);
    }

    #[test]
    fn test_start_sets_and_teardown_clears_gate() {
        let gate = Arc::new(AtomicBool::new(false));
        let mut controller = LiveSessionController::new(
            Arc::new(MockTransport::new()),
            ConversationStore::new(),
            Arc::clone(&gate),
        );

        controller.start().unwrap();
        assert!(gate.load(Ordering::SeqCst));

        controller.stop();
        assert!(!gate.load(Ordering::SeqCst));
    }

    #[test]
    fn test_audio_buffers_schedule_back_to_back() {
        let mut controller = controller(MockTransport::new());
        controller.start().unwrap();
        controller.process_event(LiveEvent::Opened, 0.0);

        // 2.0s then 1.5s delivered while the playback clock is at zero
        controller.process_event(
            LiveEvent::Audio(AudioFrame::new(vec![0.0; 48000], 24000)),
            0.0,
        );
        controller.process_event(
            LiveEvent::Audio(AudioFrame::new(vec![0.0; 36000], 24000)),
            0.0,
        );

        let starts: Vec<f64> = controller
            .scheduler()
            .scheduled()
            .iter()
            .map(|b| b.start)
            .collect();
        assert_eq!(starts, vec![0.0, 2.0]);
        assert_eq!(controller.scheduler().cursor(), 3.5);
    }

    #[test]
    fn test_turn_complete_flushes_transcripts() {
        let mut controller = controller(MockTransport::new());
        controller.start().unwrap();
        controller.process_event(LiveEvent::Opened, 0.0);

        controller.process_event(
            LiveEvent::Transcript {
                input: Some("hello ".to_string()),
                output: None,
            },
            0.0,
        );
        controller.process_event(
            LiveEvent::Transcript {
                input: Some("there".to_string()),
                output: Some("hi, how can I help?".to_string()),
            },
            0.0,
        );
        controller.process_event(LiveEvent::TurnComplete, 0.0);

        let all = controller.store.get_all();
        // Listening message, then flushed user and model turns
        assert_eq!(all.len(), 3);
        assert_eq!(all[1].sender, MessageSender::User);
        assert_eq!(all[1].text.as_deref(), Some("hello there"));
        assert_eq!(all[2].sender, MessageSender::Model);
        assert_eq!(all[2].text.as_deref(), Some("hi, how can I help?"));

        // Buffers were reset; a second boundary adds nothing
        controller.process_event(LiveEvent::TurnComplete, 0.0);
        assert_eq!(controller.store.len(), 3);
    }

    #[test]
    fn test_error_tears_down_completely() {
        let transport = MockTransport::new();
        let mut controller = controller(transport.clone());
        controller.start().unwrap();
        controller.process_event(LiveEvent::Opened, 0.0);
        controller.process_event(
            LiveEvent::Audio(AudioFrame::new(vec![0.0; 24000], 24000)),
            0.0,
        );

        controller.process_event(LiveEvent::Error("socket dropped".to_string()), 0.0);

        assert_eq!(controller.state(), LiveState::Idle);
        assert_eq!(controller.status(), STATUS_ERROR);
        assert_eq!(controller.scheduler().cursor(), 0.0);
        assert_eq!(controller.scheduler().scheduled_count(), 0);
        assert_eq!(transport.close_count(), 1);
    }

    #[test]
    fn test_open_failure_resets_to_error_status() {
        let gate = Arc::new(AtomicBool::new(false));
        let mut controller = LiveSessionController::new(
            Arc::new(MockTransport::failing()),
            ConversationStore::new(),
            Arc::clone(&gate),
        );

        assert!(controller.start().is_err());
        assert_eq!(controller.state(), LiveState::Idle);
        assert_eq!(controller.status(), STATUS_ERROR);
        assert!(!gate.load(Ordering::SeqCst));
    }

    #[test]
    fn test_remote_close_returns_to_idle_status() {
        let mut controller = controller(MockTransport::new());
        controller.start().unwrap();
        controller.process_event(LiveEvent::Opened, 0.0);

        controller.process_event(LiveEvent::Closed, 0.0);
        assert_eq!(controller.state(), LiveState::Idle);
        assert_eq!(controller.status(), STATUS_IDLE);
    }

    #[test]
    fn test_frames_sent_only_while_active() {
        let transport = MockTransport::new();
        let mut controller = controller(transport.clone());
        let frame = AudioFrame::new(vec![0.0; 1600], 16000);

        // Idle: dropped
        controller.send_audio(&frame).unwrap();
        assert_eq!(transport.sent_frames(), 0);

        controller.start().unwrap();
        // Connecting: still dropped
        controller.send_audio(&frame).unwrap();
        assert_eq!(transport.sent_frames(), 0);

        controller.process_event(LiveEvent::Opened, 0.0);
        controller.send_audio(&frame).unwrap();
        assert_eq!(transport.sent_frames(), 1);
    }
}
