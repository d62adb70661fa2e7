//! Channel-based front end for the dispatch engine.
//!
//! Submissions arrive as commands on a bounded channel and are processed
//! one at a time on a worker thread; completions come back as events.
//! Two gates guard submission: a busy flag enforcing at most one request
//! in flight, and the live-session gate shared with the voice controller.

use crate::attachment::Attachment;
use crate::capability::{CapabilityClient, CredentialProvider};
use crate::config::EngineConfig;
use crate::dispatch::Dispatcher;
use crate::messages::ConversationStore;
use crate::{PrismError, Result};
use crossbeam_channel::{bounded, Receiver, Sender};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use tracing::{debug, error, info};
use uuid::Uuid;

/// Commands accepted by the chat pipeline
#[derive(Debug, Clone)]
pub enum ChatCommand {
    /// Process one user submission
    Submit {
        text: String,
        attachment: Option<Attachment>,
    },

    /// The user selected an API key
    CredentialSelected,

    /// Reset the conversation
    ClearHistory,

    /// Shut down the worker
    Shutdown,
}

/// Events emitted by the chat pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEvent {
    /// A submission ran to completion; `id` is the settled placeholder,
    /// or None when the submission was empty
    SubmissionComplete { id: Option<Uuid> },

    /// The key-selected confirmation was appended
    CredentialConfirmed,

    /// The conversation was reset
    HistoryCleared,

    /// The worker has shut down
    Shutdown,
}

/// Caller-side handle: gated submission plus the event stream
#[derive(Clone)]
pub struct ChatHandle {
    command_tx: Sender<ChatCommand>,
    event_rx: Receiver<ChatEvent>,
    busy: Arc<AtomicBool>,
    live_gate: Arc<AtomicBool>,
}

impl ChatHandle {
    /// Queue a submission for processing.
    ///
    /// Rejected while a live voice session is active or while a previous
    /// submission is still in flight.
    pub fn submit(&self, text: impl Into<String>, attachment: Option<Attachment>) -> Result<()> {
        if self.live_gate.load(Ordering::SeqCst) {
            return Err(PrismError::SessionError(
                "text dispatch is disabled during a live session".to_string(),
            ));
        }
        if self.busy.swap(true, Ordering::SeqCst) {
            return Err(PrismError::DispatchError(
                "a request is already in flight".to_string(),
            ));
        }

        let command = ChatCommand::Submit {
            text: text.into(),
            attachment,
        };
        self.command_tx.send(command).map_err(|e| {
            self.busy.store(false, Ordering::SeqCst);
            PrismError::ChannelError(e.to_string())
        })
    }

    pub fn credential_selected(&self) -> Result<()> {
        self.command_tx
            .send(ChatCommand::CredentialSelected)
            .map_err(|e| PrismError::ChannelError(e.to_string()))
    }

    pub fn clear_history(&self) -> Result<()> {
        self.command_tx
            .send(ChatCommand::ClearHistory)
            .map_err(|e| PrismError::ChannelError(e.to_string()))
    }

    pub fn shutdown(&self) -> Result<()> {
        self.command_tx
            .send(ChatCommand::Shutdown)
            .map_err(|e| PrismError::ChannelError(e.to_string()))
    }

    pub fn event_receiver(&self) -> Receiver<ChatEvent> {
        self.event_rx.clone()
    }

    /// Whether a submission is currently in flight
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// The gate flag shared with the live voice controller
    pub fn live_gate(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.live_gate)
    }
}

/// Owns the dispatcher and the worker side of the channels
pub struct ChatPipeline {
    dispatcher: Dispatcher,
    command_rx: Receiver<ChatCommand>,
    event_tx: Sender<ChatEvent>,
    busy: Arc<AtomicBool>,
}

impl ChatPipeline {
    pub fn new(
        client: Arc<dyn CapabilityClient>,
        credentials: Arc<dyn CredentialProvider>,
        store: ConversationStore,
        config: EngineConfig,
    ) -> (Self, ChatHandle) {
        let (command_tx, command_rx) = bounded(16);
        let (event_tx, event_rx) = bounded(16);
        let busy = Arc::new(AtomicBool::new(false));
        let live_gate = Arc::new(AtomicBool::new(false));

        let handle = ChatHandle {
            command_tx,
            event_rx,
            busy: Arc::clone(&busy),
            live_gate,
        };
        let pipeline = Self {
            dispatcher: Dispatcher::new(client, credentials, store, config),
            command_rx,
            event_tx,
            busy,
        };
        (pipeline, handle)
    }

    /// Start the pipeline worker thread
    pub fn start_worker(self) -> Result<JoinHandle<()>> {
        let handle = std::thread::Builder::new()
            .name("chat-pipeline".to_string())
            .spawn(move || {
                info!("chat pipeline worker starting");

                loop {
                    match self.command_rx.recv() {
                        Ok(ChatCommand::Submit { text, attachment }) => {
                            debug!("processing submission");
                            let id = self.dispatcher.handle_submission(&text, attachment);
                            self.busy.store(false, Ordering::SeqCst);
                            let _ = self.event_tx.send(ChatEvent::SubmissionComplete { id });
                        }

                        Ok(ChatCommand::CredentialSelected) => {
                            self.dispatcher.credential_selected();
                            let _ = self.event_tx.send(ChatEvent::CredentialConfirmed);
                        }

                        Ok(ChatCommand::ClearHistory) => {
                            info!("clearing conversation history");
                            self.dispatcher.store().clear();
                            let _ = self.event_tx.send(ChatEvent::HistoryCleared);
                        }

                        Ok(ChatCommand::Shutdown) => {
                            info!("chat pipeline worker shutting down");
                            let _ = self.event_tx.send(ChatEvent::Shutdown);
                            break;
                        }

                        Err(e) => {
                            error!("command channel error: {}", e);
                            break;
                        }
                    }
                }

                info!("chat pipeline worker stopped");
            })
            .map_err(|e| PrismError::ChannelError(e.to_string()))?;

        Ok(handle)
    }
}
