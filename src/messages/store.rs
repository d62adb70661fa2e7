//! Conversation log shared between the dispatch pipeline and the live
//! session controller.
//!
//! Insertion order is display order. The log is append-only except for the
//! in-place settle mutation that transitions a placeholder to its final
//! content, and `settle` guarantees at most one matching entry is mutated.

use super::types::{Message, SettledContent};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct ConversationStore {
    messages: Arc<RwLock<Vec<Message>>>,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self {
            messages: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Append a message and return its id
    pub fn add(&self, message: Message) -> Uuid {
        let id = message.id;
        self.messages.write().push(message);
        id
    }

    /// Merge settled content into the message with the given id, clearing
    /// its loading state.
    ///
    /// At most one entry is mutated. Applying the same payload twice leaves
    /// the message in the same state as applying it once. Returns false if
    /// no message with the id exists.
    pub fn settle(&self, id: Uuid, content: SettledContent) -> bool {
        let mut messages = self.messages.write();
        let Some(msg) = messages.iter_mut().find(|m| m.id == id) else {
            warn!("settle: no message with id {}", id);
            return false;
        };

        if content.text.is_some() {
            msg.text = content.text;
        }
        if content.image.is_some() {
            msg.image = content.image;
        }
        if content.audio.is_some() {
            msg.audio = content.audio;
        }
        if content.video.is_some() {
            msg.video = content.video;
        }
        if !content.sources.is_empty() {
            msg.sources = content.sources;
        }
        msg.needs_api_key = content.needs_api_key;
        msg.loading = false;
        msg.loading_text = None;
        true
    }

    /// Replace the transient loading text of an in-flight message
    pub fn set_loading_text(&self, id: Uuid, text: impl Into<String>) {
        let mut messages = self.messages.write();
        if let Some(msg) = messages.iter_mut().find(|m| m.id == id && m.loading) {
            msg.loading_text = Some(text.into());
        }
    }

    /// The text of the most recent model message eligible as a rewrite
    /// target, if any.
    pub fn last_rewrite_target(&self) -> Option<String> {
        self.messages
            .read()
            .iter()
            .rev()
            .find(|m| m.is_rewrite_target())
            .and_then(|m| m.text.clone())
    }

    pub fn get_all(&self) -> Vec<Message> {
        self.messages.read().clone()
    }

    pub fn get(&self, id: Uuid) -> Option<Message> {
        self.messages.read().iter().find(|m| m.id == id).cloned()
    }

    pub fn clear(&self) {
        self.messages.write().clear();
    }

    pub fn len(&self) -> usize {
        self.messages.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.read().is_empty()
    }
}

impl Default for ConversationStore {
    fn default() -> Self {
        Self::new()
    }
}
