//! Pending-attachment state for the input side.
//!
//! At most one file is pending at a time. The slot is cleared on send
//! (`take`) or explicit removal (`clear`); file reading and base64 encoding
//! happen outside the engine.

use crate::messages::ImageData;

/// A file staged for the next submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub data: Vec<u8>,
    pub mime_type: String,
}

impl Attachment {
    pub fn new(data: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            data,
            mime_type: mime_type.into(),
        }
    }

    /// View of the attachment as image payload for capability calls
    pub fn as_image(&self) -> ImageData {
        ImageData::new(self.data.clone(), self.mime_type.clone())
    }
}

/// Holder for the single pending attachment
#[derive(Debug, Default)]
pub struct AttachmentSlot {
    current: Option<Attachment>,
}

impl AttachmentSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage a file, replacing any previous one
    pub fn attach(&mut self, attachment: Attachment) {
        self.current = Some(attachment);
    }

    /// Take the pending attachment for a send, clearing the slot
    pub fn take(&mut self) -> Option<Attachment> {
        self.current.take()
    }

    /// Explicitly remove the pending attachment
    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn get(&self) -> Option<&Attachment> {
        self.current.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }
}
