pub mod store;
pub mod types;

pub use store::ConversationStore;
pub use types::{AudioData, ImageData, Message, Sender, SettledContent, Source, VideoData};
