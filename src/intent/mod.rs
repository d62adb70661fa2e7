pub mod classifier;
pub mod triggers;

pub use classifier::{classify, Intent};
pub use triggers::strip_speech_trigger;
