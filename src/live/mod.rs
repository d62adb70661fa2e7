pub mod controller;
pub mod playback;
pub mod transport;

pub use controller::{LiveSessionController, LiveState};
pub use playback::PlaybackScheduler;
pub use transport::{AudioFrame, LiveEvent, LiveSessionHandle, LiveTransport};
