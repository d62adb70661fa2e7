//! Gapless scheduling of incoming live audio.
//!
//! Buffers arrive with delivery jitter but must play back-to-back. Each
//! buffer starts at `max(cursor, playback clock)` and the cursor advances
//! by the buffer's duration, so consecutive buffers neither gap nor
//! overlap.

/// A buffer queued for playback
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduledBuffer {
    pub start: f64,
    pub duration: f64,
}

/// Monotonically advancing playback cursor plus the set of scheduled
/// sources, so teardown can stop and release them all.
#[derive(Debug, Default)]
pub struct PlaybackScheduler {
    cursor: f64,
    scheduled: Vec<ScheduledBuffer>,
}

impl PlaybackScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a buffer of the given duration against the current
    /// playback clock, returning its start time.
    pub fn schedule(&mut self, duration: f64, clock: f64) -> f64 {
        let start = self.cursor.max(clock);
        self.scheduled.push(ScheduledBuffer { start, duration });
        self.cursor = start + duration;
        start
    }

    /// The next scheduling timestamp
    pub fn cursor(&self) -> f64 {
        self.cursor
    }

    pub fn scheduled(&self) -> &[ScheduledBuffer] {
        &self.scheduled
    }

    pub fn scheduled_count(&self) -> usize {
        self.scheduled.len()
    }

    /// Stop everything: clear scheduled sources and reset the cursor
    pub fn clear(&mut self) {
        self.scheduled.clear();
        self.cursor = 0.0;
    }
}
