//! Frame timing

use std::time::{Duration, Instant};

/// Monotonic frame timer
///
/// `tick` is called once per frame and returns the time since the previous
/// tick in milliseconds.
#[derive(Debug)]
pub struct FrameTimer {
    last_frame: Instant,
    started: Instant,
    delta: Duration,
    frame_count: u64,
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameTimer {
    /// Create a timer starting now
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            last_frame: now,
            started: now,
            delta: Duration::ZERO,
            frame_count: 0,
        }
    }

    /// Advance one frame, returning its delta in milliseconds
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> f32 {
        self.delta = now.saturating_duration_since(self.last_frame);
        self.last_frame = now;
        self.frame_count += 1;
        self.delta_ms()
    }

    /// Last frame's delta in milliseconds
    pub fn delta_ms(&self) -> f32 {
        self.delta.as_secs_f32() * 1000.0
    }

    /// Frames ticked so far
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Time between creation and the last tick
    pub fn total_time(&self) -> Duration {
        self.last_frame.saturating_duration_since(self.started)
    }

    /// Average frames per second since creation
    pub fn average_fps(&self) -> f32 {
        let seconds = self.total_time().as_secs_f32();
        if seconds > 0.0 {
            self.frame_count as f32 / seconds
        } else {
            0.0
        }
    }
}
