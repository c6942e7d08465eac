//! Frame-to-frame gesture state: double click timing and drag-to-move

/// Default time allowed between the two presses of a double click
pub const DEFAULT_DOUBLE_CLICK_THRESHOLD_MS: f32 = 510.0;

/// Double click timer
///
/// The first press starts the timer; a second press before the threshold
/// fires. The timer is advanced once per frame and cancels itself once the
/// accumulated delta reaches the threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct DoubleClickTracker {
    threshold_ms: f32,
    delta_ms: f32,
    awaiting: bool,
}

impl DoubleClickTracker {
    /// Create a tracker with the given threshold
    pub fn new(threshold_ms: f32) -> Self {
        Self {
            threshold_ms,
            delta_ms: 0.0,
            awaiting: false,
        }
    }

    /// Accumulate frame time while waiting for a second press
    pub fn advance(&mut self, delta_ms: f32) {
        if self.awaiting {
            self.delta_ms += delta_ms;
        }
        if self.delta_ms >= self.threshold_ms {
            self.reset();
        }
    }

    /// Register a press; returns `true` when it completes a double click
    pub fn register_press(&mut self) -> bool {
        if self.awaiting && self.delta_ms < self.threshold_ms {
            self.reset();
            true
        } else {
            self.awaiting = true;
            self.delta_ms = 0.0;
            false
        }
    }

    fn reset(&mut self) {
        self.awaiting = false;
        self.delta_ms = 0.0;
    }

    /// Whether a first press is waiting for its partner
    pub fn is_awaiting(&self) -> bool {
        self.awaiting
    }

    /// Time accumulated since the first press
    pub fn delta_ms(&self) -> f32 {
        self.delta_ms
    }

    /// Configured threshold
    pub fn threshold_ms(&self) -> f32 {
        self.threshold_ms
    }
}

impl Default for DoubleClickTracker {
    fn default() -> Self {
        Self::new(DEFAULT_DOUBLE_CLICK_THRESHOLD_MS)
    }
}

/// Drag-to-move state
///
/// Armed by a drag region hovered with the left button down. While armed,
/// the first frame locks the cursor as the anchor and every frame moves the
/// window by the cursor's offset from it. Releasing the button ends the drag
/// and unlocks the anchor.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DragState {
    active: bool,
    anchor: Option<(f64, f64)>,
}

impl DragState {
    /// Start dragging (no-op while already dragging)
    pub fn arm(&mut self) {
        self.active = true;
    }

    /// Stop dragging and unlock the anchor
    pub fn end(&mut self) {
        self.active = false;
        self.anchor = None;
    }

    /// Whether a drag is in progress
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Locked anchor in window coordinates
    pub fn anchor(&self) -> Option<(f64, f64)> {
        self.anchor
    }

    /// Advance the drag by one frame
    ///
    /// Returns the new window position, or `None` when no drag is running.
    pub fn update(&mut self, window_position: (i32, i32), cursor: (f64, f64), left_down: bool) -> Option<(i32, i32)> {
        if !self.active {
            return None;
        }
        if !left_down {
            self.end();
            return None;
        }

        let anchor = *self.anchor.get_or_insert(cursor);
        Some((
            (f64::from(window_position.0) + cursor.0 - anchor.0) as i32,
            (f64::from(window_position.1) + cursor.1 - anchor.1) as i32,
        ))
    }
}
