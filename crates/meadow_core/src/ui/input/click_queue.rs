//! Pending click queue
//!
//! Hover+click regions push an entry while the UI tree is built; the next
//! mouse-button-pressed event resolves the most recent entry (LIFO) when the
//! buttons match. The queue is cleared at the start of every frame.

use crate::input::MouseButton;
use crate::ui::UiError;

/// Maximum number of pending clicks per frame
pub const CLICK_QUEUE_CAPACITY: usize = 32;

/// Work performed when a click resolves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredAction {
    /// Iconify the window
    MinimizeWindow,
    /// Maximize or restore the window
    ToggleMaximize,
    /// Stop the application
    CloseApplication,
}

/// How a pending click fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickGesture {
    /// Fires on the press
    Single(DeferredAction),
    /// Fires on the second press within the double click threshold
    DoubleClick(DeferredAction),
}

/// One hover-registered click target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingClick {
    /// Button that resolves the entry
    pub button: MouseButton,
    /// What happens on resolution
    pub gesture: ClickGesture,
}

/// Bounded LIFO of pending clicks
#[derive(Debug)]
pub struct PendingClickQueue {
    entries: Vec<PendingClick>,
}

impl PendingClickQueue {
    /// Create an empty queue with storage for the full capacity
    pub fn new() -> Self {
        Self {
            entries: Vec::with_capacity(CLICK_QUEUE_CAPACITY),
        }
    }

    /// Drop every entry, keeping the storage
    pub fn reset(&mut self) {
        self.entries.clear();
    }

    /// Push an entry
    ///
    /// A full queue is a defect: debug builds panic, release builds refuse
    /// the entry and log an error.
    pub fn push(&mut self, click: PendingClick) -> Result<(), UiError> {
        debug_assert!(
            self.entries.len() < CLICK_QUEUE_CAPACITY,
            "pending click queue overflow"
        );
        if self.entries.len() >= CLICK_QUEUE_CAPACITY {
            log::error!("Pending click queue is full, dropping {click:?}");
            return Err(UiError::ClickQueueFull(CLICK_QUEUE_CAPACITY));
        }
        self.entries.push(click);
        Ok(())
    }

    /// Most recently pushed entry
    pub fn peek(&self) -> Option<&PendingClick> {
        self.entries.last()
    }

    /// Pop the top entry if it belongs to `button`
    pub fn pop_matching(&mut self, button: MouseButton) -> Option<PendingClick> {
        if self.peek()?.button == button {
            self.entries.pop()
        } else {
            None
        }
    }

    /// Number of pending entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no entries are pending
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for PendingClickQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(button: MouseButton, action: DeferredAction) -> PendingClick {
        PendingClick {
            button,
            gesture: ClickGesture::Single(action),
        }
    }

    #[test]
    fn test_resolves_last_pushed_first() {
        let mut queue = PendingClickQueue::new();
        queue.push(single(MouseButton::LEFT, DeferredAction::MinimizeWindow)).unwrap();
        queue.push(single(MouseButton::LEFT, DeferredAction::CloseApplication)).unwrap();

        assert_eq!(
            queue.pop_matching(MouseButton::LEFT).map(|c| c.gesture),
            Some(ClickGesture::Single(DeferredAction::CloseApplication))
        );
        assert_eq!(
            queue.pop_matching(MouseButton::LEFT).map(|c| c.gesture),
            Some(ClickGesture::Single(DeferredAction::MinimizeWindow))
        );
        assert!(queue.pop_matching(MouseButton::LEFT).is_none());
    }

    #[test]
    fn test_resolves_last_pushed_first_reversed() {
        let mut queue = PendingClickQueue::new();
        queue.push(single(MouseButton::LEFT, DeferredAction::CloseApplication)).unwrap();
        queue.push(single(MouseButton::LEFT, DeferredAction::MinimizeWindow)).unwrap();

        assert_eq!(
            queue.pop_matching(MouseButton::LEFT).map(|c| c.gesture),
            Some(ClickGesture::Single(DeferredAction::MinimizeWindow))
        );
    }

    #[test]
    fn test_mismatched_button_leaves_entry() {
        let mut queue = PendingClickQueue::new();
        queue.push(single(MouseButton::RIGHT, DeferredAction::MinimizeWindow)).unwrap();

        assert!(queue.pop_matching(MouseButton::LEFT).is_none());
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_reset_keeps_capacity() {
        let mut queue = PendingClickQueue::new();
        for _ in 0..5 {
            queue.push(single(MouseButton::LEFT, DeferredAction::ToggleMaximize)).unwrap();
        }
        queue.reset();
        assert!(queue.is_empty());
        assert!(queue.entries.capacity() >= CLICK_QUEUE_CAPACITY);
    }

    #[test]
    #[cfg(not(debug_assertions))]
    fn test_overflow_is_refused() {
        let mut queue = PendingClickQueue::new();
        for _ in 0..CLICK_QUEUE_CAPACITY {
            queue.push(single(MouseButton::LEFT, DeferredAction::ToggleMaximize)).unwrap();
        }
        let result = queue.push(single(MouseButton::LEFT, DeferredAction::CloseApplication));
        assert!(matches!(result, Err(UiError::ClickQueueFull(CLICK_QUEUE_CAPACITY))));
        assert_eq!(queue.len(), CLICK_QUEUE_CAPACITY);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "pending click queue overflow")]
    fn test_overflow_asserts_in_debug() {
        let mut queue = PendingClickQueue::new();
        for _ in 0..=CLICK_QUEUE_CAPACITY {
            let _ = queue.push(single(MouseButton::LEFT, DeferredAction::ToggleMaximize));
        }
    }
}
