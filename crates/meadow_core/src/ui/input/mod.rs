//! UI input handling module
//!
//! Gesture state owned by the UI frame engine.

pub mod click_queue;
pub mod gestures;

pub use click_queue::{
    ClickGesture, DeferredAction, PendingClick, PendingClickQueue, CLICK_QUEUE_CAPACITY,
};
pub use gestures::{DoubleClickTracker, DragState, DEFAULT_DOUBLE_CLICK_THRESHOLD_MS};
