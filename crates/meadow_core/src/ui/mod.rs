//! UI System Module
//!
//! Immediate-mode UI rebuilt every frame.
//!
//! Architecture:
//! - UIManager: per-frame engine owning layout, gesture state and the request outbox
//! - builder: the builder handed to UI descriptions while the tree is walked
//! - widgets/: element declarations, layout engine, default window shell
//! - rendering/: backend-agnostic draw commands
//! - input/: click queue, double click tracker, drag state

pub mod backend;
pub mod builder;
pub mod input;
pub mod manager;
pub mod rendering;
pub mod widgets;

pub use backend::UIRenderBackend;
pub use builder::{UiBuilder, UiDescription};
pub use manager::UIManager;

pub use input::{ClickGesture, DeferredAction, DoubleClickTracker, DragState, PendingClickQueue};
pub use rendering::{BorderWidth, BoundingBox, Color, CornerRadius, DrawCommand};
pub use widgets::{ElementDeclaration, ElementId, LayoutEngine, ShellStyle, Sizing, WindowShell};

use thiserror::Error;

/// UI errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UiError {
    /// Two elements declared the same id in one frame
    #[error("Duplicate element id: {0}")]
    DuplicateId(String),

    /// `close` called with no open element
    #[error("Close called without a matching open")]
    UnbalancedClose,

    /// `end_layout` reached with elements still open
    #[error("{0} element(s) left open at end of layout")]
    UnclosedElements(usize),

    /// Builder call made outside begin/end layout
    #[error("Layout call outside of begin_layout/end_layout")]
    OutsideLayout,

    /// Pending click queue is full
    #[error("Pending click queue full (capacity {0})")]
    ClickQueueFull(usize),
}

/// Request produced by the UI for the application to carry out
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiRequest {
    /// Iconify the window
    MinimizeWindow,
    /// Maximize or restore the window
    ToggleMaximize,
    /// Stop the application loop
    CloseApplication,
    /// Recompile the named shader
    RecompileShader(String),
}

impl From<DeferredAction> for UiRequest {
    fn from(action: DeferredAction) -> Self {
        match action {
            DeferredAction::MinimizeWindow => Self::MinimizeWindow,
            DeferredAction::ToggleMaximize => Self::ToggleMaximize,
            DeferredAction::CloseApplication => Self::CloseApplication,
        }
    }
}
