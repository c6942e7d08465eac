//! Builder handed to UI descriptions during the layout walk
//!
//! Wraps the layout engine together with the gesture state so hover-driven
//! interactions (click targets, double click targets, drag regions) can be
//! registered while the tree is built.

use super::input::{ClickGesture, DeferredAction, DragState, PendingClick, PendingClickQueue};
use super::widgets::{ElementDeclaration, ElementId, LayoutEngine, TextConfig};
use crate::input::MouseButton;

/// Something that describes the UI tree each frame
pub trait UiDescription {
    /// Emit the tree for this frame
    fn build(&mut self, ui: &mut UiBuilder<'_>);
}

/// Frame-scoped view of the layout engine and gesture state
pub struct UiBuilder<'a> {
    layout: &'a mut LayoutEngine,
    clicks: &'a mut PendingClickQueue,
    drag: &'a mut DragState,
    left_down: bool,
}

impl<'a> UiBuilder<'a> {
    /// Wrap the engine state for one layout walk
    pub fn new(
        layout: &'a mut LayoutEngine,
        clicks: &'a mut PendingClickQueue,
        drag: &'a mut DragState,
        left_down: bool,
    ) -> Self {
        Self {
            layout,
            clicks,
            drag,
            left_down,
        }
    }

    /// Open an element
    pub fn open(&mut self, decl: ElementDeclaration) {
        self.layout.open(decl);
    }

    /// Close the most recently opened element
    pub fn close(&mut self) {
        self.layout.close();
    }

    /// Open an element, build its children, then close it
    pub fn element(&mut self, decl: ElementDeclaration, children: impl FnOnce(&mut Self)) {
        self.open(decl);
        children(self);
        self.close();
    }

    /// Add a text leaf
    pub fn text(&mut self, text: &str, config: TextConfig) {
        self.layout.text(text, config);
    }

    /// Whether the pointer is over the currently open element
    pub fn hovered(&self) -> bool {
        self.layout.hovered()
    }

    /// Whether the pointer is over the element labelled `label`
    ///
    /// Usable before the element is opened, to style it by hover state.
    pub fn is_hovered(&self, label: &str) -> bool {
        self.layout.pointer_over(ElementId::new(label))
    }

    fn push(&mut self, click: PendingClick) {
        if let Err(err) = self.clicks.push(click) {
            log::error!("Click target dropped: {err}");
        }
    }

    /// Fire `action` when `button` is pressed over the open element
    pub fn on_click(&mut self, button: MouseButton, action: DeferredAction) {
        if self.hovered() {
            self.push(PendingClick {
                button,
                gesture: ClickGesture::Single(action),
            });
        }
    }

    /// Fire `action` on a left double click over the open element
    pub fn on_double_click(&mut self, action: DeferredAction) {
        if self.hovered() {
            self.push(PendingClick {
                button: MouseButton::LEFT,
                gesture: ClickGesture::DoubleClick(action),
            });
        }
    }

    /// Start dragging the window when the open element is pressed
    pub fn drag_region(&mut self) {
        if self.hovered() && self.left_down {
            self.drag.arm();
        }
    }
}
