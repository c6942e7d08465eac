//! UI Render Backend Trait
//!
//! Defines the interface between the UI frame engine and the renderer.
//! Keeps the UI independent of the GPU API in use.

use crate::ui::rendering::DrawCommand;

/// Consumer of one frame's ordered draw commands
pub trait UIRenderBackend {
    /// Execute the commands in paint order
    fn render(&mut self, commands: &[DrawCommand]);

    /// Update screen size for projection and viewport
    fn set_screen_size(&mut self, width: u32, height: u32);

    /// Current screen size
    fn screen_size(&self) -> (u32, u32);
}
