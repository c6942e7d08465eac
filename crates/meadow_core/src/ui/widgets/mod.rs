//! UI widgets module
//!
//! Element declarations, the layout engine and the default window shell.

pub mod core;
pub mod layout;
pub mod shell;

pub use self::core::{
    AlignX, AlignY, BorderConfig, ChildAlignment, ClipConfig, ElementDeclaration, ElementId,
    LayoutDirection, Padding, Sizing, TextConfig,
};
pub use layout::{LayoutEngine, SCROLL_SPEED};
pub use shell::{ShellStyle, WindowShell};
