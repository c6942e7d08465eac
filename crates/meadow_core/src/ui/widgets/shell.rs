//! Default window shell: custom title bar for an undecorated window
//!
//! ```text
//! Base
//! └── TitleBar
//!     ├── Icon (+ hover overlay)
//!     ├── TitlebarContent
//!     │   ├── MenuBar
//!     │   │   ├── FileButton "File"
//!     │   │   └── WindowControlArea (double click: maximize)
//!     │   │       └── WindowControlArea2 (drag to move)
//!     │   └── TabBar
//!     └── WindowControl
//!         ├── MinimizeButton
//!         ├── MinMaxButton
//!         └── CloseButton
//! ```

use super::core::{AlignX, AlignY, ElementDeclaration, LayoutDirection, Sizing, TextConfig};
use crate::input::MouseButton;
use crate::render::texture::TextureName;
use crate::ui::builder::{UiBuilder, UiDescription};
use crate::ui::input::DeferredAction;
use crate::ui::rendering::{BorderWidth, Color, CornerRadius};

/// Shell metrics and colors
#[derive(Debug, Clone, PartialEq)]
pub struct ShellStyle {
    /// Title bar height in pixels
    pub title_bar_height: f32,
    /// Menu label font size
    pub font_size: u16,
    /// Window background
    pub background: Color,
    /// Window outline
    pub outline: Color,
    /// Title bar fill
    pub title_bar: Color,
    /// Menu item hover fill
    pub menu_hover: Color,
    /// Minimize/maximize hover fill
    pub button_hover: Color,
    /// Close hover fill
    pub close_hover: Color,
}

impl Default for ShellStyle {
    fn default() -> Self {
        Self {
            title_bar_height: 64.0,
            font_size: 16,
            background: Color::rgba(0.12, 0.12, 0.12, 1.0),
            outline: Color::rgba(0.3, 0.3, 0.3, 1.0),
            title_bar: Color::rgba(0.2, 0.2, 0.2, 1.0),
            menu_hover: Color::rgba(0.35, 0.35, 0.35, 1.0),
            button_hover: Color::rgba(0.16, 0.52, 0.66, 1.0),
            close_hover: Color::rgba(0.90, 0.29, 0.24, 1.0),
        }
    }
}

/// The default UI description
#[derive(Debug, Clone, Default)]
pub struct WindowShell {
    style: ShellStyle,
}

impl WindowShell {
    /// Shell with the given style
    pub fn new(style: ShellStyle) -> Self {
        Self { style }
    }

    /// Current style
    pub fn style(&self) -> &ShellStyle {
        &self.style
    }

    fn hover_fill(ui: &UiBuilder<'_>, label: &str, color: Color) -> Color {
        color.with_alpha(if ui.is_hovered(label) { color.a } else { 0.0 })
    }

    fn window_button(
        &self,
        ui: &mut UiBuilder<'_>,
        label: &str,
        icon_label: &str,
        icon: TextureName,
        hover: Color,
        action: DeferredAction,
    ) {
        let h = self.style.title_bar_height;
        let fill = Self::hover_fill(ui, label, hover);
        ui.element(
            ElementDeclaration::new(label)
                .direction(LayoutDirection::TopToBottom)
                .size(Sizing::Fixed(h * 0.7), Sizing::Fixed(h * 0.5))
                .align(AlignX::Center, AlignY::Center)
                .background(fill),
            |ui| {
                ui.element(
                    ElementDeclaration::new(icon_label).size(Sizing::Grow, Sizing::Grow).image(icon),
                    |_| {},
                );
                ui.on_click(MouseButton::LEFT, action);
            },
        );
    }

    fn title_bar_content(&self, ui: &mut UiBuilder<'_>) {
        let h = self.style.title_bar_height;
        let file_fill = Self::hover_fill(ui, "FileButton", self.style.menu_hover);
        let font_size = self.style.font_size;

        ui.element(
            ElementDeclaration::new("TitlebarContent")
                .direction(LayoutDirection::TopToBottom)
                .size(Sizing::Grow, Sizing::Fixed(h))
                .align(AlignX::Center, AlignY::Top),
            |ui| {
                ui.element(
                    ElementDeclaration::new("MenuBar")
                        .size(Sizing::Grow, Sizing::Fixed(h * 0.5))
                        .align(AlignX::Left, AlignY::Center),
                    |ui| {
                        ui.element(
                            ElementDeclaration::new("FileButton")
                                .size(Sizing::Fixed(48.0), Sizing::Grow)
                                .align(AlignX::Center, AlignY::Center)
                                .background(file_fill),
                            |ui| {
                                ui.text(
                                    "File",
                                    TextConfig {
                                        font_size,
                                        color: Color::WHITE,
                                    },
                                );
                            },
                        );
                        ui.element(
                            ElementDeclaration::new("WindowControlArea").size(Sizing::Grow, Sizing::Grow),
                            |ui| {
                                ui.on_double_click(DeferredAction::ToggleMaximize);
                                ui.element(
                                    ElementDeclaration::new("WindowControlArea2").size(Sizing::Grow, Sizing::Grow),
                                    UiBuilder::drag_region,
                                );
                            },
                        );
                    },
                );
                ui.element(
                    ElementDeclaration::new("TabBar")
                        .direction(LayoutDirection::TopToBottom)
                        .size(Sizing::Grow, Sizing::Grow),
                    |_| {},
                );
            },
        );
    }
}

impl UiDescription for WindowShell {
    fn build(&mut self, ui: &mut UiBuilder<'_>) {
        let h = self.style.title_bar_height;
        let overlay = Color::WHITE.with_alpha(if ui.is_hovered("IconOverlay") { 0.15 } else { 0.0 });

        ui.open(
            ElementDeclaration::new("Base")
                .direction(LayoutDirection::TopToBottom)
                .size(Sizing::Grow, Sizing::Grow)
                .child_gap(16.0)
                .background(self.style.background)
                .corner_radius(CornerRadius::all(1.0))
                .border(self.style.outline, BorderWidth::all(1)),
        );
        ui.open(
            ElementDeclaration::new("TitleBar")
                .size(Sizing::Grow, Sizing::Fixed(h))
                .background(self.style.title_bar),
        );

        ui.element(
            ElementDeclaration::new("Icon")
                .size(Sizing::Fixed(h), Sizing::Fixed(h))
                .image(TextureName::Icon),
            |ui| {
                ui.element(
                    ElementDeclaration::new("IconOverlay")
                        .size(Sizing::Grow, Sizing::Grow)
                        .background(overlay),
                    |_| {},
                );
            },
        );

        self.title_bar_content(ui);

        ui.open(
            ElementDeclaration::new("WindowControl")
                .size(Sizing::Fit, Sizing::Fixed(h * 0.5))
                .align(AlignX::Right, AlignY::Center),
        );
        self.window_button(
            ui,
            "MinimizeButton",
            "MinimizeIcon",
            TextureName::Minimize,
            self.style.button_hover,
            DeferredAction::MinimizeWindow,
        );
        self.window_button(
            ui,
            "MinMaxButton",
            "MaximizeIcon",
            TextureName::Maximize,
            self.style.button_hover,
            DeferredAction::ToggleMaximize,
        );
        self.window_button(
            ui,
            "CloseButton",
            "CloseIcon",
            TextureName::Close,
            self.style.close_hover,
            DeferredAction::CloseApplication,
        );
        ui.close();

        ui.close();
        ui.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::text::MonospaceMeasurer;
    use crate::ui::input::{ClickGesture, DragState, PendingClickQueue};
    use crate::ui::rendering::{BoundingBox, DrawCommand};
    use crate::ui::widgets::{ElementId, LayoutEngine};

    struct Harness {
        layout: LayoutEngine,
        clicks: PendingClickQueue,
        drag: DragState,
        shell: WindowShell,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                layout: LayoutEngine::new(800.0, 600.0, Box::new(MonospaceMeasurer)),
                clicks: PendingClickQueue::new(),
                drag: DragState::default(),
                shell: WindowShell::default(),
            }
        }

        fn frame(&mut self, left_down: bool) -> Vec<DrawCommand> {
            self.clicks.reset();
            self.layout.begin_layout();
            let mut ui = UiBuilder::new(&mut self.layout, &mut self.clicks, &mut self.drag, left_down);
            self.shell.build(&mut ui);
            self.layout.end_layout()
        }

        fn bounds(&self, label: &str) -> BoundingBox {
            self.layout.element_bounds(ElementId::new(label)).unwrap()
        }
    }

    #[test]
    fn test_shell_builds_without_errors() {
        let mut h = Harness::new();
        let commands = h.frame(false);

        assert!(h.layout.errors().is_empty());
        assert!(commands.iter().any(|c| matches!(c, DrawCommand::Text { text, .. } if text == "File")));
        assert_eq!(
            commands
                .iter()
                .filter(|c| matches!(c, DrawCommand::Image { .. }))
                .count(),
            4
        );
    }

    #[test]
    fn test_window_buttons_sit_at_the_right_edge() {
        let mut h = Harness::new();
        h.frame(false);

        let close = h.bounds("CloseButton");
        assert!((close.x + close.width - 800.0).abs() < 1.0e-3);
        assert_eq!(close.height, 32.0);
        let title = h.bounds("TitleBar");
        assert_eq!(title.height, 64.0);
        assert_eq!(title.width, 800.0);
    }

    #[test]
    fn test_hovering_close_registers_close_action() {
        let mut h = Harness::new();
        h.frame(false);
        let close = h.bounds("CloseButton");
        h.layout.set_pointer_state((close.x + 2.0, close.y + 2.0), false);

        let commands = h.frame(false);

        assert_eq!(
            h.clicks.peek().map(|c| c.gesture),
            Some(ClickGesture::Single(DeferredAction::CloseApplication))
        );
        let highlighted = commands.iter().any(|c| {
            matches!(c, DrawCommand::Rectangle { bounds, color, .. } if *bounds == close && color.a > 0.0)
        });
        assert!(highlighted);
    }

    #[test]
    fn test_pressing_the_control_area_arms_drag_and_double_click() {
        let mut h = Harness::new();
        h.frame(false);
        let area = h.bounds("WindowControlArea2");
        h.layout.set_pointer_state((area.x + 5.0, area.y + 5.0), true);

        h.frame(true);

        assert!(h.drag.is_active());
        assert_eq!(
            h.clicks.peek().map(|c| c.gesture),
            Some(ClickGesture::DoubleClick(DeferredAction::ToggleMaximize))
        );
    }
}
