//! Immediate-mode layout engine
//!
//! The UI tree is rebuilt every frame through a builder API:
//!
//! ```text
//! begin_layout()
//!   open(decl) ... hovered() ... text(..) ... close()
//! end_layout() -> Vec<DrawCommand>
//! ```
//!
//! Hover queries made while the tree is being built test the pointer against
//! the boxes computed at the end of the previous frame, so handlers can react
//! before the current frame's layout exists.

use std::collections::{HashMap, HashSet};

use super::core::{
    AlignX, AlignY, ClipConfig, ElementDeclaration, ElementId, LayoutDirection, Sizing, TextConfig,
};
use crate::render::text::TextMeasurer;
use crate::ui::rendering::{BorderWidth, BoundingBox, Color, DrawCommand};
use crate::ui::UiError;

/// Pixels scrolled per scroll wheel unit
pub const SCROLL_SPEED: f32 = 10.0;

const ROOT_LABEL: &str = "__root";
const DEBUG_OUTLINE: Color = Color::rgba(1.0, 0.0, 1.0, 1.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

impl Axis {
    const fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
        }
    }

    fn is_main(self, direction: LayoutDirection) -> bool {
        matches!(
            (self, direction),
            (Self::X, LayoutDirection::LeftToRight) | (Self::Y, LayoutDirection::TopToBottom)
        )
    }
}

#[derive(Debug)]
enum NodeKind {
    Element(ElementDeclaration),
    Text { text: String, config: TextConfig },
}

#[derive(Debug)]
struct Node {
    id: ElementId,
    kind: NodeKind,
    children: Vec<usize>,
    measured: [f32; 2],
    fit: [f32; 2],
    content: [f32; 2],
    size: [f32; 2],
    pos: [f32; 2],
}

impl Node {
    fn new(id: ElementId, kind: NodeKind, measured: [f32; 2]) -> Self {
        Self {
            id,
            kind,
            children: Vec::new(),
            measured,
            fit: [0.0; 2],
            content: [0.0; 2],
            size: [0.0; 2],
            pos: [0.0; 2],
        }
    }

    fn sizing(&self, axis: Axis) -> Sizing {
        match &self.kind {
            NodeKind::Element(decl) => match axis {
                Axis::X => decl.width,
                Axis::Y => decl.height,
            },
            NodeKind::Text { .. } => Sizing::Fit,
        }
    }

    fn bounds(&self) -> BoundingBox {
        BoundingBox::new(self.pos[0], self.pos[1], self.size[0], self.size[1])
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct ScrollState {
    offset: [f32; 2],
    viewport: BoundingBox,
    content: [f32; 2],
    clip: ClipConfig,
}

impl ScrollState {
    fn clamp(&mut self) {
        let max = [
            (self.content[0] - self.viewport.width).max(0.0),
            (self.content[1] - self.viewport.height).max(0.0),
        ];
        for axis in 0..2 {
            self.offset[axis] = self.offset[axis].clamp(-max[axis], 0.0);
        }
    }
}

fn padding_along(decl: &ElementDeclaration, axis: Axis) -> (f32, f32) {
    match axis {
        Axis::X => (decl.padding.left, decl.padding.right),
        Axis::Y => (decl.padding.top, decl.padding.bottom),
    }
}

fn align_offset(decl: &ElementDeclaration, axis: Axis, free: f32) -> f32 {
    let free = free.max(0.0);
    match axis {
        Axis::X => match decl.child_alignment.x {
            AlignX::Left => 0.0,
            AlignX::Center => free / 2.0,
            AlignX::Right => free,
        },
        Axis::Y => match decl.child_alignment.y {
            AlignY::Top => 0.0,
            AlignY::Center => free / 2.0,
            AlignY::Bottom => free,
        },
    }
}

/// Builds the per-frame element tree and turns it into draw commands
pub struct LayoutEngine {
    dimensions: (f32, f32),
    pointer: (f32, f32),
    pointer_down: bool,
    debug: bool,
    measurer: Box<dyn TextMeasurer>,
    nodes: Vec<Node>,
    open: Vec<usize>,
    seen: HashSet<ElementId>,
    previous_boxes: HashMap<ElementId, BoundingBox>,
    scroll: HashMap<ElementId, ScrollState>,
    errors: Vec<UiError>,
}

impl LayoutEngine {
    /// Create an engine for a `width` x `height` surface
    pub fn new(width: f32, height: f32, measurer: Box<dyn TextMeasurer>) -> Self {
        Self {
            dimensions: (width, height),
            pointer: (0.0, 0.0),
            pointer_down: false,
            debug: false,
            measurer,
            nodes: Vec::new(),
            open: Vec::new(),
            seen: HashSet::new(),
            previous_boxes: HashMap::new(),
            scroll: HashMap::new(),
            errors: Vec::new(),
        }
    }

    /// Resize the layout surface
    pub fn set_dimensions(&mut self, width: f32, height: f32) {
        self.dimensions = (width, height);
    }

    /// Current layout surface size
    pub fn dimensions(&self) -> (f32, f32) {
        self.dimensions
    }

    /// Record the pointer used by hover queries of the next frame
    pub fn set_pointer_state(&mut self, position: (f32, f32), down: bool) {
        self.pointer = position;
        self.pointer_down = down;
    }

    /// Last recorded pointer position and button state
    pub fn pointer_state(&self) -> ((f32, f32), bool) {
        (self.pointer, self.pointer_down)
    }

    /// Enable or disable element outlines
    pub fn set_debug_mode(&mut self, enabled: bool) {
        self.debug = enabled;
    }

    /// Whether element outlines are drawn
    pub fn debug_mode(&self) -> bool {
        self.debug
    }

    /// Errors reported while building the last frame
    pub fn errors(&self) -> &[UiError] {
        &self.errors
    }

    /// Measurer used for text leaves
    pub fn measurer(&self) -> &dyn TextMeasurer {
        self.measurer.as_ref()
    }

    fn report(&mut self, error: UiError) {
        log::error!("Layout error: {error}");
        self.errors.push(error);
    }

    /// Start a new frame; the root element spans the whole surface
    pub fn begin_layout(&mut self) {
        self.nodes.clear();
        self.open.clear();
        self.seen.clear();
        self.errors.clear();

        let (width, height) = self.dimensions;
        let root = ElementDeclaration::new(ROOT_LABEL).size(Sizing::Fixed(width), Sizing::Fixed(height));
        let id = ElementId::new(ROOT_LABEL);
        self.seen.insert(id);
        self.nodes.push(Node::new(id, NodeKind::Element(root), [0.0; 2]));
        self.open.push(0);
    }

    fn push_child(&mut self, node: Node) -> Option<usize> {
        let Some(&parent) = self.open.last() else {
            self.report(UiError::OutsideLayout);
            return None;
        };
        let index = self.nodes.len();
        self.nodes.push(node);
        self.nodes[parent].children.push(index);
        Some(index)
    }

    fn next_child_id(&self) -> Option<ElementId> {
        self.open
            .last()
            .map(|&parent| ElementId::child(self.nodes[parent].id, self.nodes[parent].children.len()))
    }

    /// Open an element as a child of the currently open one
    pub fn open(&mut self, decl: ElementDeclaration) {
        let Some(auto_id) = self.next_child_id() else {
            self.report(UiError::OutsideLayout);
            return;
        };
        let id = decl.id.unwrap_or(auto_id);
        if !self.seen.insert(id) {
            self.report(UiError::DuplicateId(decl.label.clone()));
        }

        if let Some(index) = self.push_child(Node::new(id, NodeKind::Element(decl), [0.0; 2])) {
            self.open.push(index);
        }
    }

    /// Close the most recently opened element
    pub fn close(&mut self) {
        if self.open.len() <= 1 {
            self.report(UiError::UnbalancedClose);
            return;
        }
        self.open.pop();
    }

    /// Add a text leaf to the currently open element
    pub fn text(&mut self, text: &str, config: TextConfig) {
        let Some(id) = self.next_child_id() else {
            self.report(UiError::OutsideLayout);
            return;
        };
        let dims = self.measurer.measure(text, config.font_size);
        let kind = NodeKind::Text {
            text: text.to_string(),
            config,
        };
        self.push_child(Node::new(id, kind, [dims.width, dims.height]));
    }

    /// Whether the pointer was over the currently open element last frame
    pub fn hovered(&self) -> bool {
        self.open
            .last()
            .is_some_and(|&index| self.pointer_over(self.nodes[index].id))
    }

    /// Whether the pointer was over element `id` last frame
    pub fn pointer_over(&self, id: ElementId) -> bool {
        self.previous_boxes
            .get(&id)
            .is_some_and(|bounds| bounds.contains(self.pointer.0, self.pointer.1))
    }

    /// Box computed for `id` in the last completed frame
    pub fn element_bounds(&self, id: ElementId) -> Option<BoundingBox> {
        self.previous_boxes.get(&id).copied()
    }

    /// Scroll the innermost scroll container under the pointer
    ///
    /// Returns whether a container was scrolled.
    pub fn update_scroll_containers(&mut self, delta: (f32, f32)) -> bool {
        let (px, py) = self.pointer;
        let target = self
            .scroll
            .values_mut()
            .filter(|state| state.viewport.contains(px, py))
            .min_by(|a, b| {
                let area = |s: &ScrollState| s.viewport.width * s.viewport.height;
                area(a).total_cmp(&area(b))
            });

        let Some(state) = target else {
            return false;
        };
        if state.clip.horizontal {
            state.offset[0] += delta.0 * SCROLL_SPEED;
        }
        if state.clip.vertical {
            state.offset[1] += delta.1 * SCROLL_SPEED;
        }
        state.clamp();
        true
    }

    /// Current scroll offset of container `id`
    pub fn scroll_offset(&self, id: ElementId) -> Option<(f32, f32)> {
        self.scroll.get(&id).map(|state| (state.offset[0], state.offset[1]))
    }

    /// Finish the frame and return draw commands in paint order
    pub fn end_layout(&mut self) -> Vec<DrawCommand> {
        if self.open.is_empty() {
            self.report(UiError::OutsideLayout);
            return Vec::new();
        }
        if self.open.len() > 1 {
            self.report(UiError::UnclosedElements(self.open.len() - 1));
        }
        self.open.clear();

        for axis in [Axis::X, Axis::Y] {
            self.compute_fit(0, axis);
        }
        self.nodes[0].size = [self.dimensions.0, self.dimensions.1];
        for axis in [Axis::X, Axis::Y] {
            self.resolve(0, axis);
        }
        self.nodes[0].pos = [0.0, 0.0];
        self.position(0);

        self.previous_boxes.clear();
        for node in &self.nodes {
            self.previous_boxes.insert(node.id, node.bounds());
        }
        self.update_scroll_states();

        let mut commands = Vec::with_capacity(self.nodes.len() * 2);
        self.emit(0, &mut commands);
        if self.debug {
            self.emit_debug_outlines(&mut commands);
        }
        commands
    }

    fn compute_fit(&mut self, index: usize, axis: Axis) -> f32 {
        let children = self.nodes[index].children.clone();
        let contributions: Vec<f32> = children
            .iter()
            .map(|&child| {
                let fit = self.compute_fit(child, axis);
                match self.nodes[child].sizing(axis) {
                    Sizing::Percent(_) => 0.0,
                    _ => fit,
                }
            })
            .collect();

        let node = &mut self.nodes[index];
        let (content, fit) = match &node.kind {
            NodeKind::Text { .. } => {
                let measured = node.measured[axis.index()];
                (measured, measured)
            }
            NodeKind::Element(decl) => {
                let (before, after) = padding_along(decl, axis);
                let inner = if axis.is_main(decl.direction) {
                    let gaps = decl.child_gap * contributions.len().saturating_sub(1) as f32;
                    contributions.iter().sum::<f32>() + gaps
                } else {
                    contributions.iter().copied().fold(0.0, f32::max)
                };
                let content = inner + before + after;
                let fit = match node.sizing(axis) {
                    Sizing::Fixed(value) => value,
                    _ => content,
                };
                (content, fit)
            }
        };
        node.content[axis.index()] = content;
        node.fit[axis.index()] = fit;
        fit
    }

    fn resolve(&mut self, index: usize, axis: Axis) {
        let a = axis.index();
        let (inner, main, gap) = match &self.nodes[index].kind {
            NodeKind::Text { .. } => return,
            NodeKind::Element(decl) => {
                let (before, after) = padding_along(decl, axis);
                (
                    self.nodes[index].size[a] - before - after,
                    axis.is_main(decl.direction),
                    decl.child_gap,
                )
            }
        };

        let children = self.nodes[index].children.clone();
        let gaps = if main {
            gap * children.len().saturating_sub(1) as f32
        } else {
            0.0
        };

        let mut fixed_total = 0.0;
        let mut grow_count = 0usize;
        for &child in &children {
            let node = &mut self.nodes[child];
            let size = match node.sizing(axis) {
                Sizing::Fixed(value) => value,
                Sizing::Percent(fraction) => (inner - gaps).max(0.0) * fraction,
                Sizing::Fit => node.fit[a],
                Sizing::Grow if main => {
                    grow_count += 1;
                    continue;
                }
                Sizing::Grow => inner.max(node.fit[a]),
            };
            node.size[a] = size;
            fixed_total += size;
        }

        if grow_count > 0 {
            let share = ((inner - gaps - fixed_total) / grow_count as f32).max(0.0);
            for &child in &children {
                let node = &mut self.nodes[child];
                if node.sizing(axis) == Sizing::Grow {
                    node.size[a] = share.max(node.fit[a]);
                }
            }
        }

        for child in children {
            self.resolve(child, axis);
        }
    }

    fn position(&mut self, index: usize) {
        let NodeKind::Element(decl) = &self.nodes[index].kind else {
            return;
        };
        let node = &self.nodes[index];
        let children = node.children.clone();
        let scroll = self
            .scroll
            .get(&node.id)
            .filter(|_| decl.clip.is_some())
            .map_or([0.0; 2], |state| state.offset);

        let mut starts = [0.0; 2];
        let mut inners = [0.0; 2];
        for axis in [Axis::X, Axis::Y] {
            let a = axis.index();
            let (before, after) = padding_along(decl, axis);
            starts[a] = node.pos[a] + before + scroll[a];
            inners[a] = node.size[a] - before - after;
        }

        let main = if Axis::X.is_main(decl.direction) { Axis::X } else { Axis::Y };
        let cross = if main == Axis::X { Axis::Y } else { Axis::X };
        let (m, c) = (main.index(), cross.index());

        let total: f32 = children.iter().map(|&child| self.nodes[child].size[m]).sum::<f32>()
            + decl.child_gap * children.len().saturating_sub(1) as f32;
        let mut cursor = starts[m] + align_offset(decl, main, inners[m] - total);

        let mut placements = Vec::with_capacity(children.len());
        for &child in &children {
            let size = self.nodes[child].size;
            let cross_pos = starts[c] + align_offset(decl, cross, inners[c] - size[c]);
            let mut pos = [0.0; 2];
            pos[m] = cursor;
            pos[c] = cross_pos;
            placements.push((child, pos));
            cursor += size[m] + decl.child_gap;
        }

        for (child, pos) in placements {
            self.nodes[child].pos = pos;
            self.position(child);
        }
    }

    fn update_scroll_states(&mut self) {
        for node in &self.nodes {
            let NodeKind::Element(decl) = &node.kind else {
                continue;
            };
            let Some(clip) = decl.clip else {
                continue;
            };
            let state = self.scroll.entry(node.id).or_default();
            state.viewport = node.bounds();
            state.content = node.content;
            state.clip = clip;
            state.clamp();
        }
        let seen = &self.seen;
        self.scroll.retain(|id, _| seen.contains(id));
    }

    fn emit(&self, index: usize, out: &mut Vec<DrawCommand>) {
        let node = &self.nodes[index];
        let bounds = node.bounds();
        let decl = match &node.kind {
            NodeKind::Text { text, config } => {
                out.push(DrawCommand::Text {
                    bounds,
                    text: text.clone(),
                    font_size: config.font_size,
                    color: config.color,
                });
                return;
            }
            NodeKind::Element(decl) => decl,
        };

        if decl.clip.is_some() {
            out.push(DrawCommand::ClipStart { bounds });
        }
        if decl.background.a > 0.0 {
            out.push(DrawCommand::Rectangle {
                bounds,
                color: decl.background,
                corner_radius: decl.corner_radius,
            });
        }
        if let Some(texture) = decl.image {
            out.push(DrawCommand::Image {
                bounds,
                texture,
                tint: Color::WHITE,
                corner_radius: decl.corner_radius,
            });
        }
        for &child in &node.children {
            self.emit(child, out);
        }
        if let Some(border) = decl.border.filter(|border| !border.width.is_zero()) {
            out.push(DrawCommand::Border {
                bounds,
                color: border.color,
                width: border.width,
                corner_radius: decl.corner_radius,
            });
        }
        if decl.clip.is_some() {
            out.push(DrawCommand::ClipEnd { bounds });
        }
    }

    fn emit_debug_outlines(&self, out: &mut Vec<DrawCommand>) {
        for node in self.nodes.iter().skip(1) {
            if matches!(node.kind, NodeKind::Element(_)) {
                out.push(DrawCommand::Border {
                    bounds: node.bounds(),
                    color: DEBUG_OUTLINE,
                    width: BorderWidth::all(1),
                    corner_radius: Default::default(),
                });
            }
        }
    }
}
