//! Top-down layout over the element tree.
//!
//! ```text
//! root ─► child gets the screen rect
//!          │
//!          ▼
//!   container layout: assigns what it knows of each child's rect
//!          │            (position, forced size), recurses, then reads
//!          │            the child's settled size back
//!          ▼
//!   ASK_PARENT ◄── child could size itself but not place its own children
//!          │       because its x or y was still unset
//!          ▼
//!   parent fixes the child's position and runs it again
//! ```
//!
//! A field the parent has already written is a constraint; a field still
//! [`UNSET`](super::UNSET) is left for the element to decide.

use tracing::warn;

use super::{is_unset, LayoutResult, Pixels, Rect, UNSET};
use crate::element::{CursorTextData, ElementKind, ElementRef, ElementTree, TextData};
use crate::error::{fatal, ContractViolation};
use crate::render::Backend;
use crate::style::BoxStyle;
use crate::text::GlyphAtlas;

/// Default block height when nothing constrains it.
const BLOCK_HEIGHT: Pixels = 100.0;

/// One layout pass over a frame's tree.
pub struct LayoutPass<'a, B: Backend + ?Sized> {
    tree: &'a mut ElementTree,
    atlas: &'a mut GlyphAtlas,
    backend: &'a mut B,
    frame: u64,
    overflows: usize,
}

impl<'a, B: Backend + ?Sized> LayoutPass<'a, B> {
    /// Creates a pass; text is shaped through `atlas` at `frame`.
    pub fn new(tree: &'a mut ElementTree, atlas: &'a mut GlyphAtlas, backend: &'a mut B, frame: u64) -> Self {
        Self {
            tree,
            atlas,
            backend,
            frame,
            overflows: 0,
        }
    }

    /// Lays out the whole tree from its root.
    ///
    /// Returns the number of containers whose content overflowed a fixed size.
    pub fn run(mut self) -> usize {
        if let Some(root) = self.tree.root() {
            self.layout(root);
        }
        self.overflows
    }

    /// Lays out one element and its subtree.
    pub fn layout(&mut self, element: ElementRef) -> LayoutResult {
        match self.tree[element].kind.clone() {
            ElementKind::Root => self.layout_root(element),
            ElementKind::Nothing => self.layout_nothing(element),
            ElementKind::Block { .. } => self.layout_block(element),
            ElementKind::Stack { gap } => self.layout_stack(element, gap),
            ElementKind::Box(style) => self.layout_box(element, &style),
            ElementKind::Center { padding } => self.layout_center(element, padding),
            ElementKind::Cluster { gap } => self.layout_cluster(element, gap),
            ElementKind::LeftRight { gap } => self.layout_left_right(element, gap),
            ElementKind::Fixed { width, height } => self.layout_fixed(element, width, height),
            ElementKind::Scroll { offset } => self.layout_scroll(element, offset.get()),
            ElementKind::Label(data) => self.layout_label(element, &data),
            ElementKind::Text(data) => self.layout_text(element, data),
            ElementKind::CursorText(data) => self.layout_cursor_text(element, data),
        }
    }

    /// Lays out `element` and runs it again if it asked for its final position.
    fn layout_settled(&mut self, element: ElementRef) {
        if self.layout(element).contains(LayoutResult::ASK_PARENT) {
            self.layout(element);
        }
    }

    fn rect(&self, element: ElementRef) -> Rect {
        self.tree[element].layout
    }

    fn rect_mut(&mut self, element: ElementRef) -> &mut Rect {
        &mut self.tree[element].layout
    }

    fn parent_rect(&self, element: ElementRef) -> Rect {
        match self.tree[element].parent {
            Some(parent) => self.tree[parent].layout,
            None => fatal(ContractViolation::Detached {
                kind: self.tree[element].kind.name(),
            }),
        }
    }

    fn exactly_one_child(&self, element: ElementRef) -> ElementRef {
        self.tree.single_child(element)
    }

    fn layout_root(&mut self, root: ElementRef) -> LayoutResult {
        let child = self.exactly_one_child(root);
        let screen = self.rect(root);
        *self.rect_mut(child) = screen;
        self.layout(child);
        LayoutResult::OK
    }

    fn layout_nothing(&mut self, element: ElementRef) -> LayoutResult {
        let rect = self.rect_mut(element);
        if is_unset(rect.width) {
            rect.width = 0.0;
        }
        if is_unset(rect.height) {
            rect.height = 0.0;
        }
        LayoutResult::OK
    }

    fn layout_block(&mut self, element: ElementRef) -> LayoutResult {
        let mut result = LayoutResult::OK;
        let parent_width = self.parent_rect(element).width;
        let rect = self.rect_mut(element);

        if is_unset(rect.width) {
            if is_unset(parent_width) {
                result |= LayoutResult::ASK_PARENT;
            } else {
                rect.width = parent_width * 0.5;
            }
        }
        if is_unset(rect.height) {
            rect.height = BLOCK_HEIGHT;
        }
        result
    }

    fn layout_stack(&mut self, element: ElementRef, gap: Pixels) -> LayoutResult {
        if is_unset(self.rect(element).width) {
            let parent_width = self.parent_rect(element).width;
            if is_unset(parent_width) {
                fatal(ContractViolation::UnsetParentWidth { kind: "stack" });
            }
            self.rect_mut(element).width = parent_width;
        }

        let Rect { x, y: top, width, .. } = self.rect(element);
        let mut y = top;
        let mut count = 0usize;

        let mut next = self.tree[element].first_child;
        while let Some(child) = next {
            let rect = self.rect_mut(child);
            rect.width = width;
            rect.x = x;
            rect.y = y;

            self.layout(child);
            y += self.rect(child).height + gap;
            count += 1;

            next = self.tree[child].next_sibling;
        }

        let rect = self.rect_mut(element);
        if is_unset(rect.height) {
            rect.height = if count == 0 { 0.0 } else { y - top - gap };
        }
        LayoutResult::OK
    }

    fn layout_box(&mut self, element: ElementRef, style: &BoxStyle) -> LayoutResult {
        let child = self.exactly_one_child(element);
        let inset = style.total_inset();
        let horizontal = inset.horizontal_total();
        let vertical = inset.vertical_total();

        let mut result = LayoutResult::OK;
        let parent = self.parent_rect(element);
        let own = self.rect(element);
        let width_was_set = !is_unset(own.width);
        let height_was_set = !is_unset(own.height);

        // Provisional size for children that inherit from us, corrected below.
        if width_was_set {
            self.rect_mut(child).width = own.width - horizontal;
        } else {
            self.rect_mut(element).width = parent.width - horizontal;
        }
        if height_was_set {
            self.rect_mut(child).height = own.height - vertical;
        } else {
            self.rect_mut(element).height = parent.height - vertical;
        }

        if is_unset(own.x) {
            result |= LayoutResult::ASK_PARENT;
        } else {
            self.rect_mut(child).x = own.x + inset.left;
        }
        if is_unset(own.y) {
            result |= LayoutResult::ASK_PARENT;
        } else {
            self.rect_mut(child).y = own.y + inset.top;
        }

        self.layout(child);
        let content = self.rect(child);

        if !width_was_set {
            self.rect_mut(element).width = content.width + horizontal;
        }
        if height_was_set {
            if content.height > own.height - vertical {
                self.overflow(element, content.height, own.height - vertical);
            }
        } else {
            self.rect_mut(element).height = content.height + vertical;
        }
        result
    }

    fn layout_center(&mut self, element: ElementRef, padding: Pixels) -> LayoutResult {
        let child = self.exactly_one_child(element);
        let parent = self.parent_rect(element);
        let own = self.rect(element);
        let height_was_set = !is_unset(own.height);

        let padded_width = if is_unset(own.width) { parent.width } else { own.width };
        self.rect_mut(element).width = padded_width - 2.0 * padding;
        if !height_was_set {
            self.rect_mut(element).height = parent.height;
        }

        self.rect_mut(child).y = own.y;
        let first = self.layout(child);

        self.rect_mut(element).width = padded_width;
        let content = self.rect(child);
        if !height_was_set {
            self.rect_mut(element).height = content.height;
        }
        self.rect_mut(child).x = own.x + (padded_width - content.width) / 2.0;

        if first.contains(LayoutResult::ASK_PARENT) {
            self.layout(child);
        }
        LayoutResult::OK
    }

    fn layout_cluster(&mut self, element: ElementRef, gap: Pixels) -> LayoutResult {
        let parent = self.parent_rect(element);
        let own = self.rect(element);
        let width_was_set = !is_unset(own.width);
        let height_was_set = !is_unset(own.height);

        let width_limit = if width_was_set { own.width } else { parent.width };
        if !width_was_set {
            self.rect_mut(element).width = parent.width;
        }
        if !height_was_set {
            self.rect_mut(element).height = parent.height;
        }

        let mut row_height: Pixels = 0.0;
        let mut max_width: Pixels = 0.0;
        let mut x = own.x;
        let mut y = own.y;

        let mut next = self.tree[element].first_child;
        while let Some(child) = next {
            let rect = self.rect_mut(child);
            rect.x = x;
            rect.y = y;
            self.layout(child);

            let row_is_empty = x <= own.x;
            if x + self.rect(child).width > own.x + width_limit {
                if row_is_empty {
                    // Alone on its row and still too wide: shrink in place.
                    let rect = self.rect_mut(child);
                    rect.width = width_limit;
                    rect.height = UNSET;
                } else {
                    max_width = max_width.max(x - gap - own.x);
                    y += row_height + gap;
                    x = own.x;
                    row_height = 0.0;

                    let rect = self.rect_mut(child);
                    rect.x = x;
                    rect.y = y;
                    if rect.width > width_limit {
                        rect.width = width_limit;
                        rect.height = UNSET;
                    }
                }
                self.layout(child);
            }

            let placed = self.rect(child);
            row_height = row_height.max(placed.height);
            x += placed.width + gap;

            next = self.tree[child].next_sibling;
        }

        let content_height = y + row_height - own.y;
        if height_was_set {
            if content_height > own.height {
                self.overflow(element, content_height, own.height);
            }
        } else {
            self.rect_mut(element).height = content_height;
        }
        if !width_was_set {
            max_width = max_width.max(x - gap - own.x);
            self.rect_mut(element).width = max_width.max(0.0);
        }

        if own.has_position() {
            LayoutResult::OK
        } else {
            LayoutResult::ASK_PARENT
        }
    }

    fn layout_left_right(&mut self, element: ElementRef, gap: Pixels) -> LayoutResult {
        let mut children = self.tree.children(element);
        let (left, right) = match (children.next(), children.next(), children.next()) {
            (Some(left), Some(right), None) => (left, right),
            _ => fatal(ContractViolation::ChildCount {
                kind: "leftright",
                expected: "exactly two",
                found: self.tree.child_count(element),
            }),
        };

        if is_unset(self.rect(element).width) {
            let parent_width = self.parent_rect(element).width;
            self.rect_mut(element).width = parent_width;
        }
        let own = self.rect(element);

        let rect = self.rect_mut(left);
        rect.x = own.x;
        rect.y = own.y;
        self.layout(left);
        let x = own.x + self.rect(left).width + gap;

        if self.rect(left).width > own.width {
            let rect = self.rect_mut(left);
            rect.width = own.width;
            rect.height = UNSET;
            self.layout(left);
        }
        let left_rect = self.rect(left);

        // Trial run for the right side's intrinsic width.
        self.layout(right);
        let fits = x + self.rect(right).width <= own.x + own.width;
        if !fits && self.rect(right).width > own.width {
            let rect = self.rect_mut(right);
            rect.width = own.width;
            rect.height = UNSET;
        }

        let right_width = self.rect(right).width;
        let rect = self.rect_mut(right);
        rect.x = own.x + own.width - right_width;
        rect.y = if fits { own.y } else { own.y + left_rect.height + gap };
        self.layout(right);
        let right_rect = self.rect(right);

        self.rect_mut(element).height = if fits {
            left_rect.height.max(right_rect.height)
        } else {
            left_rect.height + right_rect.height + gap
        };
        LayoutResult::OK
    }

    fn layout_fixed(&mut self, element: ElementRef, width: Pixels, height: Pixels) -> LayoutResult {
        let child = self.exactly_one_child(element);
        let rect = self.rect_mut(element);
        rect.width = width;
        rect.height = height;
        let Rect { x, y, .. } = *rect;

        *self.rect_mut(child) = Rect::new(x, y, width, height);
        self.layout(child);
        if is_unset(x) || is_unset(y) {
            LayoutResult::ASK_PARENT
        } else {
            LayoutResult::OK
        }
    }

    fn layout_scroll(&mut self, element: ElementRef, offset: Pixels) -> LayoutResult {
        let child = self.exactly_one_child(element);
        let own = self.rect(element);

        let rect = self.rect_mut(child);
        rect.x = own.x;
        rect.y = own.y - offset;
        self.layout_settled(child);

        let content = self.rect(child);
        let rect = self.rect_mut(element);
        if is_unset(rect.width) {
            rect.width = content.width;
        }
        if is_unset(rect.height) {
            rect.height = content.height;
        }
        LayoutResult::OK
    }

    /// Width a text run wraps at: its own width if set, else the parent's.
    fn wrap_width(&self, element: ElementRef) -> Pixels {
        let width = self.rect(element).width;
        if is_unset(width) {
            self.parent_rect(element).width
        } else {
            width
        }
    }

    /// One unwrapped line, measured directly; clipped to the parent's width.
    fn layout_label(&mut self, element: ElementRef, data: &TextData) -> LayoutResult {
        let parent_width = self.parent_rect(element).width;
        let measured = data.first_line_indent
            + self.backend.measure(self.tree.text(data.span), data.style.font_size);

        let rect = self.rect_mut(element);
        if is_unset(rect.width) {
            rect.width = if is_unset(parent_width) {
                measured
            } else {
                measured.min(parent_width)
            };
        }
        if is_unset(rect.height) {
            rect.height = data.style.font_size;
        }
        LayoutResult::OK
    }

    fn layout_text(&mut self, element: ElementRef, mut data: TextData) -> LayoutResult {
        let wrap_width = self.wrap_width(element);
        let cached = self.atlas.get_or_render(
            self.tree.text(data.span),
            wrap_width,
            data.style.font_size,
            data.first_line_indent,
            self.frame,
            &mut *self.backend,
        );

        data.wrap_width = wrap_width;
        let node = &mut self.tree[element];
        node.kind = ElementKind::Text(data);
        if is_unset(node.layout.width) {
            node.layout.width = cached.actual_width;
        }
        if is_unset(node.layout.height) {
            node.layout.height = cached.height;
        }
        LayoutResult::OK
    }

    fn layout_cursor_text(&mut self, element: ElementRef, mut data: CursorTextData) -> LayoutResult {
        let wrap_width = self.wrap_width(element);
        let font_size = data.style.font_size;
        let (before, after) = self.tree.text(data.span).split_at(data.cursor);

        let head = self
            .atlas
            .get_or_render(before, wrap_width, font_size, 0.0, self.frame, &mut *self.backend);
        let tail = self
            .atlas
            .get_or_render(after, wrap_width, font_size, head.pen.0, self.frame, &mut *self.backend);

        data.wrap_width = wrap_width;
        data.pen = head.pen;
        let node = &mut self.tree[element];
        node.kind = ElementKind::CursorText(data);
        if is_unset(node.layout.width) {
            node.layout.width = if head.pen.1 > 0.0 {
                wrap_width
            } else {
                head.actual_width.max(tail.actual_width)
            };
        }
        if is_unset(node.layout.height) {
            node.layout.height = head.pen.1 + tail.height;
        }
        LayoutResult::OK
    }

    fn overflow(&mut self, element: ElementRef, content: Pixels, available: Pixels) {
        self.overflows += 1;
        warn!(
            kind = self.tree[element].kind.name(),
            content,
            available,
            "content overflows fixed container height"
        );
    }
}
