//! Draw traversal.
//!
//! Walks the laid out tree in construction order and issues backend calls.
//! Nothing here changes a rectangle; text is looked up in the atlas with the
//! same key layout used, so a settled frame draws without re-rendering.

use crate::element::{CursorTextData, ElementKind, ElementRef, ElementTree, TextData};
use crate::layout::{Pixels, Rect};
use crate::render::Backend;
use crate::style::{BoxStyle, Color, Margin};
use crate::text::{CachedText, GlyphAtlas};

/// Caret width in pixels.
const CARET_WIDTH: Pixels = 2.0;

/// One draw pass over a laid out tree.
pub struct DrawPass<'a, B: Backend + ?Sized> {
    tree: &'a ElementTree,
    atlas: &'a mut GlyphAtlas,
    backend: &'a mut B,
    frame: u64,
}

impl<'a, B: Backend + ?Sized> DrawPass<'a, B> {
    /// Creates a pass.
    pub fn new(tree: &'a ElementTree, atlas: &'a mut GlyphAtlas, backend: &'a mut B, frame: u64) -> Self {
        Self {
            tree,
            atlas,
            backend,
            frame,
        }
    }

    /// Draws the whole tree.
    pub fn run(mut self) {
        if let Some(root) = self.tree.root() {
            self.draw(root);
        }
    }

    fn draw(&mut self, element: ElementRef) {
        let tree = self.tree;
        let node = &tree[element];
        match &node.kind {
            ElementKind::Nothing => {}
            ElementKind::Block { color } => self.backend.fill_rect(node.layout, *color),
            ElementKind::Box(style) => {
                self.draw_box(node.layout, style);
                self.draw_children(element);
            }
            ElementKind::Scroll { .. } => {
                self.backend.push_scissor(node.layout);
                self.draw_children(element);
                self.backend.pop_scissor();
            }
            ElementKind::Label(data) => self.draw_label(node.layout, data),
            ElementKind::Text(data) => self.draw_text(node.layout, data),
            ElementKind::CursorText(data) => self.draw_cursor_text(node.layout, data),
            ElementKind::Root
            | ElementKind::Stack { .. }
            | ElementKind::Center { .. }
            | ElementKind::Cluster { .. }
            | ElementKind::LeftRight { .. }
            | ElementKind::Fixed { .. } => self.draw_children(element),
        }
    }

    fn draw_children(&mut self, element: ElementRef) {
        let tree = self.tree;
        for child in tree.children(element) {
            self.draw(child);
        }
    }

    fn draw_box(&mut self, bounds: Rect, style: &BoxStyle) {
        if !style.background.is_transparent() {
            self.backend.fill_rect(bounds, style.background);
        }
        if !style.border_color.is_transparent() {
            self.draw_border(bounds, style.border, style.border_color);
        }
    }

    /// Strokes a uniform border; uneven borders are filled one side at a time.
    #[allow(clippy::float_cmp)]
    fn draw_border(&mut self, bounds: Rect, border: Margin, color: Color) {
        let Margin { left, right, top, bottom } = border;
        if left == right && left == top && left == bottom {
            if left > 0.0 {
                self.backend.stroke_rect(bounds, left, color);
            }
            return;
        }

        let inner_height = bounds.height - top - bottom;
        let sides = [
            Rect::new(bounds.x, bounds.y, bounds.width, top),
            Rect::new(bounds.x, bounds.bottom() - bottom, bounds.width, bottom),
            Rect::new(bounds.x, bounds.y + top, left, inner_height),
            Rect::new(bounds.right() - right, bounds.y + top, right, inner_height),
        ];
        for side in sides {
            if side.width > 0.0 && side.height > 0.0 {
                self.backend.fill_rect(side, color);
            }
        }
    }

    fn cached(&mut self, text: &str, wrap_width: Pixels, font_size: Pixels, indent: Pixels) -> CachedText {
        self.atlas
            .get_or_render(text, wrap_width, font_size, indent, self.frame, &mut *self.backend)
    }

    /// Copies the top-left `dest`-sized part of a run's texture to `dest`.
    fn blit_run(&mut self, run: &CachedText, dest: Rect, tint: Color) {
        let source = Rect::new(0.0, 0.0, dest.width, dest.height);
        self.backend.blit(run.texture.id, source, dest, tint);
    }

    fn draw_label(&mut self, bounds: Rect, data: &TextData) {
        let tree = self.tree;
        self.backend.draw_text(
            tree.text(data.span),
            bounds.x + data.first_line_indent,
            bounds.y,
            data.style.font_size,
            data.style.color,
        );
    }

    fn draw_text(&mut self, bounds: Rect, data: &TextData) {
        let tree = self.tree;
        let run = self.cached(
            tree.text(data.span),
            data.wrap_width,
            data.style.font_size,
            data.first_line_indent,
        );
        self.blit_run(&run, bounds, data.style.color);
    }

    fn draw_cursor_text(&mut self, bounds: Rect, data: &CursorTextData) {
        let font_size = data.style.font_size;
        let tree = self.tree;
        let (before, after) = tree.text(data.span).split_at(data.cursor);

        let head = self.cached(before, data.wrap_width, font_size, 0.0);
        let tail = self.cached(after, data.wrap_width, font_size, data.pen.0);

        let head_width = if data.pen.1 > 0.0 { data.wrap_width } else { head.actual_width };
        let head_dest = Rect::new(bounds.x, bounds.y, head_width, head.height);
        let tail_dest = Rect::new(bounds.x, bounds.y + data.pen.1, tail.actual_width, tail.height);
        self.blit_run(&head, head_dest, data.style.color);
        self.blit_run(&tail, tail_dest, data.style.color);

        let caret = Rect::new(bounds.x + data.pen.0, bounds.y + data.pen.1, CARET_WIDTH, font_size);
        self.backend.fill_rect(caret, data.caret);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AtlasConfig;
    use crate::layout::LayoutPass;
    use crate::render::{CommandBuffer, RenderCommand};
    use crate::widget::ScrollOffset;

    #[test]
    fn test_scroll_brackets_children_with_scissor() {
        let mut tree = ElementTree::new(16, 64, 4);
        tree.begin_root(Rect::new(0.0, 0.0, 300.0, 200.0));
        tree.push_element(ElementKind::Fixed {
            width: 100.0,
            height: 50.0,
        });
        tree.start_adding_children();
        tree.push_element(ElementKind::Scroll {
            offset: ScrollOffset::default(),
        });
        tree.start_adding_children();
        tree.push_element(ElementKind::Box(BoxStyle {
            background: Color::WHITE,
            padding: Margin::symmetric(4.0),
            border_color: Color::BLACK,
            border: Margin::symmetric(1.0),
        }));
        tree.start_adding_children();
        tree.push_element(ElementKind::Block { color: Color::RED });
        tree.stop_adding_children();
        tree.stop_adding_children();
        tree.stop_adding_children();

        let mut atlas = GlyphAtlas::new(AtlasConfig::default(), 0.1);
        let mut backend = CommandBuffer::new();
        LayoutPass::new(&mut tree, &mut atlas, &mut backend, 1).run();
        backend.begin_frame();
        DrawPass::new(&tree, &mut atlas, &mut backend, 1).run();

        let commands = backend.commands();
        assert_eq!(
            commands.first(),
            Some(&RenderCommand::PushClip {
                bounds: Rect::new(0.0, 0.0, 100.0, 50.0)
            })
        );
        assert!(matches!(commands[1], RenderCommand::Rect { color, .. } if color == Color::WHITE));
        assert!(matches!(commands[2], RenderCommand::RectOutline { width, .. } if width == 1.0));
        assert!(matches!(commands[3], RenderCommand::Rect { color, .. } if color == Color::RED));
        assert_eq!(commands.last(), Some(&RenderCommand::PopClip));
    }

    #[test]
    fn test_uneven_border_fills_each_side() {
        let mut tree = ElementTree::new(16, 64, 4);
        tree.begin_root(Rect::new(0.0, 0.0, 300.0, 200.0));
        tree.push_element(ElementKind::Fixed {
            width: 100.0,
            height: 50.0,
        });
        tree.start_adding_children();
        tree.push_element(ElementKind::Box(BoxStyle {
            background: Color::TRANSPARENT,
            padding: Margin::NONE,
            border_color: Color::BLACK,
            border: Margin {
                top: 5.0,
                ..Margin::horizontal(2.0)
            },
        }));
        tree.start_adding_children();
        tree.push_element(ElementKind::Nothing);
        tree.stop_adding_children();
        tree.stop_adding_children();

        let mut atlas = GlyphAtlas::new(AtlasConfig::default(), 0.1);
        let mut backend = CommandBuffer::new();
        LayoutPass::new(&mut tree, &mut atlas, &mut backend, 1).run();
        backend.begin_frame();
        DrawPass::new(&tree, &mut atlas, &mut backend, 1).run();

        let sides: Vec<Rect> = backend
            .commands()
            .iter()
            .filter_map(|command| match command {
                RenderCommand::Rect { bounds, color } if *color == Color::BLACK => Some(*bounds),
                _ => None,
            })
            .collect();
        // Top 5, no bottom, left and right 2 each.
        assert_eq!(
            sides,
            vec![
                Rect::new(0.0, 0.0, 100.0, 5.0),
                Rect::new(0.0, 5.0, 2.0, 45.0),
                Rect::new(98.0, 5.0, 2.0, 45.0),
            ]
        );
        assert!(!backend
            .commands()
            .iter()
            .any(|command| matches!(command, RenderCommand::RectOutline { .. })));
    }
}
