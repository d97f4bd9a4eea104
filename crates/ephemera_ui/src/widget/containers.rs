//! Layout containers and placeholder leaves.

use crate::element::{ElementKind, ElementRef};
use crate::frame::Frame;
use crate::layout::Pixels;
use crate::style::{BoxStyle, Color};

impl Frame<'_> {
    /// Vertical flow; children take the stack's width.
    pub fn stack<R>(&mut self, gap: Pixels, build: impl FnOnce(&mut Self) -> R) -> R {
        self.scope(ElementKind::Stack { gap }, build)
    }

    /// Padding, border and background around exactly one child.
    pub fn boxed<R>(&mut self, style: BoxStyle, build: impl FnOnce(&mut Self) -> R) -> R {
        self.scope(ElementKind::Box(style), build)
    }

    /// Centers exactly one child horizontally.
    pub fn center<R>(&mut self, padding: Pixels, build: impl FnOnce(&mut Self) -> R) -> R {
        self.scope(ElementKind::Center { padding }, build)
    }

    /// Lays children out in rows, wrapping at the available width.
    pub fn cluster<R>(&mut self, gap: Pixels, build: impl FnOnce(&mut Self) -> R) -> R {
        self.scope(ElementKind::Cluster { gap }, build)
    }

    /// Pushes the first of exactly two children left and the second right.
    ///
    /// The right child drops below the left one if they do not fit on one
    /// line.
    pub fn left_right<R>(&mut self, gap: Pixels, build: impl FnOnce(&mut Self) -> R) -> R {
        self.scope(ElementKind::LeftRight { gap }, build)
    }

    /// Forces itself and exactly one child to `width` × `height`.
    pub fn fixed<R>(
        &mut self,
        width: Pixels,
        height: Pixels,
        build: impl FnOnce(&mut Self) -> R,
    ) -> R {
        self.scope(ElementKind::Fixed { width, height }, build)
    }

    /// Red debug block: half the parent's width, 100 tall.
    pub fn block(&mut self) -> ElementRef {
        self.block_colored(Color::RED)
    }

    /// Debug block with a custom color.
    pub fn block_colored(&mut self, color: Color) -> ElementRef {
        self.leaf(ElementKind::Block { color })
    }

    /// Zero-sized placeholder.
    pub fn nothing(&mut self) -> ElementRef {
        self.leaf(ElementKind::Nothing)
    }
}

#[cfg(test)]
mod tests {
    use crate::element::ElementKind;
    use crate::{FrameInfo, InputState, Ui};

    #[test]
    fn test_closures_nest_scopes() {
        let mut ui = Ui::default();
        let input = InputState::new();
        let mut frame = ui.begin_frame(&input, FrameInfo::new(800.0, 600.0, 0.016));

        let answer = frame.stack(0.0, |f| {
            f.left_right(0.0, |f| {
                f.nothing();
                f.fixed(10.0, 10.0, |f| f.block());
            });
            f.block();
            42
        });
        assert_eq!(answer, 42);

        let tree = frame.tree();
        let root = tree.root().unwrap();
        let stack = tree.single_child(root);
        let kinds: Vec<_> = tree.children(stack).map(|child| tree[child].kind.name()).collect();
        assert_eq!(kinds, vec!["leftright", "block"]);
    }
}
