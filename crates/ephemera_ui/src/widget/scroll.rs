//! Scroll regions.

use std::cell::Cell;
use std::rc::Rc;

use crate::element::{ElementKind, ElementRef};
use crate::frame::Frame;
use crate::handler::{Handler, HandlerContext};
use crate::layout::Pixels;

/// Vertical scroll offset kept by the caller across frames.
///
/// Clones share the value: the region reads it during layout and its
/// handler writes it during replay.
#[derive(Debug, Clone, Default)]
pub struct ScrollOffset(Rc<Cell<Pixels>>);

impl ScrollOffset {
    /// Creates an offset.
    #[must_use]
    pub fn new(offset: Pixels) -> Self {
        Self(Rc::new(Cell::new(offset)))
    }

    /// Returns the offset.
    #[must_use]
    pub fn get(&self) -> Pixels {
        self.0.get()
    }

    /// Sets the offset; the next replay clamps it into range.
    pub fn set(&self, offset: Pixels) {
        self.0.set(offset);
    }

    /// Returns true if both handles share one value.
    #[must_use]
    pub fn same_as(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Frame<'_> {
    /// Clips exactly one child to this region and scrolls it by `offset`.
    ///
    /// Give the region a size with an enclosing [`Frame::fixed`], otherwise
    /// it grows to its content and never scrolls. Interactive widgets inside
    /// only react where the region is visible.
    pub fn scroll<R>(&mut self, offset: &ScrollOffset, build: impl FnOnce(&mut Self) -> R) -> R {
        let element = self.leaf(ElementKind::Scroll {
            offset: offset.clone(),
        });
        self.push_handler(Handler::Scroll, element);

        let tree = self.tree_mut();
        tree.start_bounding_box(element);
        tree.start_adding_children();
        let result = build(self);
        let tree = self.tree_mut();
        tree.stop_adding_children();
        tree.end_bounding_box();
        result
    }
}

/// Applies the wheel if the pointer is over the region, then clamps the
/// offset to `[0, content height - region height]`.
pub(crate) fn handle(ctx: &mut HandlerContext<'_>, element: ElementRef) {
    let tree = ctx.tree;
    let node = &tree[element];
    let ElementKind::Scroll { offset } = &node.kind else {
        return;
    };

    if ctx.input.pointer_in(&node.layout) {
        ctx.state.claim_wheel(offset);
        let dy = -ctx.input.wheel_delta.1 * ctx.scroll_speed * ctx.frame_time;
        offset.set(offset.get() + dy);
    }

    let content = tree[tree.single_child(element)].layout;
    let max = content.height - node.layout.height;
    if offset.get() > max {
        offset.set(max);
    }
    if offset.get() < 0.0 {
        offset.set(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_value() {
        let offset = ScrollOffset::new(5.0);
        let clone = offset.clone();
        clone.set(12.0);

        assert_eq!(offset.get(), 12.0);
        assert!(offset.same_as(&clone));
        assert!(!offset.same_as(&ScrollOffset::new(12.0)));
    }
}
