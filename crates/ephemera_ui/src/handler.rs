//! Deferred interaction handlers.
//!
//! Widgets cannot react to input while they are being built: their
//! rectangles do not exist until layout. Instead they queue a [`Handler`]
//! next to their element, and the queue is replayed in push order once
//! layout has finished and before anything is drawn.

use crate::element::{ElementRef, ElementTree};
use crate::input::InputState;
use crate::interaction::InteractionState;
use crate::layout::Pixels;
use crate::widget::{button, scroll, text_input, TextField};

/// What to run for a queued element.
#[derive(Debug, Clone)]
pub enum Handler {
    /// Hover, press and click for the element's id.
    Button,
    /// Wheel scrolling of a scroll element's offset.
    Scroll,
    /// Focus and editing of a text field.
    TextInput(TextField),
}

/// Everything a handler may read or change during replay.
pub struct HandlerContext<'a> {
    /// The laid out tree.
    pub tree: &'a ElementTree,
    /// Input of this frame.
    pub input: &'a InputState,
    /// Cross-frame state handlers update.
    pub state: &'a mut InteractionState,
    /// Seconds since the previous frame.
    pub frame_time: f32,
    /// Wheel scroll speed in pixels per second.
    pub scroll_speed: Pixels,
}

impl HandlerContext<'_> {
    /// Returns true if the pointer is over `element` and inside its bounding box.
    #[must_use]
    pub fn hit(&self, element: ElementRef) -> bool {
        let node = &self.tree[element];
        if !self.input.pointer_in(&node.layout) {
            return false;
        }
        node.bounding_box
            .map_or(true, |clip| self.input.pointer_in(&self.tree[clip].layout))
    }
}

/// Queue of handlers for one frame.
pub struct HandlerQueue {
    entries: Vec<(Handler, ElementRef)>,
}

impl HandlerQueue {
    /// Creates an empty queue.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Appends a handler.
    pub fn push(&mut self, handler: Handler, element: ElementRef) {
        self.entries.push((handler, element));
    }

    /// Number of queued handlers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Runs every handler once, in push order.
    pub fn replay(&self, ctx: &mut HandlerContext<'_>) {
        for (handler, element) in &self.entries {
            match handler {
                Handler::Button => button::handle(ctx, *element),
                Handler::Scroll => scroll::handle(ctx, *element),
                Handler::TextInput(field) => text_input::handle(ctx, *element, field),
            }
        }
    }

    /// Empties the queue, keeping its storage.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{ElementId, ElementKind};
    use crate::input::MouseButton;
    use crate::layout::Rect;

    #[test]
    fn test_replay_in_push_order() {
        let mut tree = ElementTree::new(8, 16, 4);
        tree.begin_root(Rect::new(0.0, 0.0, 100.0, 100.0));
        let first = tree.push_element(ElementKind::Nothing);
        let second = tree.push_element(ElementKind::Nothing);
        tree[first].id = ElementId::new(1);
        tree[second].id = ElementId::new(2);
        // Overlapping rectangles: both are under the pointer.
        tree[first].layout = Rect::new(0.0, 0.0, 50.0, 50.0);
        tree[second].layout = Rect::new(0.0, 0.0, 50.0, 50.0);

        let mut queue = HandlerQueue::new(4);
        queue.push(Handler::Button, first);
        queue.push(Handler::Button, second);

        let mut input = InputState::new();
        input.set_mouse_pos(10.0, 10.0);
        input.mouse_button_down(MouseButton::Left);
        let mut state = InteractionState::new();

        queue.replay(&mut HandlerContext {
            tree: &tree,
            input: &input,
            state: &mut state,
            frame_time: 0.016,
            scroll_speed: 1500.0,
        });

        // Later handlers overwrite earlier ones.
        assert_eq!(state.hot(), ElementId::new(2));
        assert_eq!(state.active(), ElementId::new(2));

        queue.clear();
        assert!(queue.is_empty());
    }

    #[test]
    fn test_hit_requires_bounding_box() {
        let mut tree = ElementTree::new(8, 16, 4);
        let root = tree.begin_root(Rect::new(0.0, 0.0, 100.0, 100.0));
        let clip = tree.push_element(ElementKind::Nothing);
        tree.start_bounding_box(clip);
        tree.start_adding_children();
        let inside = tree.push_element(ElementKind::Nothing);
        tree.stop_adding_children();
        tree.end_bounding_box();

        tree[clip].layout = Rect::new(0.0, 0.0, 100.0, 40.0);
        tree[inside].layout = Rect::new(0.0, 30.0, 100.0, 30.0);

        let mut input = InputState::new();
        let mut state = InteractionState::new();

        input.set_mouse_pos(10.0, 35.0);
        let ctx = HandlerContext {
            tree: &tree,
            input: &input,
            state: &mut state,
            frame_time: 0.0,
            scroll_speed: 1500.0,
        };
        assert!(ctx.hit(inside));
        assert!(ctx.hit(root));

        input.set_mouse_pos(10.0, 50.0);
        let ctx = HandlerContext {
            tree: &tree,
            input: &input,
            state: &mut state,
            frame_time: 0.0,
            scroll_speed: 1500.0,
        };
        assert!(!ctx.hit(inside));
    }
}
