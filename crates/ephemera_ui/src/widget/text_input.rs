//! Single text fields.
//!
//! Clicking a field focuses it (makes it active); clicking anywhere else or
//! pressing Escape releases it. While focused it receives typed text and
//! editing keys, and Enter raises a one-shot submit signal.

use std::cell::RefCell;
use std::rc::Rc;

use super::text::clamp_to_char_boundary;
use crate::element::{ElementId, ElementKind, ElementRef};
use crate::frame::Frame;
use crate::handler::{Handler, HandlerContext};
use crate::input::{InputState, Key, MouseButton};
use crate::style::{TextInputStyle, TextStyle};

#[derive(Debug, Default)]
struct FieldState {
    text: String,
    /// Byte offset of the caret.
    cursor: usize,
}

impl FieldState {
    fn clamp(&mut self) {
        self.cursor = clamp_to_char_boundary(&self.text, self.cursor);
    }

    fn insert(&mut self, typed: &str) {
        for ch in typed.chars().filter(|ch| !ch.is_control()) {
            self.text.insert(self.cursor, ch);
            self.cursor += ch.len_utf8();
        }
    }

    fn prev_boundary(&self) -> usize {
        self.text[..self.cursor]
            .chars()
            .next_back()
            .map_or(self.cursor, |ch| self.cursor - ch.len_utf8())
    }

    fn next_boundary(&self) -> usize {
        self.text[self.cursor..]
            .chars()
            .next()
            .map_or(self.cursor, |ch| self.cursor + ch.len_utf8())
    }

    fn apply_keys(&mut self, input: &InputState) {
        if input.key_pressed_repeat(Key::Backspace) {
            let start = self.prev_boundary();
            self.text.replace_range(start..self.cursor, "");
            self.cursor = start;
        }
        if input.key_pressed_repeat(Key::Delete) {
            let end = self.next_boundary();
            self.text.replace_range(self.cursor..end, "");
        }
        if input.key_pressed_repeat(Key::Left) {
            self.cursor = self.prev_boundary();
        }
        if input.key_pressed_repeat(Key::Right) {
            self.cursor = self.next_boundary();
        }
        if input.key_pressed(Key::Home) {
            self.cursor = 0;
        }
        if input.key_pressed(Key::End) {
            self.cursor = self.text.len();
        }
    }
}

/// Text and caret of a field, kept by the caller across frames.
///
/// Clones share the same text; the field's handler edits it during replay.
#[derive(Debug, Clone, Default)]
pub struct TextField(Rc<RefCell<FieldState>>);

impl TextField {
    /// Creates a field with the caret at the end of `text`.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.len();
        Self(Rc::new(RefCell::new(FieldState { text, cursor })))
    }

    /// Returns a copy of the text.
    #[must_use]
    pub fn text(&self) -> String {
        self.0.borrow().text.clone()
    }

    /// Calls `f` with the text without copying it.
    pub fn with_text<R>(&self, f: impl FnOnce(&str) -> R) -> R {
        f(&self.0.borrow().text)
    }

    /// Replaces the text, keeping the caret where it is if still valid.
    pub fn set_text(&self, text: impl Into<String>) {
        let mut state = self.0.borrow_mut();
        state.text = text.into();
        state.clamp();
    }

    /// Takes the text out, leaving the field empty.
    pub fn take(&self) -> String {
        let mut state = self.0.borrow_mut();
        state.cursor = 0;
        std::mem::take(&mut state.text)
    }

    /// Returns true if the field holds no text.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.borrow().text.is_empty()
    }

    /// Returns the caret as a byte offset.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.0.borrow().cursor
    }

    /// Moves the caret; it is clamped on the next frame.
    pub fn set_cursor(&self, cursor: usize) {
        self.0.borrow_mut().cursor = cursor;
    }

    /// Clamps the caret into the text and returns it.
    fn clamp_cursor(&self) -> usize {
        let mut state = self.0.borrow_mut();
        state.clamp();
        state.cursor
    }
}

impl Frame<'_> {
    /// Text field with the default style.
    ///
    /// Returns true in the frame after Enter was pressed while focused.
    pub fn text_input(&mut self, id: ElementId, field: &TextField, text_style: TextStyle) -> bool {
        self.text_input_styled(id, field, text_style, &TextInputStyle::default())
    }

    /// Text field with a custom style.
    pub fn text_input_styled(
        &mut self,
        id: ElementId,
        field: &TextField,
        text_style: TextStyle,
        style: &TextInputStyle,
    ) -> bool {
        let focused = self.interaction().is_active(id);
        let submitted = !id.is_none() && self.interaction().submitted == id;

        let mut box_style = style.idle;
        if focused {
            box_style.border_color = style.focused_border;
        }

        let element = self.leaf(ElementKind::Box(box_style));
        self.tree_mut()[element].id = id;
        self.push_handler(Handler::TextInput(field.clone()), element);

        let cursor = field.clamp_cursor();
        self.tree_mut().start_adding_children();
        field.with_text(|text| {
            if focused {
                self.cursor_text(text, text_style, cursor, style.caret);
            } else {
                self.text(text, text_style);
            }
        });
        self.tree_mut().stop_adding_children();

        submitted
    }
}

/// Focus handling and editing for one field.
pub(crate) fn handle(ctx: &mut HandlerContext<'_>, element: ElementRef, field: &TextField) {
    let id = ctx.tree[element].id;
    let hit = ctx.hit(element);
    let input = ctx.input;
    let state = &mut *ctx.state;
    let pressed = input.mouse_pressed(MouseButton::Left);

    if hit {
        state.hot = id;
        if pressed {
            state.active = id;
        }
    } else {
        if state.hot == id {
            state.hot = ElementId::NONE;
        }
        if pressed && state.active == id {
            state.active = ElementId::NONE;
        }
    }

    if id.is_none() || state.active != id {
        return;
    }
    if input.key_pressed(Key::Escape) {
        state.active = ElementId::NONE;
        return;
    }

    let mut field = field.0.borrow_mut();
    field.clamp();
    field.insert(input.typed());
    field.apply_keys(input);

    if input.key_pressed(Key::Enter) {
        state.next_submitted = id;
    }
}
