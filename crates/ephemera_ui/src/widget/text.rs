//! Text leaves.

use crate::element::{CursorTextData, ElementKind, ElementRef, TextData};
use crate::frame::Frame;
use crate::layout::{Pixels, UNSET};
use crate::style::{Color, TextStyle};

/// Clamps `cursor` into `text`, moving it back onto a `char` boundary.
pub(crate) fn clamp_to_char_boundary(text: &str, cursor: usize) -> usize {
    let mut cursor = cursor.min(text.len());
    while !text.is_char_boundary(cursor) {
        cursor -= 1;
    }
    cursor
}

impl Frame<'_> {
    /// Wrapped text, shaped through the glyph atlas.
    pub fn text(&mut self, text: &str, style: TextStyle) -> ElementRef {
        self.text_ex(text, style, 0.0)
    }

    /// Wrapped text whose first line starts `first_line_indent` in.
    pub fn text_ex(&mut self, text: &str, style: TextStyle, first_line_indent: Pixels) -> ElementRef {
        let span = self.tree_mut().push_text(text);
        self.leaf(ElementKind::Text(TextData {
            span,
            style,
            first_line_indent,
            wrap_width: UNSET,
        }))
    }

    /// One line of text drawn straight through the backend.
    ///
    /// Never wraps and never touches the glyph atlas, so it suits text that
    /// changes every frame, such as counters. Overlong lines are clipped to
    /// the parent's width.
    pub fn label(&mut self, text: &str, style: TextStyle) -> ElementRef {
        let span = self.tree_mut().push_text(text);
        self.leaf(ElementKind::Label(TextData {
            span,
            style,
            first_line_indent: 0.0,
            wrap_width: UNSET,
        }))
    }

    /// Wrapped text with a caret before byte offset `cursor`.
    ///
    /// Out-of-range or mid-character offsets are clamped.
    pub fn cursor_text(&mut self, text: &str, style: TextStyle, cursor: usize, caret: Color) -> ElementRef {
        let cursor = clamp_to_char_boundary(text, cursor);
        let span = self.tree_mut().push_text(text);
        self.leaf(ElementKind::CursorText(CursorTextData {
            span,
            style,
            cursor,
            caret,
            wrap_width: UNSET,
            pen: (0.0, 0.0),
        }))
    }
}
