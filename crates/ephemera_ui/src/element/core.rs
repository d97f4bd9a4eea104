//! Element node and kind payloads.

use ephemera_core::{Handle, TextSpan};

use crate::layout::{Pixels, Rect};
use crate::style::{BoxStyle, Color, TextStyle};
use crate::widget::ScrollOffset;

/// Externally supplied identifier used to correlate interaction state
/// across frames.
///
/// Elements have no identity of their own; two frames only agree that
/// "this is the same button" through the id the caller passes in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ElementId(pub u64);

impl ElementId {
    /// Anonymous element.
    pub const NONE: Self = Self(0);

    /// Creates a new element ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Returns true for the anonymous id.
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }
}

/// Handle to an element of the current frame.
pub type ElementRef = Handle<Element>;

/// Payload of a text run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextData {
    /// Text in the frame's string arena.
    pub span: TextSpan,
    /// Color and size.
    pub style: TextStyle,
    /// Horizontal offset of the first line.
    pub first_line_indent: Pixels,
    /// Width the text was shaped at during layout; the draw pass reuses it.
    pub wrap_width: Pixels,
}

/// Payload of a text run with a caret.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CursorTextData {
    /// Text in the frame's string arena.
    pub span: TextSpan,
    /// Color and size.
    pub style: TextStyle,
    /// Caret position as a byte offset on a `char` boundary.
    pub cursor: usize,
    /// Caret color.
    pub caret: Color,
    /// Width both halves were shaped at during layout.
    pub wrap_width: Pixels,
    /// Pen position after the part before the caret, relative to the element.
    pub pen: (Pixels, Pixels),
}

/// What an element is, and the data its layout and draw need.
///
/// The set of kinds is closed; layout and draw dispatch on it with a single
/// `match`.
#[derive(Debug, Clone)]
pub enum ElementKind {
    /// Frame root covering the screen; exactly one child.
    Root,
    /// Zero-sized placeholder.
    Nothing,
    /// Debug rectangle: half the parent's width, 100 tall unless set.
    Block {
        /// Fill color.
        color: Color,
    },
    /// Vertical flow.
    Stack {
        /// Space between children.
        gap: Pixels,
    },
    /// Padding and border around exactly one child.
    Box(BoxStyle),
    /// Horizontally centers exactly one child.
    Center {
        /// Horizontal padding on each side.
        padding: Pixels,
    },
    /// Wrapping row flow.
    Cluster {
        /// Space between children and between rows.
        gap: Pixels,
    },
    /// Exactly two children, pushed to opposite sides, wrapping if needed.
    LeftRight {
        /// Space between the two children.
        gap: Pixels,
    },
    /// Forces itself and its single child to a size.
    Fixed {
        /// Forced width.
        width: Pixels,
        /// Forced height.
        height: Pixels,
    },
    /// Clips and offsets its single child.
    Scroll {
        /// Vertical offset owned by the caller.
        offset: ScrollOffset,
    },
    /// Single line drawn directly, without the glyph atlas.
    Label(TextData),
    /// Cached text run.
    Text(TextData),
    /// Cached text run split at a caret.
    CursorText(CursorTextData),
}

impl ElementKind {
    /// Short name used in diagnostics.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Root => "root",
            Self::Nothing => "nothing",
            Self::Block { .. } => "block",
            Self::Stack { .. } => "stack",
            Self::Box(_) => "box",
            Self::Center { .. } => "center",
            Self::Cluster { .. } => "cluster",
            Self::LeftRight { .. } => "leftright",
            Self::Fixed { .. } => "fixed",
            Self::Scroll { .. } => "scroll",
            Self::Label(_) => "label",
            Self::Text(_) => "text",
            Self::CursorText(_) => "cursor text",
        }
    }
}

/// One node of the current frame's tree.
///
/// All links are non-owning handles into the frame arena, which owns every
/// node and invalidates them together at frame end.
#[derive(Debug, Clone)]
pub struct Element {
    /// Interaction id, [`ElementId::NONE`] unless a widget assigns one.
    pub id: ElementId,
    /// Owning container; `None` only for the root.
    pub parent: Option<ElementRef>,
    /// First child, if any.
    pub first_child: Option<ElementRef>,
    /// Next sibling in construction order.
    pub next_sibling: Option<ElementRef>,
    /// Previous sibling in construction order.
    pub prev_sibling: Option<ElementRef>,
    /// Layout rectangle, [`Rect::UNSET`] until layout resolves it.
    pub layout: Rect,
    /// Nearest enclosing clip element; hit-tests must also fall inside it.
    pub bounding_box: Option<ElementRef>,
    /// Kind and payload.
    pub kind: ElementKind,
}

impl Element {
    /// Creates an unlinked element with an unset layout.
    #[must_use]
    pub fn new(kind: ElementKind) -> Self {
        Self {
            id: ElementId::NONE,
            parent: None,
            first_child: None,
            next_sibling: None,
            prev_sibling: None,
            layout: Rect::UNSET,
            bounding_box: None,
            kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_element_is_unlinked() {
        let element = Element::new(ElementKind::Nothing);
        assert!(element.id.is_none());
        assert!(element.parent.is_none());
        assert!(element.first_child.is_none());
        assert_eq!(element.layout, Rect::UNSET);
        assert_eq!(element.kind.name(), "nothing");
    }

    #[test]
    fn test_element_id_raw() {
        let id = ElementId::new(42);
        assert_eq!(id.raw(), 42);
        assert!(!id.is_none());
    }
}
