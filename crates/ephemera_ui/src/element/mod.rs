//! Per-frame element tree.
//!
//! Elements are created during construction, linked by the cursor protocol
//! in [`tree`], and dropped together when the frame ends.

mod core;
mod tree;

pub use self::core::{CursorTextData, Element, ElementId, ElementKind, ElementRef, TextData};
pub use self::tree::{Children, Cursor, ElementTree};
