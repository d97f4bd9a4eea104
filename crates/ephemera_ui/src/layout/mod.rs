//! Layout rectangles and the layout engine.
//!
//! Every element carries a [`Rect`] whose fields start out [`UNSET`] and are
//! filled in top-down by the layout pass. Containers that cannot place a
//! child before their own position is known report it through
//! [`LayoutResult`].

mod engine;

pub use engine::LayoutPass;

use bitflags::bitflags;

/// Screen-space length in pixels.
pub type Pixels = f32;

/// Sentinel for a rectangle field that has not been resolved yet.
pub const UNSET: Pixels = -15001.0;

/// Returns true if `value` is the [`UNSET`] sentinel.
#[inline]
#[must_use]
#[allow(clippy::float_cmp)]
pub fn is_unset(value: Pixels) -> bool {
    value == UNSET
}

bitflags! {
    /// Outcome of laying out one element.
    ///
    /// `ASK_PARENT` means the element produced a size but needs its parent to
    /// run it again once the parent has fixed the element's position.
    /// `ASK_CHILDREN` is reserved for strategies that need their children to
    /// settle first; none of the built-in containers produce it.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct LayoutResult: u8 {
        /// Re-run this element after the parent fixes its position.
        const ASK_PARENT = 1;
        /// Re-run this element after its children settle.
        const ASK_CHILDREN = 1 << 1;
        /// Both of the above.
        const ASK_ALL = Self::ASK_PARENT.bits() | Self::ASK_CHILDREN.bits();
    }
}

impl LayoutResult {
    /// Fully resolved.
    pub const OK: Self = Self::empty();
}

/// A rectangle in screen coordinates.
///
/// Fields may hold [`UNSET`] while layout is in progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// X position (left edge).
    pub x: Pixels,
    /// Y position (top edge).
    pub y: Pixels,
    /// Width.
    pub width: Pixels,
    /// Height.
    pub height: Pixels,
}

impl Rect {
    /// A zero-sized rect at the origin.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// A rect with every field unresolved.
    pub const UNSET: Self = Self::new(UNSET, UNSET, UNSET, UNSET);

    /// Creates a new rectangle.
    #[must_use]
    pub const fn new(x: Pixels, y: Pixels, width: Pixels, height: Pixels) -> Self {
        Self { x, y, width, height }
    }

    /// Returns the right edge.
    #[must_use]
    pub fn right(&self) -> Pixels {
        self.x + self.width
    }

    /// Returns the bottom edge.
    #[must_use]
    pub fn bottom(&self) -> Pixels {
        self.y + self.height
    }

    /// Returns true if both position fields are resolved.
    #[must_use]
    pub fn has_position(&self) -> bool {
        !is_unset(self.x) && !is_unset(self.y)
    }

    /// Returns true if every field is resolved.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.has_position() && !is_unset(self.width) && !is_unset(self.height)
    }

    /// Returns true if the point is inside the rectangle.
    #[must_use]
    pub fn contains(&self, x: Pixels, y: Pixels) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Returns true if two rectangles intersect.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Returns the intersection of two rectangles, or None if they don't intersect.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        if !self.intersects(other) {
            return None;
        }

        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        Some(Self::new(x, y, right - x, bottom - y))
    }
}

impl Default for Rect {
    fn default() -> Self {
        Self::UNSET
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_contains() {
        let rect = Rect::new(10.0, 20.0, 100.0, 50.0);

        assert!(rect.contains(50.0, 30.0));
        assert!(rect.contains(10.0, 20.0));
        assert!(!rect.contains(110.0, 30.0));
        assert!(!rect.contains(5.0, 30.0));
        assert!(!rect.contains(50.0, 80.0));
    }

    #[test]
    fn test_unset_rect() {
        let rect = Rect::default();
        assert!(is_unset(rect.x));
        assert!(!rect.has_position());

        let placed = Rect { x: 0.0, y: 4.0, ..rect };
        assert!(placed.has_position());
        assert!(!placed.is_resolved());
    }

    #[test]
    fn test_layout_result_flags() {
        let result = LayoutResult::OK | LayoutResult::ASK_PARENT;
        assert!(result.contains(LayoutResult::ASK_PARENT));
        assert!(!result.contains(LayoutResult::ASK_CHILDREN));
        assert_eq!(LayoutResult::ASK_ALL, LayoutResult::ASK_PARENT | LayoutResult::ASK_CHILDREN);
        assert!(LayoutResult::OK.is_empty());
    }
}
