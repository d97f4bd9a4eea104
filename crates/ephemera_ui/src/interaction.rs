//! Interaction state that outlives frames.
//!
//! Everything else about a frame is thrown away when it ends; these ids are
//! how a widget rebuilt next frame knows it was hovered, pressed or clicked.

use crate::element::ElementId;
use crate::layout::Pixels;
use crate::widget::ScrollOffset;

/// The scroll region holding the wheel this frame, with its offset before
/// it took the wheel.
#[derive(Debug, Clone)]
pub(crate) struct WheelClaim {
    pub(crate) offset: ScrollOffset,
    pub(crate) previous: Pixels,
}

/// Hot, active and signal ids, plus wheel ownership.
#[derive(Debug, Default)]
pub struct InteractionState {
    /// Widget under the pointer, if it is reachable.
    pub(crate) hot: ElementId,
    /// Widget being pressed, or the focused text input.
    pub(crate) active: ElementId,
    /// Button that completed a click during the last replay.
    pub(crate) clicked: ElementId,
    /// Text input that saw Enter during the last replay.
    pub(crate) submitted: ElementId,
    /// Signals raised by the replay in progress, visible next frame.
    pub(crate) next_clicked: ElementId,
    pub(crate) next_submitted: ElementId,
    /// Reset each frame; last scroll region under the pointer wins.
    pub(crate) wheel: Option<WheelClaim>,
}

impl InteractionState {
    /// Creates an empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the hot id.
    #[must_use]
    pub fn hot(&self) -> ElementId {
        self.hot
    }

    /// Returns the active id.
    #[must_use]
    pub fn active(&self) -> ElementId {
        self.active
    }

    /// Returns true if `id` is hot.
    #[must_use]
    pub fn is_hot(&self, id: ElementId) -> bool {
        !id.is_none() && self.hot == id
    }

    /// Returns true if `id` is active.
    #[must_use]
    pub fn is_active(&self, id: ElementId) -> bool {
        !id.is_none() && self.active == id
    }

    /// Gives `id` focus, as if it had been clicked.
    pub fn focus(&mut self, id: ElementId) {
        self.active = id;
    }

    /// Drops focus and any press in progress.
    pub fn release(&mut self) {
        self.active = ElementId::NONE;
    }

    /// Publishes the last replay's signals and drops older ones, whether
    /// or not their widget was rebuilt.
    pub(crate) fn begin_frame(&mut self) {
        self.clicked = std::mem::take(&mut self.next_clicked);
        self.submitted = std::mem::take(&mut self.next_submitted);
        self.wheel = None;
    }

    /// Moves the wheel to `offset`, putting back the previous owner's value.
    pub(crate) fn claim_wheel(&mut self, offset: &ScrollOffset) {
        if let Some(claim) = self.wheel.take() {
            if !claim.offset.same_as(offset) {
                claim.offset.set(claim.previous);
            }
        }
        self.wheel = Some(WheelClaim {
            offset: offset.clone(),
            previous: offset.get(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_id_is_never_hot() {
        let state = InteractionState::new();
        assert!(!state.is_hot(ElementId::NONE));
        assert!(!state.is_active(ElementId::NONE));
    }

    #[test]
    fn test_signals_last_exactly_one_frame() {
        let mut state = InteractionState::new();
        let id = ElementId::new(3);

        state.next_clicked = id;
        state.next_submitted = id;
        assert_eq!(state.clicked, ElementId::NONE);

        state.begin_frame();
        assert_eq!((state.clicked, state.submitted), (id, id));

        state.begin_frame();
        assert_eq!((state.clicked, state.submitted), (ElementId::NONE, ElementId::NONE));
    }

    #[test]
    fn test_superseded_wheel_claim_restores_offset() {
        let mut state = InteractionState::new();
        let outer = ScrollOffset::new(10.0);
        let inner = ScrollOffset::new(0.0);

        state.claim_wheel(&outer);
        outer.set(40.0);
        state.claim_wheel(&inner);

        assert_eq!(outer.get(), 10.0);
        assert!(state.wheel.as_ref().is_some_and(|claim| claim.offset.same_as(&inner)));
    }

    #[test]
    fn test_reclaim_keeps_own_offset() {
        let mut state = InteractionState::new();
        let offset = ScrollOffset::new(10.0);

        state.claim_wheel(&offset);
        offset.set(20.0);
        state.claim_wheel(&offset);
        assert_eq!(offset.get(), 20.0);

        state.begin_frame();
        assert!(state.wheel.is_none());
    }
}
