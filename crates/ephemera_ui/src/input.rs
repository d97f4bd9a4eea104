//! Input snapshot for one frame.
//!
//! The host translates its window events into calls on an [`InputState`],
//! then hands it to [`Ui::begin_frame`](crate::Ui::begin_frame). Handlers
//! read it during replay.
//!
//! ```text
//!   held        ── survives begin_frame (buttons, keys, pointer)
//!   edge        ── this frame only (pressed, released, repeated)
//!   accumulated ── this frame only (wheel, typed text)
//! ```
//!
//! Button and key sets are bit sets, so a snapshot never allocates except
//! for typed text.

use bitflags::bitflags;

use crate::layout::{Pixels, Rect};

/// Mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button.
    Left,
    /// Secondary button.
    Right,
    /// Wheel click.
    Middle,
}

impl MouseButton {
    const fn flag(self) -> Buttons {
        match self {
            Self::Left => Buttons::LEFT,
            Self::Right => Buttons::RIGHT,
            Self::Middle => Buttons::MIDDLE,
        }
    }
}

/// Keyboard keys the widgets react to.
///
/// Printable characters arrive as typed text instead, see
/// [`InputState::text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Key {
    /// Releases text focus.
    Escape,
    /// Submits a text field.
    Enter,
    /// Tab.
    Tab,
    /// Deletes before the caret.
    Backspace,
    /// Deletes after the caret.
    Delete,
    /// Arrow up.
    Up,
    /// Arrow down.
    Down,
    /// Arrow left.
    Left,
    /// Arrow right.
    Right,
    /// Caret to start of text.
    Home,
    /// Caret to end of text.
    End,
}

impl Key {
    const fn flag(self) -> Keys {
        Keys::from_bits_retain(1 << self as u8)
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    struct Buttons: u8 {
        const LEFT = 1;
        const RIGHT = 1 << 1;
        const MIDDLE = 1 << 2;
    }
}

bitflags! {
    /// One bit per [`Key`] discriminant.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    struct Keys: u16 {
        const _ = !0;
    }
}

/// Edge and held state of one bit set.
#[derive(Debug, Clone, Copy, Default)]
struct Edges<F> {
    held: F,
    pressed: F,
    released: F,
}

/// Input for the current frame.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Pointer position in screen pixels.
    pub pointer: (Pixels, Pixels),
    /// Wheel movement this frame, in notches; negative y scrolls down.
    pub wheel_delta: (f32, f32),
    buttons: Edges<Buttons>,
    keys: Edges<Keys>,
    /// Held keys the host auto-repeated this frame.
    repeated: Keys,
    typed: String,
}

impl InputState {
    /// Creates an empty snapshot: nothing held, pointer at the origin.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops everything that only describes the previous frame.
    ///
    /// Held buttons, held keys and the pointer position carry over.
    pub fn begin_frame(&mut self) {
        self.buttons.pressed = Buttons::empty();
        self.buttons.released = Buttons::empty();
        self.keys.pressed = Keys::empty();
        self.keys.released = Keys::empty();
        self.repeated = Keys::empty();
        self.wheel_delta = (0.0, 0.0);
        self.typed.clear();
    }

    /// Moves the pointer.
    pub fn set_mouse_pos(&mut self, x: Pixels, y: Pixels) {
        self.pointer = (x, y);
    }

    /// Records a button going down.
    pub fn mouse_button_down(&mut self, button: MouseButton) {
        self.buttons.pressed |= button.flag();
        self.buttons.held |= button.flag();
    }

    /// Records a button going up.
    pub fn mouse_button_up(&mut self, button: MouseButton) {
        self.buttons.released |= button.flag();
        self.buttons.held -= button.flag();
    }

    /// Adds wheel movement; several events in one frame accumulate.
    pub fn wheel(&mut self, dx: f32, dy: f32) {
        self.wheel_delta.0 += dx;
        self.wheel_delta.1 += dy;
    }

    /// Records a key going down. A key already held is ignored.
    pub fn key_down(&mut self, key: Key) {
        if !self.keys.held.contains(key.flag()) {
            self.keys.pressed |= key.flag();
            self.keys.held |= key.flag();
        }
    }

    /// Records a host auto-repeat. Ignored unless the key is held.
    pub fn key_repeat(&mut self, key: Key) {
        if self.keys.held.contains(key.flag()) {
            self.repeated |= key.flag();
        }
    }

    /// Records a key going up.
    pub fn key_up(&mut self, key: Key) {
        self.keys.released |= key.flag();
        self.keys.held -= key.flag();
    }

    /// Appends typed text.
    pub fn text(&mut self, text: &str) {
        self.typed.push_str(text);
    }

    /// Text typed this frame.
    #[must_use]
    pub fn typed(&self) -> &str {
        &self.typed
    }

    /// Returns true if `button` went down this frame.
    #[must_use]
    pub fn mouse_pressed(&self, button: MouseButton) -> bool {
        self.buttons.pressed.contains(button.flag())
    }

    /// Returns true if `button` went up this frame.
    #[must_use]
    pub fn mouse_released(&self, button: MouseButton) -> bool {
        self.buttons.released.contains(button.flag())
    }

    /// Returns true while `button` is held.
    #[must_use]
    pub fn mouse_down(&self, button: MouseButton) -> bool {
        self.buttons.held.contains(button.flag())
    }

    /// Returns true if the pointer is inside `rect`.
    #[must_use]
    pub fn pointer_in(&self, rect: &Rect) -> bool {
        rect.contains(self.pointer.0, self.pointer.1)
    }

    /// Returns true if `key` went down this frame.
    #[must_use]
    pub fn key_pressed(&self, key: Key) -> bool {
        self.keys.pressed.contains(key.flag())
    }

    /// Returns true if `key` went down or auto-repeated this frame.
    #[must_use]
    pub fn key_pressed_repeat(&self, key: Key) -> bool {
        (self.keys.pressed | self.repeated).contains(key.flag())
    }

    /// Returns true if `key` went up this frame.
    #[must_use]
    pub fn key_released(&self, key: Key) -> bool {
        self.keys.released.contains(key.flag())
    }

    /// Returns true while `key` is held.
    #[must_use]
    pub fn key_held(&self, key: Key) -> bool {
        self.keys.held.contains(key.flag())
    }
}
