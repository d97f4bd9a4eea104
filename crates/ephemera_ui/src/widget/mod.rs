//! Widgets: [`Frame`](crate::Frame) methods that push elements.
//!
//! Containers take a closure that builds their children:
//!
//! ```
//! use ephemera_ui::{FrameInfo, InputState, TextStyle, Ui};
//!
//! let mut ui = Ui::default();
//! let input = InputState::new();
//! let mut frame = ui.begin_frame(&input, FrameInfo::new(800.0, 600.0, 0.016));
//! frame.stack(10.0, |f| {
//!     f.text("Title", TextStyle::default());
//!     f.cluster(5.0, |f| {
//!         f.block();
//!         f.block();
//!     });
//! });
//! ```
//!
//! Interactive widgets also queue a handler; their return value reports
//! what the previous frame's replay decided.

pub(crate) mod button;
mod containers;
pub(crate) mod scroll;
mod text;
pub(crate) mod text_input;

pub use scroll::ScrollOffset;
pub use text_input::TextField;
