//! # Ephemera UI
//!
//! Immediate-mode interface layer. The application re-describes its whole
//! widget tree every frame; the library lays it out, lets widgets react to
//! input, draws it, and throws it away.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         FRAME PIPELINE                        │
//! ├──────────────────────────────────────────────────────────────┤
//! │  Construction → Layout → Handler Replay → Draw → Reset        │
//! │       ↓            ↓            ↓            ↓        ↓       │
//! │  cursor links  two-pass    hot / active   atlas    arena      │
//! │  + handlers    renegotiate  + scrolling   blits    rewind     │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What outlives a frame
//!
//! - [`InteractionState`]: hot, active, clicked and submitted ids
//! - [`GlyphAtlas`]: rendered text runs, evicted by recency
//! - Caller-owned widget state: [`ScrollOffset`], [`TextField`]
//!
//! Everything else lives in the frame arena and is gone after
//! [`Frame::finish`].
//!
//! ## Example
//!
//! ```rust
//! use ephemera_ui::{CommandBuffer, ElementId, FrameInfo, InputState, TextStyle, Ui};
//!
//! let mut ui = Ui::default();
//! let mut backend = CommandBuffer::new();
//! let input = InputState::new();
//!
//! let mut frame = ui.begin_frame(&input, FrameInfo::new(800.0, 600.0, 0.016));
//! let clicked = frame.stack(10.0, |f| {
//!     f.text("Counter", TextStyle::default());
//!     f.cluster(5.0, |f| f.button(ElementId::new(1), "+1", TextStyle::default()))
//! });
//! let stats = frame.finish(&mut backend);
//!
//! assert!(!clicked);
//! assert_eq!(stats.handlers, 1);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod draw;
pub mod element;
pub mod error;
pub mod frame;
pub mod handler;
pub mod input;
pub mod interaction;
pub mod layout;
pub mod render;
pub mod style;
pub mod text;
pub mod widget;

pub use config::{AtlasConfig, UiConfig};
pub use element::{Cursor, Element, ElementId, ElementKind, ElementRef, ElementTree};
pub use error::{ContractViolation, UiError, UiResult};
pub use frame::{Frame, FrameInfo, FrameStats, Ui};
pub use handler::Handler;
pub use input::{InputState, Key, MouseButton};
pub use interaction::InteractionState;
pub use layout::{LayoutResult, Pixels, Rect, UNSET};
pub use render::{Backend, CommandBuffer, GlyphMetrics, Rasterizer, RenderCommand, TextureId};
pub use style::{BoxStyle, ButtonStyle, Color, Margin, TextInputStyle, TextStyle};
pub use text::{AtlasStats, GlyphAtlas};
pub use widget::{ScrollOffset, TextField};
