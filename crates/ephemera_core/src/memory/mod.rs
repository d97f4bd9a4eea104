//! # Memory Management
//!
//! Per-frame arenas for the element tree and its text.
//!
//! ## Design Philosophy
//!
//! Storage is reserved once and reused every frame. During a frame:
//! - Allocation is a push onto retained storage
//! - Nothing is freed individually
//! - The whole generation is invalidated at once by `reset`

mod arena;
mod text;

pub use arena::{Arena, Handle};
pub use text::{StrArena, TextSpan};
