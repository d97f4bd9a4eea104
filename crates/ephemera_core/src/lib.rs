//! # Ephemera Core
//!
//! Frame-scoped memory for an immediate-mode UI:
//! - Every frame rebuilds its whole element tree
//! - Nothing built during a frame survives it
//! - Backing storage is kept and rewound, not reallocated
//!
//! ## Architecture Rules
//!
//! 1. **Reset, don't free** - arenas rewind to zero at frame end
//! 2. **Handles, not pointers** - tree links are generational indices
//! 3. **Stale handles are detected** - a handle from an older frame never
//!    resolves against a newer one
//!
//! ## Example
//!
//! ```rust
//! use ephemera_core::{Arena, StrArena};
//!
//! let mut nodes: Arena<u32> = Arena::new(64);
//! let mut text = StrArena::new(256);
//!
//! let node = nodes.alloc(7);
//! let span = text.push("hello");
//! assert_eq!(nodes[node], 7);
//! assert_eq!(&text[span], "hello");
//!
//! nodes.reset();
//! text.reset();
//! assert!(nodes.get(node).is_none());
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod memory;

pub use memory::{Arena, Handle, StrArena, TextSpan};
