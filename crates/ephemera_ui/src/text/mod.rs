//! Text shaping and the glyph atlas cache.

mod atlas;

pub use atlas::{hash_text, AtlasKey, AtlasStats, AtlasTexture, CachedText, GlyphAtlas};
