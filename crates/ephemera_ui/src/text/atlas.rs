//! Glyph atlas: a fixed open-addressed table of rendered text runs.
//!
//! ```text
//! get_or_render(text, width, font_size, indent)
//!        │
//!        ▼
//!   slot = hash(text) % capacity ──probe──► exact key match? ──yes──► hit
//!        │                        (≤ give_up)        │
//!        │                                           no
//!        ▼                                           ▼
//!   populate: first slot idle for > reuse_after_frames, or the
//!             slot after the last probe when every probe is taken
//!        │
//!        ▼
//!   keep the slot's texture if it is within [size, 2 × size),
//!   else release it and allocate size × slack
//! ```
//!
//! The slot index depends on the text only, so a run re-shaped at a slightly
//! different width or font size lands on its old slot and usually renders
//! into the texture that is already there.

use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;
use tracing::{debug, trace};

use crate::config::AtlasConfig;
use crate::layout::Pixels;
use crate::render::{Backend, TextureId};
use crate::style::Color;

/// Hashes text content; order-sensitive.
#[inline]
#[must_use]
pub fn hash_text(text: &str) -> u64 {
    let mut hasher = FxHasher::default();
    text.hash(&mut hasher);
    hasher.finish()
}

/// Full identity of a rendered run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtlasKey {
    /// Content hash from [`hash_text`].
    pub hash: u64,
    /// Wrap width.
    pub width: Pixels,
    /// Font size.
    pub font_size: Pixels,
    /// Pen x of the first glyph.
    pub indent: Pixels,
}

/// A render target owned by one slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtlasTexture {
    /// Backend handle.
    pub id: TextureId,
    /// Allocated width.
    pub width: Pixels,
    /// Allocated height.
    pub height: Pixels,
}

/// A shaped and rendered text run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CachedText {
    /// Texture holding the glyphs, drawn from its top-left corner.
    pub texture: AtlasTexture,
    /// Height of all lines.
    pub height: Pixels,
    /// Width up to the pen if the run never wrapped, else the wrap width.
    pub actual_width: Pixels,
    /// Pen position after the last glyph, relative to the run's origin.
    pub pen: (Pixels, Pixels),
}

/// Counters for cache behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AtlasStats {
    /// Lookups answered from a slot.
    pub hits: u64,
    /// Runs shaped and rendered.
    pub renders: u64,
    /// Render targets allocated.
    pub allocations: u64,
    /// Renders that kept the slot's existing texture.
    pub reuses: u64,
    /// Slots released after sitting idle.
    pub evictions: u64,
    /// Live slots overwritten because every probe was taken.
    pub forced_evictions: u64,
}

#[derive(Debug, Clone, Copy, Default)]
struct Slot {
    used: bool,
    last_frame: u64,
    key: Option<AtlasKey>,
    texture: Option<AtlasTexture>,
    height: Pixels,
    actual_width: Pixels,
    pen: (Pixels, Pixels),
}

impl Slot {
    fn cached(&self) -> Option<CachedText> {
        Some(CachedText {
            texture: self.texture?,
            height: self.height,
            actual_width: self.actual_width,
            pen: self.pen,
        })
    }
}

/// Cache of rendered text runs.
pub struct GlyphAtlas {
    slots: Vec<Slot>,
    config: AtlasConfig,
    /// Extra pen advance after each glyph, as a fraction of the font size.
    glyph_spacing: f32,
    stats: AtlasStats,
}

impl GlyphAtlas {
    /// Creates an empty atlas.
    #[must_use]
    pub fn new(config: AtlasConfig, glyph_spacing: f32) -> Self {
        Self {
            slots: vec![Slot::default(); config.capacity.max(1)],
            config,
            glyph_spacing,
            stats: AtlasStats::default(),
        }
    }

    /// Number of slots.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of slots currently marked used.
    #[must_use]
    pub fn used_slots(&self) -> usize {
        self.slots.iter().filter(|slot| slot.used).count()
    }

    /// Returns the counters.
    #[must_use]
    pub fn stats(&self) -> AtlasStats {
        self.stats
    }

    /// Returns the rendered run for `text`, shaping it on a miss.
    ///
    /// # Arguments
    ///
    /// * `width` - wrap width; a glyph that would cross it starts a new line
    /// * `indent` - pen x of the first glyph
    /// * `frame` - current frame number, used for recency
    pub fn get_or_render<B: Backend + ?Sized>(
        &mut self,
        text: &str,
        width: Pixels,
        font_size: Pixels,
        indent: Pixels,
        frame: u64,
        backend: &mut B,
    ) -> CachedText {
        let key = AtlasKey {
            hash: hash_text(text),
            width,
            font_size,
            indent,
        };

        if let Some(cached) = self.lookup(&key, frame, backend) {
            self.stats.hits += 1;
            return cached;
        }
        self.populate(text, key, frame, backend)
    }

    /// Releases every texture; the atlas is empty afterwards.
    pub fn clear<B: Backend + ?Sized>(&mut self, backend: &mut B) {
        for slot in &mut self.slots {
            if let Some(texture) = slot.texture.take() {
                backend.release_render_target(texture.id);
            }
            *slot = Slot::default();
        }
    }

    fn start_index(&self, key: &AtlasKey) -> usize {
        let capacity = self.slots.len() as u64;
        #[allow(clippy::cast_possible_truncation)]
        let index = (key.hash % capacity) as usize;
        index
    }

    fn lookup<B: Backend + ?Sized>(
        &mut self,
        key: &AtlasKey,
        frame: u64,
        backend: &mut B,
    ) -> Option<CachedText> {
        let mut index = self.start_index(key);

        for _ in 0..self.config.give_up {
            let slot = &mut self.slots[index];
            if slot.used && slot.last_frame + self.config.evict_after_frames < frame {
                slot.used = false;
                if let Some(texture) = slot.texture.take() {
                    backend.release_render_target(texture.id);
                }
                self.stats.evictions += 1;
                trace!(slot = index, "atlas slot evicted");
            }
            if slot.used && slot.key.as_ref() == Some(key) {
                if let Some(cached) = slot.cached() {
                    slot.last_frame = frame;
                    trace!(slot = index, "atlas hit");
                    return Some(cached);
                }
            }
            index = (index + 1) % self.slots.len();
        }
        None
    }

    fn populate<B: Backend + ?Sized>(
        &mut self,
        text: &str,
        key: AtlasKey,
        frame: u64,
        backend: &mut B,
    ) -> CachedText {
        let mut index = self.start_index(&key);
        let mut found_free = false;

        for _ in 0..self.config.give_up {
            let slot = &mut self.slots[index];
            if slot.last_frame + self.config.reuse_after_frames < frame {
                slot.used = false;
            }
            if !slot.used {
                found_free = true;
                break;
            }
            index = (index + 1) % self.slots.len();
        }

        if !found_free && self.slots[index].used {
            self.stats.forced_evictions += 1;
            debug!(slot = index, "atlas probes exhausted, overwriting live slot");
        }

        let width = key.width.max(1.0);
        let font_size = key.font_size;

        // Assumes square glyphs filling every line, plus one spare line.
        #[allow(clippy::cast_precision_loss)]
        let tentative_height = text.len() as f32 * font_size * font_size / width + font_size;

        let texture = self.prepare_texture(index, width, tentative_height, backend);

        backend.begin_render_target(texture.id);
        backend.push_scissor(crate::layout::Rect::new(0.0, 0.0, width, tentative_height));
        backend.clear(Color::TRANSPARENT);

        let mut x = key.indent;
        let mut y = 0.0;
        for ch in text.chars() {
            let advance = backend.advance(ch, font_size);
            if x + advance > width {
                x = 0.0;
                y += font_size;
            }
            backend.draw_glyph(ch, x, y, font_size, Color::WHITE);
            x += advance + font_size * self.glyph_spacing;
        }

        backend.pop_scissor();
        backend.end_render_target();

        self.stats.renders += 1;
        trace!(slot = index, len = text.len(), "atlas render");

        let slot = &mut self.slots[index];
        slot.used = true;
        slot.last_frame = frame;
        slot.key = Some(key);
        slot.height = y + font_size;
        #[allow(clippy::float_cmp)]
        let never_wrapped = y == 0.0;
        slot.actual_width = if never_wrapped { x } else { key.width };
        slot.pen = (x, y);
        CachedText {
            texture,
            height: slot.height,
            actual_width: slot.actual_width,
            pen: slot.pen,
        }
    }

    /// Keeps the slot's texture if it is a close fit, otherwise reallocates.
    fn prepare_texture<B: Backend + ?Sized>(
        &mut self,
        index: usize,
        width: Pixels,
        height: Pixels,
        backend: &mut B,
    ) -> AtlasTexture {
        let slot = &mut self.slots[index];

        if let Some(texture) = slot.texture {
            let fits_width = texture.width > width && texture.width < 2.0 * width;
            let fits_height = texture.height > height && texture.height < 2.0 * height;
            if fits_width && fits_height {
                self.stats.reuses += 1;
                return texture;
            }
            backend.release_render_target(texture.id);
        }

        let texture = AtlasTexture {
            id: backend.create_render_target(width * self.config.slack, height * self.config.slack),
            width: width * self.config.slack,
            height: height * self.config.slack,
        };
        slot.texture = Some(texture);
        self.stats.allocations += 1;
        debug!(slot = index, width = texture.width, height = texture.height, "atlas texture allocated");
        texture
    }
}
