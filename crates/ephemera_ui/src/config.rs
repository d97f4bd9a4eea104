//! Runtime configuration.
//!
//! Loaded once at startup, usually from TOML:
//!
//! ```toml
//! scroll_speed = 1200.0
//!
//! [atlas]
//! capacity = 512
//! evict_after_frames = 300
//! ```
//!
//! Every field has a default, so a partial file is valid.

use std::path::Path;

use serde::Deserialize;

use crate::error::{UiError, UiResult};
use crate::layout::Pixels;

/// Glyph atlas cache parameters.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AtlasConfig {
    /// Number of slots in the table.
    pub capacity: usize,
    /// Probes before a lookup or population gives up.
    pub give_up: usize,
    /// A slot untouched for more than this many frames is free for population.
    pub reuse_after_frames: u64,
    /// A slot untouched for more than this many frames has its texture released.
    pub evict_after_frames: u64,
    /// Over-allocation factor for new textures.
    pub slack: f32,
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self {
            capacity: 256,
            give_up: 20,
            reuse_after_frames: 1,
            evict_after_frames: 100,
            slack: 1.5,
        }
    }
}

/// Top-level UI configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UiConfig {
    /// Elements reserved in the frame arena.
    pub element_capacity: usize,
    /// Bytes reserved for text payloads.
    pub text_capacity: usize,
    /// Handler queue entries reserved.
    pub handler_capacity: usize,
    /// Maximum nesting of clip regions, root included.
    pub bounding_box_capacity: usize,
    /// Scroll distance per wheel notch per second.
    pub scroll_speed: Pixels,
    /// Extra space after each glyph, as a fraction of the font size.
    pub glyph_spacing: f32,
    /// Glyph atlas parameters.
    pub atlas: AtlasConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            element_capacity: 1024,
            text_capacity: 16 * 1024,
            handler_capacity: 1024,
            bounding_box_capacity: 10,
            scroll_speed: 1500.0,
            glyph_spacing: 0.1,
            atlas: AtlasConfig::default(),
        }
    }
}

impl UiConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::ConfigParse`] for malformed TOML and
    /// [`UiError::InvalidConfig`] for out-of-range values.
    pub fn from_toml_str(source: &str) -> UiResult<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::Io`] if the file cannot be read, otherwise as
    /// [`UiConfig::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> UiResult<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::InvalidConfig`] naming the first bad field.
    pub fn validate(&self) -> UiResult<()> {
        if self.bounding_box_capacity == 0 {
            return Err(invalid("bounding_box_capacity must be at least 1"));
        }
        if !(self.scroll_speed > 0.0) {
            return Err(invalid("scroll_speed must be positive"));
        }
        if !(self.glyph_spacing >= 0.0) {
            return Err(invalid("glyph_spacing must not be negative"));
        }
        if self.atlas.capacity == 0 {
            return Err(invalid("atlas.capacity must be at least 1"));
        }
        if self.atlas.give_up == 0 || self.atlas.give_up > self.atlas.capacity {
            return Err(invalid("atlas.give_up must be in 1..=atlas.capacity"));
        }
        if !(self.atlas.slack >= 1.0) {
            return Err(invalid("atlas.slack must be at least 1.0"));
        }
        Ok(())
    }
}

fn invalid(message: &str) -> UiError {
    UiError::InvalidConfig(message.to_owned())
}
