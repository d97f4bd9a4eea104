//! Backend boundary.
//!
//! The UI core never draws pixels itself. Drawing primitives, render
//! targets and glyph metrics come from a [`Backend`] supplied by the host.
//! [`CommandBuffer`] is a backend that records [`RenderCommand`]s instead of
//! drawing; hosts can replay the recording and tests can inspect it.

use crate::layout::{Pixels, Rect};
use crate::style::Color;

/// Opaque handle to a backend render target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

/// Drawing primitives and render-target lifecycle.
pub trait Rasterizer {
    /// Fills a rectangle.
    fn fill_rect(&mut self, bounds: Rect, color: Color);

    /// Outlines a rectangle with a stroke of `thickness`.
    fn stroke_rect(&mut self, bounds: Rect, thickness: Pixels, color: Color);

    /// Copies `source` from `texture` into `dest`, tinted.
    fn blit(&mut self, texture: TextureId, source: Rect, dest: Rect, tint: Color);

    /// Draws one line of text directly, bypassing render targets.
    fn draw_text(&mut self, text: &str, x: Pixels, y: Pixels, font_size: Pixels, color: Color);

    /// Draws a single glyph at a pen position.
    fn draw_glyph(&mut self, ch: char, x: Pixels, y: Pixels, font_size: Pixels, color: Color);

    /// Restricts drawing to `bounds` until the matching [`Rasterizer::pop_scissor`].
    fn push_scissor(&mut self, bounds: Rect);

    /// Ends the innermost scissor region.
    fn pop_scissor(&mut self);

    /// Allocates a render target of the given size.
    fn create_render_target(&mut self, width: Pixels, height: Pixels) -> TextureId;

    /// Releases a render target.
    fn release_render_target(&mut self, texture: TextureId);

    /// Redirects drawing into `texture`.
    fn begin_render_target(&mut self, texture: TextureId);

    /// Redirects drawing back to the screen.
    fn end_render_target(&mut self);

    /// Clears the current target.
    fn clear(&mut self, color: Color);
}

/// Font queries used to shape text.
pub trait GlyphMetrics {
    /// Horizontal advance of `ch` at `font_size`.
    fn advance(&self, ch: char, font_size: Pixels) -> Pixels;

    /// Width of `text` on one line, without inter-glyph spacing.
    fn measure(&self, text: &str, font_size: Pixels) -> Pixels {
        text.chars().map(|ch| self.advance(ch, font_size)).sum()
    }
}

/// Everything a frame needs from the host.
pub trait Backend: Rasterizer + GlyphMetrics {}

impl<T: Rasterizer + GlyphMetrics> Backend for T {}

/// A recorded backend call.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    /// Filled rectangle.
    Rect {
        /// Bounds.
        bounds: Rect,
        /// Fill color.
        color: Color,
    },
    /// Rectangle outline.
    RectOutline {
        /// Bounds.
        bounds: Rect,
        /// Stroke color.
        color: Color,
        /// Line width.
        width: Pixels,
    },
    /// One line of untextured text.
    Text {
        /// Text content.
        text: String,
        /// Left edge.
        x: Pixels,
        /// Top edge.
        y: Pixels,
        /// Text color.
        color: Color,
        /// Font size.
        font_size: Pixels,
    },
    /// One glyph, normally drawn into a render target.
    Glyph {
        /// Codepoint.
        ch: char,
        /// Pen X.
        x: Pixels,
        /// Pen Y.
        y: Pixels,
        /// Font size.
        font_size: Pixels,
    },
    /// Textured quad.
    Texture {
        /// Source texture.
        texture: TextureId,
        /// Region read from the texture.
        source: Rect,
        /// Destination bounds.
        bounds: Rect,
        /// Tint color.
        color: Color,
    },
    /// Scissor rect (clip children).
    PushClip {
        /// Clip bounds.
        bounds: Rect,
    },
    /// Pop scissor rect.
    PopClip,
    /// Render target allocated.
    CreateTarget {
        /// New target.
        texture: TextureId,
        /// Width.
        width: Pixels,
        /// Height.
        height: Pixels,
    },
    /// Render target released.
    ReleaseTarget {
        /// Released target.
        texture: TextureId,
    },
    /// Drawing redirected into a target.
    BeginTarget {
        /// Target.
        texture: TextureId,
    },
    /// Drawing redirected back to the screen.
    EndTarget,
    /// Current target cleared.
    Clear {
        /// Clear color.
        color: Color,
    },
}

/// Backend that records commands and measures text with fixed advances.
///
/// Every glyph advances by `font_size * advance_ratio`, which makes layout
/// results predictable without a real font.
pub struct CommandBuffer {
    /// All commands since the last `begin_frame`.
    commands: Vec<RenderCommand>,
    /// Clip stack of the current target.
    clip_stack: Vec<Rect>,
    /// Screen clip stack parked while a render target is active.
    parked_clips: Option<Vec<Rect>>,
    /// Next texture id to hand out.
    next_texture: u32,
    /// Render targets currently alive.
    live_targets: usize,
    /// Glyph advance as a fraction of the font size.
    advance_ratio: f32,
}

impl CommandBuffer {
    /// Advance ratio used by [`CommandBuffer::new`].
    pub const DEFAULT_ADVANCE_RATIO: f32 = 0.4;

    /// Creates a recorder with the default advance ratio.
    #[must_use]
    pub fn new() -> Self {
        Self::with_advance_ratio(Self::DEFAULT_ADVANCE_RATIO)
    }

    /// Creates a recorder whose glyphs advance by `font_size * ratio`.
    #[must_use]
    pub fn with_advance_ratio(ratio: f32) -> Self {
        Self {
            commands: Vec::with_capacity(4096),
            clip_stack: Vec::with_capacity(16),
            parked_clips: None,
            next_texture: 1,
            live_targets: 0,
            advance_ratio: ratio,
        }
    }

    /// Begins a new frame.
    pub fn begin_frame(&mut self) {
        self.commands.clear();
        self.clip_stack.clear();
    }

    /// Returns the commands recorded so far.
    #[must_use]
    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    /// Takes the recorded commands, leaving the buffer empty.
    pub fn take_commands(&mut self) -> Vec<RenderCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Returns the total command count.
    #[must_use]
    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    /// Returns the current clip rect.
    #[must_use]
    pub fn current_clip(&self) -> Option<Rect> {
        self.clip_stack.last().copied()
    }

    /// Returns the number of render targets currently allocated.
    #[must_use]
    pub fn live_targets(&self) -> usize {
        self.live_targets
    }

    /// Counts recorded commands matching a predicate.
    pub fn count(&self, predicate: impl Fn(&RenderCommand) -> bool) -> usize {
        self.commands.iter().filter(|command| predicate(command)).count()
    }
}

impl Default for CommandBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Rasterizer for CommandBuffer {
    fn fill_rect(&mut self, bounds: Rect, color: Color) {
        self.commands.push(RenderCommand::Rect { bounds, color });
    }

    fn stroke_rect(&mut self, bounds: Rect, thickness: Pixels, color: Color) {
        self.commands.push(RenderCommand::RectOutline {
            bounds,
            color,
            width: thickness,
        });
    }

    fn blit(&mut self, texture: TextureId, source: Rect, dest: Rect, tint: Color) {
        self.commands.push(RenderCommand::Texture {
            texture,
            source,
            bounds: dest,
            color: tint,
        });
    }

    fn draw_text(&mut self, text: &str, x: Pixels, y: Pixels, font_size: Pixels, color: Color) {
        self.commands.push(RenderCommand::Text {
            text: text.to_owned(),
            x,
            y,
            color,
            font_size,
        });
    }

    fn draw_glyph(&mut self, ch: char, x: Pixels, y: Pixels, font_size: Pixels, _color: Color) {
        self.commands.push(RenderCommand::Glyph { ch, x, y, font_size });
    }

    fn push_scissor(&mut self, bounds: Rect) {
        // Intersect with current clip if any
        let actual_clip = if let Some(current) = self.clip_stack.last() {
            current.intersection(&bounds).unwrap_or(Rect::ZERO)
        } else {
            bounds
        };

        self.clip_stack.push(actual_clip);
        self.commands.push(RenderCommand::PushClip { bounds: actual_clip });
    }

    fn pop_scissor(&mut self) {
        self.clip_stack.pop();
        self.commands.push(RenderCommand::PopClip);
    }

    fn create_render_target(&mut self, width: Pixels, height: Pixels) -> TextureId {
        let texture = TextureId(self.next_texture);
        self.next_texture += 1;
        self.live_targets += 1;
        self.commands.push(RenderCommand::CreateTarget { texture, width, height });
        texture
    }

    fn release_render_target(&mut self, texture: TextureId) {
        self.live_targets = self.live_targets.saturating_sub(1);
        self.commands.push(RenderCommand::ReleaseTarget { texture });
    }

    fn begin_render_target(&mut self, texture: TextureId) {
        self.parked_clips = Some(std::mem::take(&mut self.clip_stack));
        self.commands.push(RenderCommand::BeginTarget { texture });
    }

    fn end_render_target(&mut self) {
        self.clip_stack = self.parked_clips.take().unwrap_or_default();
        self.commands.push(RenderCommand::EndTarget);
    }

    fn clear(&mut self, color: Color) {
        self.commands.push(RenderCommand::Clear { color });
    }
}

impl GlyphMetrics for CommandBuffer {
    fn advance(&self, _ch: char, font_size: Pixels) -> Pixels {
        font_size * self.advance_ratio
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recorder_frame() {
        let mut buffer = CommandBuffer::new();

        buffer.begin_frame();
        buffer.fill_rect(Rect::new(0.0, 0.0, 100.0, 50.0), Color::WHITE);

        assert_eq!(buffer.command_count(), 1);
        buffer.begin_frame();
        assert_eq!(buffer.command_count(), 0);
    }

    #[test]
    fn test_clip_stack() {
        let mut buffer = CommandBuffer::new();

        buffer.push_scissor(Rect::new(0.0, 0.0, 100.0, 100.0));
        buffer.push_scissor(Rect::new(50.0, 50.0, 100.0, 100.0));
        assert_eq!(buffer.current_clip(), Some(Rect::new(50.0, 50.0, 50.0, 50.0)));

        buffer.pop_scissor();
        buffer.pop_scissor();
        assert!(buffer.current_clip().is_none());
    }

    #[test]
    fn test_render_target_parks_screen_clip() {
        let mut buffer = CommandBuffer::new();
        buffer.push_scissor(Rect::new(0.0, 0.0, 10.0, 10.0));

        let target = buffer.create_render_target(64.0, 32.0);
        buffer.begin_render_target(target);
        assert!(buffer.current_clip().is_none());
        buffer.end_render_target();

        assert_eq!(buffer.current_clip(), Some(Rect::new(0.0, 0.0, 10.0, 10.0)));
        assert_eq!(buffer.live_targets(), 1);
        buffer.release_render_target(target);
        assert_eq!(buffer.live_targets(), 0);
    }

    #[test]
    fn test_untextured_text_is_recorded() {
        let mut buffer = CommandBuffer::new();
        let backend: &mut dyn Backend = &mut buffer;
        backend.draw_text("FPS", 4.0, 8.0, 20.0, Color::RED);

        assert_eq!(
            buffer.commands(),
            [RenderCommand::Text {
                text: "FPS".to_owned(),
                x: 4.0,
                y: 8.0,
                color: Color::RED,
                font_size: 20.0,
            }]
        );
        assert_eq!(buffer.live_targets(), 0);
    }

    #[test]
    fn test_monospace_measure() {
        let buffer = CommandBuffer::with_advance_ratio(0.5);
        assert_eq!(buffer.measure("abcd", 10.0), 20.0);
        assert_eq!(buffer.measure("", 10.0), 0.0);
    }
}
