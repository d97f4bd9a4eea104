//! The UI runtime and the per-frame construction context.
//!
//! ```text
//!   Ui::begin_frame ──► Frame ──► widgets push elements + handlers
//!                                   │
//!                     Frame::finish(backend)
//!                                   │
//!          layout ──► handler replay ──► draw ──► reset
//! ```
//!
//! [`Ui`] keeps what survives frames: interaction state, the glyph atlas,
//! the frame counter and the storage the arenas reuse. A [`Frame`] borrows
//! it for one frame; dropping the frame, finished or not, resets the tree
//! and the handler queue.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::config::UiConfig;
use crate::draw::DrawPass;
use crate::element::{ElementKind, ElementRef, ElementTree};
use crate::error::UiResult;
use crate::handler::{Handler, HandlerContext, HandlerQueue};
use crate::input::InputState;
use crate::interaction::InteractionState;
use crate::layout::{LayoutPass, Pixels, Rect};
use crate::render::Backend;
use crate::text::{AtlasStats, GlyphAtlas};

/// Host facts for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInfo {
    /// Screen width.
    pub screen_width: Pixels,
    /// Screen height.
    pub screen_height: Pixels,
    /// Seconds since the previous frame.
    pub frame_time: f32,
}

impl FrameInfo {
    /// Creates frame info.
    #[must_use]
    pub const fn new(screen_width: Pixels, screen_height: Pixels, frame_time: f32) -> Self {
        Self {
            screen_width,
            screen_height,
            frame_time,
        }
    }
}

/// What one finished frame did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameStats {
    /// Frame number.
    pub frame: u64,
    /// Elements built, root included.
    pub elements: usize,
    /// Handlers replayed.
    pub handlers: usize,
    /// Containers whose content overflowed a fixed size.
    pub overflows: usize,
    /// Time spent in layout.
    pub layout_time: Duration,
    /// Time spent replaying handlers.
    pub handle_time: Duration,
    /// Time spent drawing.
    pub draw_time: Duration,
}

/// The UI runtime.
pub struct Ui {
    config: UiConfig,
    tree: ElementTree,
    handlers: HandlerQueue,
    interaction: InteractionState,
    atlas: GlyphAtlas,
    frame_num: u64,
}

impl Ui {
    /// Creates a runtime from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::InvalidConfig`](crate::UiError::InvalidConfig) if
    /// the configuration fails validation.
    pub fn new(config: UiConfig) -> UiResult<Self> {
        config.validate()?;
        Ok(Self::with_config(config))
    }

    fn with_config(config: UiConfig) -> Self {
        Self {
            tree: ElementTree::new(
                config.element_capacity,
                config.text_capacity,
                config.bounding_box_capacity,
            ),
            handlers: HandlerQueue::new(config.handler_capacity),
            interaction: InteractionState::new(),
            atlas: GlyphAtlas::new(config.atlas, config.glyph_spacing),
            frame_num: 0,
            config,
        }
    }

    /// Starts a frame: advances the counter and opens the root.
    ///
    /// The root covers the screen and takes exactly one child, so build the
    /// frame inside a single top-level container.
    pub fn begin_frame<'a>(&'a mut self, input: &'a InputState, info: FrameInfo) -> Frame<'a> {
        self.frame_num += 1;
        self.tree.reset();
        self.handlers.clear();
        self.interaction.begin_frame();
        self.tree
            .begin_root(Rect::new(0.0, 0.0, info.screen_width, info.screen_height));

        Frame {
            ui: self,
            input,
            info,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &UiConfig {
        &self.config
    }

    /// Number of frames begun so far.
    #[must_use]
    pub fn frame_num(&self) -> u64 {
        self.frame_num
    }

    /// Returns the interaction state.
    #[must_use]
    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    /// Returns the interaction state mutably, e.g. to move focus.
    pub fn interaction_mut(&mut self) -> &mut InteractionState {
        &mut self.interaction
    }

    /// Returns the glyph atlas.
    #[must_use]
    pub fn atlas(&self) -> &GlyphAtlas {
        &self.atlas
    }

    /// Returns the glyph atlas counters.
    #[must_use]
    pub fn atlas_stats(&self) -> AtlasStats {
        self.atlas.stats()
    }

    /// Releases every cached text texture through `backend`.
    pub fn release_textures<B: Backend + ?Sized>(&mut self, backend: &mut B) {
        self.atlas.clear(backend);
    }
}

impl Default for Ui {
    fn default() -> Self {
        Self::with_config(UiConfig::default())
    }
}

/// Construction context for one frame.
///
/// Container methods take a closure that builds their children, so every
/// child scope is closed when the closure returns.
pub struct Frame<'a> {
    ui: &'a mut Ui,
    input: &'a InputState,
    info: FrameInfo,
}

impl<'a> Frame<'a> {
    /// Returns the tree built so far.
    #[must_use]
    pub fn tree(&self) -> &ElementTree {
        &self.ui.tree
    }

    /// Returns the tree for driving the cursor directly.
    ///
    /// Scopes opened here must be closed here; see [`ElementTree`].
    pub fn tree_mut(&mut self) -> &mut ElementTree {
        &mut self.ui.tree
    }

    /// Returns this frame's input.
    #[must_use]
    pub fn input(&self) -> &'a InputState {
        self.input
    }

    /// Returns the interaction state as left by the previous frame.
    #[must_use]
    pub fn interaction(&self) -> &InteractionState {
        &self.ui.interaction
    }

    /// Returns the frame info.
    #[must_use]
    pub fn info(&self) -> FrameInfo {
        self.info
    }

    /// Returns the frame number.
    #[must_use]
    pub fn frame_num(&self) -> u64 {
        self.ui.frame_num
    }

    /// Queues `handler` to run for `element` after layout.
    pub fn push_handler(&mut self, handler: Handler, element: ElementRef) {
        self.ui.handlers.push(handler, element);
    }

    /// Pushes a leaf element.
    pub(crate) fn leaf(&mut self, kind: ElementKind) -> ElementRef {
        self.ui.tree.push_element(kind)
    }

    /// Pushes a container and builds its children with `build`.
    pub(crate) fn scope<R>(&mut self, kind: ElementKind, build: impl FnOnce(&mut Self) -> R) -> R {
        self.ui.tree.push_element(kind);
        self.ui.tree.start_adding_children();
        let result = build(self);
        self.ui.tree.stop_adding_children();
        result
    }

    /// Lays out, replays handlers and draws the frame through `backend`.
    pub fn finish<B: Backend + ?Sized>(mut self, backend: &mut B) -> FrameStats {
        let ui = &mut *self.ui;
        let frame = ui.frame_num;

        let started = Instant::now();
        let overflows = LayoutPass::new(&mut ui.tree, &mut ui.atlas, backend, frame).run();
        let layout_time = started.elapsed();

        let started = Instant::now();
        ui.handlers.replay(&mut HandlerContext {
            tree: &ui.tree,
            input: self.input,
            state: &mut ui.interaction,
            frame_time: self.info.frame_time,
            scroll_speed: ui.config.scroll_speed,
        });
        let handle_time = started.elapsed();

        let started = Instant::now();
        DrawPass::new(&ui.tree, &mut ui.atlas, backend, frame).run();
        let draw_time = started.elapsed();

        let stats = FrameStats {
            frame,
            elements: ui.tree.len(),
            handlers: ui.handlers.len(),
            overflows,
            layout_time,
            handle_time,
            draw_time,
        };
        debug!(
            frame,
            elements = stats.elements,
            handlers = stats.handlers,
            layout_us = layout_time.as_micros(),
            handle_us = handle_time.as_micros(),
            draw_us = draw_time.as_micros(),
            "frame finished"
        );
        stats
    }
}

impl Drop for Frame<'_> {
    fn drop(&mut self) {
        self.ui.tree.reset();
        self.ui.handlers.clear();
    }
}
