//! # Frame Pipeline Integration Tests
//!
//! Drives whole frames through `Ui` and checks what reaches the backend:
//!
//! 1. **Layout**: geometry read back from the recorded draw commands
//! 2. **Interaction**: hot/active/click and focus carried across frames
//! 3. **Scrolling**: wheel ownership, clamping and clipped hit-testing
//! 4. **Atlas**: settled text is shaped once
//!
//! Run with: cargo test --package ephemera_ui --test frame_pipeline

use ephemera_ui::{
    BoxStyle, Color, CommandBuffer, ElementId, Frame, FrameInfo, FrameStats, InputState, Key,
    MouseButton, Rect, RenderCommand, ScrollOffset, TextField, TextStyle, Ui,
};
use proptest::prelude::*;

const SCREEN: (f32, f32) = (800.0, 600.0);
const BLUE: Color = Color::rgb(0.0, 0.0, 1.0);

/// Builds, finishes and records one frame.
fn run_frame<R>(
    ui: &mut Ui,
    input: &InputState,
    backend: &mut CommandBuffer,
    screen: (f32, f32),
    build: impl FnOnce(&mut Frame<'_>) -> R,
) -> (R, FrameStats) {
    backend.begin_frame();
    let mut frame = ui.begin_frame(input, FrameInfo::new(screen.0, screen.1, 0.1));
    let result = build(&mut frame);
    let stats = frame.finish(backend);
    (result, stats)
}

/// Bounds of every filled rectangle of `color`, in draw order.
fn filled(backend: &CommandBuffer, color: Color) -> Vec<Rect> {
    backend
        .commands()
        .iter()
        .filter_map(|command| match command {
            RenderCommand::Rect { bounds, color: c } if *c == color => Some(*bounds),
            _ => None,
        })
        .collect()
}

fn textures(backend: &CommandBuffer) -> Vec<Rect> {
    backend
        .commands()
        .iter()
        .filter_map(|command| match command {
            RenderCommand::Texture { bounds, .. } => Some(*bounds),
            _ => None,
        })
        .collect()
}

fn opaque(background: Color, padding: f32) -> BoxStyle {
    BoxStyle {
        background,
        ..BoxStyle::padded(padding)
    }
}

// ============================================================================
// LAYOUT
// ============================================================================

#[test]
fn test_stack_of_text_and_padded_block() {
    let mut ui = Ui::default();
    let mut backend = CommandBuffer::new();
    let input = InputState::new();
    let offset = ScrollOffset::default();

    let (_, stats) = run_frame(&mut ui, &input, &mut backend, SCREEN, |f| {
        f.scroll(&offset, |f| {
            f.boxed(opaque(Color::WHITE, 0.0), |f| {
                f.stack(5.0, |f| {
                    f.text("Hi", TextStyle::default());
                    f.boxed(opaque(BLUE, 10.0), |f| {
                        f.block();
                    });
                });
            });
        });
    });

    assert_eq!(stats.overflows, 0);
    assert_eq!(filled(&backend, Color::WHITE), vec![Rect::new(0.0, 0.0, 800.0, 145.0)]);
    assert_eq!(filled(&backend, BLUE), vec![Rect::new(0.0, 25.0, 800.0, 120.0)]);
    assert_eq!(filled(&backend, Color::RED), vec![Rect::new(10.0, 35.0, 780.0, 100.0)]);
    assert_eq!(textures(&backend), vec![Rect::new(0.0, 0.0, 800.0, 20.0)]);
}

#[test]
fn test_cluster_overflow_is_reported() {
    let mut ui = Ui::default();
    let mut backend = CommandBuffer::new();
    let input = InputState::new();

    let (_, stats) = run_frame(&mut ui, &input, &mut backend, SCREEN, |f| {
        f.fixed(100.0, 50.0, |f| {
            f.cluster(0.0, |f| {
                for _ in 0..3 {
                    f.fixed(60.0, 40.0, |f| f.block());
                }
            });
        });
    });

    assert_eq!(stats.overflows, 1);
    let blocks = filled(&backend, Color::RED);
    assert_eq!(blocks[2], Rect::new(0.0, 80.0, 60.0, 40.0));
}

#[test]
#[should_panic(expected = "root must have exactly one child(ren), found 2")]
fn test_root_rejects_second_child() {
    let mut ui = Ui::default();
    let mut backend = CommandBuffer::new();
    let input = InputState::new();

    run_frame(&mut ui, &input, &mut backend, SCREEN, |f| {
        f.block();
        f.block();
    });
}

// ============================================================================
// INTERACTION
// ============================================================================

const OK: ElementId = ElementId::new(1);

fn ok_button(f: &mut Frame<'_>) -> bool {
    f.cluster(0.0, |f| f.button(OK, "OK", TextStyle::default()))
}

#[test]
fn test_click_completes_across_frames() {
    let mut ui = Ui::default();
    let mut backend = CommandBuffer::new();
    let mut input = InputState::new();

    // "OK" is 20x20; padding and border add 20 per side.
    input.set_mouse_pos(30.0, 30.0);
    let (clicked, stats) = run_frame(&mut ui, &input, &mut backend, SCREEN, ok_button);
    assert!(!clicked);
    assert_eq!(stats.handlers, 1);
    assert_eq!(ui.interaction().hot(), OK);

    input.begin_frame();
    input.mouse_button_down(MouseButton::Left);
    let (clicked, _) = run_frame(&mut ui, &input, &mut backend, SCREEN, ok_button);
    assert!(!clicked);
    assert_eq!(filled(&backend, Color::RED), vec![Rect::new(0.0, 0.0, 60.0, 60.0)]);
    assert_eq!(ui.interaction().active(), OK);

    input.begin_frame();
    input.mouse_button_up(MouseButton::Left);
    let (clicked, _) = run_frame(&mut ui, &input, &mut backend, SCREEN, ok_button);
    assert!(!clicked);
    assert_eq!(filled(&backend, Color::DARK_RED).len(), 1);
    assert_eq!(ui.interaction().active(), ElementId::NONE);

    input.begin_frame();
    let (clicked, _) = run_frame(&mut ui, &input, &mut backend, SCREEN, ok_button);
    assert!(clicked);

    input.begin_frame();
    let (clicked, _) = run_frame(&mut ui, &input, &mut backend, SCREEN, ok_button);
    assert!(!clicked);
}

#[test]
fn test_release_elsewhere_cancels_click() {
    let mut ui = Ui::default();
    let mut backend = CommandBuffer::new();
    let mut input = InputState::new();

    input.set_mouse_pos(30.0, 30.0);
    input.mouse_button_down(MouseButton::Left);
    run_frame(&mut ui, &input, &mut backend, SCREEN, ok_button);
    assert_eq!(ui.interaction().active(), OK);

    input.begin_frame();
    input.set_mouse_pos(500.0, 500.0);
    input.mouse_button_up(MouseButton::Left);
    run_frame(&mut ui, &input, &mut backend, SCREEN, ok_button);
    assert_eq!(ui.interaction().hot(), ElementId::NONE);
    assert_eq!(ui.interaction().active(), ElementId::NONE);

    input.begin_frame();
    let (clicked, _) = run_frame(&mut ui, &input, &mut backend, SCREEN, ok_button);
    assert!(!clicked);
}

#[test]
fn test_click_expires_while_button_is_absent() {
    let mut ui = Ui::default();
    let mut backend = CommandBuffer::new();
    let mut input = InputState::new();

    input.set_mouse_pos(30.0, 30.0);
    input.mouse_button_down(MouseButton::Left);
    run_frame(&mut ui, &input, &mut backend, SCREEN, ok_button);
    input.begin_frame();
    input.mouse_button_up(MouseButton::Left);
    run_frame(&mut ui, &input, &mut backend, SCREEN, ok_button);

    // The frame that would have reported the click builds no button.
    input.begin_frame();
    run_frame(&mut ui, &input, &mut backend, SCREEN, |f| f.stack(0.0, |_| {}));

    input.begin_frame();
    let (clicked, _) = run_frame(&mut ui, &input, &mut backend, SCREEN, ok_button);
    assert!(!clicked);
}

#[test]
fn test_text_input_focus_typing_and_submit() {
    const FIELD: ElementId = ElementId::new(7);
    let mut ui = Ui::default();
    let mut backend = CommandBuffer::new();
    let mut input = InputState::new();
    let field = TextField::default();

    let frame = |ui: &mut Ui, input: &InputState, backend: &mut CommandBuffer| {
        run_frame(ui, input, backend, SCREEN, |f| {
            f.stack(0.0, |f| f.text_input(FIELD, &field, TextStyle::default()))
        })
        .0
    };

    input.set_mouse_pos(100.0, 20.0);
    input.mouse_button_down(MouseButton::Left);
    assert!(!frame(&mut ui, &input, &mut backend));
    assert_eq!(ui.interaction().active(), FIELD);

    input.begin_frame();
    input.mouse_button_up(MouseButton::Left);
    input.text("hi");
    frame(&mut ui, &input, &mut backend);
    assert_eq!(field.text(), "hi");
    assert_eq!(field.cursor(), 2);

    input.begin_frame();
    input.key_down(Key::Backspace);
    frame(&mut ui, &input, &mut backend);
    assert_eq!(field.text(), "h");
    // Built before the edit: caret after "hi", inside a 12px inset.
    assert_eq!(filled(&backend, Color::BLACK), vec![Rect::new(32.0, 12.0, 2.0, 20.0)]);
    assert_eq!(
        backend.count(|c| matches!(c, RenderCommand::RectOutline { color, .. } if *color == Color::BLACK)),
        1
    );

    input.begin_frame();
    input.key_up(Key::Backspace);
    input.key_down(Key::Enter);
    assert!(!frame(&mut ui, &input, &mut backend));

    input.begin_frame();
    input.key_up(Key::Enter);
    assert!(frame(&mut ui, &input, &mut backend));

    input.begin_frame();
    assert!(!frame(&mut ui, &input, &mut backend));

    input.set_mouse_pos(400.0, 300.0);
    input.mouse_button_down(MouseButton::Left);
    frame(&mut ui, &input, &mut backend);
    assert_eq!(ui.interaction().active(), ElementId::NONE);

    input.begin_frame();
    input.text("ignored");
    frame(&mut ui, &input, &mut backend);
    assert_eq!(field.text(), "h");
}

// ============================================================================
// SCROLLING
// ============================================================================

#[test]
fn test_wheel_scrolls_and_clamps() {
    let mut ui = Ui::default();
    let mut backend = CommandBuffer::new();
    let mut input = InputState::new();
    let offset = ScrollOffset::default();

    let frame = |ui: &mut Ui, input: &InputState, backend: &mut CommandBuffer| {
        run_frame(ui, input, backend, SCREEN, |f| {
            f.fixed(200.0, 100.0, |f| {
                f.scroll(&offset, |f| {
                    f.stack(0.0, |f| f.fixed(200.0, 300.0, |f| f.block()))
                });
            });
        });
    };

    // 1500 px per notch per second at 0.1 s per frame.
    input.set_mouse_pos(50.0, 50.0);
    input.wheel(0.0, -1.0);
    frame(&mut ui, &input, &mut backend);
    assert!((offset.get() - 150.0).abs() < 1e-3);

    input.begin_frame();
    input.wheel(0.0, -1.0);
    frame(&mut ui, &input, &mut backend);
    assert_eq!(offset.get(), 200.0);

    input.begin_frame();
    input.set_mouse_pos(500.0, 500.0);
    input.wheel(0.0, 5.0);
    frame(&mut ui, &input, &mut backend);
    assert_eq!(offset.get(), 200.0);
    // Content is drawn shifted by the offset used at layout.
    assert_eq!(filled(&backend, Color::RED), vec![Rect::new(0.0, -200.0, 200.0, 300.0)]);

    offset.set(-40.0);
    input.begin_frame();
    frame(&mut ui, &input, &mut backend);
    assert_eq!(offset.get(), 0.0);
}

#[test]
fn test_innermost_region_owns_the_wheel() {
    let mut ui = Ui::default();
    let mut backend = CommandBuffer::new();
    let mut input = InputState::new();
    let outer = ScrollOffset::default();
    let inner = ScrollOffset::default();

    input.set_mouse_pos(10.0, 10.0);
    input.wheel(0.0, -1.0);
    run_frame(&mut ui, &input, &mut backend, SCREEN, |f| {
        f.fixed(200.0, 100.0, |f| {
            f.scroll(&outer, |f| {
                f.stack(0.0, |f| {
                    f.fixed(200.0, 50.0, |f| {
                        f.scroll(&inner, |f| {
                            f.stack(0.0, |f| f.fixed(200.0, 300.0, |f| f.block()))
                        });
                    });
                    f.fixed(200.0, 300.0, |f| f.block());
                });
            });
        });
    });

    assert_eq!(outer.get(), 0.0);
    assert!((inner.get() - 150.0).abs() < 1e-3);
}

#[test]
fn test_hidden_part_of_scrolled_content_ignores_pointer() {
    let mut ui = Ui::default();
    let mut backend = CommandBuffer::new();
    let mut input = InputState::new();
    let offset = ScrollOffset::default();

    let frame = |ui: &mut Ui, input: &InputState, backend: &mut CommandBuffer| {
        run_frame(ui, input, backend, SCREEN, |f| {
            f.fixed(200.0, 100.0, |f| {
                f.scroll(&offset, |f| {
                    f.stack(0.0, |f| {
                        f.fixed(200.0, 150.0, |f| f.block());
                        f.button(OK, "OK", TextStyle::default())
                    })
                })
            })
        });
    };

    // The button spans y 150..210, below the 100px viewport.
    input.set_mouse_pos(30.0, 170.0);
    frame(&mut ui, &input, &mut backend);
    assert_eq!(ui.interaction().hot(), ElementId::NONE);

    offset.set(100.0);
    input.begin_frame();
    input.set_mouse_pos(30.0, 70.0);
    frame(&mut ui, &input, &mut backend);
    assert_eq!(ui.interaction().hot(), OK);
    assert_eq!(offset.get(), 100.0);
}

// ============================================================================
// ATLAS
// ============================================================================

#[test]
fn test_settled_text_is_shaped_once() {
    let mut ui = Ui::default();
    let mut backend = CommandBuffer::new();
    let input = InputState::new();

    for _ in 0..3 {
        run_frame(&mut ui, &input, &mut backend, SCREEN, |f| {
            f.cluster(4.0, |f| {
                f.text("first", TextStyle::default());
                f.text("second", TextStyle::default());
            });
        });
    }

    let stats = ui.atlas_stats();
    assert_eq!(stats.renders, 2);
    assert_eq!(backend.live_targets(), 2);

    ui.release_textures(&mut backend);
    assert_eq!(backend.live_targets(), 0);
}

#[test]
fn test_label_bypasses_atlas() {
    let mut ui = Ui::default();
    let mut backend = CommandBuffer::new();
    let input = InputState::new();

    for fps in [58, 59, 60] {
        run_frame(&mut ui, &input, &mut backend, SCREEN, |f| {
            f.stack(0.0, |f| {
                f.label(&format!("FPS: {fps}"), TextStyle::default());
            });
        });
    }

    assert_eq!(ui.atlas_stats().renders, 0);
    assert_eq!(
        backend.commands(),
        &[RenderCommand::Text {
            text: "FPS: 60".to_owned(),
            x: 0.0,
            y: 0.0,
            color: Color::BLACK,
            font_size: 20.0,
        }]
    );
}

// ============================================================================
// PROPERTIES
// ============================================================================

proptest! {
    #[test]
    fn prop_stack_heights_add_up(
        heights in prop::collection::vec(1u16..200, 1..12),
        gap in 0u16..20,
    ) {
        let mut ui = Ui::default();
        let mut backend = CommandBuffer::new();
        let input = InputState::new();
        let offset = ScrollOffset::default();
        let gap = f32::from(gap);

        run_frame(&mut ui, &input, &mut backend, (800.0, 10_000.0), |f| {
            f.scroll(&offset, |f| {
                f.boxed(opaque(Color::WHITE, 0.0), |f| {
                    f.stack(gap, |f| {
                        for &h in &heights {
                            f.fixed(50.0, f32::from(h), |f| f.block());
                        }
                    });
                });
            });
        });

        let total: f32 = heights.iter().map(|&h| f32::from(h)).sum();
        let gaps = gap * (heights.len() - 1) as f32;
        prop_assert_eq!(filled(&backend, Color::WHITE), vec![Rect::new(0.0, 0.0, 800.0, total + gaps)]);

        let mut y = 0.0;
        for (block, &h) in filled(&backend, Color::RED).iter().zip(&heights) {
            prop_assert_eq!(block.y, y);
            y += f32::from(h) + gap;
        }
    }

    #[test]
    fn prop_cluster_wraps_at_width(
        sizes in prop::collection::vec((1u16..=300, 1u16..60), 1..16),
        gap in 0u16..10,
    ) {
        let mut ui = Ui::default();
        let mut backend = CommandBuffer::new();
        let input = InputState::new();
        let offset = ScrollOffset::default();
        let gap = f32::from(gap);
        let limit = 300.0;

        run_frame(&mut ui, &input, &mut backend, (limit, 10_000.0), |f| {
            f.scroll(&offset, |f| {
                f.cluster(gap, |f| {
                    for &(w, h) in &sizes {
                        f.fixed(f32::from(w), f32::from(h), |f| f.block());
                    }
                });
            });
        });

        let (mut x, mut y, mut row) = (0.0f32, 0.0f32, 0.0f32);
        let blocks = filled(&backend, Color::RED);
        prop_assert_eq!(blocks.len(), sizes.len());
        for (block, &(w, h)) in blocks.iter().zip(&sizes) {
            let (w, h) = (f32::from(w), f32::from(h));
            if x > 0.0 && x + w > limit {
                y += row + gap;
                x = 0.0;
                row = 0.0;
            }
            prop_assert_eq!(*block, Rect::new(x, y, w, h));
            prop_assert!(block.right() <= limit);
            row = row.max(h);
            x += w + gap;
        }
    }

    #[test]
    fn prop_box_adds_inset_on_every_side(
        w in 1u16..400,
        h in 1u16..400,
        padding in 0u16..50,
    ) {
        let mut ui = Ui::default();
        let mut backend = CommandBuffer::new();
        let input = InputState::new();
        let offset = ScrollOffset::default();
        let (w, h, p) = (f32::from(w), f32::from(h), f32::from(padding));

        run_frame(&mut ui, &input, &mut backend, (800.0, 10_000.0), |f| {
            f.scroll(&offset, |f| {
                f.cluster(0.0, |f| {
                    f.boxed(opaque(Color::WHITE, p), |f| f.fixed(w, h, |f| f.block()));
                });
            });
        });

        prop_assert_eq!(filled(&backend, Color::WHITE), vec![Rect::new(0.0, 0.0, w + 2.0 * p, h + 2.0 * p)]);
        prop_assert_eq!(filled(&backend, Color::RED), vec![Rect::new(p, p, w, h)]);
    }

    #[test]
    fn prop_center_leaves_equal_margins(w in 1u16..=800, padding in 0u16..100) {
        let mut ui = Ui::default();
        let mut backend = CommandBuffer::new();
        let input = InputState::new();
        let offset = ScrollOffset::default();
        let w = f32::from(w);

        run_frame(&mut ui, &input, &mut backend, (800.0, 10_000.0), |f| {
            f.scroll(&offset, |f| {
                f.stack(0.0, |f| f.center(f32::from(padding), |f| f.fixed(w, 30.0, |f| f.block())));
            });
        });

        let block = filled(&backend, Color::RED)[0];
        prop_assert_eq!(block.x, 800.0 - block.right());
        prop_assert_eq!(block.width, w);
    }
}
