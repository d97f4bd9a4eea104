//! Visual parameters carried by elements.
//!
//! Styles are plain values copied into each element's payload; there is no
//! cascade and nothing is inherited from the parent.

use crate::layout::Pixels;

/// RGBA color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red component (0-1).
    pub r: f32,
    /// Green component (0-1).
    pub g: f32,
    /// Blue component (0-1).
    pub b: f32,
    /// Alpha component (0-1).
    pub a: f32,
}

impl Color {
    /// Transparent black.
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);
    /// Solid black.
    pub const BLACK: Self = Self::rgba(0.0, 0.0, 0.0, 1.0);
    /// Solid white.
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);
    /// Solid red.
    pub const RED: Self = Self::rgba(1.0, 0.0, 0.0, 1.0);
    /// Light grey used for idle widgets.
    pub const LIGHT_GREY: Self = Self::hex(0xC8C8_C8FF);
    /// Dark red used for pressed widgets.
    pub const DARK_RED: Self = Self::hex(0x6400_00FF);

    /// Creates a color from RGBA values (0-1).
    #[must_use]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a color from RGB values (0-1) with full alpha.
    #[must_use]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    /// Creates a color from hex value (0xRRGGBBAA).
    #[must_use]
    pub const fn hex(hex: u32) -> Self {
        let r = ((hex >> 24) & 0xFF) as f32 / 255.0;
        let g = ((hex >> 16) & 0xFF) as f32 / 255.0;
        let b = ((hex >> 8) & 0xFF) as f32 / 255.0;
        let a = (hex & 0xFF) as f32 / 255.0;
        Self::rgba(r, g, b, a)
    }

    /// Returns true if drawing with this color would be invisible.
    #[must_use]
    pub fn is_transparent(self) -> bool {
        self.a <= 0.0
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::TRANSPARENT
    }
}

/// Per-side lengths, used for padding and borders.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Margin {
    /// Left side.
    pub left: Pixels,
    /// Right side.
    pub right: Pixels,
    /// Top side.
    pub top: Pixels,
    /// Bottom side.
    pub bottom: Pixels,
}

impl Margin {
    /// No margin on any side.
    pub const NONE: Self = Self::symmetric(0.0);

    /// The same length on all four sides.
    #[must_use]
    pub const fn symmetric(size: Pixels) -> Self {
        Self {
            left: size,
            right: size,
            top: size,
            bottom: size,
        }
    }

    /// Top and bottom only.
    #[must_use]
    pub const fn vertical(size: Pixels) -> Self {
        Self {
            left: 0.0,
            right: 0.0,
            top: size,
            bottom: size,
        }
    }

    /// Left and right only.
    #[must_use]
    pub const fn horizontal(size: Pixels) -> Self {
        Self {
            left: size,
            right: size,
            top: 0.0,
            bottom: 0.0,
        }
    }

    /// Sum of left and right.
    #[must_use]
    pub fn horizontal_total(&self) -> Pixels {
        self.left + self.right
    }

    /// Sum of top and bottom.
    #[must_use]
    pub fn vertical_total(&self) -> Pixels {
        self.top + self.bottom
    }
}

impl std::ops::Add for Margin {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            left: self.left + other.left,
            right: self.right + other.right,
            top: self.top + other.top,
            bottom: self.bottom + other.bottom,
        }
    }
}

/// Style of a padded, bordered box.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BoxStyle {
    /// Fill color; skipped when transparent.
    pub background: Color,
    /// Space between the border and the child.
    pub padding: Margin,
    /// Outline color; skipped when transparent.
    pub border_color: Color,
    /// Border thickness per side.
    pub border: Margin,
}

impl BoxStyle {
    /// An invisible box that only adds padding.
    #[must_use]
    pub const fn padded(padding: Pixels) -> Self {
        Self {
            background: Color::TRANSPARENT,
            padding: Margin::symmetric(padding),
            border_color: Color::TRANSPARENT,
            border: Margin::NONE,
        }
    }

    /// Padding plus border on every side.
    #[must_use]
    pub fn total_inset(&self) -> Margin {
        self.padding + self.border
    }
}

/// Style of a text run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Glyph tint.
    pub color: Color,
    /// Line height and nominal glyph size.
    pub font_size: Pixels,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            font_size: 20.0,
        }
    }
}

/// Box styles a button switches between.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ButtonStyle {
    /// Box drawn while neither hovered nor pressed.
    pub idle: BoxStyle,
    /// Background while hovered.
    pub hot_background: Color,
    /// Background while pressed.
    pub active_background: Color,
}

impl Default for ButtonStyle {
    fn default() -> Self {
        Self {
            idle: BoxStyle {
                background: Color::LIGHT_GREY,
                padding: Margin::symmetric(15.0),
                border_color: Color::BLACK,
                border: Margin::symmetric(5.0),
            },
            hot_background: Color::RED,
            active_background: Color::DARK_RED,
        }
    }
}

/// Box styles and caret color of a text input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextInputStyle {
    /// Box drawn while unfocused.
    pub idle: BoxStyle,
    /// Border color while focused.
    pub focused_border: Color,
    /// Caret color.
    pub caret: Color,
}

impl Default for TextInputStyle {
    fn default() -> Self {
        Self {
            idle: BoxStyle {
                background: Color::WHITE,
                padding: Margin::symmetric(10.0),
                border_color: Color::LIGHT_GREY,
                border: Margin::symmetric(2.0),
            },
            focused_border: Color::BLACK,
            caret: Color::BLACK,
        }
    }
}
