//! Core types for spark-storyboard.
//!
//! Colors, cell attributes, cells and rectangles. Everything the widgets
//! draw ends up as [`Cell`]s in a frame buffer.

// =============================================================================
// Color
// =============================================================================

/// 24-bit color, one `i16` per channel so the terminal default can be encoded.
///
/// `r == -1` is the terminal's own default color; it is never blended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgba {
    pub r: i16,
    pub g: i16,
    pub b: i16,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as i16,
            g: g as i16,
            b: b as i16,
        }
    }

    /// Leave the choice to the terminal.
    pub const TERMINAL_DEFAULT: Self = Self { r: -1, g: -1, b: -1 };

    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Create from a packed `0xRRGGBB` integer.
    ///
    /// ```
    /// use spark_storyboard::types::Rgba;
    ///
    /// assert_eq!(Rgba::from_rgb_int(0x3b82f6), Rgba::rgb(59, 130, 246));
    /// ```
    pub const fn from_rgb_int(rgb: u32) -> Self {
        Self::rgb(
            ((rgb >> 16) & 0xFF) as u8,
            ((rgb >> 8) & 0xFF) as u8,
            (rgb & 0xFF) as u8,
        )
    }

    #[inline]
    pub const fn is_terminal_default(&self) -> bool {
        self.r == -1
    }

    /// Mix `a` into `b` by `t` in 0..=1.
    ///
    /// The terminal default cannot be mixed; it snaps at the halfway point.
    #[inline]
    pub fn lerp(a: Self, b: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        if a.is_terminal_default() || b.is_terminal_default() {
            return if t < 0.5 { a } else { b };
        }
        let mix = |from: i16, to: i16| (f32::from(from) + (f32::from(to) - f32::from(from)) * t).round() as i16;
        Self {
            r: mix(a.r, b.r),
            g: mix(a.g, b.g),
            b: mix(a.b, b.b),
        }
    }

    /// Fade towards `background`; `opacity` 1.0 leaves the color unchanged.
    #[inline]
    pub fn fade(self, background: Self, opacity: f32) -> Self {
        Self::lerp(background, self, opacity)
    }
}

// =============================================================================
// Cell Attributes (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Text attributes as a bitfield.
    ///
    /// Combine with bitwise OR: `Attr::BOLD | Attr::DIM`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Attr: u8 {
        const NONE = 0;
        const BOLD = 1 << 0;
        const DIM = 1 << 1;
        const ITALIC = 1 << 2;
        const UNDERLINE = 1 << 3;
        const INVERSE = 1 << 4;
    }
}

// =============================================================================
// Cell
// =============================================================================

/// One character cell of the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Rgba,
    pub bg: Rgba,
    pub attrs: Attr,
}

impl Cell {
    /// A blank cell painted with `bg`.
    pub const fn blank(bg: Rgba) -> Self {
        Self {
            ch: ' ',
            fg: Rgba::TERMINAL_DEFAULT,
            bg,
            attrs: Attr::NONE,
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::blank(Rgba::TERMINAL_DEFAULT)
    }
}

// =============================================================================
// Rect
// =============================================================================

/// Screen rectangle in cells. Also used as a clip region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self { x, y, width, height }
    }

    #[inline]
    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x
            && u32::from(x) < u32::from(self.x) + u32::from(self.width)
            && y >= self.y
            && u32::from(y) < u32::from(self.y) + u32::from(self.height)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

// =============================================================================
// Border Styles
// =============================================================================

/// Box-drawing glyphs for a card outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Border {
    pub horizontal: char,
    pub vertical: char,
    pub top_left: char,
    pub top_right: char,
    pub bottom_right: char,
    pub bottom_left: char,
}

impl Border {
    /// ─ │ ╭ ╮ ╯ ╰
    pub const ROUNDED: Self = Self {
        horizontal: '─',
        vertical: '│',
        top_left: '╭',
        top_right: '╮',
        bottom_right: '╯',
        bottom_left: '╰',
    };
}

// =============================================================================
// TESTS
// =============================================================================
