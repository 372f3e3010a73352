//! Widgets - the pieces of the storyboard screen.
//!
//! A [`Widget`] knows its height and how to draw itself into an [`Area`]
//! of a frame buffer. Areas use signed coordinates because animated cards
//! can be partly above or below the viewport; [`Paint`] carries the palette,
//! the clip region and the fade applied to every color.
//!
//! - [`card`] - one step card
//! - [`header`] - step readout, control buttons, overall progress bar
//! - [`tilt`] - hover tilt decorator for any widget

pub mod card;
pub mod header;
pub mod tilt;

pub use card::{CardWidget, SPINNER_FRAMES};
pub use header::{draw_footer, draw_header, Control, HeaderModel, HEADER_HEIGHT};
pub use tilt::{HoverTilt, Rotation, Tilted};

use crate::renderer::FrameBuffer;
use crate::theme::Palette;
use crate::types::{Rect, Rgba};

/// Placement of a widget. May extend past the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Area {
    pub x: i32,
    pub y: i32,
    pub width: u16,
    pub height: u16,
}

impl Area {
    pub const fn new(x: i32, y: i32, width: u16, height: u16) -> Self {
        Self { x, y, width, height }
    }

    /// Tuple form used by the frame buffer.
    #[inline]
    pub fn bounds(&self) -> (i32, i32, u16, u16) {
        (self.x, self.y, self.width, self.height)
    }

    /// The visible part of this area inside `clip`.
    pub fn visible_in(&self, clip: &Rect) -> Option<Rect> {
        let x0 = self.x.max(i32::from(clip.x));
        let y0 = self.y.max(i32::from(clip.y));
        let x1 = (self.x + i32::from(self.width)).min(i32::from(clip.x) + i32::from(clip.width));
        let y1 = (self.y + i32::from(self.height)).min(i32::from(clip.y) + i32::from(clip.height));
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(Rect::new(x0 as u16, y0 as u16, (x1 - x0) as u16, (y1 - y0) as u16))
    }
}

/// Drawing context shared by widgets.
#[derive(Debug, Clone, Copy)]
pub struct Paint<'a> {
    pub palette: &'a Palette,
    pub clip: Rect,
    /// 1.0 draws colors as-is, 0.0 blends them fully into the background.
    pub opacity: f32,
}

impl<'a> Paint<'a> {
    pub fn new(palette: &'a Palette, clip: Rect) -> Self {
        Self {
            palette,
            clip,
            opacity: 1.0,
        }
    }

    pub fn with_opacity(self, opacity: f32) -> Self {
        Self {
            opacity: opacity.clamp(0.0, 1.0),
            ..self
        }
    }

    /// `color` after fading towards the page background.
    #[inline]
    pub fn color(&self, color: Rgba) -> Rgba {
        color.fade(self.palette.background, self.opacity)
    }
}

/// Something that can be drawn into a frame buffer.
pub trait Widget {
    fn height(&self) -> u16;
    fn draw(&self, buffer: &mut FrameBuffer, area: Area, paint: &Paint<'_>);
}

impl<W: Widget + ?Sized> Widget for &W {
    fn height(&self) -> u16 {
        (**self).height()
    }

    fn draw(&self, buffer: &mut FrameBuffer, area: Area, paint: &Paint<'_>) {
        (**self).draw(buffer, area, paint)
    }
}

/// Truncate `text` to `width` chars, ending in `…` when cut.
pub fn fit(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(width - 1).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit() {
        assert_eq!(fit("hello", 10), "hello");
        assert_eq!(fit("hello", 5), "hello");
        assert_eq!(fit("hello", 4), "hel…");
        assert_eq!(fit("hello", 0), "");
    }

    #[test]
    fn test_visible_in() {
        let clip = Rect::new(0, 2, 20, 10);
        assert_eq!(
            Area::new(2, 0, 5, 5).visible_in(&clip),
            Some(Rect::new(2, 2, 5, 3))
        );
        assert_eq!(Area::new(2, -10, 5, 5).visible_in(&clip), None);
        assert_eq!(Area::new(-3, 4, 5, 1).visible_in(&clip), Some(Rect::new(0, 4, 2, 1)));
    }

    #[test]
    fn test_paint_fades_towards_background() {
        let palette = Palette::default();
        let paint = Paint::new(&palette, Rect::default()).with_opacity(0.0);
        assert_eq!(paint.color(palette.text), palette.background);
        assert_eq!(paint.with_opacity(1.0).color(palette.text), palette.text);
    }
}
