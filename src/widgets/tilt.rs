//! Hover tilt - a decorator that leans any widget towards the pointer.
//!
//! The rotation is computed from the pointer position relative to the
//! widget's center and scaled to ±10 degrees on each axis. A terminal cannot
//! rotate a box, so the horizontal tilt becomes a small sideways shift of
//! the whole widget. Leaving the widget resets the rotation to zero.
//!
//! # Example
//!
//! ```
//! use spark_storyboard::types::Rect;
//! use spark_storyboard::widgets::Rotation;
//!
//! let card = Rect::new(0, 0, 40, 7);
//! let rotation = Rotation::from_pointer(card, 0, 3);
//! assert!(rotation.y > 9.0); // far left edge leans left
//! assert_eq!(rotation.shift(), 2);
//! ```

use crate::renderer::FrameBuffer;
use crate::types::Rect;

use super::{Area, Paint, Widget};

/// Maximum rotation in degrees.
pub const MAX_TILT: f32 = 10.0;
/// Degrees of `y` rotation per column of shift.
const DEGREES_PER_COLUMN: f32 = 5.0;

/// Tilt angles in degrees. `x` follows the vertical pointer offset, `y` the
/// horizontal one.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rotation {
    pub x: f32,
    pub y: f32,
}

impl Rotation {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Rotation for a pointer at (`px`, `py`) over `rect`.
    pub fn from_pointer(rect: Rect, px: u16, py: u16) -> Self {
        let center_x = f32::from(rect.width) / 2.0;
        let center_y = f32::from(rect.height) / 2.0;
        if center_x <= 0.0 || center_y <= 0.0 {
            return Self::ZERO;
        }
        let x = f32::from(px.saturating_sub(rect.x)) + 0.5;
        let y = f32::from(py.saturating_sub(rect.y)) + 0.5;

        Self {
            x: ((y - center_y) / center_y * MAX_TILT).clamp(-MAX_TILT, MAX_TILT),
            y: ((center_x - x) / center_x * MAX_TILT).clamp(-MAX_TILT, MAX_TILT),
        }
    }

    /// Columns to move the widget by; positive is to the left.
    pub fn shift(&self) -> i32 {
        (self.y / DEGREES_PER_COLUMN).round() as i32
    }
}

// =============================================================================
// Tilted
// =============================================================================

/// Wraps a widget and draws it shifted by its rotation.
#[derive(Debug, Clone, Copy)]
pub struct Tilted<W> {
    inner: W,
    rotation: Rotation,
}

impl<W: Widget> Tilted<W> {
    pub fn new(inner: W, rotation: Rotation) -> Self {
        Self { inner, rotation }
    }
}

impl<W: Widget> Widget for Tilted<W> {
    fn height(&self) -> u16 {
        self.inner.height()
    }

    fn draw(&self, buffer: &mut FrameBuffer, area: Area, paint: &Paint<'_>) {
        let shifted = Area {
            x: area.x - self.rotation.shift(),
            ..area
        };
        self.inner.draw(buffer, shifted, paint);
    }
}

// =============================================================================
// HoverTilt
// =============================================================================

/// Pointer hover state: which item is under the pointer and its rotation.
#[derive(Debug, Clone)]
pub struct HoverTilt<K> {
    hovered: Option<(K, Rotation)>,
}

impl<K> Default for HoverTilt<K> {
    fn default() -> Self {
        Self { hovered: None }
    }
}

impl<K: PartialEq> HoverTilt<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer moved over `key`, whose unshifted rect is `rect`.
    pub fn pointer_move(&mut self, key: K, rect: Rect, px: u16, py: u16) {
        self.hovered = Some((key, Rotation::from_pointer(rect, px, py)));
    }

    /// Pointer left whatever it was over.
    pub fn pointer_leave(&mut self) {
        self.hovered = None;
    }

    pub fn rotation_for(&self, key: &K) -> Rotation {
        match &self.hovered {
            Some((hovered, rotation)) if hovered == key => *rotation,
            _ => Rotation::ZERO,
        }
    }

    pub fn hovered(&self) -> Option<&K> {
        self.hovered.as_ref().map(|(key, _)| key)
    }
}
