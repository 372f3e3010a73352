//! Step card.
//!
//! ```text
//! ╭──────────────────────────────────────╮
//! │ ◈  Validate input                 ⠋  │
//! │    Checking request shape and fields │
//! │ ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━ │
//! │ userId                         u_42  │
//! ╰──────────────────────────────────────╯
//! ```

use crate::catalog::OperationMeta;
use crate::renderer::FrameBuffer;
use crate::steps::PayloadItem;
use crate::types::{Attr, Border, Rect};
use crate::view::RenderItem;

use super::{fit, Area, Paint, Widget};

/// Braille spinner shown while a step is running.
pub const SPINNER_FRAMES: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

const CHECK: char = '✓';
const BAR: char = '━';
/// Border, title, description and progress bar.
const BASE_HEIGHT: u16 = 5;
const MIN_WIDTH: u16 = 8;

/// One step card, built from a render item and its catalog entry.
#[derive(Debug, Clone, Copy)]
pub struct CardWidget<'a> {
    pub meta: &'a OperationMeta,
    pub title: &'a str,
    pub payload: &'a [PayloadItem],
    pub progress: u8,
    pub done: bool,
    /// Visual scale, 1.0 is full width.
    pub scale: f32,
    pub spinner_frame: usize,
}

impl<'a> CardWidget<'a> {
    pub fn new(item: &RenderItem<'a>, meta: &'a OperationMeta) -> Self {
        Self {
            meta,
            title: &item.step.title,
            payload: &item.step.payload,
            progress: item.display_progress,
            done: item.is_done(),
            scale: 1.0,
            spinner_frame: 0,
        }
    }

    pub fn scaled(self, scale: f32) -> Self {
        Self { scale, ..self }
    }

    pub fn spinner(self, frame: usize) -> Self {
        Self {
            spinner_frame: frame,
            ..self
        }
    }

    /// Rows for a card with `payload_rows` payload entries.
    pub fn height_for(payload_rows: usize) -> u16 {
        BASE_HEIGHT.saturating_add(u16::try_from(payload_rows).unwrap_or(u16::MAX))
    }

    /// Width after applying the scale, centered within `width`.
    fn scaled_bounds(&self, area: Area) -> Area {
        let scale = self.scale.clamp(0.0, 1.0);
        let width = ((f32::from(area.width) * scale).round() as u16)
            .max(MIN_WIDTH)
            .min(area.width);
        let x = area.x + i32::from((area.width - width) / 2);
        Area::new(x, area.y, width, area.height)
    }

    fn status_glyph(&self) -> char {
        if self.done {
            CHECK
        } else {
            SPINNER_FRAMES[self.spinner_frame % SPINNER_FRAMES.len()]
        }
    }
}

impl Widget for CardWidget<'_> {
    fn height(&self) -> u16 {
        Self::height_for(self.payload.len())
    }

    fn draw(&self, buffer: &mut FrameBuffer, area: Area, paint: &Paint<'_>) {
        let area = self.scaled_bounds(area);
        if area.width < MIN_WIDTH || area.height < 2 {
            return;
        }
        let clip = match area.visible_in(&paint.clip) {
            Some(rect) => rect,
            None => return,
        };
        let palette = paint.palette;
        let surface = paint.color(palette.surface);

        buffer.fill(area.bounds(), surface, &clip);
        buffer.border(area.bounds(), &Border::ROUNDED, paint.color(palette.border), &clip);

        let inner_x = area.x + 2;
        let inner_width = usize::from(area.width - 4);
        let right = area.x + i32::from(area.width) - 3;

        // Title row: icon, title, status glyph.
        let row = area.y + 1;
        buffer.put(inner_x, row, self.meta.icon, paint.color(palette.token(self.meta.color)), Attr::BOLD, &clip);
        let title = fit(self.title, inner_width.saturating_sub(5));
        buffer.print(inner_x + 3, row, &title, paint.color(palette.text), Attr::BOLD, &clip);
        let status_color = if self.done { palette.success } else { palette.text };
        buffer.put(right, row, self.status_glyph(), paint.color(status_color), Attr::NONE, &clip);

        // Description.
        let row = area.y + 2;
        let description = fit(&self.meta.description, inner_width.saturating_sub(3));
        buffer.print(inner_x + 3, row, &description, paint.color(palette.text_muted), Attr::NONE, &clip);

        // Progress bar.
        let row = area.y + 3;
        let filled = (inner_width * usize::from(self.progress.min(100)) + 50) / 100;
        for col in 0..inner_width {
            let color = if col < filled { palette.success } else { palette.track };
            buffer.put(inner_x + col as i32, row, BAR, paint.color(color), Attr::NONE, &clip);
        }

        // Payload rows.
        for (i, item) in self.payload.iter().enumerate() {
            let row = area.y + 4 + i as i32;
            if row >= area.y + i32::from(area.height) - 1 {
                break;
            }
            self.draw_payload_row(buffer, item, (inner_x, row, inner_width), paint, &clip);
        }
    }
}

impl CardWidget<'_> {
    fn draw_payload_row(
        &self,
        buffer: &mut FrameBuffer,
        item: &PayloadItem,
        (x, row, width): (i32, i32, usize),
        paint: &Paint<'_>,
        clip: &Rect,
    ) {
        let palette = paint.palette;
        if item.value.is_blank() {
            let key = fit(&item.key, width);
            buffer.print(x, row, &key, paint.color(palette.text), Attr::NONE, clip);
            return;
        }

        let value = fit(&item.value.to_string(), width / 2);
        let badge_width = value.chars().count() + 2;
        let key = fit(&item.key, width.saturating_sub(badge_width + 1));
        buffer.print(x, row, &key, paint.color(palette.text), Attr::NONE, clip);

        let badge_x = x + (width - badge_width.min(width)) as i32;
        buffer.fill((badge_x, row, badge_width as u16, 1), paint.color(palette.badge), clip);
        buffer.print(badge_x + 1, row, &value, paint.color(palette.primary), Attr::BOLD, clip);
    }
}
