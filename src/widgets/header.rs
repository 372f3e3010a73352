//! Header and footer rows.
//!
//! Row 0 holds the "Step x of N" readout on the left and the control
//! buttons on the right; row 1 is the overall completion bar. The buttons'
//! screen rects are returned so mouse clicks can be routed to them.

use crate::renderer::FrameBuffer;
use crate::theme::{Palette, ThemeMode};
use crate::types::{Attr, Rect};

use super::fit;

/// Rows taken by the header, including a blank spacer row.
pub const HEADER_HEIGHT: u16 = 3;

const BAR: char = '━';
const FOOTER_HINT: &str = "space play/pause · r reset · t theme · q quit";

/// Clickable header buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    PlayPause,
    Reset,
    Theme,
}

/// Everything the header shows.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderModel {
    pub status: String,
    pub autoplay: bool,
    pub mode: ThemeMode,
    /// Overall completion in 0.0..=1.0.
    pub completion: f32,
}

fn button_label(control: Control, model: &HeaderModel) -> &'static str {
    match control {
        Control::PlayPause if model.autoplay => "[ ❚❚ Pause ]",
        Control::PlayPause => "[ ▶ Play ]",
        Control::Reset => "[ ↻ Reset ]",
        Control::Theme => match model.mode {
            ThemeMode::Dark => "[ ☀ Light Mode ]",
            ThemeMode::Light => "[ ☾ Dark Mode ]",
        },
    }
}

/// Draw the header into the top rows of `buffer`. Returns button rects.
pub fn draw_header(buffer: &mut FrameBuffer, model: &HeaderModel, palette: &Palette) -> Vec<(Rect, Control)> {
    let width = buffer.width();
    let clip = buffer.bounds();
    let mut hits = Vec::new();
    if width == 0 || buffer.height() < 2 {
        return hits;
    }

    // Buttons, laid out right to left.
    let mut right = i32::from(width) - 1;
    let mut buttons = Vec::new();
    for control in [Control::Theme, Control::Reset, Control::PlayPause] {
        let label = button_label(control, model);
        let len = label.chars().count() as i32;
        let x = right - len;
        if x < 1 {
            break;
        }
        buttons.push((x, label, control));
        right = x - 1;
    }

    let status_room = usize::try_from(right - 1).unwrap_or(0);
    let status = fit(&model.status, status_room);
    buffer.print(1, 0, &status, palette.text_muted, Attr::NONE, &clip);

    for (x, label, control) in buttons.into_iter().rev() {
        buffer.print(x, 0, label, palette.text, Attr::BOLD, &clip);
        let rect = Rect::new(x as u16, 0, label.chars().count() as u16, 1);
        hits.push((rect, control));
    }

    // Overall completion bar.
    let filled = (f32::from(width) * model.completion.clamp(0.0, 1.0)).round() as u16;
    for col in 0..width {
        let color = if col < filled { palette.primary } else { palette.track };
        buffer.put(i32::from(col), 1, BAR, color, Attr::NONE, &clip);
    }

    hits
}

/// Key hint on the last row.
pub fn draw_footer(buffer: &mut FrameBuffer, palette: &Palette) {
    let height = buffer.height();
    if height <= HEADER_HEIGHT {
        return;
    }
    let clip = buffer.bounds();
    let hint = fit(FOOTER_HINT, usize::from(buffer.width().saturating_sub(2)));
    buffer.print(1, i32::from(height - 1), &hint, palette.text_muted, Attr::DIM, &clip);
}
