//! Frame buffer - a 2D grid of cells.
//!
//! Widgets draw into a [`FrameBuffer`] with signed coordinates so animated
//! cards may sit partly off-screen; every write is clipped to a [`Rect`] and
//! to the buffer bounds. Each `char` occupies one cell.

use crate::types::{Attr, Border, Cell, Rect, Rgba};

#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    /// Create a buffer of blank cells.
    pub fn new(width: u16, height: u16) -> Self {
        Self::filled(width, height, Rgba::TERMINAL_DEFAULT)
    }

    /// Create a buffer painted with `bg`.
    pub fn filled(width: u16, height: u16, bg: Rgba) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::blank(bg); width as usize * height as usize],
        }
    }

    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = cell;
        }
    }

    /// Resolve signed coordinates against `clip`; `None` if outside.
    #[inline]
    fn visible(&self, x: i32, y: i32, clip: &Rect) -> Option<usize> {
        let x = u16::try_from(x).ok()?;
        let y = u16::try_from(y).ok()?;
        if !clip.contains(x, y) {
            return None;
        }
        self.index(x, y)
    }

    // =========================================================================
    // Drawing
    // =========================================================================

    /// Write one character, keeping the cell's background.
    pub fn put(&mut self, x: i32, y: i32, ch: char, fg: Rgba, attrs: Attr, clip: &Rect) {
        if let Some(i) = self.visible(x, y, clip) {
            let cell = &mut self.cells[i];
            cell.ch = ch;
            cell.fg = fg;
            cell.attrs = attrs;
        }
    }

    /// Write `text` left to right. Returns the column after the last char.
    pub fn print(&mut self, x: i32, y: i32, text: &str, fg: Rgba, attrs: Attr, clip: &Rect) -> i32 {
        let mut col = x;
        for ch in text.chars() {
            self.put(col, y, ch, fg, attrs, clip);
            col += 1;
        }
        col
    }

    /// Paint a rectangle with `bg`, erasing its content.
    pub fn fill(&mut self, area: (i32, i32, u16, u16), bg: Rgba, clip: &Rect) {
        let (x, y, width, height) = area;
        for row in y..y + i32::from(height) {
            for col in x..x + i32::from(width) {
                if let Some(i) = self.visible(col, row, clip) {
                    self.cells[i] = Cell::blank(bg);
                }
            }
        }
    }

    /// Draw a box outline. Needs at least 2x2 cells.
    pub fn border(&mut self, area: (i32, i32, u16, u16), glyphs: &Border, fg: Rgba, clip: &Rect) {
        let (x, y, width, height) = area;
        if width < 2 || height < 2 {
            return;
        }
        let Border {
            horizontal: h,
            vertical: v,
            top_left: tl,
            top_right: tr,
            bottom_right: br,
            bottom_left: bl,
        } = *glyphs;
        let right = x + i32::from(width) - 1;
        let bottom = y + i32::from(height) - 1;

        for col in x + 1..right {
            self.put(col, y, h, fg, Attr::NONE, clip);
            self.put(col, bottom, h, fg, Attr::NONE, clip);
        }
        for row in y + 1..bottom {
            self.put(x, row, v, fg, Attr::NONE, clip);
            self.put(right, row, v, fg, Attr::NONE, clip);
        }
        self.put(x, y, tl, fg, Attr::NONE, clip);
        self.put(right, y, tr, fg, Attr::NONE, clip);
        self.put(right, bottom, br, fg, Attr::NONE, clip);
        self.put(x, bottom, bl, fg, Attr::NONE, clip);
    }

    /// Text content of row `y`, trailing spaces trimmed.
    pub fn row_text(&self, y: u16) -> String {
        if y >= self.height {
            return String::new();
        }
        let start = y as usize * self.width as usize;
        let row: String = self.cells[start..start + self.width as usize]
            .iter()
            .map(|cell| cell.ch)
            .collect();
        row.trim_end().to_string()
    }

    /// Whole buffer as text, one line per row.
    pub fn to_text(&self) -> String {
        (0..self.height)
            .map(|y| self.row_text(y))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_blank() {
        let buffer = FrameBuffer::new(4, 2);
        assert_eq!(buffer.get(3, 1), Some(&Cell::default()));
        assert_eq!(buffer.get(4, 0), None);
    }

    #[test]
    fn test_print_clips_to_rect() {
        let mut buffer = FrameBuffer::new(10, 2);
        let clip = Rect::new(2, 0, 3, 1);
        let end = buffer.print(0, 0, "abcdef", Rgba::WHITE, Attr::NONE, &clip);

        assert_eq!(end, 6);
        assert_eq!(buffer.row_text(0), "  cde");
        assert_eq!(buffer.row_text(1), "");
    }

    #[test]
    fn test_negative_coordinates_are_skipped() {
        let mut buffer = FrameBuffer::new(5, 3);
        let clip = buffer.bounds();
        buffer.print(-2, -1, "hidden", Rgba::WHITE, Attr::NONE, &clip);
        buffer.print(-2, 1, "abcd", Rgba::WHITE, Attr::NONE, &clip);

        assert_eq!(buffer.row_text(0), "");
        assert_eq!(buffer.row_text(1), "cd");
    }

    #[test]
    fn test_put_keeps_background() {
        let bg = Rgba::rgb(1, 2, 3);
        let mut buffer = FrameBuffer::filled(2, 1, bg);
        let clip = buffer.bounds();
        buffer.put(0, 0, 'x', Rgba::WHITE, Attr::BOLD, &clip);

        let cell = buffer.get(0, 0).unwrap();
        assert_eq!(cell.bg, bg);
        assert_eq!(cell.ch, 'x');
        assert_eq!(cell.attrs, Attr::BOLD);
    }

    #[test]
    fn test_border() {
        let mut buffer = FrameBuffer::new(4, 3);
        let clip = buffer.bounds();
        buffer.border((0, 0, 4, 3), &Border::ROUNDED, Rgba::WHITE, &clip);
        assert_eq!(buffer.to_text(), "╭──╮\n│  │\n╰──╯");
    }

    #[test]
    fn test_fill_erases() {
        let mut buffer = FrameBuffer::new(3, 1);
        let clip = buffer.bounds();
        buffer.print(0, 0, "abc", Rgba::WHITE, Attr::NONE, &clip);
        buffer.fill((1, 0, 5, 1), Rgba::BLACK, &clip);

        assert_eq!(buffer.row_text(0), "a");
        assert_eq!(buffer.get(2, 0).unwrap().bg, Rgba::BLACK);
    }
}
