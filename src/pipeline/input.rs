//! Input - crossterm events to storyboard commands.
//!
//! [`translate`] is pure: it looks at one event and the hit regions of the
//! last composed frame and decides what the user asked for.
//!
//! | Input                       | Command                 |
//! |-----------------------------|-------------------------|
//! | `space`, `p`, Play button   | [`Command::TogglePlay`] |
//! | `r`, Reset button           | [`Command::Reset`]      |
//! | `t`, Theme button           | [`Command::ToggleTheme`]|
//! | `q`, `Esc`, `Ctrl+C`        | [`Command::Quit`]       |
//! | pointer move                | [`Command::Hover`]      |
//! | terminal resize             | [`Command::Resize`]     |

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::types::Rect;
use crate::view::ItemKey;
use crate::widgets::Control;

/// A card under the pointer.
#[derive(Debug, Clone, PartialEq)]
pub struct HoverTarget {
    pub key: ItemKey,
    /// Card rect before tilt.
    pub rect: Rect,
    pub x: u16,
    pub y: u16,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    TogglePlay,
    Reset,
    ToggleTheme,
    Quit,
    /// Pointer moved; `None` when it is not over any card.
    Hover(Option<HoverTarget>),
    Resize(u16, u16),
}

impl From<Control> for Command {
    fn from(control: Control) -> Self {
        match control {
            Control::PlayPause => Self::TogglePlay,
            Control::Reset => Self::Reset,
            Control::Theme => Self::ToggleTheme,
        }
    }
}

// =============================================================================
// HIT MAP
// =============================================================================

/// Clickable and hoverable regions of the last frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HitMap {
    controls: Vec<(Rect, Control)>,
    cards: Vec<(Rect, ItemKey)>,
}

impl HitMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_control(&mut self, rect: Rect, control: Control) {
        self.controls.push((rect, control));
    }

    pub fn add_card(&mut self, rect: Rect, key: ItemKey) {
        self.cards.push((rect, key));
    }

    pub fn control_at(&self, x: u16, y: u16) -> Option<Control> {
        self.controls
            .iter()
            .find(|(rect, _)| rect.contains(x, y))
            .map(|(_, control)| *control)
    }

    /// Topmost card at a position (cards added later are drawn on top).
    pub fn card_at(&self, x: u16, y: u16) -> Option<(Rect, &ItemKey)> {
        self.cards
            .iter()
            .rev()
            .find(|(rect, _)| rect.contains(x, y))
            .map(|(rect, key)| (*rect, key))
    }

    pub fn controls(&self) -> &[(Rect, Control)] {
        &self.controls
    }

    pub fn cards(&self) -> &[(Rect, ItemKey)] {
        &self.cards
    }
}

// =============================================================================
// TRANSLATION
// =============================================================================

/// Map one terminal event to a command.
pub fn translate(event: &Event, hits: &HitMap) -> Option<Command> {
    match event {
        Event::Key(key) => translate_key(key),
        Event::Mouse(mouse) => translate_mouse(mouse, hits),
        Event::Resize(width, height) => Some(Command::Resize(*width, *height)),
        Event::FocusLost => Some(Command::Hover(None)),
        _ => None,
    }
}

fn translate_key(key: &KeyEvent) -> Option<Command> {
    // Only handle Press events (ignore Release/Repeat on kitty terminals)
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Command::Quit),
            _ => None,
        };
    }
    match key.code {
        KeyCode::Char(' ') | KeyCode::Char('p') => Some(Command::TogglePlay),
        KeyCode::Char('r') => Some(Command::Reset),
        KeyCode::Char('t') => Some(Command::ToggleTheme),
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
        _ => None,
    }
}

fn translate_mouse(mouse: &MouseEvent, hits: &HitMap) -> Option<Command> {
    let (x, y) = (mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => hits.control_at(x, y).map(Command::from),
        MouseEventKind::Moved | MouseEventKind::Drag(_) => {
            let target = hits.card_at(x, y).map(|(rect, key)| HoverTarget {
                key: key.clone(),
                rect,
                x,
                y,
            });
            Some(Command::Hover(target))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StepType;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn card_key() -> ItemKey {
        ItemKey {
            index: 0,
            title: "a".to_string(),
            step_type: StepType::Validate,
        }
    }

    #[test]
    fn test_keys() {
        let hits = HitMap::new();
        assert_eq!(translate(&key(KeyCode::Char(' ')), &hits), Some(Command::TogglePlay));
        assert_eq!(translate(&key(KeyCode::Char('p')), &hits), Some(Command::TogglePlay));
        assert_eq!(translate(&key(KeyCode::Char('r')), &hits), Some(Command::Reset));
        assert_eq!(translate(&key(KeyCode::Char('t')), &hits), Some(Command::ToggleTheme));
        assert_eq!(translate(&key(KeyCode::Char('q')), &hits), Some(Command::Quit));
        assert_eq!(translate(&key(KeyCode::Esc), &hits), Some(Command::Quit));
        assert_eq!(translate(&key(KeyCode::Char('x')), &hits), None);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let event = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(translate(&event, &HitMap::new()), Some(Command::Quit));
    }

    #[test]
    fn test_key_release_ignored() {
        let event = Event::Key(KeyEvent {
            code: KeyCode::Char('r'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        });
        assert_eq!(translate(&event, &HitMap::new()), None);
    }

    #[test]
    fn test_click_on_controls() {
        let mut hits = HitMap::new();
        hits.add_control(Rect::new(10, 0, 5, 1), Control::PlayPause);
        hits.add_control(Rect::new(20, 0, 5, 1), Control::Theme);

        let click = |x| mouse(MouseEventKind::Down(MouseButton::Left), x, 0);
        assert_eq!(translate(&click(12), &hits), Some(Command::TogglePlay));
        assert_eq!(translate(&click(24), &hits), Some(Command::ToggleTheme));
        assert_eq!(translate(&click(16), &hits), None);
    }

    #[test]
    fn test_pointer_over_card_and_off() {
        let mut hits = HitMap::new();
        let rect = Rect::new(5, 5, 20, 4);
        hits.add_card(rect, card_key());

        let over = translate(&mouse(MouseEventKind::Moved, 6, 6), &hits);
        assert_eq!(
            over,
            Some(Command::Hover(Some(HoverTarget {
                key: card_key(),
                rect,
                x: 6,
                y: 6,
            })))
        );

        let off = translate(&mouse(MouseEventKind::Moved, 0, 0), &hits);
        assert_eq!(off, Some(Command::Hover(None)));
    }

    #[test]
    fn test_resize() {
        assert_eq!(
            translate(&Event::Resize(100, 40), &HitMap::new()),
            Some(Command::Resize(100, 40))
        );
    }
}
