use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};

use crate::command::Command;

const SCROLL_STEP: i32 = 1;
const PAGE_SCROLL_STEP: i32 = 10;

/// Which modifier turns `1`..`9` into a page shortcut.
///
/// `Ctrl` also accepts Super, the closest terminal analogue of Meta.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutModifier {
    Alt,
    Ctrl,
}

impl ShortcutModifier {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "ctrl" | "control" | "meta" => Self::Ctrl,
            _ => Self::Alt,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Alt => "Alt",
            Self::Ctrl => "Ctrl",
        }
    }

    fn matches(self, modifiers: KeyModifiers) -> bool {
        match self {
            Self::Alt => modifiers.contains(KeyModifiers::ALT),
            Self::Ctrl => modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::SUPER),
        }
    }
}

pub fn map_key_to_command(key: KeyEvent, modifier: ShortcutModifier) -> Option<Command> {
    if let KeyCode::Char(ch) = key.code
        && modifier.matches(key.modifiers)
        && let Some(digit) = shortcut_digit(ch)
    {
        return Some(Command::Shortcut { digit });
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Command::Quit),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => Some(Command::SelectNext),
        KeyCode::Char('k') | KeyCode::Up => Some(Command::SelectPrev),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Command::ActivateSelected),
        KeyCode::Tab | KeyCode::Char('m') => Some(Command::ToggleMenu),
        KeyCode::Char('J') => Some(Command::Scroll { dy: SCROLL_STEP }),
        KeyCode::Char('K') => Some(Command::Scroll { dy: -SCROLL_STEP }),
        KeyCode::PageDown => Some(Command::Scroll {
            dy: PAGE_SCROLL_STEP,
        }),
        KeyCode::PageUp => Some(Command::Scroll {
            dy: -PAGE_SCROLL_STEP,
        }),
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
        _ => None,
    }
}

/// Left clicks inside the menu rows activate that entry; the wheel scrolls content.
pub fn map_mouse_to_command(
    mouse: MouseEvent,
    menu_rows: Rect,
    entry_count: usize,
) -> Option<Command> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if !menu_rows.contains(Position::new(mouse.column, mouse.row)) {
                return None;
            }
            let index = usize::from(mouse.row - menu_rows.y);
            (index < entry_count).then_some(Command::ActivateEntry { index })
        }
        MouseEventKind::ScrollDown => Some(Command::Scroll { dy: SCROLL_STEP }),
        MouseEventKind::ScrollUp => Some(Command::Scroll { dy: -SCROLL_STEP }),
        _ => None,
    }
}

fn shortcut_digit(ch: char) -> Option<u8> {
    let digit = ch.to_digit(10)?;
    (1..=9).contains(&digit).then_some(digit as u8)
}
