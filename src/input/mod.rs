use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::editor::Intent;

/// What the front-end should do with a terminal event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// Hand this intent to the editor
    Intent(Intent),
    /// Leave the editor
    Quit,
    /// Unbound key; nothing to do
    None,
}

/// Map a key press onto an editor intent
pub fn key_action(key: KeyEvent) -> KeyAction {
    if key.kind == KeyEventKind::Release {
        return KeyAction::None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') => KeyAction::Quit,
            _ => KeyAction::None,
        };
    }

    let intent = match key.code {
        KeyCode::Char(_) if key.modifiers.contains(KeyModifiers::ALT) => return KeyAction::None,
        KeyCode::Char(c) => Intent::TypeChar(c),
        KeyCode::Tab => Intent::TypeChar('\t'),
        KeyCode::Backspace => Intent::Backspace,
        KeyCode::Enter => Intent::Enter,
        KeyCode::Up => Intent::MoveUp,
        KeyCode::Down => Intent::MoveDown,
        KeyCode::Left => Intent::MoveLeft,
        KeyCode::Right => Intent::MoveRight,
        _ => return KeyAction::None,
    };
    KeyAction::Intent(intent)
}

/// Map any terminal event, including paste and resize
pub fn event_action(event: Event) -> KeyAction {
    match event {
        Event::Key(key) => key_action(key),
        Event::Paste(text) => KeyAction::Intent(Intent::Paste(text)),
        Event::Resize(width, height) => KeyAction::Intent(Intent::Resize { width, height }),
        _ => KeyAction::None,
    }
}
