//! Mapping from terminal events to engine input events.

use arrayvec::ArrayVec;
use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, ModifierKeyCode, MouseButton as TermButton,
    MouseEvent, MouseEventKind,
};

use crate::types::{InputEvent, Key, MouseButton};

/// Events produced by a single terminal event.
pub type MappedEvents = ArrayVec<InputEvent, 3>;

/// Map a terminal key code to an engine key.
pub fn map_key_code(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Char(c) => Key::from_char(c),
        KeyCode::F(n) => Key::function(n),
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        KeyCode::Tab | KeyCode::BackTab => Some(Key::Tab),
        KeyCode::Insert => Some(Key::Ins),
        KeyCode::Delete => Some(Key::Del),
        KeyCode::Home => Some(Key::Home),
        KeyCode::End => Some(Key::End),
        KeyCode::PageUp => Some(Key::PgUp),
        KeyCode::PageDown => Some(Key::PgDn),
        KeyCode::Backspace => Some(Key::Back),
        KeyCode::Esc => Some(Key::Escape),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Pause => Some(Key::Pause),
        KeyCode::Modifier(m) => match m {
            ModifierKeyCode::LeftShift | ModifierKeyCode::RightShift => Some(Key::Shift),
            ModifierKeyCode::LeftControl | ModifierKeyCode::RightControl => Some(Key::Ctrl),
            _ => None,
        },
        _ => None,
    }
}

/// Map a key event.
///
/// Presses and repeats become `KeyDown`, preceded by `KeyDown(Shift)` /
/// `KeyDown(Ctrl)` when those modifiers are active. Releases (only reported
/// by terminals with keyboard enhancement) become `KeyUp`.
pub fn map_key_event(key: KeyEvent) -> MappedEvents {
    let mut out = MappedEvents::new();
    let Some(mapped) = map_key_code(key.code) else {
        return out;
    };

    match key.kind {
        KeyEventKind::Press | KeyEventKind::Repeat => {
            if mapped != Key::Shift && key.modifiers.contains(KeyModifiers::SHIFT) {
                out.push(InputEvent::KeyDown(Key::Shift));
            }
            if mapped != Key::Ctrl && key.modifiers.contains(KeyModifiers::CONTROL) {
                out.push(InputEvent::KeyDown(Key::Ctrl));
            }
            out.push(InputEvent::KeyDown(mapped));
        }
        KeyEventKind::Release => out.push(InputEvent::KeyUp(mapped)),
    }
    out
}

fn map_button(button: TermButton) -> MouseButton {
    match button {
        TermButton::Left => MouseButton::Left,
        TermButton::Middle => MouseButton::Middle,
        TermButton::Right => MouseButton::Right,
    }
}

/// Map a mouse event. `to_pixel` converts a terminal cell to screen pixels.
pub fn map_mouse_event(
    event: MouseEvent,
    to_pixel: impl Fn(u16, u16) -> (i32, i32),
) -> MappedEvents {
    let mut out = MappedEvents::new();
    let (x, y) = to_pixel(event.column, event.row);
    let moved = InputEvent::MouseMove { x, y };

    match event.kind {
        MouseEventKind::Down(b) => {
            out.push(moved);
            out.push(InputEvent::MouseDown(map_button(b)));
        }
        MouseEventKind::Up(b) => {
            out.push(moved);
            out.push(InputEvent::MouseUp(map_button(b)));
        }
        MouseEventKind::Drag(_) | MouseEventKind::Moved => out.push(moved),
        MouseEventKind::ScrollUp => out.push(InputEvent::MouseWheel(1)),
        MouseEventKind::ScrollDown => out.push(InputEvent::MouseWheel(-1)),
        MouseEventKind::ScrollLeft | MouseEventKind::ScrollRight => {}
    }
    out
}

/// Ctrl+C always ends the program, regardless of what the game does with keys.
pub fn should_quit(key: KeyEvent) -> bool {
    key.kind != KeyEventKind::Release
        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
        && key.modifiers.contains(KeyModifiers::CONTROL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn release(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_letter_and_digit_keys() {
        assert_eq!(map_key_code(KeyCode::Char('w')), Some(Key::W));
        assert_eq!(map_key_code(KeyCode::Char('W')), Some(Key::W));
        assert_eq!(map_key_code(KeyCode::Char('5')), Some(Key::K5));
        assert_eq!(map_key_code(KeyCode::Char(' ')), Some(Key::Space));
        assert_eq!(map_key_code(KeyCode::Char('@')), None);
    }

    #[test]
    fn test_named_keys() {
        assert_eq!(map_key_code(KeyCode::Esc), Some(Key::Escape));
        assert_eq!(map_key_code(KeyCode::Enter), Some(Key::Enter));
        assert_eq!(map_key_code(KeyCode::Backspace), Some(Key::Back));
        assert_eq!(map_key_code(KeyCode::PageDown), Some(Key::PgDn));
        assert_eq!(map_key_code(KeyCode::F(12)), Some(Key::F12));
        assert_eq!(map_key_code(KeyCode::F(13)), None);
    }

    #[test]
    fn test_press_with_modifiers() {
        let events = map_key_event(KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT));
        assert_eq!(
            events.as_slice(),
            &[InputEvent::KeyDown(Key::Shift), InputEvent::KeyDown(Key::A)]
        );

        let events = map_key_event(KeyEvent::from(KeyCode::Left));
        assert_eq!(events.as_slice(), &[InputEvent::KeyDown(Key::Left)]);
    }

    #[test]
    fn test_release_maps_to_key_up() {
        let events = map_key_event(release(KeyCode::Char('x')));
        assert_eq!(events.as_slice(), &[InputEvent::KeyUp(Key::X)]);
    }

    #[test]
    fn test_unmapped_key_produces_nothing() {
        assert!(map_key_event(KeyEvent::from(KeyCode::CapsLock)).is_empty());
    }

    #[test]
    fn test_mouse_events() {
        let scale = |c: u16, r: u16| (c as i32 / 2, r as i32 * 2);
        let down = MouseEvent {
            kind: MouseEventKind::Down(TermButton::Right),
            column: 10,
            row: 3,
            modifiers: KeyModifiers::NONE,
        };
        assert_eq!(
            map_mouse_event(down, scale).as_slice(),
            &[InputEvent::MouseMove { x: 5, y: 6 }, InputEvent::MouseDown(MouseButton::Right)]
        );

        let scroll = MouseEvent {
            kind: MouseEventKind::ScrollDown,
            ..down
        };
        assert_eq!(map_mouse_event(scroll, scale).as_slice(), &[InputEvent::MouseWheel(-1)]);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('c'))));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('q'))));
    }
}
