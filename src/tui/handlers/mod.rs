use std::io;

use crossterm::event::{
    KeyCode, KeyEvent as TermKeyEvent, KeyEventKind, KeyModifiers as TermModifiers,
    ModifierKeyCode,
};

use chirilica_core::{
    Action, KeyEvent, KeyModifiers, LogicalKey, MarkKey, NamedKey, PanelKey, PhysicalKey, Switch,
};

use crate::tui::app::{App, Pane};

/// Handle input and return true if the app should quit
pub fn handle_input(app: &mut App, key: TermKeyEvent) -> io::Result<bool> {
    let pressed = key.kind != KeyEventKind::Release;

    // Global shortcuts act on presses only
    if pressed {
        match key.code {
            KeyCode::Esc => return Ok(true),
            KeyCode::Char('l') if key.modifiers.contains(TermModifiers::CONTROL) => {
                app.clear();
                return Ok(false);
            }
            KeyCode::F(n) => {
                handle_function_key(app, n);
                return Ok(false);
            }
            _ => {}
        }

        if app.focused_pane == Pane::Keyboard && handle_keyboard_pane(app, key.code) {
            return Ok(false);
        }
    }

    app.handle_key(translate(&key));
    Ok(false)
}

fn handle_function_key(app: &mut App, n: u8) {
    match n {
        1 => app.press_panel(PanelKey::Modifier(Switch::Case)),
        2 => app.press_panel(PanelKey::Modifier(Switch::Alternate)),
        3 => app.press_panel(PanelKey::Accent(MarkKey::Acute)),
        4 => app.press_panel(PanelKey::Accent(MarkKey::Grave)),
        5 => app.reload_settings(),
        _ => {}
    }
}

/// Panel navigation while the keyboard pane has focus. Returns true when the
/// key was consumed.
fn handle_keyboard_pane(app: &mut App, code: KeyCode) -> bool {
    match code {
        KeyCode::Up => app.move_panel_cursor(-1, 0),
        KeyCode::Down => app.move_panel_cursor(1, 0),
        KeyCode::Left => app.move_panel_cursor(0, -1),
        KeyCode::Right => app.move_panel_cursor(0, 1),
        KeyCode::Enter => app.press_selected(),
        _ => return false,
    }
    true
}

/// Translate a terminal key event into an engine key event.
///
/// Terminals do not report physical positions, so the code is inferred from
/// the character as a US layout would produce it.
pub fn translate(key: &TermKeyEvent) -> KeyEvent {
    let logical = match key.code {
        KeyCode::Char(ch) => LogicalKey::Character(ch),
        KeyCode::Backspace => LogicalKey::Named(NamedKey::Backspace),
        KeyCode::Delete => LogicalKey::Named(NamedKey::Delete),
        KeyCode::Left => LogicalKey::Named(NamedKey::ArrowLeft),
        KeyCode::Right => LogicalKey::Named(NamedKey::ArrowRight),
        KeyCode::Up => LogicalKey::Named(NamedKey::ArrowUp),
        KeyCode::Down => LogicalKey::Named(NamedKey::ArrowDown),
        KeyCode::Enter => LogicalKey::Named(NamedKey::Enter),
        KeyCode::Tab | KeyCode::BackTab => LogicalKey::Named(NamedKey::Tab),
        KeyCode::Esc => LogicalKey::Named(NamedKey::Escape),
        KeyCode::Home => LogicalKey::Named(NamedKey::Home),
        KeyCode::End => LogicalKey::Named(NamedKey::End),
        KeyCode::Modifier(modifier) => LogicalKey::Named(named_modifier(modifier)),
        _ => LogicalKey::Named(NamedKey::Other),
    };

    let action = match key.kind {
        KeyEventKind::Press => Action::Press,
        KeyEventKind::Repeat => Action::Repeat,
        KeyEventKind::Release => Action::Release,
    };

    let modifiers = KeyModifiers {
        shift: key.modifiers.contains(TermModifiers::SHIFT),
        alt: key.modifiers.contains(TermModifiers::ALT),
        ctrl: key.modifiers.contains(TermModifiers::CONTROL),
        meta: key.modifiers.intersects(TermModifiers::SUPER | TermModifiers::META),
    };

    let event = KeyEvent::new(logical, action).with_modifiers(modifiers);
    match logical.character().and_then(us_code) {
        Some(code) => event.with_code(code),
        None => event,
    }
}

fn named_modifier(modifier: ModifierKeyCode) -> NamedKey {
    match modifier {
        ModifierKeyCode::LeftShift | ModifierKeyCode::RightShift => NamedKey::Shift,
        ModifierKeyCode::LeftAlt | ModifierKeyCode::RightAlt => NamedKey::Alt,
        ModifierKeyCode::LeftControl | ModifierKeyCode::RightControl => NamedKey::Control,
        ModifierKeyCode::LeftSuper
        | ModifierKeyCode::RightSuper
        | ModifierKeyCode::LeftMeta
        | ModifierKeyCode::RightMeta => NamedKey::Meta,
        _ => NamedKey::Other,
    }
}

fn us_code(ch: char) -> Option<PhysicalKey> {
    let code = match ch {
        'a'..='z' | 'A'..='Z' => PhysicalKey::Letter(ch.to_ascii_lowercase()),
        '0'..='9' => PhysicalKey::Digit(ch as u8 - b'0'),
        ';' => PhysicalKey::Semicolon,
        '\'' => PhysicalKey::Quote,
        '[' => PhysicalKey::BracketLeft,
        ']' => PhysicalKey::BracketRight,
        '\\' => PhysicalKey::Backslash,
        ' ' => PhysicalKey::Space,
        _ => return None,
    };
    Some(code)
}
