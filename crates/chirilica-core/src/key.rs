// Chirilica Key Events
// Host-agnostic key identity: logical key text plus physical key code

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use strum_macros::{Display, EnumString};

use crate::glyph::{lower_char, GlyphTables};

/// Key transition carried by an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Press,
    Repeat,
    Release,
}

impl Action {
    /// Press or auto-repeat.
    pub fn is_down(self) -> bool {
        matches!(self, Action::Press | Action::Repeat)
    }

    pub fn is_repeat(self) -> bool {
        matches!(self, Action::Repeat)
    }
}

/// Layout-independent key position, named after W3C `KeyboardEvent.code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhysicalKey {
    /// `KeyA`..`KeyZ`, stored as the lowercase letter
    Letter(char),
    Digit(u8),
    Numpad(u8),
    Semicolon,
    Quote,
    BracketLeft,
    BracketRight,
    Backslash,
    Space,
    Unidentified,
}

impl PhysicalKey {
    /// The Latin letter a `KeyX` code stands for.
    pub fn letter(self) -> Option<char> {
        match self {
            PhysicalKey::Letter(ch) => Some(ch),
            _ => None,
        }
    }
}

impl FromStr for PhysicalKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed = match s {
            "Semicolon" => PhysicalKey::Semicolon,
            "Quote" => PhysicalKey::Quote,
            "BracketLeft" => PhysicalKey::BracketLeft,
            "BracketRight" => PhysicalKey::BracketRight,
            "Backslash" => PhysicalKey::Backslash,
            "Space" => PhysicalKey::Space,
            "Unidentified" => PhysicalKey::Unidentified,
            _ => {
                if let Some(rest) = s.strip_prefix("Key") {
                    let mut chars = rest.chars();
                    match (chars.next(), chars.next()) {
                        (Some(ch), None) if ch.is_ascii_alphabetic() => {
                            PhysicalKey::Letter(ch.to_ascii_lowercase())
                        }
                        _ => return Err(format!("Unknown key code: {}", s)),
                    }
                } else if let Some(rest) = s.strip_prefix("Digit") {
                    PhysicalKey::Digit(parse_digit(rest).ok_or_else(|| format!("Unknown key code: {}", s))?)
                } else if let Some(rest) = s.strip_prefix("Numpad") {
                    PhysicalKey::Numpad(parse_digit(rest).ok_or_else(|| format!("Unknown key code: {}", s))?)
                } else {
                    return Err(format!("Unknown key code: {}", s));
                }
            }
        };
        Ok(parsed)
    }
}

fn parse_digit(s: &str) -> Option<u8> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => ch.to_digit(10).map(|d| d as u8),
        _ => None,
    }
}

impl fmt::Display for PhysicalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhysicalKey::Letter(ch) => write!(f, "Key{}", ch.to_ascii_uppercase()),
            PhysicalKey::Digit(d) => write!(f, "Digit{}", d),
            PhysicalKey::Numpad(d) => write!(f, "Numpad{}", d),
            PhysicalKey::Semicolon => write!(f, "Semicolon"),
            PhysicalKey::Quote => write!(f, "Quote"),
            PhysicalKey::BracketLeft => write!(f, "BracketLeft"),
            PhysicalKey::BracketRight => write!(f, "BracketRight"),
            PhysicalKey::Backslash => write!(f, "Backslash"),
            PhysicalKey::Space => write!(f, "Space"),
            PhysicalKey::Unidentified => write!(f, "Unidentified"),
        }
    }
}

/// Non-printable keys the engine cares about, named after W3C
/// `KeyboardEvent.key` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
pub enum NamedKey {
    Shift,
    Alt,
    Control,
    Meta,
    Backspace,
    Delete,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Enter,
    Tab,
    Escape,
    Home,
    End,
    Other,
}

impl NamedKey {
    /// Keys the host always handles natively.
    pub fn is_navigation(self) -> bool {
        matches!(
            self,
            NamedKey::Backspace
                | NamedKey::Delete
                | NamedKey::ArrowLeft
                | NamedKey::ArrowRight
                | NamedKey::ArrowUp
                | NamedKey::ArrowDown
                | NamedKey::Enter
                | NamedKey::Tab
        )
    }
}

/// What the key produces under the host's active layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalKey {
    Character(char),
    /// A dead key whose accent the layout has not resolved yet
    Dead,
    Named(NamedKey),
}

impl LogicalKey {
    /// Parse a W3C `KeyboardEvent.key` string.
    pub fn parse(key: &str) -> Self {
        if key == "Dead" {
            return LogicalKey::Dead;
        }
        let mut chars = key.chars();
        if let (Some(ch), None) = (chars.next(), chars.next()) {
            return LogicalKey::Character(ch);
        }
        LogicalKey::Named(NamedKey::from_str(key).unwrap_or(NamedKey::Other))
    }

    pub fn character(self) -> Option<char> {
        match self {
            LogicalKey::Character(ch) => Some(ch),
            _ => None,
        }
    }
}

/// Physical modifier keys down at the time of the event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct KeyModifiers {
    pub shift: bool,
    pub alt: bool,
    pub ctrl: bool,
    pub meta: bool,
}

/// One physical key event from the host input surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub key: LogicalKey,
    pub code: Option<PhysicalKey>,
    pub action: Action,
    pub modifiers: KeyModifiers,
}

impl KeyEvent {
    pub fn new(key: LogicalKey, action: Action) -> Self {
        Self {
            key,
            code: None,
            action,
            modifiers: KeyModifiers::default(),
        }
    }

    pub fn press(key: LogicalKey) -> Self {
        Self::new(key, Action::Press)
    }

    pub fn release(key: LogicalKey) -> Self {
        Self::new(key, Action::Release)
    }

    /// Press of a printable character with no physical code.
    pub fn char(ch: char) -> Self {
        Self::press(LogicalKey::Character(ch))
    }

    pub fn named(named: NamedKey) -> Self {
        Self::press(LogicalKey::Named(named))
    }

    pub fn with_code(mut self, code: PhysicalKey) -> Self {
        self.code = Some(code);
        self
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.action = action;
        self
    }

    pub fn with_modifiers(mut self, modifiers: KeyModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_shift(mut self) -> Self {
        self.modifiers.shift = true;
        self
    }

    pub fn with_alt(mut self) -> Self {
        self.modifiers.alt = true;
        self
    }

    pub fn with_ctrl(mut self) -> Self {
        self.modifiers.ctrl = true;
        self
    }

    pub fn is_repeat(&self) -> bool {
        self.action.is_repeat()
    }
}

/// Physical codes that stand for a source letter regardless of the host
/// layout (the Romanian letters on a US keyboard).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeMap {
    entries: IndexMap<PhysicalKey, char>,
}

impl CodeMap {
    pub fn empty() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    pub fn builtin() -> Self {
        let mut map = Self::empty();
        map.insert(PhysicalKey::Semicolon, 'ș');
        map.insert(PhysicalKey::Quote, 'ț');
        map.insert(PhysicalKey::BracketLeft, 'ă');
        map.insert(PhysicalKey::BracketRight, 'î');
        map.insert(PhysicalKey::Backslash, 'â');
        map
    }

    pub fn insert(&mut self, code: PhysicalKey, source: char) -> Option<char> {
        self.entries.insert(code, source)
    }

    pub fn get(&self, code: PhysicalKey) -> Option<char> {
        self.entries.get(&code).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PhysicalKey, char)> + '_ {
        self.entries.iter().map(|(k, v)| (*k, *v))
    }

    /// Recover the logical source character for a key event.
    ///
    /// The physical code wins when it is known, so the result does not
    /// depend on the host layout. Otherwise the key text is used, but only
    /// when one of the tables maps it.
    pub fn resolve(&self, event: &KeyEvent, tables: &GlyphTables) -> Option<char> {
        if let Some(code) = event.code {
            if let Some(source) = self.get(code) {
                return Some(source);
            }
            if let Some(letter) = code.letter() {
                return Some(letter);
            }
        }

        let ch = event.key.character()?;
        let lower = lower_char(ch);
        if tables.maps(lower) {
            Some(lower)
        } else {
            None
        }
    }
}

impl Default for CodeMap {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_physical_key_parse() {
        assert_eq!("KeyA".parse(), Ok(PhysicalKey::Letter('a')));
        assert_eq!("Digit3".parse(), Ok(PhysicalKey::Digit(3)));
        assert_eq!("Numpad4".parse(), Ok(PhysicalKey::Numpad(4)));
        assert_eq!("Semicolon".parse(), Ok(PhysicalKey::Semicolon));
        assert!("KeyAB".parse::<PhysicalKey>().is_err());
        assert!("F1".parse::<PhysicalKey>().is_err());
    }

    #[test]
    fn test_physical_key_display_round_trip() {
        for code in ["KeyQ", "Digit0", "Numpad9", "BracketRight", "Quote"] {
            let parsed: PhysicalKey = code.parse().unwrap();
            assert_eq!(parsed.to_string(), code);
        }
    }

    #[test]
    fn test_logical_key_parse() {
        assert_eq!(LogicalKey::parse("a"), LogicalKey::Character('a'));
        assert_eq!(LogicalKey::parse("ș"), LogicalKey::Character('ș'));
        assert_eq!(LogicalKey::parse("Dead"), LogicalKey::Dead);
        assert_eq!(LogicalKey::parse("Shift"), LogicalKey::Named(NamedKey::Shift));
        assert_eq!(LogicalKey::parse("F13"), LogicalKey::Named(NamedKey::Other));
    }

    #[test]
    fn test_navigation_keys() {
        assert!(NamedKey::ArrowLeft.is_navigation());
        assert!(NamedKey::Backspace.is_navigation());
        assert!(!NamedKey::Shift.is_navigation());
        assert!(!NamedKey::Escape.is_navigation());
    }

    #[test]
    fn test_resolve_prefers_code() {
        let tables = GlyphTables::builtin();
        let map = CodeMap::builtin();

        // A German layout reports 'ö' on Semicolon
        let event = KeyEvent::char('ö').with_code(PhysicalKey::Semicolon);
        assert_eq!(map.resolve(&event, &tables), Some('ș'));

        // A Cyrillic layout reports 'ф' on KeyA
        let event = KeyEvent::char('ф').with_code(PhysicalKey::Letter('a'));
        assert_eq!(map.resolve(&event, &tables), Some('a'));
    }

    #[test]
    fn test_resolve_from_key_text() {
        let tables = GlyphTables::builtin();
        let map = CodeMap::builtin();

        assert_eq!(map.resolve(&KeyEvent::char('Ț'), &tables), Some('ț'));
        assert_eq!(map.resolve(&KeyEvent::char('1'), &tables), None);

        let dead = KeyEvent::press(LogicalKey::Dead).with_code(PhysicalKey::Letter('e'));
        assert_eq!(map.resolve(&dead, &tables), Some('e'));
        let dead = KeyEvent::press(LogicalKey::Dead).with_code(PhysicalKey::Digit(6));
        assert_eq!(map.resolve(&dead, &tables), None);
    }
}
