// Chirilica Panel Layout
// Keys of the on-screen panel and the labels projected onto them

use std::fmt;

use crate::mark::MarkKey;
use crate::modifier::Switch;

/// A key on the on-screen panel. Pressing one is a virtual key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelKey {
    /// Types a source letter
    Standard(char),
    /// Toggles a switch latch
    Modifier(Switch),
    /// Applies or latches a diacritic
    Accent(MarkKey),
    Backspace,
    Space,
}

impl PanelKey {
    /// Source letter for standard keys.
    pub fn value(self) -> Option<char> {
        match self {
            PanelKey::Standard(ch) => Some(ch),
            _ => None,
        }
    }
}

impl fmt::Display for PanelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PanelKey::Standard(ch) => write!(f, "{}", ch),
            PanelKey::Modifier(switch) => write!(f, "{}", switch),
            PanelKey::Accent(mark) => write!(f, "{}", mark),
            PanelKey::Backspace => write!(f, "backspace"),
            PanelKey::Space => write!(f, "space"),
        }
    }
}

use self::PanelKey::{Accent, Backspace, Modifier, Space, Standard};

/// Panel rows, top to bottom.
pub const ROWS: &[&[PanelKey]] = &[
    &[
        Standard('q'),
        Standard('w'),
        Standard('e'),
        Standard('r'),
        Standard('t'),
        Standard('y'),
        Standard('u'),
        Standard('i'),
        Standard('o'),
        Standard('p'),
        Standard('ă'),
        Standard('î'),
    ],
    &[
        Standard('a'),
        Standard('s'),
        Standard('d'),
        Standard('f'),
        Standard('g'),
        Standard('h'),
        Standard('j'),
        Standard('k'),
        Standard('l'),
        Standard('ș'),
        Standard('ț'),
        Standard('â'),
    ],
    &[
        Modifier(Switch::Case),
        Modifier(Switch::Alternate),
        Standard('z'),
        Standard('x'),
        Standard('c'),
        Standard('v'),
        Standard('b'),
        Standard('n'),
        Standard('m'),
        Accent(MarkKey::Acute),
        Accent(MarkKey::Grave),
        Backspace,
    ],
    &[Space],
];

/// Iterate every panel key in row order.
pub fn keys() -> impl Iterator<Item = PanelKey> {
    ROWS.iter().flat_map(|row| row.iter().copied())
}

/// What a panel key displays for the current engine state.
///
/// Labels are recomputed from scratch after every state change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyLabel {
    pub primary: String,
    pub secondary: Option<String>,
    /// Switch or diacritic keys that are currently armed
    pub active: bool,
}

impl KeyLabel {
    pub fn new(primary: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            secondary: None,
            active: false,
        }
    }

    pub fn with_secondary(mut self, secondary: impl Into<String>) -> Self {
        self.secondary = Some(secondary.into());
        self
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }
}
