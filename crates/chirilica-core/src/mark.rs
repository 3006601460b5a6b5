// Chirilica Combining Marks
// The fixed registry of diacritic marks the engine knows how to compose

use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// First scalar of the combining diacritical marks block.
pub const COMBINING_START: u32 = 0x0300;
/// Last scalar of the combining diacritical marks block.
pub const COMBINING_END: u32 = 0x036F;

/// A diacritic the engine can arm and compose.
///
/// Only one mark may sit on a base glyph at a time; arming or applying a
/// second one replaces the first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum MarkKey {
    Acute,
    Grave,
}

impl MarkKey {
    /// The combining scalar this mark inserts.
    pub const fn combining(self) -> char {
        match self {
            MarkKey::Acute => '\u{0301}',
            MarkKey::Grave => '\u{0300}',
        }
    }

    /// Spacing form shown on panel keys.
    pub const fn display_glyph(self) -> char {
        match self {
            MarkKey::Acute => '´',
            MarkKey::Grave => '`',
        }
    }

    /// The typed trigger character (`'` or `` ` ``).
    pub const fn trigger_char(self) -> char {
        match self {
            MarkKey::Acute => '\'',
            MarkKey::Grave => '`',
        }
    }

    pub fn from_trigger_char(ch: char) -> Option<Self> {
        match ch {
            '\'' => Some(MarkKey::Acute),
            '`' => Some(MarkKey::Grave),
            _ => None,
        }
    }

    pub fn from_combining(ch: char) -> Option<Self> {
        match ch {
            '\u{0301}' => Some(MarkKey::Acute),
            '\u{0300}' => Some(MarkKey::Grave),
            _ => None,
        }
    }
}

/// Range test for the combining diacritical marks block.
///
/// This stands in for grapheme segmentation; the script's marks all live in
/// this block.
#[inline]
pub const fn is_combining(ch: char) -> bool {
    let code = ch as u32;
    code >= COMBINING_START && code <= COMBINING_END
}

/// True for the marks in the registry.
#[inline]
pub fn is_recognized_mark(ch: char) -> bool {
    MarkKey::from_combining(ch).is_some()
}
