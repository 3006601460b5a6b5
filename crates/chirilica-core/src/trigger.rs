// Chirilica Trigger Keys
// Dead-key characters and physical codes that hold a diacritic

use indexmap::IndexMap;

use crate::key::PhysicalKey;
use crate::mark::MarkKey;

/// Physical inputs that arm a diacritic while held.
///
/// Two kinds exist: dead-key characters reported by the host layout (the
/// `˘` and `ˆ` a Romanian layout emits), and shortcut codes that work on any
/// layout (digit row and numpad 3/4).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerMap {
    dead_keys: IndexMap<char, MarkKey>,
    codes: IndexMap<PhysicalKey, MarkKey>,
}

impl TriggerMap {
    pub fn empty() -> Self {
        Self {
            dead_keys: IndexMap::new(),
            codes: IndexMap::new(),
        }
    }

    pub fn builtin() -> Self {
        let mut map = Self::empty();
        map.bind_dead_key('˘', MarkKey::Acute);
        map.bind_dead_key('ˆ', MarkKey::Grave);
        map.bind_code(PhysicalKey::Digit(3), MarkKey::Acute);
        map.bind_code(PhysicalKey::Digit(4), MarkKey::Grave);
        map.bind_code(PhysicalKey::Numpad(3), MarkKey::Acute);
        map.bind_code(PhysicalKey::Numpad(4), MarkKey::Grave);
        map
    }

    pub fn bind_dead_key(&mut self, ch: char, mark: MarkKey) -> Option<MarkKey> {
        self.dead_keys.insert(ch, mark)
    }

    pub fn bind_code(&mut self, code: PhysicalKey, mark: MarkKey) -> Option<MarkKey> {
        self.codes.insert(code, mark)
    }

    pub fn dead_key(&self, ch: char) -> Option<MarkKey> {
        self.dead_keys.get(&ch).copied()
    }

    pub fn code(&self, code: PhysicalKey) -> Option<MarkKey> {
        self.codes.get(&code).copied()
    }

    pub fn dead_keys(&self) -> impl Iterator<Item = (char, MarkKey)> + '_ {
        self.dead_keys.iter().map(|(k, v)| (*k, *v))
    }

    pub fn codes(&self) -> impl Iterator<Item = (PhysicalKey, MarkKey)> + '_ {
        self.codes.iter().map(|(k, v)| (*k, *v))
    }

    /// The shortcut code bound to `mark`, for panel hints ("3", "4").
    pub fn hint_for(&self, mark: MarkKey) -> Option<String> {
        self.codes.iter().find_map(|(code, bound)| match code {
            PhysicalKey::Digit(d) if *bound == mark => Some(d.to_string()),
            _ => None,
        })
    }
}

impl Default for TriggerMap {
    fn default() -> Self {
        Self::builtin()
    }
}
