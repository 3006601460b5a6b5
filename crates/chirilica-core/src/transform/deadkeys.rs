use crate::mark::MarkKey;

/// Which diacritic is armed, split by how it was armed.
///
/// A latched mark comes from a panel click and is spent by the first
/// successful composition. A held mark follows a physical dead key or
/// shortcut key and stays armed across repeats until the key is released.
/// Only one mark is armed per slot; arming another replaces it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiacriticState {
    latched: Option<MarkKey>,
    held: Option<MarkKey>,
}

impl DiacriticState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle the latch: disarms when already latched to `mark`, otherwise
    /// latches `mark` in place of any previous latch.
    pub fn arm_latch(&mut self, mark: MarkKey) -> Option<MarkKey> {
        self.latched = if self.latched == Some(mark) {
            None
        } else {
            Some(mark)
        };
        log::debug!("diacritic latch -> {:?}", self.latched);
        self.latched
    }

    pub fn set_held(&mut self, mark: Option<MarkKey>) {
        if self.held != mark {
            log::debug!("diacritic held -> {:?}", mark);
        }
        self.held = mark;
    }

    /// Release a held mark. A release for a different mark than the one
    /// currently held is ignored.
    pub fn release_held(&mut self, mark: MarkKey) -> bool {
        if self.held == Some(mark) {
            self.set_held(None);
            true
        } else {
            false
        }
    }

    /// Held takes precedence over latched.
    pub fn active(&self) -> Option<MarkKey> {
        self.held.or(self.latched)
    }

    pub fn is_active(&self, mark: MarkKey) -> bool {
        self.active() == Some(mark)
    }

    pub fn latched(&self) -> Option<MarkKey> {
        self.latched
    }

    pub fn held(&self) -> Option<MarkKey> {
        self.held
    }

    /// Spend the latch after a composition with `mark`.
    ///
    /// Key repeats never spend it.
    pub fn consume_if_latched(&mut self, mark: MarkKey, repeat: bool) -> bool {
        if repeat || self.latched != Some(mark) {
            return false;
        }
        log::debug!("diacritic latch {} consumed", mark);
        self.latched = None;
        true
    }

    pub fn clear_latch(&mut self) {
        self.latched = None;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
