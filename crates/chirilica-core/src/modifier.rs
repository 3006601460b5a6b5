// Chirilica Modifier Switches
// Case and alternate-set switches with latched/held activation

use std::fmt;

use strum_macros::{EnumIter, EnumString, IntoStaticStr};

/// One of the two independent two-level switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, IntoStaticStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Switch {
    /// Upper-cases the produced glyph
    Case,
    /// Substitutes the alternate glyph set
    Alternate,
}

impl Switch {
    /// Glyph shown on the on-screen panel key.
    pub fn panel_glyph(self) -> &'static str {
        match self {
            Switch::Case => "⇧",
            Switch::Alternate => "⌥",
        }
    }
}

impl fmt::Display for Switch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name: &'static str = (*self).into();
        write!(f, "{}", name)
    }
}

/// State of a single switch.
///
/// `latched` is a one-shot toggle that clears after it contributes to an
/// output character. `held` follows a physical key and is only cleared on
/// release.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModifierState {
    pub latched: bool,
    pub held: bool,
}

impl ModifierState {
    pub fn is_active(self) -> bool {
        self.latched || self.held
    }
}

/// Both switches of one engine instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    case: ModifierState,
    alternate: ModifierState,
}

impl Modifiers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, switch: Switch) -> ModifierState {
        match switch {
            Switch::Case => self.case,
            Switch::Alternate => self.alternate,
        }
    }

    fn state_mut(&mut self, switch: Switch) -> &mut ModifierState {
        match switch {
            Switch::Case => &mut self.case,
            Switch::Alternate => &mut self.alternate,
        }
    }

    /// Flip the latch, returning the new latched value.
    pub fn toggle_latch(&mut self, switch: Switch) -> bool {
        let state = self.state_mut(switch);
        state.latched = !state.latched;
        log::debug!("{} latch -> {}", switch, state.latched);
        state.latched
    }

    pub fn set_held(&mut self, switch: Switch, held: bool) {
        let state = self.state_mut(switch);
        if state.held != held {
            log::debug!("{} held -> {}", switch, held);
        }
        state.held = held;
    }

    pub fn is_active(&self, switch: Switch) -> bool {
        self.state(switch).is_active()
    }

    /// Spend both latches. Held state is untouched.
    pub fn clear_latches(&mut self) {
        if self.case.latched || self.alternate.latched {
            log::trace!("clearing modifier latches");
        }
        self.case.latched = false;
        self.alternate.latched = false;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
