// Chirilica Transliteration Engine
// Event handling pipeline: key -> switch/diacritic state -> glyph -> buffer
//
// Features:
// - Physical key handling with held switches and held diacritics
// - Virtual (panel) key handling with latched switches and diacritics
// - Backward-reaching diacritic composition, either order
// - Native insertion suppression for intercepted events
// - Label projection for the panel

use crate::buffer::{self, TextBuffer};
use crate::glyph::GlyphTables;
use crate::key::{CodeMap, KeyEvent, LogicalKey, NamedKey};
use crate::mark::MarkKey;
use crate::modifier::{Modifiers, Switch};
use crate::output::{NativeInput, SuppressionGuard};
use crate::panel::{KeyLabel, PanelKey};
use crate::transform::compose;
use crate::transform::deadkeys::DiacriticState;
use crate::trigger::TriggerMap;

/// Static inputs of an engine instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineConfig {
    /// Glyph tables and the accentable set
    pub tables: GlyphTables,
    /// Dead keys and shortcut codes that arm diacritics
    pub triggers: TriggerMap,
    /// Physical codes that stand for source letters
    pub codes: CodeMap,
}

/// Result of handling a single key event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Not intercepted - the host applies its default behavior
    Passthrough,
    /// State updated, the host default still applies
    Observed,
    /// Default prevented, nothing inserted
    Suppress,
    /// Default prevented, engine inserted `text`
    Insert {
        text: String,
        /// Mark composed onto the inserted glyph, if any
        composed: Option<MarkKey>,
    },
    /// A diacritic was composed onto text already in the buffer
    Compose(MarkKey),
    /// Text before the cursor (or the selection) was deleted
    Delete,
}

impl KeyOutcome {
    /// Whether the host must cancel its default handling of the event.
    pub fn prevents_default(&self) -> bool {
        !matches!(self, KeyOutcome::Passthrough | KeyOutcome::Observed)
    }

    /// Inserted text, for hosts that mirror the output elsewhere.
    pub fn inserted(&self) -> Option<&str> {
        match self {
            KeyOutcome::Insert { text, .. } => Some(text),
            _ => None,
        }
    }
}

/// The transliteration engine.
///
/// Owns all switch, diacritic and suppression state; the text buffer stays
/// with the host and is passed into each call.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    config: EngineConfig,
    modifiers: Modifiers,
    diacritics: DiacriticState,
    guard: SuppressionGuard,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        log::debug!(
            "engine created: {} primary, {} alternate, {} accentable glyphs",
            config.tables.primary.len(),
            config.tables.alternate.len(),
            config.tables.accentable.len()
        );
        Self {
            config,
            modifiers: Modifiers::new(),
            diacritics: DiacriticState::new(),
            guard: SuppressionGuard::new(),
        }
    }

    /// Engine over the built-in Romanian transitional alphabet.
    pub fn builtin() -> Self {
        Self::new(EngineConfig::default())
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn tables(&self) -> &GlyphTables {
        &self.config.tables
    }

    pub fn modifiers(&self) -> &Modifiers {
        &self.modifiers
    }

    pub fn diacritics(&self) -> &DiacriticState {
        &self.diacritics
    }

    // --- State queries -------------------------------------------------

    pub fn is_case_active(&self) -> bool {
        self.modifiers.is_active(Switch::Case)
    }

    pub fn is_alternate_active(&self) -> bool {
        self.modifiers.is_active(Switch::Alternate)
    }

    pub fn active_diacritic(&self) -> Option<MarkKey> {
        self.diacritics.active()
    }

    // --- State mutation ------------------------------------------------

    pub fn toggle_latch(&mut self, switch: Switch) -> bool {
        self.modifiers.toggle_latch(switch)
    }

    pub fn set_held(&mut self, switch: Switch, held: bool) {
        self.modifiers.set_held(switch, held);
    }

    pub fn arm_diacritic(&mut self, mark: MarkKey) -> Option<MarkKey> {
        self.diacritics.arm_latch(mark)
    }

    pub fn set_held_diacritic(&mut self, mark: Option<MarkKey>) {
        self.diacritics.set_held(mark);
    }

    /// Drop every latch and held state. The buffer is not touched.
    pub fn reset(&mut self) {
        self.modifiers.reset();
        self.diacritics.reset();
    }

    /// Drop one-shot latches, leaving held switches and marks in place.
    pub fn clear_latches(&mut self) {
        self.modifiers.clear_latches();
        self.diacritics.clear_latch();
    }

    // --- Composition ---------------------------------------------------

    /// Output for `input` under the current switch state.
    pub fn resolve_output(&self, input: char) -> String {
        self.resolve_with(input, self.is_case_active(), self.is_alternate_active())
    }

    pub fn resolve_with(&self, input: char, case_active: bool, alternate_active: bool) -> String {
        compose::resolve_output(&self.config.tables, input, case_active, alternate_active)
    }

    /// Compose `mark` onto the glyph left of the cursor. On success a latched
    /// `mark` is spent.
    pub fn apply_diacritic<B: TextBuffer + ?Sized>(&mut self, buf: &mut B, mark: MarkKey) -> bool {
        let applied = compose::apply_diacritic(buf, &self.config.tables.accentable, mark);
        if applied {
            self.diacritics.consume_if_latched(mark, false);
        }
        applied
    }

    pub fn insert<B: TextBuffer + ?Sized>(&mut self, buf: &mut B, text: &str) {
        buffer::insert(buf, text);
    }

    pub fn delete_backward<B: TextBuffer + ?Sized>(&mut self, buf: &mut B) -> bool {
        buffer::delete_backward(buf)
    }

    /// Insert the glyph for `input`, compose the armed diacritic onto it and
    /// spend the switch latches.
    fn type_char<B: TextBuffer + ?Sized>(
        &mut self,
        buf: &mut B,
        input: char,
        case_active: bool,
        alternate_active: bool,
        repeat: bool,
    ) -> KeyOutcome {
        let text = self.resolve_with(input, case_active, alternate_active);
        buffer::insert(buf, &text);
        log::trace!("typed {:?} -> {:?}", input, text);

        let composed = match self.diacritics.active() {
            Some(mark) => {
                if compose::apply_diacritic(buf, &self.config.tables.accentable, mark) {
                    self.diacritics.consume_if_latched(mark, repeat);
                    Some(mark)
                } else {
                    None
                }
            }
            None => None,
        };

        self.modifiers.clear_latches();
        KeyOutcome::Insert { text, composed }
    }

    // --- Physical keys -------------------------------------------------

    /// Handle a key event from the host input surface.
    ///
    /// The host must cancel its default handling when the outcome
    /// `prevents_default()`, and should keep consulting
    /// [`Engine::blocks_native`] until the next [`Engine::tick`].
    pub fn handle_key<B: TextBuffer + ?Sized>(&mut self, buf: &mut B, event: &KeyEvent) -> KeyOutcome {
        if event.action.is_down() {
            self.handle_key_down(buf, event)
        } else {
            self.handle_key_up(event)
        }
    }

    fn handle_key_down<B: TextBuffer + ?Sized>(&mut self, buf: &mut B, event: &KeyEvent) -> KeyOutcome {
        if event.modifiers.ctrl || event.modifiers.meta {
            return KeyOutcome::Passthrough;
        }

        if let Some(mark) = self.trigger_for(event, false) {
            self.diacritics.set_held(Some(mark));
            self.guard.arm();
            return KeyOutcome::Suppress;
        }

        match event.key {
            LogicalKey::Named(NamedKey::Shift) => {
                self.modifiers.set_held(Switch::Case, true);
                KeyOutcome::Observed
            }
            LogicalKey::Named(NamedKey::Alt) => {
                self.modifiers.set_held(Switch::Alternate, true);
                KeyOutcome::Suppress
            }
            // Editing and caret movement stay with the host
            LogicalKey::Named(named) if named.is_navigation() => KeyOutcome::Passthrough,
            LogicalKey::Named(_) => KeyOutcome::Passthrough,
            LogicalKey::Character(' ') => {
                self.guard.arm();
                buffer::insert(buf, " ");
                KeyOutcome::Insert {
                    text: " ".to_string(),
                    composed: None,
                }
            }
            LogicalKey::Character(_) | LogicalKey::Dead => self.handle_printable(buf, event),
        }
    }

    fn handle_printable<B: TextBuffer + ?Sized>(&mut self, buf: &mut B, event: &KeyEvent) -> KeyOutcome {
        let alternate_active = self.is_alternate_active() || event.modifiers.alt;

        let Some(source) = self.config.codes.resolve(event, &self.config.tables) else {
            let diacritic_active = self.diacritics.active().is_some();
            if diacritic_active || alternate_active || event.key == LogicalKey::Dead {
                // Swallow what the layout would produce, e.g. an Alt symbol
                self.guard.arm();
                return KeyOutcome::Suppress;
            }
            return KeyOutcome::Passthrough;
        };

        self.guard.arm();
        let case_active = self.is_case_active() || event.modifiers.shift;
        self.type_char(buf, source, case_active, alternate_active, event.is_repeat())
    }

    fn handle_key_up(&mut self, event: &KeyEvent) -> KeyOutcome {
        if let Some(mark) = self.trigger_for(event, true) {
            self.diacritics.release_held(mark);
            return KeyOutcome::Suppress;
        }

        match event.key {
            LogicalKey::Named(NamedKey::Shift) => {
                self.modifiers.set_held(Switch::Case, false);
                KeyOutcome::Observed
            }
            LogicalKey::Named(NamedKey::Alt) => {
                self.modifiers.set_held(Switch::Alternate, false);
                KeyOutcome::Observed
            }
            _ => KeyOutcome::Passthrough,
        }
    }

    /// Diacritic trigger bound to the event. Presses look at the dead key
    /// first, releases at the physical code first.
    fn trigger_for(&self, event: &KeyEvent, code_first: bool) -> Option<MarkKey> {
        let triggers = &self.config.triggers;
        let by_dead_key = || event.key.character().and_then(|ch| triggers.dead_key(ch));
        let by_code = || event.code.and_then(|code| triggers.code(code));

        if code_first {
            by_code().or_else(by_dead_key)
        } else {
            by_dead_key().or_else(by_code)
        }
    }

    // --- Virtual keys --------------------------------------------------

    /// Handle a click on an on-screen panel key.
    pub fn press_virtual<B: TextBuffer + ?Sized>(&mut self, buf: &mut B, key: PanelKey) -> KeyOutcome {
        match key {
            PanelKey::Standard(source) => {
                let case_active = self.is_case_active();
                let alternate_active = self.is_alternate_active();
                self.type_char(buf, source, case_active, alternate_active, false)
            }
            PanelKey::Modifier(switch) => {
                self.modifiers.toggle_latch(switch);
                KeyOutcome::Observed
            }
            PanelKey::Accent(mark) => {
                if compose::apply_diacritic(buf, &self.config.tables.accentable, mark) {
                    self.diacritics.clear_latch();
                    KeyOutcome::Compose(mark)
                } else {
                    // Nothing to compose onto yet, arm it for the next letter
                    self.diacritics.arm_latch(mark);
                    KeyOutcome::Observed
                }
            }
            PanelKey::Backspace => {
                if buffer::delete_backward(buf) {
                    KeyOutcome::Delete
                } else {
                    KeyOutcome::Observed
                }
            }
            PanelKey::Space => {
                buffer::insert(buf, " ");
                KeyOutcome::Insert {
                    text: " ".to_string(),
                    composed: None,
                }
            }
        }
    }

    // --- Native insertion guard ----------------------------------------

    /// Secondary guard: should the host drop its own `input` right now?
    pub fn blocks_native(&self, input: NativeInput) -> bool {
        self.guard.blocks(input)
    }

    pub fn is_suppressing(&self) -> bool {
        self.guard.is_armed()
    }

    pub fn guard(&self) -> &SuppressionGuard {
        &self.guard
    }

    /// Advance the cooperative loop by one turn, firing the deferred
    /// suppression reset. Hosts call this after the current event's
    /// synchronous work, before the next event.
    pub fn tick(&mut self) -> bool {
        self.guard.tick()
    }

    // --- Labels --------------------------------------------------------

    /// Label for a panel key under the current state, using the same
    /// composition rules as typing, in preview mode.
    pub fn key_label(&self, key: &PanelKey) -> KeyLabel {
        match *key {
            PanelKey::Standard(value) => {
                let case_active = self.is_case_active();
                let mut primary = self.resolve_with(value, case_active, self.is_alternate_active());
                if let Some(mark) = self.active_diacritic() {
                    primary = compose::preview_label(&primary, &self.config.tables.accentable, mark);
                }
                let secondary = if case_active {
                    value.to_uppercase().collect()
                } else {
                    value.to_string()
                };
                KeyLabel::new(primary).with_secondary(secondary)
            }
            PanelKey::Modifier(switch) => {
                KeyLabel::new(switch.panel_glyph()).with_active(self.modifiers.is_active(switch))
            }
            PanelKey::Accent(mark) => {
                let label = KeyLabel::new(mark.display_glyph().to_string())
                    .with_active(self.diacritics.is_active(mark));
                match self.config.triggers.hint_for(mark) {
                    Some(hint) => label.with_secondary(hint),
                    None => label,
                }
            }
            PanelKey::Backspace => KeyLabel::new("⌫"),
            PanelKey::Space => KeyLabel::new("Space"),
        }
    }
}
