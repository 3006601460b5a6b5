use chirilica_core::panel::{self, ROWS};
use chirilica_core::{
    Action, Engine, KeyEvent, KeyLabel, KeyOutcome, LogicalKey, MarkKey, NamedKey, NativeInput, PanelKey,
    Settings, TextBuffer, TextField,
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Pane {
    Output,
    Keyboard,
}

pub struct App {
    pub engine: Engine,
    pub field: TextField,
    pub settings: Settings,
    pub focused_pane: Pane,
    /// Selected key on the panel, as (row, column)
    pub panel_cursor: (usize, usize),
    pub status: String,
    /// The terminal reports key releases, so held triggers work
    pub release_events: bool,
}

impl App {
    pub fn new(settings: Settings) -> Self {
        Self {
            engine: Engine::new(settings.engine_config()),
            field: TextField::new(),
            settings,
            focused_pane: Pane::Output,
            panel_cursor: (0, 0),
            status: "Ready".to_string(),
            release_events: false,
        }
    }

    pub fn set_status<S: Into<String>>(&mut self, msg: S) {
        self.status = msg.into();
    }

    pub fn selected_key(&self) -> Option<PanelKey> {
        let (row, col) = self.panel_cursor;
        ROWS.get(row).and_then(|keys| keys.get(col)).copied()
    }

    pub fn labels(&self) -> Vec<Vec<(PanelKey, KeyLabel)>> {
        ROWS.iter()
            .map(|row| {
                row.iter()
                    .map(|key| (*key, self.engine.key_label(key)))
                    .collect()
            })
            .collect()
    }

    /// A click on the on-screen panel.
    pub fn press_panel(&mut self, key: PanelKey) {
        let outcome = self.engine.press_virtual(&mut self.field, key);
        log::debug!("panel {} -> {:?}", key, outcome);
        self.describe(&outcome);
    }

    pub fn press_selected(&mut self) {
        if let Some(key) = self.selected_key() {
            self.press_panel(key);
        }
    }

    /// Route a physical key through the engine, then perform the host-native
    /// default when the engine let it through.
    pub fn handle_key(&mut self, event: KeyEvent) {
        if !self.release_events && event.action.is_down() {
            // No release will ever arrive, so a held trigger would never end
            if let Some(mark) = self.trigger_mark(&event) {
                self.press_panel(PanelKey::Accent(mark));
                return;
            }
        }

        let outcome = self.engine.handle_key(&mut self.field, &event);
        log::trace!("{:?} -> {:?}", event, outcome);
        if outcome.prevents_default() || !event.action.is_down() {
            if outcome != KeyOutcome::Suppress {
                self.describe(&outcome);
            }
        } else {
            self.native_default(&event);
        }

        if !self.release_events && event.action.is_down() {
            // Without release reporting modifier keys behave as taps
            if matches!(
                event.key,
                LogicalKey::Named(NamedKey::Shift) | LogicalKey::Named(NamedKey::Alt)
            ) {
                let release = event.with_action(Action::Release);
                self.engine.handle_key(&mut self.field, &release);
            }
        }
    }

    fn trigger_mark(&self, event: &KeyEvent) -> Option<MarkKey> {
        let triggers = &self.engine.config().triggers;
        event
            .key
            .character()
            .and_then(|ch| triggers.dead_key(ch))
            .or_else(|| event.code.and_then(|code| triggers.code(code)))
    }

    /// What the text field does on its own for keys the engine passed through.
    fn native_default(&mut self, event: &KeyEvent) {
        if event.modifiers.ctrl || event.modifiers.meta {
            return;
        }
        match event.key {
            LogicalKey::Named(NamedKey::Backspace) => {
                chirilica_core::buffer::delete_backward(&mut self.field);
            }
            LogicalKey::Named(NamedKey::Delete) => {
                self.field.delete_forward();
            }
            LogicalKey::Named(NamedKey::ArrowLeft) => self.field.move_left(),
            LogicalKey::Named(NamedKey::ArrowRight) => self.field.move_right(),
            LogicalKey::Named(NamedKey::Home) => self.field.move_home(),
            LogicalKey::Named(NamedKey::End) => self.field.move_end(),
            LogicalKey::Named(NamedKey::Enter) => self.native_insert(NativeInput::InsertLineBreak, "\n"),
            LogicalKey::Named(NamedKey::Tab) => self.cycle_pane(),
            LogicalKey::Character(ch) => {
                let mut buf = [0u8; 4];
                self.native_insert(NativeInput::InsertText, ch.encode_utf8(&mut buf));
            }
            _ => {}
        }
    }

    fn native_insert(&mut self, input: NativeInput, text: &str) {
        if self.engine.blocks_native(input) {
            log::debug!("native {} blocked", input);
            return;
        }
        chirilica_core::buffer::insert(&mut self.field, text);
    }

    fn describe(&mut self, outcome: &KeyOutcome) {
        let status = match outcome {
            KeyOutcome::Insert { text, composed: Some(mark) } => format!("{} + {}", text, mark),
            KeyOutcome::Insert { text, composed: None } => format!("{}", text.escape_debug()),
            KeyOutcome::Compose(mark) => format!("{} composed", mark),
            KeyOutcome::Delete => "deleted".to_string(),
            KeyOutcome::Observed => match self.engine.active_diacritic() {
                Some(mark) => format!("{} armed", mark),
                None => "Ready".to_string(),
            },
            KeyOutcome::Passthrough | KeyOutcome::Suppress => return,
        };
        self.set_status(status);
    }

    /// End of one event cycle.
    pub fn tick(&mut self) {
        self.engine.tick();
    }

    pub fn clear(&mut self) {
        self.field.clear();
        self.engine.reset();
        self.set_status("Cleared");
    }

    pub fn reload_settings(&mut self) {
        if self.settings.source_path().is_none() {
            self.set_status("No settings file loaded");
            return;
        }
        match self.settings.reload() {
            Ok(()) => {
                self.engine = Engine::new(self.settings.engine_config());
                self.set_status("Settings reloaded");
            }
            Err(err) => {
                log::warn!("settings reload failed: {}", err);
                self.set_status(format!("Reload failed: {}", err));
            }
        }
    }

    pub fn cycle_pane(&mut self) {
        self.focused_pane = match self.focused_pane {
            Pane::Output => Pane::Keyboard,
            Pane::Keyboard => Pane::Output,
        };
    }

    pub fn move_panel_cursor(&mut self, d_row: isize, d_col: isize) {
        let (row, col) = self.panel_cursor;
        let row = clamp_step(row, d_row, ROWS.len());
        let width = ROWS[row].len();
        let col = clamp_step(col.min(width - 1), d_col, width);
        self.panel_cursor = (row, col);
    }

    pub fn text(&self) -> String {
        self.field.text()
    }

    pub fn cursor(&self) -> usize {
        self.field.selection().end
    }

    pub fn key_count(&self) -> usize {
        panel::keys().count()
    }
}

fn clamp_step(value: usize, delta: isize, len: usize) -> usize {
    let next = value as isize + delta;
    next.clamp(0, len as isize - 1) as usize
}
