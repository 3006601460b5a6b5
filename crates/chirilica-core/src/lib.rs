// Chirilica Core Library
// Latin -> Romanian transitional Cyrillic transliteration with diacritic composition

pub mod buffer;
pub mod glyph;
pub mod key;
pub mod mark;
pub mod modifier;
pub mod output;
pub mod panel;
pub mod transform;
pub mod trigger;

#[cfg(feature = "settings")]
pub mod settings;

pub use buffer::{Selection, TextBuffer, TextField};
pub use glyph::{AccentableSet, GlyphTable, GlyphTables};
pub use key::{Action, CodeMap, KeyEvent, KeyModifiers, LogicalKey, NamedKey, PhysicalKey};
pub use mark::MarkKey;
pub use modifier::{ModifierState, Modifiers, Switch};
pub use output::{NativeInput, SuppressionGuard, TaskId};
pub use panel::{KeyLabel, PanelKey};
pub use transform::{DiacriticState, Engine, EngineConfig, KeyOutcome};
pub use trigger::TriggerMap;

#[cfg(feature = "settings")]
pub use settings::{Settings, SettingsError};
