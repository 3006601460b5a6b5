// Chirilica Transform Module
// Core transliteration and composition logic

pub mod compose;
pub mod deadkeys;
pub mod engine;

pub use compose::{apply_diacritic, preview_label, resolve_output};
pub use deadkeys::DiacriticState;
pub use engine::{Engine, EngineConfig, KeyOutcome};
