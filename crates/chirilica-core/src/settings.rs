// Chirilica Settings Module
// User overrides for glyph tables, diacritic triggers and physical codes

#![cfg(feature = "settings")]

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use indexmap::IndexMap;

use crate::glyph::{GlyphTable, GlyphTables, ACCENTABLE_BASE, ALTERNATE_ENTRIES, PRIMARY_ENTRIES};
use crate::key::{CodeMap, PhysicalKey};
use crate::mark::MarkKey;
use crate::transform::EngineConfig;
use crate::trigger::TriggerMap;

/// Settings layered over the built-in alphabet.
///
/// Loaded from a TOML file (default: ~/.config/chirilica/settings.toml).
/// Every section is optional; entries add to or replace built-in ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Start from the built-in tables instead of empty ones
    builtin: bool,

    primary: IndexMap<char, String>,
    alternate: IndexMap<char, String>,

    /// Extra declared accentable glyphs, closed over case/alternate later
    accentable_extra: Vec<char>,

    dead_keys: IndexMap<char, MarkKey>,
    trigger_codes: IndexMap<PhysicalKey, MarkKey>,
    codes: IndexMap<PhysicalKey, char>,

    /// Path to the settings file (for reload)
    source_path: Option<PathBuf>,
}

/// Errors that can occur when loading settings
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(String),

    #[error("Invalid setting value: {0}")]
    InvalidValue(String),
}

/// TOML representation for deserializing settings
#[derive(Debug, Clone, serde::Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct SettingsToml {
    #[serde(default)]
    primary: BTreeMap<String, String>,

    #[serde(default)]
    alternate: BTreeMap<String, String>,

    #[serde(default)]
    accentable: Option<AccentableToml>,

    #[serde(default)]
    triggers: Option<TriggersToml>,

    #[serde(default)]
    codes: BTreeMap<String, String>,

    #[serde(default)]
    engine: Option<EngineToml>,
}

#[derive(Debug, Clone, serde::Deserialize, Default)]
struct AccentableToml {
    #[serde(default)]
    extra: Vec<String>,
}

#[derive(Debug, Clone, serde::Deserialize, Default)]
struct TriggersToml {
    #[serde(default)]
    dead_keys: BTreeMap<String, String>,

    #[serde(default)]
    codes: BTreeMap<String, String>,
}

#[derive(Debug, Clone, serde::Deserialize, Default)]
struct EngineToml {
    #[serde(default)]
    builtin: Option<bool>,
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}

impl Settings {
    /// Built-in alphabet with no overrides
    pub fn new() -> Self {
        Self {
            builtin: true,
            primary: IndexMap::new(),
            alternate: IndexMap::new(),
            accentable_extra: Vec::new(),
            dead_keys: IndexMap::new(),
            trigger_codes: IndexMap::new(),
            codes: IndexMap::new(),
            source_path: None,
        }
    }

    /// Load settings from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(&path)?;
        let mut settings = Self::from_toml(&content)?;
        settings.source_path = Some(path.as_ref().to_path_buf());
        log::debug!("loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// Load settings from TOML string
    pub fn from_toml(content: &str) -> Result<Self, SettingsError> {
        let raw: SettingsToml =
            toml::from_str(content).map_err(|e| SettingsError::TomlParse(e.to_string()))?;

        let mut settings = Self::new();

        if let Some(engine) = raw.engine {
            if let Some(builtin) = engine.builtin {
                settings.builtin = builtin;
            }
        }

        for (source, glyph) in raw.primary {
            settings
                .primary
                .insert(parse_scalar("primary", &source)?, parse_glyph("primary", &source, glyph)?);
        }
        for (source, glyph) in raw.alternate {
            settings.alternate.insert(
                parse_scalar("alternate", &source)?,
                parse_glyph("alternate", &source, glyph)?,
            );
        }

        if let Some(accentable) = raw.accentable {
            for glyph in accentable.extra {
                settings
                    .accentable_extra
                    .push(parse_scalar("accentable.extra", &glyph)?);
            }
        }

        if let Some(triggers) = raw.triggers {
            for (ch, mark) in triggers.dead_keys {
                settings.dead_keys.insert(
                    parse_scalar("triggers.dead_keys", &ch)?,
                    parse_mark("triggers.dead_keys", &mark)?,
                );
            }
            for (code, mark) in triggers.codes {
                settings.trigger_codes.insert(
                    parse_code("triggers.codes", &code)?,
                    parse_mark("triggers.codes", &mark)?,
                );
            }
        }

        for (code, source) in raw.codes {
            settings
                .codes
                .insert(parse_code("codes", &code)?, parse_scalar("codes", &source)?);
        }

        Ok(settings)
    }

    /// Get the default settings path
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("chirilica").join("settings.toml"))
    }

    /// Load from default location (~/.config/chirilica/settings.toml)
    pub fn load_default() -> Result<Self, SettingsError> {
        if let Some(path) = Self::default_path() {
            if path.exists() {
                return Self::from_file(path);
            }
        }
        // Return default settings if file doesn't exist
        Ok(Self::new())
    }

    /// Reload settings from the original file
    pub fn reload(&mut self) -> Result<(), SettingsError> {
        if let Some(ref path) = self.source_path {
            let new_settings = Self::from_file(path)?;
            *self = new_settings;
            Ok(())
        } else {
            Err(SettingsError::InvalidValue("No source path set".to_string()))
        }
    }

    pub fn uses_builtin(&self) -> bool {
        self.builtin
    }

    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    /// Glyph tables with overrides applied and the accentable set derived.
    pub fn build_tables(&self) -> GlyphTables {
        let (mut primary, mut alternate, mut declared) = if self.builtin {
            (
                GlyphTable::from_entries(PRIMARY_ENTRIES),
                GlyphTable::from_entries(ALTERNATE_ENTRIES),
                ACCENTABLE_BASE.to_vec(),
            )
        } else {
            (GlyphTable::new(), GlyphTable::new(), Vec::new())
        };

        for (source, glyph) in &self.primary {
            primary.insert(*source, glyph.as_str());
        }
        for (source, glyph) in &self.alternate {
            alternate.insert(*source, glyph.as_str());
        }
        declared.extend(self.accentable_extra.iter().copied());

        GlyphTables::new(primary, alternate, declared)
    }

    pub fn build_triggers(&self) -> TriggerMap {
        let mut triggers = if self.builtin {
            TriggerMap::builtin()
        } else {
            TriggerMap::empty()
        };
        for (ch, mark) in &self.dead_keys {
            triggers.bind_dead_key(*ch, *mark);
        }
        for (code, mark) in &self.trigger_codes {
            triggers.bind_code(*code, *mark);
        }
        triggers
    }

    pub fn build_codes(&self) -> CodeMap {
        let mut codes = if self.builtin {
            CodeMap::builtin()
        } else {
            CodeMap::empty()
        };
        for (code, source) in &self.codes {
            codes.insert(*code, *source);
        }
        codes
    }

    /// Everything an [`Engine`](crate::Engine) needs.
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            tables: self.build_tables(),
            triggers: self.build_triggers(),
            codes: self.build_codes(),
        }
    }
}

fn parse_scalar(section: &str, value: &str) -> Result<char, SettingsError> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Ok(ch),
        _ => Err(SettingsError::InvalidValue(format!(
            "[{}] '{}' must be a single character",
            section, value
        ))),
    }
}

fn parse_glyph(section: &str, source: &str, glyph: String) -> Result<String, SettingsError> {
    if glyph.is_empty() {
        return Err(SettingsError::InvalidValue(format!(
            "[{}] '{}' maps to an empty glyph",
            section, source
        )));
    }
    Ok(glyph)
}

fn parse_mark(section: &str, value: &str) -> Result<MarkKey, SettingsError> {
    MarkKey::from_str(value).map_err(|_| {
        SettingsError::InvalidValue(format!(
            "[{}] unknown diacritic '{}' (expected \"acute\" or \"grave\")",
            section, value
        ))
    })
}

fn parse_code(section: &str, value: &str) -> Result<PhysicalKey, SettingsError> {
    PhysicalKey::from_str(value).map_err(|e| SettingsError::InvalidValue(format!("[{}] {}", section, e)))
}

/// Create default settings content for a new installation
pub fn default_settings_content() -> &'static str {
    r#"# Chirilica Settings
# Overrides layered over the built-in Romanian transitional alphabet
# Place this file at: ~/.config/chirilica/settings.toml

[engine]
# Start from the built-in tables (false starts from empty tables)
builtin = true

[primary]
# Latin source letter -> glyph
# c = "ч"

[alternate]
# Glyphs used while the alternate switch is active
# q = "ꙋ̆"

[accentable]
# Extra glyphs that may carry a diacritic (upper case is added automatically)
extra = []

[triggers.dead_keys]
# Dead-key character reported by the layout -> "acute" | "grave"
# "˘" = "acute"

[triggers.codes]
# Physical key code held to arm a diacritic
# Digit3 = "acute"

[codes]
# Physical key code -> Latin source letter, independent of the host layout
# Semicolon = "ș"
"#
}
