// Chirilica Glyph Tables
// Latin source letters -> transitional Cyrillic glyphs

use indexmap::{IndexMap, IndexSet};

/// Built-in primary mapping, covering the Latin alphabet plus the Romanian
/// letters that carry their own glyph.
pub const PRIMARY_ENTRIES: &[(char, &str)] = &[
    ('a', "а"),
    ('b', "б"),
    ('c', "ч"),
    ('d', "д"),
    ('e', "є"),
    ('f', "ф"),
    ('g', "г"),
    ('h', "х"),
    ('i', "и"),
    ('j', "џ"),
    ('k', "к"),
    ('l', "ʌ"),
    ('m', "м"),
    ('n', "н"),
    ('o', "ѡ"),
    ('p', "п"),
    ('q', "й"),
    ('r', "р"),
    ('s', "с"),
    ('t', "т"),
    ('u', "ꙋ"),
    ('v', "в"),
    ('w', "ѧ"),
    ('x', "ѯ"),
    ('y', "ѵ"),
    ('z', "з"),
    ('ă', "ъ"),
    ('â', "ѫ"),
    ('î', "ꙟ"),
    ('ș', "ш"),
    ('ț', "ц"),
];

/// Built-in alternate glyph set. Consulted before the primary table while the
/// alternate switch is active.
pub const ALTERNATE_ENTRIES: &[(char, &str)] = &[
    ('t', "ѳ"),
    ('p', "ѱ"),
    ('â', "ѥ"),
    ('u', "ю"),
    ('e', "ѣ"),
    ('ș', "щ"),
    ('o', "о"),
    ('z', "ѕ"),
    ('j', "ж"),
    ('i', "ї"),
    ('w', "ѩ"),
    ('q', "ꙋ\u{0306}"),
];

/// Declared vowels that may carry a diacritic, before case/alternate closure.
pub const ACCENTABLE_BASE: &[char] = &[
    'а', 'є', 'и', 'ѡ', 'ꙋ', 'ѵ', 'ъ', 'ѫ', 'ꙟ', 'ѩ', 'ѧ', 'ѣ', 'ї', 'ѥ', 'ю', 'о',
];

/// A lowercase source character -> output glyph mapping.
///
/// Glyphs are strings because some alternate forms are a base letter plus a
/// combining mark.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlyphTable {
    entries: IndexMap<char, String>,
}

impl GlyphTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: &[(char, &str)]) -> Self {
        let mut table = Self::new();
        for &(source, glyph) in entries {
            table.insert(source, glyph);
        }
        table
    }

    /// Insert or replace a mapping. The source is stored lowercased.
    pub fn insert(&mut self, source: char, glyph: impl Into<String>) -> Option<String> {
        self.entries.insert(lower_char(source), glyph.into())
    }

    pub fn get(&self, source: char) -> Option<&str> {
        self.entries.get(&source).map(String::as_str)
    }

    pub fn contains(&self, source: char) -> bool {
        self.entries.contains_key(&source)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (char, &str)> {
        self.entries.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn glyphs(&self) -> impl Iterator<Item = &str> {
        self.entries.values().map(String::as_str)
    }
}

/// Glyphs eligible to receive a diacritic.
///
/// Built once by closing the declared set over upper case and over alternate
/// outputs that start with an accentable glyph; immutable afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccentableSet {
    glyphs: IndexSet<String>,
}

impl AccentableSet {
    pub fn build<I>(declared: I, alternate: &GlyphTable) -> Self
    where
        I: IntoIterator<Item = char>,
    {
        let mut glyphs = IndexSet::new();
        for ch in declared {
            glyphs.insert(ch.to_string());
        }

        let lowered: Vec<String> = glyphs.iter().cloned().collect();
        for glyph in lowered {
            glyphs.insert(glyph.to_uppercase());
        }

        for glyph in alternate.glyphs() {
            let Some(first) = glyph.chars().next() else {
                continue;
            };
            if contains_char(&glyphs, first) {
                glyphs.insert(glyph.to_string());
                glyphs.insert(glyph.to_uppercase());
            }
        }

        Self { glyphs }
    }

    /// Single-scalar membership, used when scanning the buffer.
    pub fn contains_char(&self, ch: char) -> bool {
        contains_char(&self.glyphs, ch)
    }

    pub fn contains(&self, glyph: &str) -> bool {
        self.glyphs.contains(glyph)
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.glyphs.iter().map(String::as_str)
    }
}

fn contains_char(set: &IndexSet<String>, ch: char) -> bool {
    let mut buf = [0u8; 4];
    set.contains(ch.encode_utf8(&mut buf) as &str)
}

/// Everything the composition step reads: both tables and the derived
/// accentable set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphTables {
    pub primary: GlyphTable,
    pub alternate: GlyphTable,
    pub accentable: AccentableSet,
}

impl GlyphTables {
    pub fn new<I>(primary: GlyphTable, alternate: GlyphTable, declared_accentable: I) -> Self
    where
        I: IntoIterator<Item = char>,
    {
        let accentable = AccentableSet::build(declared_accentable, &alternate);
        Self {
            primary,
            alternate,
            accentable,
        }
    }

    /// The Romanian transitional alphabet shipped with the engine.
    pub fn builtin() -> Self {
        Self::new(
            GlyphTable::from_entries(PRIMARY_ENTRIES),
            GlyphTable::from_entries(ALTERNATE_ENTRIES),
            ACCENTABLE_BASE.iter().copied(),
        )
    }

    /// True if either table maps `source`.
    pub fn maps(&self, source: char) -> bool {
        self.primary.contains(source) || self.alternate.contains(source)
    }
}

impl Default for GlyphTables {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Lowercase a single scalar, keeping it unchanged when the lowercase form is
/// not a single scalar.
pub fn lower_char(ch: char) -> char {
    let mut lower = ch.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(single), None) => single,
        _ => ch,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_primary_covers_alphabet() {
        let tables = GlyphTables::builtin();
        for ch in 'a'..='z' {
            assert!(tables.primary.contains(ch), "missing {}", ch);
        }
        assert_eq!(tables.primary.get('c'), Some("ч"));
        assert_eq!(tables.primary.get('ș'), Some("ш"));
        assert_eq!(tables.primary.len(), 31);
    }

    #[test]
    fn test_alternate_keys_resolve_through_primary() {
        let tables = GlyphTables::builtin();
        for (source, _) in tables.alternate.iter() {
            assert!(tables.primary.contains(source), "{} not in primary", source);
        }
    }

    #[test]
    fn test_insert_lowercases_source() {
        let mut table = GlyphTable::new();
        table.insert('Ä', "ӓ");
        assert_eq!(table.get('ä'), Some("ӓ"));
        assert_eq!(table.get('Ä'), None);
    }

    #[test]
    fn test_accentable_closure_over_case() {
        let tables = GlyphTables::builtin();
        assert!(tables.accentable.contains_char('а'));
        assert!(tables.accentable.contains_char('А'));
        assert!(tables.accentable.contains_char('Ѡ'));
        assert!(!tables.accentable.contains_char('б'));
        assert!(!tables.accentable.contains_char('Ч'));
    }

    #[test]
    fn test_accentable_closure_over_alternate() {
        let tables = GlyphTables::builtin();
        assert!(tables.accentable.contains("ꙋ\u{0306}"));
        assert!(tables.accentable.contains("Ꙋ\u{0306}"));
        // ѳ starts with a non-accentable glyph
        assert!(!tables.accentable.contains("ѳ"));
    }

    #[test]
    fn test_accentable_extra_declared() {
        let alternate = GlyphTable::from_entries(&[('a', "ӕ")]);
        let set = AccentableSet::build(['ӕ'], &alternate);
        assert!(set.contains_char('ӕ'));
        assert!(set.contains_char('Ӕ'));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_lower_char() {
        assert_eq!(lower_char('A'), 'a');
        assert_eq!(lower_char('Ș'), 'ș');
        assert_eq!(lower_char('ч'), 'ч');
        // İ lowercases to two scalars
        assert_eq!(lower_char('İ'), 'İ');
    }
}
