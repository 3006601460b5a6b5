// Chirilica Composition
// Glyph resolution and backward-reaching diacritic composition

use smallvec::SmallVec;

use crate::buffer::{Selection, TextBuffer};
use crate::glyph::{lower_char, AccentableSet, GlyphTables};
use crate::mark::{is_combining, is_recognized_mark, MarkKey};

/// Resolve a logical input character to the text it produces.
///
/// The alternate table wins when `alternate_active` and it has an entry,
/// then the primary table. A table hit is upper-cased when `case_active`.
/// Unmapped input falls back to itself, upper-cased when `case_active`.
pub fn resolve_output(
    tables: &GlyphTables,
    input: char,
    case_active: bool,
    alternate_active: bool,
) -> String {
    let lower = lower_char(input);

    let glyph = if alternate_active {
        tables
            .alternate
            .get(lower)
            .or_else(|| tables.primary.get(lower))
    } else {
        tables.primary.get(lower)
    };

    match glyph {
        Some(glyph) if case_active => glyph.to_uppercase(),
        Some(glyph) => glyph.to_string(),
        None if case_active => input.to_uppercase().collect(),
        None => input.to_string(),
    }
}

/// Put `mark` on the glyph left of the cursor.
///
/// Walks left over combining scalars to find the base. Fails without
/// touching the buffer when the selection is not collapsed, no base exists,
/// or the base is not accentable. Any recognized mark already on the base is
/// replaced; other combining marks on it are kept ahead of the new mark. The
/// cursor ends up right after the inserted mark.
pub fn apply_diacritic<B: TextBuffer + ?Sized>(
    buf: &mut B,
    accentable: &AccentableSet,
    mark: MarkKey,
) -> bool {
    let selection = buf.selection();
    if !selection.is_collapsed() {
        log::trace!("diacritic {} refused: selection not collapsed", mark);
        return false;
    }

    let Some((base_index, base)) = find_base(buf, selection.start) else {
        log::trace!("diacritic {} refused: no base before cursor", mark);
        return false;
    };

    if !accentable.contains_char(base) {
        log::trace!("diacritic {} refused: {:?} is not accentable", mark, base);
        return false;
    }

    let mut preserved: SmallVec<[char; 4]> = SmallVec::new();
    let mut run_end = base_index + 1;
    while let Some(ch) = buf.char_at(run_end) {
        if !is_combining(ch) {
            break;
        }
        if !is_recognized_mark(ch) {
            preserved.push(ch);
        }
        run_end += 1;
    }

    let mut replacement: String = preserved.iter().collect();
    replacement.push(mark.combining());
    buf.replace(base_index + 1..run_end, &replacement);

    let cursor = base_index + 1 + preserved.len() + 1;
    buf.set_selection(Selection::collapsed(cursor));

    log::debug!("composed {} onto {:?} at {}", mark, base, base_index);
    true
}

fn find_base<B: TextBuffer + ?Sized>(buf: &B, cursor: usize) -> Option<(usize, char)> {
    let mut index = cursor.min(buf.len());
    while index > 0 {
        index -= 1;
        let ch = buf.char_at(index)?;
        if !is_combining(ch) {
            return Some((index, ch));
        }
    }
    None
}

/// Preview-only composition used for panel labels.
///
/// If the label's first glyph is accentable the result is that glyph, its
/// unrecognized combining marks, `mark`, then whatever else followed.
/// Otherwise the label is returned unchanged.
pub fn preview_label(label: &str, accentable: &AccentableSet, mark: MarkKey) -> String {
    let mut chars = label.chars();
    let Some(base) = chars.next() else {
        return String::new();
    };
    if !accentable.contains_char(base) {
        return label.to_string();
    }

    let mut combining = String::new();
    let mut remainder = String::new();
    for ch in chars {
        if is_combining(ch) && !is_recognized_mark(ch) {
            combining.push(ch);
        } else {
            remainder.push(ch);
        }
    }

    let mut out = String::with_capacity(label.len() + 2);
    out.push(base);
    out.push_str(&combining);
    out.push(mark.combining());
    out.push_str(&remainder);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::{insert, TextField};

    fn tables() -> GlyphTables {
        GlyphTables::builtin()
    }

    #[test]
    fn test_resolve_primary() {
        let t = tables();
        for (source, glyph) in t.primary.iter() {
            assert_eq!(resolve_output(&t, source, false, false), glyph);
        }
    }

    #[test]
    fn test_resolve_case() {
        let t = tables();
        assert_eq!(resolve_output(&t, 'c', true, false), "Ч");
        assert_eq!(resolve_output(&t, 'C', false, false), "ч");
        assert_eq!(resolve_output(&t, 'l', true, false), "Ʌ");
    }

    #[test]
    fn test_resolve_alternate_overrides_primary() {
        let t = tables();
        assert_eq!(resolve_output(&t, 'o', false, true), "о");
        assert_eq!(resolve_output(&t, 'o', false, false), "ѡ");
        // no alternate entry, primary still applies
        assert_eq!(resolve_output(&t, 'b', false, true), "б");
        assert_eq!(resolve_output(&t, 'q', true, true), "Ꙋ\u{0306}");
    }

    #[test]
    fn test_resolve_fallback_is_identity() {
        let t = tables();
        assert_eq!(resolve_output(&t, '1', false, false), "1");
        assert_eq!(resolve_output(&t, '?', true, true), "?");
        assert_eq!(resolve_output(&t, 'ä', true, false), "Ä");
        // raw input is kept as typed when case is off
        assert_eq!(resolve_output(&t, 'Ä', false, false), "Ä");
    }

    #[test]
    fn test_apply_on_single_base() {
        let t = tables();
        let mut field = TextField::from_text("а");
        assert!(apply_diacritic(&mut field, &t.accentable, MarkKey::Acute));
        assert_eq!(field.text(), "а\u{0301}");
        assert_eq!(field.cursor(), 2);
    }

    #[test]
    fn test_apply_on_non_accentable_fails() {
        let t = tables();
        let mut field = TextField::from_text("аб");
        assert!(!apply_diacritic(&mut field, &t.accentable, MarkKey::Acute));
        assert_eq!(field.text(), "аб");
        assert_eq!(field.cursor(), 2);
    }

    #[test]
    fn test_apply_on_empty_buffer_fails() {
        let t = tables();
        let mut field = TextField::new();
        assert!(!apply_diacritic(&mut field, &t.accentable, MarkKey::Grave));

        let mut only_marks = TextField::from_text("\u{0306}");
        assert!(!apply_diacritic(&mut only_marks, &t.accentable, MarkKey::Grave));
        assert_eq!(only_marks.text(), "\u{0306}");
    }

    #[test]
    fn test_apply_with_selection_fails() {
        let t = tables();
        let mut field = TextField::from_text("аа").with_selection(0, 1);
        assert!(!apply_diacritic(&mut field, &t.accentable, MarkKey::Acute));
        assert_eq!(field.text(), "аа");
    }

    #[test]
    fn test_second_mark_replaces_first() {
        let t = tables();
        let mut field = TextField::from_text("є");
        assert!(apply_diacritic(&mut field, &t.accentable, MarkKey::Acute));
        assert!(apply_diacritic(&mut field, &t.accentable, MarkKey::Grave));
        assert_eq!(field.text(), "є\u{0300}");
        assert_eq!(field.cursor(), 2);
    }

    #[test]
    fn test_other_marks_are_preserved() {
        let t = tables();
        let mut field = TextField::new();
        insert(&mut field, &resolve_output(&t, 'q', false, true));
        assert!(apply_diacritic(&mut field, &t.accentable, MarkKey::Acute));
        assert_eq!(field.text(), "ꙋ\u{0306}\u{0301}");

        assert!(apply_diacritic(&mut field, &t.accentable, MarkKey::Grave));
        assert_eq!(field.text(), "ꙋ\u{0306}\u{0300}");
        assert_eq!(field.cursor(), 3);
    }

    #[test]
    fn test_apply_mid_buffer_keeps_tail() {
        let t = tables();
        let mut field = TextField::from_text("а\u{0301}бв").with_selection(2, 2);
        assert!(apply_diacritic(&mut field, &t.accentable, MarkKey::Grave));
        assert_eq!(field.text(), "а\u{0300}бв");
        assert_eq!(field.cursor(), 2);
    }

    #[test]
    fn test_apply_to_uppercase_base() {
        let t = tables();
        let mut field = TextField::from_text("Ѡ");
        assert!(apply_diacritic(&mut field, &t.accentable, MarkKey::Acute));
        assert_eq!(field.text(), "Ѡ\u{0301}");
    }

    #[test]
    fn test_preview_label() {
        let t = tables();
        assert_eq!(preview_label("а", &t.accentable, MarkKey::Acute), "а\u{0301}");
        assert_eq!(preview_label("б", &t.accentable, MarkKey::Acute), "б");
        assert_eq!(
            preview_label("ꙋ\u{0306}", &t.accentable, MarkKey::Grave),
            "ꙋ\u{0306}\u{0300}"
        );
        assert_eq!(preview_label("", &t.accentable, MarkKey::Grave), "");
    }
}
