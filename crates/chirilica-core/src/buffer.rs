// Chirilica Buffer Editor
// Scalar-level editing primitives over a host-owned text buffer

use std::fmt;
use std::ops::Range;

/// Cursor range in scalar offsets. Collapsed when `start == end`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    /// Normalizes so that `start <= end`.
    pub fn new(a: usize, b: usize) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    pub fn collapsed(at: usize) -> Self {
        Self { start: at, end: at }
    }

    pub fn is_collapsed(self) -> bool {
        self.start == self.end
    }

    pub fn range(self) -> Range<usize> {
        self.start..self.end
    }
}

/// The host text field as seen by the engine.
///
/// The host owns the content; the engine reads and edits it only through
/// this trait and never keeps a copy. Offsets count Unicode scalar values.
pub trait TextBuffer {
    /// Number of scalar values.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn char_at(&self, index: usize) -> Option<char>;

    fn selection(&self) -> Selection;

    fn set_selection(&mut self, selection: Selection);

    /// Replace `range` with `text`. Does not move the selection.
    fn replace(&mut self, range: Range<usize>, text: &str);
}

/// Replace the selection (possibly empty) with `text` and collapse the
/// cursor after it.
pub fn insert<B: TextBuffer + ?Sized>(buf: &mut B, text: &str) {
    let selection = buf.selection();
    buf.replace(selection.range(), text);
    let cursor = selection.start + text.chars().count();
    buf.set_selection(Selection::collapsed(cursor));
}

/// Delete the selection, or the single scalar before the cursor.
///
/// A base letter and its combining mark take two calls: deletion works on
/// scalars, not grapheme clusters. Returns false when nothing was deleted.
pub fn delete_backward<B: TextBuffer + ?Sized>(buf: &mut B) -> bool {
    let selection = buf.selection();

    if !selection.is_collapsed() {
        buf.replace(selection.range(), "");
        buf.set_selection(Selection::collapsed(selection.start));
        return true;
    }

    if selection.start == 0 {
        return false;
    }

    let at = selection.start - 1;
    buf.replace(at..selection.start, "");
    buf.set_selection(Selection::collapsed(at));
    true
}

/// In-memory text field, used by the terminal host and by tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    chars: Vec<char>,
    selection: Selection,
}

impl TextField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Field holding `text` with the cursor collapsed at the end.
    pub fn from_text(text: &str) -> Self {
        let chars: Vec<char> = text.chars().collect();
        let end = chars.len();
        Self {
            chars,
            selection: Selection::collapsed(end),
        }
    }

    pub fn with_selection(mut self, start: usize, end: usize) -> Self {
        self.select(start, end);
        self
    }

    pub fn text(&self) -> String {
        self.chars.iter().collect()
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Cursor position (end of the selection).
    pub fn cursor(&self) -> usize {
        self.selection.end
    }

    /// Select `start..end`, clamped to the content.
    pub fn select(&mut self, start: usize, end: usize) {
        let len = self.chars.len();
        self.selection = Selection::new(start.min(len), end.min(len));
    }

    pub fn clear(&mut self) {
        self.chars.clear();
        self.selection = Selection::default();
    }

    pub fn move_left(&mut self) {
        let at = if self.selection.is_collapsed() {
            self.selection.start.saturating_sub(1)
        } else {
            self.selection.start
        };
        self.selection = Selection::collapsed(at);
    }

    pub fn move_right(&mut self) {
        let at = if self.selection.is_collapsed() {
            (self.selection.end + 1).min(self.chars.len())
        } else {
            self.selection.end
        };
        self.selection = Selection::collapsed(at);
    }

    pub fn move_home(&mut self) {
        self.selection = Selection::collapsed(0);
    }

    pub fn move_end(&mut self) {
        self.selection = Selection::collapsed(self.chars.len());
    }

    /// Forward delete, the host-native Delete key.
    pub fn delete_forward(&mut self) -> bool {
        let selection = self.selection;
        if !selection.is_collapsed() {
            self.replace(selection.range(), "");
            self.selection = Selection::collapsed(selection.start);
            return true;
        }
        if selection.start >= self.chars.len() {
            return false;
        }
        self.chars.remove(selection.start);
        true
    }
}

impl TextBuffer for TextField {
    fn len(&self) -> usize {
        self.chars.len()
    }

    fn char_at(&self, index: usize) -> Option<char> {
        self.chars.get(index).copied()
    }

    fn selection(&self) -> Selection {
        self.selection
    }

    fn set_selection(&mut self, selection: Selection) {
        let len = self.chars.len();
        self.selection = Selection::new(selection.start.min(len), selection.end.min(len));
    }

    fn replace(&mut self, range: Range<usize>, text: &str) {
        let len = self.chars.len();
        let start = range.start.min(len);
        let end = range.end.clamp(start, len);
        self.chars.splice(start..end, text.chars());
    }
}

impl fmt::Display for TextField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for ch in &self.chars {
            write!(f, "{}", ch)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_at_cursor() {
        let mut field = TextField::from_text("аб");
        field.select(1, 1);
        insert(&mut field, "чч");
        assert_eq!(field.text(), "аччб");
        assert_eq!(field.selection(), Selection::collapsed(3));
    }

    #[test]
    fn test_insert_replaces_selection() {
        let mut field = TextField::from_text("абвг").with_selection(1, 3);
        insert(&mut field, "д");
        assert_eq!(field.text(), "адг");
        assert_eq!(field.cursor(), 2);
    }

    #[test]
    fn test_delete_backward_selection() {
        let mut field = TextField::from_text("абвг").with_selection(3, 1);
        assert!(delete_backward(&mut field));
        assert_eq!(field.text(), "аг");
        assert_eq!(field.selection(), Selection::collapsed(1));
    }

    #[test]
    fn test_delete_backward_at_start_is_noop() {
        let mut field = TextField::from_text("аб").with_selection(0, 0);
        assert!(!delete_backward(&mut field));
        assert_eq!(field.text(), "аб");
    }

    #[test]
    fn test_delete_backward_removes_mark_before_base() {
        let mut field = TextField::from_text("xa\u{0301}");
        assert!(delete_backward(&mut field));
        assert_eq!(field.text(), "xa");
        assert!(delete_backward(&mut field));
        assert_eq!(field.text(), "x");
        assert_eq!(field.cursor(), 1);
    }

    #[test]
    fn test_cursor_movement() {
        let mut field = TextField::from_text("абв");
        field.move_left();
        field.move_left();
        assert_eq!(field.cursor(), 1);
        field.move_home();
        field.move_left();
        assert_eq!(field.cursor(), 0);
        field.move_right();
        assert_eq!(field.cursor(), 1);
        field.move_end();
        field.move_right();
        assert_eq!(field.cursor(), 3);
    }

    #[test]
    fn test_delete_forward() {
        let mut field = TextField::from_text("абв").with_selection(1, 1);
        assert!(field.delete_forward());
        assert_eq!(field.text(), "ав");
        field.move_end();
        assert!(!field.delete_forward());
    }
}
