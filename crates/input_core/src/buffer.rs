//! Editing state of the address text.
//!
//! The buffer is UI-agnostic: it knows nothing about fonts or pointer
//! positions. Integration code turns key presses into the calls below.
//!
//! Invariants:
//! - `caret` and the selection anchor always sit on char boundaries of `value`.
//! - The inline completion suffix is never part of `value`; it exists only
//!   while the caret is at the end with no selection, and any edit other than
//!   accepting it throws it away.

use crate::selection::SelectionRange;
use crate::text::{
    clamp_to_char_boundary, filter_single_line, next_cursor_boundary, prev_cursor_boundary,
};
use std::borrow::Cow;

#[derive(Clone, Debug, Default)]
pub struct TextBuffer {
    value: String,
    // Bumped on every change to `value`.
    revision: u64,
    caret: usize,
    selection_anchor: Option<usize>,
    completion: Option<String>,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn caret_at_end(&self) -> bool {
        self.caret == self.value.len()
    }

    pub fn selection(&self) -> Option<SelectionRange> {
        let anchor = self.selection_anchor?;
        let range = SelectionRange::new(anchor, self.caret);
        (!range.is_empty()).then_some(range)
    }

    pub fn has_selected_text(&self) -> bool {
        self.selection().is_some()
    }

    /// Pending inline completion suffix, if any.
    pub fn completion(&self) -> Option<&str> {
        self.completion.as_deref()
    }

    /// Text as the user sees it: the value plus any completion overlay.
    pub fn display_text(&self) -> Cow<'_, str> {
        match &self.completion {
            Some(suffix) => Cow::Owned(format!("{}{suffix}", self.value)),
            None => Cow::Borrowed(&self.value),
        }
    }

    /// Replace the whole value, as for programmatic updates.
    ///
    /// Caret moves to the end; selection and completion are cleared.
    /// Returns `true` if the value actually changed.
    pub fn set_text(&mut self, text: &str) -> bool {
        let text = filter_single_line(text);
        self.completion = None;
        self.selection_anchor = None;
        let changed = self.value != text;
        if changed {
            self.value = text.into_owned();
            self.bump();
        }
        self.caret = self.value.len();
        changed
    }

    /// Insert typed or pasted text at the caret, replacing any selection.
    pub fn insert_text(&mut self, s: &str) {
        self.completion = None;
        let s = filter_single_line(s);
        if s.is_empty() {
            return;
        }
        self.delete_selection();
        let caret = clamp_to_char_boundary(&self.value, self.caret);
        self.value.insert_str(caret, &s);
        self.caret = caret + s.len();
        self.bump();
    }

    /// Backspace. A pending completion is removed first, on its own.
    pub fn backspace(&mut self) {
        if self.completion.take().is_some() || self.delete_selection() {
            return;
        }
        if self.caret == 0 {
            return;
        }
        let prev = prev_cursor_boundary(&self.value, self.caret);
        self.value.drain(prev..self.caret);
        self.caret = prev;
        self.bump();
    }

    /// Forward delete. A pending completion is removed first, on its own.
    pub fn delete(&mut self) {
        if self.completion.take().is_some() || self.delete_selection() {
            return;
        }
        if self.caret >= self.value.len() {
            return;
        }
        let next = next_cursor_boundary(&self.value, self.caret);
        self.value.drain(self.caret..next);
        self.bump();
    }

    pub fn move_caret_left(&mut self, selecting: bool) {
        self.completion = None;
        if !selecting && let Some(sel) = self.selection() {
            self.place_caret(sel.start, false);
            return;
        }
        let target = prev_cursor_boundary(&self.value, self.caret);
        self.place_caret(target, selecting);
    }

    /// Moving right off the end accepts a pending completion.
    pub fn move_caret_right(&mut self, selecting: bool) {
        if self.accept_completion() {
            return;
        }
        if !selecting && let Some(sel) = self.selection() {
            self.place_caret(sel.end, false);
            return;
        }
        let target = next_cursor_boundary(&self.value, self.caret);
        self.place_caret(target, selecting);
    }

    pub fn move_caret_to_start(&mut self, selecting: bool) {
        self.completion = None;
        self.place_caret(0, selecting);
    }

    /// Like [`move_caret_right`](Self::move_caret_right), End accepts a pending completion.
    pub fn move_caret_to_end(&mut self, selecting: bool) {
        if self.accept_completion() {
            return;
        }
        self.place_caret(self.value.len(), selecting);
    }

    /// Select the whole value. Selecting an already selected value is a no-op.
    pub fn select_all(&mut self) {
        self.accept_completion();
        if self.value.is_empty() {
            self.selection_anchor = None;
            self.caret = 0;
            return;
        }
        self.selection_anchor = Some(0);
        self.caret = self.value.len();
    }

    /// Drop the selection, leaving only the caret.
    pub fn deselect(&mut self) {
        self.selection_anchor = None;
    }

    /// Offer an inline completion suffix.
    ///
    /// Ignored unless the caret is at the end with nothing selected. An empty
    /// suffix clears the overlay.
    pub fn set_completion(&mut self, suffix: Option<&str>) {
        self.completion = match suffix {
            Some(s) if !s.is_empty() && self.caret_at_end() && !self.has_selected_text() => {
                Some(filter_single_line(s).into_owned())
            }
            _ => None,
        };
    }

    /// Merge the pending completion into the value. Returns `true` if there was one.
    pub fn accept_completion(&mut self) -> bool {
        let Some(suffix) = self.completion.take() else {
            return false;
        };
        self.value.push_str(&suffix);
        self.caret = self.value.len();
        self.selection_anchor = None;
        self.bump();
        true
    }

    /// Throw away the pending completion. Returns `true` if there was one.
    pub fn discard_completion(&mut self) -> bool {
        self.completion.take().is_some()
    }

    // --- internal helpers ---

    fn place_caret(&mut self, target: usize, selecting: bool) {
        let target = clamp_to_char_boundary(&self.value, target);
        if selecting {
            let anchor = self.selection_anchor.unwrap_or(self.caret);
            self.caret = target;
            // A collapsed selection must not stick around.
            self.selection_anchor = (anchor != target).then_some(anchor);
        } else {
            self.caret = target;
            self.selection_anchor = None;
        }
    }

    fn delete_selection(&mut self) -> bool {
        let Some(sel) = self.selection() else {
            self.selection_anchor = None;
            return false;
        };
        self.value.drain(sel.start..sel.end);
        self.caret = sel.start;
        self.selection_anchor = None;
        self.bump();
        true
    }

    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer(text: &str) -> TextBuffer {
        let mut b = TextBuffer::new();
        b.set_text(text);
        b
    }

    #[test]
    fn set_text_moves_caret_to_end_and_reports_change() {
        let mut b = TextBuffer::new();
        assert!(b.set_text("example.com"));
        assert_eq!(b.caret(), "example.com".len());
        assert!(!b.set_text("example.com"));
        assert_eq!(b.revision(), 1);
    }

    #[test]
    fn backspace_removes_whole_scalar_value() {
        let mut b = buffer("a€");
        b.backspace();
        assert_eq!(b.value(), "a");
        assert_eq!(b.caret(), 1);
    }

    #[test]
    fn typing_replaces_selection() {
        let mut b = buffer("hello");
        b.move_caret_left(true);
        b.insert_text("X");
        assert_eq!(b.value(), "hellX");
        assert_eq!(b.caret(), 5);
    }

    #[test]
    fn select_all_is_idempotent() {
        let mut b = buffer("example.com");
        b.select_all();
        let first = b.selection();
        b.select_all();
        assert_eq!(b.selection(), first);
        assert!(first.is_some_and(|s| s.covers("example.com")));
    }

    #[test]
    fn select_all_on_empty_text_selects_nothing() {
        let mut b = TextBuffer::new();
        b.select_all();
        assert_eq!(b.selection(), None);
    }

    #[test]
    fn completion_overlay_is_not_part_of_value() {
        let mut b = TextBuffer::new();
        b.insert_text("exa");
        b.set_completion(Some("mple.com"));
        assert_eq!(b.value(), "exa");
        assert_eq!(b.display_text(), "example.com");
    }

    #[test]
    fn backspace_only_drops_completion() {
        let mut b = TextBuffer::new();
        b.insert_text("exa");
        b.set_completion(Some("mple.com"));
        b.backspace();
        assert_eq!(b.value(), "exa");
        assert_eq!(b.completion(), None);
    }

    #[test]
    fn end_accepts_completion() {
        let mut b = TextBuffer::new();
        b.insert_text("exa");
        b.set_completion(Some("mple.com"));
        b.move_caret_to_end(false);
        assert_eq!(b.value(), "example.com");
        assert!(b.caret_at_end());
    }

    #[test]
    fn completion_needs_caret_at_end() {
        let mut b = buffer("exa");
        b.move_caret_left(false);
        b.set_completion(Some("mple.com"));
        assert_eq!(b.completion(), None);
    }

    #[test]
    fn typing_discards_completion() {
        let mut b = TextBuffer::new();
        b.insert_text("ex");
        b.set_completion(Some("ample.com"));
        b.insert_text("t");
        assert_eq!(b.value(), "ext");
        assert_eq!(b.completion(), None);
    }

    #[test]
    fn collapsed_shift_selection_clears_anchor() {
        let mut b = buffer("ab");
        b.move_caret_left(true);
        b.move_caret_right(true);
        assert_eq!(b.selection(), None);
    }
}
