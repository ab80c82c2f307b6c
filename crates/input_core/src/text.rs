//! UTF-8 helpers for caret placement and address text filtering.

use std::borrow::Cow;

/// Clamp a byte index to the nearest char boundary at or before it.
///
/// ```
/// use input_core::clamp_to_char_boundary;
///
/// let s = "a€b";
/// assert_eq!(clamp_to_char_boundary(s, 2), 1);
/// assert_eq!(clamp_to_char_boundary(s, 100), 5);
/// ```
#[inline]
pub fn clamp_to_char_boundary(s: &str, index: usize) -> usize {
    let mut index = index.min(s.len());
    while index > 0 && !s.is_char_boundary(index) {
        index -= 1;
    }
    index
}

/// Byte index of the char boundary before `i`, or 0.
pub fn prev_cursor_boundary(s: &str, i: usize) -> usize {
    let i = clamp_to_char_boundary(s, i);
    s[..i].char_indices().next_back().map_or(0, |(idx, _)| idx)
}

/// Byte index of the char boundary after `i`, or `s.len()`.
pub fn next_cursor_boundary(s: &str, i: usize) -> usize {
    let i = clamp_to_char_boundary(s, i);
    s[i..].chars().next().map_or(s.len(), |c| i + c.len_utf8())
}

/// Strip line breaks so pasted multi-line text stays a single address.
///
/// ```
/// use input_core::filter_single_line;
///
/// assert_eq!(filter_single_line("example.com"), "example.com");
/// assert_eq!(filter_single_line("exam\r\nple.com"), "example.com");
/// ```
pub fn filter_single_line(s: &str) -> Cow<'_, str> {
    if !s.contains(['\n', '\r']) {
        return Cow::Borrowed(s);
    }
    Cow::Owned(s.chars().filter(|c| *c != '\n' && *c != '\r').collect())
}

/// Case-insensitive `starts_with`. Returns the byte length of the part of
/// `candidate` that matched `prefix`, so callers can split off the rest.
///
/// Chars are compared through their full lowercase mapping, one char
/// against one char; leading or trailing whitespace in `prefix` is
/// significant.
///
/// ```
/// use input_core::prefix_match_len;
///
/// assert_eq!(prefix_match_len("Example.com", "exa"), Some(3));
/// assert_eq!(prefix_match_len("example.com", "x"), None);
/// assert_eq!(prefix_match_len("ab", "abc"), None);
/// ```
pub fn prefix_match_len(candidate: &str, prefix: &str) -> Option<usize> {
    let mut matched = 0;
    let mut rest = candidate.chars();
    for p in prefix.chars() {
        let c = rest.next()?;
        if c != p && !c.to_lowercase().eq(p.to_lowercase()) {
            return None;
        }
        matched += c.len_utf8();
    }
    Some(matched)
}
