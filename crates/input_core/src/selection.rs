//! Selection as a normalized byte range over the address text.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SelectionRange {
    pub start: usize,
    pub end: usize,
}

impl SelectionRange {
    /// Build from an anchor and a caret in either order.
    #[inline]
    pub fn new(a: usize, b: usize) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether this range spans all of `value`.
    #[inline]
    pub fn covers(&self, value: &str) -> bool {
        self.start == 0 && self.end == value.len()
    }
}
