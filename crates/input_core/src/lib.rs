//! # input_core
//!
//! UI-agnostic editing state for the address field: the address text, its
//! caret and selection, and the inline completion overlay.
//!
//! - [`TextBuffer`]: the editable value plus caret/selection/overlay state
//! - [`SelectionRange`]: normalized byte range over the value
//!
//! The crate depends only on `std`; key and pointer translation lives in the
//! integration layer.

mod buffer;
mod selection;
mod text;

pub use buffer::TextBuffer;
pub use selection::SelectionRange;

pub use text::{
    clamp_to_char_boundary, filter_single_line, next_cursor_boundary, prefix_match_len,
    prev_cursor_boundary,
};
