//! Address field core: input classification, submission routing, inline
//! completion and the decoration slots embedded in the field.
//!
//! Nothing here draws or performs I/O. The host feeds input events and
//! collaborator notifications in, and receives [`bus::FieldEvent`]s out.

pub mod collaborators;
pub mod completion;
pub mod decorations;
pub mod error;
pub mod field;
pub mod interpreter;
pub mod memory;
pub mod open_hint;
pub mod scheme;
pub mod settings;

pub use collaborators::{
    BookmarkStore, FieldDeps, Page, PageRef, SearchEngines, SettingsStore, SuggestionSource,
};
pub use completion::CompletionFilter;
pub use decorations::{DecorationController, DecorationKind, TextMargins};
pub use error::SettingsError;
pub use field::{AddressField, DecorationResponse, FieldMode, FocusReason};
pub use interpreter::InputInterpreter;
pub use open_hint::hint_for;
pub use scheme::{InputClass, classify};
pub use settings::{FieldOption, MemorySettings};
