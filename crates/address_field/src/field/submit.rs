use super::AddressField;
use crate::interpreter::InputInterpreter;
use crate::open_hint::hint_for;
use crate::settings::{FieldOption, read_bool};
use bus::FieldEvent;
use core_types::{OpenHint, SubmissionOutcome};
use egui::{Modifiers, PointerButton};

impl AddressField {
    pub(super) fn submit_with_modifiers(&mut self, modifiers: Modifiers) {
        self.submit(hint_for(modifiers, PointerButton::Primary));
    }

    /// Interpret the current text, accepting any inline suggestion first.
    /// Returns the outcome that was sent to the host, if any.
    pub fn submit(&mut self, hint: OpenHint) -> Option<SubmissionOutcome> {
        if self.buffer.accept_completion() {
            self.text_changed();
        }
        let text = self.buffer.value().to_string();
        self.dispatch(&text, hint)
    }

    /// Interpret `text` directly, leaving the field's own text alone.
    pub fn paste_and_go(&mut self, text: &str) -> Option<SubmissionOutcome> {
        self.dispatch(text.trim(), OpenHint::CurrentTab)
    }

    /// Middle-click release on an empty field submits the clipboard.
    /// Returns `true` if the release was consumed.
    pub fn on_pointer_release(&mut self, button: PointerButton, clipboard: Option<&str>) -> bool {
        if button != PointerButton::Middle || !self.buffer.is_empty() {
            return false;
        }
        let Some(text) = clipboard.filter(|text| !text.is_empty()) else {
            return false;
        };
        if !read_bool(self.deps.settings.as_ref(), FieldOption::PasteAndGoOnMiddleClick) {
            return false;
        }
        self.paste_and_go(text);
        true
    }

    fn dispatch(&self, text: &str, hint: OpenHint) -> Option<SubmissionOutcome> {
        let interpreter =
            InputInterpreter::new(self.deps.bookmarks.as_ref(), self.deps.engines.as_ref());
        let outcome = interpreter.interpret(text, hint)?;
        log::debug!(target: "address_field.field", "submitted {outcome:?}");
        self.emit(FieldEvent::Submitted(outcome.clone()));
        Some(outcome)
    }
}
