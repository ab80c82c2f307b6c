use super::{AddressField, FieldMode};
use crate::settings::{FieldOption, read_bool};
use bus::FieldEvent;
use egui::Pos2;

/// Why the field gained focus.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FocusReason {
    Mouse,
    Tab,
    Backtab,
    Shortcut,
    /// Focus returned from a transient popup (menu, completion list).
    Popup,
    ActiveWindow,
    Other,
}

impl AddressField {
    /// `pointer` is the press position for mouse-driven focus.
    pub fn on_focus_in(&mut self, reason: FocusReason, pointer: Option<Pos2>) {
        self.has_focus = true;

        // The press belongs to the slot under it.
        if reason == FocusReason::Mouse
            && let Some(pos) = pointer
            && self.decorations.slot_at(pos).is_some()
        {
            return;
        }

        let selects = match reason {
            FocusReason::Mouse | FocusReason::Shortcut => true,
            FocusReason::Tab | FocusReason::Backtab => self.mode == FieldMode::Full,
            FocusReason::Popup | FocusReason::ActiveWindow | FocusReason::Other => false,
        };

        if selects
            && !self.buffer.value().trim().is_empty()
            && read_bool(self.deps.settings.as_ref(), FieldOption::SelectAllOnFocus)
        {
            self.pending_select_all = true;
        } else if reason != FocusReason::Popup {
            self.buffer.deselect();
        }
    }

    pub fn on_focus_out(&mut self) {
        self.has_focus = false;
    }

    /// Escape: restore the page URL if the text was edited, otherwise hand
    /// focus back to the page.
    pub(super) fn cancel(&mut self) {
        self.buffer.discard_completion();

        let Some(page) = self.page().cloned() else {
            return;
        };
        let url = page.url();
        let current = self.buffer.value().trim();

        if current.is_empty() || current != url {
            self.set_text(if page.is_url_empty() { "" } else { url.as_str() });
            if !self.buffer.value().trim().is_empty()
                && read_bool(self.deps.settings.as_ref(), FieldOption::SelectAllOnFocus)
            {
                self.pending_select_all = true;
            }
        } else {
            self.emit(FieldEvent::FocusPage);
        }
    }
}
