use super::{AddressField, FieldMode};
use crate::decorations::{BookmarkState, DecorationKind, SlotLook};
use crate::scheme::{INTERNAL_SCHEME, canonical_url, url_scheme, without_password};
use crate::settings::{FieldOption, read_bool};
use core_types::{Icon, SettingValue};
use egui::{PointerButton, Pos2};

/// What a pointer press on the field's decorations amounted to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecorationResponse {
    /// No slot took the press; it belongs to the text.
    Ignored,
    Handled,
    /// Secondary press on a slot: the host should offer "remove this icon"
    /// and call [`AddressField::remove_icon`] if chosen.
    OfferRemoveIcon(DecorationKind),
}

impl AddressField {
    pub fn on_pointer_press(&mut self, pos: Pos2, button: PointerButton) -> DecorationResponse {
        match self.decorations.slot_at(pos) {
            Some(kind) => self.on_decoration_press(kind, button),
            None => DecorationResponse::Ignored,
        }
    }

    /// A press aimed at `kind`. Slots that are gone or hidden ignore it.
    pub fn on_decoration_press(
        &mut self,
        kind: DecorationKind,
        button: PointerButton,
    ) -> DecorationResponse {
        let Some(slot) = self.decorations.slot(kind).filter(|slot| slot.rect.is_some()) else {
            log::trace!(target: "address_field.field", "press on absent {kind:?} slot");
            return DecorationResponse::Ignored;
        };
        let enabled = slot.look.enabled;

        match button {
            PointerButton::Secondary => DecorationResponse::OfferRemoveIcon(kind),
            PointerButton::Primary => {
                if enabled {
                    match kind {
                        DecorationKind::Bookmark => self.toggle_bookmark(),
                        DecorationKind::PluginsIndicator => {
                            if let Some(page) = self.page() {
                                page.trigger_load_plugins();
                            }
                        }
                        DecorationKind::PageIcon => {}
                    }
                }
                DecorationResponse::Handled
            }
            _ => DecorationResponse::Ignored,
        }
    }

    /// Turn the slot's option off in the settings store. The slot goes away
    /// once the resulting change notification is processed.
    pub fn remove_icon(&mut self, kind: DecorationKind) {
        let option = kind.option();
        log::debug!(target: "address_field.field", "removing {kind:?} icon");
        self.deps
            .settings
            .set_value(option.key(), SettingValue::Bool(false));
    }

    pub(super) fn on_option_changed(&mut self, name: &str, value: &SettingValue) {
        let Some(option) = FieldOption::from_key(name) else {
            return;
        };
        log::debug!(target: "address_field.field", "{name} changed to {value:?}");
        if let Some(kind) = DecorationKind::for_option(option) {
            self.refresh_slot(kind);
        }
    }

    pub(super) fn on_page_icon_changed(&mut self, icon: Icon) {
        if self.decorations.is_present(DecorationKind::PageIcon) {
            self.decorations
                .update(DecorationKind::PageIcon, SlotLook::page_icon(icon));
        }
    }

    pub(super) fn refresh_slots(&mut self) {
        for kind in DecorationKind::ALL {
            self.refresh_slot(kind);
        }
    }

    /// Create or destroy the slot to match its option, then recompute its look.
    pub(super) fn refresh_slot(&mut self, kind: DecorationKind) {
        let wanted = self.mode == FieldMode::Full
            && read_bool(self.deps.settings.as_ref(), kind.option())
            && (kind != DecorationKind::PageIcon || self.binding.is_some());

        if wanted {
            let look = self.slot_look(kind);
            self.decorations.show(kind, look);
        } else {
            self.decorations.hide(kind);
        }
    }

    /// Recompute the look of a present slot from live state.
    pub(super) fn update_slot(&mut self, kind: DecorationKind) {
        if self.decorations.is_present(kind) {
            let look = self.slot_look(kind);
            self.decorations.update(kind, look);
        }
    }

    fn slot_look(&self, kind: DecorationKind) -> SlotLook {
        match kind {
            DecorationKind::Bookmark => SlotLook::bookmark(self.bookmark_state()),
            DecorationKind::PageIcon => SlotLook::page_icon(
                self.page()
                    .map_or_else(|| Icon::named("tab"), |page| page.icon()),
            ),
            DecorationKind::PluginsIndicator => SlotLook::plugins(
                self.page()
                    .is_some_and(|page| page.load_plugins_action() == Some(true)),
            ),
        }
    }

    fn bookmark_state(&self) -> BookmarkState {
        let Some(page) = self.page() else {
            return BookmarkState::Unavailable;
        };
        let url = page.url();
        if page.is_url_empty() || url_scheme(&url).as_deref() == Some(INTERNAL_SCHEME) {
            return BookmarkState::Unavailable;
        }
        BookmarkState::Available {
            bookmarked: self.deps.bookmarks.has_bookmark(&canonical_url(&url)),
        }
    }

    fn toggle_bookmark(&mut self) {
        let Some(page) = self.page().cloned() else {
            return;
        };
        let url = canonical_url(&page.url());
        let bookmarks = self.deps.bookmarks.clone();

        if bookmarks.has_bookmark(&url) {
            log::debug!(target: "address_field.field", "removing bookmark {url}");
            bookmarks.delete(&url);
        } else {
            log::debug!(target: "address_field.field", "bookmarking {url}");
            bookmarks.create(&without_password(&url), &page.title());
        }
        self.update_slot(DecorationKind::Bookmark);
    }
}
