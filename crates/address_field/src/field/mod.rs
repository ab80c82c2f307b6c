//! The address field controller.
//!
//! Owns the editable text, the completion filter and the decoration slots,
//! and routes host input events between them. Collaborator notifications
//! arrive on the field's own channel and are applied in
//! [`AddressField::process_notifications`], so nothing re-enters the field
//! while it is handling an event.

mod binding;
mod focus;
mod slots;
mod submit;

use crate::collaborators::{FieldDeps, PageRef};
use crate::completion::CompletionFilter;
use crate::decorations::{DecorationController, DecorationKind};
use binding::PageBinding;
use bus::{FieldEvent, FieldNotification};
use core_types::{PageId, SubscriptionId};
use egui::{Key, Modifiers, PointerButton, Vec2};
use input_core::TextBuffer;
use std::sync::mpsc::{self, Receiver, Sender};

pub use focus::FocusReason;
pub use slots::DecorationResponse;

pub const PLACEHOLDER_TEXT: &str = "Enter address or search...";

/// Size assumed until the host reports the real one through `resize`.
pub const DEFAULT_FIELD_SIZE: Vec2 = Vec2::new(400.0, 28.0);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FieldMode {
    #[default]
    Full,
    /// Reduced presentation: plain text entry without decorations,
    /// placeholder or submit-on-Enter.
    Simple,
}

pub struct AddressField {
    deps: FieldDeps,
    mode: FieldMode,

    buffer: TextBuffer,
    completion: CompletionFilter,
    decorations: DecorationController,
    binding: Option<PageBinding>,

    has_focus: bool,
    pending_select_all: bool,

    note_tx: Sender<FieldNotification>,
    note_rx: Receiver<FieldNotification>,
    evt_tx: Sender<FieldEvent>,
    store_subscriptions: Vec<StoreSubscription>,
}

enum StoreSubscription {
    Settings(SubscriptionId),
    Bookmarks(SubscriptionId),
}

impl AddressField {
    pub fn new(deps: FieldDeps, evt_tx: Sender<FieldEvent>, mode: FieldMode) -> Self {
        let (note_tx, note_rx) = mpsc::channel();
        let completion = CompletionFilter::new(deps.suggestions.clone());

        let mut store_subscriptions = Vec::new();
        if mode == FieldMode::Full {
            store_subscriptions.push(StoreSubscription::Settings(
                deps.settings.subscribe(note_tx.clone()),
            ));
            store_subscriptions.push(StoreSubscription::Bookmarks(
                deps.bookmarks.subscribe(note_tx.clone()),
            ));
        }

        let mut field = Self {
            deps,
            mode,
            buffer: TextBuffer::new(),
            completion,
            decorations: DecorationController::new(DEFAULT_FIELD_SIZE),
            binding: None,
            has_focus: false,
            pending_select_all: false,
            note_tx,
            note_rx,
            evt_tx,
            store_subscriptions,
        };
        field.refresh_slots();
        field
    }

    // -- Accessors ---
    pub fn mode(&self) -> FieldMode {
        self.mode
    }

    pub fn text(&self) -> &str {
        self.buffer.value()
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn completion(&self) -> &CompletionFilter {
        &self.completion
    }

    pub fn decorations(&self) -> &DecorationController {
        &self.decorations
    }

    pub fn page(&self) -> Option<&PageRef> {
        self.binding.as_ref().map(PageBinding::page)
    }

    pub fn has_focus(&self) -> bool {
        self.has_focus
    }

    pub fn placeholder_text(&self) -> Option<&'static str> {
        (self.mode == FieldMode::Full).then_some(PLACEHOLDER_TEXT)
    }

    /// Whether a select-all is waiting for the next `run_deferred`.
    pub fn has_pending_select_all(&self) -> bool {
        self.pending_select_all
    }

    // -- Text ---

    /// Replace the text programmatically. Drops any inline suggestion.
    pub fn set_text(&mut self, text: &str) {
        self.buffer.set_text(text);
        self.text_changed();
    }

    pub fn on_text_input(&mut self, text: &str) {
        self.buffer.insert_text(text);
        self.text_changed();
        self.offer_inline_completion();
    }

    /// Returns `true` if the key was consumed.
    pub fn on_key_press(&mut self, key: Key, modifiers: Modifiers) -> bool {
        let revision = self.buffer.revision();
        let handled = match key {
            Key::Enter => {
                if self.mode == FieldMode::Simple {
                    return false;
                }
                self.submit_with_modifiers(modifiers);
                true
            }
            Key::Escape => {
                self.cancel();
                true
            }
            Key::Backspace => {
                self.buffer.backspace();
                true
            }
            Key::Delete => {
                self.buffer.delete();
                true
            }
            Key::ArrowLeft => {
                self.buffer.move_caret_left(modifiers.shift);
                true
            }
            Key::ArrowRight => {
                self.buffer.move_caret_right(modifiers.shift);
                true
            }
            Key::Home => {
                self.buffer.move_caret_to_start(modifiers.shift);
                true
            }
            Key::End => {
                self.buffer.move_caret_to_end(modifiers.shift);
                true
            }
            Key::A if modifiers.command => {
                self.buffer.select_all();
                true
            }
            _ => false,
        };
        if self.buffer.revision() != revision {
            self.text_changed();
        }
        handled
    }

    pub fn on_double_click(&mut self, button: PointerButton) -> bool {
        if button != PointerButton::Primary {
            return false;
        }
        self.buffer.select_all();
        self.text_changed();
        true
    }

    // -- Host loop hooks ---

    /// Apply every notification queued by collaborators since the last call.
    /// Notifications raised while these are handled are applied in the same
    /// call, in order.
    pub fn process_notifications(&mut self) {
        while let Ok(note) = self.note_rx.try_recv() {
            self.on_notification(note);
        }
    }

    /// Run work scheduled for the next event-loop iteration.
    pub fn run_deferred(&mut self) {
        if std::mem::take(&mut self.pending_select_all) {
            self.buffer.select_all();
            self.text_changed();
        }
    }

    pub fn resize(&mut self, size: Vec2) {
        self.decorations.resize(size);
    }

    fn on_notification(&mut self, note: FieldNotification) {
        if let Some(page) = note.page()
            && self.bound_page_id() != Some(page)
        {
            log::trace!(target: "address_field.field", "dropping {note:?} from unbound page");
            return;
        }

        match note {
            FieldNotification::OptionChanged { name, value } => {
                self.on_option_changed(&name, &value);
            }
            FieldNotification::BookmarksModified => {
                self.update_slot(DecorationKind::Bookmark);
            }
            FieldNotification::PageIconChanged { icon, .. } => {
                self.on_page_icon_changed(icon);
            }
            FieldNotification::PageAboutToClose { page } => {
                log::debug!(target: "address_field.field", "page {page} closing");
                self.set_page(None);
            }
            FieldNotification::LoadPluginsChanged { .. } => {
                self.update_slot(DecorationKind::PluginsIndicator);
            }
        }
    }

    fn bound_page_id(&self) -> Option<PageId> {
        self.binding.as_ref().map(PageBinding::page_id)
    }

    /// Feed the filter after any change to the value.
    fn text_changed(&mut self) {
        self.completion.set_prefix(self.buffer.value());
    }

    fn offer_inline_completion(&mut self) {
        if !self.buffer.caret_at_end() {
            return;
        }
        let suffix = self.completion.inline_suffix();
        self.buffer.set_completion(suffix.as_deref());
    }

    fn emit(&self, event: FieldEvent) {
        if self.evt_tx.send(event).is_err() {
            log::warn!(target: "address_field.field", "host event channel closed");
        }
    }
}

impl Drop for AddressField {
    fn drop(&mut self) {
        if let Some(binding) = self.binding.take() {
            binding.detach();
        }
        for subscription in self.store_subscriptions.drain(..) {
            match subscription {
                StoreSubscription::Settings(id) => self.deps.settings.unsubscribe(id),
                StoreSubscription::Bookmarks(id) => self.deps.bookmarks.unsubscribe(id),
            }
        }
    }
}
