use super::AddressField;
use crate::collaborators::PageRef;
use crate::decorations::DecorationKind;
use crate::scheme::{SCRIPT_SCHEME, url_scheme};
use bus::FieldNotification;
use core_types::{PageId, PageSignal, SubscriptionId};
use std::sync::mpsc::Sender;

const PAGE_SIGNALS: [PageSignal; 3] = [
    PageSignal::IconChanged,
    PageSignal::AboutToClose,
    PageSignal::LoadPluginsChanged,
];

/// A bound page and the subscriptions made on it. Dropping the field or
/// rebinding consumes the binding through [`PageBinding::detach`], so each
/// subscription is released exactly once.
pub(super) struct PageBinding {
    page: PageRef,
    id: PageId,
    subscriptions: Vec<SubscriptionId>,
}

impl PageBinding {
    fn attach(page: PageRef, tx: &Sender<FieldNotification>) -> Self {
        let subscriptions = PAGE_SIGNALS
            .into_iter()
            .map(|signal| page.subscribe(signal, tx.clone()))
            .collect();
        Self {
            id: page.id(),
            page,
            subscriptions,
        }
    }

    pub(super) fn detach(self) {
        for id in self.subscriptions {
            self.page.unsubscribe(id);
        }
    }

    pub(super) fn page(&self) -> &PageRef {
        &self.page
    }

    pub(super) fn page_id(&self) -> PageId {
        self.id
    }
}

impl AddressField {
    /// Bind to `page`, or unbind with `None`. Subscriptions on the previous
    /// page are released before any are made on the new one.
    pub fn set_page(&mut self, page: Option<PageRef>) {
        if let (Some(current), Some(next)) = (self.binding.as_ref(), page.as_ref())
            && current.page_id() == next.id()
        {
            return;
        }

        if let Some(previous) = self.binding.take() {
            log::debug!(target: "address_field.field", "unbinding page {}", previous.page_id());
            previous.detach();
        }

        if let Some(page) = page {
            log::debug!(target: "address_field.field", "binding page {}", page.id());
            self.binding = Some(PageBinding::attach(page, &self.note_tx));
            self.page_url_changed();
        }

        self.refresh_slots();
    }

    /// The bound page navigated. Shows its URL unless the user is editing or
    /// the change came from a script URL.
    pub fn page_url_changed(&mut self) {
        let Some(page) = self.page().cloned() else {
            return;
        };
        self.update_slot(DecorationKind::Bookmark);

        let url = page.url();
        if self.has_focus || url_scheme(&url).as_deref() == Some(SCRIPT_SCHEME) {
            log::trace!(target: "address_field.field", "not syncing text to {url:?}");
            return;
        }
        self.set_text(if page.is_url_empty() { "" } else { url.as_str() });
    }
}
