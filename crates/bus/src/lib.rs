use core_types::{Icon, PageId, SettingValue, SubmissionOutcome};
use std::sync::mpsc::{self, Receiver, Sender};

/// Collaborators -> field. Delivered through the channel handed out at
/// subscribe time and drained by the field on the UI thread.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldNotification {
    // Configuration store
    OptionChanged {
        name: String,
        value: SettingValue,
    },

    // Bookmark store (any mutation)
    BookmarksModified,

    // Bound page
    PageIconChanged {
        page: PageId,
        icon: Icon,
    },
    PageAboutToClose {
        page: PageId,
    },
    LoadPluginsChanged {
        page: PageId,
        enabled: bool,
    },
}

impl FieldNotification {
    /// Originating page, for notifications that come from a page.
    pub fn page(&self) -> Option<PageId> {
        match self {
            FieldNotification::PageIconChanged { page, .. }
            | FieldNotification::PageAboutToClose { page }
            | FieldNotification::LoadPluginsChanged { page, .. } => Some(*page),
            FieldNotification::OptionChanged { .. } | FieldNotification::BookmarksModified => {
                None
            }
        }
    }
}

/// Field -> host window.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldEvent {
    Submitted(SubmissionOutcome),
    // Escape on unchanged text hands focus back to the page view.
    FocusPage,
}

/// Host-side ends of the outbound event channel. The field keeps its own
/// notification channel; collaborators get clones of its sender on subscribe.
pub struct Bus {
    pub evt_tx: Sender<FieldEvent>,
    pub evt_rx: Receiver<FieldEvent>,
}

impl Bus {
    pub fn new() -> Self {
        let (evt_tx, evt_rx) = mpsc::channel();
        Self { evt_tx, evt_rx }
    }

    /// Everything the field has emitted so far, without blocking.
    pub fn drain(&self) -> Vec<FieldEvent> {
        self.evt_rx.try_iter().collect()
    }
}

impl Default for Bus {
    fn default() -> Self {
        Self::new()
    }
}
