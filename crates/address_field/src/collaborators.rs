//! Narrow interfaces to everything the address field does not own.
//!
//! All calls are synchronous, in-memory and made on the UI thread.
//! Notifications never call back into the field; collaborators push a
//! [`FieldNotification`] into the sender handed to `subscribe`, and the field
//! drains it on its next `process_notifications`.

use bus::FieldNotification;
use core_types::{
    BookmarkRef, EngineId, Icon, PageId, PageSignal, SettingValue, SubscriptionId,
};
use std::rc::Rc;
use std::sync::mpsc::Sender;

pub trait BookmarkStore {
    /// Whether a bookmark exists for this canonical URL.
    fn has_bookmark(&self, url: &str) -> bool;

    /// Exact keyword match first, then exact title match.
    fn find_by_keyword_or_title(&self, text: &str) -> Option<BookmarkRef>;

    /// Runs the host's bookmark-creation flow for `url`.
    fn create(&self, url: &str, title: &str) -> BookmarkRef;

    fn delete(&self, url: &str);

    /// Fires [`FieldNotification::BookmarksModified`] on any mutation.
    fn subscribe(&self, tx: Sender<FieldNotification>) -> SubscriptionId;

    fn unsubscribe(&self, id: SubscriptionId);
}

pub trait SearchEngines {
    fn default_engine(&self) -> EngineId;

    fn resolve_keyword(&self, token: &str) -> Option<EngineId>;
}

/// The page/window the field is bound to.
pub trait Page {
    fn id(&self) -> PageId;

    fn url(&self) -> String;

    /// True for blank pages whose URL should not be shown.
    fn is_url_empty(&self) -> bool;

    fn title(&self) -> String;

    fn icon(&self) -> Icon;

    /// `None` if the page has no "load blocked plugins" action at all,
    /// otherwise whether it is currently enabled.
    fn load_plugins_action(&self) -> Option<bool>;

    fn trigger_load_plugins(&self);

    fn subscribe(&self, signal: PageSignal, tx: Sender<FieldNotification>) -> SubscriptionId;

    fn unsubscribe(&self, id: SubscriptionId);
}

pub type PageRef = Rc<dyn Page>;

/// Global configuration store keyed by option name.
pub trait SettingsStore {
    fn value(&self, name: &str) -> Option<SettingValue>;

    fn set_value(&self, name: &str, value: SettingValue);

    /// Fires [`FieldNotification::OptionChanged`] for every changed key.
    fn subscribe(&self, tx: Sender<FieldNotification>) -> SubscriptionId;

    fn unsubscribe(&self, id: SubscriptionId);
}

/// Already-ordered completion candidates (most relevant first).
pub trait SuggestionSource {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Display form of the candidate at `index`.
    fn display_text(&self, index: usize) -> Option<String>;
}

/// Everything an [`AddressField`](crate::AddressField) is wired to at construction.
#[derive(Clone)]
pub struct FieldDeps {
    pub settings: Rc<dyn SettingsStore>,
    pub bookmarks: Rc<dyn BookmarkStore>,
    pub engines: Rc<dyn SearchEngines>,
    pub suggestions: Rc<dyn SuggestionSource>,
}
