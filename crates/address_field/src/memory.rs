//! In-memory collaborators for hosts without their own stores, the demo
//! binary, and tests.

use crate::collaborators::{BookmarkStore, Page, SearchEngines, SuggestionSource};
use crate::scheme::canonical_url;
use bus::FieldNotification;
use core_types::{BookmarkId, BookmarkRef, EngineId, Icon, PageId, PageSignal, SubscriptionId};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::sync::mpsc::Sender;

/// Subscriber list shared by the in-memory stores.
///
/// `K` tags each subscription (for example with the [`PageSignal`] it asked
/// for); stores with a single kind of notification use `()`.
#[derive(Debug)]
pub struct Subscribers<K = ()> {
    next_id: Cell<u64>,
    entries: RefCell<Vec<(SubscriptionId, K, Sender<FieldNotification>)>>,
    detached: Cell<usize>,
    unknown_unsubscribes: Cell<usize>,
}

impl<K> Default for Subscribers<K> {
    fn default() -> Self {
        Self {
            next_id: Cell::new(1),
            entries: RefCell::new(Vec::new()),
            detached: Cell::new(0),
            unknown_unsubscribes: Cell::new(0),
        }
    }
}

impl<K: Copy + PartialEq> Subscribers<K> {
    pub fn subscribe_tagged(&self, tag: K, tx: Sender<FieldNotification>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.entries.borrow_mut().push((id, tag, tx));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        let mut entries = self.entries.borrow_mut();
        let before = entries.len();
        entries.retain(|(entry, _, _)| *entry != id);
        if entries.len() == before {
            log::warn!("unsubscribe of unknown subscription {id:?}");
            self.unknown_unsubscribes.set(self.unknown_unsubscribes.get() + 1);
        } else {
            self.detached.set(self.detached.get() + 1);
        }
    }

    /// Send `note` to every subscriber tagged `tag`. Closed channels are pruned.
    pub fn notify_tagged(&self, tag: K, note: FieldNotification) {
        self.entries
            .borrow_mut()
            .retain(|(_, entry_tag, tx)| *entry_tag != tag || tx.send(note.clone()).is_ok());
    }

    pub fn active(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Subscriptions released through `unsubscribe`.
    pub fn detached(&self) -> usize {
        self.detached.get()
    }

    /// `unsubscribe` calls for ids that were not (or no longer) subscribed.
    pub fn unknown_unsubscribes(&self) -> usize {
        self.unknown_unsubscribes.get()
    }
}

impl Subscribers<()> {
    pub fn subscribe(&self, tx: Sender<FieldNotification>) -> SubscriptionId {
        self.subscribe_tagged((), tx)
    }

    pub fn notify(&self, note: FieldNotification) {
        self.notify_tagged((), note);
    }
}

#[derive(Debug, Default)]
pub struct MemoryBookmarks {
    items: RefCell<Vec<BookmarkRef>>,
    next_id: Cell<BookmarkId>,
    subscribers: Subscribers,
}

impl MemoryBookmarks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, url: &str, title: &str, keyword: Option<&str>) -> BookmarkRef {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        let bookmark = BookmarkRef {
            id,
            url: canonical_url(url),
            title: title.to_string(),
            keyword: keyword.map(str::to_string),
        };
        self.items.borrow_mut().push(bookmark.clone());
        self.subscribers.notify(FieldNotification::BookmarksModified);
        bookmark
    }

    pub fn all(&self) -> Vec<BookmarkRef> {
        self.items.borrow().clone()
    }

    pub fn subscribers(&self) -> &Subscribers {
        &self.subscribers
    }
}

impl BookmarkStore for MemoryBookmarks {
    fn has_bookmark(&self, url: &str) -> bool {
        let url = canonical_url(url);
        self.items.borrow().iter().any(|b| b.url == url)
    }

    fn find_by_keyword_or_title(&self, text: &str) -> Option<BookmarkRef> {
        let items = self.items.borrow();
        items
            .iter()
            .find(|b| b.keyword.as_deref() == Some(text))
            .or_else(|| items.iter().find(|b| b.title == text))
            .cloned()
    }

    fn create(&self, url: &str, title: &str) -> BookmarkRef {
        self.add(url, title, None)
    }

    fn delete(&self, url: &str) {
        let url = canonical_url(url);
        let removed = {
            let mut items = self.items.borrow_mut();
            let before = items.len();
            items.retain(|b| b.url != url);
            before != items.len()
        };
        if removed {
            self.subscribers.notify(FieldNotification::BookmarksModified);
        }
    }

    fn subscribe(&self, tx: Sender<FieldNotification>) -> SubscriptionId {
        self.subscribers.subscribe(tx)
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.subscribers.unsubscribe(id);
    }
}

#[derive(Debug)]
pub struct MemorySearchEngines {
    default: EngineId,
    keywords: HashMap<String, EngineId>,
}

impl MemorySearchEngines {
    pub fn new(default: EngineId) -> Self {
        Self {
            default,
            keywords: HashMap::new(),
        }
    }

    pub fn with_keyword(mut self, keyword: &str, engine: EngineId) -> Self {
        self.keywords.insert(keyword.to_string(), engine);
        self
    }
}

impl SearchEngines for MemorySearchEngines {
    fn default_engine(&self) -> EngineId {
        self.default.clone()
    }

    fn resolve_keyword(&self, token: &str) -> Option<EngineId> {
        self.keywords.get(token).cloned()
    }
}

/// A page whose state the host (or a test) drives by hand.
#[derive(Debug)]
pub struct MemoryPage {
    id: PageId,
    url: RefCell<String>,
    title: RefCell<String>,
    icon: RefCell<Icon>,
    load_plugins: Cell<Option<bool>>,
    plugin_loads: Cell<u32>,
    subscribers: Subscribers<PageSignal>,
}

impl MemoryPage {
    pub fn new(id: PageId, url: &str, title: &str) -> Self {
        Self {
            id,
            url: RefCell::new(url.to_string()),
            title: RefCell::new(title.to_string()),
            icon: RefCell::new(Icon::named("tab")),
            load_plugins: Cell::new(None),
            plugin_loads: Cell::new(0),
            subscribers: Subscribers::default(),
        }
    }

    pub fn set_url(&self, url: &str) {
        *self.url.borrow_mut() = url.to_string();
    }

    pub fn set_icon(&self, icon: Icon) {
        *self.icon.borrow_mut() = icon.clone();
        self.subscribers.notify_tagged(
            PageSignal::IconChanged,
            FieldNotification::PageIconChanged { page: self.id, icon },
        );
    }

    /// `None` removes the action from the page entirely.
    pub fn set_load_plugins(&self, state: Option<bool>) {
        self.load_plugins.set(state);
        if let Some(enabled) = state {
            self.subscribers.notify_tagged(
                PageSignal::LoadPluginsChanged,
                FieldNotification::LoadPluginsChanged {
                    page: self.id,
                    enabled,
                },
            );
        }
    }

    pub fn close(&self) {
        self.subscribers.notify_tagged(
            PageSignal::AboutToClose,
            FieldNotification::PageAboutToClose { page: self.id },
        );
    }

    /// How many times the load-plugins action was triggered.
    pub fn plugin_loads(&self) -> u32 {
        self.plugin_loads.get()
    }

    pub fn subscribers(&self) -> &Subscribers<PageSignal> {
        &self.subscribers
    }
}

impl Page for MemoryPage {
    fn id(&self) -> PageId {
        self.id
    }

    fn url(&self) -> String {
        self.url.borrow().clone()
    }

    fn is_url_empty(&self) -> bool {
        let url = self.url.borrow();
        url.is_empty() || url.as_str() == "about:blank"
    }

    fn title(&self) -> String {
        self.title.borrow().clone()
    }

    fn icon(&self) -> Icon {
        self.icon.borrow().clone()
    }

    fn load_plugins_action(&self) -> Option<bool> {
        self.load_plugins.get()
    }

    fn trigger_load_plugins(&self) {
        if self.load_plugins.get() == Some(true) {
            self.plugin_loads.set(self.plugin_loads.get() + 1);
        }
    }

    fn subscribe(&self, signal: PageSignal, tx: Sender<FieldNotification>) -> SubscriptionId {
        self.subscribers.subscribe_tagged(signal, tx)
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.subscribers.unsubscribe(id);
    }
}

/// Visited URLs, most recent first.
#[derive(Debug, Default)]
pub struct MemoryHistory {
    urls: RefCell<Vec<String>>,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// History seeded in the given order (first is most relevant).
    pub fn from_urls<'a>(urls: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            urls: RefCell::new(urls.into_iter().map(str::to_string).collect()),
        }
    }

    /// Move `url` to the front.
    pub fn visit(&self, url: &str) {
        let mut urls = self.urls.borrow_mut();
        urls.retain(|u| u != url);
        urls.insert(0, url.to_string());
    }
}

impl SuggestionSource for MemoryHistory {
    fn len(&self) -> usize {
        self.urls.borrow().len()
    }

    fn display_text(&self, index: usize) -> Option<String> {
        self.urls.borrow().get(index).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn bookmarks_compare_canonical_urls() {
        let bookmarks = MemoryBookmarks::new();
        bookmarks.add("https://Example.com", "Example", None);
        assert!(bookmarks.has_bookmark("https://example.com/"));
        bookmarks.delete("HTTPS://example.com");
        assert!(!bookmarks.has_bookmark("https://example.com/"));
    }

    #[test]
    fn keyword_match_wins_over_title() {
        let bookmarks = MemoryBookmarks::new();
        bookmarks.add("https://a.example", "docs", None);
        let keyed = bookmarks.add("https://b.example", "Other", Some("docs"));
        assert_eq!(bookmarks.find_by_keyword_or_title("docs"), Some(keyed));
        assert_eq!(bookmarks.find_by_keyword_or_title("Docs"), None);
    }

    #[test]
    fn page_notifies_only_matching_signal() {
        let page = MemoryPage::new(7, "https://example.com/", "Example");
        let (tx, rx) = mpsc::channel();
        page.subscribe(PageSignal::AboutToClose, tx);

        page.set_icon(Icon::named("star"));
        assert_eq!(rx.try_iter().count(), 0);

        page.close();
        assert_eq!(
            rx.try_iter().collect::<Vec<_>>(),
            vec![FieldNotification::PageAboutToClose { page: 7 }]
        );
    }

    #[test]
    fn unsubscribe_counts_released_and_unknown_ids() {
        let page = MemoryPage::new(1, "https://example.com/", "Example");
        let (tx, _rx) = mpsc::channel();
        let id = page.subscribe(PageSignal::IconChanged, tx);

        page.unsubscribe(id);
        page.unsubscribe(id);
        page.unsubscribe(SubscriptionId(99));

        assert_eq!(page.subscribers().active(), 0);
        assert_eq!(page.subscribers().detached(), 1);
        assert_eq!(page.subscribers().unknown_unsubscribes(), 2);
    }

    #[test]
    fn dropped_receivers_are_pruned() {
        let bookmarks = MemoryBookmarks::new();
        let (tx, rx) = mpsc::channel();
        bookmarks.subscribe(tx);
        drop(rx);
        bookmarks.add("https://example.com", "Example", None);
        assert_eq!(bookmarks.subscribers().active(), 0);
    }
}
