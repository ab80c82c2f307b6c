#![allow(dead_code)]

use address_field::memory::{MemoryBookmarks, MemoryHistory, MemoryPage, MemorySearchEngines};
use address_field::{AddressField, FieldDeps, FieldMode, MemorySettings};
use bus::{Bus, FieldEvent};
use core_types::EngineId;
use std::rc::Rc;

pub const DEFAULT_ENGINE: &str = "duckduckgo";

/// A field wired to in-memory collaborators, with handles kept so tests can
/// drive the collaborators and inspect what the field did to them.
pub struct Harness {
    pub settings: Rc<MemorySettings>,
    pub bookmarks: Rc<MemoryBookmarks>,
    pub engines: Rc<MemorySearchEngines>,
    pub history: Rc<MemoryHistory>,
    pub bus: Bus,
    pub field: AddressField,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_settings(MemorySettings::new(), FieldMode::Full)
    }

    pub fn simple() -> Self {
        Self::with_settings(MemorySettings::new(), FieldMode::Simple)
    }

    pub fn with_settings(settings: MemorySettings, mode: FieldMode) -> Self {
        let settings = Rc::new(settings);
        let bookmarks = Rc::new(MemoryBookmarks::new());
        let engines = Rc::new(
            MemorySearchEngines::new(EngineId::new(DEFAULT_ENGINE))
                .with_keyword("wp", EngineId::new("wikipedia")),
        );
        let history = Rc::new(MemoryHistory::from_urls([
            "https://example.com/",
            "https://www.rust-lang.org/",
            "https://docs.rs/egui",
        ]));
        let deps = FieldDeps {
            settings: settings.clone(),
            bookmarks: bookmarks.clone(),
            engines: engines.clone(),
            suggestions: history.clone(),
        };
        let bus = Bus::new();
        let field = AddressField::new(deps, bus.evt_tx.clone(), mode);
        Self {
            settings,
            bookmarks,
            engines,
            history,
            bus,
            field,
        }
    }

    pub fn bind(&mut self, page: &Rc<MemoryPage>) {
        self.field.set_page(Some(page.clone()));
    }

    pub fn events(&self) -> Vec<FieldEvent> {
        self.bus.drain()
    }

    pub fn type_text(&mut self, text: &str) {
        self.field.on_text_input(text);
    }
}

pub fn page(id: u64, url: &str, title: &str) -> Rc<MemoryPage> {
    Rc::new(MemoryPage::new(id, url, title))
}
