//! Line-driven demo of the address field.
//!
//! Every input line is typed into the field and submitted; the resulting
//! outcome is printed. Lines starting with `:` are commands:
//!
//! - `:open <url> [title]` binds a page showing `<url>`
//! - `:close` closes the bound page
//! - `:bookmark` clicks the bookmark icon
//! - `:toggle <Option>` flips an `AddressField/<Option>` setting
//! - `:state` prints text and decoration state
//!
//! `ADDRESSBAR_SETTINGS` may name a TOML file that seeds the settings.

use address_field::memory::{MemoryBookmarks, MemoryHistory, MemoryPage, MemorySearchEngines};
use address_field::settings::read_bool;
use address_field::{
    AddressField, DecorationKind, FieldDeps, FieldMode, FieldOption, MemorySettings,
};
use bus::{Bus, FieldEvent};
use core_types::EngineId;
use egui::{Key, Modifiers, PointerButton};
use mimalloc::MiMalloc;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::rc::Rc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const SETTINGS_ENV: &str = "ADDRESSBAR_SETTINGS";

fn load_settings() -> MemorySettings {
    let Ok(path) = std::env::var(SETTINGS_ENV) else {
        return MemorySettings::new();
    };
    match MemorySettings::load(Path::new(&path)) {
        Ok(settings) => {
            log::info!(target: "addressbar", "settings loaded from {path}");
            settings
        }
        Err(err) => {
            log::warn!(target: "addressbar", "ignoring {SETTINGS_ENV}={path}: {err}");
            MemorySettings::new()
        }
    }
}

struct Demo {
    settings: Rc<MemorySettings>,
    history: Rc<MemoryHistory>,
    page: Option<Rc<MemoryPage>>,
    next_page_id: u64,
    bus: Bus,
    field: AddressField,
}

impl Demo {
    fn new() -> Self {
        let settings = Rc::new(load_settings());
        let bookmarks = Rc::new(MemoryBookmarks::new());
        bookmarks.add("https://github.com/", "GitHub", Some("gh"));
        bookmarks.add("https://doc.rust-lang.org/std/", "Rust std", Some("std"));
        let engines = Rc::new(
            MemorySearchEngines::new(EngineId::new("duckduckgo"))
                .with_keyword("wp", EngineId::new("wikipedia"))
                .with_keyword("crates", EngineId::new("crates.io")),
        );
        let history = Rc::new(MemoryHistory::from_urls([
            "https://www.rust-lang.org/",
            "https://docs.rs/",
            "https://crates.io/",
        ]));

        let bus = Bus::new();
        let deps = FieldDeps {
            settings: settings.clone(),
            bookmarks,
            engines,
            suggestions: history.clone(),
        };
        let field = AddressField::new(deps, bus.evt_tx.clone(), FieldMode::Full);
        Self {
            settings,
            history,
            page: None,
            next_page_id: 1,
            bus,
            field,
        }
    }

    fn run_command(&mut self, command: &str, out: &mut impl Write) -> io::Result<()> {
        let mut parts = command.splitn(3, ' ');
        match (parts.next(), parts.next(), parts.next()) {
            (Some("open"), Some(url), title) => {
                let page = Rc::new(MemoryPage::new(self.next_page_id, url, title.unwrap_or(url)));
                self.next_page_id += 1;
                self.history.visit(url);
                self.field.set_page(Some(page.clone()));
                self.page = Some(page);
            }
            (Some("close"), None, None) => match self.page.take() {
                Some(page) => page.close(),
                None => writeln!(out, "no page")?,
            },
            (Some("bookmark"), None, None) => {
                let response = self
                    .field
                    .on_decoration_press(DecorationKind::Bookmark, PointerButton::Primary);
                writeln!(out, "{response:?}")?;
            }
            (Some("toggle"), Some(name), None) => {
                match FieldOption::from_key(&format!("AddressField/{name}")) {
                    Some(option) => {
                        let enabled = read_bool(self.settings.as_ref(), option);
                        self.settings.set_option(option, !enabled);
                    }
                    None => writeln!(out, "unknown option {name}")?,
                }
            }
            (Some("state"), None, None) => self.print_state(out)?,
            _ => writeln!(out, "unknown command :{command}")?,
        }
        Ok(())
    }

    fn submit_line(&mut self, line: &str) {
        self.field.set_text("");
        self.field.on_text_input(line);
        self.field.on_key_press(Key::Enter, Modifiers::NONE);
    }

    fn print_state(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "text: {:?}", self.field.text())?;
        let margins = self.field.decorations().text_margins();
        writeln!(out, "margins: left {} right {}", margins.left, margins.right)?;
        for kind in DecorationKind::ALL {
            match self.field.decorations().slot(kind) {
                Some(slot) => writeln!(
                    out,
                    "{kind:?}: icon {} {:?} tooltip {:?} at {:?}",
                    slot.look.icon.name(),
                    slot.look.icon_mode,
                    slot.look.tooltip,
                    slot.rect.map(|r| r.min)
                )?,
                None => writeln!(out, "{kind:?}: absent")?,
            }
        }
        Ok(())
    }

    fn pump(&mut self, out: &mut impl Write) -> io::Result<()> {
        self.field.process_notifications();
        self.field.run_deferred();
        for event in self.bus.drain() {
            match event {
                FieldEvent::Submitted(outcome) => writeln!(out, "{outcome:?}")?,
                FieldEvent::FocusPage => writeln!(out, "focus page")?,
            }
        }
        Ok(())
    }
}

fn main() -> io::Result<()> {
    env_logger::init();

    let mut demo = Demo::new();
    let stdin = io::stdin();
    let mut out = io::stdout().lock();

    for line in stdin.lock().lines() {
        let line = line?;
        match line.strip_prefix(':') {
            Some(command) => demo.run_command(command.trim(), &mut out)?,
            None => demo.submit_line(&line),
        }
        demo.pump(&mut out)?;
    }
    Ok(())
}
