//! Turns submitted address text into exactly one [`SubmissionOutcome`].
//!
//! Order of precedence:
//! 1. bookmark keyword or title (exact match on the trimmed text)
//! 2. URL-like text, normalized to an absolute URL
//! 3. search, against the engine named by a leading keyword token or the
//!    default engine
//!
//! Everything here is synchronous and in-memory; collaborators must not block.

use crate::collaborators::{BookmarkStore, SearchEngines};
use crate::scheme::{InputClass, classify, normalize_url};
use core_types::{EngineId, OpenHint, SubmissionOutcome};

pub struct InputInterpreter<'a> {
    bookmarks: &'a dyn BookmarkStore,
    engines: &'a dyn SearchEngines,
}

impl<'a> InputInterpreter<'a> {
    pub fn new(bookmarks: &'a dyn BookmarkStore, engines: &'a dyn SearchEngines) -> Self {
        Self { bookmarks, engines }
    }

    /// Classify `text`. Blank text yields `None`; anything else yields one outcome.
    pub fn interpret(&self, text: &str, hint: OpenHint) -> Option<SubmissionOutcome> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        if let Some(bookmark) = self.bookmarks.find_by_keyword_or_title(text) {
            log::debug!(
                target: "address_field.interpreter",
                "{text:?} opens bookmark {}",
                bookmark.id
            );
            return Some(SubmissionOutcome::OpenBookmark { bookmark, hint });
        }

        if classify(text) == InputClass::LooksLikeUrl {
            let url = normalize_url(text);
            log::debug!(target: "address_field.interpreter", "{text:?} navigates to {url}");
            return Some(SubmissionOutcome::Navigate { url, hint });
        }

        let (engine, query) = match self.split_engine_keyword(text) {
            Some((engine, query)) => (engine, query),
            None => (self.engines.default_engine(), text),
        };
        log::debug!(target: "address_field.interpreter", "{text:?} searches {engine}");
        Some(SubmissionOutcome::Search {
            query: query.to_string(),
            engine,
            hint,
        })
    }

    /// Leading `keyword rest` where `keyword` names a registered engine and
    /// `rest` is non-blank. A bare keyword is searched for literally.
    fn split_engine_keyword<'t>(&self, text: &'t str) -> Option<(EngineId, &'t str)> {
        let (token, rest) = text.split_once(char::is_whitespace)?;
        let rest = rest.trim_start();
        if rest.is_empty() {
            return None;
        }
        let engine = self.engines.resolve_keyword(token)?;
        Some((engine, rest))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryBookmarks, MemorySearchEngines};

    fn engines() -> MemorySearchEngines {
        MemorySearchEngines::new(EngineId::new("duckduckgo"))
            .with_keyword("w", EngineId::new("wikipedia"))
            .with_keyword("example.com", EngineId::new("odd"))
    }

    #[test]
    fn blank_text_produces_nothing() {
        let bookmarks = MemoryBookmarks::new();
        let engines = engines();
        let interpreter = InputInterpreter::new(&bookmarks, &engines);
        for hint in [OpenHint::CurrentTab, OpenHint::NewWindow] {
            assert_eq!(interpreter.interpret("", hint), None);
            assert_eq!(interpreter.interpret("   ", hint), None);
        }
    }

    #[test]
    fn host_text_navigates_with_http_prefix() {
        let bookmarks = MemoryBookmarks::new();
        let engines = engines();
        let interpreter = InputInterpreter::new(&bookmarks, &engines);
        assert_eq!(
            interpreter.interpret("  example.com ", OpenHint::NewTab),
            Some(SubmissionOutcome::Navigate {
                url: "http://example.com".into(),
                hint: OpenHint::NewTab,
            })
        );
    }

    #[test]
    fn bookmark_keyword_beats_url_shape() {
        let bookmarks = MemoryBookmarks::new();
        let gh = bookmarks.add("https://github.com", "GitHub", Some("gh.io"));
        let engines = engines();
        let interpreter = InputInterpreter::new(&bookmarks, &engines);
        assert_eq!(
            interpreter.interpret("gh.io", OpenHint::CurrentTab),
            Some(SubmissionOutcome::OpenBookmark {
                bookmark: gh,
                hint: OpenHint::CurrentTab,
            })
        );
    }

    #[test]
    fn engine_keyword_is_consumed() {
        let bookmarks = MemoryBookmarks::new();
        let engines = engines();
        let interpreter = InputInterpreter::new(&bookmarks, &engines);
        assert_eq!(
            interpreter.interpret("w  rust language", OpenHint::CurrentTab),
            Some(SubmissionOutcome::Search {
                query: "rust language".into(),
                engine: EngineId::new("wikipedia"),
                hint: OpenHint::CurrentTab,
            })
        );
    }

    #[test]
    fn unknown_or_bare_keyword_uses_default_engine() {
        let bookmarks = MemoryBookmarks::new();
        let engines = engines();
        let interpreter = InputInterpreter::new(&bookmarks, &engines);
        let expect = |query: &str| {
            Some(SubmissionOutcome::Search {
                query: query.into(),
                engine: EngineId::new("duckduckgo"),
                hint: OpenHint::CurrentTab,
            })
        };
        assert_eq!(interpreter.interpret("q rust", OpenHint::CurrentTab), expect("q rust"));
        assert_eq!(interpreter.interpret("w", OpenHint::CurrentTab), expect("w"));
    }

    #[test]
    fn keyword_token_may_look_like_a_host() {
        let bookmarks = MemoryBookmarks::new();
        let engines = engines();
        let interpreter = InputInterpreter::new(&bookmarks, &engines);
        assert_eq!(
            interpreter.interpret("example.com cats", OpenHint::CurrentTab),
            Some(SubmissionOutcome::Search {
                query: "cats".into(),
                engine: EngineId::new("odd"),
                hint: OpenHint::CurrentTab,
            })
        );
    }
}
