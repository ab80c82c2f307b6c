//! Live prefix filter over an external, already ordered suggestion list.
//!
//! The filter keeps only the prefix. Every call to [`CompletionFilter::matches`]
//! starts a fresh pass over the source; nothing is cached between prefixes.
//! A [`Matches`] iterator borrows the filter, so it cannot outlive a
//! subsequent `set_prefix`.

use crate::collaborators::SuggestionSource;
use input_core::prefix_match_len;
use std::rc::Rc;

pub struct CompletionFilter {
    source: Rc<dyn SuggestionSource>,
    prefix: String,
}

impl CompletionFilter {
    pub fn new(source: Rc<dyn SuggestionSource>) -> Self {
        Self {
            source,
            prefix: String::new(),
        }
    }

    /// Replace the active prefix. Taken verbatim: no trimming, no case folding.
    pub fn set_prefix(&mut self, text: &str) {
        if self.prefix != text {
            log::trace!(target: "address_field.completion", "prefix {:?} -> {text:?}", self.prefix);
            self.prefix.clear();
            self.prefix.push_str(text);
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Lazy pass over the source in its own order. Call again to restart.
    pub fn matches(&self) -> Matches<'_> {
        Matches {
            source: self.source.as_ref(),
            prefix: &self.prefix,
            index: 0,
        }
    }

    /// Remainder of the first candidate that extends the prefix, for the
    /// inline overlay. An empty prefix never completes.
    pub fn inline_suffix(&self) -> Option<String> {
        if self.prefix.is_empty() {
            return None;
        }
        self.matches().find_map(|candidate| {
            let matched = prefix_match_len(&candidate, &self.prefix)?;
            (matched < candidate.len()).then(|| candidate[matched..].to_string())
        })
    }
}

pub struct Matches<'a> {
    source: &'a dyn SuggestionSource,
    prefix: &'a str,
    index: usize,
}

impl Iterator for Matches<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        while self.index < self.source.len() {
            let index = self.index;
            self.index += 1;
            let Some(candidate) = self.source.display_text(index) else {
                continue;
            };
            if prefix_match_len(&candidate, self.prefix).is_some() {
                return Some(candidate);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryHistory;

    fn filter() -> (Rc<MemoryHistory>, CompletionFilter) {
        let history = Rc::new(MemoryHistory::from_urls([
            "Example.com/news",
            "abc.org",
            "ab.example",
            "a.test",
            " spaced.example",
        ]));
        let filter = CompletionFilter::new(history.clone());
        (history, filter)
    }

    #[test]
    fn keeps_source_order_and_ignores_case() {
        let (_history, mut filter) = filter();
        filter.set_prefix("EX");
        assert_eq!(filter.matches().collect::<Vec<_>>(), vec!["Example.com/news"]);
    }

    #[test]
    fn shorter_prefix_starts_a_fresh_pass() {
        let (_history, mut filter) = filter();
        filter.set_prefix("ab");
        assert_eq!(filter.matches().count(), 2);

        filter.set_prefix("a");
        assert_eq!(
            filter.matches().collect::<Vec<_>>(),
            vec!["abc.org", "ab.example", "a.test"]
        );
    }

    #[test]
    fn whitespace_is_part_of_the_prefix() {
        let (_history, mut filter) = filter();
        filter.set_prefix(" sp");
        assert_eq!(filter.matches().collect::<Vec<_>>(), vec![" spaced.example"]);
        filter.set_prefix("sp");
        assert_eq!(filter.matches().next(), None);
    }

    #[test]
    fn pass_is_restartable_and_sees_source_updates() {
        let (history, mut filter) = filter();
        filter.set_prefix("a.");
        let first: Vec<_> = filter.matches().collect();
        assert_eq!(first, filter.matches().collect::<Vec<_>>());

        history.visit("a.new");
        assert_eq!(filter.matches().next().as_deref(), Some("a.new"));
    }

    #[test]
    fn inline_suffix_skips_exact_matches() {
        let (_history, mut filter) = filter();
        filter.set_prefix("a.test");
        assert_eq!(filter.inline_suffix(), None);
        filter.set_prefix("exa");
        assert_eq!(filter.inline_suffix().as_deref(), Some("mple.com/news"));
        filter.set_prefix("");
        assert_eq!(filter.inline_suffix(), None);
    }
}
