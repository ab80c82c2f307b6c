#![no_main]

use address_field::InputInterpreter;
use address_field::memory::{MemoryBookmarks, MemorySearchEngines};
use core_types::{EngineId, OpenHint};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let bookmarks = MemoryBookmarks::new();
    bookmarks.add("https://github.com", "GitHub", Some("gh"));
    let engines = MemorySearchEngines::new(EngineId::new("default"))
        .with_keyword("wp", EngineId::new("wikipedia"));
    let interpreter = InputInterpreter::new(&bookmarks, &engines);

    let outcome = interpreter.interpret(text, OpenHint::NewTab);
    assert_eq!(outcome.is_none(), text.trim().is_empty(), "{text:?}");
    if let Some(outcome) = outcome {
        assert_eq!(outcome.hint(), OpenHint::NewTab);
    }
});
