#![no_main]

use address_field::scheme::{canonical_url, normalize_url};
use address_field::{InputClass, classify};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let class = classify(text);
    if text.trim().contains(char::is_whitespace) {
        assert_eq!(class, InputClass::LooksLikeSearch, "{text:?}");
    }

    if class == InputClass::LooksLikeUrl {
        let url = normalize_url(text);
        assert!(!url.is_empty());
        // Normalizing twice is stable.
        assert_eq!(normalize_url(&url), url);
        let _ = canonical_url(&url);
    }
});
