//! Coarse URL-vs-search heuristic.
//!
//! This is not a URL validator. It only decides which of two routes typed
//! text should take, and it errs towards "URL" for single tokens that have a
//! host-like shape. Text with internal whitespace is never a URL.

use url::Url;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputClass {
    LooksLikeUrl,
    LooksLikeSearch,
}

/// Schemes accepted in the `scheme:rest` form without `//`.
pub const KNOWN_SCHEMES: &[&str] = &[
    "about",
    "data",
    "file",
    "ftp",
    "http",
    "https",
    "javascript",
    "mailto",
    "view-source",
];

/// Pseudo-scheme of script-originated URLs; never synced into the field.
pub const SCRIPT_SCHEME: &str = "javascript";

/// Scheme of internal pages that cannot be bookmarked.
pub const INTERNAL_SCHEME: &str = "about";

pub fn classify(text: &str) -> InputClass {
    let text = text.trim();
    let class = if text.is_empty() || text.contains(char::is_whitespace) {
        InputClass::LooksLikeSearch
    } else if explicit_scheme(text).is_some() || looks_like_host(text) {
        InputClass::LooksLikeUrl
    } else {
        InputClass::LooksLikeSearch
    };
    log::trace!(target: "address_field.scheme", "classify {text:?} -> {class:?}");
    class
}

/// The leading scheme of `text` if it names one explicitly: either any
/// syntactically valid scheme followed by `//`, or a known scheme followed
/// by `:`.
pub fn explicit_scheme(text: &str) -> Option<&str> {
    let (scheme, rest) = text.split_once(':')?;
    let mut chars = scheme.chars();
    let first = chars.next()?;
    if !first.is_ascii_alphabetic()
        || !chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    {
        return None;
    }
    let known = KNOWN_SCHEMES
        .iter()
        .any(|known| known.eq_ignore_ascii_case(scheme));
    (known || rest.starts_with("//")).then_some(scheme)
}

/// Absolute form of URL-like text: unchanged if it carries a scheme,
/// otherwise prefixed with `http://`.
///
/// ```
/// use address_field::scheme::normalize_url;
///
/// assert_eq!(normalize_url("example.com"), "http://example.com");
/// assert_eq!(normalize_url("https://example.com"), "https://example.com");
/// ```
pub fn normalize_url(text: &str) -> String {
    let text = text.trim();
    if explicit_scheme(text).is_some() {
        text.to_string()
    } else {
        format!("http://{text}")
    }
}

/// Form used to compare page URLs against stored bookmarks.
///
/// Text that does not parse is returned trimmed but otherwise untouched.
pub fn canonical_url(text: &str) -> String {
    let text = text.trim();
    Url::parse(text).map_or_else(|_| text.to_string(), String::from)
}

/// Lowercased scheme of an absolute URL.
pub fn url_scheme(text: &str) -> Option<String> {
    Url::parse(text.trim()).ok().map(|url| url.scheme().to_string())
}

/// `text` with any password removed from its userinfo.
pub fn without_password(text: &str) -> String {
    match Url::parse(text.trim()) {
        Ok(mut url) => {
            // Fails only for URLs that cannot carry credentials at all.
            let _ = url.set_password(None);
            url.into()
        }
        Err(_) => text.trim().to_string(),
    }
}

fn looks_like_host(text: &str) -> bool {
    let authority = text.split(['/', '?', '#']).next().unwrap_or_default();
    let host_port = authority.rsplit('@').next().unwrap_or_default();

    if host_port.starts_with('[') {
        // Bracketed IPv6 literal.
        return host_port.contains(']');
    }

    let host = match host_port.rsplit_once(':') {
        Some((host, port)) if !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()) => host,
        Some(_) => return false,
        None => host_port,
    };

    if host.eq_ignore_ascii_case("localhost") {
        return true;
    }

    // A single trailing dot marks a fully qualified name.
    let host = host.strip_suffix('.').unwrap_or(host);
    let labels: Vec<&str> = host.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|label| !is_host_label(label)) {
        return false;
    }

    let numeric = |label: &&str| label.bytes().all(|b| b.is_ascii_digit());
    // "3.14" or "v1.2" read as text; four numeric labels read as IPv4.
    match labels.last() {
        Some(tld) if numeric(tld) => labels.len() == 4 && labels.iter().all(numeric),
        _ => true,
    }
}

fn is_host_label(label: &str) -> bool {
    !label.is_empty()
        && !label.starts_with('-')
        && !label.ends_with('-')
        && label.chars().all(|c| c.is_alphanumeric() || c == '-' || c == '_')
}
