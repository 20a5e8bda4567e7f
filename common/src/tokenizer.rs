use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Tags are matched first so letters inside them never surface as words.
    static ref RE: Regex = Regex::new(r"<[^>]*>?|([A-Za-z]+)").expect("valid regex");
}

/// Lazily yield the words of an HTML body: maximal runs of ASCII letters
/// outside of `<...>` tags, in document order and with original case.
pub fn words(html: &str) -> impl Iterator<Item = &str> + '_ {
    RE.captures_iter(html).filter_map(|caps| caps.get(1)).map(|m| m.as_str())
}

/// Case-fold a word for indexing and matching.
pub fn normalize_word(word: &str) -> String {
    word.to_lowercase()
}
