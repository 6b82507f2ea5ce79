// crates/geocoder-core/src/text.rs
//! Text helpers shared by the cache key derivation and the offline provider.

use url::form_urlencoded;

/// Separator used by [`slugify`].
pub const SLUG_SEPARATOR: char = '-';

/// Unicode-aware, accent-insensitive, lower-cased key.
///
/// ```rust
/// use geocoder_core::text::fold_key;
///
/// assert_eq!(fold_key("  Wien, Österreich "), "wien, osterreich");
/// ```
pub fn fold_key(s: &str) -> String {
    deunicode::deunicode(s.trim()).to_lowercase()
}

/// Compares two strings for equality after [`fold_key`].
pub fn equals_folded(a: &str, b: &str) -> bool {
    fold_key(a) == fold_key(b)
}

/// Form-style URL encoding of the UTF-8 bytes of `s`.
///
/// `A-Z a-z 0-9 - _ .` pass through, a space becomes `+`, every other byte
/// becomes `%XX` with upper-case hex digits.
pub fn url_encode(s: &str) -> String {
    // form_urlencoded leaves '*' alone; classic form encoding escapes it.
    form_urlencoded::byte_serialize(s.as_bytes())
        .collect::<String>()
        .replace('*', "%2A")
}

/// Reduces arbitrary text to a `-` separated slug of letters and digits.
///
/// Input is transliterated to ASCII and lower-cased first. Underscores count
/// as separators, every character that is neither alphanumeric, whitespace
/// nor a separator is dropped, and runs of separators and whitespace collapse
/// into a single `-`. Leading and trailing separators are trimmed.
///
/// ```rust
/// use geocoder_core::text::slugify;
///
/// assert_eq!(slugify("Hello__World  & Friends!"), "hello-world-friends");
/// assert_eq!(slugify("_"), "");
/// ```
pub fn slugify(s: &str) -> String {
    let ascii = deunicode::deunicode(s).to_lowercase();
    let mut out = String::with_capacity(ascii.len());
    let mut pending_separator = false;

    for ch in ascii.chars() {
        if ch == SLUG_SEPARATOR || ch == '_' || ch.is_whitespace() {
            pending_separator = true;
        } else if ch == '@' {
            push_separated(&mut out, &mut pending_separator);
            out.push_str("at");
            pending_separator = true;
        } else if ch.is_alphanumeric() {
            push_separated(&mut out, &mut pending_separator);
            out.push(ch);
        }
        // Anything else is removed without breaking the current word.
    }
    out
}

fn push_separated(out: &mut String, pending_separator: &mut bool) {
    if *pending_separator && !out.is_empty() {
        out.push(SLUG_SEPARATOR);
    }
    *pending_separator = false;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_encode_uses_plus_for_spaces_and_upper_hex() {
        assert_eq!(url_encode("a b"), "a+b");
        assert_eq!(url_encode("Ö"), "%C3%96");
        assert_eq!(url_encode("1,2*"), "1%2C2%2A");
        assert_eq!(url_encode("keep-_.me"), "keep-_.me");
    }

    #[test]
    fn slugify_drops_punctuation_without_splitting_words() {
        assert_eq!(slugify("1600+pennsylvania+ave+nw%2c"), "1600pennsylvaniaavenw2c");
        assert_eq!(slugify("--a--b--"), "a-b");
        assert_eq!(slugify("a @ b"), "a-at-b");
    }

    #[test]
    fn fold_key_is_accent_and_case_insensitive() {
        assert!(equals_folded("Zürich", "zurich"));
        assert!(!equals_folded("Zürich", "Bern"));
    }
}
