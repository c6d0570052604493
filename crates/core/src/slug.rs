//! URL-safe slug derivation for game titles.
//!
//! A slug is assigned once, when the game is created, and never changes
//! afterwards. Collisions are reported to the caller rather than resolved by
//! appending suffixes.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Separator inserted in place of every run of non-alphanumeric characters.
pub const SLUG_SEPARATOR: char = '-';

/// Derive a slug from a title.
///
/// - Decomposes the input (NFKD) and drops combining marks, so `é` -> `e`.
/// - Lowercases ASCII letters; keeps ASCII digits.
/// - Collapses every run of other characters into a single `-`.
/// - Trims leading and trailing separators.
///
/// Returns an empty string if the title contains no ASCII alphanumerics.
///
/// # Examples
///
/// ```
/// use playhub_core::slug::slugify;
///
/// assert_eq!(slugify("My Game!!"), "my-game");
/// assert_eq!(slugify("  Café   Racer 2 "), "cafe-racer-2");
/// assert_eq!(slugify("!!!"), "");
/// ```
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_separator = false;

    for c in title.nfkd().filter(|c| !is_combining_mark(*c)) {
        if c.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push(SLUG_SEPARATOR);
            }
            pending_separator = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_separator = true;
        }
    }

    slug
}

/// Whether `candidate` is already in canonical slug form.
///
/// Used to reject path parameters that could never match a stored slug
/// before they reach the database or the blob store.
pub fn is_valid_slug(candidate: &str) -> bool {
    !candidate.is_empty() && slugify(candidate) == candidate
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn punctuation_is_collapsed_and_trimmed() {
        assert_eq!(slugify("My Game!!"), "my-game");
        assert_eq!(slugify("--Hello,   World--"), "hello-world");
    }

    #[test]
    fn digits_are_kept() {
        assert_eq!(slugify("Tetris 99"), "tetris-99");
    }

    #[test]
    fn accents_are_stripped() {
        assert_eq!(slugify("Pokémon Café"), "pokemon-cafe");
    }

    #[test]
    fn non_latin_only_title_yields_empty_slug() {
        assert_eq!(slugify("ゲーム"), "");
    }

    #[test]
    fn valid_slug_check() {
        assert!(is_valid_slug("my-game"));
        assert!(!is_valid_slug("My-Game"));
        assert!(!is_valid_slug("my--game"));
        assert!(!is_valid_slug("../etc"));
        assert!(!is_valid_slug(""));
    }

    proptest! {
        #[test]
        fn slug_is_canonical(title in "\\PC{0,80}") {
            let slug = slugify(&title);
            prop_assert!(slug
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == SLUG_SEPARATOR));
            prop_assert!(!slug.starts_with(SLUG_SEPARATOR));
            prop_assert!(!slug.ends_with(SLUG_SEPARATOR));
            prop_assert!(!slug.contains("--"));
        }

        #[test]
        fn slugify_is_idempotent(title in "\\PC{0,80}") {
            let once = slugify(&title);
            prop_assert_eq!(slugify(&once), once.clone());
        }
    }
}
