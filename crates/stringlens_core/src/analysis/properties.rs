//! Property analyzer.
//!
//! # Responsibility
//! - Compute the full `PropertySet` for arbitrary Unicode input.
//!
//! # Invariants
//! - Palindrome cleaning keeps letters (`\p{L}`) and numbers (`\p{N}`)
//!   only; combining marks are dropped.
//! - Unique-character and frequency cleaning drop whitespace only, so
//!   punctuation stays significant there. The two rules are intentionally
//!   different.
//! - Whitespace is `char::is_whitespace` plus the information separators
//!   U+001C..=U+001F, one definition shared by trimming, word splitting and
//!   frequency cleaning.
//! - `length` trims outer whitespace only.
//! - The hash covers the raw, un-stripped, un-cased text.

use crate::analysis::identity::content_hash;
use crate::model::record::PropertySet;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

static ALNUM_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\p{L}\p{N}]+").expect("valid alphanumeric regex"));

/// Analyzes `text` and returns its derived properties.
///
/// Never fails; the empty string yields length 0, a palindrome, zero
/// unique characters, zero words and an empty frequency map.
pub fn analyze(text: &str) -> PropertySet {
    let character_frequency_map = character_frequency_map(text);

    PropertySet {
        length: saturating_u32(text.trim_matches(is_space).chars().count()),
        is_palindrome: is_palindrome(text),
        unique_characters: saturating_u32(character_frequency_map.len()),
        word_count: word_count(text),
        sha256_hash: content_hash(text),
        character_frequency_map,
    }
}

/// Returns whether `text` reads the same both ways, ignoring case and
/// anything that is not a letter or number.
pub fn is_palindrome(text: &str) -> bool {
    let cleaned = ALNUM_RUN_RE
        .find_iter(text)
        .flat_map(|run| run.as_str().chars())
        .flat_map(char::to_lowercase)
        .collect::<Vec<_>>();
    cleaned.iter().eq(cleaned.iter().rev())
}

/// Counts whitespace-delimited tokens.
pub fn word_count(text: &str) -> u32 {
    saturating_u32(text.split(is_space).filter(|token| !token.is_empty()).count())
}

/// Counts distinct case-folded, non-whitespace characters.
pub fn unique_characters(text: &str) -> u32 {
    saturating_u32(character_frequency_map(text).len())
}

/// Builds the case-folded occurrence map, excluding whitespace.
pub fn character_frequency_map(text: &str) -> BTreeMap<char, u32> {
    let mut frequencies = BTreeMap::new();
    for c in frequency_chars(text) {
        let count = frequencies.entry(c).or_insert(0u32);
        *count = count.saturating_add(1);
    }
    frequencies
}

/// Applies the frequency-map cleaning rule: drop whitespace, then lowercase.
///
/// Shared with filter evaluation so `contains_character` folds its argument
/// exactly like the stored map keys were folded.
pub(crate) fn frequency_chars(text: &str) -> impl Iterator<Item = char> + '_ {
    text.chars()
        .filter(|c| !is_space(*c))
        .flat_map(char::to_lowercase)
}

/// Whitespace test used by every analyzer rule.
pub(crate) fn is_space(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

fn saturating_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::{
        analyze, character_frequency_map, is_palindrome, is_space, unique_characters, word_count,
    };
    use std::collections::BTreeMap;

    #[test]
    fn empty_string_has_well_defined_properties() {
        let properties = analyze("");
        assert_eq!(properties.length, 0);
        assert!(properties.is_palindrome);
        assert_eq!(properties.unique_characters, 0);
        assert_eq!(properties.word_count, 0);
        assert!(properties.character_frequency_map.is_empty());
        assert_eq!(
            properties.sha256_hash,
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn hello_world_properties() {
        let properties = analyze("hello world");
        assert_eq!(properties.length, 11);
        assert!(!properties.is_palindrome);
        assert_eq!(properties.word_count, 2);
        // h e l o w r d
        assert_eq!(properties.unique_characters, 7);
        assert_eq!(properties.character_frequency_map.get(&'l'), Some(&3));
        assert_eq!(properties.character_frequency_map.get(&' '), None);
    }

    #[test]
    fn analysis_is_deterministic() {
        assert_eq!(analyze("Was it a car?"), analyze("Was it a car?"));
    }

    #[test]
    fn palindrome_ignores_case_spaces_and_punctuation() {
        assert!(is_palindrome("level"));
        assert!(is_palindrome("A man, a plan, a canal: Panama"));
        assert!(is_palindrome("Ésé"));
        assert!(!is_palindrome("hello world"));
        assert!(is_palindrome("!!!"));
    }

    #[test]
    fn frequency_map_excludes_whitespace_but_keeps_punctuation() {
        let expected = BTreeMap::from([('a', 2), ('b', 2), ('c', 2)]);
        assert_eq!(character_frequency_map("aabbcc"), expected);
        assert_eq!(character_frequency_map("a a"), BTreeMap::from([('a', 2)]));
        assert_eq!(
            character_frequency_map("Hi, hi!"),
            BTreeMap::from([('h', 2), ('i', 2), (',', 1), ('!', 1)])
        );
    }

    #[test]
    fn unique_characters_fold_case_and_count_punctuation() {
        assert_eq!(unique_characters("AaBb"), 2);
        assert_eq!(unique_characters("a.b.\t"), 3);
        assert_eq!(unique_characters("ÀàÉé"), 2);
    }

    #[test]
    fn length_trims_only_outer_whitespace() {
        assert_eq!(analyze("  a b  ").length, 3);
        assert_eq!(analyze("\u{3000}日本\u{3000}").length, 2);
    }

    #[test]
    fn word_count_splits_on_whitespace_runs() {
        assert_eq!(word_count("hello world"), 2);
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("   "), 0);
        assert_eq!(word_count(" one\t\ntwo   three "), 3);
    }

    #[test]
    fn combining_marks_are_not_alphanumeric() {
        // KA followed by the dependent vowel sign AA (a spacing mark).
        assert!(is_palindrome("\u{915}\u{93e}"));
        assert!(analyze("\u{915}\u{93e}").is_palindrome);
        assert!(is_palindrome("e\u{301}e"));
        assert!(is_palindrome("١٢١"));
        assert!(!is_palindrome("\u{915}\u{916}"));
    }

    #[test]
    fn information_separators_count_as_whitespace() {
        let properties = analyze("a\u{1c}b");
        assert_eq!(properties.word_count, 2);
        assert_eq!(properties.unique_characters, 2);
        assert_eq!(properties.character_frequency_map.get(&'\u{1c}'), None);

        assert_eq!(analyze("\u{1f}a\u{1e}").length, 1);
        assert_eq!(word_count("\u{1d}\u{1f}"), 0);
        assert!(is_space('\u{1f}'));
        assert!(!is_space('\u{1b}'));
    }

    #[test]
    fn hash_covers_raw_text() {
        assert_ne!(analyze("abc").sha256_hash, analyze(" abc ").sha256_hash);
        assert_eq!(analyze("abc").length, analyze(" abc ").length);
    }
}
