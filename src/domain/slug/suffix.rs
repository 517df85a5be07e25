// src/domain/slug/suffix.rs
//! Default numeric suffix algorithm shared by reserved-word validation and
//! uniqueness resolution.
use std::collections::BTreeSet;

use crate::domain::slug::value_objects::{ExistingSlugSet, LocaleMap, LocaleSlugMap};

/// Numeric suffix carried by `existing` relative to `candidate`.
///
/// Returns `None` when `existing` neither equals the candidate nor extends it
/// with the separator. The remainder after the prefix is read up to the first
/// non-digit, so `post-abc` counts as 0 and `post-3-draft` as 3.
#[must_use]
pub fn parse_suffix(existing: &str, candidate: &str, separator: &str) -> Option<u64> {
    if existing == candidate {
        return Some(0);
    }

    let remainder = existing
        .strip_prefix(candidate)
        .and_then(|rest| rest.strip_prefix(separator))?;

    let value = remainder
        .chars()
        .take_while(char::is_ascii_digit)
        .filter_map(|c| c.to_digit(10))
        .fold(0u64, |acc, digit| {
            acc.saturating_mul(10).saturating_add(u64::from(digit))
        });
    Some(value)
}

/// Highest existing suffix plus one, or `None` when nothing collides.
#[must_use]
pub fn next_suffix(candidate: &str, separator: &str, existing: &BTreeSet<String>) -> Option<u64> {
    existing
        .iter()
        .filter_map(|slug| parse_suffix(slug, candidate, separator))
        .max()
        .map(|highest| highest.saturating_add(1))
}

/// Per-locale suffixes for every locale with at least one collision.
#[must_use]
pub fn numeric_suffixes(
    slugs: &LocaleSlugMap,
    separator: &str,
    existing: &ExistingSlugSet,
) -> LocaleMap<String> {
    slugs
        .iter()
        .filter_map(|(locale, candidate)| {
            let taken = existing.get(locale)?;
            next_suffix(candidate, separator, taken).map(|n| (locale.clone(), n.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::slug::value_objects::Locale;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn suffix_is_max_plus_one_not_count() {
        let existing = set(&["post", "post-1", "post-3"]);
        assert_eq!(next_suffix("post", "-", &existing), Some(4));
    }

    #[test]
    fn non_numeric_remainders_count_as_zero() {
        assert_eq!(parse_suffix("post-abc", "post", "-"), Some(0));
        assert_eq!(parse_suffix("post-3-draft", "post", "-"), Some(3));
        assert_eq!(next_suffix("post", "-", &set(&["post-abc"])), Some(1));
    }

    #[test]
    fn unrelated_slugs_do_not_count() {
        assert_eq!(parse_suffix("poster", "post", "-"), None);
        assert_eq!(next_suffix("post", "-", &set(&["poster"])), None);
        assert_eq!(next_suffix("post", "-", &BTreeSet::new()), None);
    }

    #[test]
    fn honours_multi_character_separators() {
        assert_eq!(parse_suffix("post__7", "post", "__"), Some(7));
        assert_eq!(parse_suffix("post-7", "post", "__"), None);
    }

    #[test]
    fn only_colliding_locales_receive_suffixes() {
        let en = Locale::new("en").unwrap();
        let fr = Locale::new("fr").unwrap();
        let slugs = LocaleSlugMap::new()
            .with(en.clone(), "hello-world")
            .with(fr.clone(), "bonjour-monde");
        let existing = ExistingSlugSet::single(en.clone(), set(&["hello-world"]));

        let suffixes = numeric_suffixes(&slugs, "-", &existing);

        assert_eq!(suffixes.get(&en).map(String::as_str), Some("1"));
        assert!(!suffixes.contains_key(&fr));
    }
}
