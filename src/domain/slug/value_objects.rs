// src/domain/slug/value_objects.rs
use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordKey(pub i64);

impl RecordKey {
    /// # Errors
    ///
    /// Returns [`DomainError::Validation`] unless `id` is positive.
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            Err(DomainError::Validation("record key must be positive".into()))
        } else {
            Ok(Self(id))
        }
    }
}

impl From<RecordKey> for i64 {
    fn from(value: RecordKey) -> Self {
        value.0
    }
}

/// Language or region code such as `en` or `pt-BR`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Locale(String);

impl Locale {
    /// # Errors
    ///
    /// Returns [`DomainError::Validation`] for empty or whitespace-padded codes.
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.trim().is_empty() || value.trim() != value {
            return Err(DomainError::Validation(format!(
                "locale code '{value}' must not be empty or padded"
            )));
        }
        Ok(Self(value))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Locale {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Locale> for String {
    fn from(value: Locale) -> Self {
        value.0
    }
}

pub type LocaleMap<T> = BTreeMap<Locale, T>;

/// A raw source value for one locale.
///
/// Booleans are kept distinct so that [`SourceValue::normalize`] can apply the
/// legacy `true -> 1`, `false -> 0` coercion explicitly before slugging. Other
/// non-string shapes have no variant and are rejected where they are read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceValue {
    Text(String),
    Integer(i64),
    Bool(bool),
}

impl SourceValue {
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    #[must_use]
    pub fn normalize(self) -> Self {
        match self {
            Self::Bool(flag) => Self::Integer(i64::from(flag)),
            other => other,
        }
    }

    #[must_use]
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Text(text) if text.trim().is_empty())
    }
}

impl fmt::Display for SourceValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Bool(flag) => write!(f, "{}", i64::from(*flag)),
        }
    }
}

/// Slug values keyed by locale, as stored on a sluggable attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocaleSlugMap(BTreeMap<Locale, String>);

impl LocaleSlugMap {
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn insert(&mut self, locale: Locale, slug: impl Into<String>) -> Option<String> {
        self.0.insert(locale, slug.into())
    }

    #[must_use]
    pub fn with(mut self, locale: Locale, slug: impl Into<String>) -> Self {
        self.insert(locale, slug);
        self
    }

    #[must_use]
    pub fn get(&self, locale: &Locale) -> Option<&str> {
        self.0.get(locale).map(String::as_str)
    }

    pub fn get_mut(&mut self, locale: &Locale) -> Option<&mut String> {
        self.0.get_mut(locale)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Locale, &String)> {
        self.0.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&Locale, &mut String)> {
        self.0.iter_mut()
    }

    pub fn locales(&self) -> impl Iterator<Item = &Locale> {
        self.0.keys()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when there is no locale carrying a non-blank slug.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.values().all(|slug| slug.trim().is_empty())
    }

    /// Drop every locale not contained in `recognized`, returning the removed codes.
    pub fn retain_recognized(&mut self, recognized: &[Locale]) -> Vec<Locale> {
        let stale: Vec<Locale> = self
            .0
            .keys()
            .filter(|locale| !recognized.contains(locale))
            .cloned()
            .collect();
        for locale in &stale {
            self.0.remove(locale);
        }
        stale
    }
}

impl FromIterator<(Locale, String)> for LocaleSlugMap {
    fn from_iter<I: IntoIterator<Item = (Locale, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for LocaleSlugMap {
    type Item = (Locale, String);
    type IntoIter = std::collections::btree_map::IntoIter<Locale, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl From<LocaleSlugMap> for BTreeMap<Locale, String> {
    fn from(value: LocaleSlugMap) -> Self {
        value.0
    }
}

/// Distinct slugs already present in the store, per locale, that equal a
/// candidate or extend it with `separator + suffix`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExistingSlugSet(BTreeMap<Locale, BTreeSet<String>>);

impl ExistingSlugSet {
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    #[must_use]
    pub fn single(locale: Locale, slugs: BTreeSet<String>) -> Self {
        let mut set = Self::new();
        set.extend(locale, slugs);
        set
    }

    pub fn extend(&mut self, locale: Locale, slugs: impl IntoIterator<Item = String>) {
        let entry = self.0.entry(locale).or_default();
        entry.extend(slugs);
        // an empty entry carries no collision information
        self.0.retain(|_, slugs| !slugs.is_empty());
    }

    #[must_use]
    pub fn get(&self, locale: &Locale) -> Option<&BTreeSet<String>> {
        self.0.get(locale)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Locale, &BTreeSet<String>)> {
        self.0.iter()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locale(code: &str) -> Locale {
        Locale::new(code).unwrap()
    }

    #[test]
    fn locale_rejects_padded_codes() {
        assert!(Locale::new(" en").is_err());
        assert!(Locale::new("").is_err());
        assert_eq!(locale("pt-BR").as_str(), "pt-BR");
    }

    #[test]
    fn deserialized_locales_are_validated() {
        let parsed: Locale = serde_json::from_str("\"fr\"").unwrap();
        assert_eq!(parsed, locale("fr"));

        assert!(serde_json::from_str::<Locale>("\"\"").is_err());
        assert!(serde_json::from_str::<Locale>("\" en\"").is_err());
        assert!(serde_json::from_str::<LocaleSlugMap>(r#"{ " en": "x" }"#).is_err());
    }

    #[test]
    fn retain_recognized_strips_removed_locales() {
        let mut map = LocaleSlugMap::new()
            .with(locale("en"), "x")
            .with(locale("de"), "y");

        let removed = map.retain_recognized(&[locale("en"), locale("fr")]);

        assert_eq!(removed, vec![locale("de")]);
        assert_eq!(map, LocaleSlugMap::new().with(locale("en"), "x"));
    }

    #[test]
    fn booleans_normalize_to_integers() {
        assert_eq!(SourceValue::Bool(true).normalize(), SourceValue::Integer(1));
        assert_eq!(SourceValue::Bool(false).normalize(), SourceValue::Integer(0));
        assert_eq!(SourceValue::text("a").normalize(), SourceValue::text("a"));
    }

    #[test]
    fn existing_set_ignores_empty_entries() {
        let mut set = ExistingSlugSet::new();
        set.extend(locale("en"), Vec::new());
        assert!(set.is_empty());

        set.extend(locale("en"), vec!["post".to_string(), "post".to_string()]);
        assert_eq!(set.get(&locale("en")).map(BTreeSet::len), Some(1));
    }

    #[test]
    fn slug_map_serializes_as_plain_object() {
        let map = LocaleSlugMap::new().with(locale("en"), "hello-world");
        let json = serde_json::to_value(&map).unwrap();
        assert_eq!(json, serde_json::json!({ "en": "hello-world" }));
    }
}
