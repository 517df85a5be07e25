// src/domain/slug/config.rs
use crate::domain::slug::record::SluggableRecord;
use crate::domain::slug::suffix;
use crate::domain::slug::value_objects::{ExistingSlugSet, LocaleMap, LocaleSlugMap, SourceValue};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

pub const DEFAULT_SEPARATOR: &str = "-";

/// Custom slug generator: receives every locale's source at once and returns the slugs.
pub type SlugMethodFn = Arc<dyn Fn(&LocaleMap<SourceValue>, &str) -> LocaleSlugMap + Send + Sync>;

/// Custom suffix generator: returns the suffix to append per locale.
pub type UniqueSuffixFn =
    Arc<dyn Fn(&LocaleSlugMap, &str, &ExistingSlugSet) -> LocaleMap<String> + Send + Sync>;

/// Reserved words derived from the record being slugged. `None` means "nothing reserved".
pub type ReservedFn = Arc<dyn Fn(&dyn SluggableRecord) -> Option<BTreeSet<String>> + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlugSource {
    /// Use the record's default string representation.
    DefaultString,
    Fields(Vec<String>),
}

#[derive(Clone)]
pub enum SlugMethod {
    Transliterate,
    Custom { name: String, apply: SlugMethodFn },
}

impl fmt::Debug for SlugMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transliterate => f.write_str("Transliterate"),
            Self::Custom { name, .. } => f.debug_struct("Custom").field("name", name).finish(),
        }
    }
}

#[derive(Clone)]
pub enum UniqueSuffix {
    Numeric,
    Custom { name: String, apply: UniqueSuffixFn },
}

impl UniqueSuffix {
    #[must_use]
    pub fn suffixes(
        &self,
        slugs: &LocaleSlugMap,
        separator: &str,
        existing: &ExistingSlugSet,
    ) -> LocaleMap<String> {
        match self {
            Self::Numeric => suffix::numeric_suffixes(slugs, separator, existing),
            Self::Custom { apply, .. } => apply(slugs, separator, existing),
        }
    }
}

impl fmt::Debug for UniqueSuffix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric => f.write_str("Numeric"),
            Self::Custom { name, .. } => f.debug_struct("Custom").field("name", name).finish(),
        }
    }
}

#[derive(Clone)]
pub enum ReservedWords {
    None,
    Fixed(BTreeSet<String>),
    Derived { name: String, resolve: ReservedFn },
}

impl ReservedWords {
    #[must_use]
    pub fn resolve(&self, record: &dyn SluggableRecord) -> Option<BTreeSet<String>> {
        match self {
            Self::None => None,
            Self::Fixed(words) => Some(words.clone()),
            Self::Derived { resolve, .. } => resolve(record),
        }
    }
}

impl fmt::Debug for ReservedWords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Fixed(words) => f.debug_tuple("Fixed").field(words).finish(),
            Self::Derived { name, .. } => f.debug_struct("Derived").field("name", name).finish(),
        }
    }
}

/// Fully resolved configuration for one sluggable attribute.
#[derive(Debug, Clone)]
pub struct SlugConfig {
    pub source: SlugSource,
    pub separator: String,
    pub method: SlugMethod,
    pub max_length: Option<usize>,
    pub reserved: ReservedWords,
    pub unique_suffix: UniqueSuffix,
    pub unique: bool,
    pub on_update: bool,
    pub include_trashed: bool,
}

impl Default for SlugConfig {
    fn default() -> Self {
        Self {
            source: SlugSource::DefaultString,
            separator: DEFAULT_SEPARATOR.to_string(),
            method: SlugMethod::Transliterate,
            max_length: None,
            reserved: ReservedWords::None,
            unique_suffix: UniqueSuffix::Numeric,
            unique: true,
            on_update: false,
            include_trashed: false,
        }
    }
}

impl SlugConfig {
    #[must_use]
    pub fn with_source<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.source = SlugSource::Fields(fields.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    #[must_use]
    pub const fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    #[must_use]
    pub fn with_reserved<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.reserved = ReservedWords::Fixed(words.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub const fn with_unique(mut self, unique: bool) -> Self {
        self.unique = unique;
        self
    }

    #[must_use]
    pub const fn with_on_update(mut self, on_update: bool) -> Self {
        self.on_update = on_update;
        self
    }

    #[must_use]
    pub const fn with_include_trashed(mut self, include_trashed: bool) -> Self {
        self.include_trashed = include_trashed;
        self
    }
}

/// Raw, unvalidated options as they appear in configuration files or per-attribute overrides.
///
/// A missing key (`None`) means "not specified" and falls back to the layer below,
/// while an explicit JSON `null` (`Some(Value::Null)`) resets the key to "none".
/// The dynamic keys (`source`, `method`, `maxLength`, `reserved`, `uniqueSuffix`) stay
/// as JSON until they are resolved into a [`SlugConfig`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlugOptions {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub source: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub separator: Option<String>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub method: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub max_length: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub reserved: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub unique_suffix: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_update: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_trashed: Option<bool>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl SlugOptions {
    /// Options holding every built-in default.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            source: Some(Value::Null),
            separator: Some(DEFAULT_SEPARATOR.to_string()),
            method: Some(Value::Null),
            max_length: Some(Value::Null),
            reserved: Some(Value::Null),
            unique_suffix: Some(Value::Null),
            unique: Some(true),
            on_update: Some(false),
            include_trashed: Some(false),
        }
    }

    /// Layer `overrides` on top of `self`; every key set in `overrides` wins.
    #[must_use]
    pub fn merge(self, overrides: SlugOptions) -> Self {
        Self {
            source: overrides.source.or(self.source),
            separator: overrides.separator.or(self.separator),
            method: overrides.method.or(self.method),
            max_length: overrides.max_length.or(self.max_length),
            reserved: overrides.reserved.or(self.reserved),
            unique_suffix: overrides.unique_suffix.or(self.unique_suffix),
            unique: overrides.unique.or(self.unique),
            on_update: overrides.on_update.or(self.on_update),
            include_trashed: overrides.include_trashed.or(self.include_trashed),
        }
    }

    #[must_use]
    pub fn with_source<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.source = Some(Value::Array(
            fields.into_iter().map(|f| Value::String(f.into())).collect(),
        ));
        self
    }

    #[must_use]
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = Some(separator.into());
        self
    }

    #[must_use]
    pub fn with_method(mut self, name: impl Into<String>) -> Self {
        self.method = Some(Value::String(name.into()));
        self
    }

    #[must_use]
    pub fn with_max_length(mut self, max_length: u64) -> Self {
        self.max_length = Some(Value::from(max_length));
        self
    }

    #[must_use]
    pub fn with_reserved_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.reserved = Some(Value::Array(
            words.into_iter().map(|w| Value::String(w.into())).collect(),
        ));
        self
    }

    #[must_use]
    pub fn with_reserved_fn(mut self, name: impl Into<String>) -> Self {
        self.reserved = Some(Value::String(name.into()));
        self
    }

    #[must_use]
    pub fn with_unique_suffix(mut self, name: impl Into<String>) -> Self {
        self.unique_suffix = Some(Value::String(name.into()));
        self
    }

    #[must_use]
    pub const fn with_unique(mut self, unique: bool) -> Self {
        self.unique = Some(unique);
        self
    }

    #[must_use]
    pub const fn with_on_update(mut self, on_update: bool) -> Self {
        self.on_update = Some(on_update);
        self
    }

    #[must_use]
    pub const fn with_include_trashed(mut self, include_trashed: bool) -> Self {
        self.include_trashed = Some(include_trashed);
        self
    }
}
