// src/application/configuration.rs
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::slug::config::{
    DEFAULT_SEPARATOR, ReservedFn, ReservedWords, SlugConfig, SlugMethod, SlugMethodFn,
    SlugOptions, SlugSource, UniqueSuffix, UniqueSuffixFn,
};
use crate::domain::slug::record::SluggableRecord;
use crate::domain::slug::value_objects::{ExistingSlugSet, LocaleMap, LocaleSlugMap, SourceValue};

/// Named custom functions that configuration may refer to.
#[derive(Clone, Default)]
pub struct SlugFunctionRegistry {
    methods: HashMap<String, SlugMethodFn>,
    suffixes: HashMap<String, UniqueSuffixFn>,
    reserved: HashMap<String, ReservedFn>,
}

impl SlugFunctionRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_method<F>(mut self, name: impl Into<String>, method: F) -> Self
    where
        F: Fn(&LocaleMap<SourceValue>, &str) -> LocaleSlugMap + Send + Sync + 'static,
    {
        self.methods.insert(name.into(), Arc::new(method));
        self
    }

    #[must_use]
    pub fn with_unique_suffix<F>(mut self, name: impl Into<String>, suffix: F) -> Self
    where
        F: Fn(&LocaleSlugMap, &str, &ExistingSlugSet) -> LocaleMap<String> + Send + Sync + 'static,
    {
        self.suffixes.insert(name.into(), Arc::new(suffix));
        self
    }

    #[must_use]
    pub fn with_reserved<F>(mut self, name: impl Into<String>, reserved: F) -> Self
    where
        F: Fn(&dyn SluggableRecord) -> Option<BTreeSet<String>> + Send + Sync + 'static,
    {
        self.reserved.insert(name.into(), Arc::new(reserved));
        self
    }
}

impl fmt::Debug for SlugFunctionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlugFunctionRegistry")
            .field("methods", &self.methods.keys().collect::<Vec<_>>())
            .field("suffixes", &self.suffixes.keys().collect::<Vec<_>>())
            .field("reserved", &self.reserved.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Merges per-attribute overrides with process-wide defaults and validates the result.
#[derive(Debug, Clone)]
pub struct ConfigurationResolver {
    defaults: SlugOptions,
    registry: SlugFunctionRegistry,
}

impl Default for ConfigurationResolver {
    fn default() -> Self {
        Self::new(SlugOptions::default(), SlugFunctionRegistry::default())
    }
}

impl ConfigurationResolver {
    #[must_use]
    pub fn new(defaults: SlugOptions, registry: SlugFunctionRegistry) -> Self {
        Self {
            defaults: SlugOptions::builtin().merge(defaults),
            registry,
        }
    }

    #[must_use]
    pub const fn defaults(&self) -> &SlugOptions {
        &self.defaults
    }

    /// Resolve `overrides` for `context` (usually `type:attribute`, used in error messages).
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidConfiguration`] when a key has the wrong
    /// shape or names an unregistered function.
    pub fn resolve(&self, context: &str, overrides: &SlugOptions) -> DomainResult<SlugConfig> {
        let merged = self.defaults.clone().merge(overrides.clone());

        Ok(SlugConfig {
            source: resolve_source(context, merged.source.as_ref())?,
            separator: merged
                .separator
                .unwrap_or_else(|| DEFAULT_SEPARATOR.to_string()),
            method: self.resolve_method(context, merged.method.as_ref())?,
            max_length: resolve_max_length(context, merged.max_length.as_ref())?,
            reserved: self.resolve_reserved(context, merged.reserved.as_ref())?,
            unique_suffix: self.resolve_unique_suffix(context, merged.unique_suffix.as_ref())?,
            unique: merged.unique.unwrap_or(true),
            on_update: merged.on_update.unwrap_or(false),
            include_trashed: merged.include_trashed.unwrap_or(false),
        })
    }

    fn resolve_method(&self, context: &str, value: Option<&Value>) -> DomainResult<SlugMethod> {
        match value {
            None | Some(Value::Null) => Ok(SlugMethod::Transliterate),
            Some(Value::String(name)) => self
                .registry
                .methods
                .get(name)
                .map(|apply| SlugMethod::Custom {
                    name: name.clone(),
                    apply: Arc::clone(apply),
                })
                .ok_or_else(|| invalid(context, format!("method '{name}' is not registered"))),
            Some(_) => Err(invalid(context, "\"method\" is not callable nor null")),
        }
    }

    fn resolve_unique_suffix(
        &self,
        context: &str,
        value: Option<&Value>,
    ) -> DomainResult<UniqueSuffix> {
        match value {
            None | Some(Value::Null) => Ok(UniqueSuffix::Numeric),
            Some(Value::String(name)) => self
                .registry
                .suffixes
                .get(name)
                .map(|apply| UniqueSuffix::Custom {
                    name: name.clone(),
                    apply: Arc::clone(apply),
                })
                .ok_or_else(|| {
                    invalid(context, format!("uniqueSuffix '{name}' is not registered"))
                }),
            Some(_) => Err(invalid(context, "\"uniqueSuffix\" is not null or a function")),
        }
    }

    fn resolve_reserved(&self, context: &str, value: Option<&Value>) -> DomainResult<ReservedWords> {
        match value {
            None | Some(Value::Null) => Ok(ReservedWords::None),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| {
                    item.as_str().map(str::to_string).ok_or_else(|| {
                        invalid(context, "\"reserved\" must only contain strings")
                    })
                })
                .collect::<DomainResult<BTreeSet<String>>>()
                .map(ReservedWords::Fixed),
            Some(Value::String(name)) => self
                .registry
                .reserved
                .get(name)
                .map(|resolve| ReservedWords::Derived {
                    name: name.clone(),
                    resolve: Arc::clone(resolve),
                })
                .ok_or_else(|| invalid(context, format!("reserved '{name}' is not registered"))),
            Some(_) => Err(invalid(
                context,
                "\"reserved\" is not null, a list, or a function returning a list",
            )),
        }
    }
}

fn resolve_source(context: &str, value: Option<&Value>) -> DomainResult<SlugSource> {
    match value {
        None | Some(Value::Null) => Ok(SlugSource::DefaultString),
        Some(Value::String(field)) => Ok(SlugSource::Fields(vec![field.clone()])),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| invalid(context, "\"source\" must only contain field names"))
            })
            .collect::<DomainResult<Vec<String>>>()
            .map(SlugSource::Fields),
        Some(_) => Err(invalid(context, "\"source\" is not null, a field, or a list of fields")),
    }
}

fn resolve_max_length(context: &str, value: Option<&Value>) -> DomainResult<Option<usize>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(number)) => match number.as_u64() {
            Some(0) => Ok(None),
            Some(n) => usize::try_from(n)
                .map(Some)
                .map_err(|_| invalid(context, "\"maxLength\" is too large")),
            None => Err(invalid(context, "\"maxLength\" must be a positive integer")),
        },
        Some(_) => Err(invalid(context, "\"maxLength\" must be a positive integer or null")),
    }
}

fn invalid(context: &str, msg: impl fmt::Display) -> DomainError {
    DomainError::InvalidConfiguration(format!("sluggable {msg} for {context}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn options(value: Value) -> SlugOptions {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn builtin_defaults_resolve() {
        let config = ConfigurationResolver::default()
            .resolve("posts:slug", &SlugOptions::default())
            .unwrap();

        assert_eq!(config.source, SlugSource::DefaultString);
        assert_eq!(config.separator, "-");
        assert!(matches!(config.method, SlugMethod::Transliterate));
        assert!(matches!(config.reserved, ReservedWords::None));
        assert!(matches!(config.unique_suffix, UniqueSuffix::Numeric));
        assert_eq!(config.max_length, None);
        assert!(config.unique);
        assert!(!config.on_update);
        assert!(!config.include_trashed);
    }

    #[test]
    fn overrides_win_over_process_defaults() {
        let resolver = ConfigurationResolver::new(
            options(json!({ "separator": "_", "maxLength": 20, "reserved": ["admin"] })),
            SlugFunctionRegistry::new(),
        );

        let config = resolver
            .resolve(
                "posts:slug",
                &options(json!({ "source": "title", "maxLength": 8, "reserved": null })),
            )
            .unwrap();

        assert_eq!(config.source, SlugSource::Fields(vec!["title".into()]));
        assert_eq!(config.separator, "_");
        assert_eq!(config.max_length, Some(8));
        assert!(matches!(config.reserved, ReservedWords::None));
    }

    #[test]
    fn named_functions_resolve_from_the_registry() {
        let registry = SlugFunctionRegistry::new()
            .with_method("upper", |source: &LocaleMap<SourceValue>, _: &str| {
                source
                    .iter()
                    .map(|(locale, value)| (locale.clone(), value.to_string().to_uppercase()))
                    .collect()
            })
            .with_unique_suffix(
                "fixed",
                |slugs: &LocaleSlugMap, _: &str, _: &ExistingSlugSet| {
                    slugs
                        .locales()
                        .map(|locale| (locale.clone(), "x".to_string()))
                        .collect()
                },
            )
            .with_reserved("none", |_: &dyn SluggableRecord| None);
        let resolver = ConfigurationResolver::new(SlugOptions::default(), registry);

        let config = resolver
            .resolve(
                "posts:slug",
                &SlugOptions::default()
                    .with_method("upper")
                    .with_unique_suffix("fixed")
                    .with_reserved_fn("none"),
            )
            .unwrap();

        assert!(matches!(config.method, SlugMethod::Custom { ref name, .. } if name == "upper"));
        assert!(matches!(config.unique_suffix, UniqueSuffix::Custom { ref name, .. } if name == "fixed"));
        assert!(matches!(config.reserved, ReservedWords::Derived { ref name, .. } if name == "none"));
    }

    #[test]
    fn wrong_kinds_are_invalid_configuration() {
        let resolver = ConfigurationResolver::default();

        for raw in [
            json!({ "method": 42 }),
            json!({ "method": "missing" }),
            json!({ "reserved": { "admin": true } }),
            json!({ "reserved": [1, 2] }),
            json!({ "uniqueSuffix": true }),
            json!({ "uniqueSuffix": "missing" }),
            json!({ "maxLength": -3 }),
            json!({ "source": 7 }),
        ] {
            let err = resolver.resolve("posts:slug", &options(raw.clone())).unwrap_err();
            assert!(
                matches!(err, DomainError::InvalidConfiguration(ref msg) if msg.contains("posts:slug")),
                "expected invalid configuration for {raw}, got {err:?}"
            );
        }
    }

    #[test]
    fn zero_max_length_disables_truncation() {
        let config = ConfigurationResolver::default()
            .resolve("posts:slug", &options(json!({ "maxLength": 0 })))
            .unwrap();

        assert_eq!(config.max_length, None);
    }
}
