// src/application/services/slug_service.rs
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::application::configuration::{ConfigurationResolver, SlugFunctionRegistry};
use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::ports::{SlugRepositoryPort, TransliteratorPort};
use crate::application::services::cache::TransliteratorCache;
use crate::config::SluggableConfig;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::slug::config::{SlugConfig, SlugOptions, SlugSource};
use crate::domain::slug::document::SlugDocument;
use crate::domain::slug::record::SluggableRecord;
use crate::domain::slug::services::{ReservedWordValidator, SlugBuilder, UniquenessResolver};
use crate::domain::slug::value_objects::{Locale, LocaleMap, LocaleSlugMap, SourceValue};

/// What [`SlugService::create_slug`] slugs for: a live record or just its type name.
#[derive(Clone, Copy)]
pub enum SlugSubject<'a> {
    Record(&'a dyn SluggableRecord),
    TypeName(&'a str),
}

impl<'a> From<&'a str> for SlugSubject<'a> {
    fn from(value: &'a str) -> Self {
        Self::TypeName(value)
    }
}

impl<'a> From<&'a SlugDocument> for SlugSubject<'a> {
    fn from(value: &'a SlugDocument) -> Self {
        Self::Record(value)
    }
}

/// Builds a fresh, unsaved record of one type.
pub type RecordFactory = Arc<dyn Fn() -> Box<dyn SluggableRecord> + Send + Sync>;

/// Orchestrates slug generation for every sluggable attribute of a record.
pub struct SlugService {
    configuration: ConfigurationResolver,
    locales: Vec<Locale>,
    transliterator: Arc<TransliteratorPort>,
    transliterators: TransliteratorCache,
    resolver: UniquenessResolver,
    prototypes: HashMap<String, RecordFactory>,
}

impl fmt::Debug for SlugService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlugService")
            .field("configuration", &self.configuration)
            .field("locales", &self.locales)
            .field("prototypes", &self.prototypes.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl SlugService {
    #[must_use]
    pub fn new(
        configuration: ConfigurationResolver,
        locales: Vec<Locale>,
        transliterator: Arc<TransliteratorPort>,
        repository: Arc<SlugRepositoryPort>,
    ) -> Self {
        Self {
            configuration,
            locales,
            transliterator,
            transliterators: TransliteratorCache::new(),
            resolver: UniquenessResolver::new(repository),
            prototypes: HashMap::new(),
        }
    }

    #[must_use]
    pub fn from_config(
        config: &SluggableConfig,
        registry: SlugFunctionRegistry,
        transliterator: Arc<TransliteratorPort>,
        repository: Arc<SlugRepositoryPort>,
    ) -> Self {
        Self::new(
            ConfigurationResolver::new(config.defaults().clone(), registry),
            config.locales().to_vec(),
            transliterator,
            repository,
        )
    }

    /// Register how to build a blank record for `type_name`, used when
    /// [`SlugService::create_slug`] is called with a type name.
    #[must_use]
    pub fn with_prototype<F>(mut self, type_name: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> Box<dyn SluggableRecord> + Send + Sync + 'static,
    {
        self.prototypes.insert(type_name.into(), Arc::new(factory));
        self
    }

    /// Recognized application locales.
    #[must_use]
    pub fn locales(&self) -> &[Locale] {
        &self.locales
    }

    #[must_use]
    pub const fn transliterators(&self) -> &TransliteratorCache {
        &self.transliterators
    }

    /// Slug every sluggable attribute of `record` in place.
    ///
    /// Returns whether any slug attribute now differs from its persisted value.
    /// The record is never saved here.
    ///
    /// # Errors
    ///
    /// Fails with [`ApplicationError::InvalidConfiguration`] when an attribute's
    /// options do not resolve, and propagates source and store errors.
    pub async fn slug(
        &self,
        record: &mut dyn SluggableRecord,
        force: bool,
    ) -> ApplicationResult<bool> {
        let mut attributes = Vec::new();

        for sluggable in record.sluggable() {
            let config = self.resolve_config(&*record, &sluggable.name, &sluggable.options)?;
            let slug = self
                .build_slug(&*record, &sluggable.name, &config, force)
                .await?;

            if slug != record.slug_value(&sluggable.name) {
                record.set_slug_value(&sluggable.name, slug);
            }
            attributes.push(sluggable.name);
        }

        let names: Vec<&str> = attributes.iter().map(String::as_str).collect();
        let changed = record.is_dirty(&names);
        tracing::debug!(
            record_type = record.type_name(),
            changed,
            "slugging finished"
        );
        Ok(changed)
    }

    /// Slug value `attribute` should carry, without writing it to the record.
    ///
    /// # Errors
    ///
    /// Propagates source value and store errors.
    pub async fn build_slug(
        &self,
        record: &dyn SluggableRecord,
        attribute: &str,
        config: &SlugConfig,
        force: bool,
    ) -> ApplicationResult<LocaleSlugMap> {
        let current = self.current_slug(record, attribute);

        if !force && !Self::needs_slugging(record, attribute, &current, config) {
            tracing::debug!(
                record_type = record.type_name(),
                attribute,
                "slug kept as is"
            );
            return Ok(current);
        }

        let source = self.source_values(record, config)?;
        if source.is_empty() {
            tracing::debug!(
                record_type = record.type_name(),
                attribute,
                "no source value to slug from"
            );
            return Ok(current);
        }

        let slug = self
            .generate(record, attribute, &source, config, true)
            .await?;
        tracing::debug!(
            record_type = record.type_name(),
            attribute,
            locales = slug.len(),
            "slug regenerated"
        );
        Ok(slug)
    }

    /// Build, validate and make unique a slug for an arbitrary string, in every locale.
    ///
    /// `overrides` must be `None`, JSON `null` or a JSON object of slug options;
    /// without an object the subject's own options for `attribute` are used.
    /// A type name is resolved through its registered prototype; without one a
    /// blank document of that type is used with the default transliterator.
    ///
    /// # Errors
    ///
    /// Fails with [`ApplicationError::AmbiguousArgument`] for any other
    /// `overrides` shape, with [`ApplicationError::InvalidConfiguration`] for
    /// options that do not resolve, and propagates store errors.
    pub async fn create_slug<'a>(
        &self,
        subject: impl Into<SlugSubject<'a>> + Send,
        attribute: &str,
        from: &str,
        overrides: Option<Value>,
    ) -> ApplicationResult<LocaleSlugMap> {
        let prototype: Box<dyn SluggableRecord>;
        let (record, cacheable): (&dyn SluggableRecord, bool) = match subject.into() {
            SlugSubject::Record(record) => (record, true),
            SlugSubject::TypeName(type_name) => match self.prototypes.get(type_name) {
                Some(factory) => {
                    prototype = factory();
                    (&*prototype, true)
                }
                None => {
                    tracing::debug!(
                        record_type = type_name,
                        "no prototype registered, slugging against a blank document"
                    );
                    prototype = Box::new(SlugDocument::new(type_name));
                    (&*prototype, false)
                }
            },
        };

        let options = match overrides {
            None | Some(Value::Null) => record
                .sluggable()
                .into_iter()
                .find(|sluggable| sluggable.name == attribute)
                .map(|sluggable| sluggable.options)
                .unwrap_or_default(),
            Some(value @ Value::Object(_)) => serde_json::from_value::<SlugOptions>(value)
                .map_err(|err| ApplicationError::invalid_configuration(err.to_string()))?,
            Some(other) => {
                return Err(ApplicationError::ambiguous_argument(format!(
                    "create_slug expects a map of options or null, {} given",
                    json_kind(&other)
                )));
            }
        };

        let config = self.resolve_config(record, attribute, &options)?;
        let source: LocaleMap<SourceValue> = self
            .locales
            .iter()
            .map(|locale| (locale.clone(), SourceValue::text(from)))
            .collect();

        self.generate(record, attribute, &source, &config, cacheable)
            .await
    }

    /// Per-locale source text for `config.source`.
    ///
    /// Several fields are joined with a single space per locale. Locales the
    /// application does not recognize are left out.
    ///
    /// # Errors
    ///
    /// Propagates [`DomainError::Validation`] for unsupported source values.
    pub fn source_values(
        &self,
        record: &dyn SluggableRecord,
        config: &SlugConfig,
    ) -> DomainResult<LocaleMap<SourceValue>> {
        let fields = match &config.source {
            SlugSource::DefaultString => {
                let Some(display) = record.default_string().filter(|s| !s.trim().is_empty())
                else {
                    return Ok(LocaleMap::new());
                };
                return Ok(self
                    .locales
                    .iter()
                    .map(|locale| (locale.clone(), SourceValue::text(display.as_str())))
                    .collect());
            }
            SlugSource::Fields(fields) => fields,
        };

        if let [field] = fields.as_slice() {
            let mut values = record.translations(field)?;
            values.retain(|locale, value| self.locales.contains(locale) && !value.is_blank());
            return Ok(values);
        }

        let mut joined: LocaleMap<Vec<String>> = LocaleMap::new();
        for field in fields {
            for (locale, value) in record.translations(field)? {
                if value.is_blank() || !self.locales.contains(&locale) {
                    continue;
                }
                joined
                    .entry(locale)
                    .or_default()
                    .push(value.normalize().to_string());
            }
        }

        Ok(joined
            .into_iter()
            .map(|(locale, parts)| (locale, SourceValue::Text(parts.join(" "))))
            .collect())
    }

    fn resolve_config(
        &self,
        record: &dyn SluggableRecord,
        attribute: &str,
        options: &SlugOptions,
    ) -> ApplicationResult<SlugConfig> {
        let context = format!("{}:{attribute}", record.type_name());
        self.configuration
            .resolve(&context, options)
            .map_err(|err| match err {
                DomainError::InvalidConfiguration(msg) => ApplicationError::InvalidConfiguration(msg),
                other => other.into(),
            })
    }

    fn current_slug(&self, record: &dyn SluggableRecord, attribute: &str) -> LocaleSlugMap {
        let mut current = record.slug_value(attribute);
        let stale = current.retain_recognized(&self.locales);
        if !stale.is_empty() {
            tracing::warn!(
                record_type = record.type_name(),
                attribute,
                stale = ?stale,
                "dropping slugs for unrecognized locales"
            );
        }
        current
    }

    fn needs_slugging(
        record: &dyn SluggableRecord,
        attribute: &str,
        current: &LocaleSlugMap,
        config: &SlugConfig,
    ) -> bool {
        if current.is_blank() || config.on_update {
            return true;
        }

        // a slug set by the caller in this cycle wins
        if record.is_dirty(&[attribute]) {
            return false;
        }

        !record.exists()
    }

    async fn generate(
        &self,
        record: &dyn SluggableRecord,
        attribute: &str,
        source: &LocaleMap<SourceValue>,
        config: &SlugConfig,
        cacheable: bool,
    ) -> ApplicationResult<LocaleSlugMap> {
        // a stand-in record must not fix the transliterator for its whole type
        let transliterator = if cacheable {
            self.transliterators
                .get_or_insert_with(record.type_name(), attribute, || {
                    record.customize_transliterator(Arc::clone(&self.transliterator), attribute)
                })
        } else {
            Arc::clone(&self.transliterator)
        };

        let slug = SlugBuilder::new(transliterator).build(source, config);
        let slug = ReservedWordValidator::validate(slug, config, record);
        let slug = self.resolver.resolve(slug, config, record, attribute).await?;
        Ok(slug)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
