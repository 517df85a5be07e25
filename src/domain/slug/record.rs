// src/domain/slug/record.rs
use std::sync::Arc;

use crate::application::ports::util::Transliterator;
use crate::domain::errors::DomainResult;
use crate::domain::slug::config::{SlugConfig, SlugOptions};
use crate::domain::slug::repository::SlugConstraint;
use crate::domain::slug::value_objects::{LocaleMap, LocaleSlugMap, RecordKey, SourceValue};

/// A slug attribute declared by a record type, with its per-attribute overrides.
#[derive(Debug, Clone, PartialEq)]
pub struct SluggableAttribute {
    pub name: String,
    pub options: SlugOptions,
}

impl SluggableAttribute {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: SlugOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: SlugOptions) -> Self {
        self.options = options;
        self
    }
}

/// The record capability consumed by the slugging pipeline.
///
/// Implementations own persistence; the pipeline only reads source values and
/// replaces slug attribute values in memory.
pub trait SluggableRecord: Send + Sync {
    fn type_name(&self) -> &str;

    /// Storage collection queried for existing slugs.
    fn table(&self) -> &str {
        self.type_name()
    }

    /// Identifier of the stored record, `None` while unsaved.
    fn key(&self) -> Option<RecordKey>;

    /// Whether the record has been persisted before.
    fn exists(&self) -> bool;

    fn sluggable(&self) -> Vec<SluggableAttribute>;

    /// Per-locale values of a source field.
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::errors::DomainError::Validation`] for values
    /// that cannot be slugged.
    fn translations(&self, field: &str) -> DomainResult<LocaleMap<SourceValue>>;

    fn slug_value(&self, attribute: &str) -> LocaleSlugMap;

    fn set_slug_value(&mut self, attribute: &str, value: LocaleSlugMap);

    /// Whether any of `attributes` differs from its last persisted value.
    fn is_dirty(&self, attributes: &[&str]) -> bool;

    fn default_string(&self) -> Option<String> {
        None
    }

    fn customize_transliterator(
        &self,
        default: Arc<dyn Transliterator>,
        _attribute: &str,
    ) -> Arc<dyn Transliterator> {
        default
    }

    /// Column marking soft-deleted rows, `None` when the type never soft-deletes.
    fn soft_delete_column(&self) -> Option<&str> {
        None
    }

    /// Extra filters appended to every existing-slug query for this record.
    fn unique_slug_constraints(
        &self,
        _attribute: &str,
        _config: &SlugConfig,
        _candidate: &str,
    ) -> Vec<SlugConstraint> {
        Vec::new()
    }
}
