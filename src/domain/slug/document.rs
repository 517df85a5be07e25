// src/domain/slug/document.rs
use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::slug::config::SlugConfig;
use crate::domain::slug::record::{SluggableAttribute, SluggableRecord};
use crate::domain::slug::repository::SlugConstraint;
use crate::domain::slug::value_objects::{
    Locale, LocaleMap, LocaleSlugMap, RecordKey, SourceValue,
};

pub const DELETED_AT_COLUMN: &str = "deleted_at";

/// A generic record whose attributes are JSON values.
///
/// Localised attributes are JSON objects keyed by locale code. The document
/// keeps a snapshot of its last persisted attributes to answer dirtiness.
#[derive(Debug, Clone)]
pub struct SlugDocument {
    type_name: String,
    table: String,
    key: Option<RecordKey>,
    exists: bool,
    attributes: BTreeMap<String, Value>,
    original: BTreeMap<String, Value>,
    sluggable: Vec<SluggableAttribute>,
    soft_deletes: bool,
    deleted_at: Option<DateTime<Utc>>,
    display: Option<String>,
    unique_scope: Vec<String>,
}

impl SlugDocument {
    #[must_use]
    pub fn new(type_name: impl Into<String>) -> Self {
        let type_name = type_name.into();
        Self {
            table: type_name.clone(),
            type_name,
            key: None,
            exists: false,
            attributes: BTreeMap::new(),
            original: BTreeMap::new(),
            sluggable: Vec::new(),
            soft_deletes: false,
            deleted_at: None,
            display: None,
            unique_scope: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    #[must_use]
    pub fn with_sluggable(mut self, attribute: SluggableAttribute) -> Self {
        self.sluggable.push(attribute);
        self
    }

    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: Value) -> Self {
        self.set_attribute(name, value);
        self
    }

    #[must_use]
    pub const fn with_soft_deletes(mut self) -> Self {
        self.soft_deletes = true;
        self
    }

    #[must_use]
    pub fn with_display(mut self, display: impl Into<String>) -> Self {
        self.display = Some(display.into());
        self
    }

    /// Restrict uniqueness to rows sharing this column's value.
    #[must_use]
    pub fn with_unique_scope(mut self, column: impl Into<String>) -> Self {
        self.unique_scope.push(column.into());
        self
    }

    /// Mark the document as loaded from storage with its current attributes.
    #[must_use]
    pub fn persisted(mut self, key: RecordKey) -> Self {
        self.mark_persisted(key);
        self
    }

    pub fn mark_persisted(&mut self, key: RecordKey) {
        self.key = Some(key);
        self.exists = true;
        self.sync_original();
    }

    pub fn sync_original(&mut self) {
        self.original = self.attributes.clone();
    }

    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    pub fn set_attribute(&mut self, name: impl Into<String>, value: Value) {
        self.attributes.insert(name.into(), value);
    }

    pub fn trash(&mut self, at: DateTime<Utc>) {
        self.deleted_at = Some(at);
    }

    #[must_use]
    pub const fn is_trashed(&self) -> bool {
        self.deleted_at.is_some()
    }

    #[must_use]
    pub fn unique_scope(&self) -> &[String] {
        &self.unique_scope
    }

    fn source_value(field: &str, locale: &str, value: &Value) -> DomainResult<Option<SourceValue>> {
        match value {
            Value::Null => Ok(None),
            Value::String(text) if text.trim().is_empty() => Ok(None),
            Value::String(text) => Ok(Some(SourceValue::Text(text.clone()))),
            Value::Bool(flag) => Ok(Some(SourceValue::Bool(*flag))),
            Value::Number(number) => number.as_i64().map(SourceValue::Integer).map(Some).ok_or_else(|| {
                DomainError::Validation(format!(
                    "source field '{field}' holds a non-integer number for locale '{locale}'"
                ))
            }),
            Value::Array(_) | Value::Object(_) => Err(DomainError::Validation(format!(
                "source field '{field}' holds an unsupported value for locale '{locale}'"
            ))),
        }
    }
}

impl SluggableRecord for SlugDocument {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn table(&self) -> &str {
        &self.table
    }

    fn key(&self) -> Option<RecordKey> {
        self.key
    }

    fn exists(&self) -> bool {
        self.exists
    }

    fn sluggable(&self) -> Vec<SluggableAttribute> {
        self.sluggable.clone()
    }

    fn translations(&self, field: &str) -> DomainResult<LocaleMap<SourceValue>> {
        let Some(value) = self.attributes.get(field) else {
            return Ok(LocaleMap::new());
        };

        match value {
            Value::Null => Ok(LocaleMap::new()),
            Value::Object(entries) => {
                let mut values = LocaleMap::new();
                for (code, raw) in entries {
                    if let Some(source) = Self::source_value(field, code, raw)? {
                        values.insert(Locale::new(code.as_str())?, source);
                    }
                }
                Ok(values)
            }
            _ => Err(DomainError::Validation(format!(
                "source field '{field}' must be keyed by locale"
            ))),
        }
    }

    fn slug_value(&self, attribute: &str) -> LocaleSlugMap {
        match self.attributes.get(attribute) {
            Some(Value::Object(entries)) => entries
                .iter()
                .filter_map(|(code, value)| {
                    let slug = value.as_str()?;
                    let locale = Locale::new(code.as_str()).ok()?;
                    Some((locale, slug.to_string()))
                })
                .collect(),
            _ => LocaleSlugMap::new(),
        }
    }

    fn set_slug_value(&mut self, attribute: &str, value: LocaleSlugMap) {
        let entries: Map<String, Value> = value
            .into_iter()
            .map(|(locale, slug)| (String::from(locale), Value::String(slug)))
            .collect();
        self.attributes
            .insert(attribute.to_string(), Value::Object(entries));
    }

    fn is_dirty(&self, attributes: &[&str]) -> bool {
        attributes
            .iter()
            .any(|name| self.attributes.get(*name) != self.original.get(*name))
    }

    fn default_string(&self) -> Option<String> {
        self.display.clone()
    }

    fn soft_delete_column(&self) -> Option<&str> {
        self.soft_deletes.then_some(DELETED_AT_COLUMN)
    }

    fn unique_slug_constraints(
        &self,
        _attribute: &str,
        _config: &SlugConfig,
        _candidate: &str,
    ) -> Vec<SlugConstraint> {
        self.unique_scope
            .iter()
            .map(|column| match self.attributes.get(column) {
                None | Some(Value::Null) => SlugConstraint::IsNull {
                    column: column.clone(),
                },
                Some(Value::String(value)) => SlugConstraint::Equals {
                    column: column.clone(),
                    value: value.clone(),
                },
                Some(other) => SlugConstraint::Equals {
                    column: column.clone(),
                    value: other.to_string(),
                },
            })
            .collect()
    }
}
