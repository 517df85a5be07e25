// src/infrastructure/repositories/memory.rs
use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::slug::{
    LocaleSlugMap, RecordKey, SlugConstraint, SlugDocument, SlugQuery, SlugRepository,
    SluggableRecord,
};

/// One stored record as seen by slug lookups.
#[derive(Debug, Clone, Default)]
pub struct StoredSlugs {
    pub table: String,
    pub key: Option<RecordKey>,
    pub slugs: BTreeMap<String, LocaleSlugMap>,
    pub columns: BTreeMap<String, String>,
    pub trashed: bool,
}

impl StoredSlugs {
    #[must_use]
    pub fn new(table: impl Into<String>, key: RecordKey) -> Self {
        Self {
            table: table.into(),
            key: Some(key),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_slugs(mut self, attribute: impl Into<String>, slugs: LocaleSlugMap) -> Self {
        self.slugs.insert(attribute.into(), slugs);
        self
    }

    #[must_use]
    pub fn with_column(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.columns.insert(column.into(), value.into());
        self
    }

    #[must_use]
    pub const fn trashed(mut self) -> Self {
        self.trashed = true;
        self
    }

    fn satisfies(&self, constraint: &SlugConstraint) -> bool {
        match constraint {
            SlugConstraint::Equals { column, value } => self.columns.get(column) == Some(value),
            SlugConstraint::IsNull { column } => !self.columns.contains_key(column),
        }
    }
}

/// Slug store kept in process memory, for previews and tests.
#[derive(Debug, Default)]
pub struct InMemorySlugRepository {
    rows: Mutex<Vec<StoredSlugs>>,
}

impl InMemorySlugRepository {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
        }
    }

    /// Add `row`, replacing any row with the same table and key.
    ///
    /// # Errors
    ///
    /// Fails with [`DomainError::Persistence`] when the store lock is poisoned.
    pub fn insert(&self, row: StoredSlugs) -> DomainResult<()> {
        let mut rows = self.lock()?;
        if let Some(key) = row.key {
            rows.retain(|existing| !(existing.table == row.table && existing.key == Some(key)));
        }
        rows.push(row);
        Ok(())
    }

    /// Store the slug attributes and scope columns of a persisted document.
    ///
    /// # Errors
    ///
    /// Fails with [`DomainError::Validation`] for unsaved documents and with
    /// [`DomainError::Persistence`] when the store lock is poisoned.
    pub fn save_document(&self, document: &SlugDocument) -> DomainResult<()> {
        let key = document.key().ok_or_else(|| {
            DomainError::Validation("only persisted documents can be stored".into())
        })?;

        let mut row = StoredSlugs::new(document.table(), key);
        for sluggable in document.sluggable() {
            let slugs = document.slug_value(&sluggable.name);
            row.slugs.insert(sluggable.name, slugs);
        }
        for column in document.unique_scope() {
            match document.attribute(column) {
                None | Some(Value::Null) => {}
                Some(Value::String(value)) => {
                    row.columns.insert(column.clone(), value.clone());
                }
                Some(other) => {
                    row.columns.insert(column.clone(), other.to_string());
                }
            }
        }
        row.trashed = document.is_trashed();

        self.insert(row)
    }

    /// # Errors
    ///
    /// Fails with [`DomainError::Persistence`] when the store lock is poisoned.
    pub fn len(&self) -> DomainResult<usize> {
        Ok(self.lock()?.len())
    }

    /// # Errors
    ///
    /// Fails with [`DomainError::Persistence`] when the store lock is poisoned.
    pub fn is_empty(&self) -> DomainResult<bool> {
        Ok(self.lock()?.is_empty())
    }

    fn lock(&self) -> DomainResult<std::sync::MutexGuard<'_, Vec<StoredSlugs>>> {
        self.rows
            .lock()
            .map_err(|_| DomainError::Persistence("slug store lock poisoned".into()))
    }
}

#[async_trait]
impl SlugRepository for InMemorySlugRepository {
    async fn find_similar(&self, query: &SlugQuery) -> DomainResult<Vec<String>> {
        let rows = self.lock()?;

        Ok(rows
            .iter()
            .filter(|row| row.table == query.table)
            .filter(|row| query.exclude.is_none() || row.key != query.exclude)
            .filter(|row| !(query.excludes_trashed() && row.trashed))
            .filter(|row| query.constraints.iter().all(|c| row.satisfies(c)))
            .filter_map(|row| row.slugs.get(&query.attribute)?.get(&query.locale))
            .filter(|slug| query.matches(slug))
            .map(str::to_string)
            .collect())
    }
}
