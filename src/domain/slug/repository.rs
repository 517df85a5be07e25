// src/domain/slug/repository.rs
use crate::domain::errors::DomainResult;
use crate::domain::slug::value_objects::{Locale, RecordKey};
use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlugComparison {
    Equals(String),
    PrefixedBy(String),
}

impl SlugComparison {
    #[must_use]
    pub fn matches(&self, slug: &str) -> bool {
        match self {
            Self::Equals(value) => slug == value,
            Self::PrefixedBy(prefix) => slug.starts_with(prefix.as_str()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlugConstraint {
    Equals { column: String, value: String },
    IsNull { column: String },
}

/// Store-agnostic description of an existing-slug lookup for one locale.
///
/// A stored slug matches when it satisfies any of `comparisons`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlugQuery {
    pub table: String,
    pub attribute: String,
    pub locale: Locale,
    pub comparisons: Vec<SlugComparison>,
    pub exclude: Option<RecordKey>,
    pub soft_delete_column: Option<String>,
    pub include_trashed: bool,
    pub constraints: Vec<SlugConstraint>,
}

impl SlugQuery {
    /// Slugs equal to `candidate` or starting with `candidate + separator`.
    #[must_use]
    pub fn similar(
        table: impl Into<String>,
        attribute: impl Into<String>,
        locale: Locale,
        candidate: &str,
        separator: &str,
    ) -> Self {
        Self {
            table: table.into(),
            attribute: attribute.into(),
            locale,
            comparisons: vec![
                SlugComparison::Equals(candidate.to_string()),
                SlugComparison::PrefixedBy(format!("{candidate}{separator}")),
            ],
            exclude: None,
            soft_delete_column: None,
            include_trashed: false,
            constraints: Vec::new(),
        }
    }

    #[must_use]
    pub const fn excluding(mut self, key: Option<RecordKey>) -> Self {
        self.exclude = key;
        self
    }

    #[must_use]
    pub fn with_soft_deletes(mut self, column: Option<&str>, include_trashed: bool) -> Self {
        self.soft_delete_column = column.map(str::to_string);
        self.include_trashed = include_trashed;
        self
    }

    #[must_use]
    pub fn with_constraints(mut self, constraints: Vec<SlugConstraint>) -> Self {
        self.constraints.extend(constraints);
        self
    }

    #[must_use]
    pub fn matches(&self, slug: &str) -> bool {
        self.comparisons.iter().any(|c| c.matches(slug))
    }

    /// Whether trashed rows must be filtered out.
    #[must_use]
    pub const fn excludes_trashed(&self) -> bool {
        self.soft_delete_column.is_some() && !self.include_trashed
    }
}

#[async_trait]
pub trait SlugRepository: Send + Sync {
    /// Slugs stored for `query.locale` on other records that match the query.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::domain::errors::DomainError`] when the store fails.
    async fn find_similar(&self, query: &SlugQuery) -> DomainResult<Vec<String>>;
}
