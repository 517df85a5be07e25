// src/domain/slug/services/resolver.rs
use std::sync::Arc;

use crate::domain::errors::DomainResult;
use crate::domain::slug::config::SlugConfig;
use crate::domain::slug::record::SluggableRecord;
use crate::domain::slug::repository::{SlugQuery, SlugRepository};
use crate::domain::slug::value_objects::{ExistingSlugSet, LocaleSlugMap};

/// Appends numeric suffixes so that every locale's slug is free in the store.
pub struct UniquenessResolver {
    repository: Arc<dyn SlugRepository>,
}

impl UniquenessResolver {
    #[must_use]
    pub const fn new(repository: Arc<dyn SlugRepository>) -> Self {
        Self { repository }
    }

    /// Suffix every locale whose candidate already exists in the store.
    ///
    /// # Errors
    ///
    /// Propagates store errors unchanged.
    pub async fn resolve(
        &self,
        slugs: LocaleSlugMap,
        config: &SlugConfig,
        record: &dyn SluggableRecord,
        attribute: &str,
    ) -> DomainResult<LocaleSlugMap> {
        if !config.unique {
            return Ok(slugs);
        }

        let existing = self
            .existing_slugs(&slugs, config, record, attribute)
            .await?;
        if existing.is_empty() {
            return Ok(slugs);
        }

        let separator = config.separator.as_str();
        let suffixes = config.unique_suffix.suffixes(&slugs, separator, &existing);

        Ok(slugs
            .into_iter()
            .map(|(locale, slug)| match suffixes.get(&locale) {
                Some(suffix) => {
                    tracing::debug!(
                        record_type = record.type_name(),
                        attribute,
                        locale = %locale,
                        slug = %slug,
                        suffix = %suffix,
                        "slug collides with existing records"
                    );
                    let unique = format!("{slug}{separator}{suffix}");
                    (locale, unique)
                }
                None => (locale, slug),
            })
            .collect())
    }

    /// Existing slugs per locale that equal or extend each candidate.
    ///
    /// # Errors
    ///
    /// Propagates store errors unchanged.
    pub async fn existing_slugs(
        &self,
        slugs: &LocaleSlugMap,
        config: &SlugConfig,
        record: &dyn SluggableRecord,
        attribute: &str,
    ) -> DomainResult<ExistingSlugSet> {
        let mut existing = ExistingSlugSet::new();

        for (locale, candidate) in slugs.iter() {
            let query = SlugQuery::similar(
                record.table(),
                attribute,
                locale.clone(),
                candidate,
                &config.separator,
            )
            .excluding(record.key())
            .with_soft_deletes(record.soft_delete_column(), config.include_trashed)
            .with_constraints(record.unique_slug_constraints(attribute, config, candidate));

            let found = self.repository.find_similar(&query).await?;
            existing.extend(locale.clone(), found);
        }

        Ok(existing)
    }
}
