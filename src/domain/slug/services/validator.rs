// src/domain/slug/services/validator.rs
use crate::domain::slug::config::SlugConfig;
use crate::domain::slug::record::SluggableRecord;
use crate::domain::slug::value_objects::{ExistingSlugSet, LocaleSlugMap};

/// Moves candidates away from reserved words by suffixing them.
pub struct ReservedWordValidator;

impl ReservedWordValidator {
    #[must_use]
    pub fn validate(
        slugs: LocaleSlugMap,
        config: &SlugConfig,
        record: &dyn SluggableRecord,
    ) -> LocaleSlugMap {
        let Some(reserved) = config.reserved.resolve(record) else {
            return slugs;
        };
        if reserved.is_empty() {
            return slugs;
        }

        let separator = config.separator.as_str();
        slugs
            .into_iter()
            .map(|(locale, slug)| {
                if !reserved.contains(&slug) {
                    return (locale, slug);
                }

                // each locale is compared against the reserved set on its own
                let single = LocaleSlugMap::new().with(locale.clone(), slug.as_str());
                let taken = ExistingSlugSet::single(locale.clone(), reserved.clone());
                let suffixes = config.unique_suffix.suffixes(&single, separator, &taken);

                match suffixes.get(&locale) {
                    Some(suffix) => {
                        tracing::debug!(
                            record_type = record.type_name(),
                            locale = %locale,
                            slug = %slug,
                            "slug is a reserved word"
                        );
                        let suffixed = format!("{slug}{separator}{suffix}");
                        (locale, suffixed)
                    }
                    None => (locale, slug),
                }
            })
            .collect()
    }
}
