// src/domain/slug/services/builder.rs
use std::sync::Arc;

use crate::application::ports::util::Transliterator;
use crate::domain::slug::config::{SlugConfig, SlugMethod};
use crate::domain::slug::value_objects::{LocaleMap, LocaleSlugMap, SourceValue};

/// Turns per-locale source values into candidate slugs.
pub struct SlugBuilder {
    transliterator: Arc<dyn Transliterator>,
}

impl SlugBuilder {
    #[must_use]
    pub const fn new(transliterator: Arc<dyn Transliterator>) -> Self {
        Self { transliterator }
    }

    #[must_use]
    pub fn build(&self, source: &LocaleMap<SourceValue>, config: &SlugConfig) -> LocaleSlugMap {
        // legacy compatibility: booleans slug as 0 / 1
        let source: LocaleMap<SourceValue> = source
            .iter()
            .map(|(locale, value)| (locale.clone(), value.clone().normalize()))
            .collect();

        let mut slugs = match &config.method {
            SlugMethod::Transliterate => source
                .iter()
                .map(|(locale, value)| {
                    let text = value.to_string();
                    (
                        locale.clone(),
                        self.transliterator.slugify(&text, &config.separator),
                    )
                })
                .collect(),
            SlugMethod::Custom { apply, .. } => apply(&source, &config.separator),
        };

        if let Some(max_length) = config.max_length {
            for (_, slug) in slugs.iter_mut() {
                truncate_chars(slug, max_length);
            }
        }

        slugs
    }
}

fn truncate_chars(value: &mut String, max_chars: usize) {
    if let Some((index, _)) = value.char_indices().nth(max_chars) {
        value.truncate(index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::slug::value_objects::Locale;

    struct Lowercase;

    impl Transliterator for Lowercase {
        fn slugify(&self, input: &str, separator: &str) -> String {
            input.to_lowercase().replace(' ', separator)
        }
    }

    fn locale(code: &str) -> Locale {
        Locale::new(code).unwrap()
    }

    fn source(entries: &[(&str, SourceValue)]) -> LocaleMap<SourceValue> {
        entries
            .iter()
            .map(|(code, value)| (locale(code), value.clone()))
            .collect()
    }

    #[test]
    fn truncates_before_any_suffixing() {
        let builder = SlugBuilder::new(Arc::new(Lowercase));
        let config = SlugConfig::default().with_max_length(5);

        let slugs = builder.build(&source(&[("en", SourceValue::text("Hello World"))]), &config);

        assert_eq!(slugs.get(&locale("en")), Some("hello"));
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let builder = SlugBuilder::new(Arc::new(Lowercase));
        let config = SlugConfig::default().with_max_length(3);

        let slugs = builder.build(&source(&[("ja", SourceValue::text("日本語です"))]), &config);

        assert_eq!(slugs.get(&locale("ja")), Some("日本語"));
    }

    #[test]
    fn booleans_are_coerced_to_integers() {
        let builder = SlugBuilder::new(Arc::new(Lowercase));

        let slugs = builder.build(
            &source(&[("en", SourceValue::Bool(true)), ("fr", SourceValue::Bool(false))]),
            &SlugConfig::default(),
        );

        assert_eq!(slugs.get(&locale("en")), Some("1"));
        assert_eq!(slugs.get(&locale("fr")), Some("0"));
    }

    #[test]
    fn custom_method_replaces_per_locale_iteration() {
        let builder = SlugBuilder::new(Arc::new(Lowercase));
        let config = SlugConfig {
            method: SlugMethod::Custom {
                name: "reverse".into(),
                apply: Arc::new(|source: &LocaleMap<SourceValue>, separator: &str| -> LocaleSlugMap {
                    source
                        .iter()
                        .map(|(locale, value)| {
                            let reversed: String = value.to_string().chars().rev().collect();
                            (locale.clone(), format!("{reversed}{separator}x"))
                        })
                        .collect()
                }),
            },
            separator: "_".into(),
            ..SlugConfig::default()
        };

        let slugs = builder.build(&source(&[("en", SourceValue::text("abc"))]), &config);

        assert_eq!(slugs.get(&locale("en")), Some("cba_x"));
    }
}
