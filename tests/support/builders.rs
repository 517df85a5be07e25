// tests/support/builders.rs
use serde_json::{Map, Value};

use sluggable_core::domain::slug::{
    Locale, LocaleSlugMap, RecordKey, SlugDocument, SlugOptions, SluggableAttribute,
};
use sluggable_core::infrastructure::repositories::StoredSlugs;

pub fn locale(code: &str) -> Locale {
    Locale::new(code).unwrap()
}

pub fn key(id: i64) -> RecordKey {
    RecordKey::new(id).unwrap()
}

pub fn slugs(entries: &[(&str, &str)]) -> LocaleSlugMap {
    entries
        .iter()
        .map(|(code, slug)| (locale(code), slug.to_string()))
        .collect()
}

pub fn localized(entries: &[(&str, &str)]) -> Value {
    let map: Map<String, Value> = entries
        .iter()
        .map(|(code, text)| (code.to_string(), Value::String(text.to_string())))
        .collect();
    Value::Object(map)
}

/// A stored row of the `posts` table carrying `slug` values.
pub fn stored_post(id: i64, entries: &[(&str, &str)]) -> StoredSlugs {
    StoredSlugs::new("posts", key(id)).with_slugs("slug", slugs(entries))
}

/// Builder for `posts` documents whose `slug` attribute is derived from `title`.
pub struct PostBuilder {
    title: Vec<(String, String)>,
    options: SlugOptions,
    slug: Option<Value>,
    persisted: Option<i64>,
}

impl PostBuilder {
    pub fn new() -> Self {
        Self {
            title: Vec::new(),
            options: SlugOptions::default().with_source(["title"]),
            slug: None,
            persisted: None,
        }
    }

    pub fn title(mut self, code: &str, text: &str) -> Self {
        self.title.push((code.to_string(), text.to_string()));
        self
    }

    pub fn options(mut self, options: SlugOptions) -> Self {
        self.options = options;
        self
    }

    pub fn slug(mut self, entries: &[(&str, &str)]) -> Self {
        self.slug = Some(localized(entries));
        self
    }

    pub fn persisted(mut self, id: i64) -> Self {
        self.persisted = Some(id);
        self
    }

    pub fn build(self) -> SlugDocument {
        let title: Vec<(&str, &str)> = self
            .title
            .iter()
            .map(|(code, text)| (code.as_str(), text.as_str()))
            .collect();

        let mut document = SlugDocument::new("posts")
            .with_sluggable(SluggableAttribute::new("slug").with_options(self.options));
        if !title.is_empty() {
            document.set_attribute("title", localized(&title));
        }
        if let Some(slug) = self.slug {
            document.set_attribute("slug", slug);
        }
        if let Some(id) = self.persisted {
            document.mark_persisted(key(id));
        }
        document
    }
}
