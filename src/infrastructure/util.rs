use crate::application::ports::util::Transliterator;
use slug::slugify;

const SLUG_CRATE_SEPARATOR: &str = "-";

/// Transliterator backed by the `slug` crate, with optional replacement rules
/// applied to the raw text first (e.g. `&` -> `and`).
#[derive(Debug, Default, Clone)]
pub struct DefaultTransliterator {
    rules: Vec<(String, String)>,
}

impl DefaultTransliterator {
    #[must_use]
    pub const fn new() -> Self {
        Self { rules: Vec::new() }
    }

    #[must_use]
    pub fn with_rule(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.rules.push((from.into(), to.into()));
        self
    }
}

impl Transliterator for DefaultTransliterator {
    fn slugify(&self, input: &str, separator: &str) -> String {
        let text = self
            .rules
            .iter()
            .fold(input.to_string(), |text, (from, to)| {
                text.replace(from.as_str(), &format!(" {to} "))
            });

        let slug = slugify(text);
        if separator == SLUG_CRATE_SEPARATOR {
            slug
        } else {
            slug.replace(SLUG_CRATE_SEPARATOR, separator)
        }
    }
}
