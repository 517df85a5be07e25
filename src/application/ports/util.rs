// src/application/ports/util.rs
/// Turns arbitrary text into a URL-safe slug joined by `separator`.
pub trait Transliterator: Send + Sync {
    fn slugify(&self, input: &str, separator: &str) -> String;
}
