// src/application/services/cache.rs
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::application::ports::util::Transliterator;

/// Transliterator instances keyed by `(record type, attribute)`.
///
/// Entries are created on first use and live as long as the owning service.
#[derive(Default)]
pub struct TransliteratorCache {
    engines: RwLock<HashMap<(String, String), Arc<dyn Transliterator>>>,
}

impl TransliteratorCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get_or_insert_with<F>(
        &self,
        type_name: &str,
        attribute: &str,
        init: F,
    ) -> Arc<dyn Transliterator>
    where
        F: FnOnce() -> Arc<dyn Transliterator>,
    {
        let key = (type_name.to_string(), attribute.to_string());

        if let Some(engine) = self
            .engines
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            return Arc::clone(engine);
        }

        let mut engines = self.engines.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(engines.entry(key).or_insert_with(init))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.engines
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.engines
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}
