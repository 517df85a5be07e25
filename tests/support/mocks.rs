// tests/support/mocks.rs
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use sluggable_core::application::ports::util::Transliterator;
use sluggable_core::domain::errors::{DomainError, DomainResult};
use sluggable_core::domain::slug::{SlugQuery, SlugRepository};
use sluggable_core::infrastructure::repositories::InMemorySlugRepository;

/* -------------------------------- SlugRepository -------------------------------- */

/// In-memory store that also records every query it receives.
#[derive(Default)]
pub struct CapturingSlugRepo {
    pub inner: InMemorySlugRepository,
    queries: Mutex<Vec<SlugQuery>>,
}

impl CapturingSlugRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queries(&self) -> Vec<SlugQuery> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl SlugRepository for CapturingSlugRepo {
    async fn find_similar(&self, query: &SlugQuery) -> DomainResult<Vec<String>> {
        self.queries.lock().unwrap().push(query.clone());
        self.inner.find_similar(query).await
    }
}

/// Store whose every lookup fails.
pub struct FailingSlugRepo;

#[async_trait]
impl SlugRepository for FailingSlugRepo {
    async fn find_similar(&self, _query: &SlugQuery) -> DomainResult<Vec<String>> {
        Err(DomainError::Persistence("connection reset".into()))
    }
}

/* -------------------------------- Transliterator -------------------------------- */

/// Transliterator that counts how often it was constructed through a record hook.
#[derive(Clone, Default)]
pub struct CountingHook {
    calls: Arc<AtomicUsize>,
}

impl CountingHook {
    pub fn record_call(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

/// Passes text through unchanged apart from lowercasing and joining words.
pub struct PlainTransliterator;

impl Transliterator for PlainTransliterator {
    fn slugify(&self, input: &str, separator: &str) -> String {
        input
            .split_whitespace()
            .map(str::to_lowercase)
            .collect::<Vec<_>>()
            .join(separator)
    }
}
