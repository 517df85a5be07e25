// tests/support/helpers.rs
use std::sync::Arc;

use once_cell::sync::Lazy;

use sluggable_core::application::configuration::{ConfigurationResolver, SlugFunctionRegistry};
use sluggable_core::application::services::SlugService;
use sluggable_core::domain::slug::{SlugOptions, SlugRepository};
use sluggable_core::infrastructure::telemetry::init_tracing;
use sluggable_core::infrastructure::util::DefaultTransliterator;

use super::builders::locale;

static TRACING: Lazy<()> = Lazy::new(|| {
    let _ = init_tracing("sluggable_core=debug");
});

/// Service for locales `en` and `fr` with built-in defaults.
pub fn service(repository: Arc<dyn SlugRepository>) -> SlugService {
    service_with(SlugOptions::default(), SlugFunctionRegistry::new(), repository)
}

pub fn service_with(
    defaults: SlugOptions,
    registry: SlugFunctionRegistry,
    repository: Arc<dyn SlugRepository>,
) -> SlugService {
    Lazy::force(&TRACING);
    SlugService::new(
        ConfigurationResolver::new(defaults, registry),
        vec![locale("en"), locale("fr")],
        Arc::new(DefaultTransliterator::new()),
        repository,
    )
}
