// src/application/services/mod.rs
pub mod cache;
mod slug_service;

pub use cache::TransliteratorCache;
pub use slug_service::{RecordFactory, SlugService, SlugSubject};
