// src/application/ports/mod.rs
pub mod util;

pub type TransliteratorPort = dyn util::Transliterator;
pub type SlugRepositoryPort = dyn crate::domain::slug::SlugRepository;
