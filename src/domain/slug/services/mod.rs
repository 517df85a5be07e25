// src/domain/slug/services/mod.rs
mod builder;
mod resolver;
mod validator;

pub use builder::SlugBuilder;
pub use resolver::UniquenessResolver;
pub use validator::ReservedWordValidator;
