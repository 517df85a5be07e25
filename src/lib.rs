//! Per-locale slug generation for records, with reserved-word avoidance and
//! numeric-suffix uniqueness resolution against a pluggable slug store.
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use application::{
    ApplicationError, ApplicationResult,
    configuration::{ConfigurationResolver, SlugFunctionRegistry},
    services::{SlugService, SlugSubject},
};
pub use config::SluggableConfig;
