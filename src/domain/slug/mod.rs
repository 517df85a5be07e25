pub mod config;
pub mod document;
pub mod record;
pub mod repository;
pub mod services;
pub mod suffix;
pub mod value_objects;

pub use config::{ReservedWords, SlugConfig, SlugMethod, SlugOptions, SlugSource, UniqueSuffix};
pub use document::SlugDocument;
pub use record::{SluggableAttribute, SluggableRecord};
pub use repository::{SlugComparison, SlugConstraint, SlugQuery, SlugRepository};
pub use value_objects::{ExistingSlugSet, Locale, LocaleMap, LocaleSlugMap, RecordKey, SourceValue};
