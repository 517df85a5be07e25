// src/config.rs
use std::{env, fs, path::Path};

use thiserror::Error;

use crate::domain::slug::config::SlugOptions;
use crate::domain::slug::value_objects::Locale;

#[derive(Clone, Debug)]
pub struct SluggableConfig {
    locales: Vec<Locale>,
    defaults: SlugOptions,
    database_url: Option<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    Missing(&'static str),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

fn default_locales() -> Vec<Locale> {
    Locale::new("en").into_iter().collect()
}

fn parse_locales(raw: &str) -> Result<Vec<Locale>, ConfigError> {
    let locales = raw
        .split(',')
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .map(|code| Locale::new(code).map_err(|err| ConfigError::Invalid(err.to_string())))
        .collect::<Result<Vec<_>, _>>()?;

    if locales.is_empty() {
        return Err(ConfigError::Invalid(
            "SLUGGABLE_LOCALES must name at least one locale".into(),
        ));
    }
    Ok(locales)
}

fn parse_flag(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}

impl SluggableConfig {
    #[must_use]
    pub const fn new(locales: Vec<Locale>, defaults: SlugOptions) -> Self {
        Self {
            locales,
            defaults,
            database_url: None,
        }
    }

    /// Build configuration from environment variables.
    ///
    /// `SLUGGABLE_DEFAULTS` may point at a JSON file of slug options; the
    /// individual `SLUGGABLE_*` variables are layered on top of it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for malformed locales, lengths or
    /// defaults files.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Allow dotenv files to populate env vars when present.
        dotenvy::dotenv().ok();

        let locales = match env::var("SLUGGABLE_LOCALES") {
            Ok(raw) => parse_locales(&raw)?,
            Err(_) => default_locales(),
        };

        let mut defaults = match env::var("SLUGGABLE_DEFAULTS") {
            Ok(path) => Self::load_defaults(Path::new(&path))?,
            Err(_) => SlugOptions::default(),
        };

        if let Ok(separator) = env::var("SLUGGABLE_SEPARATOR") {
            defaults.separator = Some(separator);
        }

        if let Ok(raw) = env::var("SLUGGABLE_MAX_LENGTH") {
            let max_length = raw.trim().parse::<u64>().map_err(|_| {
                ConfigError::Invalid("SLUGGABLE_MAX_LENGTH must be a non-negative integer".into())
            })?;
            defaults = defaults.with_max_length(max_length);
        }

        if let Ok(raw) = env::var("SLUGGABLE_UNIQUE") {
            defaults.unique = Some(parse_flag(&raw));
        }
        if let Ok(raw) = env::var("SLUGGABLE_ON_UPDATE") {
            defaults.on_update = Some(parse_flag(&raw));
        }
        if let Ok(raw) = env::var("SLUGGABLE_INCLUDE_TRASHED") {
            defaults.include_trashed = Some(parse_flag(&raw));
        }

        Ok(Self {
            locales,
            defaults,
            database_url: env::var("DATABASE_URL").ok(),
        })
    }

    /// Read slug option defaults from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the file cannot be read or parsed.
    pub fn load_defaults(path: &Path) -> Result<SlugOptions, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|err| {
            ConfigError::Invalid(format!("cannot read {}: {err}", path.display()))
        })?;
        serde_json::from_str(&raw).map_err(|err| {
            ConfigError::Invalid(format!("cannot parse {}: {err}", path.display()))
        })
    }

    #[must_use]
    pub fn locales(&self) -> &[Locale] {
        &self.locales
    }

    #[must_use]
    pub const fn defaults(&self) -> &SlugOptions {
        &self.defaults
    }

    #[must_use]
    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref()
    }

    /// Database URL for the Postgres slug store, required by callers that need one.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] when `DATABASE_URL` is unset.
    pub fn require_database_url(&self) -> Result<&str, ConfigError> {
        self.database_url()
            .ok_or(ConfigError::Missing("DATABASE_URL"))
    }
}
