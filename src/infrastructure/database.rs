use sqlx::{PgPool, postgres::PgPoolOptions};

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::config::SluggableConfig;
use crate::infrastructure::repositories::PostgresSlugRepository;

/// # Errors
///
/// Returns the `sqlx` error when no connection can be established.
pub async fn init_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(16)
        .connect(database_url)
        .await
}

/// Connect the Postgres slug store named by `DATABASE_URL`.
///
/// # Errors
///
/// Fails with [`ApplicationError::Infrastructure`] when the URL is missing or
/// the pool cannot connect.
pub async fn connect_slug_store(
    config: &SluggableConfig,
) -> ApplicationResult<PostgresSlugRepository> {
    let url = config
        .require_database_url()
        .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;

    let pool = init_pool(url).await.map_err(|err| {
        tracing::error!(error = %err, "failed to connect slug store");
        ApplicationError::infrastructure(err.to_string())
    })?;
    tracing::info!("slug store connected");

    Ok(PostgresSlugRepository::new(pool))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::slug::{Locale, SlugOptions};

    #[tokio::test]
    async fn missing_database_url_is_reported() {
        let config = SluggableConfig::new(vec![Locale::new("en").unwrap()], SlugOptions::default());

        let err = connect_slug_store(&config).await.err().unwrap();

        assert!(matches!(err, ApplicationError::Infrastructure(msg) if msg.contains("DATABASE_URL")));
    }
}
