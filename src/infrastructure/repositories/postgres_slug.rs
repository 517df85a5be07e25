// src/infrastructure/repositories/postgres_slug.rs
use super::map_sqlx;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::slug::{SlugComparison, SlugConstraint, SlugQuery, SlugRepository};
use async_trait::async_trait;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

const DEFAULT_KEY_COLUMN: &str = "id";

/// Looks up existing slugs in Postgres tables whose slug attributes are JSONB
/// columns keyed by locale, e.g. `slug = {"en": "hello-world", "fr": "bonjour"}`.
#[derive(Clone)]
pub struct PostgresSlugRepository {
    pool: PgPool,
    key_column: String,
}

impl PostgresSlugRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            key_column: DEFAULT_KEY_COLUMN.to_string(),
        }
    }

    #[must_use]
    pub fn with_key_column(mut self, column: impl Into<String>) -> Self {
        self.key_column = column.into();
        self
    }

    fn build_query(&self, query: &SlugQuery) -> DomainResult<QueryBuilder<'static, Postgres>> {
        let table = quote_identifier(&query.table)?;
        let attribute = quote_identifier(&query.attribute)?;
        let locale = query.locale.as_str().to_string();

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("SELECT DISTINCT (");
        builder.push(&attribute);
        builder.push(" ->> ");
        builder.push_bind(locale.clone());
        builder.push(") AS slug FROM ");
        builder.push(&table);
        builder.push(" WHERE (");

        for (index, comparison) in query.comparisons.iter().enumerate() {
            if index > 0 {
                builder.push(" OR ");
            }
            builder.push("(");
            builder.push(&attribute);
            builder.push(" ->> ");
            builder.push_bind(locale.clone());
            match comparison {
                SlugComparison::Equals(value) => {
                    builder.push(") = ");
                    builder.push_bind(value.clone());
                }
                SlugComparison::PrefixedBy(prefix) => {
                    builder.push(") LIKE ");
                    builder.push_bind(format!("{}%", escape_like(prefix)));
                    builder.push(" ESCAPE '\\'");
                }
            }
        }
        if query.comparisons.is_empty() {
            builder.push("FALSE");
        }
        builder.push(")");

        if let Some(key) = query.exclude {
            builder.push(" AND ");
            builder.push(quote_identifier(&self.key_column)?);
            builder.push(" <> ");
            builder.push_bind(i64::from(key));
        }

        if query.excludes_trashed() {
            if let Some(column) = &query.soft_delete_column {
                builder.push(" AND ");
                builder.push(quote_identifier(column)?);
                builder.push(" IS NULL");
            }
        }

        for constraint in &query.constraints {
            match constraint {
                SlugConstraint::Equals { column, value } => {
                    builder.push(" AND ");
                    builder.push(quote_identifier(column)?);
                    builder.push("::text = ");
                    builder.push_bind(value.clone());
                }
                SlugConstraint::IsNull { column } => {
                    builder.push(" AND ");
                    builder.push(quote_identifier(column)?);
                    builder.push(" IS NULL");
                }
            }
        }

        Ok(builder)
    }
}

#[derive(Debug, FromRow)]
struct SlugRow {
    slug: Option<String>,
}

#[async_trait]
impl SlugRepository for PostgresSlugRepository {
    async fn find_similar(&self, query: &SlugQuery) -> DomainResult<Vec<String>> {
        let mut builder = self.build_query(query)?;
        let rows = builder
            .build_query_as::<SlugRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        Ok(rows.into_iter().filter_map(|row| row.slug).collect())
    }
}

/// Double-quote an identifier, allowing `schema.table` but nothing that needs escaping.
fn quote_identifier(name: &str) -> DomainResult<String> {
    let parts: Vec<&str> = name.split('.').collect();
    let valid = parts.iter().all(|part| {
        let mut chars = part.chars();
        matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
            && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
    });

    if !valid {
        return Err(DomainError::Validation(format!(
            "'{name}' is not a valid identifier"
        )));
    }

    Ok(parts
        .iter()
        .map(|part| format!("\"{part}\""))
        .collect::<Vec<_>>()
        .join("."))
}

fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::slug::{Locale, RecordKey};

    #[test]
    fn identifiers_are_quoted_and_validated() {
        assert_eq!(quote_identifier("posts").unwrap(), "\"posts\"");
        assert_eq!(quote_identifier("cms.posts").unwrap(), "\"cms\".\"posts\"");
        assert!(quote_identifier("posts; DROP TABLE x").is_err());
        assert!(quote_identifier("1posts").is_err());
        assert!(quote_identifier("").is_err());
    }

    #[test]
    fn like_wildcards_are_escaped() {
        assert_eq!(escape_like("snake_case-"), "snake\\_case-");
        assert_eq!(escape_like("100%"), "100\\%");
    }

    #[tokio::test]
    async fn query_text_follows_the_descriptor() {
        let pool = PgPool::connect_lazy("postgres://localhost/unused").unwrap();
        let repo = PostgresSlugRepository::new(pool);
        let query = SlugQuery::similar("posts", "slug", Locale::new("en").unwrap(), "post", "-")
            .excluding(Some(RecordKey::new(7).unwrap()))
            .with_soft_deletes(Some("deleted_at"), false)
            .with_constraints(vec![SlugConstraint::Equals {
                column: "tenant_id".into(),
                value: "3".into(),
            }]);

        let builder = repo.build_query(&query).unwrap();
        let sql = builder.sql();

        assert_eq!(
            sql,
            "SELECT DISTINCT (\"slug\" ->> $1) AS slug FROM \"posts\" WHERE \
             ((\"slug\" ->> $2) = $3 OR (\"slug\" ->> $4) LIKE $5 ESCAPE '\\') \
             AND \"id\" <> $6 AND \"deleted_at\" IS NULL AND \"tenant_id\"::text = $7"
        );
    }
}
