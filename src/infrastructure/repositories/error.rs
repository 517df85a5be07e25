use crate::domain::errors::DomainError;

#[must_use]
#[allow(clippy::needless_pass_by_value)]
pub fn map_sqlx(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) => {
            if let Some(code) = db_err.code() {
                match code.as_ref() {
                    // undefined_table / undefined_column
                    "42P01" | "42703" => {
                        return DomainError::NotFound(db_err.message().to_string());
                    }
                    // datatype_mismatch / invalid_text_representation
                    "42804" | "22P02" => {
                        return DomainError::Validation(db_err.message().to_string());
                    }
                    _ => {}
                }
            }

            DomainError::Persistence(db_err.message().to_string())
        }
        sqlx::Error::RowNotFound => DomainError::NotFound("row not found".into()),
        _ => DomainError::Persistence(err.to_string()),
    }
}
