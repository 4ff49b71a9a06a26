use thiserror::Error;

use super::validation::ValidationFailure;

/// SQLSTATE raised by PostgreSQL on a unique constraint violation
const UNIQUE_VIOLATION: &str = "23505";

/// Errors surfaced by the persistence layer
#[derive(Debug, Error)]
pub enum StoreError {
    /// An id string that cannot be read as a record id
    #[error("Cast to RecordId failed for value \"{value}\"")]
    Cast { value: String },

    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    #[error(transparent)]
    Validation(#[from] ValidationFailure),

    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error(transparent)]
    Sqlx(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
                let detail = db_err
                    .constraint()
                    .map(str::to_string)
                    .unwrap_or_else(|| db_err.message().to_string());
                return StoreError::DuplicateKey(detail);
            }
        }
        StoreError::Sqlx(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_database_sqlx_errors_stay_opaque() {
        let err = StoreError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, StoreError::Sqlx(sqlx::Error::RowNotFound)));
    }

    #[test]
    fn cast_message_names_the_value() {
        let err = StoreError::Cast { value: "abc".to_string() };
        assert_eq!(err.to_string(), "Cast to RecordId failed for value \"abc\"");
    }
}
