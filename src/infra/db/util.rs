use sqlx::error::ErrorKind;

use crate::application::repos::RepoError;

/// Map a sqlx failure onto the adapter taxonomy: constraint violations are
/// payload rejections, everything else is treated as transient
/// unavailability the caller may retry.
pub fn map_sqlx_error(err: sqlx::Error) -> RepoError {
    match err {
        sqlx::Error::RowNotFound => RepoError::NotFound,
        sqlx::Error::Database(db_err) => match db_err.kind() {
            ErrorKind::UniqueViolation
            | ErrorKind::ForeignKeyViolation
            | ErrorKind::NotNullViolation
            | ErrorKind::CheckViolation => RepoError::validation_rejected(db_err.to_string()),
            _ => RepoError::unavailable(db_err),
        },
        other => RepoError::unavailable(other),
    }
}
