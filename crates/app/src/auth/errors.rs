//! Auth service errors.

use sqlx::{Error, error::ErrorKind};
use thiserror::Error;

use crate::auth::ApiTokenError;

const API_TOKENS_USER_FKEY: &str = "api_tokens_user_uuid_fkey";

#[derive(Debug, Error)]
pub enum AuthServiceError {
    /// Unknown, malformed, expired or revoked token. Callers cannot tell which.
    #[error("token not found")]
    NotFound,

    #[error("user does not exist")]
    UnknownUser,

    #[error("storage error")]
    Sql(#[source] Error),

    #[error("token processing error")]
    Token(#[source] ApiTokenError),
}

impl From<Error> for AuthServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        let is_unknown_user = error.as_database_error().is_some_and(|database_error| {
            matches!(database_error.kind(), ErrorKind::ForeignKeyViolation)
                && database_error.constraint() == Some(API_TOKENS_USER_FKEY)
        });

        if is_unknown_user {
            Self::UnknownUser
        } else {
            Self::Sql(error)
        }
    }
}

impl From<ApiTokenError> for AuthServiceError {
    fn from(error: ApiTokenError) -> Self {
        Self::Token(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_row_is_not_found() {
        assert!(matches!(
            AuthServiceError::from(Error::RowNotFound),
            AuthServiceError::NotFound
        ));
    }

    #[test]
    fn pool_errors_stay_storage_errors() {
        assert!(matches!(
            AuthServiceError::from(Error::PoolClosed),
            AuthServiceError::Sql(_)
        ));
    }
}
