//! Carts service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::carts::pricing::PricingError;

const CARTS_USER_FKEY: &str = "carts_user_uuid_fkey";
const CARTS_BUSINESS_FKEY: &str = "carts_business_uuid_fkey";
const CART_ITEMS_PRODUCT_FKEY: &str = "cart_items_product_uuid_fkey";

#[derive(Debug, Error)]
pub enum CartsServiceError {
    #[error("no identified user")]
    Unauthorized,

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("cart or item not found")]
    NotFound,

    #[error("cart has no items")]
    EmptyCart,

    #[error("product not found")]
    ProductNotFound,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl CartsServiceError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidArgument(reason.into())
    }
}

impl From<Error> for CartsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        let Some(database_error) = error.as_database_error() else {
            return Self::Sql(error);
        };

        match database_error.kind() {
            ErrorKind::ForeignKeyViolation => match database_error.constraint() {
                Some(CARTS_USER_FKEY) => Self::Unauthorized,
                Some(CART_ITEMS_PRODUCT_FKEY) => Self::ProductNotFound,
                Some(CARTS_BUSINESS_FKEY) => Self::invalid("unknown business"),
                _ => Self::invalid("invalid reference"),
            },
            ErrorKind::CheckViolation => Self::invalid(format!(
                "constraint violated: {}",
                database_error.constraint().unwrap_or("check")
            )),
            ErrorKind::NotNullViolation => Self::invalid("missing required data"),
            _ => Self::Sql(error),
        }
    }
}

impl From<PricingError> for CartsServiceError {
    fn from(error: PricingError) -> Self {
        Self::InvalidArgument(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_maps_to_not_found() {
        assert!(matches!(
            CartsServiceError::from(Error::RowNotFound),
            CartsServiceError::NotFound
        ));
    }

    #[test]
    fn pool_errors_are_storage_errors() {
        assert!(matches!(
            CartsServiceError::from(Error::PoolTimedOut),
            CartsServiceError::Sql(_)
        ));
    }

    #[test]
    fn overflow_is_an_invalid_argument() {
        assert!(matches!(
            CartsServiceError::from(PricingError::Overflow),
            CartsServiceError::InvalidArgument(reason) if reason.contains("overflow")
        ));
    }
}
