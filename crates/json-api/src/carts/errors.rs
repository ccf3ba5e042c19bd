//! Errors

use salvo::http::StatusError;
use tracing::error;

use foundry_app::domain::carts::{CartsServiceError, PricingError};

pub(crate) fn into_status_error(error: CartsServiceError) -> StatusError {
    match error {
        CartsServiceError::Unauthorized => StatusError::unauthorized().brief("Unknown user"),
        CartsServiceError::InvalidArgument(reason) => StatusError::bad_request().brief(reason),
        CartsServiceError::NotFound => StatusError::not_found().brief("Cart or item not found"),
        CartsServiceError::EmptyCart => StatusError::conflict().brief("Cart has no items"),
        CartsServiceError::ProductNotFound => StatusError::not_found().brief("Product not found"),
        CartsServiceError::Sql(source) => {
            error!("cart storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}

pub(crate) fn pricing_status_error(error: PricingError) -> StatusError {
    into_status_error(error.into())
}
