//! Clear Cart Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{carts::errors::into_status_error, extensions::*, state::State};

/// Clear Cart Handler
///
/// Removes every item. Clearing an empty or missing cart succeeds.
#[endpoint(
    tags("carts"),
    summary = "Clear Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Cart cleared"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "carts.clear",
    skip(business, depot),
    fields(
        user_uuid = tracing::field::Empty,
        business_uuid = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    business: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;
    let business = business.into_inner();

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(user));
    span.record("business_uuid", tracing::field::display(business));

    state
        .app
        .carts
        .clear_cart(user, business.into())
        .await
        .map_err(into_status_error)?;

    tracing::info!(business_uuid = %business, "cleared cart");

    Ok(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use testresult::TestResult;

    use foundry_app::domain::carts::{CartsServiceError, MockCartsService};

    use crate::test_helpers::{TEST_USER_UUID, carts_service};

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        carts_service(
            carts,
            Router::with_path("businesses/{business}/cart/clear").post(handler),
        )
    }

    #[tokio::test]
    async fn test_clear_cart_success() -> TestResult {
        let business = Uuid::now_v7();

        let mut carts = MockCartsService::new();

        carts
            .expect_clear_cart()
            .once()
            .withf(move |user, b| *user == TEST_USER_UUID && b.into_uuid() == business)
            .return_once(|_, _| Ok(()));

        let res = TestClient::post(format!(
            "http://example.com/businesses/{business}/cart/clear"
        ))
        .send(&make_service(carts))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_clear_cart_storage_error_returns_500() -> TestResult {
        let business = Uuid::now_v7();

        let mut carts = MockCartsService::new();

        carts
            .expect_clear_cart()
            .once()
            .return_once(|_, _| Err(CartsServiceError::Sql(sqlx::Error::PoolTimedOut)));

        let res = TestClient::post(format!(
            "http://example.com/businesses/{business}/cart/clear"
        ))
        .send(&make_service(carts))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
