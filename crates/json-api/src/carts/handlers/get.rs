//! Get Cart Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    carts::{
        errors::{into_status_error, pricing_status_error},
        models::CartResponse,
    },
    extensions::*,
    state::State,
};

/// Get Cart Handler
///
/// Returns the user's cart for a business, or `null` when none exists yet.
/// Reading never creates a cart.
#[endpoint(
    tags("carts"),
    summary = "Get Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Cart, or null"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    business: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<Option<CartResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let cart = state
        .app
        .carts
        .get_cart(user, business.into_inner().into())
        .await
        .map_err(into_status_error)?
        .map(CartResponse::try_from)
        .transpose()
        .map_err(pricing_status_error)?;

    Ok(Json(cart))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use foundry_app::domain::carts::{CartsServiceError, MockCartsService};

    use crate::test_helpers::{TEST_USER_UUID, carts_service, make_cart, make_item};

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        carts_service(
            carts,
            Router::with_path("businesses/{business}/cart").get(handler),
        )
    }

    #[tokio::test]
    async fn test_get_returns_cart_with_live_total() -> TestResult {
        let business = Uuid::now_v7();
        let cart = make_cart(vec![make_item(1000, 2)], None);

        let mut carts = MockCartsService::new();

        carts
            .expect_get_cart()
            .once()
            .withf(move |user, b| *user == TEST_USER_UUID && b.into_uuid() == business)
            .return_once(move |_, _| Ok(Some(cart)));

        let mut res = TestClient::get(format!("http://example.com/businesses/{business}/cart"))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: CartResponse = res.take_json().await?;

        assert_eq!(body.total, 2000);
        assert_eq!(body.total_source, "live");
        assert_eq!(body.items.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_get_without_cart_returns_null() -> TestResult {
        let business = Uuid::now_v7();

        let mut carts = MockCartsService::new();

        carts
            .expect_get_cart()
            .once()
            .return_once(|_, _| Ok(None));

        carts.expect_get_or_create_cart().never();

        let mut res = TestClient::get(format!("http://example.com/businesses/{business}/cart"))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(res.take_string().await?, "null");

        Ok(())
    }

    #[tokio::test]
    async fn test_get_invalid_business_uuid_returns_400() -> TestResult {
        let mut carts = MockCartsService::new();

        carts.expect_get_cart().never();

        let res = TestClient::get("http://example.com/businesses/not-a-uuid/cart")
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_storage_error_returns_500() -> TestResult {
        let business = Uuid::now_v7();

        let mut carts = MockCartsService::new();

        carts
            .expect_get_cart()
            .once()
            .return_once(|_, _| Err(CartsServiceError::Sql(sqlx::Error::PoolClosed)));

        let res = TestClient::get(format!("http://example.com/businesses/{business}/cart"))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
