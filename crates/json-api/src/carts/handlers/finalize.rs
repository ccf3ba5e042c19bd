//! Finalize Cart Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use foundry_app::domain::carts::data::FinalizeCart;

use crate::{
    carts::{
        errors::{into_status_error, pricing_status_error},
        models::CartResponse,
    },
    extensions::*,
    state::State,
};

/// Finalize Cart Request
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub(crate) struct FinalizeCartRequest {
    /// Cart name. Defaults to the existing name, then "<business> Cart".
    pub name: Option<String>,
}

impl From<FinalizeCartRequest> for FinalizeCart {
    fn from(request: FinalizeCartRequest) -> Self {
        FinalizeCart { name: request.name }
    }
}

/// Finalize Cart Handler
///
/// Names the cart and marks it as touched. The cart stays editable and can
/// be finalized again.
#[endpoint(
    tags("carts"),
    summary = "Finalize Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Cart finalized"),
        (status_code = StatusCode::CONFLICT, description = "Cart has no items"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    business: PathParam<Uuid>,
    json: JsonBody<FinalizeCartRequest>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let cart = state
        .app
        .carts
        .finalize_cart(user, business.into_inner().into(), json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(
        CartResponse::try_from(cart).map_err(pricing_status_error)?,
    ))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use foundry_app::domain::carts::{CartsServiceError, MockCartsService};

    use crate::test_helpers::{TEST_USER_UUID, carts_service, make_cart, make_item};

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        carts_service(
            carts,
            Router::with_path("businesses/{business}/cart/finalize").post(handler),
        )
    }

    #[tokio::test]
    async fn test_finalize_returns_named_cart() -> TestResult {
        let business = Uuid::now_v7();
        let mut cart = make_cart(vec![make_item(500, 3)], None);

        cart.name = Some("Opening Order".to_string());

        let mut carts = MockCartsService::new();

        carts
            .expect_finalize_cart()
            .once()
            .withf(move |user, b, finalize| {
                *user == TEST_USER_UUID
                    && b.into_uuid() == business
                    && finalize.name.as_deref() == Some("Opening Order")
            })
            .return_once(move |_, _, _| Ok(cart));

        let mut res = TestClient::post(format!(
            "http://example.com/businesses/{business}/cart/finalize"
        ))
        .json(&json!({ "name": "Opening Order" }))
        .send(&make_service(carts))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: CartResponse = res.take_json().await?;

        assert_eq!(body.name.as_deref(), Some("Opening Order"));
        assert_eq!(body.total, 1500);

        Ok(())
    }

    #[tokio::test]
    async fn test_finalize_empty_cart_returns_409() -> TestResult {
        let business = Uuid::now_v7();

        let mut carts = MockCartsService::new();

        carts
            .expect_finalize_cart()
            .once()
            .return_once(|_, _, _| Err(CartsServiceError::EmptyCart));

        let res = TestClient::post(format!(
            "http://example.com/businesses/{business}/cart/finalize"
        ))
        .json(&json!({}))
        .send(&make_service(carts))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }

    #[tokio::test]
    async fn test_finalize_missing_cart_returns_404() -> TestResult {
        let business = Uuid::now_v7();

        let mut carts = MockCartsService::new();

        carts
            .expect_finalize_cart()
            .once()
            .return_once(|_, _, _| Err(CartsServiceError::NotFound));

        let res = TestClient::post(format!(
            "http://example.com/businesses/{business}/cart/finalize"
        ))
        .json(&json!({}))
        .send(&make_service(carts))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
