//! Shared Cart Handler
//!
//! Anyone holding a cart's UUID can read it. No authentication.

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    carts::{errors::into_status_error, models::SharedCartResponse},
    extensions::*,
    state::State,
};

/// Shared Cart Handler
#[endpoint(
    tags("shared-carts"),
    summary = "Get Shared Cart",
    responses(
        (status_code = StatusCode::OK, description = "Shared cart"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    cart: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<SharedCartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let cart = state
        .app
        .carts
        .shared_cart(cart.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.into()))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use foundry_app::domain::carts::{
        CartTotal, CartsServiceError, MockCartsService,
        records::{SharedCartItem, SharedCartRecord},
    };

    use crate::test_helpers::{Mocks, public_service};

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        public_service(
            Mocks {
                carts,
                ..Mocks::default()
            },
            Router::with_path("shared-carts/{cart}").get(handler),
        )
    }

    #[tokio::test]
    async fn test_shared_cart_uses_snapshot_total() -> TestResult {
        let cart = Uuid::now_v7();

        let mut carts = MockCartsService::new();

        carts
            .expect_shared_cart()
            .once()
            .withf(move |c| c.into_uuid() == cart)
            .return_once(move |_| {
                Ok(SharedCartRecord {
                    uuid: cart.into(),
                    name: "Coffee Cart".to_string(),
                    business_uuid: Uuid::now_v7().into(),
                    business_name: "Coffee".to_string(),
                    total: CartTotal::Snapshot(2500),
                    items: vec![SharedCartItem {
                        product_uuid: Uuid::now_v7().into(),
                        name: "Grinder".to_string(),
                        unit_price: 1200,
                        quantity: 1,
                        image: None,
                    }],
                    updated_at: Timestamp::UNIX_EPOCH,
                })
            });

        let mut res = TestClient::get(format!("http://example.com/shared-carts/{cart}"))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: SharedCartResponse = res.take_json().await?;

        assert_eq!(body.total, 2500);
        assert_eq!(body.total_source, "snapshot");
        assert_eq!(body.items.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_shared_cart_returns_404() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_shared_cart()
            .once()
            .return_once(|_| Err(CartsServiceError::NotFound));

        let res = TestClient::get(format!("http://example.com/shared-carts/{}", Uuid::now_v7()))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
