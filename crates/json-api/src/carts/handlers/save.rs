//! Save Cart Handler

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

use foundry_app::domain::carts::data::SaveCart;

use crate::{carts::errors::into_status_error, extensions::*, state::State};

/// Save Cart Request
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub(crate) struct SaveCartRequest {
    /// Cart name. Defaults to the existing name, then "<business> Cart".
    pub name: Option<String>,

    /// Total to store as the snapshot. Computed from the items when absent.
    pub total: Option<u64>,
}

impl From<SaveCartRequest> for SaveCart {
    fn from(request: SaveCartRequest) -> Self {
        SaveCart {
            name: request.name,
            total: request.total,
        }
    }
}

/// Cart Saved Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartSavedResponse {
    /// Saved cart UUID, usable as a share link
    pub cart_uuid: Uuid,
}

/// Save Cart Handler
#[endpoint(
    tags("carts"),
    summary = "Save Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Cart saved"),
        (status_code = StatusCode::CONFLICT, description = "Cart has no items"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    business: PathParam<Uuid>,
    json: JsonBody<SaveCartRequest>,
    depot: &mut Depot,
) -> Result<Json<CartSavedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let cart = state
        .app
        .carts
        .save_cart(user, business.into_inner().into(), json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(CartSavedResponse {
        cart_uuid: cart.into_uuid(),
    }))
}
