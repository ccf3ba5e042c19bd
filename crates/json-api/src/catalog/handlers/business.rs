//! Business Detail Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{
    catalog::{errors::into_status_error, models::BusinessDetailResponse},
    extensions::*,
    state::State,
};

/// Business Detail Handler
///
/// Returns a business by slug with its requirements and the products
/// mapped onto each.
#[endpoint(
    tags("catalog"),
    summary = "Get Business",
    responses(
        (status_code = StatusCode::OK, description = "Business detail"),
        (status_code = StatusCode::NOT_FOUND, description = "Business not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    business: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<BusinessDetailResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let detail = state
        .app
        .catalog
        .get_business_by_slug(&business.into_inner())
        .await
        .map_err(into_status_error)?;

    Ok(Json(detail.into()))
}
