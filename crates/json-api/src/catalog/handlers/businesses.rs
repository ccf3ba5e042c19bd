//! Business Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    catalog::{errors::into_status_error, models::BusinessResponse},
    extensions::*,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BusinessesResponse {
    /// Businesses ordered by name
    pub businesses: Vec<BusinessResponse>,
}

/// Business Index Handler
///
/// Optionally narrowed to one category.
#[endpoint(tags("catalog"), summary = "List Businesses")]
pub(crate) async fn handler(
    category: QueryParam<Uuid, false>,
    depot: &mut Depot,
) -> Result<Json<BusinessesResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let businesses = state
        .app
        .catalog
        .list_businesses(category.into_inner().map(Into::into))
        .await
        .map_err(into_status_error)?;

    Ok(Json(BusinessesResponse {
        businesses: businesses.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use foundry_app::domain::catalog::MockCatalogService;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{Mocks, public_service};

    use super::*;

    fn make_service(catalog: MockCatalogService) -> Service {
        public_service(
            Mocks {
                catalog,
                ..Mocks::default()
            },
            Router::with_path("businesses").get(handler),
        )
    }

    #[tokio::test]
    async fn test_unfiltered_listing() -> TestResult {
        let mut catalog = MockCatalogService::new();

        catalog
            .expect_list_businesses()
            .once()
            .withf(Option::is_none)
            .return_once(|_| Ok(Vec::new()));

        let body: BusinessesResponse = TestClient::get("http://example.com/businesses")
            .send(&make_service(catalog))
            .await
            .take_json()
            .await?;

        assert!(body.businesses.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_category_filter_is_forwarded() -> TestResult {
        let category = Uuid::now_v7();

        let mut catalog = MockCatalogService::new();

        catalog
            .expect_list_businesses()
            .once()
            .withf(move |c| c.map(|c| c.into_uuid()) == Some(category))
            .return_once(|_| Ok(Vec::new()));

        let res = TestClient::get(format!("http://example.com/businesses?category={category}"))
            .send(&make_service(catalog))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_malformed_category_returns_400() -> TestResult {
        let mut catalog = MockCatalogService::new();

        catalog.expect_list_businesses().never();

        let res = TestClient::get("http://example.com/businesses?category=food")
            .send(&make_service(catalog))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
