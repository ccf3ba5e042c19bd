//! Category Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    catalog::{errors::into_status_error, models::CategoryResponse},
    extensions::*,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CategoriesResponse {
    /// Categories ordered by name
    pub categories: Vec<CategoryResponse>,
}

/// Category Index Handler
#[endpoint(tags("catalog"), summary = "List Categories")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CategoriesResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let categories = state
        .app
        .catalog
        .list_categories()
        .await
        .map_err(into_status_error)?;

    Ok(Json(CategoriesResponse {
        categories: categories.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use foundry_app::domain::catalog::{MockCatalogService, records::CategoryRecord};
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;
    use uuid::Uuid;

    use crate::test_helpers::{Mocks, public_service};

    use super::*;

    #[tokio::test]
    async fn test_categories_are_listed() -> TestResult {
        let mut catalog = MockCatalogService::new();

        catalog.expect_list_categories().once().return_once(|| {
            Ok(vec![CategoryRecord {
                uuid: Uuid::now_v7().into(),
                name: "Food & Drink".to_string(),
                created_at: Timestamp::UNIX_EPOCH,
            }])
        });

        let service = public_service(
            Mocks {
                catalog,
                ..Mocks::default()
            },
            Router::with_path("categories").get(handler),
        );

        let body: CategoriesResponse = TestClient::get("http://example.com/categories")
            .send(&service)
            .await
            .take_json()
            .await?;

        assert_eq!(body.categories.len(), 1);
        assert_eq!(
            body.categories.first().map(|c| c.name.as_str()),
            Some("Food & Drink")
        );

        Ok(())
    }
}
