//! Audit Event Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use foundry_app::domain::audit::{data::AuditQuery, records::AuditEventRecord};

use crate::{extensions::*, state::State};

/// Audit Event Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AuditEventResponse {
    pub uuid: Uuid,

    /// Acting user, if still present
    pub user_uuid: Option<Uuid>,

    /// e.g. `cart.item_added`
    pub action: String,

    pub subject_uuid: Uuid,
    pub details: Value,
    pub created_at: String,
}

impl From<AuditEventRecord> for AuditEventResponse {
    fn from(event: AuditEventRecord) -> Self {
        Self {
            uuid: event.uuid.into_uuid(),
            user_uuid: event.user_uuid.map(|user| user.into_uuid()),
            action: event.action,
            subject_uuid: event.subject_uuid,
            details: event.details,
            created_at: event.created_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AuditEventsResponse {
    /// Events, newest first
    pub events: Vec<AuditEventResponse>,
}

/// Audit Event Index Handler
///
/// Pass the oldest `created_at` seen as `before` to fetch the next page.
#[endpoint(
    tags("admin"),
    summary = "List Audit Events",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Audit events"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::FORBIDDEN, description = "Forbidden"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    limit: QueryParam<u32, false>,
    before: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<AuditEventsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    depot.admin_or_403()?;

    let query = AuditQuery {
        limit: limit.into_inner(),
        before: before.into_timestamp("before")?,
    };

    let events = state
        .app
        .audit
        .list_events(query)
        .await
        .or_500("failed to list audit events")?;

    Ok(Json(AuditEventsResponse {
        events: events.into_iter().map(Into::into).collect(),
    }))
}
