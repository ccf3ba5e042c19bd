//! Foundry JSON API Healthcheck Handler

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

/// Liveness response. Does not touch the database.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Always `ok` while the process is serving.
    pub status: String,

    /// Server build version.
    pub version: String,
}

impl HealthResponse {
    fn ok() -> Self {
        Self {
            status: "ok".to_owned(),
            version: env!("CARGO_PKG_VERSION").to_owned(),
        }
    }
}

/// Healthcheck handler
#[endpoint(
    tags("health"),
    summary = "Health check endpoint",
    responses((status_code = StatusCode::OK, description = "Server is up")),
)]
pub(crate) async fn handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
