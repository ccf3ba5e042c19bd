//! Audit service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::audit::{
        data::AuditQuery, errors::AuditServiceError, records::AuditEventRecord,
        repository::PgAuditRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgAuditService {
    db: Db,
    repository: PgAuditRepository,
}

impl PgAuditService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgAuditRepository::new(),
        }
    }
}

#[async_trait]
impl AuditService for PgAuditService {
    #[tracing::instrument(
        name = "audit.service.list_events",
        skip(self),
        fields(limit = query.effective_limit()),
        err
    )]
    async fn list_events(
        &self,
        query: AuditQuery,
    ) -> Result<Vec<AuditEventRecord>, AuditServiceError> {
        let mut tx = self.db.begin().await?;

        let events = self
            .repository
            .list_events(&mut tx, query.effective_limit(), query.before)
            .await?;

        tx.commit().await?;

        Ok(events)
    }
}

#[automock]
#[async_trait]
pub trait AuditService: Send + Sync {
    /// Recorded events, newest first.
    async fn list_events(
        &self,
        query: AuditQuery,
    ) -> Result<Vec<AuditEventRecord>, AuditServiceError>;
}
