//! Audit Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, types::Json};
use uuid::Uuid;

use crate::domain::{
    audit::{
        data::NewAuditEvent,
        records::{AuditEventRecord, AuditEventUuid},
    },
    users::records::UserUuid,
};

const CREATE_AUDIT_EVENT_SQL: &str = include_str!("sql/create_audit_event.sql");
const LIST_AUDIT_EVENTS_SQL: &str = include_str!("sql/list_audit_events.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgAuditRepository;

impl PgAuditRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Append an event as part of the caller's transaction.
    pub(crate) async fn record_event(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        event: NewAuditEvent,
    ) -> Result<(), sqlx::Error> {
        query(CREATE_AUDIT_EVENT_SQL)
            .bind(event.uuid.into_uuid())
            .bind(event.user_uuid.map(UserUuid::into_uuid))
            .bind(event.action.as_str())
            .bind(event.subject_uuid)
            .bind(Json(event.details))
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn list_events(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        limit: u32,
        before: Option<Timestamp>,
    ) -> Result<Vec<AuditEventRecord>, sqlx::Error> {
        query_as::<Postgres, AuditEventRecord>(LIST_AUDIT_EVENTS_SQL)
            .bind(i64::from(limit))
            .bind(before.map(SqlxTimestamp::from))
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for AuditEventRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: AuditEventUuid::from_uuid(row.try_get("uuid")?),
            user_uuid: row
                .try_get::<Option<Uuid>, _>("user_uuid")?
                .map(UserUuid::from_uuid),
            action: row.try_get("action")?,
            subject_uuid: row.try_get("subject_uuid")?,
            details: row.try_get::<Json<serde_json::Value>, _>("details")?.0,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
