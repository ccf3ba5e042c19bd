//! Audit Records

use jiff::Timestamp;
use serde_json::Value;
use uuid::Uuid;

use crate::{domain::users::records::UserUuid, uuids::TypedUuid};

/// Audit Event UUID
pub type AuditEventUuid = TypedUuid<AuditEventRecord>;

/// Audit Event Record
#[derive(Debug, Clone)]
pub struct AuditEventRecord {
    pub uuid: AuditEventUuid,

    /// Acting user. Cleared if the user is later deleted.
    pub user_uuid: Option<UserUuid>,

    pub action: String,
    pub subject_uuid: Uuid,
    pub details: Value,
    pub created_at: Timestamp,
}
