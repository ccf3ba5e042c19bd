//! Audit Data

use std::fmt;

use jiff::Timestamp;
use serde_json::Value;
use uuid::Uuid;

use crate::domain::{audit::records::AuditEventUuid, users::records::UserUuid};

/// Default number of events returned by a listing.
pub const DEFAULT_AUDIT_LIMIT: u32 = 50;

/// Largest page a listing may request.
pub const MAX_AUDIT_LIMIT: u32 = 200;

/// Kinds of recorded activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditAction {
    CartItemAdded,
    CartItemUpdated,
    CartItemRemoved,
    CartCleared,
    CartSaved,
    CartFinalized,
}

impl AuditAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CartItemAdded => "cart.item_added",
            Self::CartItemUpdated => "cart.item_updated",
            Self::CartItemRemoved => "cart.item_removed",
            Self::CartCleared => "cart.cleared",
            Self::CartSaved => "cart.saved",
            Self::CartFinalized => "cart.finalized",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// New Audit Event Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewAuditEvent {
    pub uuid: AuditEventUuid,
    pub user_uuid: Option<UserUuid>,
    pub action: AuditAction,

    /// The cart (or other record) the action was applied to.
    pub subject_uuid: Uuid,

    pub details: Value,
}

impl NewAuditEvent {
    #[must_use]
    pub fn new(user: UserUuid, action: AuditAction, subject: Uuid, details: Value) -> Self {
        Self {
            uuid: AuditEventUuid::new(),
            user_uuid: Some(user),
            action,
            subject_uuid: subject,
            details,
        }
    }
}

/// Page request for the audit listing.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AuditQuery {
    pub limit: Option<u32>,

    /// Only events strictly older than this instant.
    pub before: Option<Timestamp>,
}

impl AuditQuery {
    /// Requested limit clamped to `1..=MAX_AUDIT_LIMIT`.
    #[must_use]
    pub fn effective_limit(&self) -> u32 {
        self.limit
            .unwrap_or(DEFAULT_AUDIT_LIMIT)
            .clamp(1, MAX_AUDIT_LIMIT)
    }
}
