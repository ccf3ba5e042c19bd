//! Auth data models.

use jiff::Timestamp;
use uuid::Uuid;

use crate::{auth::ApiTokenVersion, domain::users::records::UserUuid};

/// The user a bearer token resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub uuid: UserUuid,
    pub is_admin: bool,
}

/// API token data used during bearer authentication.
#[derive(Debug, Clone)]
pub(crate) struct ActiveApiToken {
    /// User that owns this API token.
    pub user_uuid: UserUuid,

    /// Whether the owning user is an administrator.
    pub is_admin: bool,

    /// Token format/hash version.
    pub version: ApiTokenVersion,

    /// SHA-256 verifier for the token secret material.
    pub token_hash: String,
}

/// API token metadata persisted in storage.
#[derive(Debug, Clone)]
pub struct ApiTokenMetadata {
    pub uuid: Uuid,
    pub user_uuid: UserUuid,
    pub version: ApiTokenVersion,
    pub created_at: Timestamp,
    pub last_used_at: Option<Timestamp>,
    pub expires_at: Option<Timestamp>,
    pub revoked_at: Option<Timestamp>,
}

impl ApiTokenMetadata {
    /// Whether the token would authenticate at `now`.
    #[must_use]
    pub fn status(&self, now: Timestamp) -> ApiTokenStatus {
        if self.revoked_at.is_some() {
            ApiTokenStatus::Revoked
        } else if self.expires_at.is_some_and(|expires_at| expires_at <= now) {
            ApiTokenStatus::Expired
        } else {
            ApiTokenStatus::Active
        }
    }
}

/// Lifecycle state of an issued token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiTokenStatus {
    Active,
    Expired,
    Revoked,
}

impl ApiTokenStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Expired => "expired",
            Self::Revoked => "revoked",
        }
    }
}

/// New API token persistence payload.
#[derive(Debug, Clone)]
pub struct NewApiToken {
    pub uuid: Uuid,
    pub user_uuid: UserUuid,
    pub version: ApiTokenVersion,
    pub token_hash: String,
    pub expires_at: Option<Timestamp>,
}

/// API token issuance result with one-time raw token.
#[derive(Debug, Clone)]
pub struct IssuedApiToken {
    pub token: String,
    pub metadata: ApiTokenMetadata,
}

#[cfg(test)]
mod tests {
    use jiff::ToSpan;
    use testresult::TestResult;

    use super::*;

    fn metadata(expires_at: Option<Timestamp>, revoked_at: Option<Timestamp>) -> ApiTokenMetadata {
        ApiTokenMetadata {
            uuid: Uuid::now_v7(),
            user_uuid: UserUuid::new(),
            version: ApiTokenVersion::V1,
            created_at: Timestamp::UNIX_EPOCH,
            last_used_at: None,
            expires_at,
            revoked_at,
        }
    }

    #[test]
    fn token_without_expiry_is_active() {
        assert_eq!(
            metadata(None, None).status(Timestamp::now()),
            ApiTokenStatus::Active
        );
    }

    #[test]
    fn past_expiry_is_expired() -> TestResult {
        let now = Timestamp::now();
        let expired = metadata(Some(now.checked_sub(1.minute())?), None);
        let future = metadata(Some(now.checked_add(1.minute())?), None);

        assert_eq!(expired.status(now), ApiTokenStatus::Expired);
        assert_eq!(future.status(now), ApiTokenStatus::Active);

        Ok(())
    }

    #[test]
    fn revocation_wins_over_expiry() -> TestResult {
        let now = Timestamp::now();
        let token = metadata(Some(now.checked_sub(1.hour())?), Some(now));

        assert_eq!(token.status(now), ApiTokenStatus::Revoked);
        assert_eq!(ApiTokenStatus::Revoked.as_str(), "revoked");

        Ok(())
    }
}
