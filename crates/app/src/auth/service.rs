//! Auth service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    auth::{
        ApiTokenMetadata, ApiTokenVersion, AuthServiceError, AuthenticatedUser, IssuedApiToken,
        NewApiToken, build_verifier_input, format_api_token, generate_api_token_secret,
        hash_verifier_input, parse_api_token, repository::PgAuthRepository, verifier_matches,
    },
    domain::users::records::UserUuid,
};

#[derive(Debug, Clone)]
pub struct PgAuthService {
    repository: PgAuthRepository,
}

impl PgAuthService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PgAuthRepository::new(pool),
        }
    }

    /// Issue a new API token for the given user.
    ///
    /// # Errors
    ///
    /// Returns an error if database insertion fails.
    pub async fn issue_api_token(
        &self,
        user: UserUuid,
        expires_at: Option<Timestamp>,
    ) -> Result<IssuedApiToken, AuthServiceError> {
        let token_uuid = Uuid::now_v7();
        let version = ApiTokenVersion::V1;
        let secret = generate_api_token_secret();
        let token = format_api_token(token_uuid, version, &secret);

        let token_hash =
            hash_verifier_input(&build_verifier_input(&token_uuid, version, &user, &secret));

        let metadata = self
            .repository
            .create_api_token(&NewApiToken {
                uuid: token_uuid,
                user_uuid: user,
                version,
                token_hash,
                expires_at,
            })
            .await
            .map_err(AuthServiceError::from)?;

        Ok(IssuedApiToken { token, metadata })
    }

    /// List all tokens for the given user.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_api_tokens(
        &self,
        user: UserUuid,
    ) -> Result<Vec<ApiTokenMetadata>, AuthServiceError> {
        self.repository
            .list_api_tokens_by_user(user)
            .await
            .map_err(AuthServiceError::from)
    }

    /// Revoke a token by UUID. Returns `true` if the token was active.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn revoke_api_token(&self, token_uuid: Uuid) -> Result<bool, AuthServiceError> {
        self.repository
            .revoke_api_token(token_uuid)
            .await
            .map(|record| record.is_some())
            .map_err(AuthServiceError::from)
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn authenticate_bearer(
        &self,
        bearer_token: &str,
    ) -> Result<AuthenticatedUser, AuthServiceError> {
        let parsed_token = parse_api_token(bearer_token).map_err(|_| AuthServiceError::NotFound)?;

        let token = self
            .repository
            .find_active_api_token_by_uuid(
                parsed_token.token_uuid,
                parsed_token.version,
                Timestamp::now(),
            )
            .await
            .map_err(AuthServiceError::from)?
            .ok_or(AuthServiceError::NotFound)?;

        if token.version != parsed_token.version {
            return Err(AuthServiceError::NotFound);
        }

        let computed = hash_verifier_input(&build_verifier_input(
            &parsed_token.token_uuid,
            parsed_token.version,
            &token.user_uuid,
            &parsed_token.secret,
        ));

        if !verifier_matches(&computed, &token.token_hash) {
            return Err(AuthServiceError::NotFound);
        }

        // Best-effort metadata update; auth success should not depend on this write.
        let _touch_result = self
            .repository
            .touch_api_token_last_used(parsed_token.token_uuid)
            .await;

        Ok(AuthenticatedUser {
            uuid: token.user_uuid,
            is_admin: token.is_admin,
        })
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve a raw bearer token to its user.
    async fn authenticate_bearer(
        &self,
        bearer_token: &str,
    ) -> Result<AuthenticatedUser, AuthServiceError>;
}

#[cfg(test)]
mod tests {
    use jiff::ToSpan;
    use testresult::TestResult;

    use crate::test::TestContext;

    use super::*;

    fn auth_service(ctx: &TestContext) -> PgAuthService {
        PgAuthService::new(ctx.db.pool().clone())
    }

    #[tokio::test]
    async fn issued_token_authenticates_as_its_user() -> TestResult {
        let ctx = TestContext::new().await;
        let service = auth_service(&ctx);

        let issued = service.issue_api_token(ctx.user_uuid, None).await?;

        assert!(issued.token.starts_with("fd_v1_"));

        let user = service.authenticate_bearer(&issued.token).await?;

        assert_eq!(user.uuid, ctx.user_uuid);
        assert!(!user.is_admin);

        let tokens = service.list_api_tokens(ctx.user_uuid).await?;

        assert_eq!(tokens.len(), 1);
        assert!(
            tokens.first().and_then(|t| t.last_used_at).is_some(),
            "successful authentication should touch last_used_at"
        );

        Ok(())
    }

    #[tokio::test]
    async fn admin_flag_is_carried_through() -> TestResult {
        let ctx = TestContext::new().await;
        let service = auth_service(&ctx);
        let admin = ctx.create_admin("admin@example.com").await;

        let issued = service.issue_api_token(admin, None).await?;
        let user = service.authenticate_bearer(&issued.token).await?;

        assert!(user.is_admin);

        Ok(())
    }

    #[tokio::test]
    async fn tampered_secret_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let service = auth_service(&ctx);

        let issued = service.issue_api_token(ctx.user_uuid, None).await?;

        let (prefix, secret) = issued.token.split_once('.').ok_or("token has no secret")?;
        let flipped = if secret.starts_with('0') { "1" } else { "0" };
        let tampered = format!("{prefix}.{flipped}{}", secret.get(1..).unwrap_or_default());

        let result = service.authenticate_bearer(&tampered).await;

        assert!(
            matches!(result, Err(AuthServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn revoked_token_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let service = auth_service(&ctx);

        let issued = service.issue_api_token(ctx.user_uuid, None).await?;

        assert!(service.revoke_api_token(issued.metadata.uuid).await?);
        assert!(!service.revoke_api_token(issued.metadata.uuid).await?);

        let result = service.authenticate_bearer(&issued.token).await;

        assert!(
            matches!(result, Err(AuthServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn expired_token_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let service = auth_service(&ctx);

        let expired_at = Timestamp::now().checked_sub(1.hour())?;
        let issued = service
            .issue_api_token(ctx.user_uuid, Some(expired_at))
            .await?;

        let result = service.authenticate_bearer(&issued.token).await;

        assert!(
            matches!(result, Err(AuthServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn issuing_for_unknown_user_is_rejected() {
        let ctx = TestContext::new().await;
        let service = auth_service(&ctx);

        let result = service.issue_api_token(UserUuid::new(), None).await;

        assert!(
            matches!(result, Err(AuthServiceError::UnknownUser)),
            "expected UnknownUser, got {result:?}"
        );
    }

    #[tokio::test]
    async fn malformed_token_is_rejected() {
        let ctx = TestContext::new().await;
        let service = auth_service(&ctx);

        let result = service.authenticate_bearer("not-a-token").await;

        assert!(
            matches!(result, Err(AuthServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }
}
