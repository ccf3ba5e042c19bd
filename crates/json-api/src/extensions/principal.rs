//! Authenticated user stored in the depot by the auth middleware.

use foundry_app::{auth::AuthenticatedUser, domain::users::records::UserUuid};
use salvo::prelude::{Depot, StatusError};

const AUTHENTICATED_USER_KEY: &str = "authenticated_user";

pub(crate) trait PrincipalExt {
    fn insert_user(&mut self, user: AuthenticatedUser);

    fn user_uuid_or_401(&self) -> Result<UserUuid, StatusError>;

    fn admin_or_403(&self) -> Result<UserUuid, StatusError>;
}

impl PrincipalExt for Depot {
    fn insert_user(&mut self, user: AuthenticatedUser) {
        self.insert(AUTHENTICATED_USER_KEY, user);
    }

    fn user_uuid_or_401(&self) -> Result<UserUuid, StatusError> {
        self.get::<AuthenticatedUser>(AUTHENTICATED_USER_KEY)
            .map(|user| user.uuid)
            .map_err(|_ignored| StatusError::unauthorized())
    }

    fn admin_or_403(&self) -> Result<UserUuid, StatusError> {
        let user = self
            .get::<AuthenticatedUser>(AUTHENTICATED_USER_KEY)
            .map_err(|_ignored| StatusError::unauthorized())?;

        if !user.is_admin {
            return Err(StatusError::forbidden().brief("Administrator access required"));
        }

        Ok(user.uuid)
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;
    use uuid::Uuid;

    use super::*;

    fn user(is_admin: bool) -> AuthenticatedUser {
        AuthenticatedUser {
            uuid: UserUuid::from_uuid(Uuid::nil()),
            is_admin,
        }
    }

    #[test]
    fn missing_user_is_unauthorized() {
        let depot = Depot::new();

        assert_eq!(
            depot.user_uuid_or_401().err().map(|e| e.code),
            Some(StatusCode::UNAUTHORIZED)
        );
        assert_eq!(
            depot.admin_or_403().err().map(|e| e.code),
            Some(StatusCode::UNAUTHORIZED)
        );
    }

    #[test]
    fn regular_user_is_forbidden_from_admin() {
        let mut depot = Depot::new();

        depot.insert_user(user(false));

        assert_eq!(depot.user_uuid_or_401().ok(), Some(user(false).uuid));
        assert_eq!(
            depot.admin_or_403().err().map(|e| e.code),
            Some(StatusCode::FORBIDDEN)
        );
    }

    #[test]
    fn admin_passes() {
        let mut depot = Depot::new();

        depot.insert_user(user(true));

        assert_eq!(depot.admin_or_403().ok(), Some(user(true).uuid));
    }
}
