//! User Data

use crate::domain::users::records::UserUuid;

/// New User Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    /// UUID to assign to the user row.
    pub uuid: UserUuid,

    /// Login email, unique across users.
    pub email: String,

    /// Display name.
    pub name: String,

    /// Grants access to the admin surface.
    pub is_admin: bool,
}
