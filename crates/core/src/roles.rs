//! Well-known role name constants.
//!
//! Roles are not stored as rows; they are derived from `users.is_admin`
//! when an access token is issued.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_USER: &str = "user";

/// Role name carried in the token claims for a user.
pub fn role_for(is_admin: bool) -> &'static str {
    if is_admin {
        ROLE_ADMIN
    } else {
        ROLE_USER
    }
}
