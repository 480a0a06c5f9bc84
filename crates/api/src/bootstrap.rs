//! First-start admin account provisioning.

use anyhow::Context;
use hrdesk_db::models::user::CreateUser;
use hrdesk_db::repositories::UserRepo;
use hrdesk_db::DbPool;

use crate::auth::password::{hash_password, validate_new_password};
use crate::config::BootstrapAdmin;

/// Create the configured admin account unless a user with that name exists.
///
/// Returns `true` when an account was created.
pub async fn ensure_bootstrap_admin(pool: &DbPool, admin: &BootstrapAdmin) -> anyhow::Result<bool> {
    if UserRepo::find_by_username(pool, &admin.username)
        .await
        .context("Failed to look up bootstrap admin")?
        .is_some()
    {
        tracing::debug!(username = %admin.username, "Bootstrap admin already exists");
        return Ok(false);
    }

    validate_new_password(&admin.password)
        .map_err(anyhow::Error::msg)
        .context("BOOTSTRAP_ADMIN_PASSWORD is too weak")?;

    let password_hash = hash_password(&admin.password)
        .map_err(|e| anyhow::anyhow!("Password hashing error: {e}"))?;

    let user = UserRepo::create(
        pool,
        &CreateUser {
            username: admin.username.clone(),
            password_hash,
            is_admin: true,
        },
    )
    .await
    .context("Failed to create bootstrap admin")?;

    tracing::info!(user_id = user.id, username = %user.username, "Bootstrap admin created");
    Ok(true)
}
