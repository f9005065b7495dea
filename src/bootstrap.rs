use anyhow::{Context, Result};
use sea_orm::DatabaseConnection;

use crate::config::APP_CONFIG;
use crate::services::operators::OperatorService;

/// Provisions the configured admin when both `ADMIN_USERNAME` and
/// `ADMIN_PASSWORD` are set. An existing operator with that name is left alone.
pub async fn initialize_admin_user(db: &DatabaseConnection) -> Result<()> {
    let (Some(username), Some(password)) = (
        APP_CONFIG.admin_username.as_deref(),
        APP_CONFIG.admin_password.as_deref(),
    ) else {
        tracing::info!("ADMIN_USERNAME/ADMIN_PASSWORD not set, skipping admin provisioning");
        return Ok(());
    };

    let created = OperatorService::new(db)
        .ensure_admin(username, password)
        .await
        .context("Failed to provision admin operator")?;

    if created {
        tracing::info!(username, "Admin operator created");
    } else {
        tracing::info!(username, "Admin operator already exists, skipping initialization");
    }

    Ok(())
}
