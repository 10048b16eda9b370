use crate::{
    auth::Role,
    config::AuthConfig,
    services::{ServiceContext, user_service::SignupInput},
};

/// Creates the configured superadmin account when it does not exist yet.
pub async fn bootstrap_superadmin(cfg: &AuthConfig, services: &ServiceContext) -> anyhow::Result<()> {
    let (Some(email), Some(password)) = (cfg.admin_email.as_deref(), cfg.admin_password.as_deref())
    else {
        tracing::debug!("no admin account configured, skipping bootstrap");
        return Ok(());
    };

    let users = services.user();
    match users.find_one_by_email(email).await {
        Ok(existing) => {
            tracing::info!(user_id = %existing.id, "admin account already present");
            return Ok(());
        }
        Err(crate::error::AppError::NotFound(_)) => {}
        Err(err) => anyhow::bail!("admin lookup failed: {err}"),
    }

    let input = SignupInput {
        email: email.to_string(),
        first_name: "Super".to_string(),
        last_name: "Admin".to_string(),
        password: password.to_string(),
    };
    let user = users
        .create(input, &[Role::Superadmin, Role::Admin])
        .await
        .map_err(|err| anyhow::anyhow!("admin bootstrap failed: {err}"))?;
    tracing::info!(user_id = %user.id, "admin account created");
    Ok(())
}
