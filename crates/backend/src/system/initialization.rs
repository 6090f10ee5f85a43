use anyhow::Result;
use contracts::system::auth::UserRole;
use contracts::system::users::CreateUserDto;

use crate::system::users::{repository, service};

const DEFAULT_ADMIN_EMAIL: &str = "admin@localhost.local";
const DEFAULT_ADMIN_PASSWORD: &str = "changeme";

/// Ensure an admin account exists (created when the user table is empty).
pub async fn ensure_admin_user_exists() -> Result<()> {
    let count = repository::count_users().await?;

    if count == 0 {
        tracing::info!("No users found. Creating default admin user...");

        let admin = service::create(CreateUserDto {
            email: DEFAULT_ADMIN_EMAIL.to_string(),
            password: DEFAULT_ADMIN_PASSWORD.to_string(),
            full_name: Some("Administrator".to_string()),
            phone: None,
            company: None,
            role: UserRole::Admin,
        })
        .await?;

        tracing::warn!("═══════════════════════════════════════════════");
        tracing::warn!("  Default admin user created!");
        tracing::warn!("  Email:    {}", DEFAULT_ADMIN_EMAIL);
        tracing::warn!("  Password: {}", DEFAULT_ADMIN_PASSWORD);
        tracing::warn!("  User ID:  {}", admin.id);
        tracing::warn!("  PLEASE CHANGE THE PASSWORD IMMEDIATELY!");
        tracing::warn!("═══════════════════════════════════════════════");
    }

    Ok(())
}
