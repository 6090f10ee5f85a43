use anyhow::{anyhow, Result};
use contracts::system::users::{ChangePasswordDto, CreateUserDto, UpdateUserDto, User};

use super::repository;
use crate::system::auth::password;

fn validate_email(email: &str) -> Result<()> {
    let email = email.trim();
    if email.is_empty() {
        return Err(anyhow!("Email is required"));
    }
    if !email.contains('@') || email.starts_with('@') || email.ends_with('@') {
        return Err(anyhow!("Email address is not valid"));
    }
    Ok(())
}

pub async fn create(dto: CreateUserDto) -> Result<User> {
    validate_email(&dto.email)?;
    password::validate_password_strength(&dto.password)?;

    let email = dto.email.trim().to_lowercase();
    if repository::get_by_email(&email).await?.is_some() {
        return Err(anyhow!("A user with email '{}' already exists", email));
    }

    let now = chrono::Utc::now().to_rfc3339();
    let user = User {
        id: uuid::Uuid::new_v4().to_string(),
        email,
        full_name: dto.full_name,
        phone: dto.phone,
        company: dto.company,
        role: dto.role,
        is_active: true,
        created_at: now.clone(),
        updated_at: now,
        last_login_at: None,
    };

    let hash = password::hash_password(&dto.password)?;
    repository::create_with_password(&user, &hash).await?;

    tracing::info!("Created user {} ({})", user.email, user.role.as_str());
    Ok(user)
}

pub async fn update(dto: UpdateUserDto) -> Result<User> {
    let mut user = repository::get_by_id(&dto.id)
        .await?
        .ok_or_else(|| anyhow!("User not found"))?;

    user.full_name = dto.full_name;
    user.phone = dto.phone;
    user.company = dto.company;
    user.role = dto.role;
    user.is_active = dto.is_active;
    user.updated_at = chrono::Utc::now().to_rfc3339();

    repository::update(&user).await?;
    Ok(user)
}

pub async fn delete(id: &str) -> Result<bool> {
    repository::delete(id).await
}

pub async fn get_by_id(id: &str) -> Result<Option<User>> {
    repository::get_by_id(id).await
}

pub async fn list_all() -> Result<Vec<User>> {
    repository::list_all().await
}

/// Change a user's password.
///
/// When `old_password` is present it must verify against the stored hash.
/// Admin-initiated resets omit it; the caller is responsible for having
/// passed the admin gate first.
pub async fn change_password(dto: ChangePasswordDto) -> Result<()> {
    password::validate_password_strength(&dto.new_password)?;

    let current_hash = repository::get_password_hash(&dto.user_id)
        .await?
        .ok_or_else(|| anyhow!("User not found"))?;

    if let Some(old) = &dto.old_password {
        if !password::verify_password(old, &current_hash)? {
            return Err(anyhow!("Current password is incorrect"));
        }
    }

    let new_hash = password::hash_password(&dto.new_password)?;
    repository::update_password_hash(&dto.user_id, &new_hash).await?;

    tracing::info!("Password changed for user {}", dto.user_id);
    Ok(())
}

/// Verify email + password and return the user on success.
///
/// Deactivated accounts fail verification the same way a wrong password
/// does, so callers cannot distinguish the two.
pub async fn verify_credentials(email: &str, password_plain: &str) -> Result<Option<User>> {
    let email = email.trim().to_lowercase();
    let user = match repository::get_by_email(&email).await? {
        Some(u) => u,
        None => return Ok(None),
    };

    if !user.is_active {
        return Ok(None);
    }

    let hash = match repository::get_password_hash(&user.id).await? {
        Some(h) => h,
        None => return Ok(None),
    };

    if password::verify_password(password_plain, &hash)? {
        Ok(Some(user))
    } else {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_validation() {
        assert!(validate_email("user@example.com").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("   ").is_err());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("@leading").is_err());
        assert!(validate_email("trailing@").is_err());
    }
}
