use axum::{extract::Path, http::StatusCode, Json};
use contracts::system::users::{ChangePasswordDto, CreateUserDto, UpdateUserDto, User};

use crate::system::auth::extractor::CurrentUser;
use crate::system::users::service;

/// GET /api/admin/users
pub async fn list_all() -> Result<Json<Vec<User>>, StatusCode> {
    match service::list_all().await {
        Ok(v) => Ok(Json(v)),
        Err(e) => {
            tracing::error!("Failed to list users: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/admin/users/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<User>, StatusCode> {
    match service::get_by_id(&id).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to load user {}: {}", id, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// POST /api/admin/users
pub async fn create(Json(dto): Json<CreateUserDto>) -> Result<Json<User>, StatusCode> {
    match service::create(dto).await {
        Ok(v) => Ok(Json(v)),
        Err(e) => {
            tracing::warn!("User creation rejected: {}", e);
            Err(StatusCode::BAD_REQUEST)
        }
    }
}

/// PUT /api/admin/users/:id
pub async fn update(
    Path(id): Path<String>,
    Json(mut dto): Json<UpdateUserDto>,
) -> Result<Json<User>, StatusCode> {
    dto.id = id;
    match service::update(dto).await {
        Ok(v) => Ok(Json(v)),
        Err(e) => {
            tracing::warn!("User update rejected: {}", e);
            Err(StatusCode::BAD_REQUEST)
        }
    }
}

/// DELETE /api/admin/users/:id
///
/// An admin cannot delete their own account.
pub async fn delete(
    CurrentUser(claims): CurrentUser,
    Path(id): Path<String>,
) -> Result<(), StatusCode> {
    if claims.sub == id {
        return Err(StatusCode::BAD_REQUEST);
    }
    match service::delete(&id).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to delete user {}: {}", id, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// POST /api/admin/users/:id/password
pub async fn change_password(
    Path(id): Path<String>,
    Json(mut dto): Json<ChangePasswordDto>,
) -> Result<StatusCode, StatusCode> {
    dto.user_id = id;
    match service::change_password(dto).await {
        Ok(()) => Ok(StatusCode::OK),
        Err(e) => {
            tracing::warn!("Password change rejected: {}", e);
            Err(StatusCode::BAD_REQUEST)
        }
    }
}
