use axum::{body::Body, extract::Request, http::StatusCode, middleware::Next, response::Response};

use crate::system::users::repository;

fn bearer_token(req: &Request<Body>) -> Option<&str> {
    req.headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
}

/// Middleware that requires a valid access token.
pub async fn require_auth(mut req: Request<Body>, next: Next) -> Result<Response, StatusCode> {
    let token = bearer_token(&req).ok_or(StatusCode::UNAUTHORIZED)?;

    let claims = super::jwt::validate_token(token)
        .await
        .map_err(|_| StatusCode::UNAUTHORIZED)?;

    // Add claims to request extensions for use in handlers
    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

/// Middleware that requires the admin role.
///
/// The role is never taken from the token: after the session check the
/// user row is re-read and the decision waits for both results. A missing
/// or invalid session is 401; a resolved session with the wrong role (or a
/// deactivated account) is 403. The protected handler never runs in either
/// case.
pub async fn require_admin(mut req: Request<Body>, next: Next) -> Result<Response, StatusCode> {
    let token = bearer_token(&req).ok_or(StatusCode::UNAUTHORIZED)?;

    let claims = super::jwt::validate_token(token)
        .await
        .map_err(|_| StatusCode::UNAUTHORIZED)?;

    let user = repository::get_by_id(&claims.sub)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
        .ok_or(StatusCode::UNAUTHORIZED)?;

    if !user.is_active || !user.role.is_admin() {
        return Err(StatusCode::FORBIDDEN);
    }

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::routing::get;
    use axum::Router;
    use contracts::system::auth::UserRole;
    use contracts::system::users::{CreateUserDto, UpdateUserDto, User};
    use tower::ServiceExt;

    use super::require_admin;
    use crate::system::auth::jwt;
    use crate::system::users::service;

    static GUARDED_CALLS: AtomicUsize = AtomicUsize::new(0);

    async fn guarded() -> &'static str {
        GUARDED_CALLS.fetch_add(1, Ordering::SeqCst);
        "ok"
    }

    fn app() -> Router {
        Router::new()
            .route("/admin/ping", get(guarded))
            .layer(axum::middleware::from_fn(require_admin))
    }

    async fn seed_user(role: UserRole) -> (User, String) {
        let user = service::create(CreateUserDto {
            email: format!("gate-{}@example.com", uuid::Uuid::new_v4()),
            password: "hunter42".to_string(),
            full_name: None,
            phone: None,
            company: None,
            role,
        })
        .await
        .unwrap();
        let token = jwt::generate_access_token(&user.id, &user.email)
            .await
            .unwrap();
        (user, token)
    }

    async fn status_for(token: Option<&str>) -> StatusCode {
        let mut builder = Request::builder().uri("/admin/ping");
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }
        let response = app()
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap();
        response.status()
    }

    // One test so the handler-call counter is not shared across cases.
    #[tokio::test]
    async fn admin_gate_resolves_session_and_role_before_running_handler() {
        crate::shared::data::db::init_test_db().await;

        // No session, or an unverifiable one, is 401.
        assert_eq!(status_for(None).await, StatusCode::UNAUTHORIZED);
        assert_eq!(
            status_for(Some("not-a-token")).await,
            StatusCode::UNAUTHORIZED
        );

        // A valid session with the wrong role is 403, and the protected
        // handler never ran for any of the rejected requests.
        let (_, customer_token) = seed_user(UserRole::Customer).await;
        assert_eq!(
            status_for(Some(&customer_token)).await,
            StatusCode::FORBIDDEN
        );
        assert_eq!(GUARDED_CALLS.load(Ordering::SeqCst), 0);

        let (admin, admin_token) = seed_user(UserRole::Admin).await;
        assert_eq!(status_for(Some(&admin_token)).await, StatusCode::OK);
        assert_eq!(GUARDED_CALLS.load(Ordering::SeqCst), 1);

        // Deactivation takes effect on the next request even though the
        // token is still valid: the role/account state is re-read per hit.
        service::update(UpdateUserDto {
            id: admin.id.clone(),
            full_name: None,
            phone: None,
            company: None,
            role: UserRole::Admin,
            is_active: false,
        })
        .await
        .unwrap();
        assert_eq!(
            status_for(Some(&admin_token)).await,
            StatusCode::FORBIDDEN
        );
        assert_eq!(GUARDED_CALLS.load(Ordering::SeqCst), 1);
    }
}
