use std::path::Path;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::services::ServeDir;

use crate::{handlers, system};

/// Full route table. Admin routes carry the role gate per route; the
/// storage buckets are served read-only under `public_base`.
pub fn configure_routes(storage_root: &Path, public_base: &str) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // AUTH ROUTES (PUBLIC)
        // ========================================
        .route("/api/auth/register", post(system::handlers::auth::register))
        .route("/api/auth/login", post(system::handlers::auth::login))
        .route("/api/auth/refresh", post(system::handlers::auth::refresh))
        .route("/api/auth/logout", post(system::handlers::auth::logout))
        // Auth routes (session required)
        .route(
            "/api/auth/me",
            get(system::handlers::auth::current_user)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        .route(
            "/api/auth/change-password",
            post(system::handlers::auth::change_own_password)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        // ========================================
        // STOREFRONT ROUTES (PUBLIC)
        // ========================================
        .route("/api/products", get(handlers::products::list_active))
        .route(
            "/api/products/categories",
            get(handlers::products::list_categories),
        )
        .route("/api/products/:id", get(handlers::products::get_by_id))
        .route("/api/categories", get(handlers::categories::list_all))
        .route("/api/documents", get(handlers::documents::list_active))
        .route("/api/inquiries", post(handlers::inquiries::create))
        .route("/api/changes", get(handlers::changes::change_feed))
        // ========================================
        // BACK-OFFICE ROUTES (ADMIN ONLY)
        // ========================================
        .route(
            "/api/admin/products",
            get(handlers::products::list_all)
                .post(handlers::products::upsert)
                .layer(middleware::from_fn(system::auth::middleware::require_admin)),
        )
        .route(
            "/api/admin/products/import",
            post(handlers::import::import_csv)
                .layer(middleware::from_fn(system::auth::middleware::require_admin)),
        )
        .route(
            "/api/admin/products/:id",
            delete(handlers::products::delete)
                .layer(middleware::from_fn(system::auth::middleware::require_admin)),
        )
        .route(
            "/api/admin/products/:id/active",
            put(handlers::products::set_active)
                .layer(middleware::from_fn(system::auth::middleware::require_admin)),
        )
        .route(
            "/api/admin/products/:id/image",
            post(handlers::uploads::upload_product_image)
                .layer(middleware::from_fn(system::auth::middleware::require_admin)),
        )
        .route(
            "/api/admin/categories",
            post(handlers::categories::create)
                .layer(middleware::from_fn(system::auth::middleware::require_admin)),
        )
        .route(
            "/api/admin/categories/:id",
            delete(handlers::categories::delete)
                .layer(middleware::from_fn(system::auth::middleware::require_admin)),
        )
        .route(
            "/api/admin/documents",
            get(handlers::documents::list_all)
                .post(handlers::documents::upload)
                .layer(middleware::from_fn(system::auth::middleware::require_admin)),
        )
        .route(
            "/api/admin/documents/:id",
            delete(handlers::documents::delete)
                .layer(middleware::from_fn(system::auth::middleware::require_admin)),
        )
        .route(
            "/api/admin/documents/:id/active",
            put(handlers::documents::set_active)
                .layer(middleware::from_fn(system::auth::middleware::require_admin)),
        )
        .route(
            "/api/admin/inquiries",
            get(handlers::inquiries::list_all)
                .layer(middleware::from_fn(system::auth::middleware::require_admin)),
        )
        .route(
            "/api/admin/inquiries/:id/status",
            put(handlers::inquiries::set_status)
                .layer(middleware::from_fn(system::auth::middleware::require_admin)),
        )
        // User management (admin only)
        .route(
            "/api/admin/users",
            get(system::handlers::users::list_all)
                .post(system::handlers::users::create)
                .layer(middleware::from_fn(system::auth::middleware::require_admin)),
        )
        .route(
            "/api/admin/users/:id",
            get(system::handlers::users::get_by_id)
                .put(system::handlers::users::update)
                .delete(system::handlers::users::delete)
                .layer(middleware::from_fn(system::auth::middleware::require_admin)),
        )
        .route(
            "/api/admin/users/:id/password",
            post(system::handlers::users::change_password)
                .layer(middleware::from_fn(system::auth::middleware::require_admin)),
        )
        // Public file serving for the storage buckets
        .nest_service(public_base, ServeDir::new(storage_root))
        // Documents may be up to 10 MB; leave headroom for multipart framing
        .layer(DefaultBodyLimit::max(12 * 1024 * 1024))
}
