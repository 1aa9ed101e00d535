//! # 路由配置
//!
//! 定义所有API路由和路由组织

use axum::Router;
use axum::routing::{get, post};

use super::handlers::{admin, auth, chirps, system, users, webhooks};
use super::server::AppState;

/// `/api` 下的路由
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/healthz", get(system::readiness))
        .route(
            "/users",
            post(users::register).put(users::update_credentials),
        )
        .route("/login", post(auth::login))
        .route("/refresh", post(auth::refresh))
        .route("/revoke", post(auth::revoke))
        .route(
            "/chirps",
            get(chirps::list_chirps).post(chirps::create_chirp),
        )
        .route(
            "/chirps/{chirp_id}",
            get(chirps::get_chirp).delete(chirps::delete_chirp),
        )
        .route("/polka/webhooks", post(webhooks::polka_webhook))
}

/// `/admin` 下的路由
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/metrics", get(admin::metrics))
        .route("/reset", post(admin::reset))
}
