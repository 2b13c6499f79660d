//! Café Layout API 模块

mod handler;

use axum::{
    Router, middleware,
    routing::{get, put},
};

use crate::auth::require_permission;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    // 布局读取公开 (顾客选椅子)
    let public_routes = Router::new().route("/api/layout", get(handler::get));

    let manage_routes = Router::new()
        .route("/api/layout", put(handler::update))
        .layer(middleware::from_fn(require_permission("layout:manage")));

    public_routes.merge(manage_routes)
}
