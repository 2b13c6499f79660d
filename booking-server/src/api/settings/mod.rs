//! Settings API 模块

mod handler;

use axum::{
    Router, middleware,
    routing::{get, put},
};

use crate::auth::require_permission;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    // 读取需登录；修改需 settings:manage
    let read_routes = Router::new().route("/api/settings", get(handler::get));

    let manage_routes = Router::new()
        .route("/api/settings", put(handler::update))
        .layer(middleware::from_fn(require_permission("settings:manage")));

    read_routes.merge(manage_routes)
}
