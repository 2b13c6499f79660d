//! Booking API 模块

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::auth::require_permission;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/bookings", routes())
}

fn routes() -> Router<ServerState> {
    // 顾客接口：下单和发起支付 (公开，见认证中间件白名单)
    let public_routes = Router::new()
        .route("/", post(handler::create))
        .route("/{id}/pay", post(handler::pay));

    // 员工只读：登录即可
    let read_routes = Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id));

    // 员工管理操作
    let manage_routes = Router::new()
        .route("/{id}", put(handler::update_details))
        .route("/{id}/status", put(handler::update_status))
        .layer(middleware::from_fn(require_permission("bookings:manage")));

    public_routes.merge(read_routes).merge(manage_routes)
}
