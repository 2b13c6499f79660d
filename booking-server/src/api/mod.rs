//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`auth`] - 员工登录
//! - [`bookings`] - 预订创建与管理
//! - [`availability`] - 按日可用性查询
//! - [`rooms`] - 房间管理
//! - [`layouts`] - 咖啡区布局管理
//! - [`settings`] - 场馆设置
//! - [`staff`] - 员工账号管理
//! - [`users`] - 顾客记录查询
//! - [`webhooks`] - 支付回调
//! - [`statistics`] - 报表统计

pub mod auth;
pub mod availability;
pub mod bookings;
pub mod health;
pub mod layouts;
pub mod rooms;
pub mod settings;
pub mod staff;
pub mod statistics;
pub mod users;
pub mod webhooks;

use axum::{Router, middleware};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;

use crate::auth::require_auth;
use crate::core::ServerState;

/// HTTP 请求日志中间件
async fn log_request(
    request: http::Request<axum::body::Body>,
    next: middleware::Next,
) -> http::Response<axum::body::Body> {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;

    let status = response.status();
    tracing::info!(target: "http_access", "{} {} {}", method, uri, status);

    response
}

/// Build the full application router with middleware and state applied
pub fn build_app(state: ServerState) -> Router {
    Router::<ServerState>::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(bookings::router())
        .merge(availability::router())
        .merge(rooms::router())
        .merge(layouts::router())
        .merge(settings::router())
        .merge(staff::router())
        .merge(users::router())
        .merge(webhooks::router())
        .merge(statistics::router())
        // JWT 认证中间件 - require_auth 内部跳过公共路由
        .layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(middleware::from_fn(log_request))
}
