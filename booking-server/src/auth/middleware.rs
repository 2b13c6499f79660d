//! 认证中间件
//!
//! 为 JWT 认证和授权提供 Axum 中间件。

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use http::Method;

use crate::auth::{CurrentUser, JwtService};
use crate::core::ServerState;
use shared::error::AppError;

/// 公开路由 (method, path)：顾客下单、查询可用性和支付回调不需要登录
const PUBLIC_API_ROUTES: &[(&Method, &str)] = &[
    (&Method::POST, "/api/auth/login"),
    (&Method::POST, "/api/bookings"),
    (&Method::GET, "/api/availability"),
    (&Method::GET, "/api/rooms"),
    (&Method::GET, "/api/layout"),
    (&Method::POST, "/api/webhooks/payment"),
];

fn is_public_route(method: &Method, path: &str) -> bool {
    if PUBLIC_API_ROUTES
        .iter()
        .any(|(m, p)| *m == method && *p == path)
    {
        return true;
    }
    // 顾客发起支付：POST /api/bookings/{id}/pay
    method == Method::POST && path.starts_with("/api/bookings/") && path.ends_with("/pay")
}

/// 认证中间件 - 要求员工登录
///
/// 从 `Authorization: Bearer <token>` 头提取并验证 JWT。
/// 验证成功后将 [`CurrentUser`] 注入请求扩展。
///
/// # 跳过认证的路径
///
/// - `OPTIONS *` (CORS 预检)
/// - 非 `/api/` 路径 (健康检查等)
/// - [`PUBLIC_API_ROUTES`] 中的顾客接口
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path();

    if req.method() == Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    if !path.starts_with("/api/") {
        return Ok(next.run(req).await);
    }

    if is_public_route(req.method(), path) {
        return Ok(next.run(req).await);
    }

    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => JwtService::extract_from_header(header)
            .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?,
        None => {
            tracing::warn!(uri = %req.uri(), "Request without authorization");
            return Err(AppError::not_authenticated());
        }
    };

    match state.jwt_service().validate_token(token) {
        Ok(claims) => {
            let user = CurrentUser::from(claims);
            req.extensions_mut().insert(user);
            Ok(next.run(req).await)
        }
        Err(e) => {
            tracing::warn!(uri = %req.uri(), error = %e, "Token validation failed");
            match e {
                crate::auth::JwtError::ExpiredToken => Err(AppError::token_expired()),
                _ => Err(AppError::invalid_token("Invalid token")),
            }
        }
    }
}

/// 权限检查中间件 - 要求特定权限
///
/// # 用法
///
/// ```ignore
/// Router::new()
///     .route("/api/rooms", post(handler::create))
///     .layer(middleware::from_fn(require_permission("rooms:manage")));
/// ```
///
/// 无权限返回 403 Forbidden。
pub fn require_permission(
    permission: &'static str,
) -> impl Fn(
    Request,
    Next,
) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Response, AppError>> + Send>>
+ Clone {
    move |req: Request, next: Next| {
        Box::pin(async move {
            let user = req
                .extensions()
                .get::<CurrentUser>()
                .ok_or_else(AppError::not_authenticated)?;

            if !user.has_permission(permission) {
                tracing::warn!(
                    staff_id = %user.id,
                    staff = %user.name,
                    required = permission,
                    "Permission denied"
                );
                return Err(AppError::forbidden(format!(
                    "Permission denied: {}",
                    permission
                )));
            }

            Ok(next.run(req).await)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_routes() {
        assert!(is_public_route(&Method::POST, "/api/bookings"));
        assert!(is_public_route(&Method::GET, "/api/availability"));
        assert!(is_public_route(&Method::POST, "/api/webhooks/payment"));
        // same path, staff-only method
        assert!(!is_public_route(&Method::GET, "/api/bookings"));
        assert!(!is_public_route(&Method::PUT, "/api/layout"));
        assert!(!is_public_route(&Method::GET, "/api/staff"));
    }
}
