//! 路由注册
//! 创建所有 API 路由并应用中间件

use axum::{
    http::{header, HeaderValue, Method},
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::{config::AppConfig, handlers, middleware::AppState};

/// 创建应用路由
pub fn create_router(state: Arc<AppState>) -> Router {
    // 公开端点（健康检查）
    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        .route("/api/v1/ping", get(handlers::health::ping));

    // 认证路由（无需令牌）
    let auth_routes = Router::new()
        .route("/api/v1/auth/register", post(handlers::auth::register))
        .route("/api/v1/auth/login", post(handlers::auth::login))
        .route("/api/v1/auth/refresh-token", post(handlers::auth::refresh_token));

    // 用户自身资源路由：先认证，再校验属主
    // axum 的 layer 后添加者在外层，因此属主校验先入层
    let user_routes = Router::new()
        .route("/api/v1/users/{user_id}", get(handlers::user::get_user))
        .route("/api/v1/users/{user_id}/update", put(handlers::user::update_user))
        .route(
            "/api/v1/users/{user_id}/reset-password",
            put(handlers::user::reset_password),
        )
        .route(
            "/api/v1/users/{user_id}/delete",
            delete(handlers::user::delete_user),
        )
        .layer(axum::middleware::from_fn(
            crate::auth::middleware::profile_guard_middleware,
        ))
        .layer(axum::middleware::from_fn_with_state(
            state.jwt_service.clone(),
            crate::auth::middleware::jwt_auth_middleware,
        ));

    // 组合所有路由
    Router::new()
        .merge(public_routes)
        .merge(auth_routes)
        .merge(user_routes)
        .layer(cors_layer(&state.config))
        .layer(axum::middleware::from_fn(crate::middleware::request_tracking_middleware))
        .with_state(state)
}

/// 构建 CORS 层
fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origin = match &config.server.cors_allowed_origin {
        Some(origin) => match origin.parse::<HeaderValue>() {
            Ok(value) => AllowOrigin::exact(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Invalid CORS origin, falling back to any");
                AllowOrigin::any()
            }
        },
        None => AllowOrigin::any(),
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}
