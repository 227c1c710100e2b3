//! JWT 认证中间件与资源属主校验

use crate::{auth::jwt::JwtService, error::AppError};
use axum::{
    extract::{FromRequestParts, Path, Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// 认证上下文（附加到请求扩展）
///
/// 以类型作为扩展键，下游读到的就是强类型的用户 ID。
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: i64,
}

// 实现 FromRequestParts 以便在 handler 中直接提取 AuthContext
impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .ok_or(AppError::NotAuthorized)
    }
}

/// 从 Authorization 头提取 Bearer 令牌
///
/// 头缺失与前缀非法是两类错误；裸令牌（无 "Bearer " 前缀）必须拒绝。
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let header = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or(AppError::MissingAuthHeader)?;

    header.strip_prefix("Bearer ").ok_or(AppError::InvalidToken)
}

/// JWT 认证中间件
///
/// 验证失败一律以同一个 "Invalid token" 响应，不向客户端区分原因。
pub async fn jwt_auth_middleware(
    State(jwt_service): State<Arc<JwtService>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    // 从 Authorization 头提取令牌
    let token = extract_bearer_token(req.headers())?;

    // 验证令牌
    let claims = jwt_service.verify(token)?;

    // 解析 subject 为用户 ID
    let user_id: i64 = claims.sub.parse().map_err(|_| AppError::InvalidToken)?;

    // 附加到请求扩展
    req.extensions_mut().insert(AuthContext { user_id });

    Ok(next.run(req).await)
}

/// 资源属主校验中间件
///
/// 仅用于操作用户自身资源的路由，必须层叠在认证中间件之内。
pub async fn profile_guard_middleware(
    Path(user_id): Path<i64>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_context = req
        .extensions()
        .get::<AuthContext>()
        .ok_or(AppError::NotAuthorized)?;

    if auth_context.user_id != user_id {
        tracing::warn!(
            authenticated_user = auth_context.user_id,
            requested_user = user_id,
            "User attempted to access another user's resource"
        );
        return Err(AppError::NotAuthorized);
    }

    Ok(next.run(req).await)
}
