//! 认证服务：注册、登录、令牌刷新

use crate::{
    auth::jwt::JwtService,
    auth::password::PasswordHasher,
    config::AppConfig,
    error::AppError,
    models::auth::*,
    models::user::{NewUser, UserResponse},
    repository::{RefreshTokenStore, UserStore},
};
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;

pub struct AuthService {
    users: Arc<dyn UserStore>,
    tokens: Arc<dyn RefreshTokenStore>,
    jwt_service: Arc<JwtService>,
    /// 单次业务流程的 I/O 超时上限
    op_timeout: Duration,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserStore>,
        tokens: Arc<dyn RefreshTokenStore>,
        jwt_service: Arc<JwtService>,
        config: &AppConfig,
    ) -> Self {
        Self {
            users,
            tokens,
            jwt_service,
            op_timeout: Duration::from_secs(config.database.op_timeout_secs),
        }
    }

    /// 用户注册
    ///
    /// 明文密码在哈希调用之后不再保留。
    pub async fn register(&self, req: &RegisterRequest) -> Result<UserResponse, AppError> {
        let hasher = PasswordHasher::new();
        let password_hash = hasher.hash(&req.password)?;

        let new_user = NewUser {
            name: req.name.clone(),
            email: req.email.clone(),
            phone: req.phone.clone(),
            role: req.role.clone(),
            password_hash,
        };

        let user = tokio::time::timeout(self.op_timeout, self.users.create(&new_user)).await??;

        tracing::info!(user_id = user.id, "User registered");

        Ok(user.into())
    }

    /// 用户登录
    ///
    /// 邮箱不存在与密码错误返回同一个 InvalidCredentials，调用方不可区分。
    /// 刷新令牌持久化失败则整个登录失败，已签发的访问令牌一并丢弃。
    pub async fn authenticate(&self, req: &LoginRequest) -> Result<LoginResponse, AppError> {
        let flow = async {
            let user = self
                .users
                .find_by_email(&req.email)
                .await?
                .ok_or(AppError::InvalidCredentials)?;

            // 每次登录尝试只做一次密码验证
            let hasher = PasswordHasher::new();
            if !hasher.verify(&req.password, &user.password_hash) {
                return Err(AppError::InvalidCredentials);
            }

            let access_token = self.jwt_service.issue_access_token(user.id)?;
            let refresh_token = self.jwt_service.issue_refresh_token(user.id)?;

            self.tokens
                .save(&NewRefreshToken {
                    user_id: user.id,
                    token: refresh_token.clone(),
                    expires_at: Utc::now() + self.jwt_service.refresh_token_ttl(),
                })
                .await?;

            tracing::info!(user_id = user.id, "User logged in");

            Ok(LoginResponse {
                access_token,
                refresh_token,
            })
        };

        // 超时后丢弃未完成的存储调用，不假设其已成功
        tokio::time::timeout(self.op_timeout, flow).await?
    }

    /// 刷新访问令牌
    ///
    /// 刷新令牌不轮换：到自然过期前可重复使用，流程中也不做失效处理。
    pub async fn refresh(&self, req: &RefreshTokenRequest) -> Result<RefreshTokenResponse, AppError> {
        let flow = async {
            // 过期与不存在在存储层即不可区分，统一视为非法令牌
            let record = self
                .tokens
                .find_by_token(&req.refresh_token)
                .await?
                .ok_or(AppError::InvalidToken)?;

            // 用户可能已注销，不能为不存在的主体签发令牌
            let user = self
                .users
                .find_by_id(record.user_id)
                .await?
                .ok_or(AppError::SubjectNotFound)?;

            let access_token = self.jwt_service.issue_access_token(user.id)?;

            tracing::debug!(user_id = user.id, "Access token refreshed");

            Ok(RefreshTokenResponse { access_token })
        };

        tokio::time::timeout(self.op_timeout, flow).await?
    }
}
