//! JWT 访问令牌的签发与验证
//! 访问令牌为无状态自包含令牌，刷新令牌同样由此签发但以原文入库、按值查找

use crate::{config::AppConfig, error::AppError};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// JWT claims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject（用户 ID，统一为字符串形式）
    pub sub: String,

    /// Issued at
    pub iat: i64,

    /// Expiration
    pub exp: i64,

    /// JWT ID（令牌唯一标识）
    pub jti: String,
}

/// 令牌验证错误
///
/// 仅在核心内部区分；越过服务边界统一折叠为 AppError::InvalidToken。
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token expired")]
    Expired,

    #[error("invalid signature")]
    InvalidSignature,

    #[error("malformed token")]
    Malformed,
}

impl From<TokenError> for AppError {
    fn from(e: TokenError) -> Self {
        tracing::debug!("Token validation failed: {}", e);
        AppError::InvalidToken
    }
}

/// JWT service
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_token_ttl: Duration,
    refresh_token_ttl: Duration,
}

impl JwtService {
    /// 从配置创建 JWT service
    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        let secret = config.security.jwt_secret.expose_secret();

        // HS256 密钥至少 32 字节
        if secret.len() < 32 {
            return Err(AppError::Config("JWT secret too short (min 32 chars)".to_string()));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_token_ttl: Duration::seconds(config.security.access_token_exp_secs as i64),
            refresh_token_ttl: Duration::seconds(config.security.refresh_token_exp_secs as i64),
        })
    }

    /// 刷新令牌有效期（入库 expires_at 使用同一时长）
    pub fn refresh_token_ttl(&self) -> Duration {
        self.refresh_token_ttl
    }

    /// 签发指定有效期的令牌
    pub fn issue(&self, user_id: i64, ttl: Duration) -> Result<String, AppError> {
        let now = Utc::now();

        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!("Failed to encode token: {:?}", e);
            AppError::Internal
        })
    }

    /// 签发访问令牌
    pub fn issue_access_token(&self, user_id: i64) -> Result<String, AppError> {
        self.issue(user_id, self.access_token_ttl)
    }

    /// 签发刷新令牌
    pub fn issue_refresh_token(&self, user_id: i64) -> Result<String, AppError> {
        self.issue(user_id, self.refresh_token_ttl)
    }

    /// 验证并解码令牌
    ///
    /// 只接受 HS256；其他算法（包括 "none"）一律拒绝。过期判定不留余量。
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        match decode::<Claims>(token, &self.decoding_key, &validation) {
            Ok(data) => Ok(data.claims),
            Err(e) => match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => Err(TokenError::Expired),
                jsonwebtoken::errors::ErrorKind::InvalidSignature
                | jsonwebtoken::errors::ErrorKind::InvalidAlgorithm
                | jsonwebtoken::errors::ErrorKind::InvalidAlgorithmName => {
                    Err(TokenError::InvalidSignature)
                }
                _ => Err(TokenError::Malformed),
            },
        }
    }
}
