//! 认证与授权模块

pub mod jwt;
pub mod middleware;
pub mod password;

pub use jwt::{Claims, JwtService, TokenError};
pub use middleware::{
    extract_bearer_token, jwt_auth_middleware, profile_guard_middleware, AuthContext,
};
pub use password::PasswordHasher;
