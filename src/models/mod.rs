//! 数据模型模块

pub mod auth;
pub mod user;

use once_cell::sync::Lazy;
use regex::Regex;
use validator::ValidationError;

/// E.164 电话号码格式
pub(crate) static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+[1-9]\d{1,14}$").expect("Invalid phone regex"));

/// 角色取值校验：user 或 vendor
pub(crate) fn validate_role(role: &str) -> Result<(), ValidationError> {
    match role {
        "user" | "vendor" => Ok(()),
        _ => Err(ValidationError::new("role must be one of: user, vendor")),
    }
}
