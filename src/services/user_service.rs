//! 用户服务：查询、更新、改密、删除

use crate::{
    auth::password::PasswordHasher,
    config::AppConfig,
    error::AppError,
    models::user::{ResetPasswordRequest, UpdateUserRequest, UserResponse},
    repository::UserStore,
};
use std::sync::Arc;
use std::time::Duration;

pub struct UserService {
    users: Arc<dyn UserStore>,
    op_timeout: Duration,
}

impl UserService {
    pub fn new(users: Arc<dyn UserStore>, config: &AppConfig) -> Self {
        Self {
            users,
            op_timeout: Duration::from_secs(config.database.op_timeout_secs),
        }
    }

    /// 获取用户详情
    pub async fn get_user(&self, id: i64) -> Result<UserResponse, AppError> {
        let user = tokio::time::timeout(self.op_timeout, self.users.find_by_id(id))
            .await??
            .ok_or(AppError::NotFound)?;

        Ok(user.into())
    }

    /// 更新用户基础信息（姓名、电话、角色）
    pub async fn update_user(
        &self,
        id: i64,
        req: &UpdateUserRequest,
    ) -> Result<UserResponse, AppError> {
        let user = tokio::time::timeout(self.op_timeout, self.users.update(id, req))
            .await??
            .ok_or(AppError::NotFound)?;

        tracing::info!(user_id = id, "User updated");

        Ok(user.into())
    }

    /// 修改密码
    ///
    /// 先验证当前密码，再对新密码重新哈希入库。
    pub async fn change_password(
        &self,
        id: i64,
        req: &ResetPasswordRequest,
    ) -> Result<(), AppError> {
        let flow = async {
            let user = self
                .users
                .find_by_id(id)
                .await?
                .ok_or(AppError::NotFound)?;

            let hasher = PasswordHasher::new();
            if !hasher.verify(&req.current_password, &user.password_hash) {
                return Err(AppError::BadRequest(
                    "Current password doesn't match".to_string(),
                ));
            }

            let password_hash = hasher.hash(&req.new_password)?;

            if !self.users.change_password(id, &password_hash).await? {
                return Err(AppError::NotFound);
            }

            tracing::info!(user_id = id, "Password changed");

            Ok(())
        };

        tokio::time::timeout(self.op_timeout, flow).await?
    }

    /// 删除用户（软删除）
    pub async fn delete_user(&self, id: i64) -> Result<(), AppError> {
        let deleted = tokio::time::timeout(self.op_timeout, self.users.delete(id)).await??;

        if !deleted {
            return Err(AppError::NotFound);
        }

        tracing::info!(user_id = id, "User deleted");

        Ok(())
    }
}
