//! 测试公共设施：测试配置与内存版存储实现
#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use secrecy::Secret;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use commerce_system::config::{
    AppConfig, DatabaseConfig, LoggingConfig, SecurityConfig, ServerConfig,
};
use commerce_system::error::AppError;
use commerce_system::models::auth::{NewRefreshToken, RefreshToken};
use commerce_system::models::user::{NewUser, UpdateUserRequest, User};
use commerce_system::repository::{RefreshTokenStore, UserStore};

/// 创建测试配置
pub fn create_test_config() -> AppConfig {
    AppConfig {
        server: ServerConfig {
            addr: "127.0.0.1:8080".to_string(),
            graceful_shutdown_timeout_secs: 30,
            cors_allowed_origin: None,
        },
        database: DatabaseConfig {
            url: Secret::new("postgresql://localhost/test".to_string()),
            max_connections: 10,
            min_connections: 1,
            acquire_timeout_secs: 30,
            idle_timeout_secs: 600,
            max_lifetime_secs: 1800,
            op_timeout_secs: 2,
        },
        logging: LoggingConfig {
            level: "info".to_string(),
            format: "json".to_string(),
        },
        security: SecurityConfig {
            jwt_secret: Secret::new("test_secret_key_32_characters_long!".to_string()),
            access_token_exp_secs: 900,
            refresh_token_exp_secs: 604800,
        },
    }
}

/// 内存版用户存储
#[derive(Default)]
pub struct MockUserStore {
    users: Mutex<Vec<User>>,
    next_id: AtomicI64,
}

impl MockUserStore {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// 预置一个用户（密码按生产路径哈希），返回用户 ID
    pub fn seed_user(&self, name: &str, email: &str, password: &str) -> i64 {
        let hasher = commerce_system::auth::PasswordHasher::new();
        let password_hash = hasher.hash(password).expect("Hashing should succeed");

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let now = Utc::now();
        self.users.lock().unwrap().push(User {
            id,
            name: name.to_string(),
            email: email.to_string(),
            phone: "+14155552671".to_string(),
            role: "user".to_string(),
            password_hash,
            is_deleted: false,
            created_at: now,
            updated_at: now,
        });

        id
    }

    /// 模拟账号注销
    pub fn remove_user(&self, id: i64) {
        self.users.lock().unwrap().retain(|u| u.id != id);
    }
}

#[async_trait]
impl UserStore for MockUserStore {
    async fn create(&self, user: &NewUser) -> Result<User, AppError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let now = Utc::now();
        let user = User {
            id,
            name: user.name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            role: user.role.clone(),
            password_hash: user.password_hash.clone(),
            is_deleted: false,
            created_at: now,
            updated_at: now,
        };
        self.users.lock().unwrap().push(user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email && !u.is_deleted)
            .cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id && !u.is_deleted)
            .cloned())
    }

    async fn update(&self, id: i64, req: &UpdateUserRequest) -> Result<Option<User>, AppError> {
        let mut users = self.users.lock().unwrap();
        let Some(user) = users.iter_mut().find(|u| u.id == id && !u.is_deleted) else {
            return Ok(None);
        };
        user.name = req.name.clone();
        user.phone = req.phone.clone();
        user.role = req.role.clone();
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }

    async fn change_password(&self, id: i64, password_hash: &str) -> Result<bool, AppError> {
        let mut users = self.users.lock().unwrap();
        let Some(user) = users.iter_mut().find(|u| u.id == id && !u.is_deleted) else {
            return Ok(false);
        };
        user.password_hash = password_hash.to_string();
        Ok(true)
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut users = self.users.lock().unwrap();
        let Some(user) = users.iter_mut().find(|u| u.id == id && !u.is_deleted) else {
            return Ok(false);
        };
        user.is_deleted = true;
        Ok(true)
    }
}

/// 内存版刷新令牌存储
///
/// find_by_token 与 SQL 查询语义一致：过期记录等同于不存在。
/// 可注入存储失败与延迟，用于原子性与超时测试。
#[derive(Default)]
pub struct MockRefreshTokenStore {
    tokens: Mutex<Vec<RefreshToken>>,
    next_id: AtomicI64,
    fail_save: AtomicBool,
    delay: Mutex<Option<Duration>>,
}

impl MockRefreshTokenStore {
    pub fn new() -> Self {
        Self {
            tokens: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
            fail_save: AtomicBool::new(false),
            delay: Mutex::new(None),
        }
    }

    /// 后续 save 调用返回存储错误
    pub fn fail_next_saves(&self) {
        self.fail_save.store(true, Ordering::SeqCst);
    }

    /// 所有存储操作前注入延迟
    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    /// 直接插入一条记录（可用于预置已过期令牌）
    pub fn insert_record(&self, record: RefreshToken) {
        self.tokens.lock().unwrap().push(record);
    }

    pub fn record_count(&self) -> usize {
        self.tokens.lock().unwrap().len()
    }

    async fn maybe_delay(&self) {
        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl RefreshTokenStore for MockRefreshTokenStore {
    async fn save(&self, token: &NewRefreshToken) -> Result<RefreshToken, AppError> {
        self.maybe_delay().await;

        if self.fail_save.load(Ordering::SeqCst) {
            return Err(AppError::Database(sqlx::Error::PoolClosed));
        }

        let record = RefreshToken {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            user_id: token.user_id,
            token: token.token.clone(),
            expires_at: token.expires_at,
        };
        self.tokens.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<RefreshToken>, AppError> {
        self.maybe_delay().await;

        let now = Utc::now();
        Ok(self
            .tokens
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.token == token && t.expires_at > now)
            .cloned())
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut tokens = self.tokens.lock().unwrap();
        let before = tokens.len();
        tokens.retain(|t| t.id != id);
        Ok(tokens.len() < before)
    }
}
