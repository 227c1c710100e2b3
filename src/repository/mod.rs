//! Database repository layer

pub mod auth_repo;
pub mod user_repo;

pub use auth_repo::{PgRefreshTokenStore, RefreshTokenStore};
pub use user_repo::{PgUserStore, UserStore};
