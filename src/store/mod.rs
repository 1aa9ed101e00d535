//! # 持久化层
//!
//! 认证核心和 chirp 服务只通过这里的 trait 访问数据库，
//! `DatabaseStore` 是基于 Sea-ORM 的实现。

mod database_store;

pub use database_store::DatabaseStore;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use entity::{chirps, refresh_tokens, users};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::Result;

/// 用户与刷新令牌的存储接口
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// 按邮箱查找用户
    async fn find_user_by_email(&self, email: &str) -> Result<Option<users::Model>>;

    /// 创建用户，邮箱重复时返回 `Conflict`
    async fn create_user(&self, email: &str, hashed_password: &str) -> Result<users::Model>;

    /// 更新用户邮箱和密码哈希
    async fn update_user_credentials(
        &self,
        id: Uuid,
        email: &str,
        hashed_password: &str,
    ) -> Result<users::Model>;

    /// 将用户升级为 Chirpy Red，用户不存在时返回 `None`
    async fn upgrade_user(&self, id: Uuid) -> Result<Option<users::Model>>;

    /// 删除所有用户（级联删除令牌和 chirp），返回删除的行数
    async fn delete_all_users(&self) -> Result<u64>;

    /// 保存新的刷新令牌
    async fn create_refresh_token(
        &self,
        token: &str,
        user_id: Uuid,
        expires_at: NaiveDateTime,
    ) -> Result<()>;

    /// 按令牌字符串查找刷新令牌
    async fn find_refresh_token(&self, token: &str) -> Result<Option<refresh_tokens::Model>>;

    /// 撤销刷新令牌；已撤销或不存在的令牌不会报错
    async fn revoke_refresh_token(&self, token: &str) -> Result<()>;
}

/// Chirp 排序方向
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Chirp 存储接口
#[async_trait]
pub trait ChirpStore: Send + Sync {
    async fn create_chirp(&self, user_id: Uuid, body: &str) -> Result<chirps::Model>;

    /// 按创建时间排序列出 chirp，可按作者过滤
    async fn list_chirps(
        &self,
        author_id: Option<Uuid>,
        order: SortOrder,
    ) -> Result<Vec<chirps::Model>>;

    async fn find_chirp(&self, id: Uuid) -> Result<Option<chirps::Model>>;

    async fn delete_chirp(&self, id: Uuid) -> Result<()>;
}
